use crate::{
    base32,
    server::{respond_message, respond_ok},
    Arc, Error, HashMap, Logger, Server, State,
};
use hyper::{Body, Response, StatusCode};
use serde::Serialize;
use serde_json::json;

macro_rules! unwrap {
    ( $state:expr, $x:expr ) => {{
        match $x {
            Ok(result) => result,
            Err(error) => {
                $state.record_rejected();
                return respond_error(error);
            }
        }
    }};
}

#[derive(Debug, Serialize)]
struct Encoded {
    encoded: String,
}

#[derive(Debug, Serialize)]
struct Decoded {
    bytes: Vec<u8>,
    text: String,
}

fn respond_error(error: Error) -> Response<Body> {
    respond_message(StatusCode::BAD_REQUEST, error.message())
}

fn parse_text(body: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(body).map_err(|_| Error::new("Invalid utf8 body"))
}

fn parse_encoded_from_parameters(parameters: &HashMap<String, String>) -> Result<&str, Error> {
    parameters
        .get("encoded")
        .map(String::as_str)
        .ok_or_else(|| Error::new("Missing encoded parameter"))
}

fn respond_encoded(state: &State, encoded: String) -> Response<Body> {
    state.record_encoded();
    let encoded = Encoded { encoded };
    respond_ok(json!(encoded))
}

fn decode(state: &State, encoded: &str) -> Response<Body> {
    let bytes = unwrap!(state, base32::decode(encoded.trim()).map_err(Error::from));
    state.record_decoded();
    let text = base32::to_text(&bytes);
    let decoded = Decoded { bytes, text };
    respond_ok(json!(decoded))
}

pub fn create_server(state: Arc<State>, logger: Logger) -> Result<Server<State>, Error> {
    let mut server = Server::new(state, logger);

    server.post("/encode", |_parameters, body, state| async move { respond_encoded(&state, base32::encode(&body)) })?;

    server.post("/encode/text", |_parameters, body, state| async move {
        let text = unwrap!(state, parse_text(&body));
        respond_encoded(&state, base32::encode_string(text))
    })?;

    server.get("/decode/{encoded}", |parameters, _body, state| async move {
        let encoded = unwrap!(state, parse_encoded_from_parameters(&parameters));
        decode(&state, encoded)
    })?;

    server.post("/decode", |_parameters, body, state| async move {
        let encoded = unwrap!(state, parse_text(&body));
        decode(&state, encoded)
    })?;

    server.get("/statistics", |_parameters, _body, state| async move {
        let statistics = state.statistics();
        respond_ok(json!(statistics))
    })?;

    Ok(server)
}
