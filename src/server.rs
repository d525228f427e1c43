use crate::Logger;
use hyper::{
    body::HttpBody,
    header::{HeaderValue, CONTENT_TYPE},
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, StatusCode,
};
use regex::Regex;
use serde_json::json;
use std::{collections::HashMap, convert::Infallible, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

/// Route template such as `/decode/{encoded}`; each `{name}` matches one path segment.
pub struct DynamicUri {
    regex: Regex,
    parameters: Vec<String>,
}

impl DynamicUri {
    pub fn new(uri: &str) -> Result<Self, regex::Error> {
        let placeholder = Regex::new(r"\{([^{}/]*)\}")?;
        let mut offset = 0;
        let mut pattern = String::from("^");
        let mut parameters = Vec::new();
        for captures in placeholder.captures_iter(uri) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            pattern.push_str(&regex::escape(&uri[offset..whole.start()]));
            pattern.push_str("([^/]+)");
            parameters.push(name.as_str().to_string());
            offset = whole.end();
        }
        pattern.push_str(&regex::escape(&uri[offset..]));
        pattern.push('$');
        Ok(Self {
            regex: Regex::new(&pattern)?,
            parameters,
        })
    }

    pub fn check(&self, path: &str) -> Option<HashMap<String, String>> {
        let captures = self.regex.captures(path)?;
        Some(
            self.parameters
                .iter()
                .enumerate()
                .filter_map(|(index, name)| Some((name.clone(), captures.get(index + 1)?.as_str().to_string())))
                .collect(),
        )
    }
}

pub fn respond(status: StatusCode, value: serde_json::Value) -> Response<Body> {
    let mut response = Response::new(Body::from(value.to_string()));
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

pub fn respond_ok(value: serde_json::Value) -> Response<Body> {
    respond(StatusCode::OK, value)
}

pub fn respond_message(status: StatusCode, message: impl AsRef<str>) -> Response<Body> {
    respond(status, json!({ "message": message.as_ref() }))
}

type BoxedResponseFuture = Pin<Box<dyn Send + Future<Output = Response<Body>>>>;
type BoxedHandler<S> = Box<dyn Fn(HashMap<String, String>, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;

struct Route<S> {
    method: Method,
    dynamic_uri: DynamicUri,
    handler: BoxedHandler<S>,
}

pub struct Server<S> {
    routes: Vec<Route<S>>,
    state: Arc<S>,
    logger: Logger,
}

impl<S: 'static + Send + Sync> Server<S> {
    pub fn new(state: Arc<S>, logger: Logger) -> Self {
        Self {
            routes: Vec::new(),
            state,
            logger,
        }
    }

    fn add<H, F>(&mut self, method: Method, uri: &str, handler: H) -> Result<(), regex::Error>
    where
        H: 'static + Fn(HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.routes.push(Route {
            method,
            dynamic_uri: DynamicUri::new(uri)?,
            handler: Box::new(move |parameters, body, state| Box::pin(handler(parameters, body, state))),
        });
        Ok(())
    }

    pub fn get<H, F>(&mut self, uri: &str, handler: H) -> Result<(), regex::Error>
    where
        H: 'static + Fn(HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.add(Method::GET, uri, handler)
    }

    pub fn post<H, F>(&mut self, uri: &str, handler: H) -> Result<(), regex::Error>
    where
        H: 'static + Fn(HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.add(Method::POST, uri, handler)
    }

    pub async fn route(&self, method: &Method, path: &str, body: Vec<u8>) -> Response<Body> {
        let mut allowed = false;
        for route in &self.routes {
            if let Some(parameters) = route.dynamic_uri.check(path) {
                if route.method == *method {
                    return (route.handler)(parameters, body, self.state.clone()).await;
                }
                allowed = true;
            }
        }
        if allowed {
            respond_message(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
        } else {
            respond_message(StatusCode::NOT_FOUND, "Not Found")
        }
    }

    async fn handle(&self, mut request: Request<Body>, max_body_size: usize) -> Response<Body> {
        let response = match read_body(request.body_mut(), max_body_size).await {
            Ok(body) => self.route(request.method(), request.uri().path(), body).await,
            Err(response) => response,
        };
        self.logger.log(format_args!("{} {} {}", request.method(), request.uri(), response.status().as_u16()));
        response
    }

    pub async fn run(self, address: SocketAddr, max_body_size: usize) -> Result<(), hyper::Error> {
        let server = Arc::new(self);
        let make_service = make_service_fn(move |_| {
            let server = server.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request: Request<Body>| {
                    let server = server.clone();
                    async move { Ok::<_, Infallible>(server.handle(request, max_body_size).await) }
                }))
            }
        });
        hyper::Server::try_bind(&address)?.serve(make_service).await
    }
}

async fn read_body(body: &mut Body, max_body_size: usize) -> Result<Vec<u8>, Response<Body>> {
    let mut buffer: Vec<u8> = Vec::new();
    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(|error| respond_message(StatusCode::BAD_REQUEST, error.to_string()))?;
        if buffer.len() + chunk.len() > max_body_size {
            return Err(respond_message(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Body exceeds {} bytes", max_body_size),
            ));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}
