pub mod base32;
pub mod base_common;
pub mod chronometer;
pub mod configuration;
pub mod create_server;
pub mod error;
pub mod logger;
pub mod server;
pub mod state;

use self::{
    chronometer::Chronometer, configuration::Configuration, create_server::create_server, error::Error, logger::Logger, server::Server,
    state::State,
};
use std::{collections::HashMap, net::SocketAddr, process, sync::Arc};
use tokio::runtime;

async fn serve(configuration: Configuration, logger: Logger) -> Result<(), Error> {
    let server = create_server(Arc::new(State::new()), logger)?;
    let address = SocketAddr::new(configuration.host(), configuration.port());
    logger.log(format_args!("Listening on http://{}", address));
    server.run(address, configuration.max_body_size()).await?;
    Ok(())
}

fn run(configuration: Configuration, logger: Logger) -> Result<(), Error> {
    let runtime = runtime::Builder::new_multi_thread()
        .worker_threads(configuration.threads())
        .enable_all()
        .build()?;
    runtime.block_on(serve(configuration, logger))
}

fn main() {
    let logger = Logger::new();
    let result = Configuration::new().map_err(Error::new).and_then(|configuration| run(configuration, logger));
    if let Err(error) = result {
        logger.error(error);
        process::exit(1);
    }
}
