extern crate actix_web;
extern crate anyhow;
extern crate chrono;
extern crate dotenv;
extern crate env_logger;
extern crate itertools;
extern crate log;
extern crate serde;
extern crate serde_json;
extern crate thiserror;
extern crate tokio;
extern crate uuid;

mod config;
mod core;
mod error;
mod handlers;
mod impls;
pub mod request;
pub mod response;

use actix_web::web::Data;
use actix_web::HttpServer;
use config::Config;
use impls::store::memory::MemoryStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,actix_web=info")).init();
    let config = Config::from_env()?;
    let store = Data::new(MemoryStore::new());
    if config.seed_demo_polls {
        crate::core::services::poll::seed_demo_polls(store.get_ref()).await?;
    }
    log::info!("listening on {}:{}", config.host, config.port);
    let bind = (config.host.clone(), config.port);
    let workers = config.workers;
    let settings = Data::new(config);
    let mut server = HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(store.clone())
            .app_data(settings.clone())
            .configure(handlers::configure::<MemoryStore>)
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }
    server.bind(bind)?.run().await?;
    Ok(())
}
