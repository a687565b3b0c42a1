mod ai;
mod config;
mod error;
mod services;
mod state;
mod store;
#[cfg(test)]
mod test_support;
mod vss;

use crate::ai::gemini::GeminiModel;
use crate::ai::simulated::SimulatedModel;
use crate::ai::CompletionModel;
use crate::config::AppConfig;
use crate::state::AppState;
use crate::store::DocumentStore;
use crate::vss::{VssClient, VssResolver};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();

    let store = Arc::new(DocumentStore::open(&config.database).map_err(io::Error::other)?);
    info!("Document store opened at {}", config.database);

    let model: Arc<dyn CompletionModel> = match config.gemini.clone() {
        Some(gemini) => Arc::new(GeminiModel::new(gemini).map_err(io::Error::other)?),
        None => {
            warn!("GEMINI_API_KEY is not set; AI suggestions use the simulated model");
            Arc::new(SimulatedModel)
        }
    };
    info!("Suggestion flows run on the {} model", model.name());

    // Missing VSS configuration is reported per call, not at startup.
    let resolver = Arc::new(VssResolver::new(
        store.clone(),
        config.vss.fallback_base_url.clone(),
        config.vss.cache_ttl,
    ));
    let vss = Arc::new(VssClient::new(resolver, config.vss.request_timeout).map_err(io::Error::other)?);

    let state = AppState {
        store,
        model,
        vss,
        upload_limit: config.upload_limit,
    };
    let json_limit = config.json_limit;

    info!("Server running at {}", config.bind_url());

    HttpServer::new(move || {
        App::new()
            .app_data(services::json_config(json_limit))
            .app_data(services::query_config())
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
