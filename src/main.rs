mod api_docs;
mod config;
mod controllers;
mod error;
mod models;
mod routes;
mod services;
mod shared_state;

use std::net::SocketAddr;

use axum::{Router, response::Html, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::savings_routes::api_routes;
use crate::shared_state::SharedState;

#[tokio::main]
async fn main() {
    // 1. Logging
    tracing_subscriber::fmt().with_target(false).init();

    // 2. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            error!("failed to load config.json: {e}");
            return;
        }
    };

    // 3. Validate projection settings once; requests only ever read them
    let settings = match config.projection.validate() {
        Ok(s) => s,
        Err(e) => {
            error!("invalid projection configuration: {e}");
            return;
        }
    };
    info!(
        tariff_rows = settings.tariffs.len(),
        horizon_years = settings.horizon_years,
        "projection settings loaded"
    );

    // 4. Build the router
    let shared = SharedState::new(&config, settings);
    let app = Router::new()
        .nest("/api", api_routes(shared))
        .route(
            "/scalar",
            get(|| async { Html(Scalar::new(ApiDoc::openapi()).to_html()) }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // 5. Serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("API server listening on http://{addr}");
    info!("Scalar UI: http://{addr}/scalar");

    if let Err(e) = axum_server::bind(addr).serve(app.into_make_service()).await {
        error!("server error: {e}");
    }
}
