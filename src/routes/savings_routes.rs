use axum::{
    Router,
    routing::{get, post},
};

use crate::controllers::savings_controller::{
    calculate_savings, get_projection_settings, get_solar_potential,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router. Handlers extract `State<SharedState>` (or
/// a `FromRef` substate of it) — a single `.with_state(shared)` covers all.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/savings/calculate", post(calculate_savings))
        .route("/solar/potential", get(get_solar_potential))
        .route("/config/projection", get(get_projection_settings))
        .with_state(shared)
}
