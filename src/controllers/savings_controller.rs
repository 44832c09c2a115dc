use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::config::ProjectionSettings;
use crate::error::SavingsResult;
use crate::models::savings::{SavingsCalculationRequest, SavingsReportResponse};
use crate::models::solar::BuildingInsightsResponse;
use crate::services::{geometry, projection, solar_api};
use crate::shared_state::SharedState;

/// POST /api/savings/calculate
/// Project the financial return of installing solar at a site
///
/// Reduces the building footprint to a representative point, resolves the
/// site's production forecast, and projects year-by-year discounted savings
/// against the configured tariff schedule and economics.
#[utoipa::path(
    post,
    path = "/api/savings/calculate",
    request_body = SavingsCalculationRequest,
    responses(
        (status = 200, description = "Savings projection report", body = SavingsReportResponse),
        (status = 400, description = "Invalid footprint, parameters, or location out of coverage"),
        (status = 502, description = "Solar-potential provider unavailable or returned a malformed payload"),
        (status = 500, description = "Tariff schedule misconfigured")
    )
)]
pub async fn calculate_savings(
    State(state): State<SharedState>,
    Json(request): Json<SavingsCalculationRequest>,
) -> SavingsResult<Json<SavingsReportResponse>> {
    let site = geometry::centroid(&request.coordinates)?;
    let insights =
        solar_api::fetch_building_insights(&state.http, &state.solar_api, site.latitude, site.longitude)
            .await?;
    let production = solar_api::normalize(&insights, state.resolver.as_ref())?;

    let settings = &state.settings;
    let report = projection::project(
        request.annual_consumption_kwh,
        &production,
        &settings.characteristics,
        &settings.economics,
        &settings.tariffs,
        &settings.investment,
        settings.horizon_years,
    )?;

    info!(
        latitude = site.latitude,
        longitude = site.longitude,
        payback_year = report.payback_year,
        "savings projection computed"
    );

    Ok(Json(SavingsReportResponse {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        site,
        production,
        report,
    }))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PotentialQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// GET /api/solar/potential
/// Raw solar potential for a coordinate
///
/// Passthrough to the provider's building-insights lookup, reduced to the
/// fields this service consumes. Useful for inspecting what a projection
/// would be based on.
#[utoipa::path(
    get,
    path = "/api/solar/potential",
    params(PotentialQuery),
    responses(
        (status = 200, description = "Solar potential for the closest building", body = BuildingInsightsResponse),
        (status = 400, description = "Location out of coverage"),
        (status = 502, description = "Solar-potential provider unavailable")
    )
)]
pub async fn get_solar_potential(
    State(state): State<SharedState>,
    Query(query): Query<PotentialQuery>,
) -> SavingsResult<Json<BuildingInsightsResponse>> {
    let insights = solar_api::fetch_building_insights(
        &state.http,
        &state.solar_api,
        query.latitude,
        query.longitude,
    )
    .await?;
    Ok(Json(insights))
}

/// GET /api/config/projection
/// Currently loaded projection settings
///
/// Read-only view of the validated tariff schedule, system characteristics,
/// economics, and investment costs the engine runs with.
#[utoipa::path(
    get,
    path = "/api/config/projection",
    responses(
        (status = 200, description = "Validated projection settings", body = ProjectionSettings)
    )
)]
pub async fn get_projection_settings(
    State(settings): State<Arc<ProjectionSettings>>,
) -> Json<ProjectionSettings> {
    Json((*settings).clone())
}
