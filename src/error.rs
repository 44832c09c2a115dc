use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::savings::TariffCategory;

/// Unified error type for a single projection request.
///
/// Every variant is fatal to the request that raised it: no partial
/// reports, no silent defaults. Handlers return this type directly;
/// [`IntoResponse`] maps each kind to an HTTP status.
#[derive(Error, Debug)]
pub enum SavingsError {
    /// Empty or fully non-numeric building footprint.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Solar-potential payload missing the fields the adapter consumes.
    #[error("malformed forecast payload: {0}")]
    MalformedForecast(String),

    /// No configured tariff row matches the site's category.
    #[error("no tariff row configured for category {0}")]
    TariffNotFound(TariffCategory),

    /// Out-of-domain numeric input to the projection engine.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The solar-potential provider has no data for the location.
    #[error("location out of coverage")]
    OutOfCoverage,

    /// Transport or decode failure talking to the solar-potential provider.
    #[error("solar API request failed: {0}")]
    SolarApi(#[from] reqwest::Error),

    /// Invalid or unreadable runtime configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type SavingsResult<T> = Result<T, SavingsError>;

impl SavingsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SavingsError::InvalidGeometry(_)
            | SavingsError::InvalidParameter(_)
            | SavingsError::OutOfCoverage => StatusCode::BAD_REQUEST,
            SavingsError::MalformedForecast(_) | SavingsError::SolarApi(_) => {
                StatusCode::BAD_GATEWAY
            }
            SavingsError::TariffNotFound(_) | SavingsError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SavingsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
