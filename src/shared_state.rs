use std::sync::Arc;

use axum::extract::FromRef;
use reqwest::Client;

use crate::config::{Config, ProjectionSettings, SolarApiConfig};
use crate::services::category::{FixedCategoryResolver, TariffCategoryResolver};

/// Everything a request handler needs, cloneable per request.
///
/// All of it is read-only after startup: the validated projection settings,
/// the provider configuration, the category resolver policy, and one shared
/// HTTP client (reqwest pools connections internally).
#[derive(Clone)]
pub struct SharedState {
    pub solar_api: SolarApiConfig,
    pub settings: Arc<ProjectionSettings>,
    pub resolver: Arc<dyn TariffCategoryResolver>,
    pub http: Client,
}

impl SharedState {
    pub fn new(config: &Config, settings: ProjectionSettings) -> Self {
        Self {
            solar_api: config.solar_api.clone(),
            settings: Arc::new(settings),
            resolver: Arc::new(FixedCategoryResolver::new(
                config.solar_api.default_tariff_category,
            )),
            http: Client::new(),
        }
    }
}

/// Lets handlers that only read settings extract `State<Arc<ProjectionSettings>>`.
impl FromRef<SharedState> for Arc<ProjectionSettings> {
    fn from_ref(state: &SharedState) -> Self {
        state.settings.clone()
    }
}
