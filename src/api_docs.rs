use utoipa::OpenApi;

use crate::config;
use crate::controllers::savings_controller;
use crate::models::{savings, solar};

#[derive(OpenApi)]
#[openapi(
    paths(
        savings_controller::calculate_savings,
        savings_controller::get_solar_potential,
        savings_controller::get_projection_settings
    ),
    components(
        schemas(
            savings::SavingsCalculationRequest,
            savings::SavingsReportResponse,
            savings::SavingsReport,
            savings::YearlyProjection,
            savings::AnnualProduction,
            savings::RawCoordinate,
            savings::Coordinate,
            savings::TariffRow,
            savings::TariffCategory,
            savings::VoltageLevel,
            savings::SystemCharacteristics,
            savings::EconomicParameters,
            savings::InvestmentAndCosts,
            solar::BuildingInsightsResponse,
            solar::SolarPotential,
            solar::SolarPanelConfig,
            config::ProjectionSettings
        )
    ),
    tags(
        (name = "solar-savings-api", description = "Solar savings projection API")
    )
)]
pub struct ApiDoc;
