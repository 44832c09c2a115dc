use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::SolarApiConfig;
use crate::error::{SavingsError, SavingsResult};
use crate::models::savings::AnnualProduction;
use crate::models::solar::BuildingInsightsResponse;
use crate::services::category::TariffCategoryResolver;

/// Index of the reference entry in the provider's panel-configuration list.
///
/// The provider orders configurations by ascending panel count; entry 1 is
/// the first step above the minimum viable array and is what the projection
/// is quoted on. Identical input always selects the same configuration.
pub const REFERENCE_CONFIG_INDEX: usize = 1;

/// Fetch solar potential for a coordinate from the Google Solar API.
///
/// A provider 404 means the location has no coverage and maps to
/// [`SavingsError::OutOfCoverage`]; any other transport or decode failure
/// surfaces as [`SavingsError::SolarApi`].
pub async fn fetch_building_insights(
    client: &Client,
    cfg: &SolarApiConfig,
    latitude: f64,
    longitude: f64,
) -> SavingsResult<BuildingInsightsResponse> {
    let url = format!(
        "{}/buildingInsights:findClosest?location.latitude={}&location.longitude={}&key={}",
        cfg.base_url.trim_end_matches('/'),
        latitude,
        longitude,
        cfg.api_key,
    );

    debug!(latitude, longitude, "fetching building insights");
    let response = client.get(&url).send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(SavingsError::OutOfCoverage);
    }

    let insights = response
        .error_for_status()?
        .json::<BuildingInsightsResponse>()
        .await?;
    Ok(insights)
}

/// Normalize a provider payload into the fixed-shape [`AnnualProduction`]
/// record the projection engine consumes.
///
/// The tariff category comes from the injected resolver; the carbon offset
/// factor is optional on the wire and defaults to 0 when absent.
pub fn normalize(
    insights: &BuildingInsightsResponse,
    resolver: &dyn TariffCategoryResolver,
) -> SavingsResult<AnnualProduction> {
    let potential = insights
        .solar_potential
        .as_ref()
        .ok_or_else(|| SavingsError::MalformedForecast("missing solarPotential".into()))?;

    let reference = potential
        .solar_panel_configs
        .get(REFERENCE_CONFIG_INDEX)
        .ok_or_else(|| {
            SavingsError::MalformedForecast(format!(
                "expected at least {} panel configurations, got {}",
                REFERENCE_CONFIG_INDEX + 1,
                potential.solar_panel_configs.len(),
            ))
        })?;

    let yearly_energy_dc_kwh = reference.yearly_energy_dc_kwh.ok_or_else(|| {
        SavingsError::MalformedForecast("reference configuration missing yearlyEnergyDcKwh".into())
    })?;
    let panels_count = reference.panels_count.ok_or_else(|| {
        SavingsError::MalformedForecast("reference configuration missing panelsCount".into())
    })?;
    let panel_capacity_w = potential.panel_capacity_watts.ok_or_else(|| {
        SavingsError::MalformedForecast("missing panelCapacityWatts".into())
    })?;

    Ok(AnnualProduction {
        yearly_energy_dc_kwh,
        panels_count,
        panel_capacity_w,
        carbon_offset_factor_kg_per_mwh: potential
            .carbon_offset_factor_kg_per_mwh
            .unwrap_or(0.0),
        tariff_category: resolver.resolve(insights),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::savings::TariffCategory;
    use crate::services::category::FixedCategoryResolver;
    use serde_json::json;

    fn sample_payload() -> BuildingInsightsResponse {
        serde_json::from_value(json!({
            "name": "buildings/abc123",
            "solarPotential": {
                "panelCapacityWatts": 400.0,
                "carbonOffsetFactorKgPerMwh": 394.5,
                "maxArrayPanelsCount": 42,
                "solarPanelConfigs": [
                    { "panelsCount": 4, "yearlyEnergyDcKwh": 2123.2 },
                    { "panelsCount": 10, "yearlyEnergyDcKwh": 5004.8 },
                    { "panelsCount": 16, "yearlyEnergyDcKwh": 7640.1 }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_selects_the_reference_configuration() {
        let resolver = FixedCategoryResolver::new(TariffCategory::T1G1);
        let production = normalize(&sample_payload(), &resolver).unwrap();

        // Index 1, not the smallest or the largest entry.
        assert_eq!(production.panels_count, 10);
        assert_eq!(production.yearly_energy_dc_kwh, 5004.8);
        assert_eq!(production.panel_capacity_w, 400.0);
        assert_eq!(production.carbon_offset_factor_kg_per_mwh, 394.5);
        assert_eq!(production.tariff_category, TariffCategory::T1G1);
    }

    #[test]
    fn test_missing_solar_potential_is_malformed() {
        let resolver = FixedCategoryResolver::new(TariffCategory::T1G1);
        let payload: BuildingInsightsResponse =
            serde_json::from_value(json!({ "name": "buildings/abc123" })).unwrap();
        assert!(matches!(
            normalize(&payload, &resolver),
            Err(SavingsError::MalformedForecast(_))
        ));
    }

    #[test]
    fn test_too_few_configurations_is_malformed() {
        let resolver = FixedCategoryResolver::new(TariffCategory::T1G1);
        let payload: BuildingInsightsResponse = serde_json::from_value(json!({
            "solarPotential": {
                "panelCapacityWatts": 400.0,
                "solarPanelConfigs": [
                    { "panelsCount": 4, "yearlyEnergyDcKwh": 2123.2 }
                ]
            }
        }))
        .unwrap();
        assert!(matches!(
            normalize(&payload, &resolver),
            Err(SavingsError::MalformedForecast(_))
        ));
    }

    #[test]
    fn test_missing_capacity_is_malformed() {
        let resolver = FixedCategoryResolver::new(TariffCategory::T1G1);
        let payload: BuildingInsightsResponse = serde_json::from_value(json!({
            "solarPotential": {
                "solarPanelConfigs": [
                    { "panelsCount": 4, "yearlyEnergyDcKwh": 2123.2 },
                    { "panelsCount": 10, "yearlyEnergyDcKwh": 5004.8 }
                ]
            }
        }))
        .unwrap();
        assert!(matches!(
            normalize(&payload, &resolver),
            Err(SavingsError::MalformedForecast(_))
        ));
    }

    #[test]
    fn test_missing_carbon_factor_defaults_to_zero() {
        let resolver = FixedCategoryResolver::new(TariffCategory::T1G1);
        let payload: BuildingInsightsResponse = serde_json::from_value(json!({
            "solarPotential": {
                "panelCapacityWatts": 400.0,
                "solarPanelConfigs": [
                    { "panelsCount": 4, "yearlyEnergyDcKwh": 2123.2 },
                    { "panelsCount": 10, "yearlyEnergyDcKwh": 5004.8 }
                ]
            }
        }))
        .unwrap();
        let production = normalize(&payload, &resolver).unwrap();
        assert_eq!(production.carbon_offset_factor_kg_per_mwh, 0.0);
    }
}
