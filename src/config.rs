use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{SavingsError, SavingsResult};
use crate::models::savings::{
    EconomicParameters, InvestmentAndCosts, SystemCharacteristics, TariffCategory, TariffRow,
};

fn default_solar_api_base() -> String {
    "https://solar.googleapis.com/v1".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub solar_api: SolarApiConfig,
    pub projection: ProjectionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SolarApiConfig {
    #[serde(default = "default_solar_api_base")]
    pub base_url: String,
    pub api_key: String,
    /// Category every site is billed under until a classifying resolver
    /// replaces the fixed one.
    pub default_tariff_category: TariffCategory,
}

/// Raw projection section of `config.json`, as written on disk.
/// Validated exactly once at startup into [`ProjectionSettings`].
#[derive(Debug, Deserialize, Clone)]
pub struct ProjectionConfig {
    pub horizon_years: u32,
    pub characteristics: CharacteristicsConfig,
    pub economics: EconomicParameters,
    pub investment: InvestmentAndCosts,
    pub tariffs: Vec<TariffRow>,
}

/// The injection ratio is intentionally absent here: it is derived from the
/// self-consumption ratio during validation, never supplied.
#[derive(Debug, Deserialize, Clone)]
pub struct CharacteristicsConfig {
    pub installation_efficiency: f64,
    pub annual_panel_degradation: f64,
    pub self_consumption_ratio: f64,
}

/// Validated, strongly-typed projection inputs. Built once, shared read-only
/// with every request; nothing in here is re-parsed per call.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectionSettings {
    pub horizon_years: u32,
    pub characteristics: SystemCharacteristics,
    pub economics: EconomicParameters,
    pub investment: InvestmentAndCosts,
    pub tariffs: Vec<TariffRow>,
}

impl Config {
    pub fn load(path: &str) -> SavingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SavingsError::Config(format!("cannot read {path}: {e}")))?;
        serde_json::from_str(&content)
            .map_err(|e| SavingsError::Config(format!("cannot parse {path}: {e}")))
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> SavingsResult<ProjectionSettings> {
        if self.horizon_years == 0 {
            return Err(SavingsError::Config(
                "horizon_years must be at least 1".into(),
            ));
        }

        let characteristics = SystemCharacteristics::new(
            self.characteristics.installation_efficiency,
            self.characteristics.annual_panel_degradation,
            self.characteristics.self_consumption_ratio,
        )?;

        let econ = &self.economics;
        if !econ.exchange_rate_local_per_usd.is_finite() || econ.exchange_rate_local_per_usd <= 0.0
        {
            return Err(SavingsError::Config(format!(
                "exchange_rate_local_per_usd must be > 0, got {}",
                econ.exchange_rate_local_per_usd
            )));
        }
        if !econ.annual_inflation_usd.is_finite() {
            return Err(SavingsError::Config(
                "annual_inflation_usd must be finite".into(),
            ));
        }
        if !econ.discount_rate_usd.is_finite() || econ.discount_rate_usd <= -1.0 {
            return Err(SavingsError::Config(format!(
                "discount_rate_usd must stay above -1, got {}",
                econ.discount_rate_usd
            )));
        }

        for (name, value) in [
            ("cost_usd_per_wp", self.investment.cost_usd_per_wp),
            (
                "metering_equipment_usd",
                self.investment.metering_equipment_usd,
            ),
            (
                "initial_maintenance_usd",
                self.investment.initial_maintenance_usd,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SavingsError::Config(format!(
                    "{name} must be >= 0, got {value}"
                )));
            }
        }

        if self.tariffs.is_empty() {
            return Err(SavingsError::Config("tariff schedule is empty".into()));
        }
        for row in &self.tariffs {
            for (name, value) in [
                (
                    "variable_consumption_charge_local_per_kwh",
                    row.variable_consumption_charge_local_per_kwh,
                ),
                (
                    "variable_injection_charge_local_per_kwh",
                    row.variable_injection_charge_local_per_kwh,
                ),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(SavingsError::Config(format!(
                        "tariff {}: {name} must be >= 0, got {value}",
                        row.name
                    )));
                }
            }
            // The engine relies on exactly one row per category.
            if self.tariffs.iter().filter(|r| r.name == row.name).count() > 1 {
                return Err(SavingsError::Config(format!(
                    "duplicate tariff row for category {}",
                    row.name
                )));
            }
        }

        Ok(ProjectionSettings {
            horizon_years: self.horizon_years,
            characteristics,
            economics: self.economics.clone(),
            investment: self.investment.clone(),
            tariffs: self.tariffs.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectionConfig {
        serde_json::from_value(serde_json::json!({
            "horizon_years": 25,
            "characteristics": {
                "installation_efficiency": 0.9,
                "annual_panel_degradation": 0.005,
                "self_consumption_ratio": 0.6
            },
            "economics": {
                "exchange_rate_local_per_usd": 1000.0,
                "annual_inflation_usd": 0.05,
                "discount_rate_usd": 0.08
            },
            "investment": {
                "cost_usd_per_wp": 0.85,
                "metering_equipment_usd": 450.0,
                "initial_maintenance_usd": 120.0
            },
            "tariffs": [
                {
                    "name": "T1-G1",
                    "variable_consumption_charge_local_per_kwh": 93.5,
                    "variable_injection_charge_local_per_kwh": 41.2,
                    "voltage_level": "low"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_config_produces_settings() {
        let settings = sample().validate().unwrap();
        assert_eq!(settings.horizon_years, 25);
        assert!((settings.characteristics.injection_ratio() - 0.4).abs() < 1e-12);
        assert_eq!(settings.tariffs.len(), 1);
    }

    #[test]
    fn test_bad_ratio_rejected() {
        let mut cfg = sample();
        cfg.characteristics.self_consumption_ratio = 1.4;
        assert!(matches!(cfg.validate(), Err(SavingsError::Config(_))));
    }

    #[test]
    fn test_nonpositive_exchange_rate_rejected() {
        let mut cfg = sample();
        cfg.economics.exchange_rate_local_per_usd = 0.0;
        assert!(matches!(cfg.validate(), Err(SavingsError::Config(_))));
    }

    #[test]
    fn test_duplicate_tariff_category_rejected() {
        let mut cfg = sample();
        cfg.tariffs.push(cfg.tariffs[0].clone());
        assert!(matches!(cfg.validate(), Err(SavingsError::Config(_))));
    }

    #[test]
    fn test_empty_tariff_schedule_rejected() {
        let mut cfg = sample();
        cfg.tariffs.clear();
        assert!(matches!(cfg.validate(), Err(SavingsError::Config(_))));
    }
}
