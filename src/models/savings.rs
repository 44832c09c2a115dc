use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{SavingsError, SavingsResult};

// ─── Tariff schedule ─────────────────────────────────────────────────────────

/// Billing bucket a site falls into. Matches the distributor's published
/// tariff schedule; the fixed set below covers residential (T1-G*) and
/// commercial/industrial (T2, T3) supply contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TariffCategory {
    #[serde(rename = "T1-G1")]
    T1G1,
    #[serde(rename = "T1-G2")]
    T1G2,
    #[serde(rename = "T1-G3")]
    T1G3,
    #[serde(rename = "T2")]
    T2,
    #[serde(rename = "T3")]
    T3,
}

impl fmt::Display for TariffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TariffCategory::T1G1 => "T1-G1",
            TariffCategory::T1G2 => "T1-G2",
            TariffCategory::T1G3 => "T1-G3",
            TariffCategory::T2 => "T2",
            TariffCategory::T3 => "T3",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoltageLevel {
    Low,
    Medium,
    High,
}

/// One row of the distributor's tariff schedule. Charges are in local
/// currency per kWh; the injection charge is what the grid pays for
/// exported energy, typically below the consumption charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TariffRow {
    pub name: TariffCategory,
    pub variable_consumption_charge_local_per_kwh: f64,
    pub variable_injection_charge_local_per_kwh: f64,
    pub voltage_level: VoltageLevel,
}

// ─── Forecast record ─────────────────────────────────────────────────────────

/// Normalized first-year production forecast for one site, as produced by
/// the forecast adapter. Immutable for the lifetime of a projection run.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnnualProduction {
    /// Forecast first-year DC energy yield (kWh).
    pub yearly_energy_dc_kwh: f64,
    pub panels_count: u32,
    /// Rated capacity of a single panel (W).
    pub panel_capacity_w: f64,
    /// kg CO₂ offset per MWh produced at this site.
    pub carbon_offset_factor_kg_per_mwh: f64,
    /// Billing bucket assigned at forecast time.
    pub tariff_category: TariffCategory,
}

// ─── System characteristics ──────────────────────────────────────────────────

/// Installation-wide efficiency and energy-split constants.
///
/// The injection ratio is always `1 − self_consumption_ratio`; it is derived
/// in [`SystemCharacteristics::new`] and never supplied independently, so the
/// two ratios sum to 1 by construction.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SystemCharacteristics {
    /// Constant multiplicative loss of the installation, in [0, 1].
    pub installation_efficiency: f64,
    /// Annual decline of panel output relative to the forecast baseline, in [0, 1].
    pub annual_panel_degradation: f64,
    self_consumption_ratio: f64,
    injection_ratio: f64,
}

impl SystemCharacteristics {
    pub fn new(
        installation_efficiency: f64,
        annual_panel_degradation: f64,
        self_consumption_ratio: f64,
    ) -> SavingsResult<Self> {
        for (name, value) in [
            ("installation_efficiency", installation_efficiency),
            ("annual_panel_degradation", annual_panel_degradation),
            ("self_consumption_ratio", self_consumption_ratio),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SavingsError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(Self {
            installation_efficiency,
            annual_panel_degradation,
            self_consumption_ratio,
            injection_ratio: 1.0 - self_consumption_ratio,
        })
    }

    /// Fraction of produced energy consumed on site.
    pub fn self_consumption_ratio(&self) -> f64 {
        self.self_consumption_ratio
    }

    /// Fraction of produced energy exported to the grid.
    pub fn injection_ratio(&self) -> f64 {
        self.injection_ratio
    }
}

// ─── Economic parameters ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EconomicParameters {
    /// Local currency units per USD, > 0.
    pub exchange_rate_local_per_usd: f64,
    /// Year-over-year escalation applied to tariff rates. May be negative.
    pub annual_inflation_usd: f64,
    /// Rate used to present-value future flows. Must stay above −1.
    pub discount_rate_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InvestmentAndCosts {
    /// Turn-key system cost per installed watt-peak (USD/Wp).
    pub cost_usd_per_wp: f64,
    /// Bidirectional metering equipment (USD, one-time).
    pub metering_equipment_usd: f64,
    /// Initial maintenance provision (USD, one-time).
    pub initial_maintenance_usd: f64,
}

// ─── Projection output ───────────────────────────────────────────────────────

/// One year of the financial projection. Produced only by the engine and
/// immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct YearlyProjection {
    /// 1-indexed projection year.
    pub year: u32,
    pub produced_kwh: f64,
    pub self_consumed_kwh: f64,
    pub injected_kwh: f64,
    /// Savings for the year in local currency, at that year's escalated rates.
    pub gross_savings_local: f64,
    /// Present value of the year's savings (USD).
    pub discounted_savings_usd: f64,
}

/// The engine's sole output: the ordered yearly sequence plus cumulative
/// totals.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SavingsReport {
    pub yearly: Vec<YearlyProjection>,
    /// One-time year-0 outflow (USD).
    pub total_investment_usd: f64,
    pub cumulative_discounted_savings_usd: f64,
    /// First year where cumulative discounted savings cover the investment;
    /// `null` when not reached within the horizon.
    pub payback_year: Option<u32>,
    /// Lifetime CO₂ avoided over the horizon (kg).
    pub total_carbon_offset_kg: f64,
}

// ─── REST API request/response types ─────────────────────────────────────────

/// A building-footprint vertex as received from the client. Values arrive as
/// arbitrary JSON (frontends send both numbers and numeric strings); the
/// centroid computation parses them leniently.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RawCoordinate {
    #[schema(value_type = Object)]
    pub lat: serde_json::Value,
    #[schema(value_type = Object)]
    pub lng: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SavingsCalculationRequest {
    /// Building footprint vertices; reduced to a representative point.
    pub coordinates: Vec<RawCoordinate>,
    /// The user's historical annual consumption (kWh).
    pub annual_consumption_kwh: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavingsReportResponse {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Representative point the forecast was resolved for.
    pub site: Coordinate,
    pub production: AnnualProduction,
    pub report: SavingsReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_sum_to_one_by_construction() {
        let chars = SystemCharacteristics::new(0.9, 0.005, 0.6).unwrap();
        assert_eq!(chars.self_consumption_ratio() + chars.injection_ratio(), 1.0);

        let chars = SystemCharacteristics::new(1.0, 0.0, 0.0).unwrap();
        assert_eq!(chars.injection_ratio(), 1.0);
    }

    #[test]
    fn test_out_of_range_characteristics_rejected() {
        assert!(SystemCharacteristics::new(1.2, 0.005, 0.6).is_err());
        assert!(SystemCharacteristics::new(0.9, -0.1, 0.6).is_err());
        assert!(SystemCharacteristics::new(0.9, 0.005, 1.5).is_err());
        assert!(SystemCharacteristics::new(0.9, f64::NAN, 0.6).is_err());
    }

    #[test]
    fn test_tariff_category_wire_names() {
        let json = serde_json::to_string(&TariffCategory::T1G1).unwrap();
        assert_eq!(json, "\"T1-G1\"");
        let back: TariffCategory = serde_json::from_str("\"T2\"").unwrap();
        assert_eq!(back, TariffCategory::T2);
        assert_eq!(TariffCategory::T1G3.to_string(), "T1-G3");
    }
}
