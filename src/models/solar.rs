use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Google Solar API wire types ─────────────────────────────────────────────
// Typed mirror of the `buildingInsights:findClosest` payload, reduced to the
// subset this service consumes. Everything is optional on the wire; the
// forecast adapter decides which absences are fatal.

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildingInsightsResponse {
    /// Resource name of the matched building, e.g. `buildings/abc123`.
    pub name: Option<String>,
    pub solar_potential: Option<SolarPotential>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolarPotential {
    /// Panel configurations ordered by ascending panel count.
    #[serde(default)]
    pub solar_panel_configs: Vec<SolarPanelConfig>,
    /// Rated capacity of a single panel (W).
    pub panel_capacity_watts: Option<f64>,
    /// Grid carbon intensity offset by this roof (kg CO₂ per MWh produced).
    pub carbon_offset_factor_kg_per_mwh: Option<f64>,
    /// Maximum number of panels that fit the roof.
    pub max_array_panels_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolarPanelConfig {
    pub panels_count: Option<u32>,
    /// First-year DC yield of this configuration (kWh).
    pub yearly_energy_dc_kwh: Option<f64>,
}
