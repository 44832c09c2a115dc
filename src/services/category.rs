use crate::models::savings::TariffCategory;
use crate::models::solar::BuildingInsightsResponse;

/// Assigns the billing bucket for a site, given its solar-potential data.
///
/// Category selection is a pluggable capability: the shipped implementation
/// is a fixed assignment, but a rule-based resolver (by installed capacity,
/// voltage level, municipality, …) can be swapped in without touching the
/// projection engine's contract.
pub trait TariffCategoryResolver: Send + Sync {
    fn resolve(&self, insights: &BuildingInsightsResponse) -> TariffCategory;
}

/// Bills every site under one configured category.
///
/// This is a deliberate simplification: residential rooftop installations
/// overwhelmingly fall in a single residential bucket, so the category is
/// taken from `config.json` rather than classified per site.
pub struct FixedCategoryResolver {
    category: TariffCategory,
}

impl FixedCategoryResolver {
    pub fn new(category: TariffCategory) -> Self {
        Self { category }
    }
}

impl TariffCategoryResolver for FixedCategoryResolver {
    fn resolve(&self, _insights: &BuildingInsightsResponse) -> TariffCategory {
        self.category
    }
}
