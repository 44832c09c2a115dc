/// ============================================================
///  Savings Projection Engine
///
///  Pipeline, per year y = 1..=horizon:
///   1. Degraded production – forecast baseline × installation
///                            efficiency × (1 − degradation)^(y−1)
///   2. Energy split        – self-consumption share, clamped by the
///                            user's annual demand; injection share
///                            exported to the grid
///   3. Tariff valuation    – consumption + injection charges in local
///                            currency, rates escalated year-over-year
///                            by the inflation rate
///   4. Convert & discount  – local → USD at the configured exchange
///                            rate, then present-valued at the
///                            discount rate
///   5. Totals              – cumulative discounted savings, one-time
///                            investment, payback-year detection
///
///  Pure function of its inputs: no I/O, no shared state, identical
///  output for identical input. All arithmetic is f64 end to end with
///  no intermediate rounding.
/// ============================================================
use crate::error::{SavingsError, SavingsResult};
use crate::models::savings::{
    AnnualProduction, EconomicParameters, InvestmentAndCosts, SavingsReport,
    SystemCharacteristics, TariffRow, YearlyProjection,
};

/// Project the financial return of a solar installation over `horizon_years`.
///
/// The split ratios are policy constants, not re-derived from the demand
/// cap: the only reconciliation against actual consumption is the single
/// clamp on the self-consumed share.
pub fn project(
    annual_consumption_kwh: f64,
    production: &AnnualProduction,
    characteristics: &SystemCharacteristics,
    economics: &EconomicParameters,
    tariffs: &[TariffRow],
    investment: &InvestmentAndCosts,
    horizon_years: u32,
) -> SavingsResult<SavingsReport> {
    if horizon_years == 0 {
        return Err(SavingsError::InvalidParameter(
            "horizon must be at least one year".into(),
        ));
    }
    if !annual_consumption_kwh.is_finite() || annual_consumption_kwh < 0.0 {
        return Err(SavingsError::InvalidParameter(format!(
            "annual consumption must be a finite value >= 0, got {annual_consumption_kwh}"
        )));
    }
    if !economics.discount_rate_usd.is_finite() || economics.discount_rate_usd <= -1.0 {
        return Err(SavingsError::InvalidParameter(format!(
            "discount rate must stay above -100%, got {}",
            economics.discount_rate_usd
        )));
    }

    // One row must match the site's category; a missing row aborts the whole
    // projection rather than defaulting.
    let tariff = tariffs
        .iter()
        .find(|row| row.name == production.tariff_category)
        .ok_or(SavingsError::TariffNotFound(production.tariff_category))?;

    let baseline_kwh = production.yearly_energy_dc_kwh * characteristics.installation_efficiency;
    let total_investment_usd = investment.cost_usd_per_wp
        * production.panel_capacity_w
        * production.panels_count as f64
        + investment.metering_equipment_usd
        + investment.initial_maintenance_usd;

    let mut yearly = Vec::with_capacity(horizon_years as usize);
    let mut cumulative_discounted_usd = 0.0;
    let mut total_produced_kwh = 0.0;
    let mut payback_year = None;

    for year in 1..=horizon_years {
        let age = (year - 1) as i32;

        // 1. Degradation compounds annually from the forecast baseline.
        let produced_kwh =
            baseline_kwh * (1.0 - characteristics.annual_panel_degradation).powi(age);

        // 2. Self-consumption cannot exceed what the site actually uses.
        let self_consumed_kwh =
            (produced_kwh * characteristics.self_consumption_ratio()).min(annual_consumption_kwh);
        let injected_kwh = produced_kwh * characteristics.injection_ratio();

        // 3. Escalate the tariff rates themselves, compounding from year 1.
        let escalation = (1.0 + economics.annual_inflation_usd).powi(age);
        let consumption_charge = tariff.variable_consumption_charge_local_per_kwh * escalation;
        let injection_charge = tariff.variable_injection_charge_local_per_kwh * escalation;
        let gross_savings_local =
            self_consumed_kwh * consumption_charge + injected_kwh * injection_charge;

        // 4. Convert to the reporting currency, then present-value.
        let gross_savings_usd = gross_savings_local / economics.exchange_rate_local_per_usd;
        let discounted_savings_usd =
            gross_savings_usd / (1.0 + economics.discount_rate_usd).powi(age);

        // 5. Running totals.
        cumulative_discounted_usd += discounted_savings_usd;
        total_produced_kwh += produced_kwh;
        if payback_year.is_none() && cumulative_discounted_usd >= total_investment_usd {
            payback_year = Some(year);
        }

        yearly.push(YearlyProjection {
            year,
            produced_kwh,
            self_consumed_kwh,
            injected_kwh,
            gross_savings_local,
            discounted_savings_usd,
        });
    }

    Ok(SavingsReport {
        yearly,
        total_investment_usd,
        cumulative_discounted_savings_usd: cumulative_discounted_usd,
        payback_year,
        total_carbon_offset_kg: total_produced_kwh / 1000.0
            * production.carbon_offset_factor_kg_per_mwh,
    })
}
