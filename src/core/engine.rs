use tracing::warn;

use super::types::{Assumptions, MonthProjection, PeriodProjection, Projection};

pub const MAX_PROJECTION_MONTHS: usize = 60;
pub const MONTHS_PER_PERIOD: usize = 6;

const NO_STARTUP_DEFAULT_MONTHS: usize = 12;
const GROWTH_RATE_CAP_PCT: f64 = 20.0;
const SATURATION_KNEE: f64 = 10_000.0;
const EARLY_SATURATION_SCALE: f64 = 15_000.0;
const LATE_SATURATION_SCALE: f64 = 20_000.0;
const EARLY_SATURATION_FLOOR: f64 = 0.3;
const LATE_SATURATION_FLOOR: f64 = 0.05;

#[derive(Debug, Clone, Copy)]
struct RawMonth {
    customers: f64,
    revenue: f64,
    cogs: f64,
    operational_costs: f64,
    gross_profit: f64,
    net_profit: f64,
    cumulative_revenue: f64,
    cumulative_net_profit: f64,
}

pub fn run_projection(assumptions: &Assumptions) -> Projection {
    let clean = sanitize_assumptions(assumptions);
    let total_startup = clean.startup_costs.total();

    let raw = simulate_months(&clean, MAX_PROJECTION_MONTHS);
    let break_even_month = find_break_even(&raw, total_startup);
    let horizon = match break_even_month {
        0 if total_startup <= 0.0 => NO_STARTUP_DEFAULT_MONTHS,
        0 => MAX_PROJECTION_MONTHS,
        found => found as usize,
    };

    let months = emit_months(&raw[..horizon], total_startup);
    let periods = aggregate_periods(&months);

    Projection {
        months,
        periods,
        break_even_month,
    }
}

fn simulate_months(assumptions: &Assumptions, horizon: usize) -> Vec<RawMonth> {
    let model = assumptions.revenue_model;
    let revenue_multiplier = 1.0 + assumptions.scenarios.revenue_increase / 100.0;
    let cost_multiplier = 1.0 - assumptions.scenarios.cost_reduction / 100.0;
    let operational_costs = assumptions.operational_costs.total() * cost_multiplier;

    let mut months = Vec::with_capacity(horizon);
    let mut customers = model.customers_per_month;
    let mut cumulative_revenue = 0.0;
    let mut cumulative_net_profit = 0.0;

    for month in 1..=horizon {
        // Month 1 bills the starting customer base; growth applies on entry to
        // every later month.
        if month > 1 {
            customers = grow_customers(customers, model.monthly_growth_rate);
        }

        let revenue = customers * model.price_point * revenue_multiplier;
        let cogs = customers * model.cogs_per_customer;
        let gross_profit = revenue - cogs;
        let net_profit = gross_profit - operational_costs;
        cumulative_revenue += revenue;
        cumulative_net_profit += net_profit;

        months.push(RawMonth {
            customers,
            revenue,
            cogs,
            operational_costs,
            gross_profit,
            net_profit,
            cumulative_revenue,
            cumulative_net_profit,
        });
    }

    months
}

fn grow_customers(customers: f64, growth_rate_pct: f64) -> f64 {
    let base_rate = growth_rate_pct.min(GROWTH_RATE_CAP_PCT) / 100.0;
    let grown = customers * (1.0 + base_rate * saturation_factor(customers));
    if !grown.is_finite() || grown < 0.0 {
        warn!(
            customers,
            grown, "growth step produced an invalid customer count; keeping previous value"
        );
        return customers;
    }
    grown
}

fn saturation_factor(customers: f64) -> f64 {
    if customers < SATURATION_KNEE {
        (1.0 - customers / EARLY_SATURATION_SCALE).max(EARLY_SATURATION_FLOOR)
    } else {
        let decayed =
            EARLY_SATURATION_FLOOR * (-(customers - SATURATION_KNEE) / LATE_SATURATION_SCALE).exp();
        decayed.max(LATE_SATURATION_FLOOR)
    }
}

fn find_break_even(months: &[RawMonth], total_startup: f64) -> u32 {
    months
        .iter()
        .position(|month| month.cumulative_net_profit >= total_startup)
        .map(|index| index as u32 + 1)
        .unwrap_or(0)
}

fn emit_months(raw: &[RawMonth], total_startup: f64) -> Vec<MonthProjection> {
    raw.iter()
        .enumerate()
        .map(|(index, month)| MonthProjection {
            month: index as u32 + 1,
            customers: month.customers,
            revenue: round_currency(month.revenue),
            cogs: round_currency(month.cogs),
            operational_costs: round_currency(month.operational_costs),
            gross_profit: round_currency(month.gross_profit),
            net_profit: round_currency(month.net_profit),
            cumulative_revenue: round_currency(month.cumulative_revenue),
            cumulative_net_profit: round_currency(month.cumulative_net_profit),
            cumulative_net_profit_after_startup: round_currency(
                month.cumulative_net_profit - total_startup,
            ),
        })
        .collect()
}

fn aggregate_periods(months: &[MonthProjection]) -> Vec<PeriodProjection> {
    months
        .chunks(MONTHS_PER_PERIOD)
        .enumerate()
        .map(|(index, chunk)| {
            let last = chunk[chunk.len() - 1];
            PeriodProjection {
                period: index as u32 + 1,
                start_month: chunk[0].month,
                end_month: last.month,
                customers: chunk.iter().map(|m| m.customers).sum::<f64>() / chunk.len() as f64,
                revenue: chunk.iter().map(|m| m.revenue).sum(),
                cogs: chunk.iter().map(|m| m.cogs).sum(),
                operational_costs: chunk.iter().map(|m| m.operational_costs).sum(),
                gross_profit: chunk.iter().map(|m| m.gross_profit).sum(),
                net_profit: chunk.iter().map(|m| m.net_profit).sum(),
                cumulative_revenue: last.cumulative_revenue,
                cumulative_net_profit: last.cumulative_net_profit,
                cumulative_net_profit_after_startup: last.cumulative_net_profit_after_startup,
            }
        })
        .collect()
}

pub(crate) fn round_currency(value: f64) -> i64 {
    if !value.is_finite() {
        warn!(value, "rounding non-finite currency value to 0");
        return 0;
    }
    value.round() as i64
}

// Invalid numbers are clamped rather than rejected; rejection belongs to the
// API/CLI boundary.
pub(crate) fn sanitize_assumptions(assumptions: &Assumptions) -> Assumptions {
    let mut clean = *assumptions;
    let amounts: [(&str, &mut f64); 15] = [
        (
            "startupCosts.productDevelopment",
            &mut clean.startup_costs.product_development,
        ),
        (
            "startupCosts.legalAndLicensing",
            &mut clean.startup_costs.legal_and_licensing,
        ),
        (
            "startupCosts.brandingAndDesign",
            &mut clean.startup_costs.branding_and_design,
        ),
        (
            "startupCosts.equipmentAndSoftware",
            &mut clean.startup_costs.equipment_and_software,
        ),
        (
            "startupCosts.officeDeposit",
            &mut clean.startup_costs.office_deposit,
        ),
        (
            "startupCosts.initialMarketing",
            &mut clean.startup_costs.initial_marketing,
        ),
        (
            "operationalCosts.salaries",
            &mut clean.operational_costs.salaries,
        ),
        (
            "operationalCosts.rentAndUtilities",
            &mut clean.operational_costs.rent_and_utilities,
        ),
        (
            "operationalCosts.marketing",
            &mut clean.operational_costs.marketing,
        ),
        (
            "operationalCosts.softwareAndTools",
            &mut clean.operational_costs.software_and_tools,
        ),
        (
            "operationalCosts.insurance",
            &mut clean.operational_costs.insurance,
        ),
        (
            "operationalCosts.otherExpenses",
            &mut clean.operational_costs.other_expenses,
        ),
        (
            "revenueModel.pricePoint",
            &mut clean.revenue_model.price_point,
        ),
        (
            "revenueModel.customersPerMonth",
            &mut clean.revenue_model.customers_per_month,
        ),
        (
            "revenueModel.cogsPerCustomer",
            &mut clean.revenue_model.cogs_per_customer,
        ),
    ];
    for (field, value) in amounts {
        if !value.is_finite() || *value < 0.0 {
            warn!(field, value = *value, "clamping invalid assumption to 0");
            *value = 0.0;
        }
    }

    if !clean.revenue_model.monthly_growth_rate.is_finite()
        || clean.revenue_model.monthly_growth_rate < 0.0
    {
        warn!(
            value = clean.revenue_model.monthly_growth_rate,
            "clamping invalid monthly growth rate to 0"
        );
        clean.revenue_model.monthly_growth_rate = 0.0;
    }

    clean.revenue_model.conversion_rate =
        clamp_percent(clean.revenue_model.conversion_rate, "conversionRate");
    clean.scenarios.cost_reduction =
        clamp_percent(clean.scenarios.cost_reduction, "scenarios.costReduction");
    clean.scenarios.revenue_increase =
        clamp_percent(clean.scenarios.revenue_increase, "scenarios.revenueIncrease");

    clean
}

fn clamp_percent(value: f64, field: &'static str) -> f64 {
    if !value.is_finite() {
        warn!(field, value, "clamping non-finite percentage to 0");
        return 0.0;
    }
    if !(0.0..=100.0).contains(&value) {
        warn!(field, value, "clamping percentage into 0..=100");
        return value.clamp(0.0, 100.0);
    }
    value
}
