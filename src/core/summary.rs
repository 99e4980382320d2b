use super::engine::{MONTHS_PER_PERIOD, round_currency, sanitize_assumptions};
use super::types::{Assumptions, Projection, SummaryMetrics};

// Totals are computed over the emitted integer series so they agree exactly
// with the month table; the margin percentages are month-1 run-rate figures.
pub fn summarize(projection: &Projection, assumptions: &Assumptions) -> SummaryMetrics {
    let clean = sanitize_assumptions(assumptions);

    let raw_startup = clean.startup_costs.total();
    let total_startup_costs = round_currency(raw_startup);

    let raw_burn = clean.operational_costs.total() * (1.0 - clean.scenarios.cost_reduction / 100.0);
    let monthly_burn = round_currency(raw_burn);
    let runway = if monthly_burn <= 0 {
        0.0
    } else {
        round_1dp(raw_startup / raw_burn)
    };

    let months = &projection.months;
    let total_revenue = months.last().map_or(0, |m| m.cumulative_revenue);
    let total_costs = months
        .iter()
        .map(|m| m.cogs + m.operational_costs)
        .sum::<i64>();
    let net_income = total_revenue - total_costs;
    let profit_margin = if total_revenue == 0 {
        0
    } else {
        (net_income as f64 / total_revenue as f64 * 100.0).round() as i64
    };

    let (gross_margin_percentage, net_margin_percentage) = match months.first() {
        Some(first) if first.revenue != 0 => (
            round_2dp(first.gross_profit as f64 / first.revenue as f64 * 100.0),
            round_2dp(first.net_profit as f64 / first.revenue as f64 * 100.0),
        ),
        _ => (0.0, 0.0),
    };

    let projection_period = months.len() as u32;
    let total_periods = projection_period.div_ceil(MONTHS_PER_PERIOD as u32);

    SummaryMetrics {
        total_startup_costs,
        monthly_burn,
        break_even_month: projection.break_even_month,
        runway,
        total_revenue,
        total_costs,
        net_income,
        profit_margin,
        gross_margin_percentage,
        net_margin_percentage,
        projection_period,
        total_periods,
    }
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
