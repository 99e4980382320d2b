use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupCosts {
    pub product_development: f64,
    pub legal_and_licensing: f64,
    pub branding_and_design: f64,
    pub equipment_and_software: f64,
    pub office_deposit: f64,
    pub initial_marketing: f64,
}

impl StartupCosts {
    pub fn total(self) -> f64 {
        self.product_development
            + self.legal_and_licensing
            + self.branding_and_design
            + self.equipment_and_software
            + self.office_deposit
            + self.initial_marketing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalCosts {
    pub salaries: f64,
    pub rent_and_utilities: f64,
    pub marketing: f64,
    pub software_and_tools: f64,
    pub insurance: f64,
    pub other_expenses: f64,
}

impl OperationalCosts {
    pub fn total(self) -> f64 {
        self.salaries
            + self.rent_and_utilities
            + self.marketing
            + self.software_and_tools
            + self.insurance
            + self.other_expenses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueModel {
    pub price_point: f64,
    pub customers_per_month: f64,
    pub cogs_per_customer: f64,
    pub monthly_growth_rate: f64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAdjustments {
    pub cost_reduction: f64,
    pub revenue_increase: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    pub startup_costs: StartupCosts,
    pub operational_costs: OperationalCosts,
    pub revenue_model: RevenueModel,
    pub scenarios: ScenarioAdjustments,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthProjection {
    pub month: u32,
    pub customers: f64,
    pub revenue: i64,
    pub cogs: i64,
    pub operational_costs: i64,
    pub gross_profit: i64,
    pub net_profit: i64,
    pub cumulative_revenue: i64,
    pub cumulative_net_profit: i64,
    pub cumulative_net_profit_after_startup: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodProjection {
    pub period: u32,
    pub start_month: u32,
    pub end_month: u32,
    pub customers: f64,
    pub revenue: i64,
    pub cogs: i64,
    pub operational_costs: i64,
    pub gross_profit: i64,
    pub net_profit: i64,
    pub cumulative_revenue: i64,
    pub cumulative_net_profit: i64,
    pub cumulative_net_profit_after_startup: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub months: Vec<MonthProjection>,
    pub periods: Vec<PeriodProjection>,
    pub break_even_month: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_startup_costs: i64,
    pub monthly_burn: i64,
    pub break_even_month: u32,
    pub runway: f64,
    pub total_revenue: i64,
    pub total_costs: i64,
    pub net_income: i64,
    pub profit_margin: i64,
    pub gross_margin_percentage: f64,
    pub net_margin_percentage: f64,
    pub projection_period: u32,
    pub total_periods: u32,
}
