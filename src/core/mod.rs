mod engine;
mod summary;
mod types;

pub use engine::{MAX_PROJECTION_MONTHS, MONTHS_PER_PERIOD, run_projection};
pub use summary::summarize;
pub use types::{
    Assumptions, MonthProjection, OperationalCosts, PeriodProjection, Projection, RevenueModel,
    ScenarioAdjustments, StartupCosts, SummaryMetrics,
};
