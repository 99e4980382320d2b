use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    Assumptions, MonthProjection, OperationalCosts, PeriodProjection, RevenueModel,
    ScenarioAdjustments, StartupCosts, SummaryMetrics, run_projection, summarize,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    product_development: Option<f64>,
    legal_and_licensing: Option<f64>,
    branding_and_design: Option<f64>,
    equipment_and_software: Option<f64>,
    office_deposit: Option<f64>,
    initial_marketing: Option<f64>,

    salaries: Option<f64>,
    rent_and_utilities: Option<f64>,
    marketing: Option<f64>,
    software_and_tools: Option<f64>,
    insurance: Option<f64>,
    other_expenses: Option<f64>,

    price_point: Option<f64>,
    customers_per_month: Option<f64>,
    cogs_per_customer: Option<f64>,
    monthly_growth_rate: Option<f64>,
    conversion_rate: Option<f64>,

    cost_reduction: Option<f64>,
    revenue_increase: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "runway",
    about = "Startup financial projection engine (break-even, runway, and what-if scenarios)"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 25000.0,
        help = "One-time product development cost"
    )]
    product_development: f64,
    #[arg(
        long,
        default_value_t = 5000.0,
        help = "One-time legal and licensing cost"
    )]
    legal_and_licensing: f64,
    #[arg(
        long,
        default_value_t = 8000.0,
        help = "One-time branding and design cost"
    )]
    branding_and_design: f64,
    #[arg(
        long,
        default_value_t = 7000.0,
        help = "One-time equipment and software cost"
    )]
    equipment_and_software: f64,
    #[arg(long, default_value_t = 3000.0, help = "One-time office deposit")]
    office_deposit: f64,
    #[arg(long, default_value_t = 2000.0, help = "One-time launch marketing budget")]
    initial_marketing: f64,
    #[arg(long, default_value_t = 2500.0, help = "Monthly salary spend")]
    salaries: f64,
    #[arg(long, default_value_t = 800.0, help = "Monthly rent and utilities")]
    rent_and_utilities: f64,
    #[arg(long, default_value_t = 600.0, help = "Monthly marketing spend")]
    marketing: f64,
    #[arg(
        long,
        default_value_t = 400.0,
        help = "Monthly software and tooling spend"
    )]
    software_and_tools: f64,
    #[arg(long, default_value_t = 200.0, help = "Monthly insurance cost")]
    insurance: f64,
    #[arg(long, default_value_t = 500.0, help = "Other monthly expenses")]
    other_expenses: f64,
    #[arg(long, default_value_t = 29.0, help = "Price per customer per month")]
    price_point: f64,
    #[arg(
        long,
        default_value_t = 100.0,
        help = "Customer count in the first month"
    )]
    customers_per_month: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Variable cost of serving one customer per month"
    )]
    cogs_per_customer: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Month-over-month customer growth in percent; capped at 20 during simulation"
    )]
    monthly_growth_rate: f64,
    #[arg(
        long,
        default_value_t = 2.5,
        help = "Visitor-to-customer conversion rate in percent (informational)"
    )]
    conversion_rate: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "What-if scenario: reduce monthly operational costs by this percent"
    )]
    cost_reduction: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "What-if scenario: increase revenue by this percent"
    )]
    revenue_increase: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    assumptions: Assumptions,
    summary: SummaryMetrics,
    months: Vec<MonthProjection>,
    periods: Vec<PeriodProjection>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_assumptions(cli: Cli) -> Result<Assumptions, String> {
    for (name, value) in [
        ("--product-development", cli.product_development),
        ("--legal-and-licensing", cli.legal_and_licensing),
        ("--branding-and-design", cli.branding_and_design),
        ("--equipment-and-software", cli.equipment_and_software),
        ("--office-deposit", cli.office_deposit),
        ("--initial-marketing", cli.initial_marketing),
        ("--salaries", cli.salaries),
        ("--rent-and-utilities", cli.rent_and_utilities),
        ("--marketing", cli.marketing),
        ("--software-and-tools", cli.software_and_tools),
        ("--insurance", cli.insurance),
        ("--other-expenses", cli.other_expenses),
        ("--price-point", cli.price_point),
        ("--customers-per-month", cli.customers_per_month),
        ("--cogs-per-customer", cli.cogs_per_customer),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be a finite value >= 0"));
        }
    }

    if !cli.monthly_growth_rate.is_finite() || cli.monthly_growth_rate < 0.0 {
        return Err("--monthly-growth-rate must be >= 0".to_string());
    }

    for (name, value) in [
        ("--conversion-rate", cli.conversion_rate),
        ("--cost-reduction", cli.cost_reduction),
        ("--revenue-increase", cli.revenue_increase),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(format!("{name} must be between 0 and 100"));
        }
    }

    Ok(Assumptions {
        startup_costs: StartupCosts {
            product_development: cli.product_development,
            legal_and_licensing: cli.legal_and_licensing,
            branding_and_design: cli.branding_and_design,
            equipment_and_software: cli.equipment_and_software,
            office_deposit: cli.office_deposit,
            initial_marketing: cli.initial_marketing,
        },
        operational_costs: OperationalCosts {
            salaries: cli.salaries,
            rent_and_utilities: cli.rent_and_utilities,
            marketing: cli.marketing,
            software_and_tools: cli.software_and_tools,
            insurance: cli.insurance,
            other_expenses: cli.other_expenses,
        },
        revenue_model: RevenueModel {
            price_point: cli.price_point,
            customers_per_month: cli.customers_per_month,
            cogs_per_customer: cli.cogs_per_customer,
            monthly_growth_rate: cli.monthly_growth_rate,
            conversion_rate: cli.conversion_rate,
        },
        scenarios: ScenarioAdjustments {
            cost_reduction: cli.cost_reduction,
            revenue_increase: cli.revenue_increase,
        },
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("runway HTTP API listening on http://{addr}");
    tracing::info!("local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn plan_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    plan_handler_impl(payload).await
}

async fn plan_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    plan_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let assumptions = match assumptions_from_payload(payload) {
        Ok(assumptions) => assumptions,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    json_response(StatusCode::OK, build_project_response(&assumptions))
}

async fn plan_handler_impl(payload: ProjectPayload) -> Response {
    let assumptions = match assumptions_from_payload(payload) {
        Ok(assumptions) => assumptions,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let mut response = json_response(StatusCode::OK, build_project_response(&assumptions));
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        "attachment; filename=\"financial-plan.json\""
            .parse()
            .expect("valid header"),
    );
    response
}

fn build_project_response(assumptions: &Assumptions) -> ProjectResponse {
    let projection = run_projection(assumptions);
    let summary = summarize(&projection, assumptions);
    ProjectResponse {
        assumptions: *assumptions,
        summary,
        months: projection.months,
        periods: projection.periods,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn assumptions_from_json(json: &str) -> Result<Assumptions, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    assumptions_from_payload(payload)
}

fn assumptions_from_payload(payload: ProjectPayload) -> Result<Assumptions, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.product_development {
        cli.product_development = v;
    }
    if let Some(v) = payload.legal_and_licensing {
        cli.legal_and_licensing = v;
    }
    if let Some(v) = payload.branding_and_design {
        cli.branding_and_design = v;
    }
    if let Some(v) = payload.equipment_and_software {
        cli.equipment_and_software = v;
    }
    if let Some(v) = payload.office_deposit {
        cli.office_deposit = v;
    }
    if let Some(v) = payload.initial_marketing {
        cli.initial_marketing = v;
    }

    if let Some(v) = payload.salaries {
        cli.salaries = v;
    }
    if let Some(v) = payload.rent_and_utilities {
        cli.rent_and_utilities = v;
    }
    if let Some(v) = payload.marketing {
        cli.marketing = v;
    }
    if let Some(v) = payload.software_and_tools {
        cli.software_and_tools = v;
    }
    if let Some(v) = payload.insurance {
        cli.insurance = v;
    }
    if let Some(v) = payload.other_expenses {
        cli.other_expenses = v;
    }

    if let Some(v) = payload.price_point {
        cli.price_point = v;
    }
    if let Some(v) = payload.customers_per_month {
        cli.customers_per_month = v;
    }
    if let Some(v) = payload.cogs_per_customer {
        cli.cogs_per_customer = v;
    }
    if let Some(v) = payload.monthly_growth_rate {
        cli.monthly_growth_rate = v;
    }
    if let Some(v) = payload.conversion_rate {
        cli.conversion_rate = v;
    }

    if let Some(v) = payload.cost_reduction {
        cli.cost_reduction = v;
    }
    if let Some(v) = payload.revenue_increase {
        cli.revenue_increase = v;
    }

    build_assumptions(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        product_development: 25_000.0,
        legal_and_licensing: 5_000.0,
        branding_and_design: 8_000.0,
        equipment_and_software: 7_000.0,
        office_deposit: 3_000.0,
        initial_marketing: 2_000.0,
        salaries: 2_500.0,
        rent_and_utilities: 800.0,
        marketing: 600.0,
        software_and_tools: 400.0,
        insurance: 200.0,
        other_expenses: 500.0,
        price_point: 29.0,
        customers_per_month: 100.0,
        cogs_per_customer: 5.0,
        monthly_growth_rate: 10.0,
        conversion_rate: 2.5,
        cost_reduction: 0.0,
        revenue_increase: 0.0,
    }
}
