//! Profitability reporting handlers

use axum::{extract::{Query, State}, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::auth::{require_admin, Caller};
use crate::db::{self, ReportMode};
use crate::error::{AppError, Result};
use crate::models::PaymentStatus;
use crate::quoting::{self, ProfitabilityReport};
use crate::AppState;

/// Query parameters for GET /api/reports/profitability
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// `creation` (default) or `payment`.
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Overrides the configured monthly fixed costs for this report.
    #[serde(default)]
    pub fixed_costs: Option<Decimal>,
}

/// GET /api/reports/profitability
pub async fn profitability(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ProfitabilityReport>> {
    require_admin(&caller)?;

    if query.date_from > query.date_to {
        return Err(AppError::Domain(
            "date_from must not be after date_to".to_string(),
        ));
    }
    let mode = match query.mode.as_deref() {
        None | Some("creation") => ReportMode::Creation,
        Some("payment") => ReportMode::Payment,
        Some(other) => {
            return Err(AppError::Domain(format!(
                "unknown report mode: {other} (expected creation or payment)"
            )))
        }
    };
    let payment_status = match &query.payment_status {
        None => None,
        Some(raw) => Some(
            PaymentStatus::parse(raw)
                .ok_or_else(|| AppError::Domain("unknown payment status".to_string()))?,
        ),
    };
    if let Some(fixed_costs) = query.fixed_costs {
        if fixed_costs < Decimal::ZERO {
            return Err(AppError::Domain("fixed_costs must not be negative".to_string()));
        }
    }

    let monthly_fixed_costs = match query.fixed_costs {
        Some(override_value) => override_value,
        None => {
            quoting::queries::get_or_seed_parameters(&state.db)
                .await?
                .monthly_fixed_costs
        }
    };

    let quotations = db::report_quotations(
        &state.db,
        query.date_from,
        query.date_to,
        mode,
        payment_status.map(|s| s.as_str()),
    )
    .await?;

    Ok(Json(quoting::summarize_report(
        quotations,
        query.date_from,
        query.date_to,
        monthly_fixed_costs,
    )))
}
