//! HTTP route handlers

pub mod admin;
pub mod quotations;
pub mod reports;

use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::json;

use crate::AppState;

/// Assemble the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/quotations/calculate", post(quotations::calculate))
        .route(
            "/api/quotations",
            post(quotations::create).get(quotations::list),
        )
        .route(
            "/api/quotations/:id",
            get(quotations::get).delete(quotations::delete),
        )
        .route("/api/quotations/:id/status", patch(quotations::update_status))
        .route(
            "/api/quotations/:id/payment-status",
            patch(quotations::update_payment_status),
        )
        .route("/api/reports/profitability", get(reports::profitability))
        .route(
            "/api/admin/parameters",
            get(admin::get_parameters).put(admin::update_parameters),
        )
        .route("/api/employee-types", get(admin::list_employee_types))
        .route("/api/admin/employee-types", post(admin::create_employee_type))
        .route(
            "/api/admin/employee-types/:id",
            put(admin::update_employee_type).delete(admin::delete_employee_type),
        )
        .route("/api/admin/cache/stats", get(admin::cache_stats))
}

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
