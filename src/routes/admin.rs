//! Administrative settings handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{require_admin, Caller};
use crate::cache::CacheStats;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::settings::{
    AdditionalServiceTemplate, EmployeeType, GlobalParameters, OperationalCostTemplate,
};
use crate::quoting::queries::get_or_seed_parameters;
use crate::quoting::requests::{non_negative, percent_range};
use crate::quoting::validate::flatten_errors;
use crate::AppState;

/// GET /api/admin/parameters
pub async fn get_parameters(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<GlobalParameters>> {
    require_admin(&caller)?;
    let params = get_or_seed_parameters(&state.db).await?;
    Ok(Json(params))
}

/// Whole-record replacement payload for the parameters singleton.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateParametersRequest {
    #[validate(custom(function = "percent_range"))]
    pub platform_fee_percentage: Decimal,
    #[validate(custom(function = "percent_range"))]
    pub ticketing_fee_percentage: Decimal,
    #[validate(custom(function = "percent_range"))]
    pub additional_services_percentage: Decimal,
    #[validate(custom(function = "percent_range"))]
    pub credit_fee_percentage: Decimal,
    #[validate(custom(function = "percent_range"))]
    pub debit_fee_percentage: Decimal,
    #[validate(custom(function = "percent_range"))]
    pub cash_fee_percentage: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub credentials_cost: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub supervisors_cost: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub operators_cost: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub mobility_cost: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub palco4_fee_per_ticket: Decimal,
    #[validate(custom(function = "percent_range"))]
    pub line_cost_percentage: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub ticketing_cost_per_ticket: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub fuel_cost_per_liter: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub km_per_liter: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub monthly_fixed_costs: Decimal,
    #[serde(default)]
    #[validate(nested)]
    pub operational_cost_templates: Vec<OperationalCostTemplate>,
    #[serde(default)]
    #[validate(nested)]
    pub additional_service_templates: Vec<AdditionalServiceTemplate>,
}

/// PUT /api/admin/parameters
pub async fn update_parameters(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<UpdateParametersRequest>,
) -> Result<Json<GlobalParameters>> {
    require_admin(&caller)?;
    if let Err(errors) = request.validate() {
        return Err(AppError::Validation(flatten_errors(&errors)));
    }

    // Make sure the singleton exists before replacing it.
    let current = get_or_seed_parameters(&state.db).await?;
    let values = GlobalParameters {
        platform_fee_percentage: request.platform_fee_percentage,
        ticketing_fee_percentage: request.ticketing_fee_percentage,
        additional_services_percentage: request.additional_services_percentage,
        credit_fee_percentage: request.credit_fee_percentage,
        debit_fee_percentage: request.debit_fee_percentage,
        cash_fee_percentage: request.cash_fee_percentage,
        credentials_cost: request.credentials_cost,
        supervisors_cost: request.supervisors_cost,
        operators_cost: request.operators_cost,
        mobility_cost: request.mobility_cost,
        palco4_fee_per_ticket: request.palco4_fee_per_ticket,
        line_cost_percentage: request.line_cost_percentage,
        ticketing_cost_per_ticket: request.ticketing_cost_per_ticket,
        fuel_cost_per_liter: request.fuel_cost_per_liter,
        km_per_liter: request.km_per_liter,
        monthly_fixed_costs: request.monthly_fixed_costs,
        operational_cost_templates: sqlx::types::Json(request.operational_cost_templates),
        additional_service_templates: sqlx::types::Json(request.additional_service_templates),
        ..current
    };

    let updated = db::replace_parameters(&state.db, &values).await?;
    // The version bump already invalidates fingerprints; dropping the old
    // entries just frees them early.
    state.cache.invalidate_all();
    tracing::info!(version = updated.version, "Global parameters replaced");
    Ok(Json(updated))
}

/// Payload for creating or updating an employee type.
#[derive(Debug, Deserialize, Validate)]
pub struct EmployeeTypeRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub is_operator: bool,
    #[validate(custom(function = "non_negative"))]
    pub cost_per_day: Decimal,
}

/// GET /api/employee-types — any authenticated caller may read.
pub async fn list_employee_types(
    State(state): State<AppState>,
    _caller: Caller,
) -> Result<Json<Vec<EmployeeType>>> {
    let types = db::list_employee_types(&state.db).await?;
    Ok(Json(types))
}

/// POST /api/admin/employee-types
pub async fn create_employee_type(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<EmployeeTypeRequest>,
) -> Result<(StatusCode, Json<EmployeeType>)> {
    require_admin(&caller)?;
    if let Err(errors) = request.validate() {
        return Err(AppError::Validation(flatten_errors(&errors)));
    }
    let employee_type = db::create_employee_type(
        &state.db,
        &request.name,
        request.is_operator,
        request.cost_per_day,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(employee_type)))
}

/// PUT /api/admin/employee-types/:id
pub async fn update_employee_type(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<EmployeeTypeRequest>,
) -> Result<Json<EmployeeType>> {
    require_admin(&caller)?;
    if let Err(errors) = request.validate() {
        return Err(AppError::Validation(flatten_errors(&errors)));
    }
    let employee_type = db::update_employee_type(
        &state.db,
        id,
        &request.name,
        request.is_operator,
        request.cost_per_day,
    )
    .await?;
    Ok(Json(employee_type))
}

/// DELETE /api/admin/employee-types/:id
pub async fn delete_employee_type(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    require_admin(&caller)?;
    db::delete_employee_type(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/cache/stats
pub async fn cache_stats(State(state): State<AppState>, caller: Caller) -> Result<Json<CacheStats>> {
    require_admin(&caller)?;
    Ok(Json(state.cache.stats()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters_payload() -> serde_json::Value {
        serde_json::json!({
            "platform_fee_percentage": 10,
            "ticketing_fee_percentage": 10,
            "additional_services_percentage": 0,
            "credit_fee_percentage": 3.5,
            "debit_fee_percentage": 2.5,
            "cash_fee_percentage": 1,
            "credentials_cost": 15000,
            "supervisors_cost": 20000,
            "operators_cost": 12000,
            "mobility_cost": 10000,
            "palco4_fee_per_ticket": 180,
            "line_cost_percentage": 2,
            "ticketing_cost_per_ticket": 50,
            "fuel_cost_per_liter": 700,
            "km_per_liter": 10,
            "monthly_fixed_costs": 1500000
        })
    }

    #[test]
    fn test_valid_parameters_payload_passes() {
        let request: UpdateParametersRequest =
            serde_json::from_value(parameters_payload()).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_bad_template_entries_surface_as_field_violations() {
        let mut payload = parameters_payload();
        payload["operational_cost_templates"] = serde_json::json!([
            { "name": "", "amount": "-100", "calculation_type": "WEEKLY" }
        ]);
        payload["additional_service_templates"] = serde_json::json!([
            { "name": "Streaming", "percentage": "150" }
        ]);
        let request: UpdateParametersRequest = serde_json::from_value(payload).unwrap();
        let errors = request.validate().unwrap_err();
        let fields: Vec<String> = flatten_errors(&errors)
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert!(fields.contains(&"operational_cost_templates[0].name".to_string()));
        assert!(fields.contains(&"operational_cost_templates[0].amount".to_string()));
        assert!(fields.contains(&"operational_cost_templates[0].calculation_type".to_string()));
        assert!(fields.contains(&"additional_service_templates[0].percentage".to_string()));
    }
}
