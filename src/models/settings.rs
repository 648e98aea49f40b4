//! Global calculation parameters and employee types.
//!
//! `GlobalParameters` is a singleton row (fixed id) seeded with defaults on
//! first read and replaced whole by an administrator. Its `version` column
//! advances on every replacement and is folded into quotation-result
//! fingerprints so a parameter change can never serve a stale cached
//! breakdown.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::quoting::models::CostBasis;
use crate::quoting::requests::{non_negative, percent_range};

/// Fixed primary key of the singleton parameters row.
pub const GLOBAL_PARAMETERS_ID: i32 = 1;

fn valid_cost_basis(value: &str) -> Result<(), ValidationError> {
    if CostBasis::parse(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("one_of").with_message(
            "must be one of FIXED, PERCENT_OF_SALES, PER_DAY, PER_DAY_PER_PERSON, \
             PER_TICKET_SYSTEM, PER_TICKET_SECTOR"
                .into(),
        ))
    }
}

/// Reusable operational-cost entry offered to clients as form prefill.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OperationalCostTemplate {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "valid_cost_basis"))]
    pub calculation_type: Option<String>,
}

/// Reusable additional-service entry offered to clients as form prefill.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdditionalServiceTemplate {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    #[validate(custom(function = "percent_range"))]
    pub percentage: Decimal,
}

/// Global calculation parameters (singleton record)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GlobalParameters {
    pub id: i32,
    /// Monotonically advancing token, bumped on every replacement.
    pub version: i64,

    // Default fee percentages (form prefill; platform fee also used as the
    // fallback when a TICKET_PLUS quotation omits its percentage).
    #[serde(with = "rust_decimal::serde::str")]
    pub platform_fee_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ticketing_fee_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub additional_services_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub credit_fee_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub debit_fee_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cash_fee_percentage: Decimal,

    // Default flat operating costs.
    #[serde(with = "rust_decimal::serde::str")]
    pub credentials_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub supervisors_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub operators_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mobility_cost: Decimal,

    /// Flat fee per ticket, charged instead of a percentage when the
    /// platform is PALCO4.
    #[serde(with = "rust_decimal::serde::str")]
    pub palco4_fee_per_ticket: Decimal,
    /// Percentage line cost on total sale value; waived under PALCO4.
    #[serde(with = "rust_decimal::serde::str")]
    pub line_cost_percentage: Decimal,
    /// Per-ticket ticketing cost; waived under PALCO4.
    #[serde(with = "rust_decimal::serde::str")]
    pub ticketing_cost_per_ticket: Decimal,

    // Mobility inputs for the fuel-cost derivation.
    #[serde(with = "rust_decimal::serde::str")]
    pub fuel_cost_per_liter: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub km_per_liter: Decimal,

    /// Company-wide fixed costs per month, pro-rated into profitability
    /// reports; overridable per report request.
    #[serde(with = "rust_decimal::serde::str")]
    pub monthly_fixed_costs: Decimal,

    pub operational_cost_templates: Json<Vec<OperationalCostTemplate>>,
    pub additional_service_templates: Json<Vec<AdditionalServiceTemplate>>,

    pub updated_at: DateTime<Utc>,
}

impl Default for GlobalParameters {
    fn default() -> Self {
        Self {
            id: GLOBAL_PARAMETERS_ID,
            version: 1,
            platform_fee_percentage: dec!(10),
            ticketing_fee_percentage: dec!(10),
            additional_services_percentage: dec!(0),
            credit_fee_percentage: dec!(3.5),
            debit_fee_percentage: dec!(2.5),
            cash_fee_percentage: dec!(1),
            credentials_cost: dec!(15000),
            supervisors_cost: dec!(20000),
            operators_cost: dec!(12000),
            mobility_cost: dec!(10000),
            palco4_fee_per_ticket: dec!(180),
            line_cost_percentage: dec!(2),
            ticketing_cost_per_ticket: dec!(50),
            fuel_cost_per_liter: dec!(700),
            km_per_liter: dec!(10),
            monthly_fixed_costs: dec!(1500000),
            operational_cost_templates: Json(vec![]),
            additional_service_templates: Json(vec![]),
            updated_at: Utc::now(),
        }
    }
}

/// Employee type with a daily cost, referenced by quotation allocations
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeType {
    pub id: Uuid,
    pub name: String,
    pub is_operator: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub cost_per_day: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
