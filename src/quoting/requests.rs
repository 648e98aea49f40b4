//! Request DTOs for the quotation API endpoints.
//!
//! These mirror the raw JSON bodies clients submit. Range and length
//! constraints are declared here with `validator` derives; enumerated
//! string fields (event type, platform, charged-to, cost basis) are
//! checked during normalization so one response carries every violation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::quoting::responses::QuotationBreakdown;

/// Percentages live in [0, 100].
pub fn percent_range(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO && *value <= Decimal::ONE_HUNDRED {
        Ok(())
    } else {
        Err(ValidationError::new("percent_range")
            .with_message("must be between 0 and 100".into()))
    }
}

/// Monetary amounts and quantities never go negative.
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("non_negative").with_message("must not be negative".into()))
    }
}

/// Body of `POST /api/quotations/calculate`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CalculateQuotationRequest {
    pub event_type: String,

    #[validate(nested)]
    pub platform: PlatformRequest,

    /// Ticketing fee percentage (the service charge).
    #[validate(custom(function = "percent_range"))]
    pub service_charge: Decimal,

    #[serde(default)]
    #[validate(custom(function = "percent_range"))]
    pub additional_services_percentage: Option<Decimal>,

    #[serde(default)]
    #[validate(nested)]
    pub payment_methods: Vec<PaymentMethodRequest>,

    #[serde(default)]
    #[validate(nested)]
    pub employees: Vec<EmployeeAllocationRequest>,

    #[serde(default)]
    #[validate(nested)]
    pub mobility: Option<MobilityRequest>,

    #[serde(default)]
    #[validate(nested)]
    pub custom_costs: Vec<CustomCostRequest>,

    #[validate(length(min = 1, message = "at least one ticket sector is required"), nested)]
    pub ticket_sectors: Vec<TicketSectorRequest>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlatformRequest {
    pub name: String,
    /// Percentage fee; falls back to the global default when omitted.
    #[serde(default)]
    #[validate(custom(function = "percent_range"))]
    pub percentage: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentMethodRequest {
    /// One of `credit`, `debit`, `cash`.
    pub channel: String,
    /// Share of total sale value paid through this channel, as a fee
    /// percentage.
    #[validate(custom(function = "percent_range"))]
    pub percentage: Decimal,
    /// Who bears the fee; defaults to CONSUMER when omitted.
    #[serde(default)]
    pub charged_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployeeAllocationRequest {
    pub employee_type_id: Uuid,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub days: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MobilityRequest {
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub kilometers: Option<Decimal>,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub number_of_tolls: Option<i32>,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub toll_cost: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomCostRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    /// One of FIXED, PERCENT_OF_SALES, PER_DAY, PER_DAY_PER_PERSON,
    /// PER_TICKET_SYSTEM, PER_TICKET_SECTOR; defaults to FIXED.
    #[serde(default)]
    pub calculation_type: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub days: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub people: Option<i32>,
    #[serde(default)]
    pub sector: Option<String>,
}

// The length rules on the sector/variation lists record the offending
// value in their violation params, so these two DTOs also serialize.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TicketSectorRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "at least one variation is required"), nested)]
    pub variations: Vec<TicketVariationRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TicketVariationRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity: i64,
}

/// Body of `POST /api/quotations` — a computed breakdown plus the
/// identifying metadata and sector detail persisted alongside it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveQuotationRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub event_type: String,
    #[validate(length(min = 1, message = "at least one ticket sector is required"), nested)]
    pub ticket_sectors: Vec<TicketSectorRequest>,
    #[serde(default)]
    #[validate(nested)]
    pub additional_services: Vec<AdditionalServiceRequest>,
    #[serde(default)]
    pub estimated_payment_date: Option<NaiveDate>,
    pub breakdown: QuotationBreakdown,
}

/// Named additional-service line item stored with a quotation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdditionalServiceRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(custom(function = "percent_range"))]
    pub percentage: Decimal,
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
}

/// Body of `PATCH /api/quotations/:id/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Body of `PATCH /api/quotations/:id/payment-status`.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: String,
    #[serde(default)]
    pub estimated_payment_date: Option<NaiveDate>,
}
