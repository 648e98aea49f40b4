//! Persisted quotation models and the status machine.
//!
//! Status columns are stored as TEXT (the wire tags below); the typed
//! enums wrap them at the logic boundary. The breakdown itself is kept
//! as a JSONB snapshot alongside the scalar totals that reporting
//! queries aggregate over.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Approval lifecycle of a persisted quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotationStatus {
    Draft,
    Review,
    Approved,
    Rejected,
}

impl QuotationStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DRAFT" => Some(QuotationStatus::Draft),
            "REVIEW" => Some(QuotationStatus::Review),
            "APPROVED" => Some(QuotationStatus::Approved),
            "REJECTED" => Some(QuotationStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "DRAFT",
            QuotationStatus::Review => "REVIEW",
            QuotationStatus::Approved => "APPROVED",
            QuotationStatus::Rejected => "REJECTED",
        }
    }
}

/// Payment tracking, orthogonal to approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Paid,
}

impl PaymentStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(PaymentStatus::Pending),
            "CONFIRMED" => Some(PaymentStatus::Confirmed),
            "PAID" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Confirmed => "CONFIRMED",
            PaymentStatus::Paid => "PAID",
        }
    }
}

/// Outcome of classifying a requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Forward move along DRAFT → REVIEW → {APPROVED, REJECTED};
    /// owner or admin may perform it.
    Allowed,
    /// Backward move or exit from a terminal state; admins only.
    AdminOnly,
    /// Same-status or otherwise meaningless change; nobody may perform it.
    Invalid,
}

/// Classify a status change against the lifecycle machine.
///
/// APPROVED and REJECTED are terminal for ordinary users; only an
/// administrator moves a quotation backwards or out of a terminal state.
pub fn classify_transition(current: QuotationStatus, target: QuotationStatus) -> Transition {
    use QuotationStatus::*;
    if current == target {
        return Transition::Invalid;
    }
    match (current, target) {
        (Draft, Review) | (Review, Approved) | (Review, Rejected) => Transition::Allowed,
        _ => Transition::AdminOnly,
    }
}

/// Persisted quotation row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quotation {
    pub id: Uuid,
    pub name: String,
    pub event_type: String,
    pub status: String,
    pub payment_status: String,
    pub estimated_payment_date: Option<NaiveDate>,
    pub created_by: Uuid,
    pub ticket_quantity: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_costs: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gross_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gross_profitability: Decimal,
    /// Full `QuotationBreakdown` snapshot as computed at save time.
    pub breakdown: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing/report projection of a quotation (no breakdown payload).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuotationSummary {
    pub id: Uuid,
    pub name: String,
    pub event_type: String,
    pub status: String,
    pub payment_status: String,
    pub estimated_payment_date: Option<NaiveDate>,
    pub created_by: Uuid,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_costs: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gross_margin: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Sector row persisted with a quotation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuotationSector {
    pub id: Uuid,
    pub quotation_id: Uuid,
    pub name: String,
    pub position: i32,
}

/// Variation row belonging to a sector.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuotationVariation {
    pub id: Uuid,
    pub sector_id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub quantity: i64,
}

/// Additional-service line item persisted with a quotation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuotationService {
    pub id: Uuid,
    pub quotation_id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}
