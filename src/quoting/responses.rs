//! Response DTOs for the quotation API endpoints.
//!
//! Monetary figures serialize as strings so clients never see float
//! artifacts. The breakdown round-trips: the persistence endpoint
//! accepts the same shape the calculation endpoint returned.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-channel payment fees. `total` counts only fees charged to US.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentFeeBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub credit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub debit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cash: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// A custom operational cost with its computed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCostLine {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Operational cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalCostBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub credentials: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ticketing: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub employees: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mobility: Decimal,
    pub custom: Vec<CustomCostLine>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// The full financial breakdown of a quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationBreakdown {
    pub ticket_quantity: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub platform_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ticketing_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub additional_services: Decimal,
    pub payment_fees: PaymentFeeBreakdown,
    /// Equal to the platform fee under PALCO4, zero otherwise.
    #[serde(with = "rust_decimal::serde::str")]
    pub palco4_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub line_cost: Decimal,
    pub operational_costs: OperationalCostBreakdown,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_costs: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gross_margin: Decimal,
    /// Percentage, zero when there is no revenue.
    #[serde(with = "rust_decimal::serde::str")]
    pub gross_profitability: Decimal,
}
