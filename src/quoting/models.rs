//! Normalized quotation input.
//!
//! This is the strongly-typed tree the validator produces and the pure
//! calculator consumes. Its serde serialization (struct field order, no
//! maps) is also the canonical form hashed into the result fingerprint,
//! so field order here is load-bearing for cache identity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event category, used for classification and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    A,
    B,
    C,
    D,
}

impl EventType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "A" => Some(EventType::A),
            "B" => Some(EventType::B),
            "C" => Some(EventType::C),
            "D" => Some(EventType::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::A => "A",
            EventType::B => "B",
            EventType::C => "C",
            EventType::D => "D",
        }
    }
}

/// Ticketing platform running the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "TICKET_PLUS")]
    TicketPlus,
    #[serde(rename = "PALCO4")]
    Palco4,
}

impl Platform {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TICKET_PLUS" => Some(Platform::TicketPlus),
            "PALCO4" => Some(Platform::Palco4),
            _ => None,
        }
    }
}

/// Who bears a payment-method fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargedTo {
    Us,
    Client,
    Consumer,
}

impl ChargedTo {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "US" => Some(ChargedTo::Us),
            "CLIENT" => Some(ChargedTo::Client),
            "CONSUMER" => Some(ChargedTo::Consumer),
            _ => None,
        }
    }
}

/// Payment channel of a fee split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentChannel {
    Credit,
    Debit,
    Cash,
}

impl PaymentChannel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "credit" => Some(PaymentChannel::Credit),
            "debit" => Some(PaymentChannel::Debit),
            "cash" => Some(PaymentChannel::Cash),
            _ => None,
        }
    }
}

/// How a custom operational cost turns its amount into money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostBasis {
    /// The amount is the cost.
    Fixed,
    /// The amount is a percentage of total sale value.
    PercentOfSales,
    /// amount × days
    PerDay,
    /// amount × days × people
    PerDayPerPerson,
    /// amount × total ticket quantity
    PerTicketSystem,
    /// amount × the named sector's ticket quantity
    PerTicketSector,
}

impl CostBasis {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FIXED" => Some(CostBasis::Fixed),
            "PERCENT_OF_SALES" => Some(CostBasis::PercentOfSales),
            "PER_DAY" => Some(CostBasis::PerDay),
            "PER_DAY_PER_PERSON" => Some(CostBasis::PerDayPerPerson),
            "PER_TICKET_SYSTEM" => Some(CostBasis::PerTicketSystem),
            "PER_TICKET_SECTOR" => Some(CostBasis::PerTicketSector),
            _ => None,
        }
    }
}

/// Platform choice with its optional percentage fee.
///
/// The percentage only applies to TICKET_PLUS; when omitted the
/// calculator falls back to the global default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformChoice {
    pub name: Platform,
    pub percentage: Option<Decimal>,
}

/// One channel of the payment-method split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub channel: PaymentChannel,
    pub percentage: Decimal,
    pub charged_to: ChargedTo,
}

/// Personnel allocated to the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeAllocation {
    pub employee_type_id: Uuid,
    pub quantity: i32,
    pub days: i32,
}

/// Travel inputs feeding the fuel and toll cost derivation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mobility {
    pub kilometers: Decimal,
    pub number_of_tolls: i32,
    pub toll_cost: Decimal,
}

/// A custom operational cost line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCost {
    pub name: String,
    pub amount: Decimal,
    pub basis: CostBasis,
    pub days: Option<i32>,
    pub people: Option<i32>,
    /// Sector name the PER_TICKET_SECTOR basis scales by.
    pub sector: Option<String>,
}

/// Price/quantity variation inside a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketVariation {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

/// A seating/admission sector of the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSector {
    pub name: String,
    pub variations: Vec<TicketVariation>,
}

/// Fully validated and normalized calculation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationInput {
    pub event_type: EventType,
    pub platform: PlatformChoice,
    pub service_charge: Decimal,
    pub additional_services_percentage: Decimal,
    pub payment_methods: Vec<PaymentMethod>,
    pub employees: Vec<EmployeeAllocation>,
    pub mobility: Mobility,
    pub custom_costs: Vec<CustomCost>,
    pub ticket_sectors: Vec<TicketSector>,
}
