//! Quotation engine module.
//!
//! Validation, pure calculation, and the fingerprint-cached service in
//! front of it. Handlers in `routes` call into `services`; everything
//! below that is side-effect free except the queries submodule.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod services;
pub mod validate;

// Re-export commonly used items
pub use calculators::{round_money, summarize_report, ProfitabilityReport, ReportLine};
pub use models::QuotationInput;
pub use responses::QuotationBreakdown;
pub use services::{calculate_quotation, fingerprint};
