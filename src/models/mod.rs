//! Persisted data models

pub mod quotation;
pub mod settings;

pub use quotation::{
    classify_transition, PaymentStatus, Quotation, QuotationSector, QuotationService,
    QuotationStatus, QuotationSummary, QuotationVariation, Transition,
};
pub use settings::{
    AdditionalServiceTemplate, EmployeeType, GlobalParameters, OperationalCostTemplate,
    GLOBAL_PARAMETERS_ID,
};
