//! Event-quotation API: configure ticket sectors, fees, payment splits,
//! and operational costs for an event, and get back a deterministic
//! financial breakdown with revenue, cost, margin, and profitability
//! figures. Persisted quotations feed admin-side profitability reports.

pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod quoting;
pub mod routes;

use sqlx::PgPool;

use crate::cache::QuoteCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: QuoteCache,
}
