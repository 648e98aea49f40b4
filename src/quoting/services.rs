//! Quotation service functions with database and cache access.
//!
//! Orchestrates one calculation request: normalize, fetch the injected
//! lookups (global parameters, employee costs), then run the pure
//! calculator behind the fingerprint cache.

use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::QuoteCache;
use crate::error::{AppError, Result};
use crate::models::settings::GlobalParameters;
use crate::quoting::calculators::compute_quotation;
use crate::quoting::models::{CostBasis, QuotationInput};
use crate::quoting::queries;
use crate::quoting::requests::CalculateQuotationRequest;
use crate::quoting::responses::QuotationBreakdown;
use crate::quoting::validate;

/// Stable cache key for a validated input under a parameters version.
///
/// Hashes the canonical serde serialization of the normalized input (struct
/// field order, so key ordering and whitespace of the raw request cannot
/// cause spurious misses) together with the version token, so a parameter
/// change always misses.
pub fn fingerprint(input: &QuotationInput, parameters_version: i64) -> Result<String> {
    let canonical = serde_json::to_vec(input)
        .map_err(|e| AppError::Internal(format!("fingerprint serialization: {e}")))?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    hasher.update(parameters_version.to_be_bytes());
    Ok(URL_SAFE_NO_PAD.encode(hasher.finalize()))
}

/// Run one calculation end to end: validate, look up parameters and
/// employee costs, and compute behind the cache.
pub async fn calculate_quotation(
    pool: &PgPool,
    cache: &QuoteCache,
    request: &CalculateQuotationRequest,
) -> Result<Arc<QuotationBreakdown>> {
    let input = validate::normalize(request)?;
    let params = queries::get_or_seed_parameters(pool).await?;

    let type_ids: Vec<_> = input
        .employees
        .iter()
        .map(|allocation| allocation.employee_type_id)
        .collect();
    let employee_costs = queries::employee_cost_map(pool, &type_ids).await?;

    // Unknown references are soft conditions: the calculation proceeds
    // with a zero contribution, but the skip is visible in the logs.
    for allocation in &input.employees {
        if !employee_costs.contains_key(&allocation.employee_type_id) {
            warn!(
                employee_type_id = %allocation.employee_type_id,
                "Skipping allocation for unknown employee type"
            );
        }
    }
    for cost in &input.custom_costs {
        if cost.basis == CostBasis::PerTicketSector {
            let known = cost
                .sector
                .as_ref()
                .is_some_and(|name| input.ticket_sectors.iter().any(|s| &s.name == name));
            if !known {
                warn!(cost = %cost.name, "Custom cost references an unknown sector");
            }
        }
    }

    quote_with_cache(cache, &input, &params, &employee_costs).await
}

/// Compute a breakdown, short-circuiting through the fingerprint cache.
///
/// Two concurrent requests with the same fingerprint may both miss and
/// recompute; the calculator is pure, so the duplicate work is harmless
/// and no single-flight coordination is needed.
pub async fn quote_with_cache(
    cache: &QuoteCache,
    input: &QuotationInput,
    params: &GlobalParameters,
    employee_costs: &HashMap<Uuid, Decimal>,
) -> Result<Arc<QuotationBreakdown>> {
    let key = fingerprint(input, params.version)?;

    if let Some(cached) = cache.get(&key).await {
        debug!("Cache HIT for quotation fingerprint: {}", key);
        return Ok(cached);
    }
    debug!("Cache MISS for quotation fingerprint: {}", key);

    let breakdown = Arc::new(compute_quotation(input, params, employee_costs)?);
    cache.insert(key, Arc::clone(&breakdown)).await;
    Ok(breakdown)
}
