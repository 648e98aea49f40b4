//! Calculation-side database lookups.
//!
//! Read-only fetches feeding the pure calculator: the global-parameters
//! singleton (seeded with defaults on first read) and the employee-type
//! daily cost map.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::settings::{GlobalParameters, GLOBAL_PARAMETERS_ID};

const PARAMETER_COLUMNS: &str = r#"
    id, version,
    platform_fee_percentage, ticketing_fee_percentage,
    additional_services_percentage,
    credit_fee_percentage, debit_fee_percentage, cash_fee_percentage,
    credentials_cost, supervisors_cost, operators_cost, mobility_cost,
    palco4_fee_per_ticket, line_cost_percentage, ticketing_cost_per_ticket,
    fuel_cost_per_liter, km_per_liter, monthly_fixed_costs,
    operational_cost_templates, additional_service_templates,
    updated_at
"#;

/// Fetch the parameters singleton, seeding it with defaults when absent.
pub async fn get_or_seed_parameters(pool: &PgPool) -> Result<GlobalParameters> {
    let existing = sqlx::query_as::<_, GlobalParameters>(&format!(
        "SELECT {PARAMETER_COLUMNS} FROM global_parameters WHERE id = $1"
    ))
    .bind(GLOBAL_PARAMETERS_ID)
    .fetch_optional(pool)
    .await?;

    if let Some(params) = existing {
        return Ok(params);
    }

    tracing::info!("Seeding global parameters with defaults");
    let defaults = GlobalParameters::default();
    let seeded = sqlx::query_as::<_, GlobalParameters>(&format!(
        r#"
        INSERT INTO global_parameters (
            id, version,
            platform_fee_percentage, ticketing_fee_percentage,
            additional_services_percentage,
            credit_fee_percentage, debit_fee_percentage, cash_fee_percentage,
            credentials_cost, supervisors_cost, operators_cost, mobility_cost,
            palco4_fee_per_ticket, line_cost_percentage, ticketing_cost_per_ticket,
            fuel_cost_per_liter, km_per_liter, monthly_fixed_costs,
            operational_cost_templates, additional_service_templates
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
        RETURNING {PARAMETER_COLUMNS}
        "#
    ))
    .bind(defaults.id)
    .bind(defaults.version)
    .bind(defaults.platform_fee_percentage)
    .bind(defaults.ticketing_fee_percentage)
    .bind(defaults.additional_services_percentage)
    .bind(defaults.credit_fee_percentage)
    .bind(defaults.debit_fee_percentage)
    .bind(defaults.cash_fee_percentage)
    .bind(defaults.credentials_cost)
    .bind(defaults.supervisors_cost)
    .bind(defaults.operators_cost)
    .bind(defaults.mobility_cost)
    .bind(defaults.palco4_fee_per_ticket)
    .bind(defaults.line_cost_percentage)
    .bind(defaults.ticketing_cost_per_ticket)
    .bind(defaults.fuel_cost_per_liter)
    .bind(defaults.km_per_liter)
    .bind(defaults.monthly_fixed_costs)
    .bind(defaults.operational_cost_templates)
    .bind(defaults.additional_service_templates)
    .fetch_one(pool)
    .await?;

    Ok(seeded)
}

/// Daily costs for a set of employee-type ids.
///
/// Ids not present in the returned map are unknown (deleted or never
/// existed); the calculator treats their allocations as zero-cost.
pub async fn employee_cost_map(
    pool: &PgPool,
    type_ids: &[Uuid],
) -> Result<HashMap<Uuid, Decimal>> {
    if type_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, (Uuid, Decimal)>(
        r#"
        SELECT id, cost_per_day
        FROM employee_types
        WHERE id = ANY($1)
          AND deleted_at IS NULL
        "#,
    )
    .bind(type_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}
