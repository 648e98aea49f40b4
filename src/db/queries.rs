//! Database queries for quotation persistence and administration.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::quotation::{
    Quotation, QuotationSector, QuotationService, QuotationSummary, QuotationVariation,
};
use crate::models::settings::{EmployeeType, GlobalParameters, GLOBAL_PARAMETERS_ID};
use crate::quoting::requests::SaveQuotationRequest;
use crate::quoting::responses::QuotationBreakdown;

const QUOTATION_COLUMNS: &str = r#"
    id, name, event_type, status, payment_status, estimated_payment_date,
    created_by, ticket_quantity, total_value, total_revenue, total_costs,
    gross_margin, gross_profitability, breakdown, created_at, updated_at
"#;

const SUMMARY_COLUMNS: &str = r#"
    id, name, event_type, status, payment_status, estimated_payment_date,
    created_by, total_revenue, total_costs, gross_margin, created_at
"#;

/// Persist a quotation with its sectors, variations, and service line
/// items in one transaction: either all child rows land or none do.
pub async fn create_quotation(
    pool: &PgPool,
    created_by: Uuid,
    request: &SaveQuotationRequest,
    breakdown: &QuotationBreakdown,
) -> Result<Quotation> {
    let breakdown_json = serde_json::to_value(breakdown)
        .map_err(|e| AppError::Internal(format!("breakdown serialization: {e}")))?;

    let mut tx = pool.begin().await?;

    let quotation = sqlx::query_as::<_, Quotation>(&format!(
        r#"
        INSERT INTO quotations (
            name, event_type, status, payment_status, estimated_payment_date,
            created_by, ticket_quantity, total_value, total_revenue,
            total_costs, gross_margin, gross_profitability, breakdown
        )
        VALUES ($1, $2, 'REVIEW', 'PENDING', $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {QUOTATION_COLUMNS}
        "#
    ))
    .bind(&request.name)
    .bind(&request.event_type)
    .bind(request.estimated_payment_date)
    .bind(created_by)
    .bind(breakdown.ticket_quantity)
    .bind(breakdown.total_value)
    .bind(breakdown.total_revenue)
    .bind(breakdown.total_costs)
    .bind(breakdown.gross_margin)
    .bind(breakdown.gross_profitability)
    .bind(breakdown_json)
    .fetch_one(&mut *tx)
    .await?;

    for (position, sector) in request.ticket_sectors.iter().enumerate() {
        let sector_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO quotation_sectors (quotation_id, name, position)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(quotation.id)
        .bind(&sector.name)
        .bind(position as i32)
        .fetch_one(&mut *tx)
        .await?;

        for variation in &sector.variations {
            sqlx::query(
                r#"
                INSERT INTO quotation_variations (sector_id, name, price, quantity)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(sector_id)
            .bind(&variation.name)
            .bind(variation.price)
            .bind(variation.quantity)
            .execute(&mut *tx)
            .await?;
        }
    }

    for service in &request.additional_services {
        sqlx::query(
            r#"
            INSERT INTO quotation_services (quotation_id, name, percentage, amount)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(quotation.id)
        .bind(&service.name)
        .bind(service.percentage)
        .bind(service.amount)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(quotation)
}

/// Get a quotation by id
pub async fn get_quotation(pool: &PgPool, id: Uuid) -> Result<Quotation> {
    sqlx::query_as::<_, Quotation>(&format!(
        "SELECT {QUOTATION_COLUMNS} FROM quotations WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Sectors of a quotation, with their variations.
pub async fn get_quotation_sectors(
    pool: &PgPool,
    quotation_id: Uuid,
) -> Result<Vec<(QuotationSector, Vec<QuotationVariation>)>> {
    let sectors = sqlx::query_as::<_, QuotationSector>(
        r#"
        SELECT id, quotation_id, name, position
        FROM quotation_sectors
        WHERE quotation_id = $1
        ORDER BY position
        "#,
    )
    .bind(quotation_id)
    .fetch_all(pool)
    .await?;

    let mut out = Vec::with_capacity(sectors.len());
    for sector in sectors {
        let variations = sqlx::query_as::<_, QuotationVariation>(
            r#"
            SELECT id, sector_id, name, price, quantity
            FROM quotation_variations
            WHERE sector_id = $1
            ORDER BY name
            "#,
        )
        .bind(sector.id)
        .fetch_all(pool)
        .await?;
        out.push((sector, variations));
    }
    Ok(out)
}

/// Additional-service line items of a quotation.
pub async fn get_quotation_services(
    pool: &PgPool,
    quotation_id: Uuid,
) -> Result<Vec<QuotationService>> {
    let services = sqlx::query_as::<_, QuotationService>(
        r#"
        SELECT id, quotation_id, name, percentage, amount
        FROM quotation_services
        WHERE quotation_id = $1
        ORDER BY name
        "#,
    )
    .bind(quotation_id)
    .fetch_all(pool)
    .await?;
    Ok(services)
}

/// Recent-activity listing: every status, newest first, optionally
/// scoped to one owner.
pub async fn list_quotations(pool: &PgPool, owner: Option<Uuid>) -> Result<Vec<QuotationSummary>> {
    let quotations = match owner {
        Some(owner_id) => {
            sqlx::query_as::<_, QuotationSummary>(&format!(
                r#"
                SELECT {SUMMARY_COLUMNS}
                FROM quotations
                WHERE created_by = $1
                ORDER BY created_at DESC
                "#
            ))
            .bind(owner_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, QuotationSummary>(&format!(
                r#"
                SELECT {SUMMARY_COLUMNS}
                FROM quotations
                ORDER BY created_at DESC
                "#
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(quotations)
}

/// Set a quotation's lifecycle status
pub async fn update_status(pool: &PgPool, id: Uuid, status: &str) -> Result<Quotation> {
    sqlx::query_as::<_, Quotation>(&format!(
        r#"
        UPDATE quotations
        SET status = $2, updated_at = now()
        WHERE id = $1
        RETURNING {QUOTATION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Set a quotation's payment status and estimated payment date
pub async fn update_payment_status(
    pool: &PgPool,
    id: Uuid,
    payment_status: &str,
    estimated_payment_date: Option<NaiveDate>,
) -> Result<Quotation> {
    sqlx::query_as::<_, Quotation>(&format!(
        r#"
        UPDATE quotations
        SET payment_status = $2, estimated_payment_date = $3, updated_at = now()
        WHERE id = $1
        RETURNING {QUOTATION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(payment_status)
    .bind(estimated_payment_date)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Delete a quotation; child rows cascade.
pub async fn delete_quotation(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM quotations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Which date axis a profitability report filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Creation,
    Payment,
}

/// Select the APPROVED quotations feeding a profitability report.
///
/// In payment mode, quotations without an estimated payment date are
/// excluded: a null date cannot satisfy a date-range filter.
pub async fn report_quotations(
    pool: &PgPool,
    date_from: NaiveDate,
    date_to: NaiveDate,
    mode: ReportMode,
    payment_status: Option<&str>,
) -> Result<Vec<QuotationSummary>> {
    let date_filter = match mode {
        ReportMode::Creation => "(created_at AT TIME ZONE 'UTC')::date BETWEEN $1 AND $2",
        ReportMode::Payment => {
            "estimated_payment_date IS NOT NULL AND estimated_payment_date BETWEEN $1 AND $2"
        }
    };

    let quotations = match payment_status {
        Some(status) => {
            sqlx::query_as::<_, QuotationSummary>(&format!(
                r#"
                SELECT {SUMMARY_COLUMNS}
                FROM quotations
                WHERE status = 'APPROVED'
                  AND {date_filter}
                  AND payment_status = $3
                ORDER BY created_at DESC
                "#
            ))
            .bind(date_from)
            .bind(date_to)
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, QuotationSummary>(&format!(
                r#"
                SELECT {SUMMARY_COLUMNS}
                FROM quotations
                WHERE status = 'APPROVED'
                  AND {date_filter}
                ORDER BY created_at DESC
                "#
            ))
            .bind(date_from)
            .bind(date_to)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(quotations)
}

/// Replace the global-parameters singleton, bumping its version.
///
/// Whole-record replacement, last writer wins; administrative edits are
/// rare and not expected to race.
pub async fn replace_parameters(
    pool: &PgPool,
    values: &GlobalParameters,
) -> Result<GlobalParameters> {
    sqlx::query_as::<_, GlobalParameters>(
        r#"
        UPDATE global_parameters
        SET version = version + 1,
            platform_fee_percentage = $2,
            ticketing_fee_percentage = $3,
            additional_services_percentage = $4,
            credit_fee_percentage = $5,
            debit_fee_percentage = $6,
            cash_fee_percentage = $7,
            credentials_cost = $8,
            supervisors_cost = $9,
            operators_cost = $10,
            mobility_cost = $11,
            palco4_fee_per_ticket = $12,
            line_cost_percentage = $13,
            ticketing_cost_per_ticket = $14,
            fuel_cost_per_liter = $15,
            km_per_liter = $16,
            monthly_fixed_costs = $17,
            operational_cost_templates = $18,
            additional_service_templates = $19,
            updated_at = now()
        WHERE id = $1
        RETURNING
            id, version,
            platform_fee_percentage, ticketing_fee_percentage,
            additional_services_percentage,
            credit_fee_percentage, debit_fee_percentage, cash_fee_percentage,
            credentials_cost, supervisors_cost, operators_cost, mobility_cost,
            palco4_fee_per_ticket, line_cost_percentage, ticketing_cost_per_ticket,
            fuel_cost_per_liter, km_per_liter, monthly_fixed_costs,
            operational_cost_templates, additional_service_templates,
            updated_at
        "#,
    )
    .bind(GLOBAL_PARAMETERS_ID)
    .bind(values.platform_fee_percentage)
    .bind(values.ticketing_fee_percentage)
    .bind(values.additional_services_percentage)
    .bind(values.credit_fee_percentage)
    .bind(values.debit_fee_percentage)
    .bind(values.cash_fee_percentage)
    .bind(values.credentials_cost)
    .bind(values.supervisors_cost)
    .bind(values.operators_cost)
    .bind(values.mobility_cost)
    .bind(values.palco4_fee_per_ticket)
    .bind(values.line_cost_percentage)
    .bind(values.ticketing_cost_per_ticket)
    .bind(values.fuel_cost_per_liter)
    .bind(values.km_per_liter)
    .bind(values.monthly_fixed_costs)
    .bind(&values.operational_cost_templates)
    .bind(&values.additional_service_templates)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

const EMPLOYEE_TYPE_COLUMNS: &str = "id, name, is_operator, cost_per_day, created_at, updated_at";

/// All live employee types, for allocation pickers.
pub async fn list_employee_types(pool: &PgPool) -> Result<Vec<EmployeeType>> {
    let types = sqlx::query_as::<_, EmployeeType>(&format!(
        r#"
        SELECT {EMPLOYEE_TYPE_COLUMNS}
        FROM employee_types
        WHERE deleted_at IS NULL
        ORDER BY name
        "#
    ))
    .fetch_all(pool)
    .await?;
    Ok(types)
}

/// Create an employee type
pub async fn create_employee_type(
    pool: &PgPool,
    name: &str,
    is_operator: bool,
    cost_per_day: Decimal,
) -> Result<EmployeeType> {
    let employee_type = sqlx::query_as::<_, EmployeeType>(&format!(
        r#"
        INSERT INTO employee_types (name, is_operator, cost_per_day)
        VALUES ($1, $2, $3)
        RETURNING {EMPLOYEE_TYPE_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(is_operator)
    .bind(cost_per_day)
    .fetch_one(pool)
    .await?;
    Ok(employee_type)
}

/// Update an employee type
pub async fn update_employee_type(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    is_operator: bool,
    cost_per_day: Decimal,
) -> Result<EmployeeType> {
    sqlx::query_as::<_, EmployeeType>(&format!(
        r#"
        UPDATE employee_types
        SET name = $2, is_operator = $3, cost_per_day = $4, updated_at = now()
        WHERE id = $1
          AND deleted_at IS NULL
        RETURNING {EMPLOYEE_TYPE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(is_operator)
    .bind(cost_per_day)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Soft-delete an employee type. Quotations drafted against it keep
/// their allocations; the calculator treats the reference as zero-cost.
pub async fn delete_employee_type(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE employee_types
        SET deleted_at = now()
        WHERE id = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
