//! Quotation route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{authorize_owner_or_admin, Caller};
use crate::db;
use crate::error::{AppError, Result};
use crate::models::quotation::{
    classify_transition, PaymentStatus, Quotation, QuotationSector, QuotationService,
    QuotationStatus, QuotationSummary, QuotationVariation, Transition,
};
use crate::quoting;
use crate::quoting::requests::{
    CalculateQuotationRequest, SaveQuotationRequest, UpdatePaymentStatusRequest,
    UpdateStatusRequest,
};
use crate::quoting::responses::QuotationBreakdown;
use crate::AppState;

/// POST /api/quotations/calculate
pub async fn calculate(
    State(state): State<AppState>,
    _caller: Caller,
    Json(request): Json<CalculateQuotationRequest>,
) -> Result<Json<QuotationBreakdown>> {
    let breakdown = quoting::calculate_quotation(&state.db, &state.cache, &request).await?;
    Ok(Json((*breakdown).clone()))
}

/// A persisted quotation with its drill-down detail.
#[derive(Debug, Serialize)]
pub struct QuotationDetail {
    #[serde(flatten)]
    pub quotation: Quotation,
    pub ticket_sectors: Vec<SectorDetail>,
    pub additional_services: Vec<QuotationService>,
}

#[derive(Debug, Serialize)]
pub struct SectorDetail {
    #[serde(flatten)]
    pub sector: QuotationSector,
    pub variations: Vec<QuotationVariation>,
}

/// POST /api/quotations
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<SaveQuotationRequest>,
) -> Result<(StatusCode, Json<Quotation>)> {
    quoting::validate::check_save_request(&request)?;

    let quotation =
        db::create_quotation(&state.db, caller.user_id, &request, &request.breakdown).await?;
    tracing::info!(quotation_id = %quotation.id, "Quotation created");
    Ok((StatusCode::CREATED, Json(quotation)))
}

/// GET /api/quotations
///
/// The recent-activity feed: every status, newest first. Admins see all
/// quotations, everyone else their own.
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<QuotationSummary>>> {
    let owner = if caller.is_admin() {
        None
    } else {
        Some(caller.user_id)
    };
    let quotations = db::list_quotations(&state.db, owner).await?;
    Ok(Json(quotations))
}

/// GET /api/quotations/:id
pub async fn get(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<QuotationDetail>> {
    let quotation = db::get_quotation(&state.db, id).await?;
    // Reads hide other users' quotations rather than admitting they exist.
    if !caller.owns_or_admin(quotation.created_by) {
        return Err(AppError::NotFound);
    }

    let sectors = db::get_quotation_sectors(&state.db, id).await?;
    let additional_services = db::get_quotation_services(&state.db, id).await?;
    Ok(Json(QuotationDetail {
        quotation,
        ticket_sectors: sectors
            .into_iter()
            .map(|(sector, variations)| SectorDetail { sector, variations })
            .collect(),
        additional_services,
    }))
}

/// PATCH /api/quotations/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Quotation>> {
    let target = QuotationStatus::parse(&request.status)
        .ok_or_else(|| AppError::Domain("unknown quotation status".to_string()))?;

    let quotation = db::get_quotation(&state.db, id).await?;
    authorize_owner_or_admin(&caller, quotation.created_by)?;

    let current = QuotationStatus::parse(&quotation.status)
        .ok_or_else(|| AppError::Internal(format!("corrupt status: {}", quotation.status)))?;
    match classify_transition(current, target) {
        Transition::Allowed => {}
        Transition::AdminOnly if caller.is_admin() => {}
        Transition::AdminOnly => return Err(AppError::Forbidden),
        Transition::Invalid => {
            return Err(AppError::Domain(format!(
                "cannot move a quotation from {} to {}",
                current.as_str(),
                target.as_str()
            )))
        }
    }

    let updated = db::update_status(&state.db, id, target.as_str()).await?;
    tracing::info!(
        quotation_id = %id,
        from = current.as_str(),
        to = target.as_str(),
        "Quotation status updated"
    );
    Ok(Json(updated))
}

/// PATCH /api/quotations/:id/payment-status
pub async fn update_payment_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<Quotation>> {
    let target = PaymentStatus::parse(&request.payment_status)
        .ok_or_else(|| AppError::Domain("unknown payment status".to_string()))?;

    let quotation = db::get_quotation(&state.db, id).await?;
    authorize_owner_or_admin(&caller, quotation.created_by)?;

    let updated = db::update_payment_status(
        &state.db,
        id,
        target.as_str(),
        request.estimated_payment_date,
    )
    .await?;
    Ok(Json(updated))
}

/// DELETE /api/quotations/:id
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let quotation = db::get_quotation(&state.db, id).await?;
    authorize_owner_or_admin(&caller, quotation.created_by)?;

    db::delete_quotation(&state.db, id).await?;
    tracing::info!(quotation_id = %id, "Quotation deleted");
    Ok(StatusCode::NO_CONTENT)
}
