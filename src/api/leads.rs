//! Lead and briefing endpoints.
//!
//! Public forms write once; the admin panel reads back. There is no update
//! or delete path on purpose.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Briefing, CreateBriefingRequest, CreateLeadRequest, Lead};
use crate::AppState;

/// POST /api/leads - Capture a lead from a public form.
pub async fn create_lead(
    State(state): State<AppState>,
    Json(request): Json<CreateLeadRequest>,
) -> ApiResult<Lead> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.lead_type.trim().is_empty() {
        return error(
            AppError::Validation("Lead type is required".to_string()),
            revision_id,
        );
    }
    if !request.data.is_object() {
        return error(
            AppError::Validation("Lead data must be an object".to_string()),
            revision_id,
        );
    }

    match state.repo.create_lead(&request).await {
        Ok(lead) => success(lead, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/admin/leads - Captured leads, newest first.
pub async fn list_leads(State(state): State<AppState>) -> ApiResult<Vec<Lead>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_leads().await {
        Ok(leads) => success(leads, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/briefings - Submit a project briefing.
pub async fn create_briefing(
    State(state): State<AppState>,
    Json(request): Json<CreateBriefingRequest>,
) -> ApiResult<Briefing> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if !request.data.is_object() {
        return error(
            AppError::Validation("Briefing data must be an object".to_string()),
            revision_id,
        );
    }

    match state.repo.create_briefing(&request).await {
        Ok(briefing) => success(briefing, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/admin/briefings - Submitted briefings, newest first.
pub async fn list_briefings(State(state): State<AppState>) -> ApiResult<Vec<Briefing>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_briefings().await {
        Ok(briefings) => success(briefings, revision_id),
        Err(e) => error(e, revision_id),
    }
}
