//! Service card endpoints: the public catalog and the admin CRUD surface.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::content::{default_service_cards, resolve_catalog, FALLBACK_SECTION};
use crate::errors::AppError;
use crate::models::{CreateServiceRequest, ServiceData, UpdateServiceRequest};
use crate::AppState;

/// Query parameters for the public catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub page: String,
    #[serde(default = "default_section")]
    pub section_id: String,
}

fn default_section() -> String {
    FALLBACK_SECTION.to_string()
}

/// GET /api/catalog?page=..&sectionId=.. - Active cards for a page section.
pub async fn get_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Vec<ServiceData>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_services().await {
        Ok(services) => {
            let resolved: Vec<ServiceData> =
                resolve_catalog(&services, &query.page, &query.section_id)
                    .into_iter()
                    .cloned()
                    .collect();
            success(resolved, revision_id)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/admin/services - List all cards, inactive included.
pub async fn list_services(State(state): State<AppState>) -> ApiResult<Vec<ServiceData>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_services().await {
        Ok(services) => success(services, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/admin/services - Create a card.
pub async fn create_service(
    State(state): State<AppState>,
    Json(request): Json<CreateServiceRequest>,
) -> ApiResult<ServiceData> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Name is required".to_string()),
            revision_id,
        );
    }

    match state.repo.create_service(&request).await {
        Ok(service) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(service, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/admin/services/:id - Update a card.
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateServiceRequest>,
) -> ApiResult<ServiceData> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return error(
                AppError::Validation("Name cannot be empty".to_string()),
                revision_id,
            );
        }
    }

    match state.repo.update_service(&id, &request).await {
        Ok(service) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(service, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/admin/services/:id - Delete a card.
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_service(&id).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// Result of a sync-defaults run.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncDefaultsResult {
    pub inserted: usize,
    pub skipped: usize,
}

/// POST /api/admin/services/sync-defaults - Insert the baseline cards.
///
/// Idempotent: cards whose `(name, page, section_id)` already exist are
/// skipped, so running the sync twice never duplicates anything.
pub async fn sync_default_services(State(state): State<AppState>) -> ApiResult<SyncDefaultsResult> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let defaults = default_service_cards();
    match state.repo.sync_default_services(&defaults).await {
        Ok(inserted) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(
                SyncDefaultsResult {
                    inserted,
                    skipped: defaults.len() - inserted,
                },
                new_revision,
            )
        }
        Err(e) => error(e, revision_id),
    }
}
