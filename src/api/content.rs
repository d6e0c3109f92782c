//! Site content and admin snapshot endpoints.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::content::resolve_config;
use crate::models::{AdminSnapshot, RevisionInfo, SiteConfig, StoredSiteConfig};
use crate::AppState;

/// GET /api/content - The resolved site configuration.
///
/// This endpoint never fails: a broken fetch falls back to the defaults
/// table so the public site always has something to render.
pub async fn get_content(State(state): State<AppState>) -> ApiResult<SiteConfig> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let stored = match state.repo.get_site_config().await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("Site config fetch failed, serving defaults: {}", e);
            None
        }
    };

    success(resolve_config(stored), revision_id)
}

/// PUT /api/admin/config - Replace the stored (partial) configuration.
///
/// Returns the resolved configuration so the admin preview matches what
/// the public site will render.
pub async fn update_config(
    State(state): State<AppState>,
    Json(request): Json<StoredSiteConfig>,
) -> ApiResult<SiteConfig> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.upsert_site_config(&request).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(resolve_config(Some(request)), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/admin/snapshot - Everything the admin panel edits, in one response.
pub async fn get_snapshot(State(state): State<AppState>) -> ApiResult<AdminSnapshot> {
    let snapshot = state
        .repo
        .get_snapshot()
        .await
        .map_err(|e| crate::errors::AppErrorWithRevision {
            error: e,
            revision_id: 0,
        })?;

    success(snapshot.clone(), snapshot.revision_id)
}

/// GET /api/admin/revision - The current revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let revision_info =
        state
            .repo
            .get_revision_info()
            .await
            .map_err(|e| crate::errors::AppErrorWithRevision {
                error: e,
                revision_id: 0,
            })?;

    success(revision_info.clone(), revision_info.revision_id)
}
