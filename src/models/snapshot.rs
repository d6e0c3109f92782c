//! Combined admin snapshot.
//!
//! The admin panel refetches everything after each successful save so
//! cross-references (a new card in the catalog, a renamed section in a page
//! preview) stay consistent; this model is that single response.

use serde::{Deserialize, Serialize};

use super::{BlogComment, BlogPost, Briefing, Lead, ServiceData, SiteConfig};

/// Everything the admin panel edits or displays, in one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSnapshot {
    pub generated_at: String,
    pub revision_id: i64,
    pub config: SiteConfig,
    pub services: Vec<ServiceData>,
    pub posts: Vec<BlogPost>,
    pub comments: Vec<BlogComment>,
    pub leads: Vec<Lead>,
    pub briefings: Vec<Briefing>,
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: String,
}
