//! Captured-contact records from the public forms.
//!
//! Leads and briefings are write-once: created by the public site, read-only
//! in the admin panel.

use serde::{Deserialize, Serialize};

/// A captured lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    /// Form of origin ("contact", "swot", "plan_checkout", ...).
    pub lead_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Free-form field bag exactly as the form submitted it.
    pub data: serde_json::Value,
    pub created_at: String,
}

/// Request body for capturing a lead.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub lead_type: String,
    #[serde(default)]
    pub plan: Option<String>,
    pub data: serde_json::Value,
}

/// A submitted project briefing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Briefing {
    pub id: String,
    pub data: serde_json::Value,
    pub created_at: String,
}

/// Request body for submitting a briefing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBriefingRequest {
    pub data: serde_json::Value,
}
