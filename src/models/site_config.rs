//! Site configuration models.
//!
//! The admin panel stores a *partial* configuration (only the fields an
//! editor has touched); the public site always receives the *resolved*
//! configuration produced by the merge resolver in `crate::content`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fully-resolved site configuration served to the public site.
///
/// Every field is populated after merging the stored record over the
/// defaults table; the renderer never sees a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub instagram_url: String,
    pub whatsapp_number: String,
    pub theme: ThemeConfig,
    pub is_blog_active: bool,
    pub is_swot_active: bool,
    pub content: ContentConfig,
}

/// Resolved visual theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub border_radius: String,
    pub typography: TypographyConfig,
}

/// Resolved typography settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyConfig {
    pub font_family: String,
    pub heading_font: String,
}

/// Per-page section contents keyed by section id (`hero`, `pricing`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    #[serde(default)]
    pub sections: BTreeMap<String, SectionConfig>,
}

/// Per-section overrides.
///
/// Fields the defaults table defines are always populated after the merge;
/// fields left `None` (e.g. `image_url` on most sections) mean "inherit the
/// surrounding page's visual default", not "inherit from the config root".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_social_icons: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_share_menu: Option<bool>,
}

impl SectionConfig {
    /// A section with no explicit flag is shown.
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// The partial configuration record as stored by the admin panel.
///
/// Absent fields fall back to the defaults table at resolve time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSiteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<StoredThemeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_blog_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_swot_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<BTreeMap<String, SectionConfig>>,
}

/// Partial theme record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<StoredTypographyConfig>,
}

/// Partial typography record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTypographyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
}
