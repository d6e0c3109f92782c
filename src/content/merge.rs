//! Config merge resolver.
//!
//! Combines a possibly-partial stored configuration with the defaults table
//! into a complete, render-ready `SiteConfig`. The merge is per-field at
//! every level: a stored theme missing `typography.headingFont` still
//! receives the default heading font rather than losing the typography
//! block, and a stored section missing `subtitle` keeps the default
//! subtitle while its own fields win.

use crate::models::{SectionConfig, SiteConfig, StoredSiteConfig};

use super::default_site_config;

/// Resolve the stored configuration against the defaults table.
///
/// `None` means the stored record was absent or unreadable; the caller logs
/// that and the full defaults table is served.
pub fn resolve_config(stored: Option<StoredSiteConfig>) -> SiteConfig {
    let mut resolved = default_site_config();
    let Some(stored) = stored else {
        return resolved;
    };

    if let Some(name) = stored.name {
        resolved.name = name;
    }
    if let Some(phone) = stored.phone {
        resolved.phone = phone;
    }
    if let Some(email) = stored.email {
        resolved.email = email;
    }
    if let Some(instagram_url) = stored.instagram_url {
        resolved.instagram_url = instagram_url;
    }
    if let Some(whatsapp_number) = stored.whatsapp_number {
        resolved.whatsapp_number = whatsapp_number;
    }
    if let Some(flag) = stored.is_blog_active {
        resolved.is_blog_active = flag;
    }
    if let Some(flag) = stored.is_swot_active {
        resolved.is_swot_active = flag;
    }

    if let Some(theme) = stored.theme {
        if let Some(primary_color) = theme.primary_color {
            resolved.theme.primary_color = primary_color;
        }
        if let Some(secondary_color) = theme.secondary_color {
            resolved.theme.secondary_color = secondary_color;
        }
        if let Some(border_radius) = theme.border_radius {
            resolved.theme.border_radius = border_radius;
        }
        if let Some(typography) = theme.typography {
            if let Some(font_family) = typography.font_family {
                resolved.theme.typography.font_family = font_family;
            }
            if let Some(heading_font) = typography.heading_font {
                resolved.theme.typography.heading_font = heading_font;
            }
        }
    }

    if let Some(sections) = stored.sections {
        for (key, stored_section) in sections {
            match resolved.content.sections.get(&key) {
                Some(default_section) => {
                    let merged = merge_section(default_section, &stored_section);
                    resolved.content.sections.insert(key, merged);
                }
                // Section keys the defaults table does not know are carried
                // through untouched.
                None => {
                    resolved.content.sections.insert(key, stored_section);
                }
            }
        }
    }

    resolved
}

/// Per-field section merge: a stored field wins only where it is set.
fn merge_section(default: &SectionConfig, stored: &SectionConfig) -> SectionConfig {
    SectionConfig {
        is_active: stored.is_active.or(default.is_active),
        title: stored.title.clone().or_else(|| default.title.clone()),
        subtitle: stored.subtitle.clone().or_else(|| default.subtitle.clone()),
        font_family: stored
            .font_family
            .clone()
            .or_else(|| default.font_family.clone()),
        font_size_title: stored
            .font_size_title
            .clone()
            .or_else(|| default.font_size_title.clone()),
        button_text: stored
            .button_text
            .clone()
            .or_else(|| default.button_text.clone()),
        button_redirect: stored
            .button_redirect
            .clone()
            .or_else(|| default.button_redirect.clone()),
        image_url: stored
            .image_url
            .clone()
            .or_else(|| default.image_url.clone()),
        title_color: stored
            .title_color
            .clone()
            .or_else(|| default.title_color.clone()),
        background_color: stored
            .background_color
            .clone()
            .or_else(|| default.background_color.clone()),
        show_social_icons: stored.show_social_icons.or(default.show_social_icons),
        show_share_menu: stored.show_share_menu.or(default.show_share_menu),
    }
}
