//! Service catalog resolver.
//!
//! Selects and orders the service cards for a `(page, section)` pair. Pure
//! and deterministic for a given catalog snapshot, which is what makes the
//! admin preview predictable.

use crate::models::ServiceData;

/// Section assumed when a legacy record carries none.
pub const FALLBACK_SECTION: &str = "pricing";

/// Category → page alias table for legacy records that predate the `page`
/// column. Consulted only when `page` is absent; one place to audit and to
/// delete once the data is backfilled.
pub fn page_for_category(category: &str) -> Option<&'static str> {
    match category.trim().to_lowercase().as_str() {
        "consultoria" => Some("consultancy"),
        "marketing" | "trafego" => Some("ads"),
        "vendas" => Some("sales"),
        _ => None,
    }
}

/// The page a record belongs to, after the legacy fallback.
pub fn effective_page(service: &ServiceData) -> Option<String> {
    match &service.page {
        Some(page) => Some(page.clone()),
        None => service
            .category
            .as_deref()
            .and_then(page_for_category)
            .map(|p| p.to_string()),
    }
}

/// The section a record belongs to, after the legacy fallback.
pub fn effective_section(service: &ServiceData) -> String {
    service
        .section_id
        .clone()
        .unwrap_or_else(|| FALLBACK_SECTION.to_string())
}

/// Return the active cards matching `(page, section_id)`, sorted ascending
/// by `display_order`. The sort is stable: ties keep the catalog order.
pub fn resolve_catalog<'a>(
    services: &'a [ServiceData],
    page: &str,
    section_id: &str,
) -> Vec<&'a ServiceData> {
    let mut matched: Vec<&ServiceData> = services
        .iter()
        .filter(|s| s.is_active)
        .filter(|s| effective_page(s).as_deref() == Some(page))
        .filter(|s| effective_section(s) == section_id)
        .collect();

    matched.sort_by_key(|s| s.display_order);
    matched
}
