//! Rules applied when a new site is written: identifier validation and the
//! one-time template assignment. Nothing here runs at render time.

use super::demo::is_demo;
use super::host::is_reserved;
use super::template::TemplateId;

const MAX_IDENTIFIER_LEN: usize = 63;

/// Plans whose owners may pick their own template.
const CHOICE_ALLOWED_PLANS: &[&str] = &["pro", "business"];

/// Niche keyword to template. First match wins.
const NICHE_TEMPLATES: &[(&str, TemplateId)] = &[
    ("restaurant", TemplateId::Vibrant),
    ("food", TemplateId::Vibrant),
    ("bakery", TemplateId::Vibrant),
    ("cafe", TemplateId::Vibrant),
    ("fashion", TemplateId::Elegant),
    ("beauty", TemplateId::Elegant),
    ("jewelry", TemplateId::Elegant),
    ("tech", TemplateId::Modern),
    ("software", TemplateId::Modern),
    ("agency", TemplateId::Modern),
    ("law", TemplateId::Classic),
    ("consulting", TemplateId::Classic),
    ("finance", TemplateId::Classic),
    ("real-estate", TemplateId::Classic),
    ("photography", TemplateId::Minimal),
    ("art", TemplateId::Minimal),
    ("portfolio", TemplateId::Minimal),
];

/// Template given to sites whose niche is not in the table.
pub const BASELINE_TEMPLATE: TemplateId = TemplateId::Modern;

#[must_use]
pub fn plan_allows_choice(plan: Option<&str>) -> bool {
    plan.is_some_and(|p| CHOICE_ALLOWED_PLANS.contains(&p.trim().to_ascii_lowercase().as_str()))
}

#[must_use]
pub fn template_for_niche(niche: Option<&str>) -> TemplateId {
    let Some(niche) = niche else {
        return BASELINE_TEMPLATE;
    };
    let niche = niche.trim().to_ascii_lowercase().replace([' ', '_'], "-");

    NICHE_TEMPLATES
        .iter()
        .find(|(key, _)| *key == niche)
        .map_or(BASELINE_TEMPLATE, |(_, template)| *template)
}

/// Chooses the template for a new site: the owner's pick when their plan
/// allows it and the pick is a real template, otherwise the niche default.
#[must_use]
pub fn assign_template(
    plan: Option<&str>,
    requested: Option<&str>,
    niche: Option<&str>,
) -> TemplateId {
    if plan_allows_choice(plan) {
        if let Some(template) = requested.and_then(TemplateId::parse) {
            return template;
        }
    }
    template_for_niche(niche)
}

/// Validates a new site identifier: a lowercase DNS label that is neither
/// reserved nor shadowed by a demo site.
pub fn validate_identifier(identifier: &str) -> Result<(), String> {
    if identifier.is_empty() {
        return Err("Subdomain cannot be empty".to_string());
    }
    if identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(format!(
            "Subdomain cannot exceed {MAX_IDENTIFIER_LEN} characters"
        ));
    }
    if !identifier
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(
            "Subdomain can only contain lowercase letters, digits, and hyphens".to_string(),
        );
    }
    if identifier.starts_with('-') || identifier.ends_with('-') {
        return Err("Subdomain cannot start or end with a hyphen".to_string());
    }
    if is_reserved(identifier) || is_demo(identifier) {
        return Err(format!("Subdomain '{identifier}' is reserved"));
    }
    Ok(())
}
