use std::fmt;

use chrono::{DateTime, Utc};
use inquire::{InquireError, Select};

use crate::store::Store;
use crate::types::{LifecycleStatus, Tenant};

/// Page size used when walking every site for a picker or listing.
const LIST_BATCH: i32 = 200;

/// Site with its status for display
pub struct SiteDisplay {
    pub site: Tenant,
}

impl fmt::Display for SiteDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  [{}]  created {}",
            self.site.identifier,
            self.site.display_name,
            self.site.status,
            format_relative_time(&self.site.created_at)
        )
    }
}

/// Format a datetime as relative time (e.g., "2 days ago")
#[must_use]
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let diff = now.signed_duration_since(*dt);

    if diff.num_seconds() < 0 {
        return "in the future".to_string();
    }

    if diff.num_seconds() < 60 {
        return "just now".to_string();
    }

    if diff.num_minutes() < 60 {
        let mins = diff.num_minutes();
        return if mins == 1 {
            "1 minute ago".to_string()
        } else {
            format!("{mins} minutes ago")
        };
    }

    if diff.num_hours() < 24 {
        let hours = diff.num_hours();
        return if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{hours} hours ago")
        };
    }

    let days = diff.num_days();
    if days == 1 {
        "1 day ago".to_string()
    } else {
        format!("{days} days ago")
    }
}

/// Load every site, following the subdomain cursor.
pub fn load_all_sites(store: &impl Store) -> anyhow::Result<Vec<Tenant>> {
    let mut sites = Vec::new();
    let mut cursor = String::new();

    loop {
        let batch = store.list_sites(&cursor, LIST_BATCH)?;
        let done = batch.len() < LIST_BATCH as usize;
        if let Some(last) = batch.last() {
            cursor = last.identifier.clone();
        }
        sites.extend(batch);
        if done {
            return Ok(sites);
        }
    }
}

/// Pick a site from the list
pub fn pick_site(store: &impl Store) -> anyhow::Result<Option<Tenant>> {
    let sites: Vec<SiteDisplay> = load_all_sites(store)?
        .into_iter()
        .map(|site| SiteDisplay { site })
        .collect();

    if sites.is_empty() {
        println!("No sites found.");
        return Ok(None);
    }

    let selection = Select::new("Select site:", sites)
        .with_page_size(15)
        .with_help_message("Type to filter, Enter to select")
        .with_vim_mode(true)
        .prompt();

    match selection {
        Ok(display) => Ok(Some(display.site)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Pick a lifecycle status
pub fn pick_status(current: LifecycleStatus) -> anyhow::Result<Option<LifecycleStatus>> {
    let start = LifecycleStatus::ALL
        .iter()
        .position(|s| *s == current)
        .unwrap_or(0);

    let selection = Select::new("New status:", LifecycleStatus::ALL.to_vec())
        .with_starting_cursor(start)
        .prompt();

    match selection {
        Ok(status) => Ok(Some(status)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Resolve a site from a flag, or prompt for one when interactive.
pub fn get_or_pick_site(
    store: &impl Store,
    subdomain: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<Option<Tenant>> {
    if let Some(subdomain) = subdomain {
        let site = store
            .find_site_by_subdomain(&subdomain.to_ascii_lowercase())?
            .ok_or_else(|| anyhow::anyhow!("Site not found: {}", subdomain))?;
        return Ok(Some(site));
    }

    if non_interactive {
        anyhow::bail!("--subdomain is required in non-interactive mode");
    }

    pick_site(store)
}

/// Request confirmation for a destructive operation
pub fn confirm_action(message: &str, yes: bool, non_interactive: bool) -> anyhow::Result<bool> {
    if yes {
        Ok(true)
    } else if non_interactive {
        anyhow::bail!("--yes is required for destructive operations in non-interactive mode");
    } else {
        Ok(inquire::Confirm::new(message)
            .with_default(false)
            .prompt()?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(
            format_relative_time(&(now - Duration::minutes(5))),
            "5 minutes ago"
        );
        assert_eq!(format_relative_time(&(now - Duration::hours(1))), "1 hour ago");
        assert_eq!(format_relative_time(&(now - Duration::days(3))), "3 days ago");
        assert_eq!(
            format_relative_time(&(now + Duration::hours(1))),
            "in the future"
        );
    }
}
