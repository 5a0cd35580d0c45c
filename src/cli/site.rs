use chrono::Utc;
use inquire::Text;
use uuid::Uuid;

use crate::site::onboarding::{assign_template, validate_identifier};
use crate::store::{SiteReader, Store};
use crate::types::{LegacyFields, LifecycleStatus, Tenant};

use super::init_store;
use super::pickers::{
    SiteDisplay, confirm_action, get_or_pick_site, load_all_sites, pick_status,
};

#[allow(clippy::too_many_arguments)]
pub fn run_site_add(
    data_dir: String,
    subdomain: Option<String>,
    name: Option<String>,
    owner: String,
    plan: Option<String>,
    niche: Option<String>,
    template: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let subdomain = if let Some(s) = subdomain {
        validate_identifier(&s).map_err(anyhow::Error::msg)?;
        s
    } else if non_interactive {
        anyhow::bail!("--subdomain is required in non-interactive mode");
    } else {
        Text::new("Subdomain:")
            .with_validator(|input: &str| {
                Ok(validate_identifier(input)
                    .map(|()| inquire::validator::Validation::Valid)
                    .unwrap_or_else(|e| inquire::validator::Validation::Invalid(e.into())))
            })
            .prompt()?
    };

    let display_name = match name {
        Some(n) => n,
        None if non_interactive => subdomain.clone(),
        None => Text::new("Display name:")
            .with_default(&subdomain)
            .prompt()?,
    };

    if store.find_site_by_subdomain(&subdomain)?.is_some() {
        anyhow::bail!("Site '{}' already exists", subdomain);
    }

    let assigned = assign_template(plan.as_deref(), template.as_deref(), niche.as_deref());
    let now = Utc::now();
    let site = Tenant {
        id: Uuid::new_v4().to_string(),
        identifier: subdomain.clone(),
        display_name,
        template_id: Some(assigned.as_str().to_string()),
        status: LifecycleStatus::SetupPending,
        owner_id: owner,
        plan,
        niche,
        published_content: None,
        draft_content: None,
        legacy: LegacyFields::default(),
        created_at: now,
        updated_at: now,
    };

    store.create_site(&site)?;

    println!();
    println!("Created site \"{subdomain}\" with template {assigned} (status: setup_pending)");
    println!();

    Ok(())
}

pub fn run_site_list(data_dir: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;
    let sites = load_all_sites(&store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sites)?);
        return Ok(());
    }

    if sites.is_empty() {
        println!("No sites found.");
        return Ok(());
    }

    for site in sites {
        println!("{}", SiteDisplay { site });
    }

    Ok(())
}

pub fn run_site_status(
    data_dir: String,
    subdomain: Option<String>,
    status: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let Some(site) = get_or_pick_site(&store, subdomain, non_interactive)? else {
        return Ok(());
    };

    let status = if let Some(s) = status {
        LifecycleStatus::parse(&s).ok_or_else(|| anyhow::anyhow!("Unknown status: {}", s))?
    } else if non_interactive {
        anyhow::bail!("--status is required in non-interactive mode");
    } else {
        match pick_status(site.status)? {
            Some(s) => s,
            None => return Ok(()),
        }
    };

    store.update_site_status(&site.id, status)?;

    println!();
    println!(
        "Site \"{}\" status changed from {} to {}",
        site.identifier, site.status, status
    );
    println!();

    Ok(())
}

pub fn run_site_publish(
    data_dir: String,
    subdomain: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let Some(site) = get_or_pick_site(&store, subdomain, non_interactive)? else {
        return Ok(());
    };

    store.publish_site_draft(&site.id)?;

    println!();
    println!("Published draft content for \"{}\"", site.identifier);
    println!();

    Ok(())
}

pub fn run_site_remove(
    data_dir: String,
    subdomain: Option<String>,
    non_interactive: bool,
    yes: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let Some(site) = get_or_pick_site(&store, subdomain, non_interactive)? else {
        return Ok(());
    };

    let message = format!("Remove site \"{}\"? This cannot be undone.", site.identifier);
    if !confirm_action(&message, yes, non_interactive)? {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_site(&site.id)?;

    println!();
    println!("Removed site \"{}\"", site.identifier);
    println!();

    Ok(())
}
