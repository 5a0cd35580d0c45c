use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use webownr::auth::TokenGenerator;
use webownr::cli::{
    AdminCommands, SiteCommands, run_site_add, run_site_list, run_site_publish, run_site_remove,
    run_site_status,
};
use webownr::config::ServerConfig;
use webownr::server::{AppState, create_router};
use webownr::site::onboarding::validate_identifier;
use webownr::store::{SqliteStore, Store};

const ADMIN_TOKEN_FILE: &str = ".admin_token";
const NOT_INITIALIZED: &str = "Server not initialized. \
    Run 'webownr admin init' first to create the database and admin token.";

#[cfg(unix)]
fn set_restrictive_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Failed to set permissions on {}: {e}", path.display());
    }
}

#[derive(Parser)]
#[command(name = "webownr")]
#[command(about = "Multi-tenant site server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// Data directory for the database and webownr.toml
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Host to bind to (overrides webownr.toml)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides webownr.toml)
        #[arg(long, short)]
        port: Option<u16>,

        /// Root domain tenant subdomains hang off, e.g. "webownr.com"
        #[arg(long)]
        root_domain: Option<String>,

        /// Template used when a site's template is missing or unknown
        #[arg(long)]
        default_template: Option<String>,
    },
}

fn run_init(data_dir: String, non_interactive: bool) -> anyhow::Result<()> {
    let data_path: std::path::PathBuf = data_dir.into();
    fs::create_dir_all(&data_path)?;

    let config = ServerConfig::load(&data_path)?;
    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;

    let token_file = data_path.join(ADMIN_TOKEN_FILE);

    if store.has_admin_token()? {
        bail!(
            "Server already initialized. Admin token exists at: {}",
            token_file.display()
        );
    }

    let generator = TokenGenerator::new();
    let (token, raw_token) = generator.issue_admin()?;

    store.create_token(&token)?;
    fs::write(&token_file, &raw_token)?;

    #[cfg(unix)]
    set_restrictive_permissions(&token_file);

    println!();
    println!("========================================");
    println!("Admin token (save this, it won't be shown again):");
    println!();
    println!("  {raw_token}");
    println!();
    println!("Token also written to: {}", token_file.display());
    println!("========================================");
    println!();

    if !non_interactive {
        create_first_site_prompt(&data_path)?;
    }

    Ok(())
}

fn create_first_site_prompt(data_path: &Path) -> anyhow::Result<()> {
    let create_site = inquire::Confirm::new("Would you like to create a first site?")
        .with_default(false)
        .prompt()?;

    if !create_site {
        return Ok(());
    }

    let subdomain = inquire::Text::new("Subdomain:")
        .with_validator(|input: &str| {
            Ok(validate_identifier(input)
                .map(|()| inquire::validator::Validation::Valid)
                .unwrap_or_else(|e| inquire::validator::Validation::Invalid(e.into())))
        })
        .prompt()?;

    run_site_add(
        data_path.display().to_string(),
        Some(subdomain),
        None,
        "admin".to_string(),
        None,
        None,
        None,
        false,
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("webownr=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init {
                data_dir,
                non_interactive,
            } => {
                run_init(data_dir, non_interactive)?;
            }
            AdminCommands::Site { command } => match command {
                SiteCommands::Add {
                    data_dir,
                    subdomain,
                    name,
                    owner,
                    plan,
                    niche,
                    template,
                    non_interactive,
                } => run_site_add(
                    data_dir,
                    subdomain,
                    name,
                    owner,
                    plan,
                    niche,
                    template,
                    non_interactive,
                )?,
                SiteCommands::List { data_dir, json } => run_site_list(data_dir, json)?,
                SiteCommands::Status {
                    data_dir,
                    subdomain,
                    status,
                    non_interactive,
                } => run_site_status(data_dir, subdomain, status, non_interactive)?,
                SiteCommands::Publish {
                    data_dir,
                    subdomain,
                    non_interactive,
                } => run_site_publish(data_dir, subdomain, non_interactive)?,
                SiteCommands::Remove {
                    data_dir,
                    subdomain,
                    non_interactive,
                    yes,
                } => run_site_remove(data_dir, subdomain, non_interactive, yes)?,
            },
        },
        Commands::Serve {
            data_dir,
            host,
            port,
            root_domain,
            default_template,
        } => {
            let mut config = ServerConfig::load(data_dir)?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(root_domain) = root_domain {
                config.root_domain = root_domain;
            }
            if let Some(default_template) = default_template {
                config.default_template = default_template;
            }

            let token_file = config.data_dir.join(ADMIN_TOKEN_FILE);
            if !token_file.exists() {
                bail!(NOT_INITIALIZED);
            }

            let store = Arc::new(SqliteStore::new(config.db_path())?);
            if !store.has_admin_token()? {
                bail!(NOT_INITIALIZED);
            }

            info!("Admin token available at {}", token_file.display());

            let addr = config.socket_addr()?;
            info!(
                root_domain = %config.root_domain,
                default_template = %config.default_template,
                "Serving sites"
            );

            let state = Arc::new(AppState::new(store.clone(), config)?);
            let app = create_router(state);

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            info!("Shutting down");
            store.close()?;
        }
    }

    Ok(())
}
