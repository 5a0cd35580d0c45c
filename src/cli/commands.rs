use clap::Subcommand;

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Initialize the server (create database and admin token)
    Init {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },

    /// Manage tenant sites
    Site {
        #[command(subcommand)]
        command: SiteCommands,
    },
}

#[derive(Subcommand)]
pub enum SiteCommands {
    /// Register a new site
    Add {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Subdomain the site is served on
        #[arg(long)]
        subdomain: Option<String>,

        /// Display name of the site
        #[arg(long)]
        name: Option<String>,

        /// Owner account id
        #[arg(long, default_value = "admin")]
        owner: String,

        /// Billing plan (pro and business may pick a template)
        #[arg(long)]
        plan: Option<String>,

        /// Business niche, used to pick a default template
        #[arg(long)]
        niche: Option<String>,

        /// Requested template
        #[arg(long)]
        template: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },

    /// List sites
    List {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the lifecycle status of a site
    Status {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Subdomain of the site (prompts if omitted)
        #[arg(long)]
        subdomain: Option<String>,

        /// New status: setup_pending, pending, live or maintenance
        #[arg(long)]
        status: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },

    /// Publish the draft content of a site
    Publish {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Subdomain of the site (prompts if omitted)
        #[arg(long)]
        subdomain: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },

    /// Remove a site
    Remove {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Subdomain of the site (prompts if omitted)
        #[arg(long)]
        subdomain: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}
