mod commands;
pub mod pickers;
mod site;

pub use commands::{AdminCommands, SiteCommands};
pub use site::{run_site_add, run_site_list, run_site_publish, run_site_remove, run_site_status};

use crate::config::ServerConfig;
use crate::store::SqliteStore;

/// Opens the store the server would use for `data_dir`, checking it exists.
pub fn init_store(data_dir: &str) -> anyhow::Result<SqliteStore> {
    let db_path = ServerConfig::load(data_dir)?.db_path();

    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {}. Run 'webownr admin init' first.",
            db_path.display()
        );
    }

    SqliteStore::new(&db_path).map_err(Into::into)
}
