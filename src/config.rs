use std::path::PathBuf;

use clap::Args;
use tracing::info;

/// Settings shared by every command. Each can also come from the environment.
#[derive(Clone, Debug, Args)]
pub struct Config {
    /// Catalog file
    #[arg(
        long,
        global = true,
        env = "STARMAP_CATALOG",
        default_value = "data/stores.json"
    )]
    pub catalog: PathBuf,

    /// Only stores whose address contains this are imported
    #[arg(long, global = true, env = "STARMAP_CITY", default_value = "서울")]
    pub city: String,
}

impl Config {
    pub fn log(&self) {
        info!(catalog = %self.catalog.display(), city = %self.city, "configuration");
    }
}
