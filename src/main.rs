use std::{io, path::PathBuf};

use _model::{label, StoreId, StoreView};
use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use starmap::{
    address,
    catalog::{listing, Catalog, StoreFilter},
    spatial::{self, SpatialResolver},
    Config,
};

#[derive(Debug, Parser)]
#[command(about = "Track visits to Starbucks stores in Seoul")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replace the catalog with a store listing (CSV), keeping visited flags
    Import { listing: PathBuf },
    /// Refine neighborhoods from a GeoJSON file of boundaries
    Refine {
        boundaries: PathBuf,
        #[arg(long, default_value = "adm_nm")]
        label_property: String,
    },
    /// Store counts per district, or per neighborhood of one district
    Stats {
        #[arg(long)]
        district: Option<String>,
    },
    /// Stores in a district and/or neighborhood
    Stores {
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        neighborhood: Option<String>,
    },
    /// Mark a store as visited
    Visit {
        code: StoreId,
        #[arg(long)]
        unvisit: bool,
    },
    /// Stores the address rules could not place
    Unclassified,
    /// Show how one address is parsed
    Parse { address: String },
}

#[derive(Serialize)]
struct UnclassifiedStore<'a> {
    #[serde(flatten)]
    store: StoreView<'a>,
    suggestion: Option<&'static str>,
}

#[derive(Serialize)]
struct Parsed<'a> {
    gu: &'a str,
    dong: &'a str,
    district_hint: Option<&'a str>,
    suggestion: Option<&'static str>,
}

fn print(value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(io::stdout().lock(), value)?;
    println!();
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("starmap=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;
    config.log();

    let mut catalog = Catalog::open(&config.catalog).context("failed to open catalog")?;
    debug!(stores = catalog.len(), "catalog opened");

    match cli.command {
        Command::Import { listing: path } => {
            let rows = listing::load(&path)?;
            info!(rows = rows.len(), path = %path.display(), "listing read");
            catalog
                .reload(rows, &config.city)
                .context("failed to import listing")?;
        }
        Command::Refine {
            boundaries,
            label_property,
        } => {
            let resolver = SpatialResolver::new(spatial::load(&boundaries, &label_property)?);
            ensure!(
                !resolver.is_empty(),
                "no {label_property} boundaries in {}",
                boundaries.display()
            );
            info!(regions = resolver.len(), "boundaries loaded");
            catalog
                .refine(&resolver)
                .context("failed to refine neighborhoods")?;
        }
        Command::Stats { district: None } => print(&catalog.district_stats())?,
        Command::Stats {
            district: Some(district),
        } => print(&catalog.neighborhood_stats(&district))?,
        Command::Stores {
            district,
            neighborhood,
        } => {
            let filter = StoreFilter {
                district,
                neighborhood,
            };
            let stores: Vec<_> = catalog.stores(&filter).into_iter().map(|x| x.view()).collect();
            print(&stores)?;
        }
        Command::Visit { code, unvisit } => {
            let count = catalog
                .set_visited(code, !unvisit)
                .with_context(|| format!("failed to update store {code}"))?;
            if count == 0 {
                warn!(%code, "no store with this code");
            } else {
                info!(%code, visited = !unvisit, count, "store updated");
            }
        }
        Command::Unclassified => {
            let stores: Vec<_> = catalog
                .unclassified()
                .into_iter()
                .map(|x| UnclassifiedStore {
                    store: x.view(),
                    suggestion: address::suggest(&x.address),
                })
                .collect();
            info!(count = stores.len(), "unclassified stores");
            print(&stores)?;
        }
        Command::Parse { address: text } => {
            let location = address::parse(&text);
            print(&Parsed {
                gu: label(&location.district),
                dong: label(&location.neighborhood),
                district_hint: address::district_hint(&text),
                suggestion: address::suggest(&text),
            })?;
        }
    }

    Ok(())
}
