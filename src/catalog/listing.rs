use std::{fs::File, io::Read, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// One row of the store listing export. Headers may be Korean or English.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ListingRow {
    #[serde(alias = "매장명", alias = "store_name")]
    pub name: String,
    #[serde(alias = "주소", default)]
    pub address: Option<String>,
    #[serde(
        alias = "매장코드",
        alias = "code",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub store_code: Option<u32>,
    #[serde(
        alias = "위도",
        alias = "lat",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub latitude: Option<f64>,
    #[serde(
        alias = "경도",
        alias = "lng",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub longitude: Option<f64>,
}

impl ListingRow {
    pub fn in_city(&self, city: &str) -> bool {
        self.address.as_deref().is_some_and(|x| x.contains(city))
    }
}

pub fn load(path: &Path) -> Result<Vec<ListingRow>> {
    let file =
        File::open(path).with_context(|| format!("failed to open listing {}", path.display()))?;
    read(file).with_context(|| format!("failed to read listing {}", path.display()))
}

/// Reads every usable row; rows that cannot be decoded at all are logged and
/// skipped.
pub fn read(reader: impl Read) -> Result<Vec<ListingRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut rows = Vec::new();
    for (index, row) in reader.deserialize::<ListingRow>().enumerate() {
        match row {
            Ok(row) if row.name.trim().is_empty() => {
                warn!(line = index + 2, "listing row has no store name, skipping");
            }
            Ok(mut row) => {
                row.address = row.address.filter(|x| !x.trim().is_empty());
                rows.push(row);
            }
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => warn!(line = index + 2, %err, "malformed listing row, skipping"),
        }
    }
    Ok(rows)
}
