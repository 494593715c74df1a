use serde::{Deserialize, Serialize};

mod id;
mod store;

pub use id::StoreId;
pub use store::{DistrictStats, NeighborhoodStats, StoreRecord, StoreView};

/// How an unclassified district or neighborhood is shown to the front end.
pub const UNCLASSIFIED: &str = "미분류";

/// District and neighborhood of a store. `None` means extraction failed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub district: Option<String>,
    pub neighborhood: Option<String>,
}

impl Location {
    pub fn new(district: Option<&str>, neighborhood: Option<&str>) -> Self {
        Self {
            district: district.map(str::to_string),
            neighborhood: neighborhood.map(str::to_string),
        }
    }
}

pub fn label(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNCLASSIFIED)
}

/// Reads a label coming back from the front end, mapping the sentinel to `None`.
pub fn classified(label: &str) -> Option<&str> {
    match label {
        UNCLASSIFIED => None,
        x => Some(x),
    }
}
