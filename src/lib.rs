pub mod address;
pub mod catalog;
pub mod config;
pub mod spatial;
mod utils;

pub use catalog::{Catalog, CatalogError, StoreFilter};
pub use config::Config;
pub use spatial::{Region, SpatialResolver};
