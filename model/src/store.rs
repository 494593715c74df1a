use serde::{Deserialize, Serialize};
use serde_with::{serde_as, BoolFromInt};

use crate::{label, Location, StoreId};

#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: StoreId,
    pub name: String,
    pub district: Option<String>,
    pub neighborhood: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: String,
    #[serde_as(as = "BoolFromInt")]
    #[serde(default)]
    pub visited: bool,
}

impl StoreRecord {
    pub fn new(name: String, address: String, location: Location) -> Self {
        Self {
            id: StoreId::from_name(&name),
            name,
            district: location.district,
            neighborhood: location.neighborhood,
            latitude: None,
            longitude: None,
            address,
            visited: false,
        }
    }

    pub fn with_coordinates(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Both coordinates, as `(latitude, longitude)`.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    pub fn is_classified(&self) -> bool {
        self.district.is_some() && self.neighborhood.is_some()
    }

    pub fn district_label(&self) -> &str {
        label(&self.district)
    }

    pub fn neighborhood_label(&self) -> &str {
        label(&self.neighborhood)
    }

    pub fn view(&self) -> StoreView<'_> {
        StoreView {
            store_name: &self.name,
            store_code: self.id,
            gu: self.district_label(),
            dong: self.neighborhood_label(),
            lat: self.latitude,
            lng: self.longitude,
            address: &self.address,
            visited: self.visited as u8,
        }
    }
}

/// A store as the map front end expects it.
#[derive(Debug, Serialize)]
pub struct StoreView<'a> {
    pub store_name: &'a str,
    pub store_code: StoreId,
    pub gu: &'a str,
    pub dong: &'a str,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: &'a str,
    pub visited: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DistrictStats {
    pub gu: String,
    pub total_stores: usize,
    pub visited_stores: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NeighborhoodStats {
    pub gu: String,
    pub dong: String,
    pub total_stores: usize,
    pub visited_stores: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StoreRecord {
        StoreRecord::new(
            "광화문".to_string(),
            "서울특별시 종로구 세종대로 172".to_string(),
            Location::new(Some("종로구"), None),
        )
    }

    #[test]
    fn visited_is_stored_as_int() {
        let mut store = record();
        store.visited = true;
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["visited"], 1);

        let back: StoreRecord = serde_json::from_value(json).unwrap();
        assert!(back.visited);
    }

    #[test]
    fn visited_defaults_to_false() {
        let json = serde_json::json!({
            "id": 1,
            "name": "x",
            "district": null,
            "neighborhood": null,
            "latitude": null,
            "longitude": null,
            "address": "서울",
        });
        let store: StoreRecord = serde_json::from_value(json).unwrap();
        assert!(!store.visited);
    }

    #[test]
    fn view_renders_sentinel() {
        let store = record().with_coordinates(Some(37.57), Some(126.97));
        let view = serde_json::to_value(store.view()).unwrap();
        assert_eq!(view["gu"], "종로구");
        assert_eq!(view["dong"], "미분류");
        assert_eq!(view["store_code"], 128419);
        assert_eq!(view["lng"], 126.97);
        assert_eq!(view["visited"], 0);
    }

    #[test]
    fn coordinates_need_both() {
        assert_eq!(record().coordinates(), None);
        assert_eq!(
            record().with_coordinates(Some(37.5), None).coordinates(),
            None
        );
        assert_eq!(
            record()
                .with_coordinates(Some(37.5), Some(127.0))
                .coordinates(),
            Some((37.5, 127.0))
        );
    }
}
