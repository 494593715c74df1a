//! Neighborhood lookup by point-in-polygon containment.

use geo::{BoundingRect, Contains, Intersects, MultiPolygon, Point, Rect};

use crate::address;

mod boundaries;

pub use boundaries::{load, parse};

/// An administrative boundary labelled with its fully qualified name, e.g.
/// "서울특별시 노원구 월계1동".
#[derive(Debug, Clone)]
pub struct Region {
    label: String,
    shape: MultiPolygon<f64>,
    bounds: Option<Rect<f64>>,
}

impl Region {
    pub fn new(label: impl Into<String>, shape: impl Into<MultiPolygon<f64>>) -> Self {
        let shape = shape.into();
        Self {
            label: label.into(),
            bounds: shape.bounding_rect(),
            shape,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Last segment of the label, numbered forms kept ("월계1동").
    pub fn neighborhood(&self) -> &str {
        self.label.split_whitespace().last().unwrap_or(&self.label)
    }

    /// Strict containment: points on the boundary are outside.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        match self.bounds {
            Some(bounds) => {
                point.intersects(&bounds) && self.shape.iter().any(|x| x.contains(point))
            }
            None => false,
        }
    }
}

pub struct SpatialResolver {
    regions: Vec<Region>,
}

impl SpatialResolver {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// First region containing `point` (x = longitude, y = latitude).
    ///
    /// Regions whose label mentions `district` are tried first; the rest are
    /// still tried afterwards, so a wrong district only costs time.
    pub fn resolve(&self, point: Point<f64>, district: Option<&str>) -> Option<&Region> {
        let hinted = |x: &&Region| district.map_or(true, |d| x.label.contains(d));
        self.regions
            .iter()
            .filter(hinted)
            .chain(self.regions.iter().filter(|x| !hinted(x)))
            .find(|x| x.contains(&point))
    }

    /// Neighborhood for a store's coordinates, using its address for the
    /// district hint.
    pub fn locate(&self, latitude: f64, longitude: f64, address: &str) -> Option<&str> {
        self.resolve(
            Point::new(longitude, latitude),
            address::district_hint(address),
        )
        .map(Region::neighborhood)
    }
}
