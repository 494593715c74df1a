use std::collections::BTreeMap;

use _model::{classified, DistrictStats, NeighborhoodStats, StoreRecord};
use itertools::Itertools;

use super::Catalog;

/// Store query by district and/or neighborhood. Values are labels as the
/// front end sends them, so `미분류` selects unclassified stores.
#[derive(Clone, Debug, Default)]
pub struct StoreFilter {
    pub district: Option<String>,
    pub neighborhood: Option<String>,
}

impl StoreFilter {
    pub fn district(district: impl Into<String>) -> Self {
        Self {
            district: Some(district.into()),
            neighborhood: None,
        }
    }

    pub fn matches(&self, store: &StoreRecord) -> bool {
        let field = |wanted: &Option<String>, actual: &Option<String>| match wanted {
            Some(x) => classified(x) == actual.as_deref(),
            None => true,
        };
        field(&self.district, &store.district) && field(&self.neighborhood, &store.neighborhood)
    }
}

#[derive(Default)]
struct Tally {
    total: usize,
    visited: usize,
}

impl Tally {
    fn add(&mut self, store: &StoreRecord) {
        self.total += 1;
        self.visited += store.visited as usize;
    }
}

impl Catalog {
    /// Matching stores ordered by district, neighborhood and name.
    pub fn stores(&self, filter: &StoreFilter) -> Vec<&StoreRecord> {
        self.all()
            .iter()
            .filter(|x| filter.matches(x))
            .sorted_by(|a, b| {
                (a.district_label(), a.neighborhood_label(), &a.name).cmp(&(
                    b.district_label(),
                    b.neighborhood_label(),
                    &b.name,
                ))
            })
            .collect()
    }

    pub fn district_stats(&self) -> Vec<DistrictStats> {
        let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
        for store in self.all() {
            tallies.entry(store.district_label()).or_default().add(store);
        }

        tallies
            .into_iter()
            .map(|(gu, tally)| DistrictStats {
                gu: gu.to_string(),
                total_stores: tally.total,
                visited_stores: tally.visited,
            })
            .collect()
    }

    /// Per-neighborhood counts inside one district.
    pub fn neighborhood_stats(&self, district: &str) -> Vec<NeighborhoodStats> {
        let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
        for store in self.stores(&StoreFilter::district(district)) {
            tallies
                .entry(store.neighborhood_label())
                .or_default()
                .add(store);
        }

        tallies
            .into_iter()
            .map(|(dong, tally)| NeighborhoodStats {
                gu: district.to_string(),
                dong: dong.to_string(),
                total_stores: tally.total,
                visited_stores: tally.visited,
            })
            .collect()
    }

    /// Stores missing a district or a neighborhood.
    pub fn unclassified(&self) -> Vec<&StoreRecord> {
        self.all().iter().filter(|x| !x.is_classified()).collect()
    }
}
