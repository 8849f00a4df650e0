//! Region reference data

use std::sync::Arc;

use super::EventStore;
use crate::error::StoreError;
use crate::types::Region;

/// Counts from a seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub updated: usize,
    pub removed: usize,
}

impl EventStore {
    /// All regions in seed order
    pub fn regions(&self) -> Vec<Region> {
        self.read(|data| data.regions.to_vec())
    }

    /// Make the region collection equal `seed`
    ///
    /// Upserts keyed by region id and drops ids outside the seed, so running
    /// it on every boot is a no-op once the collection matches. Order follows
    /// `seed`.
    pub fn seed_regions(&self, seed: &[Region]) -> Result<SeedReport, StoreError> {
        let unchanged = self.read(|data| data.regions.as_slice() == seed);
        if unchanged {
            return Ok(SeedReport::default());
        }

        self.mutate(|data| {
            let mut report = SeedReport::default();
            let mut next = Vec::with_capacity(seed.len());

            for region in seed {
                if next.iter().any(|r: &Region| r.id == region.id) {
                    tracing::warn!(id = %region.id, name = %region.name, "ignoring region with duplicate id");
                    continue;
                }
                match data.regions.iter().find(|r| r.id == region.id) {
                    Some(existing) if existing == region => {}
                    Some(_) => report.updated += 1,
                    None => report.inserted += 1,
                }
                next.push(region.clone());
            }

            report.removed = data
                .regions
                .iter()
                .filter(|r| !next.iter().any(|n| n.id == r.id))
                .count();
            data.regions = Arc::new(next);
            Ok(report)
        })
    }
}
