use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use crate::engine::{normalize, resolve_overlaps};

use super::super::ViewModel;

impl ViewModel {
    // Normalization and overlap resolution both finish here before any
    // position reaches the painter; the map never shows a half-built pass.
    pub(in crate::app) fn rebuild_layout(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.seed);

        match normalize(&self.dataset.records, &self.layout, &mut rng) {
            Ok(mut entities) => {
                self.resolver_passes =
                    resolve_overlaps(&mut entities, &self.layout, &self.collision);
                self.entities = entities;
            }
            Err(error) => {
                warn!(%error, "record slipped past sanitization; showing empty map");
                self.entities.clear();
                self.resolver_passes = 0;
            }
        }

        self.selection.clear();
        self.layout_dirty = false;
    }
}
