use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::choropleth::{AttainmentIndex, ColorClassifier, RenderAttributes};

/// Summary of one render: how well the datasets joined and how values spread
/// over the color classes.
#[derive(Debug, Default, Serialize)]
pub struct RenderStats {
    pub timestamp: DateTime<Utc>,
    pub records: usize,
    pub duplicate_records: usize,
    pub regions: usize,
    pub matched_regions: usize,
    pub join_misses: usize,
    /// Records whose region never appears in the topology.
    pub records_without_region: usize,
    pub domain_min: f64,
    pub domain_max: f64,
    pub thresholds: Vec<f64>,
    /// Matched regions per color class.
    pub bucket_counts: Vec<usize>,
}

impl RenderStats {
    pub fn from_render(
        index: &AttainmentIndex,
        classifier: &ColorClassifier,
        regions: &[RenderAttributes],
    ) -> Self {
        let (domain_min, domain_max) = classifier.domain();
        let mut s = RenderStats {
            timestamp: Utc::now(),
            records: index.len(),
            duplicate_records: index.duplicates(),
            regions: regions.len(),
            domain_min,
            domain_max,
            thresholds: classifier.thresholds().to_vec(),
            bucket_counts: vec![0; classifier.bucket_count()],
            ..Default::default()
        };

        let mut seen = HashSet::new();
        for region in regions {
            match region.fill.bucket() {
                Some(bucket) => {
                    s.matched_regions += 1;
                    s.bucket_counts[bucket] += 1;
                    seen.insert(region.region_id);
                }
                None => s.join_misses += 1,
            }
        }
        s.records_without_region = index.len().saturating_sub(seen.len());

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn match_pct(&self) -> f64 {
        Self::pct(self.matched_regions, self.regions)
    }
}
