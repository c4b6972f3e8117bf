//! Region id to record lookup, built once per dataset.

use std::collections::HashMap;
use tracing::debug;

use crate::data::records::{AttainmentRecord, RegionId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttainmentIndex {
    records: HashMap<RegionId, AttainmentRecord>,
    duplicates: usize,
}

impl AttainmentIndex {
    /// Indexes `records` by region id. When an id repeats, the later record wins.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AttainmentRecord>,
    {
        let mut index = Self::default();
        for record in records {
            let region_id = record.region_id;
            if index.records.insert(region_id, record).is_some() {
                debug!(region_id, "Duplicate record replaced");
                index.duplicates += 1;
            }
        }
        index
    }

    pub fn lookup(&self, region_id: RegionId) -> Option<&AttainmentRecord> {
        self.records.get(&region_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of input records that overwrote an earlier one.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.values().map(|r| r.attainment_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region_id: RegionId, pct: f64) -> AttainmentRecord {
        AttainmentRecord {
            region_id,
            area_name: format!("County {region_id}"),
            state_name: "XX".to_string(),
            attainment_percent: pct,
        }
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let index = AttainmentIndex::build(vec![record(1, 10.0), record(2, 20.0)]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup(2).unwrap().attainment_percent, 20.0);
        assert!(index.lookup(3).is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let index = AttainmentIndex::build(vec![record(1, 10.0), record(1, 99.0)]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.duplicates(), 1);
        assert_eq!(index.lookup(1).unwrap().attainment_percent, 99.0);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let records = vec![record(5, 1.0), record(7, 2.0), record(5, 3.0)];
        let first = AttainmentIndex::build(records.clone());
        let second = AttainmentIndex::build(records);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_index() {
        let index = AttainmentIndex::build(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.values().count(), 0);
    }
}
