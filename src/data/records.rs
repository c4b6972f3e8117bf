//! Education attainment records (data source A).

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// Numeric region identifier shared by both datasets (county FIPS code).
pub type RegionId = u32;

/// One county's educational attainment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttainmentRecord {
    #[serde(rename = "fips")]
    pub region_id: RegionId,
    pub area_name: String,
    #[serde(rename = "state")]
    pub state_name: String,
    /// Share of adults holding a bachelor's degree or higher, in percent.
    #[serde(rename = "bachelorsOrHigher")]
    pub attainment_percent: f64,
}

/// Decodes the education dataset: a JSON array of records.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<AttainmentRecord>> {
    serde_json::from_slice(bytes).map_err(|e| MapError::Parse {
        source_name: "education data",
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_maps_source_fields() {
        let json = br#"[
            {"fips": 1001, "state": "AL", "area_name": "Autauga County", "bachelorsOrHigher": 24.4},
            {"fips": 1003, "state": "AL", "area_name": "Baldwin County", "bachelorsOrHigher": 29.5}
        ]"#;
        let records = parse_records(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region_id, 1001);
        assert_eq!(records[0].area_name, "Autauga County");
        assert_eq!(records[0].state_name, "AL");
        assert_eq!(records[1].attainment_percent, 29.5);
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let err = parse_records(br#"{"fips": 1}"#).unwrap_err();
        assert!(matches!(err, MapError::Parse { source_name: "education data", .. }));
    }

    #[test]
    fn test_parse_records_rejects_missing_field() {
        let json = br#"[{"fips": 1001, "state": "AL", "area_name": "Autauga County"}]"#;
        assert!(parse_records(json).is_err());
    }
}
