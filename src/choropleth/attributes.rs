//! Joins region geometries to their records and derives what each region is
//! drawn with.

use serde::Serialize;
use tracing::warn;

use crate::choropleth::classifier::ColorClassifier;
use crate::choropleth::index::AttainmentIndex;
use crate::choropleth::interaction::tooltip_text;
use crate::choropleth::palette::{NO_DATA_COLOR, Rgb};
use crate::data::records::RegionId;
use crate::data::topology::RegionGeometry;

/// How a region is filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    Class { bucket: usize, color: Rgb },
    /// The region has no attainment record.
    NoData,
}

impl Fill {
    pub fn color(&self) -> Rgb {
        match self {
            Fill::Class { color, .. } => *color,
            Fill::NoData => NO_DATA_COLOR,
        }
    }

    pub fn bucket(&self) -> Option<usize> {
        match self {
            Fill::Class { bucket, .. } => Some(*bucket),
            Fill::NoData => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderAttributes {
    pub region_id: RegionId,
    pub fill: Fill,
    pub attainment_percent: Option<f64>,
    /// Hover text, absent on a join miss.
    pub label: Option<String>,
    pub path_data: String,
}

impl RenderAttributes {
    pub fn is_join_miss(&self) -> bool {
        matches!(self.fill, Fill::NoData)
    }
}

pub struct RegionAttributeBuilder<'a> {
    index: &'a AttainmentIndex,
    classifier: &'a ColorClassifier,
}

impl<'a> RegionAttributeBuilder<'a> {
    pub fn new(index: &'a AttainmentIndex, classifier: &'a ColorClassifier) -> Self {
        Self { index, classifier }
    }

    /// Attributes for one region. A region without a record gets
    /// [`Fill::NoData`] and no value; it never fails.
    pub fn build(&self, geometry: &RegionGeometry) -> RenderAttributes {
        let Some(record) = self.index.lookup(geometry.region_id) else {
            warn!(region_id = geometry.region_id, "No attainment record for region");
            return RenderAttributes {
                region_id: geometry.region_id,
                fill: Fill::NoData,
                attainment_percent: None,
                label: None,
                path_data: geometry.path_data.clone(),
            };
        };

        let value = record.attainment_percent;
        let bucket = self.classifier.bucket_of(value);
        RenderAttributes {
            region_id: geometry.region_id,
            fill: Fill::Class {
                bucket,
                color: self.classifier.colors()[bucket],
            },
            attainment_percent: Some(value),
            label: Some(tooltip_text(record)),
            path_data: geometry.path_data.clone(),
        }
    }

    pub fn build_all(&self, geometries: &[RegionGeometry]) -> Vec<RenderAttributes> {
        geometries.iter().map(|g| self.build(g)).collect()
    }
}
