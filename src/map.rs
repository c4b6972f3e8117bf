//! End-to-end assembly of a choropleth from loaded datasets.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

use crate::choropleth::{
    AttainmentIndex, ColorClassifier, Legend, LegendBuilder, RegionAttributeBuilder,
    RenderAttributes,
};
use crate::data::{DatasetLoader, Datasets, GeometryExtractor, RegionGeometry};
use crate::error::MapError;
use crate::fetch::HttpClient;
use crate::output::write_svg;
use crate::render::{MapDocument, error_to_string, map_to_string};
use crate::stats::RenderStats;

pub const COUNTIES_OBJECT: &str = "counties";
pub const STATES_OBJECT: &str = "states";

/// A fully joined and classified map, ready to be written out.
#[derive(Debug, Clone)]
pub struct ChoroplethMap {
    pub index: AttainmentIndex,
    pub classifier: ColorClassifier,
    pub regions: Vec<RenderAttributes>,
    /// State outlines; empty when the topology has none.
    pub states: Vec<RegionGeometry>,
    pub legend: Legend,
}

impl ChoroplethMap {
    /// Indexes the records, classifies their values into `bucket_count`
    /// classes and builds the attributes of every county.
    pub fn build(datasets: Datasets, bucket_count: usize) -> Result<Self> {
        let Datasets { records, topology } = datasets;

        let extractor = GeometryExtractor::new(&topology);
        let counties = extractor.extract(COUNTIES_OBJECT)?;
        let states = match extractor.extract(STATES_OBJECT) {
            Ok(states) => states,
            Err(MapError::MissingObject(_)) => {
                debug!("Topology has no state outlines");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        // The range covers every record, including ones a later duplicate replaces.
        let classifier =
            ColorClassifier::build(records.iter().map(|r| r.attainment_percent), bucket_count)
                .context("failed to classify attainment values")?;
        let index = AttainmentIndex::build(records);
        let regions = RegionAttributeBuilder::new(&index, &classifier).build_all(&counties);
        let legend = LegendBuilder::build(&classifier);

        let misses = regions.iter().filter(|r| r.is_join_miss()).count();
        info!(
            regions = regions.len(),
            records = index.len(),
            join_misses = misses,
            "Map assembled"
        );

        Ok(Self {
            index,
            classifier,
            regions,
            states,
            legend,
        })
    }

    pub fn to_svg(&self, width: f64, height: f64) -> Result<String> {
        map_to_string(&MapDocument {
            width,
            height,
            regions: &self.regions,
            states: &self.states,
            legend: &self.legend,
        })
    }

    pub fn stats(&self) -> RenderStats {
        RenderStats::from_render(&self.index, &self.classifier, &self.regions)
    }
}

/// Where and how large the rendered document is.
#[derive(Debug, Clone, Copy)]
pub struct SvgTarget<'a> {
    pub path: &'a Path,
    pub width: f64,
    pub height: f64,
    pub gzip: bool,
}

/// Loads both datasets, assembles the map and writes it to `target`.
///
/// Loading, parsing and assembly are one fallible step: if any of them fails,
/// the error document is written instead of a partial map and the error is
/// returned.
#[tracing::instrument(skip(loader, target), fields(output = %target.path.display()))]
pub async fn render_to_file<C: HttpClient>(
    loader: &DatasetLoader<C>,
    bucket_count: usize,
    target: SvgTarget<'_>,
) -> Result<ChoroplethMap> {
    let assembled = async {
        let map = ChoroplethMap::build(loader.load().await?, bucket_count)?;
        let svg = map.to_svg(target.width, target.height)?;
        Ok::<_, anyhow::Error>((map, svg))
    }
    .await;

    match assembled {
        Ok((map, svg)) => {
            write_svg(target.path, &svg, target.gzip)?;
            Ok(map)
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Failed to build map");
            let svg = error_to_string(target.width, target.height)?;
            write_svg(target.path, &svg, target.gzip)?;
            Err(e)
        }
    }
}
