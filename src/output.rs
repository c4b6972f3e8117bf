//! Output formatting and persistence for render results.
//!
//! Supports pretty-printing and JSON logging of [`RenderStats`], CSV export of
//! per-region attributes, and writing SVG documents, optionally gzip-compressed.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::choropleth::{AttainmentIndex, RenderAttributes};
use crate::stats::RenderStats;

/// Logs render statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &RenderStats) {
    debug!("{:#?}", stats);
}

/// Logs render statistics as pretty-printed JSON.
pub fn print_json(stats: &RenderStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// One CSV row per drawn region.
#[derive(Debug, Serialize)]
struct AttributeRow<'a> {
    fips: u32,
    area_name: Option<&'a str>,
    state: Option<&'a str>,
    education: Option<f64>,
    bucket: Option<usize>,
    fill: String,
}

/// Writes the render attributes of every region to a CSV file, replacing any
/// existing file. Names come from `index`; they are empty on a join miss.
pub fn write_attributes_csv(
    path: &Path,
    regions: &[RenderAttributes],
    index: &AttainmentIndex,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for region in regions {
        let record = index.lookup(region.region_id);
        writer.serialize(AttributeRow {
            fips: region.region_id,
            area_name: record.map(|r| r.area_name.as_str()),
            state: record.map(|r| r.state_name.as_str()),
            education: region.attainment_percent,
            bucket: region.fill.bucket(),
            fill: region.fill.color().to_string(),
        })?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = regions.len(), "Attributes CSV written");
    Ok(())
}

/// Writes an SVG document to `path`, gzip-compressed when `gzip` is set.
pub fn write_svg(path: &Path, svg: &str, gzip: bool) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;

    if gzip {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(svg.as_bytes())?;
        encoder.finish()?.flush()?;
    } else {
        file.write_all(svg.as_bytes())?;
        file.flush()?;
    }

    info!(path = %path.display(), gzip, bytes = svg.len(), "SVG written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choropleth::{ColorClassifier, RegionAttributeBuilder};
    use crate::data::{AttainmentRecord, RegionGeometry};
    use flate2::read::GzDecoder;
    use std::fs;
    use std::io::Read;

    fn render() -> (AttainmentIndex, Vec<RenderAttributes>) {
        let index = AttainmentIndex::build(vec![AttainmentRecord {
            region_id: 1001,
            area_name: "Autauga County".to_string(),
            state_name: "AL".to_string(),
            attainment_percent: 24.4,
        }]);
        let classifier = ColorClassifier::build(index.values(), 9).unwrap();
        let geometries = vec![
            RegionGeometry { region_id: 1001, path_data: "M0,0Z".to_string() },
            RegionGeometry { region_id: 1003, path_data: "M1,1Z".to_string() },
        ];
        let regions = RegionAttributeBuilder::new(&index, &classifier).build_all(&geometries);
        (index, regions)
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&RenderStats::default());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&RenderStats::default()).unwrap();
    }

    #[test]
    fn test_write_attributes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attributes.csv");
        let (index, regions) = render();

        write_attributes_csv(&path, &regions, &index).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "fips,area_name,state,education,bucket,fill");
        assert!(lines[1].starts_with("1001,Autauga County,AL,24.4,"));
        assert_eq!(lines[2], "1003,,,,,#969696");
    }

    #[test]
    fn test_write_svg_plain_and_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("map.svg");
        let packed = dir.path().join("map.svgz");
        let svg = "<svg></svg>\n";

        write_svg(&plain, svg, false).unwrap();
        write_svg(&packed, svg, true).unwrap();

        assert_eq!(fs::read_to_string(&plain).unwrap(), svg);
        let mut decoded = String::new();
        GzDecoder::new(File::open(&packed).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, svg);
    }
}
