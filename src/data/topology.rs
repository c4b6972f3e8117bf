//! TopoJSON topology model and conversion of its polygon objects into
//! per-region SVG path data (data source B).
//!
//! Only the parts of the format used by the county map are modelled: an
//! optional quantization transform, the shared arc table, and `Polygon` /
//! `MultiPolygon` geometries (possibly nested in `GeometryCollection`s).
//! Coordinates are emitted as-is, so the topology is expected to be
//! pre-projected into canvas space.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::data::records::RegionId;
use crate::error::{MapError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<Transform>,
    pub arcs: Vec<Vec<Vec<f64>>>,
    pub objects: HashMap<String, GeometryObject>,
}

/// Quantization transform: positions are delta-encoded integers when present.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryObject {
    GeometryCollection {
        geometries: Vec<GeometryObject>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        id: Option<Value>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        id: Option<Value>,
    },
    #[serde(other)]
    Unsupported,
}

/// A region's shape, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    pub region_id: RegionId,
    /// SVG path `d` attribute.
    pub path_data: String,
}

/// Decodes a topology document.
pub fn parse_topology(bytes: &[u8]) -> Result<Topology> {
    serde_json::from_slice(bytes).map_err(|e| MapError::Parse {
        source_name: "topology",
        message: e.to_string(),
    })
}

/// Turns named topology objects into [`RegionGeometry`] values.
///
/// Arcs are decoded once on construction and shared by every object
/// extracted afterwards.
pub struct GeometryExtractor<'a> {
    topology: &'a Topology,
    arcs: Vec<Vec<[f64; 2]>>,
}

impl<'a> GeometryExtractor<'a> {
    pub fn new(topology: &'a Topology) -> Self {
        let arcs = topology
            .arcs
            .iter()
            .map(|arc| decode_arc(arc, topology.transform.as_ref()))
            .collect();
        Self { topology, arcs }
    }

    /// Extracts every polygonal geometry under `object_name`, in document order.
    ///
    /// Geometries without a usable numeric id are skipped with a warning, since
    /// they cannot be joined to any record.
    pub fn extract(&self, object_name: &str) -> Result<Vec<RegionGeometry>> {
        let object = self
            .topology
            .objects
            .get(object_name)
            .ok_or_else(|| MapError::MissingObject(object_name.to_string()))?;

        let mut regions = Vec::new();
        self.collect(object, &mut regions)?;
        debug!(object_name, regions = regions.len(), "Extracted region geometries");
        Ok(regions)
    }

    fn collect(&self, object: &GeometryObject, out: &mut Vec<RegionGeometry>) -> Result<()> {
        match object {
            GeometryObject::GeometryCollection { geometries } => {
                for geometry in geometries {
                    self.collect(geometry, out)?;
                }
            }
            GeometryObject::Polygon { arcs, id } => {
                if let Some(region_id) = region_id_of(id.as_ref()) {
                    let path_data = self.polygon_path(arcs)?;
                    out.push(RegionGeometry { region_id, path_data });
                }
            }
            GeometryObject::MultiPolygon { arcs, id } => {
                if let Some(region_id) = region_id_of(id.as_ref()) {
                    let mut path_data = String::new();
                    for polygon in arcs {
                        path_data.push_str(&self.polygon_path(polygon)?);
                    }
                    out.push(RegionGeometry { region_id, path_data });
                }
            }
            GeometryObject::Unsupported => {}
        }
        Ok(())
    }

    fn polygon_path(&self, rings: &[Vec<i64>]) -> Result<String> {
        let mut path = String::new();
        for ring in rings {
            let points = self.stitch_ring(ring)?;
            let Some((first, rest)) = points.split_first() else {
                continue;
            };
            path.push_str(&format!("M{},{}", coord(first[0]), coord(first[1])));
            for point in rest {
                path.push_str(&format!("L{},{}", coord(point[0]), coord(point[1])));
            }
            path.push('Z');
        }
        Ok(path)
    }

    /// Concatenates the arcs of one ring. Consecutive arcs share an endpoint,
    /// so the first point of every arc after the first is dropped. A negative
    /// index `!i` means arc `i` traversed backwards.
    fn stitch_ring(&self, ring: &[i64]) -> Result<Vec<[f64; 2]>> {
        let mut points: Vec<[f64; 2]> = Vec::new();
        for &index in ring {
            let (arc_index, reversed) = if index < 0 { (!index, true) } else { (index, false) };
            let arc = usize::try_from(arc_index)
                .ok()
                .and_then(|i| self.arcs.get(i))
                .ok_or_else(|| MapError::Parse {
                    source_name: "topology",
                    message: format!("arc index {index} out of range"),
                })?;

            let skip = usize::from(!points.is_empty());
            if reversed {
                points.extend(arc.iter().rev().skip(skip));
            } else {
                points.extend(arc.iter().skip(skip));
            }
        }
        Ok(points)
    }
}

fn decode_arc(arc: &[Vec<f64>], transform: Option<&Transform>) -> Vec<[f64; 2]> {
    let positions = arc.iter().filter(|p| p.len() >= 2);
    match transform {
        Some(t) => {
            let (mut x, mut y) = (0.0, 0.0);
            positions
                .map(|p| {
                    x += p[0];
                    y += p[1];
                    [x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1]]
                })
                .collect()
        }
        None => positions.map(|p| [p[0], p[1]]).collect(),
    }
}

fn region_id_of(id: Option<&Value>) -> Option<RegionId> {
    let parsed = match id {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| RegionId::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        warn!(id = ?id, "Skipping geometry without a numeric region id");
    }
    parsed
}

/// Formats a coordinate with at most three decimals.
fn coord(value: f64) -> f64 {
    // Adding 0.0 folds -0.0 into 0.0.
    (value * 1000.0).round() / 1000.0 + 0.0
}
