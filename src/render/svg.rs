//! SVG document writing for the map and for the load-failure message.

use anyhow::{Context, Result};
use std::io::Write;

use crate::choropleth::attributes::RenderAttributes;
use crate::choropleth::interaction::{HIGHLIGHT_STROKE, HIGHLIGHT_STROKE_WIDTH};
use crate::choropleth::legend::Legend;
use crate::data::topology::RegionGeometry;

/// Id of the root `<svg>` element.
pub const CANVAS_ID: &str = "canvas";
/// Text drawn in place of the map when the datasets could not be loaded.
pub const ERROR_MESSAGE: &str = "Something went wrong!";

const LEGEND_HEIGHT: f64 = 8.0;
const LEGEND_TOP: f64 = 40.0;

/// Everything drawn on a successful render.
pub struct MapDocument<'a> {
    pub width: f64,
    pub height: f64,
    pub regions: &'a [RenderAttributes],
    pub states: &'a [RegionGeometry],
    pub legend: &'a Legend,
}

/// Renders `doc` into a string.
pub fn map_to_string(doc: &MapDocument<'_>) -> Result<String> {
    let mut buffer = Vec::new();
    write_map(&mut buffer, doc)?;
    String::from_utf8(buffer).context("[render::svg] SVG output is not valid UTF-8")
}

/// Renders the failure document into a string.
pub fn error_to_string(width: f64, height: f64) -> Result<String> {
    let mut buffer = Vec::new();
    write_error(&mut buffer, width, height)?;
    String::from_utf8(buffer).context("[render::svg] SVG output is not valid UTF-8")
}

pub fn write_map<W: Write>(writer: &mut W, doc: &MapDocument<'_>) -> Result<()> {
    write_svg_header(writer, doc.width, doc.height)?;
    write_svg_styles(writer)?;

    writeln!(writer, r#"<g id="counties">"#)?;
    for region in doc.regions {
        write_region(writer, region)?;
    }
    writeln!(writer, "</g>")?;

    if !doc.states.is_empty() {
        writeln!(writer, r#"<g id="states">"#)?;
        for state in doc.states {
            writeln!(writer, r#"<path class="state" d="{}"/>"#, state.path_data)?;
        }
        writeln!(writer, "</g>")?;
    }

    write_legend(writer, doc.legend, doc.width)?;
    write_svg_footer(writer)
}

/// A blank canvas with [`ERROR_MESSAGE`] centered on it.
pub fn write_error<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    write_svg_header(writer, width, height)?;
    writeln!(
        writer,
        r#"<text x="{x}" y="{y}" text-anchor="middle">{ERROR_MESSAGE}</text>"#,
        x = width / 2.0,
        y = height / 2.0,
    )?;
    write_svg_footer(writer)
}

fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{CANVAS_ID}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    Ok(())
}

fn write_svg_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        r#"<defs>
<style>
    .county {{ stroke: none; }}
    .county:hover {{ stroke: {HIGHLIGHT_STROKE}; stroke-width: {HIGHLIGHT_STROKE_WIDTH}px; }}
    .state {{ fill: none; stroke: #ffffff; stroke-width: 1; stroke-linejoin: round; pointer-events: none; }}
    #legend text {{ font: 10px sans-serif; fill: #333333; }}
</style>
</defs>"#
    )?;
    Ok(())
}

fn write_region<W: Write>(writer: &mut W, region: &RenderAttributes) -> Result<()> {
    write!(
        writer,
        r#"<path class="county" data-fips="{}" fill="{}""#,
        region.region_id,
        region.fill.color()
    )?;
    if let Some(value) = region.attainment_percent {
        write!(writer, r#" data-education="{value}""#)?;
    }
    write!(writer, r#" d="{}">"#, region.path_data)?;
    if let Some(label) = &region.label {
        write!(writer, "<title>{}</title>", escape_xml(label))?;
    }
    writeln!(writer, "</path>")?;
    Ok(())
}

/// Draws the swatches on a linear scale from the domain min to max, with a
/// labelled tick at every threshold.
fn write_legend<W: Write>(writer: &mut W, legend: &Legend, canvas_width: f64) -> Result<()> {
    let (min, max) = legend.domain;
    let left = canvas_width * 0.625;
    let span = canvas_width * 0.27;
    let x = |value: f64| {
        if max > min {
            left + (value - min) / (max - min) * span
        } else {
            left
        }
    };

    writeln!(writer, r#"<g id="legend">"#)?;
    for swatch in &legend.swatches {
        let width = (x(swatch.upper_bound) - x(swatch.lower_bound)).max(0.0);
        if width == 0.0 {
            continue;
        }
        writeln!(
            writer,
            r#"<rect x="{:.2}" y="{LEGEND_TOP}" width="{width:.2}" height="{LEGEND_HEIGHT}" fill="{}"/>"#,
            x(swatch.lower_bound),
            swatch.color,
        )?;
    }
    let bottom = LEGEND_TOP + LEGEND_HEIGHT;
    for tick in &legend.ticks {
        let tx = x(tick.value);
        writeln!(
            writer,
            r##"<line x1="{tx:.2}" x2="{tx:.2}" y1="{LEGEND_TOP}" y2="{}" stroke="#000000"/>"##,
            bottom + 4.0,
        )?;
        writeln!(
            writer,
            r#"<text x="{tx:.2}" y="{}" text-anchor="middle">{}</text>"#,
            bottom + 16.0,
            escape_xml(&tick.label),
        )?;
    }
    writeln!(writer, "</g>")?;
    Ok(())
}

fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
