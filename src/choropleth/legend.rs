//! Legend swatches and axis labels derived from a classifier.

use serde::Serialize;

use crate::choropleth::classifier::ColorClassifier;
use crate::choropleth::palette::Rgb;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSwatch {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendTick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub swatches: Vec<LegendSwatch>,
    pub ticks: Vec<LegendTick>,
    pub domain: (f64, f64),
}

pub struct LegendBuilder;

impl LegendBuilder {
    /// One swatch per color class, in palette order, and one tick per threshold.
    pub fn build(classifier: &ColorClassifier) -> Legend {
        let swatches = classifier
            .colors()
            .iter()
            .filter_map(|&color| {
                let (lower_bound, upper_bound) = classifier.invert_extent(color)?;
                Some(LegendSwatch {
                    lower_bound,
                    upper_bound,
                    color,
                })
            })
            .collect();

        let ticks = classifier
            .thresholds()
            .iter()
            .map(|&value| LegendTick {
                value,
                label: percent_label(value),
            })
            .collect();

        Legend {
            swatches,
            ticks,
            domain: classifier.domain(),
        }
    }
}

/// Rounds to a whole percent: `24.6` becomes `"25%"`.
pub fn percent_label(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatches_cover_domain_in_order() {
        let classifier = ColorClassifier::build([2.6, 75.1], 9).unwrap();
        let legend = LegendBuilder::build(&classifier);

        assert_eq!(legend.swatches.len(), 9);
        assert_eq!(legend.swatches[0].lower_bound, 2.6);
        assert_eq!(legend.swatches[8].upper_bound, 75.1);
        for pair in legend.swatches.windows(2) {
            assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
        }
        let colors: Vec<_> = legend.swatches.iter().map(|s| s.color).collect();
        assert_eq!(colors, classifier.colors());
    }

    #[test]
    fn test_tick_labels_rounded_percent() {
        let classifier = ColorClassifier::build([2.6, 75.1], 9).unwrap();
        let legend = LegendBuilder::build(&classifier);
        let labels: Vec<_> = legend.ticks.iter().map(|t| t.label.as_str()).collect();

        assert_eq!(
            labels,
            ["3%", "12%", "21%", "30%", "39%", "48%", "57%", "66%"]
        );
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(0.4), "0%");
        assert_eq!(percent_label(24.5), "25%");
        assert_eq!(percent_label(100.0), "100%");
    }
}
