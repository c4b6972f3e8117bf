//! Threshold classification of attainment values into color classes.
//!
//! The value domain `[min, max]` is cut into `bucket_count - 1` evenly spaced
//! thresholds starting at `min`. A value falls in bucket `i` when
//! `thresholds[i - 1] <= value < thresholds[i]`; values at or above the last
//! threshold fall in the last bucket, values below `min` in the first.

use crate::choropleth::palette::{Rgb, greens};
use crate::error::{MapError, Result};

/// Width given to the domain when every value is identical, so that the
/// thresholds stay strictly increasing.
const DEGENERATE_SPAN: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorClassifier {
    thresholds: Vec<f64>,
    colors: Vec<Rgb>,
    min: f64,
    max: f64,
}

impl ColorClassifier {
    pub const DEFAULT_BUCKETS: usize = 9;

    /// Builds a classifier over the range of `values`. Non-finite values are
    /// ignored.
    ///
    /// # Errors
    ///
    /// [`MapError::EmptyDomain`] when no finite value is given, and
    /// [`MapError::UnsupportedBucketCount`] when no palette has
    /// `bucket_count` colors.
    pub fn build<I>(values: I, bucket_count: usize) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let colors = greens(bucket_count).ok_or(MapError::UnsupportedBucketCount(bucket_count))?;

        let (min, mut max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .ok_or(MapError::EmptyDomain)?;

        if max <= min {
            max = min + DEGENERATE_SPAN;
        }

        let step = (max - min) / (bucket_count - 1) as f64;
        let thresholds = (0..bucket_count - 1).map(|i| min + i as f64 * step).collect();

        Ok(Self {
            thresholds,
            colors,
            min,
            max,
        })
    }

    /// Index of the bucket holding `value`.
    pub fn bucket_of(&self, value: f64) -> usize {
        self.thresholds.partition_point(|&t| t <= value)
    }

    pub fn classify(&self, value: f64) -> Rgb {
        self.colors[self.bucket_of(value)]
    }

    /// Value range of bucket `bucket`, with the open ends of the first and
    /// last buckets closed at the domain bounds.
    pub fn extent(&self, bucket: usize) -> Option<(f64, f64)> {
        if bucket >= self.colors.len() {
            return None;
        }
        let lower = match bucket {
            0 => self.min,
            i => self.thresholds[i - 1],
        };
        let upper = self.thresholds.get(bucket).copied().unwrap_or(self.max);
        Some((lower, upper))
    }

    /// Value range mapped to `color`, or `None` if the color is not in the palette.
    pub fn invert_extent(&self, color: Rgb) -> Option<(f64, f64)> {
        let bucket = self.colors.iter().position(|&c| c == color)?;
        self.extent(bucket)
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn bucket_count(&self) -> usize {
        self.colors.len()
    }

    /// `(min, max)` of the classified values, widened if they were all equal.
    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tens() -> ColorClassifier {
        let values = (1..=9).map(|i| f64::from(i) * 10.0);
        ColorClassifier::build(values, 9).unwrap()
    }

    #[test]
    fn test_thresholds_evenly_spaced_from_min() {
        let classifier = tens();
        assert_eq!(
            classifier.thresholds(),
            &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0]
        );
        assert_eq!(classifier.colors().len(), 9);
        assert_eq!(classifier.domain(), (10.0, 90.0));
    }

    #[test]
    fn test_classify_scenario_values() {
        let classifier = tens();
        assert_eq!(classifier.bucket_of(15.0), 1);
        assert_eq!(classifier.bucket_of(90.0), 8);
        assert_eq!(classifier.classify(90.0), classifier.colors()[8]);
        assert_eq!(classifier.bucket_of(5.0), 0);
        assert_eq!(classifier.bucket_of(120.0), 8);
    }

    #[test]
    fn test_thresholds_count_and_order_for_many_ranges() {
        let ranges = [(0.0, 100.0), (2.6, 75.1), (-3.0, 3.0), (1e-9, 2e-9)];
        for buckets in 3..=9 {
            for &(lo, hi) in &ranges {
                let classifier = ColorClassifier::build([hi, lo, (lo + hi) / 2.0], buckets).unwrap();
                let t = classifier.thresholds();
                assert_eq!(t.len(), buckets - 1);
                assert_eq!(classifier.colors().len(), buckets);
                assert!(t.windows(2).all(|w| w[0] < w[1]));
                assert!(*t.last().unwrap() < hi);
            }
        }
    }

    #[test]
    fn test_classify_monotonic_and_within_extent() {
        let classifier = ColorClassifier::build([2.6, 75.1, 30.0], 9).unwrap();
        let (min, max) = classifier.domain();

        let mut previous = 0;
        for step in 0..=1000 {
            let v = min + (max - min) * f64::from(step) / 1000.0;
            let bucket = classifier.bucket_of(v);
            assert!(bucket >= previous);
            previous = bucket;

            let (lower, upper) = classifier.invert_extent(classifier.classify(v)).unwrap();
            assert!(lower <= v && v <= upper, "{v} not in [{lower}, {upper}]");
        }
    }

    #[test]
    fn test_degenerate_domain_is_guarded() {
        let classifier = ColorClassifier::build([42.0; 5], 9).unwrap();
        let t = classifier.thresholds();

        assert_eq!(t.len(), 8);
        assert!(t.windows(2).all(|w| w[0] < w[1]));
        assert!(t.iter().all(|v| v.is_finite()));

        let color = classifier.classify(42.0);
        assert!(classifier.colors().contains(&color));
        let (lower, upper) = classifier.invert_extent(color).unwrap();
        assert!(lower <= 42.0 && 42.0 <= upper);
    }

    #[test]
    fn test_extent_closes_open_ends() {
        let classifier = tens();
        assert_eq!(classifier.extent(0), Some((10.0, 10.0)));
        assert_eq!(classifier.extent(1), Some((10.0, 20.0)));
        assert_eq!(classifier.extent(8), Some((80.0, 90.0)));
        assert_eq!(classifier.extent(9), None);
        assert_eq!(classifier.invert_extent(Rgb::new(1, 2, 3)), None);
    }

    #[test]
    fn test_build_errors() {
        assert!(matches!(
            ColorClassifier::build(Vec::<f64>::new(), 9),
            Err(MapError::EmptyDomain)
        ));
        assert!(matches!(
            ColorClassifier::build([f64::NAN], 9),
            Err(MapError::EmptyDomain)
        ));
        assert!(matches!(
            ColorClassifier::build([1.0, 2.0], 12),
            Err(MapError::UnsupportedBucketCount(12))
        ));
    }

    #[test]
    fn test_non_finite_values_ignored() {
        let classifier = ColorClassifier::build([f64::NAN, 5.0, f64::INFINITY, 25.0], 5).unwrap();
        assert_eq!(classifier.domain(), (5.0, 25.0));
    }
}
