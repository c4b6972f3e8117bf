//! Error taxonomy for loading and classifying the map datasets.
//!
//! Join misses and degenerate value ranges are not represented here: they
//! are handled in place and always produce a defined render result.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("failed to fetch {source_name}: {message}")]
    Fetch {
        source_name: &'static str,
        message: String,
    },

    #[error("failed to parse {source_name}: {message}")]
    Parse {
        source_name: &'static str,
        message: String,
    },

    #[error("topology has no object named '{0}'")]
    MissingObject(String),

    #[error("no finite attainment values to classify")]
    EmptyDomain,

    #[error("no palette with {0} classes (supported: 3..=9)")]
    UnsupportedBucketCount(usize),
}

pub type Result<T> = std::result::Result<T, MapError>;
