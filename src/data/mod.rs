//! Input datasets: attainment records, county topology, and the loader that
//! fetches both.

pub mod loader;
pub mod records;
pub mod topology;

pub use loader::{DatasetLoader, Datasets};
pub use records::{AttainmentRecord, RegionId};
pub use topology::{GeometryExtractor, RegionGeometry, Topology};
