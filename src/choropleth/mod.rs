//! Joining records to regions and turning values into colors.
//!
//! [`AttainmentIndex`] resolves region ids to records, [`ColorClassifier`]
//! buckets values into palette colors, [`RegionAttributeBuilder`] combines
//! both per region, and [`LegendBuilder`] describes the classes. Hover
//! behavior lives in [`InteractionHandler`].

pub mod attributes;
pub mod classifier;
pub mod index;
pub mod interaction;
pub mod legend;
pub mod palette;

pub use attributes::{Fill, RegionAttributeBuilder, RenderAttributes};
pub use classifier::ColorClassifier;
pub use index::AttainmentIndex;
pub use interaction::{DisplayUpdate, HoverState, InteractionHandler, PointerEvent, Tooltip};
pub use legend::{Legend, LegendBuilder, LegendSwatch, LegendTick};
pub use palette::Rgb;
