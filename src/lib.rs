pub mod choropleth;
pub mod config;
pub mod data;
pub mod error;
pub mod fetch;
pub mod map;
pub mod output;
pub mod render;
pub mod stats;
