//! Output rendering.

pub mod svg;

pub use svg::{MapDocument, error_to_string, map_to_string, write_error, write_map};
