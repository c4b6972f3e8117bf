//! Hover handling as a two-state machine, independent of any renderer.
//!
//! Pointer events move the handler between [`HoverState::Idle`] and
//! [`HoverState::Hovering`]; each transition yields a [`DisplayUpdate`]
//! describing what the display surface should show.

use serde::Serialize;
use tracing::debug;

use crate::choropleth::index::AttainmentIndex;
use crate::data::records::{AttainmentRecord, RegionId};

/// Tooltip offset from the pointer, in pixels.
pub const TOOLTIP_OFFSET_X: f64 = -30.0;
pub const TOOLTIP_OFFSET_Y: f64 = -50.0;

/// Stroke applied to the hovered region.
pub const HIGHLIGHT_STROKE: &str = "blue";
pub const HIGHLIGHT_STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "region_id", rename_all = "snake_case")]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(RegionId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { region_id: RegionId, x: f64, y: f64 },
    Out,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub text: String,
    pub left: f64,
    pub top: f64,
}

/// What the display surface should change to after an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayUpdate {
    /// Region to outline; `None` clears any outline.
    pub highlight: Option<RegionId>,
    /// Tooltip to show; `None` hides it.
    pub tooltip: Option<Tooltip>,
}

impl DisplayUpdate {
    pub fn hidden() -> Self {
        Self {
            highlight: None,
            tooltip: None,
        }
    }
}

/// Formats the hover text for a record.
pub fn tooltip_text(record: &AttainmentRecord) -> String {
    format!(
        "{}, {}: {}%",
        record.area_name, record.state_name, record.attainment_percent
    )
}

#[derive(Debug, Clone)]
pub struct InteractionHandler<'a> {
    index: &'a AttainmentIndex,
    state: HoverState,
}

impl<'a> InteractionHandler<'a> {
    pub fn new(index: &'a AttainmentIndex) -> Self {
        Self {
            index,
            state: HoverState::Idle,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn handle(&mut self, event: PointerEvent) -> DisplayUpdate {
        match event {
            PointerEvent::Move { region_id, x, y } => {
                self.state = HoverState::Hovering(region_id);
                let tooltip = match self.index.lookup(region_id) {
                    Some(record) => Some(Tooltip {
                        text: tooltip_text(record),
                        left: x + TOOLTIP_OFFSET_X,
                        top: y + TOOLTIP_OFFSET_Y,
                    }),
                    None => {
                        debug!(region_id, "Hovered region has no record");
                        None
                    }
                };
                DisplayUpdate {
                    highlight: Some(region_id),
                    tooltip,
                }
            }
            PointerEvent::Out => {
                self.state = HoverState::Idle;
                DisplayUpdate::hidden()
            }
        }
    }
}
