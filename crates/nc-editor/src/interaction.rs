//! Interaction modes.
//!
//! Exactly one mode is active at a time. Gesture modes (`Panning`,
//! `DraggingSelection`, `Resizing`, `MarqueeSelecting`, `SizingText`) begin on
//! pointer-down and end on pointer-up. `DrawingPath`, `Connecting`, and
//! `EditingText` span several clicks and outlive a release.

use nc_core::id::NodeId;
use nc_core::model::{Bounds, Point, ResizeHandle};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,

    /// Viewport follows the pointer. `last` is in screen pixels.
    Panning { last: Point },

    /// Selected nodes follow the pointer once it leaves the threshold around
    /// `anchor`. `target` is what the selection collapses to on a plain click.
    DraggingSelection {
        anchor: Point,
        last: Point,
        moved: bool,
        target: Option<NodeId>,
    },

    Resizing {
        node: NodeId,
        handle: ResizeHandle,
        last: Point,
    },

    /// Rubber-band selection, world coordinates.
    MarqueeSelecting { start: Point, current: Point },

    /// Text-tool press: a click makes auto text, a drag makes a fixed box.
    SizingText { start: Point, current: Point },

    /// Pen points placed so far, world coordinates.
    DrawingPath { points: Vec<Point> },

    /// First endpoint of a pending connection.
    Connecting { from: NodeId },

    EditingText { node: NodeId },
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::DraggingSelection { .. } => "dragging-selection",
            Self::Resizing { .. } => "resizing",
            Self::MarqueeSelecting { .. } => "marquee-selecting",
            Self::SizingText { .. } => "sizing-text",
            Self::DrawingPath { .. } => "drawing-path",
            Self::Connecting { .. } => "connecting",
            Self::EditingText { .. } => "editing-text",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Modes that survive a pointer release.
    pub fn persists(&self) -> bool {
        matches!(
            self,
            Self::Idle | Self::DrawingPath { .. } | Self::Connecting { .. } | Self::EditingText { .. }
        )
    }

    /// The text node being edited, if any.
    pub fn editing(&self) -> Option<NodeId> {
        match self {
            Self::EditingText { node } => Some(*node),
            _ => None,
        }
    }

    /// Live rectangle to draw for marquee and text-box gestures.
    pub fn rubber_band(&self) -> Option<Bounds> {
        match self {
            Self::MarqueeSelecting { start, current } | Self::SizingText { start, current } => {
                Some(Bounds::from_corners(*start, *current))
            }
            _ => None,
        }
    }
}
