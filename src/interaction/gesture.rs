//! Active gesture state

use crate::core::types::{EnclosureId, EntityRef, PointerPos};
use crate::spatial::Rect;

use super::hit::ResizeSides;

/// The one gesture in progress; the controller is idle when there is none
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Dragging out a new enclosure from an empty cell
    Drawing {
        occupant_index: usize,
        start: (i32, i32),
        current: (i32, i32),
    },
    /// Dragging an existing entity by its body
    Moving {
        entity: EntityRef,
        /// Top-left at gesture start, restored on revert
        origin: (i32, i32),
        /// Pointer cell relative to `origin`, so the entity does not jump
        offset: (i32, i32),
        down: PointerPos,
    },
    /// Dragging one or two sides of an enclosure
    Resizing {
        enclosure: EnclosureId,
        sides: ResizeSides,
        /// Geometry at gesture start, restored if the gesture was a click
        original: Rect,
        down: PointerPos,
    },
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Drawing { .. } => "drawing",
            Gesture::Moving { .. } => "moving",
            Gesture::Resizing { .. } => "resizing",
        }
    }

    /// Rectangle under construction while drawing
    pub fn draw_rect(&self) -> Option<Rect> {
        match self {
            Gesture::Drawing { start, current, .. } => Some(Rect::spanning(*start, *current)),
            _ => None,
        }
    }
}
