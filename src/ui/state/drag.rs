// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag interaction state for panning the viewer image.

use crate::domain::ui::Vector;

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Pointer position where the drag started
    pub start_position: Option<Vector>,

    /// Pan offset when the drag started
    pub start_translate: Option<Vector>,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, position: Vector, translate: Vector) {
        self.is_dragging = true;
        self.start_position = Some(position);
        self.start_translate = Some(translate);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.start_position = None;
        self.start_translate = None;
    }

    /// Calculates the new pan offset for the current pointer position.
    ///
    /// The image follows the pointer: the offset moves by exactly the
    /// distance travelled since the drag started.
    #[must_use]
    pub fn calculate_translate(&self, current_position: Vector) -> Option<Vector> {
        if !self.is_dragging {
            return None;
        }

        let start_pos = self.start_position?;
        let start_translate = self.start_translate?;

        Some(start_translate + (current_position - start_pos))
    }
}
