// SPDX-License-Identifier: MPL-2.0
//! Lightbox viewer session: open state, transform and drag-to-pan.

pub mod keyboard;

pub use keyboard::{command_for, Command, Key, ModeFlags};

use crate::domain::ui::Vector;
use crate::ui::state::{zoom_direction_for_wheel, DragState, TransformState, ZoomDirection};

/// The viewer over the current record.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    open: bool,
    transform: TransformState,
    drag: DragState,
}

impl ViewerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the viewer with an identity transform.
    pub fn open(&mut self) {
        self.open = true;
        self.reset();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.drag.stop();
    }

    #[must_use]
    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Back to identity; also ends any pan in progress.
    pub fn reset(&mut self) {
        self.transform.reset();
        self.drag.stop();
    }

    pub fn zoom_in(&mut self) {
        self.transform.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.transform.zoom_out();
    }

    pub fn rotate_left(&mut self) {
        self.transform.rotate_left();
    }

    pub fn rotate_right(&mut self) {
        self.transform.rotate_right();
    }

    /// One zoom step per wheel event.
    pub fn wheel(&mut self, delta_y: f32) -> ZoomDirection {
        let direction = zoom_direction_for_wheel(delta_y);
        match direction {
            ZoomDirection::In => self.zoom_in(),
            ZoomDirection::Out => self.zoom_out(),
        }
        direction
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.drag.is_dragging
    }

    /// Anchors a pan at `pointer` and the current offset.
    pub fn begin_pan(&mut self, pointer: Vector) {
        self.drag.start(pointer, self.transform.translate);
    }

    /// Follows the pointer. Ignored when no pan is active.
    pub fn pan_to(&mut self, pointer: Vector, limit: Option<f32>) -> bool {
        match self.drag.calculate_translate(pointer) {
            Some(translate) => {
                self.transform.pan_to(translate, limit);
                true
            }
            None => false,
        }
    }

    pub fn end_pan(&mut self) {
        self.drag.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_resets_transform() {
        let mut viewer = ViewerState::new();
        viewer.open();
        viewer.zoom_in();
        viewer.rotate_left();
        viewer.close();
        viewer.open();
        assert!(viewer.is_open());
        assert!(viewer.transform().is_identity());
    }

    #[test]
    fn pan_follows_pointer_from_anchor() {
        let mut viewer = ViewerState::new();
        viewer.open();
        viewer.begin_pan(Vector::new(100.0, 100.0));
        assert!(viewer.pan_to(Vector::new(130.0, 90.0), None));
        viewer.end_pan();
        viewer.begin_pan(Vector::new(0.0, 0.0));
        viewer.pan_to(Vector::new(5.0, 5.0), None);
        assert_eq!(viewer.transform().translate, Vector::new(35.0, -5.0));
    }

    #[test]
    fn pan_without_anchor_is_ignored() {
        let mut viewer = ViewerState::new();
        assert!(!viewer.pan_to(Vector::new(10.0, 10.0), None));
        assert_eq!(viewer.transform().translate, Vector::ZERO);
    }

    #[test]
    fn pan_limit_clamps_each_axis() {
        let mut viewer = ViewerState::new();
        viewer.begin_pan(Vector::ZERO);
        viewer.pan_to(Vector::new(500.0, -20.0), Some(100.0));
        assert_eq!(viewer.transform().translate, Vector::new(100.0, -20.0));
    }

    #[test]
    fn wheel_steps_one_zoom_level() {
        let mut viewer = ViewerState::new();
        assert_eq!(viewer.wheel(-3.0), ZoomDirection::In);
        assert_eq!(viewer.wheel(3.0), ZoomDirection::Out);
        assert!((viewer.transform().scale.value() - 1.0).abs() < 1e-5);
    }
}
