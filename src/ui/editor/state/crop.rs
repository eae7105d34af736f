// SPDX-License-Identifier: MPL-2.0
//! Crop tool state and helpers.
//!
//! The region lives in display space, relative to the displayed image's
//! top-left corner. Every operation keeps it inside the image and at least
//! [`CROP_MIN_SIZE_PX`] on each axis (or the whole axis for smaller images).

use crate::config::{CROP_INITIAL_FRACTION, CROP_MIN_SIZE_PX};
use crate::domain::ui::{Rect, Size, Vector};
use crate::error::EditError;

/// Corner handle of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlePosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl HandlePosition {
    pub const ALL: [HandlePosition; 4] = [
        HandlePosition::TopLeft,
        HandlePosition::TopRight,
        HandlePosition::BottomLeft,
        HandlePosition::BottomRight,
    ];

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left_edge(self) -> bool {
        matches!(self, HandlePosition::TopLeft | HandlePosition::BottomLeft)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_top_edge(self) -> bool {
        matches!(self, HandlePosition::TopLeft | HandlePosition::TopRight)
    }
}

/// Gesture in progress, with the region captured when it started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropDragState {
    /// No active drag
    None,
    /// Dragging the entire rectangle
    Moving { start: Rect },
    /// Dragging a resize handle
    Resizing { handle: HandlePosition, start: Rect },
}

/// State for the crop tool.
#[derive(Debug, Clone, PartialEq)]
pub struct CropState {
    region: Rect,
    display: Size,
    min_size: Size,
    drag: CropDragState,
}

impl CropState {
    /// Starts cropping with a centered region covering 60% of each axis.
    ///
    /// An unsized display cannot host a region.
    pub fn new(display: Size) -> Result<Self, EditError> {
        if display.is_degenerate() {
            return Err(EditError::GeometryDegenerate {
                width: display.width,
                height: display.height,
            });
        }
        let min_size = Size::new(
            CROP_MIN_SIZE_PX.min(display.width),
            CROP_MIN_SIZE_PX.min(display.height),
        );
        let width = (display.width * CROP_INITIAL_FRACTION).max(min_size.width);
        let height = (display.height * CROP_INITIAL_FRACTION).max(min_size.height);
        Ok(Self {
            region: Rect::new(
                (display.width - width) / 2.0,
                (display.height - height) / 2.0,
                width,
                height,
            ),
            display,
            min_size,
            drag: CropDragState::None,
        })
    }

    #[must_use]
    pub fn region(&self) -> Rect {
        self.region
    }

    #[must_use]
    pub fn display(&self) -> Size {
        self.display
    }

    #[must_use]
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    #[must_use]
    pub fn drag_state(&self) -> CropDragState {
        self.drag
    }

    /// Captures the region for a move gesture.
    pub fn begin_drag(&mut self) {
        self.drag = CropDragState::Moving { start: self.region };
    }

    /// Captures the region for a resize gesture on `handle`.
    pub fn begin_resize(&mut self, handle: HandlePosition) {
        self.drag = CropDragState::Resizing {
            handle,
            start: self.region,
        };
    }

    pub fn end_gesture(&mut self) {
        self.drag = CropDragState::None;
    }

    /// Replaces the region with `region`, shrunk or shifted as needed to
    /// satisfy the size and bounds rules. Ends any gesture.
    pub fn set_region(&mut self, region: Rect) -> Rect {
        let size = |value: f32, min: f32, max: f32| {
            if value.is_finite() {
                value.clamp(min, max)
            } else {
                max
            }
        };
        let width = size(region.width, self.min_size.width, self.display.width);
        let height = size(region.height, self.min_size.height, self.display.height);
        let start = Rect::new(0.0, 0.0, width, height);
        self.region = moved_region(start, region.origin(), self.display);
        self.drag = CropDragState::None;
        self.region
    }

    /// Moves the region by `delta` from where the move gesture started,
    /// clamped to the image.
    pub fn drag_move(&mut self, delta: Vector) -> Rect {
        let start = match self.drag {
            CropDragState::Moving { start } => start,
            _ => {
                self.begin_drag();
                self.region
            }
        };
        self.region = moved_region(start, delta, self.display);
        self.region
    }

    /// Resizes from `handle` by `delta` measured from the resize gesture start.
    pub fn resize_from_handle(&mut self, handle: HandlePosition, delta: Vector) -> Rect {
        let start = match self.drag {
            CropDragState::Resizing { handle: active, start } if active == handle => start,
            _ => {
                self.begin_resize(handle);
                self.region
            }
        };
        self.region = resized_region(start, handle, delta, self.display, self.min_size);
        self.region
    }
}

/// `start` translated by `delta`, kept inside `display`.
#[must_use]
pub fn moved_region(start: Rect, delta: Vector, display: Size) -> Rect {
    let delta = finite(delta);
    let max_left = (display.width - start.width).max(0.0);
    let max_top = (display.height - start.height).max(0.0);
    Rect {
        left: (start.left + delta.x).clamp(0.0, max_left),
        top: (start.top + delta.y).clamp(0.0, max_top),
        ..start
    }
}

/// `start` resized from a corner handle.
///
/// The edge opposite the handle stays put. Sizes never drop below `min` and
/// the region never leaves `display`.
#[must_use]
pub fn resized_region(
    start: Rect,
    handle: HandlePosition,
    delta: Vector,
    display: Size,
    min: Size,
) -> Rect {
    let delta = finite(delta);
    let (left, width) = if handle.moves_left_edge() {
        resize_leading_edge(start.left, start.width, delta.x, min.width)
    } else {
        resize_trailing_edge(start.left, start.width, delta.x, display.width, min.width)
    };
    let (top, height) = if handle.moves_top_edge() {
        resize_leading_edge(start.top, start.height, delta.y, min.height)
    } else {
        resize_trailing_edge(start.top, start.height, delta.y, display.height, min.height)
    };
    Rect::new(left, top, width, height)
}

fn resize_leading_edge(start: f32, length: f32, delta: f32, min: f32) -> (f32, f32) {
    let far = start + length;
    let position = (start + delta).min(far - min).max(0.0);
    (position, far - position)
}

fn resize_trailing_edge(start: f32, length: f32, delta: f32, bound: f32, min: f32) -> (f32, f32) {
    let length = (length + delta).max(min).min(bound - start);
    (start, length)
}

fn finite(delta: Vector) -> Vector {
    let axis = |v: f32| if v.is_finite() { v } else { 0.0 };
    Vector::new(axis(delta.x), axis(delta.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn display() -> Size {
        Size::new(800.0, 600.0)
    }

    fn assert_rect(actual: Rect, expected: Rect) {
        assert_abs_diff_eq!(actual.left, expected.left, epsilon = 1e-3);
        assert_abs_diff_eq!(actual.top, expected.top, epsilon = 1e-3);
        assert_abs_diff_eq!(actual.width, expected.width, epsilon = 1e-3);
        assert_abs_diff_eq!(actual.height, expected.height, epsilon = 1e-3);
    }

    fn assert_invariants(state: &CropState) {
        let region = state.region();
        assert!(region.fits_within(state.display()), "{:?} escapes", region);
        assert!(region.width >= state.min_size().width - 1e-3);
        assert!(region.height >= state.min_size().height - 1e-3);
    }

    #[test]
    fn initial_region_is_centered_sixty_percent() {
        let state = CropState::new(display()).expect("sized display");
        assert_rect(state.region(), Rect::new(160.0, 120.0, 480.0, 360.0));
    }

    #[test]
    fn zero_display_is_degenerate() {
        let result = CropState::new(Size::new(0.0, 0.0));
        assert!(matches!(result, Err(EditError::GeometryDegenerate { .. })));
    }

    #[test]
    fn tiny_display_region_covers_whole_axis() {
        let state = CropState::new(Size::new(40.0, 300.0)).expect("sized display");
        let region = state.region();
        assert_abs_diff_eq!(region.left, 0.0);
        assert_abs_diff_eq!(region.width, 40.0);
        assert_invariants(&state);
    }

    #[test]
    fn drag_is_relative_to_gesture_start() {
        let mut state = CropState::new(display()).expect("sized display");
        state.begin_drag();
        state.drag_move(Vector::new(10.0, 0.0));
        let region = state.drag_move(Vector::new(20.0, 5.0));
        assert_rect(region, Rect::new(180.0, 125.0, 480.0, 360.0));
        state.end_gesture();
        assert_eq!(state.drag_state(), CropDragState::None);
    }

    #[test]
    fn drag_clamps_to_image() {
        let mut state = CropState::new(display()).expect("sized display");
        state.begin_drag();
        let region = state.drag_move(Vector::new(-1000.0, 1000.0));
        assert_rect(region, Rect::new(0.0, 240.0, 480.0, 360.0));
        assert_invariants(&state);
    }

    #[test]
    fn bottom_right_grows_until_boundary() {
        let mut state = CropState::new(display()).expect("sized display");
        let region =
            state.resize_from_handle(HandlePosition::BottomRight, Vector::new(1000.0, 50.0));
        assert_abs_diff_eq!(region.left, 160.0, epsilon = 1e-3);
        assert_abs_diff_eq!(region.right(), 800.0, epsilon = 1e-3);
        assert_abs_diff_eq!(region.height, 410.0, epsilon = 1e-3);
    }

    #[test]
    fn top_left_moves_origin_and_keeps_far_edge() {
        let mut state = CropState::new(display()).expect("sized display");
        let region = state.resize_from_handle(HandlePosition::TopLeft, Vector::new(40.0, -20.0));
        assert_rect(region, Rect::new(200.0, 100.0, 440.0, 380.0));
    }

    #[test]
    fn shrinking_stops_at_minimum_without_moving_far_edge() {
        let mut state = CropState::new(display()).expect("sized display");
        let region = state.resize_from_handle(HandlePosition::TopLeft, Vector::new(1000.0, 1000.0));
        assert_abs_diff_eq!(region.width, CROP_MIN_SIZE_PX, epsilon = 1e-3);
        assert_abs_diff_eq!(region.height, CROP_MIN_SIZE_PX, epsilon = 1e-3);
        assert_abs_diff_eq!(region.right(), 640.0, epsilon = 1e-3);
        assert_abs_diff_eq!(region.bottom(), 480.0, epsilon = 1e-3);
    }

    #[test]
    fn top_left_past_origin_trims_to_image() {
        let mut state = CropState::new(display()).expect("sized display");
        let region =
            state.resize_from_handle(HandlePosition::TopLeft, Vector::new(-500.0, -500.0));
        assert_rect(region, Rect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn set_region_normalizes_into_bounds() {
        let mut state = CropState::new(display()).expect("sized display");
        assert_rect(
            state.set_region(Rect::new(100.0, 50.0, 400.0, 300.0)),
            Rect::new(100.0, 50.0, 400.0, 300.0),
        );
        assert_rect(
            state.set_region(Rect::new(700.0, -10.0, 10.0, 900.0)),
            Rect::new(700.0, 0.0, 50.0, 600.0),
        );
        assert_invariants(&state);
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let mut state = CropState::new(display()).expect("sized display");
        let before = state.region();
        state.drag_move(Vector::new(f32::NAN, f32::INFINITY));
        assert_eq!(state.region(), before);
    }

    #[derive(Debug, Clone)]
    enum Gesture {
        Move(f32, f32),
        Resize(usize, f32, f32),
    }

    fn gesture() -> impl Strategy<Value = Gesture> {
        prop_oneof![
            (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| Gesture::Move(x, y)),
            (0usize..4, -2000.0f32..2000.0, -2000.0f32..2000.0)
                .prop_map(|(h, x, y)| Gesture::Resize(h, x, y)),
        ]
    }

    proptest! {
        #[test]
        fn region_invariants_hold(
            width in 1.0f32..2000.0,
            height in 1.0f32..2000.0,
            gestures in prop::collection::vec(gesture(), 0..40),
        ) {
            let mut state = CropState::new(Size::new(width, height)).expect("sized display");
            for gesture in gestures {
                match gesture {
                    Gesture::Move(x, y) => {
                        state.begin_drag();
                        state.drag_move(Vector::new(x, y));
                    }
                    Gesture::Resize(h, x, y) => {
                        let handle = HandlePosition::ALL[h];
                        state.begin_resize(handle);
                        state.resize_from_handle(handle, Vector::new(x, y));
                    }
                }
                state.end_gesture();
                let region = state.region();
                prop_assert!(region.fits_within(state.display()));
                prop_assert!(region.width >= state.min_size().width - 1e-2);
                prop_assert!(region.height >= state.min_size().height - 1e-2);
            }
        }
    }
}
