// SPDX-License-Identifier: MPL-2.0
//! Mouse wheel to zoom mapping.

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Maps a wheel event to a zoom step: scrolling up (negative delta) zooms
/// in, anything else zooms out. Magnitude is ignored.
#[must_use]
pub fn zoom_direction_for_wheel(delta_y: f32) -> ZoomDirection {
    if delta_y < 0.0 {
        ZoomDirection::In
    } else {
        ZoomDirection::Out
    }
}
