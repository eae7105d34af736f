// SPDX-License-Identifier: MPL-2.0
//! Viewer interaction state: transform, pan drag and wheel zoom.

pub mod drag;
pub mod transform;
pub mod zoom;

pub use drag::DragState;
pub use transform::TransformState;
pub use zoom::{zoom_direction_for_wheel, ZoomDirection};
