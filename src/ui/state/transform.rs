// SPDX-License-Identifier: MPL-2.0
//! Geometric transform of the image shown in the viewer.
//!
//! The transform composes as `translate → scale → rotate`, the same order as
//! the CSS string produced by [`TransformState::to_css_transform`].

use crate::domain::ui::{RotationDegrees, Vector, ZoomScale};

/// Zoom, rotation and pan of the viewer image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformState {
    pub scale: ZoomScale,
    pub rotation: RotationDegrees,
    pub translate: Vector,
}

impl TransformState {
    /// Identity transform: scale 1, no rotation, no pan.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    pub fn zoom_in(&mut self) {
        self.scale = self.scale.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.scale = self.scale.zoom_out();
    }

    pub fn rotate_left(&mut self) {
        self.rotation = self.rotation.rotate_left();
    }

    pub fn rotate_right(&mut self) {
        self.rotation = self.rotation.rotate_right();
    }

    /// Sets the pan offset. With a limit, each axis is clamped to
    /// `-limit..=limit`; without one the offset is taken as is.
    pub fn pan_to(&mut self, translate: Vector, limit: Option<f32>) {
        self.translate = match limit {
            Some(limit) if limit.is_finite() && limit >= 0.0 => Vector::new(
                translate.x.clamp(-limit, limit),
                translate.y.clamp(-limit, limit),
            ),
            _ => translate,
        };
    }

    /// CSS `transform` value: `translate(Xpx, Ypx) scale(S) rotate(Rdeg)`.
    #[must_use]
    pub fn to_css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}) rotate({}deg)",
            css_number(self.translate.x),
            css_number(self.translate.y),
            css_number(self.scale.value()),
            self.rotation.degrees()
        )
    }

    /// Affine matrix `[a, b, c, d, e, f]` in CSS `matrix()` order, mapping
    /// `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
    ///
    /// Quarter turns use exact sines and cosines.
    #[must_use]
    pub fn to_matrix(&self) -> [f32; 6] {
        let (sin, cos) = match self.rotation.normalized() {
            0 => (0.0, 1.0),
            90 => (1.0, 0.0),
            180 => (0.0, -1.0),
            270 => (-1.0, 0.0),
            _ => self.rotation.radians().sin_cos(),
        };
        let s = self.scale.value();
        [
            s * cos,
            s * sin,
            -s * sin,
            s * cos,
            self.translate.x,
            self.translate.y,
        ]
    }

    /// Applies [`to_matrix`](Self::to_matrix) to a point.
    #[must_use]
    pub fn apply(&self, point: Vector) -> Vector {
        let [a, b, c, d, e, f] = self.to_matrix();
        Vector::new(a * point.x + c * point.y + e, b * point.x + d * point.y + f)
    }
}

fn css_number(value: f32) -> String {
    format!("{}", value + 0.0)
}
