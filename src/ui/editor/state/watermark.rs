// SPDX-License-Identifier: MPL-2.0
//! Watermark tool state: the live spec and the placement drag.

use crate::domain::editing::{FontSize, WatermarkPosition, WatermarkSpec, WatermarkStyle};
use crate::domain::ui::{Size, Vector};
use crate::error::EditError;

/// Live watermark being placed over the displayed image.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkState {
    spec: WatermarkSpec,
    display: Size,
    clamp_drag: bool,
    /// Rendered size of the preview text, when the surface reports one.
    text_extent: Option<Size>,
    /// Top-left of the text when the current drag started.
    drag_start: Option<Vector>,
}

impl WatermarkState {
    /// Starts placing `spec` over a display of the given size.
    pub fn new(spec: WatermarkSpec, display: Size, clamp_drag: bool) -> Result<Self, EditError> {
        if display.is_degenerate() {
            return Err(EditError::GeometryDegenerate {
                width: display.width,
                height: display.height,
            });
        }
        Ok(Self {
            spec,
            display,
            clamp_drag,
            text_extent: None,
            drag_start: None,
        })
    }

    #[must_use]
    pub fn spec(&self) -> &WatermarkSpec {
        &self.spec
    }

    #[must_use]
    pub fn into_spec(self) -> WatermarkSpec {
        self.spec
    }

    #[must_use]
    pub fn display(&self) -> Size {
        self.display
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    pub fn set_text_extent(&mut self, extent: Option<Size>) {
        self.text_extent = extent.filter(|size| !size.is_degenerate());
    }

    /// Top-left of the text in display space.
    ///
    /// A centered watermark without a known extent reports the display center.
    #[must_use]
    pub fn top_left(&self) -> Vector {
        match self.spec.position {
            WatermarkPosition::Explicit { left, top } => Vector::new(left, top),
            WatermarkPosition::Centered => {
                let center = self.display.center();
                match self.text_extent {
                    Some(extent) => center - extent.center(),
                    None => center,
                }
            }
        }
    }

    pub fn begin_drag(&mut self) {
        self.drag_start = Some(self.top_left());
    }

    /// Places the text at the drag start plus `delta`. The watermark is
    /// explicitly positioned from here on.
    pub fn drag_move(&mut self, delta: Vector) -> WatermarkPosition {
        let start = match self.drag_start {
            Some(start) => start,
            None => {
                self.begin_drag();
                self.top_left()
            }
        };
        let delta = Vector::new(finite(delta.x), finite(delta.y));
        let mut target = start + delta;
        if self.clamp_drag {
            let extent = self.text_extent.unwrap_or_default();
            target.x = target.x.clamp(0.0, (self.display.width - extent.width).max(0.0));
            target.y = target.y.clamp(0.0, (self.display.height - extent.height).max(0.0));
        }
        self.spec.position = WatermarkPosition::Explicit {
            left: target.x,
            top: target.y,
        };
        self.spec.position
    }

    pub fn end_gesture(&mut self) {
        self.drag_start = None;
    }

    pub fn update_text(&mut self, text: &str) {
        self.spec.set_text(text);
        self.text_extent = None;
    }

    pub fn update_style(&mut self, style: WatermarkStyle) {
        self.spec.style = style;
    }

    pub fn update_color(&mut self, color: &str) {
        self.spec.set_color(color);
    }

    pub fn update_size(&mut self, font_size_px: f32) {
        self.spec.font_size = FontSize::new(font_size_px);
        self.text_extent = None;
    }
}

fn finite(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
