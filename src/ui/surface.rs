// SPDX-License-Identifier: MPL-2.0
//! Collaborators the studio drives: the rendering surface, the gallery list
//! and the confirmation prompt.
//!
//! Each comes with a headless implementation that records what it was asked
//! to do, used by the CLI and by tests.

use crate::domain::editing::WatermarkSpec;
use crate::domain::ui::{Rect, Size};
use crate::gallery::ImageRecord;
use crate::media::EncodedImage;
use crate::ui::state::TransformState;

/// Where the current image is drawn.
pub trait RenderSurface {
    /// Size of the displayed image in display pixels, before the viewer
    /// transform. Zero while nothing is laid out.
    fn display_size(&self) -> Size;

    fn show_image(&mut self, image: &EncodedImage);

    fn apply_transform(&mut self, transform: &TransformState);

    /// Receives a CSS `filter` value.
    fn apply_filter(&mut self, filter: &str);

    /// Draws the live watermark and reports the rendered text size when the
    /// surface can measure it.
    fn show_watermark_preview(&mut self, spec: &WatermarkSpec) -> Option<Size>;

    fn clear_watermark_preview(&mut self);

    fn show_crop_region(&mut self, region: Rect);

    fn clear_crop_region(&mut self);

    fn viewer_opened(&mut self);

    fn viewer_closed(&mut self);

    fn toggle_fullscreen(&mut self) {}
}

/// The thumbnail list.
pub trait GalleryObserver {
    fn record_added(&mut self, index: usize, record: &ImageRecord);

    fn record_removed(&mut self, index: usize, name: &str);

    /// The record's current bytes were replaced by a crop or watermark.
    fn record_updated(&mut self, index: usize, record: &ImageRecord);

    fn cleared(&mut self);
}

/// What a removal asks the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPrompt {
    RemoveImage { name: String },
    ClearGallery { count: usize },
}

impl ConfirmPrompt {
    /// Message key for the prompt text.
    #[must_use]
    pub fn message_key(&self) -> &'static str {
        match self {
            ConfirmPrompt::RemoveImage { .. } => "confirm-remove-image",
            ConfirmPrompt::ClearGallery { .. } => "confirm-clear-gallery",
        }
    }
}

/// Yes/no answer before a destructive removal.
pub trait Confirm {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmPrompt) -> bool,
{
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self(prompt)
    }
}

/// Answers yes to everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> bool {
        true
    }
}

/// One call received by [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    ImageShown { mime_type: String, len: usize },
    Transform(String),
    Filter(String),
    WatermarkPreview(WatermarkSpec),
    WatermarkCleared,
    CropRegion(Rect),
    CropCleared,
    ViewerOpened,
    ViewerClosed,
    Fullscreen,
}

/// A surface without pixels that records every call.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    display: Size,
    text_extent: Option<Size>,
    events: Vec<SurfaceEvent>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(display: Size) -> Self {
        Self {
            display,
            ..Self::default()
        }
    }

    pub fn set_display_size(&mut self, display: Size) {
        self.display = display;
    }

    /// Extent reported for every watermark preview.
    pub fn set_text_extent(&mut self, extent: Option<Size>) {
        self.text_extent = extent;
    }

    #[must_use]
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Last filter value applied, if any.
    #[must_use]
    pub fn last_filter(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            SurfaceEvent::Filter(filter) => Some(filter.as_str()),
            _ => None,
        })
    }

    /// Last transform value applied, if any.
    #[must_use]
    pub fn last_transform(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            SurfaceEvent::Transform(transform) => Some(transform.as_str()),
            _ => None,
        })
    }
}

impl RenderSurface for HeadlessSurface {
    fn display_size(&self) -> Size {
        self.display
    }

    fn show_image(&mut self, image: &EncodedImage) {
        self.events.push(SurfaceEvent::ImageShown {
            mime_type: image.mime_type().to_string(),
            len: image.len(),
        });
    }

    fn apply_transform(&mut self, transform: &TransformState) {
        self.events
            .push(SurfaceEvent::Transform(transform.to_css_transform()));
    }

    fn apply_filter(&mut self, filter: &str) {
        self.events.push(SurfaceEvent::Filter(filter.to_string()));
    }

    fn show_watermark_preview(&mut self, spec: &WatermarkSpec) -> Option<Size> {
        self.events.push(SurfaceEvent::WatermarkPreview(spec.clone()));
        self.text_extent
    }

    fn clear_watermark_preview(&mut self) {
        self.events.push(SurfaceEvent::WatermarkCleared);
    }

    fn show_crop_region(&mut self, region: Rect) {
        self.events.push(SurfaceEvent::CropRegion(region));
    }

    fn clear_crop_region(&mut self) {
        self.events.push(SurfaceEvent::CropCleared);
    }

    fn viewer_opened(&mut self) {
        self.events.push(SurfaceEvent::ViewerOpened);
    }

    fn viewer_closed(&mut self) {
        self.events.push(SurfaceEvent::ViewerClosed);
    }

    fn toggle_fullscreen(&mut self) {
        self.events.push(SurfaceEvent::Fullscreen);
    }
}

/// One call received by [`GalleryLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    Added { index: usize, name: String },
    Removed { index: usize, name: String },
    Updated { index: usize, name: String },
    Cleared,
}

/// A gallery list that records its notifications.
#[derive(Debug, Clone, Default)]
pub struct GalleryLog {
    pub events: Vec<GalleryEvent>,
}

impl GalleryObserver for GalleryLog {
    fn record_added(&mut self, index: usize, record: &ImageRecord) {
        self.events.push(GalleryEvent::Added {
            index,
            name: record.name().to_string(),
        });
    }

    fn record_removed(&mut self, index: usize, name: &str) {
        self.events.push(GalleryEvent::Removed {
            index,
            name: name.to_string(),
        });
    }

    fn record_updated(&mut self, index: usize, record: &ImageRecord) {
        self.events.push(GalleryEvent::Updated {
            index,
            name: record.name().to_string(),
        });
    }

    fn cleared(&mut self) {
        self.events.push(GalleryEvent::Cleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_answer_prompts() {
        let mut refuse = |_: &ConfirmPrompt| false;
        let prompt = ConfirmPrompt::RemoveImage {
            name: "a.png".into(),
        };
        assert!(!refuse.confirm(&prompt));
        assert!(AlwaysConfirm.confirm(&prompt));
    }

    #[test]
    fn headless_surface_tracks_last_values() {
        let mut surface = HeadlessSurface::new(Size::new(10.0, 10.0));
        surface.apply_filter("brightness(100%) contrast(100%) saturate(100%)");
        surface.apply_filter("brightness(50%) contrast(100%) saturate(100%)");
        surface.apply_transform(&TransformState::identity());

        assert_eq!(
            surface.last_filter(),
            Some("brightness(50%) contrast(100%) saturate(100%)")
        );
        assert_eq!(
            surface.last_transform(),
            Some("translate(0px, 0px) scale(1) rotate(0deg)")
        );
        assert_eq!(surface.take_events().len(), 3);
        assert!(surface.events().is_empty());
    }

    #[test]
    fn preview_reports_configured_extent() {
        let mut surface = HeadlessSurface::default();
        assert_eq!(surface.show_watermark_preview(&WatermarkSpec::default()), None);
        surface.set_text_extent(Some(Size::new(80.0, 20.0)));
        assert_eq!(
            surface.show_watermark_preview(&WatermarkSpec::default()),
            Some(Size::new(80.0, 20.0))
        );
    }
}
