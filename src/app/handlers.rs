// SPDX-License-Identifier: MPL-2.0
//! Crop and watermark tools of the studio, including their destructive
//! commits.
//!
//! A commit takes the tool out of the editor session first, so the session
//! is idle whatever the outcome. The raster work runs on the blocking pool
//! and the record is only written once it succeeded.

use super::{SharedRasterizer, Studio};
use crate::config::WatermarkBase;
use crate::domain::editing::{FontSize, WatermarkSpec, WatermarkStyle};
use crate::domain::ui::{Rect, Vector};
use crate::error::{EditError, Error, Result};
use crate::media::image_transform::crop_display_region;
use crate::media::watermark::composite_watermark;
use crate::media::{self, AbGlyphRasterizer, EncodedImage};
use crate::ui::editor::{HandlePosition, ToolKind};
use crate::ui::notifications::{self, Notification};
use crate::ui::surface::{Confirm, GalleryObserver, RenderSurface};
use std::sync::Arc;

impl<S, O, C> Studio<S, O, C>
where
    S: RenderSurface,
    O: GalleryObserver,
    C: Confirm,
{
    // =========================================================================
    // Crop
    // =========================================================================

    /// Starts cropping the displayed image.
    ///
    /// Fails with [`EditError::GeometryDegenerate`] while the surface has no
    /// laid-out image; nothing changes and the user may retry.
    pub fn enter_crop(&mut self) -> Result<Rect> {
        let entered = self.try_enter_crop();
        self.report(entered)
    }

    fn try_enter_crop(&mut self) -> Result<Rect> {
        if self.gallery.current().is_none() {
            return Err(EditError::NoImage.into());
        }
        let display = self.surface.display_size();
        let region = self.editor.enter_crop(display)?.region();
        self.surface.show_crop_region(region);
        Ok(region)
    }

    pub fn crop_begin_drag(&mut self) -> Result<()> {
        let crop = reported(&mut self.notifications, self.editor.crop_mut())?;
        crop.begin_drag();
        Ok(())
    }

    pub fn crop_begin_resize(&mut self, handle: HandlePosition) -> Result<()> {
        let crop = reported(&mut self.notifications, self.editor.crop_mut())?;
        crop.begin_resize(handle);
        Ok(())
    }

    /// Moves the crop region by `delta` from the gesture start.
    pub fn crop_drag_move(&mut self, delta: Vector) -> Result<Rect> {
        let crop = reported(&mut self.notifications, self.editor.crop_mut())?;
        let region = crop.drag_move(delta);
        self.surface.show_crop_region(region);
        Ok(region)
    }

    /// Resizes the crop region from `handle` by `delta` from the gesture start.
    pub fn crop_resize(&mut self, handle: HandlePosition, delta: Vector) -> Result<Rect> {
        let crop = reported(&mut self.notifications, self.editor.crop_mut())?;
        let region = crop.resize_from_handle(handle, delta);
        self.surface.show_crop_region(region);
        Ok(region)
    }

    /// Sets the crop region directly, normalized into the image.
    pub fn set_crop_region(&mut self, region: Rect) -> Result<Rect> {
        let crop = reported(&mut self.notifications, self.editor.crop_mut())?;
        let region = crop.set_region(region);
        self.surface.show_crop_region(region);
        Ok(region)
    }

    pub fn crop_end_gesture(&mut self) {
        if let Ok(crop) = self.editor.crop_mut() {
            crop.end_gesture();
        }
    }

    /// Leaves crop mode without touching the record.
    pub fn cancel_crop(&mut self) -> bool {
        let cancelled = self.editor.take_crop().is_ok();
        if cancelled {
            self.surface.clear_crop_region();
        }
        cancelled
    }

    pub fn toggle_crop(&mut self) -> Result<()> {
        if self.editor.active_tool() == Some(ToolKind::Crop) {
            self.cancel_crop();
            Ok(())
        } else {
            self.enter_crop().map(|_| ())
        }
    }

    /// Crops the current record at source resolution.
    ///
    /// The region is mapped into the source with independent X/Y ratios.
    /// On success the record's current bytes are replaced, the original is
    /// kept and the viewer transform is reset.
    pub async fn commit_crop(&mut self) -> Result<()> {
        let committed = self.try_commit_crop().await;
        self.report(committed)
    }

    async fn try_commit_crop(&mut self) -> Result<()> {
        let crop = self.editor.take_crop()?;
        self.surface.clear_crop_region();

        let index = self.gallery.current_index();
        let record = self.gallery.current().ok_or(EditError::NoImage)?;
        let source = record.current().clone();
        let mime_type = record.mime_type().to_string();
        let (region, display) = (crop.region(), crop.display());

        let cropped = run_raster(move || {
            let pixels = decode_for_edit(&source)?;
            let cropped = crop_display_region(&pixels, region, display)?;
            media::encode(&cropped, &mime_type)
        })
        .await?;

        self.store_edit(index, cropped)?;
        self.viewer.reset();
        self.refresh_surface();
        self.notifications
            .push(Notification::success("notification-crop-applied"));
        Ok(())
    }

    // =========================================================================
    // Watermark
    // =========================================================================

    /// Watermark inputs preselected from the configuration.
    #[must_use]
    pub fn default_watermark_spec(&self) -> WatermarkSpec {
        let settings = &self.config.watermark;
        WatermarkSpec::new(
            "",
            settings.style,
            settings.color.as_deref().unwrap_or_default(),
            settings
                .font_size_px
                .map(FontSize::new)
                .unwrap_or_default(),
        )
    }

    /// Starts placing `spec`, centered on the displayed image.
    pub fn enter_watermark(&mut self, spec: WatermarkSpec) -> Result<()> {
        let entered = self.try_enter_watermark(spec);
        self.report(entered)
    }

    fn try_enter_watermark(&mut self, spec: WatermarkSpec) -> Result<()> {
        if self.gallery.current().is_none() {
            return Err(EditError::NoImage.into());
        }
        let display = self.surface.display_size();
        let clamp_drag = self.config.watermark.clamp_drag;
        self.editor.enter_watermark(spec, display, clamp_drag)?;
        self.preview_watermark()
    }

    pub fn watermark_begin_drag(&mut self) -> Result<()> {
        let watermark = reported(&mut self.notifications, self.editor.watermark_mut())?;
        watermark.begin_drag();
        Ok(())
    }

    /// Moves the watermark by `delta` from the gesture start. From here on
    /// it is explicitly positioned.
    pub fn watermark_drag_move(&mut self, delta: Vector) -> Result<()> {
        let watermark = reported(&mut self.notifications, self.editor.watermark_mut())?;
        watermark.drag_move(delta);
        self.preview_watermark()
    }

    pub fn watermark_end_gesture(&mut self) {
        if let Ok(watermark) = self.editor.watermark_mut() {
            watermark.end_gesture();
        }
    }

    pub fn update_watermark_text(&mut self, text: &str) -> Result<()> {
        let watermark = reported(&mut self.notifications, self.editor.watermark_mut())?;
        watermark.update_text(text);
        self.preview_watermark()
    }

    pub fn update_watermark_style(&mut self, style: WatermarkStyle) -> Result<()> {
        let watermark = reported(&mut self.notifications, self.editor.watermark_mut())?;
        watermark.update_style(style);
        self.preview_watermark()
    }

    pub fn update_watermark_color(&mut self, color: &str) -> Result<()> {
        let watermark = reported(&mut self.notifications, self.editor.watermark_mut())?;
        watermark.update_color(color);
        self.preview_watermark()
    }

    pub fn update_watermark_size(&mut self, font_size_px: f32) -> Result<()> {
        let watermark = reported(&mut self.notifications, self.editor.watermark_mut())?;
        watermark.update_size(font_size_px);
        self.preview_watermark()
    }

    /// Leaves watermark mode without touching the record.
    pub fn cancel_watermark(&mut self) -> bool {
        let cancelled = self.editor.take_watermark().is_ok();
        if cancelled {
            self.surface.clear_watermark_preview();
        }
        cancelled
    }

    pub fn toggle_watermark(&mut self) -> Result<()> {
        if self.editor.active_tool() == Some(ToolKind::Watermark) {
            self.cancel_watermark();
            Ok(())
        } else {
            self.enter_watermark(self.default_watermark_spec())
        }
    }

    /// Draws the watermark into the current record at source resolution.
    ///
    /// The base image is the record's current bytes, or the original ones
    /// when configured. A missing font or an unreadable base image leaves
    /// the record untouched.
    pub async fn commit_watermark(&mut self) -> Result<()> {
        let committed = self.try_commit_watermark().await;
        self.report(committed)
    }

    async fn try_commit_watermark(&mut self) -> Result<()> {
        let watermark = self.editor.take_watermark()?;
        self.surface.clear_watermark_preview();

        let index = self.gallery.current_index();
        let rasterizer = self.rasterizer()?;
        let record = self.gallery.current().ok_or(EditError::NoImage)?;
        let base = match self.config.watermark.base {
            WatermarkBase::Current => record.current().clone(),
            WatermarkBase::Original => record.original().clone(),
        };
        let mime_type = record.mime_type().to_string();
        let display = watermark.display();
        let spec = watermark.into_spec();

        let marked = run_raster(move || {
            let pixels = decode_for_edit(&base)?;
            let marked = composite_watermark(&pixels, &spec, display, &*rasterizer)?;
            media::encode(&marked, &mime_type)
        })
        .await?;

        self.store_edit(index, marked)?;
        self.refresh_surface();
        self.notifications
            .push(Notification::success("notification-watermark-applied"));
        Ok(())
    }

    fn preview_watermark(&mut self) -> Result<()> {
        let watermark = reported(&mut self.notifications, self.editor.watermark_mut())?;
        let extent = self.surface.show_watermark_preview(watermark.spec());
        watermark.set_text_extent(extent);
        Ok(())
    }

    fn rasterizer(&mut self) -> Result<SharedRasterizer> {
        if let Some(rasterizer) = &self.rasterizer {
            return Ok(Arc::clone(rasterizer));
        }
        let font_path = self.config.watermark.font_path.as_deref();
        let loaded: SharedRasterizer = Arc::new(AbGlyphRasterizer::from_config(font_path)?);
        self.rasterizer = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    // =========================================================================
    // Shared
    // =========================================================================

    /// Writes committed bytes into the record at `index` and tells the list.
    fn store_edit(&mut self, index: usize, bytes: EncodedImage) -> Result<()> {
        let record = self.gallery.get_mut(index).ok_or(EditError::NoImage)?;
        record
            .replace_current(bytes)
            .map_err(|err| EditError::Compositing(err.to_string()))?;
        let (width, height) = record.natural_size();
        log::info!("{} is now {}x{}", record.name(), width, height);
        self.observer.record_updated(index, record);
        Ok(())
    }

    /// Clears the overlay of a tool cancelled with the edit panel.
    pub(super) fn clear_tool_overlay(&mut self, cancelled: Option<ToolKind>) {
        match cancelled {
            Some(ToolKind::Crop) => self.surface.clear_crop_region(),
            Some(ToolKind::Watermark) => self.surface.clear_watermark_preview(),
            None => {}
        }
    }
}

/// Pushes a tool lookup failure as a notification.
fn reported<T>(
    notifications: &mut notifications::Manager,
    result: std::result::Result<T, EditError>,
) -> Result<T> {
    result.map_err(|err| {
        let err = Error::from(err);
        notifications.push(Notification::from_error(&err));
        err
    })
}

/// Decodes the base image of an edit; failures are compositing failures.
fn decode_for_edit(image: &EncodedImage) -> Result<image_rs::DynamicImage> {
    media::decode(image).map_err(|err| EditError::Compositing(err.to_string()).into())
}

async fn run_raster<F>(job: F) -> Result<EncodedImage>
where
    F: FnOnce() -> Result<EncodedImage> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| Error::Edit(EditError::Compositing(err.to_string())))?
}
