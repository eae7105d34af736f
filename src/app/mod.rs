// SPDX-License-Identifier: MPL-2.0
//! Studio root state and orchestration between the gallery, the viewer and
//! the editor.
//!
//! [`Studio`] wires the components to the injected collaborators (rendering
//! surface, gallery list, confirmation prompt) and to the configuration.
//! Every failure is recovered here: it becomes a notification, the gallery
//! stays usable and the error is still returned to the caller.

mod handlers;
pub mod paths;
mod update;

use crate::config::Config;
use crate::domain::editing::{FilterChange, FilterParameter, Filters};
use crate::domain::ui::Vector;
use crate::error::{EditError, Error, Result};
use crate::gallery::{FileSource, Gallery, ImageRecord, IngestReport};
use crate::media::{self, EncodedImage, GlyphRasterizer};
use crate::ui::editor::EditorSession;
use crate::ui::notifications::{self, Notification};
use crate::ui::surface::{Confirm, ConfirmPrompt, GalleryObserver, RenderSurface};
use crate::ui::viewer::ViewerState;
use std::fmt;
use std::sync::Arc;

/// Text rasterizer shared with blocking compositing jobs.
pub type SharedRasterizer = Arc<dyn GlyphRasterizer + Send + Sync>;

/// The gallery studio.
pub struct Studio<S, O, C> {
    config: Config,
    gallery: Gallery,
    viewer: ViewerState,
    editor: EditorSession,
    surface: S,
    observer: O,
    confirm: C,
    notifications: notifications::Manager,
    /// Loaded on first watermark commit unless injected.
    rasterizer: Option<SharedRasterizer>,
    fullscreen: bool,
}

impl<S, O, C> fmt::Debug for Studio<S, O, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Studio")
            .field("records", &self.gallery.len())
            .field("current_index", &self.gallery.current_index())
            .field("viewer_open", &self.viewer.is_open())
            .field("editor", &self.editor)
            .field("fullscreen", &self.fullscreen)
            .finish_non_exhaustive()
    }
}

impl<S, O, C> Studio<S, O, C>
where
    S: RenderSurface,
    O: GalleryObserver,
    C: Confirm,
{
    pub fn new(config: Config, surface: S, observer: O, confirm: C) -> Self {
        Self {
            config,
            gallery: Gallery::new(),
            viewer: ViewerState::new(),
            editor: EditorSession::new(),
            surface,
            observer,
            confirm,
            notifications: notifications::Manager::new(),
            rasterizer: None,
            fullscreen: false,
        }
    }

    /// Uses `rasterizer` for watermark text instead of a font looked up from
    /// the configuration.
    #[must_use]
    pub fn with_rasterizer(mut self, rasterizer: SharedRasterizer) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    #[must_use]
    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    #[must_use]
    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut notifications::Manager {
        &mut self.notifications
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[must_use]
    pub fn current(&self) -> Option<&ImageRecord> {
        self.gallery.current()
    }

    // =========================================================================
    // Gallery
    // =========================================================================

    /// Ingests files in order. Rejected files are reported and skipped.
    pub async fn add_files<'a, F, I>(&mut self, files: I) -> IngestReport
    where
        F: FileSource + 'a,
        I: IntoIterator<Item = &'a F>,
    {
        let report = self.gallery.add_batch(files).await;

        for name in &report.added {
            if let Some(index) = self.gallery.position_of(name) {
                if let Some(record) = self.gallery.get(index) {
                    self.observer.record_added(index, record);
                }
            }
        }
        for err in &report.rejected {
            self.notifications.push(Notification::from_error(err));
        }
        if !report.added.is_empty() {
            self.notifications.push(
                Notification::success("notification-ingest-complete")
                    .with_arg("count", report.added.len().to_string()),
            );
        }
        log::info!(
            "Ingested {} file(s), rejected {}",
            report.added.len(),
            report.rejected.len()
        );
        report
    }

    /// Removes the record at `index` once the user confirms.
    ///
    /// Returns `Ok(false)` when the user declines. The viewer moves to the
    /// new current record, or closes when the gallery is empty.
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        let Some(name) = self.gallery.get(index).map(|r| r.name().to_string()) else {
            return self.report(Err(EditError::NoImage.into()));
        };
        if self.config.gallery.confirm_removals
            && !self
                .confirm
                .confirm(&ConfirmPrompt::RemoveImage { name: name.clone() })
        {
            return Ok(false);
        }

        // The record under the edit panel is gone or shifted.
        if index <= self.gallery.current_index() {
            self.close_edit_panel();
        }
        if self.gallery.remove(index).is_none() {
            return self.report(Err(EditError::NoImage.into()));
        }
        self.observer.record_removed(index, &name);
        self.notifications.clear_for_file(&name);
        log::info!("Removed {}", name);

        if self.gallery.is_empty() {
            self.close_viewer();
        } else if self.viewer.is_open() {
            self.viewer.reset();
            self.refresh_surface();
        }
        Ok(true)
    }

    pub fn remove_current(&mut self) -> Result<bool> {
        self.remove(self.gallery.current_index())
    }

    /// Empties the gallery once the user confirms.
    pub fn clear(&mut self) -> bool {
        if self.gallery.is_empty() {
            return false;
        }
        let prompt = ConfirmPrompt::ClearGallery {
            count: self.gallery.len(),
        };
        if self.config.gallery.confirm_removals && !self.confirm.confirm(&prompt) {
            return false;
        }
        self.close_viewer();
        self.gallery.clear();
        self.observer.cleared();
        self.notifications.clear();
        log::info!("Gallery cleared");
        true
    }

    // =========================================================================
    // Viewer
    // =========================================================================

    /// Opens the viewer on the record at `index` with an identity transform.
    pub fn open_viewer(&mut self, index: usize) -> Result<()> {
        if self.gallery.get(index).is_none() {
            return self.report(Err(EditError::NoImage.into()));
        }
        if index != self.gallery.current_index() {
            self.close_edit_panel();
        }
        self.gallery.set_current(index);
        self.viewer.open();
        self.surface.viewer_opened();
        self.refresh_surface();
        Ok(())
    }

    /// Closes the viewer, cancelling any edit in progress.
    pub fn close_viewer(&mut self) {
        self.close_edit_panel();
        if self.viewer.is_open() {
            self.viewer.close();
            self.surface.viewer_closed();
        }
    }

    /// Moves to the next record. Stops at the last one.
    pub fn next(&mut self) -> bool {
        if !self.gallery.has_next() {
            return false;
        }
        self.close_edit_panel();
        self.gallery.next();
        self.viewer.reset();
        self.refresh_surface();
        true
    }

    /// Moves to the previous record. Stops at the first one.
    pub fn previous(&mut self) -> bool {
        if !self.gallery.has_previous() {
            return false;
        }
        self.close_edit_panel();
        self.gallery.previous();
        self.viewer.reset();
        self.refresh_surface();
        true
    }

    pub fn zoom_in(&mut self) {
        self.viewer.zoom_in();
        self.surface.apply_transform(self.viewer.transform());
    }

    pub fn zoom_out(&mut self) {
        self.viewer.zoom_out();
        self.surface.apply_transform(self.viewer.transform());
    }

    pub fn rotate_left(&mut self) {
        self.viewer.rotate_left();
        self.surface.apply_transform(self.viewer.transform());
    }

    pub fn rotate_right(&mut self) {
        self.viewer.rotate_right();
        self.surface.apply_transform(self.viewer.transform());
    }

    pub fn reset_transform(&mut self) {
        self.viewer.reset();
        self.surface.apply_transform(self.viewer.transform());
    }

    /// One zoom step per wheel event, by the sign of `delta_y`.
    pub fn wheel(&mut self, delta_y: f32) {
        self.viewer.wheel(delta_y);
        self.surface.apply_transform(self.viewer.transform());
    }

    pub fn begin_pan(&mut self, pointer: Vector) {
        self.viewer.begin_pan(pointer);
    }

    pub fn pan_to(&mut self, pointer: Vector) {
        if self.viewer.pan_to(pointer, self.config.viewer.pan_limit_px) {
            self.surface.apply_transform(self.viewer.transform());
        }
    }

    pub fn end_pan(&mut self) {
        self.viewer.end_pan();
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.surface.toggle_fullscreen();
    }

    /// Pushes the current record's bytes, the transform and the effective
    /// filters to the surface.
    pub fn refresh_surface(&mut self) {
        let Some(record) = self.gallery.current() else {
            return;
        };
        let filters = self.editor.effective_filters(record.filters);
        self.surface.show_image(record.current());
        self.surface.apply_transform(self.viewer.transform());
        self.surface.apply_filter(&filters.to_css());
    }

    // =========================================================================
    // Edit panel and filters
    // =========================================================================

    /// Opens the edit panel on the current record, staging its filters.
    pub fn open_edit_panel(&mut self) -> Result<()> {
        let Some(committed) = self.gallery.current().map(|r| r.filters) else {
            return self.report(Err(EditError::NoImage.into()));
        };
        if self.editor.open_panel(committed) {
            log::debug!("Edit panel opened");
        }
        Ok(())
    }

    /// Closes the edit panel, discarding staged filters and any active tool.
    /// The surface goes back to the committed filters.
    pub fn close_edit_panel(&mut self) {
        if !self.editor.is_panel_open() {
            return;
        }
        let cancelled = self.editor.close_panel();
        self.clear_tool_overlay(cancelled.map(|tool| tool.kind()));
        if let Some(record) = self.gallery.current() {
            self.surface.apply_filter(&record.filters.to_css());
        }
    }

    pub fn toggle_edit_panel(&mut self) -> Result<()> {
        if self.editor.is_panel_open() {
            self.close_edit_panel();
            Ok(())
        } else {
            self.open_edit_panel()
        }
    }

    /// Updates one staged filter value and previews it.
    pub fn set_filter(&mut self, change: FilterChange) -> Result<Filters> {
        let staged = self.editor.set_filter(change).map_err(Error::from);
        let staged = self.report(staged)?;
        self.surface.apply_filter(&staged.to_css());
        Ok(staged)
    }

    pub fn reset_filter(&mut self, parameter: FilterParameter) -> Result<Filters> {
        let staged = self.editor.reset_filter(parameter).map_err(Error::from);
        let staged = self.report(staged)?;
        self.surface.apply_filter(&staged.to_css());
        Ok(staged)
    }

    /// Stores the staged filters on the current record and closes the panel.
    pub fn apply_filters(&mut self) -> Result<Filters> {
        if self.gallery.current().is_none() {
            return self.report(Err(EditError::NoImage.into()));
        }
        let committed = self.editor.commit_filters().map_err(Error::from);
        let (filters, cancelled) = self.report(committed)?;
        self.clear_tool_overlay(cancelled.map(|tool| tool.kind()));
        if let Some(record) = self.gallery.current_mut() {
            record.filters = filters;
            log::info!("Filters applied to {}: {}", record.name(), filters.to_css());
        }
        self.surface.apply_filter(&filters.to_css());
        self.notifications
            .push(Notification::success("notification-filters-applied"));
        Ok(filters)
    }

    /// Current record with its committed filters baked into the pixels, in
    /// the record's format.
    pub fn render_current(&mut self) -> Result<EncodedImage> {
        let rendered = self.try_render_current();
        self.report(rendered)
    }

    fn try_render_current(&self) -> Result<EncodedImage> {
        let record = self.gallery.current().ok_or(EditError::NoImage)?;
        if record.filters.is_identity() {
            return Ok(record.current().clone());
        }
        let pixels = media::decode(record.current())?;
        let filtered = media::filter::apply_filters(&pixels, &record.filters);
        media::encode(&filtered, record.mime_type())
    }

    /// Pushes `result`'s error, if any, as a notification.
    fn report<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.notifications.push(Notification::from_error(err));
        }
        result
    }
}
