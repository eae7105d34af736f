// SPDX-License-Identifier: MPL-2.0
//! Keyboard routing: key presses become studio commands.

use super::Studio;
use crate::error::Result;
use crate::ui::editor::ToolKind;
use crate::ui::surface::{Confirm, GalleryObserver, RenderSurface};
use crate::ui::viewer::{command_for, Command, Key, ModeFlags};

impl<S, O, C> Studio<S, O, C>
where
    S: RenderSurface,
    O: GalleryObserver,
    C: Confirm,
{
    /// Modes gating the keyboard shortcuts right now.
    #[must_use]
    pub fn mode_flags(&self) -> ModeFlags {
        let tool = self.editor.active_tool();
        ModeFlags {
            viewer_open: self.viewer.is_open(),
            editing: self.editor.is_panel_open(),
            cropping: tool == Some(ToolKind::Crop),
            watermarking: tool == Some(ToolKind::Watermark),
            has_images: !self.gallery.is_empty(),
        }
    }

    /// Runs the command bound to `key`, if any, and returns it.
    pub fn handle_key(&mut self, key: Key) -> Result<Option<Command>> {
        let Some(command) = command_for(key, self.mode_flags()) else {
            return Ok(None);
        };
        log::debug!("{:?} -> {:?}", key, command);
        self.run_command(command)?;
        Ok(Some(command))
    }

    pub fn run_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::CancelCrop => {
                self.cancel_crop();
            }
            Command::CancelWatermark => {
                self.cancel_watermark();
            }
            Command::CancelEdits => self.close_edit_panel(),
            Command::CloseViewer => self.close_viewer(),
            Command::Previous => {
                self.previous();
            }
            Command::Next => {
                self.next();
            }
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::RotateRight => self.rotate_right(),
            Command::ToggleFullscreen => self.toggle_fullscreen(),
            Command::ResetTransform => self.reset_transform(),
            Command::ToggleEditPanel => self.toggle_edit_panel()?,
            Command::ToggleCrop => self.toggle_crop()?,
            Command::ToggleWatermark => self.toggle_watermark()?,
            Command::RemoveCurrent => {
                self.remove_current()?;
            }
        }
        Ok(())
    }
}
