// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcuts of the open viewer.
//!
//! | Key            | Command                                   |
//! |----------------|-------------------------------------------|
//! | `Escape`       | cancel crop, watermark, edits, or close   |
//! | `←` / `→`      | previous / next image                     |
//! | `+` `=` / `-`  | zoom in / out                             |
//! | `r`            | rotate right                              |
//! | `f`            | toggle fullscreen                         |
//! | `0`            | reset transform                           |
//! | `e`            | toggle edit panel                         |
//! | `c` / `w`      | toggle crop / watermark (edit panel only) |
//! | `Delete` `⌫`   | remove current image                      |
//!
//! Viewer commands are disabled while any editing mode is active.

use std::str::FromStr;

/// A key press, named like DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Delete,
    Backspace,
    Character(char),
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Escape" => Ok(Key::Escape),
            "ArrowLeft" => Ok(Key::ArrowLeft),
            "ArrowRight" => Ok(Key::ArrowRight),
            "Delete" => Ok(Key::Delete),
            "Backspace" => Ok(Key::Backspace),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Key::Character(c)),
                    _ => Err(format!("unknown key {:?}", s)),
                }
            }
        }
    }
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CancelCrop,
    CancelWatermark,
    CancelEdits,
    CloseViewer,
    Previous,
    Next,
    ZoomIn,
    ZoomOut,
    RotateRight,
    ToggleFullscreen,
    ResetTransform,
    ToggleEditPanel,
    ToggleCrop,
    ToggleWatermark,
    RemoveCurrent,
}

/// Modes that gate the shortcuts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub viewer_open: bool,
    pub editing: bool,
    pub cropping: bool,
    pub watermarking: bool,
    pub has_images: bool,
}

impl ModeFlags {
    fn any_edit(self) -> bool {
        self.editing || self.cropping || self.watermarking
    }
}

/// Maps a key press to a command. Keys do nothing while the viewer is closed.
#[must_use]
pub fn command_for(key: Key, modes: ModeFlags) -> Option<Command> {
    if !modes.viewer_open {
        return None;
    }
    let viewing = !modes.any_edit();
    match key {
        Key::Escape => Some(if modes.cropping {
            Command::CancelCrop
        } else if modes.watermarking {
            Command::CancelWatermark
        } else if modes.editing {
            Command::CancelEdits
        } else {
            Command::CloseViewer
        }),
        Key::ArrowLeft if viewing => Some(Command::Previous),
        Key::ArrowRight if viewing => Some(Command::Next),
        Key::Delete | Key::Backspace if viewing && modes.has_images => {
            Some(Command::RemoveCurrent)
        }
        Key::Character(c) => character_command(c.to_ascii_lowercase(), modes, viewing),
        _ => None,
    }
}

fn character_command(c: char, modes: ModeFlags, viewing: bool) -> Option<Command> {
    match c {
        '+' | '=' if viewing => Some(Command::ZoomIn),
        '-' if viewing => Some(Command::ZoomOut),
        'r' if viewing => Some(Command::RotateRight),
        'f' if viewing => Some(Command::ToggleFullscreen),
        '0' if viewing => Some(Command::ResetTransform),
        'e' if !modes.cropping && !modes.watermarking => Some(Command::ToggleEditPanel),
        'c' if modes.editing && !modes.watermarking => Some(Command::ToggleCrop),
        'w' if modes.editing && !modes.cropping => Some(Command::ToggleWatermark),
        _ => None,
    }
}
