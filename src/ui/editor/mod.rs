// SPDX-License-Identifier: MPL-2.0
//! Edit panel session.
//!
//! Opening the panel starts filter staging. While it is open, at most one of
//! the destructive tools (crop or watermark) is active. Closing the panel
//! cancels staging and whichever tool was running.

pub mod state;

pub use self::state::{
    CropDragState, CropState, FilterSession, HandlePosition, WatermarkState,
};

use crate::domain::editing::{FilterChange, FilterParameter, Filters, WatermarkSpec};
use crate::domain::ui::Size;
use crate::error::EditError;

const PANEL: &str = "edit panel";
const CROP: &str = "crop";
const WATERMARK: &str = "watermark";

/// Exclusive destructive tools.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorTool {
    Crop(CropState),
    Watermark(WatermarkState),
}

impl EditorTool {
    #[must_use]
    pub fn kind(&self) -> ToolKind {
        match self {
            EditorTool::Crop(_) => ToolKind::Crop,
            EditorTool::Watermark(_) => ToolKind::Watermark,
        }
    }
}

/// Which tool is active, without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Crop,
    Watermark,
}

impl ToolKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Crop => CROP,
            ToolKind::Watermark => WATERMARK,
        }
    }
}

/// State of the edit panel for the current record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSession {
    panel_open: bool,
    filters: FilterSession,
    tool: Option<EditorTool>,
}

impl EditorSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Opens the panel and stages a copy of `committed`.
    ///
    /// Returns `false` when the panel was already open; staging is kept.
    pub fn open_panel(&mut self, committed: Filters) -> bool {
        if self.panel_open {
            return false;
        }
        self.panel_open = true;
        self.filters.begin(committed);
        true
    }

    /// Closes the panel, dropping staged filters and any active tool.
    ///
    /// Returns the cancelled tool so the caller can clear its overlay.
    pub fn close_panel(&mut self) -> Option<EditorTool> {
        self.panel_open = false;
        self.filters.cancel();
        self.tool.take()
    }

    #[must_use]
    pub fn filters(&self) -> &FilterSession {
        &self.filters
    }

    /// Filters the surface must show for a record with `committed` filters.
    #[must_use]
    pub fn effective_filters(&self, committed: Filters) -> Filters {
        self.filters.effective(committed)
    }

    pub fn set_filter(&mut self, change: FilterChange) -> Result<Filters, EditError> {
        self.filters
            .set(change)
            .ok_or(EditError::InactiveMode(PANEL))
    }

    pub fn reset_filter(&mut self, parameter: FilterParameter) -> Result<Filters, EditError> {
        self.filters
            .reset(parameter)
            .ok_or(EditError::InactiveMode(PANEL))
    }

    /// Ends the session keeping the staged filters, which are returned for
    /// storing on the record. Any active tool is cancelled.
    pub fn commit_filters(&mut self) -> Result<(Filters, Option<EditorTool>), EditError> {
        let filters = self.filters.commit().ok_or(EditError::InactiveMode(PANEL))?;
        Ok((filters, self.close_panel()))
    }

    #[must_use]
    pub fn active_tool(&self) -> Option<ToolKind> {
        self.tool.as_ref().map(EditorTool::kind)
    }

    /// Starts cropping over a display of the given size.
    pub fn enter_crop(&mut self, display: Size) -> Result<&CropState, EditError> {
        self.ensure_tool_free()?;
        let crop = CropState::new(display)?;
        log::debug!("Crop mode entered at {:?}", crop.region());
        self.tool = Some(EditorTool::Crop(crop));
        self.crop()
    }

    pub fn crop(&self) -> Result<&CropState, EditError> {
        match &self.tool {
            Some(EditorTool::Crop(crop)) => Ok(crop),
            _ => Err(EditError::InactiveMode(CROP)),
        }
    }

    pub fn crop_mut(&mut self) -> Result<&mut CropState, EditError> {
        match &mut self.tool {
            Some(EditorTool::Crop(crop)) => Ok(crop),
            _ => Err(EditError::InactiveMode(CROP)),
        }
    }

    /// Leaves crop mode, handing back its state.
    pub fn take_crop(&mut self) -> Result<CropState, EditError> {
        match self.tool.take() {
            Some(EditorTool::Crop(crop)) => Ok(crop),
            other => {
                self.tool = other;
                Err(EditError::InactiveMode(CROP))
            }
        }
    }

    /// Starts placing `spec` over a display of the given size.
    pub fn enter_watermark(
        &mut self,
        spec: WatermarkSpec,
        display: Size,
        clamp_drag: bool,
    ) -> Result<&WatermarkState, EditError> {
        self.ensure_tool_free()?;
        let watermark = WatermarkState::new(spec, display, clamp_drag)?;
        self.tool = Some(EditorTool::Watermark(watermark));
        self.watermark()
    }

    pub fn watermark(&self) -> Result<&WatermarkState, EditError> {
        match &self.tool {
            Some(EditorTool::Watermark(watermark)) => Ok(watermark),
            _ => Err(EditError::InactiveMode(WATERMARK)),
        }
    }

    pub fn watermark_mut(&mut self) -> Result<&mut WatermarkState, EditError> {
        match &mut self.tool {
            Some(EditorTool::Watermark(watermark)) => Ok(watermark),
            _ => Err(EditError::InactiveMode(WATERMARK)),
        }
    }

    /// Leaves watermark mode, handing back its state.
    pub fn take_watermark(&mut self) -> Result<WatermarkState, EditError> {
        match self.tool.take() {
            Some(EditorTool::Watermark(watermark)) => Ok(watermark),
            other => {
                self.tool = other;
                Err(EditError::InactiveMode(WATERMARK))
            }
        }
    }

    fn ensure_tool_free(&self) -> Result<(), EditError> {
        if !self.panel_open {
            return Err(EditError::InactiveMode(PANEL));
        }
        match self.active_tool() {
            Some(kind) => Err(EditError::ModeBusy(kind.label())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::FilterPreset;

    fn display() -> Size {
        Size::new(800.0, 600.0)
    }

    fn open_session() -> EditorSession {
        let mut session = EditorSession::new();
        assert!(session.open_panel(Filters::default()));
        session
    }

    #[test]
    fn tools_need_an_open_panel() {
        let mut session = EditorSession::new();
        assert_eq!(
            session.enter_crop(display()).err(),
            Some(EditError::InactiveMode(PANEL))
        );
    }

    #[test]
    fn crop_and_watermark_are_exclusive() {
        let mut session = open_session();
        session.enter_crop(display()).expect("crop starts");

        let busy = session.enter_watermark(WatermarkSpec::default(), display(), false);
        assert_eq!(busy.err(), Some(EditError::ModeBusy(CROP)));
        assert_eq!(session.active_tool(), Some(ToolKind::Crop));
    }

    #[test]
    fn degenerate_display_leaves_session_idle() {
        let mut session = open_session();
        let result = session.enter_crop(Size::new(0.0, 0.0));
        assert!(matches!(result, Err(EditError::GeometryDegenerate { .. })));
        assert_eq!(session.active_tool(), None);
    }

    #[test]
    fn closing_panel_cancels_tool_and_staging() {
        let mut session = open_session();
        session
            .set_filter(FilterChange::Preset(FilterPreset::Invert))
            .expect("staging active");
        session
            .enter_watermark(WatermarkSpec::default(), display(), false)
            .expect("watermark starts");

        let cancelled = session.close_panel();
        assert!(matches!(cancelled, Some(EditorTool::Watermark(_))));
        assert!(!session.is_panel_open());
        assert_eq!(session.effective_filters(Filters::default()), Filters::default());
    }

    #[test]
    fn take_crop_keeps_other_tool() {
        let mut session = open_session();
        session
            .enter_watermark(WatermarkSpec::default(), display(), false)
            .expect("watermark starts");
        assert_eq!(session.take_crop().err(), Some(EditError::InactiveMode(CROP)));
        assert_eq!(session.active_tool(), Some(ToolKind::Watermark));
        assert!(session.take_watermark().is_ok());
        assert_eq!(session.active_tool(), None);
    }

    #[test]
    fn commit_filters_returns_staged_and_closes() {
        let mut session = open_session();
        session
            .set_filter(FilterChange::Brightness(140.0))
            .expect("staging active");
        let (filters, cancelled) = session.commit_filters().expect("staging active");
        assert_eq!(filters.brightness, 140.0);
        assert!(cancelled.is_none());
        assert!(!session.is_panel_open());
        assert!(session.set_filter(FilterChange::Contrast(10.0)).is_err());
    }

    #[test]
    fn reopening_keeps_staging() {
        let mut session = open_session();
        session
            .set_filter(FilterChange::Saturation(0.0))
            .expect("staging active");
        assert!(!session.open_panel(Filters::default()));
        assert_eq!(session.filters().staged().map(|f| f.saturation), Some(0.0));
    }
}
