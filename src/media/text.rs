// SPDX-License-Identifier: MPL-2.0
//! Text rasterization for watermarks.
//!
//! [`GlyphRasterizer`] turns a single line of text into a coverage mask. The
//! default implementation, [`AbGlyphRasterizer`], uses `ab_glyph` with a font
//! file from configuration or from well-known system locations.

use crate::error::EditError;
use ab_glyph::{point, Font, FontArc, FontVec, GlyphId, PxScale, ScaleFont};
use std::path::Path;

/// Fonts tried in order when no font is configured. CJK-capable fonts come
/// first so the default watermark text renders.
const SYSTEM_FONT_CANDIDATES: [&str; 12] = [
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Anti-aliased coverage of one rendered line of text.
///
/// The mask may extend past the line box when glyphs overhang their advance.
/// `line_left`/`line_top` locate the line box inside the mask.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMask {
    pub width: u32,
    pub height: u32,
    /// Row-major coverage in `0..=1`, `width * height` entries.
    pub coverage: Vec<f32>,
    pub line_left: f32,
    pub line_top: f32,
    pub line_width: f32,
    pub line_height: f32,
}

impl TextMask {
    /// An all-transparent mask of the given size.
    #[must_use]
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0.0; width as usize * height as usize],
            line_left: 0.0,
            line_top: 0.0,
            line_width: width as f32,
            line_height: height as f32,
        }
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }
}

/// Renders a line of text at a pixel size into a coverage mask.
pub trait GlyphRasterizer {
    fn rasterize(&self, text: &str, px: f32) -> Result<TextMask, EditError>;
}

/// `ab_glyph` backed rasterizer.
#[derive(Clone)]
pub struct AbGlyphRasterizer {
    font: FontArc,
}

impl std::fmt::Debug for AbGlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbGlyphRasterizer").finish_non_exhaustive()
    }
}

impl AbGlyphRasterizer {
    /// Parses a TrueType/OpenType font or the first face of a collection.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, EditError> {
        let font = FontVec::try_from_vec_and_index(bytes, 0)
            .map_err(|err| EditError::FontUnavailable(err.to_string()))?;
        Ok(Self {
            font: FontArc::new(font),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, EditError> {
        let bytes = std::fs::read(path)
            .map_err(|err| EditError::FontUnavailable(format!("{}: {}", path.display(), err)))?;
        Self::from_bytes(bytes)
    }

    /// Loads the first usable font from the system candidates.
    pub fn system() -> Result<Self, EditError> {
        for candidate in SYSTEM_FONT_CANDIDATES {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match Self::from_path(path) {
                Ok(rasterizer) => {
                    log::debug!("Watermark font: {}", candidate);
                    return Ok(rasterizer);
                }
                Err(err) => log::debug!("Skipping font {}: {}", candidate, err),
            }
        }
        Err(EditError::FontUnavailable(
            "no system font found".to_string(),
        ))
    }

    /// Uses the configured font when set, the system lookup otherwise.
    pub fn from_config(font_path: Option<&Path>) -> Result<Self, EditError> {
        match font_path {
            Some(path) => Self::from_path(path),
            None => Self::system(),
        }
    }

    fn layout(&self, text: &str, scale: PxScale) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(scale);
        let mut glyphs = Vec::new();
        let mut cursor_x = 0.0f32;
        let mut last_glyph: Option<GlyphId> = None;
        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            if let Some(prev) = last_glyph {
                cursor_x += scaled.kern(prev, glyph_id);
            }
            glyphs.push((glyph_id, cursor_x));
            cursor_x += scaled.h_advance(glyph_id);
            last_glyph = Some(glyph_id);
        }
        (glyphs, cursor_x)
    }
}

impl GlyphRasterizer for AbGlyphRasterizer {
    fn rasterize(&self, text: &str, px: f32) -> Result<TextMask, EditError> {
        if !(px.is_finite() && px > 0.0) {
            return Err(EditError::Compositing(format!("invalid font size {}", px)));
        }
        let scale = PxScale::from(px);
        let scaled = self.font.as_scaled(scale);
        let ascent = scaled.ascent();
        let line_height = ascent - scaled.descent();
        let (glyphs, line_width) = self.layout(text, scale);

        let outlined: Vec<_> = glyphs
            .into_iter()
            .filter_map(|(id, x)| {
                self.font
                    .outline_glyph(id.with_scale_and_position(scale, point(x, ascent)))
            })
            .collect();

        // Union of the line box and every glyph's pixel bounds.
        let (mut min_x, mut min_y) = (0.0f32, 0.0f32);
        let (mut max_x, mut max_y) = (line_width, line_height);
        for glyph in &outlined {
            let bounds = glyph.px_bounds();
            min_x = min_x.min(bounds.min.x);
            min_y = min_y.min(bounds.min.y);
            max_x = max_x.max(bounds.max.x);
            max_y = max_y.max(bounds.max.y);
        }
        let offset_x = -min_x.floor();
        let offset_y = -min_y.floor();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = (max_x + offset_x).ceil().max(1.0) as u32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let height = (max_y + offset_y).ceil().max(1.0) as u32;

        let mut mask = TextMask::empty(width, height);
        mask.line_left = offset_x;
        mask.line_top = offset_y;
        mask.line_width = line_width;
        mask.line_height = line_height;

        for glyph in &outlined {
            let bounds = glyph.px_bounds();
            let base_x = bounds.min.x + offset_x;
            let base_y = bounds.min.y + offset_y;
            glyph.draw(|gx, gy, coverage| {
                #[allow(clippy::cast_possible_truncation)]
                let x = (base_x + gx as f32).round() as i64;
                #[allow(clippy::cast_possible_truncation)]
                let y = (base_y + gy as f32).round() as i64;
                if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
                    return;
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let idx = y as usize * width as usize + x as usize;
                mask.coverage[idx] = (mask.coverage[idx] + coverage).min(1.0);
            });
        }
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_has_no_coverage() {
        let mask = TextMask::empty(4, 3);
        assert_eq!(mask.coverage.len(), 12);
        assert_eq!(mask.get(3, 2), 0.0);
        assert_eq!(mask.get(10, 10), 0.0);
    }

    #[test]
    fn missing_font_file_is_font_unavailable() {
        let result = AbGlyphRasterizer::from_path(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(result, Err(EditError::FontUnavailable(_))));
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        let result = AbGlyphRasterizer::from_bytes(b"not a font".to_vec());
        assert!(matches!(result, Err(EditError::FontUnavailable(_))));
    }

    #[test]
    fn system_font_renders_some_coverage_when_available() {
        let Ok(rasterizer) = AbGlyphRasterizer::system() else {
            return;
        };
        let mask = rasterizer.rasterize("DRAFT", 32.0).expect("rasterize");
        assert!(mask.width > 0 && mask.height > 0);
        assert!(mask.coverage.iter().any(|&c| c > 0.0));
        assert!(mask.line_height > 0.0);
    }
}
