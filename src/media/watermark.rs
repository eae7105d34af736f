// SPDX-License-Identifier: MPL-2.0
//! Watermark compositing at source resolution.
//!
//! Display-space inputs are mapped into the source image with independent
//! per-axis ratios; the font size and style parameters scale by the smaller
//! ratio. Drawing order follows a 2D canvas: shadow or outline first, then the
//! fill, all blended source-over.

use super::color::Color;
use super::image_transform::display_ratios;
use super::text::{GlyphRasterizer, TextMask};
use crate::config::{
    WATERMARK_OUTLINE_WIDTH_PX, WATERMARK_SHADOW_ALPHA, WATERMARK_SHADOW_BLUR_PX,
    WATERMARK_SHADOW_OFFSET_PX, WATERMARK_TRANSPARENT_ALPHA,
};
use crate::domain::editing::{WatermarkPosition, WatermarkSpec, WatermarkStyle};
use crate::domain::ui::Size;
use crate::error::EditError;
use image_rs::{DynamicImage, GenericImageView, GrayImage, Luma, RgbaImage};

/// Draws the watermark onto a copy of `image`.
pub fn composite_watermark<R>(
    image: &DynamicImage,
    spec: &WatermarkSpec,
    display: Size,
    rasterizer: &R,
) -> Result<DynamicImage, EditError>
where
    R: GlyphRasterizer + ?Sized,
{
    let (width, height) = image.dimensions();
    let (ratio_x, ratio_y) = display_ratios(display, (width, height))?;
    let ratio_min = ratio_x.min(ratio_y);

    let mask = rasterizer.rasterize(spec.text(), spec.font_size.scaled(ratio_min))?;
    let (origin_x, origin_y) = mask_origin(&mask, spec.position, (width, height), (ratio_x, ratio_y));
    let fill = Color::parse_or_black(&spec.color);

    let mut canvas: RgbaImage = image.to_rgba8();
    match spec.style {
        WatermarkStyle::None => {
            blend_mask(&mut canvas, &mask, origin_x, origin_y, fill);
        }
        WatermarkStyle::Transparent => {
            let faded = fill.with_alpha_factor(WATERMARK_TRANSPARENT_ALPHA);
            blend_mask(&mut canvas, &mask, origin_x, origin_y, faded);
        }
        WatermarkStyle::Shadow => {
            // Canvas shadowBlur is twice the gaussian standard deviation.
            let sigma = WATERMARK_SHADOW_BLUR_PX * ratio_min / 2.0;
            let shadow = blur_mask(&mask, sigma);
            let pad_x = (shadow.width - mask.width) as f32 / 2.0;
            let pad_y = (shadow.height - mask.height) as f32 / 2.0;
            blend_mask(
                &mut canvas,
                &shadow,
                origin_x + WATERMARK_SHADOW_OFFSET_PX * ratio_x - pad_x,
                origin_y + WATERMARK_SHADOW_OFFSET_PX * ratio_y - pad_y,
                Color::rgba(0, 0, 0, WATERMARK_SHADOW_ALPHA),
            );
            blend_mask(&mut canvas, &mask, origin_x, origin_y, fill);
        }
        WatermarkStyle::Outline => {
            let line_width = WATERMARK_OUTLINE_WIDTH_PX * ratio_min;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let radius = (line_width / 2.0).ceil().max(1.0) as u32;
            let stroke = dilate_mask(&mask, radius);
            blend_mask(
                &mut canvas,
                &stroke,
                origin_x - radius as f32,
                origin_y - radius as f32,
                Color::BLACK,
            );
            blend_mask(&mut canvas, &mask, origin_x, origin_y, fill);
        }
    }
    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Source-space position of the mask's top-left corner.
fn mask_origin(
    mask: &TextMask,
    position: WatermarkPosition,
    (width, height): (u32, u32),
    (ratio_x, ratio_y): (f32, f32),
) -> (f32, f32) {
    match position {
        WatermarkPosition::Centered => (
            width as f32 / 2.0 - mask.line_width / 2.0 - mask.line_left,
            height as f32 / 2.0 - mask.line_height / 2.0 - mask.line_top,
        ),
        WatermarkPosition::Explicit { left, top } => (
            left * ratio_x - mask.line_left,
            top * ratio_y - mask.line_top,
        ),
    }
}

/// Source-over blend of `color` through `mask` placed at `(origin_x, origin_y)`.
fn blend_mask(canvas: &mut RgbaImage, mask: &TextMask, origin_x: f32, origin_y: f32, color: Color) {
    #[allow(clippy::cast_possible_truncation)]
    let (ox, oy) = (origin_x.round() as i64, origin_y.round() as i64);
    let (canvas_w, canvas_h) = (i64::from(canvas.width()), i64::from(canvas.height()));

    for my in 0..mask.height {
        let y = oy + i64::from(my);
        if y < 0 || y >= canvas_h {
            continue;
        }
        for mx in 0..mask.width {
            let x = ox + i64::from(mx);
            if x < 0 || x >= canvas_w {
                continue;
            }
            let src_alpha = color.a * mask.get(mx, my);
            if src_alpha <= 0.0 {
                continue;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            let dst_alpha = f32::from(pixel[3]) / 255.0;
            let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
            let blend = |src: f32, dst: u8| -> u8 {
                let dst = f32::from(dst) / 255.0;
                let value = (src * src_alpha + dst * dst_alpha * (1.0 - src_alpha)) / out_alpha;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let byte = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
                byte
            };
            pixel[0] = blend(color.r, pixel[0]);
            pixel[1] = blend(color.g, pixel[1]);
            pixel[2] = blend(color.b, pixel[2]);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let alpha = (out_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
            pixel[3] = alpha;
        }
    }
}

/// Gaussian-blurred copy of the mask, padded by three standard deviations on
/// every side so the falloff is not clipped.
fn blur_mask(mask: &TextMask, sigma: f32) -> TextMask {
    if sigma <= 0.0 {
        return mask.clone();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pad = (sigma * 3.0).ceil() as u32;
    let mut gray = GrayImage::new(mask.width + 2 * pad, mask.height + 2 * pad);
    for y in 0..mask.height {
        for x in 0..mask.width {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = (mask.get(x, y) * 255.0).round() as u8;
            gray.put_pixel(x + pad, y + pad, Luma([value]));
        }
    }
    let blurred = image_rs::imageops::blur(&gray, sigma);

    let mut out = TextMask::empty(blurred.width(), blurred.height());
    for (x, y, pixel) in blurred.enumerate_pixels() {
        out.coverage[y as usize * out.width as usize + x as usize] = f32::from(pixel[0]) / 255.0;
    }
    out
}

/// Mask grown by `radius` pixels in every direction (disc structuring element).
fn dilate_mask(mask: &TextMask, radius: u32) -> TextMask {
    let r = i64::from(radius);
    let mut out = TextMask::empty(mask.width + 2 * radius, mask.height + 2 * radius);
    for y in 0..i64::from(out.height) {
        for x in 0..i64::from(out.width) {
            let mut best = 0.0f32;
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy > r * r {
                        continue;
                    }
                    let (sx, sy) = (x - r + dx, y - r + dy);
                    if sx < 0 || sy < 0 {
                        continue;
                    }
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let coverage = mask.get(sx as u32, sy as u32);
                    best = best.max(coverage);
                }
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let idx = y as usize * out.width as usize + x as usize;
            out.coverage[idx] = best;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::FontSize;
    use crate::test_utils::create_solid_image;
    use std::cell::Cell;

    /// Draws every glyph as a solid block `px` tall and `px / 2` wide.
    struct BlockRasterizer {
        last_px: Cell<f32>,
    }

    impl BlockRasterizer {
        fn new() -> Self {
            Self {
                last_px: Cell::new(0.0),
            }
        }
    }

    impl GlyphRasterizer for BlockRasterizer {
        fn rasterize(&self, text: &str, px: f32) -> Result<TextMask, EditError> {
            self.last_px.set(px);
            let width = (px / 2.0 * text.chars().count() as f32).round() as u32;
            let height = px.round() as u32;
            let mut mask = TextMask::empty(width.max(1), height.max(1));
            mask.coverage.iter_mut().for_each(|c| *c = 1.0);
            Ok(mask)
        }
    }

    fn spec(style: WatermarkStyle, color: &str, size: f32) -> WatermarkSpec {
        WatermarkSpec::new("AB", style, color, FontSize::new(size))
    }

    #[test]
    fn centered_fill_covers_image_center() {
        let base = create_solid_image(100, 100, [0, 0, 0, 255]);
        let out = composite_watermark(
            &base,
            &spec(WatermarkStyle::None, "#ffffff", 20.0),
            Size::new(100.0, 100.0),
            &BlockRasterizer::new(),
        )
        .expect("composite");
        let rgba = out.to_rgba8();
        assert_eq!(rgba.get_pixel(50, 50).0, [255, 255, 255, 255]);
        assert_eq!(rgba.get_pixel(2, 2).0, [0, 0, 0, 255]);
    }

    #[test]
    fn font_size_scales_by_smaller_ratio() {
        let base = create_solid_image(400, 300, [0, 0, 0, 255]);
        let rasterizer = BlockRasterizer::new();
        composite_watermark(
            &base,
            &spec(WatermarkStyle::None, "#fff", 10.0),
            Size::new(100.0, 100.0),
            &rasterizer,
        )
        .expect("composite");
        assert_eq!(rasterizer.last_px.get(), 30.0);
    }

    #[test]
    fn explicit_position_is_scaled_per_axis() {
        let base = create_solid_image(200, 100, [0, 0, 0, 255]);
        let mut watermark = spec(WatermarkStyle::None, "#ff0000", 10.0);
        watermark.position = WatermarkPosition::Explicit {
            left: 10.0,
            top: 20.0,
        };
        let out = composite_watermark(
            &base,
            &watermark,
            Size::new(100.0, 100.0),
            &BlockRasterizer::new(),
        )
        .expect("composite");
        let rgba = out.to_rgba8();
        // Top-left of the text lands at (20, 20) in source space.
        assert_eq!(rgba.get_pixel(20, 20).0, [255, 0, 0, 255]);
        assert_eq!(rgba.get_pixel(19, 20).0, [0, 0, 0, 255]);
    }

    #[test]
    fn transparent_style_blends_half() {
        let base = create_solid_image(50, 50, [0, 0, 0, 255]);
        let out = composite_watermark(
            &base,
            &spec(WatermarkStyle::Transparent, "#ffffff", 20.0),
            Size::new(50.0, 50.0),
            &BlockRasterizer::new(),
        )
        .expect("composite");
        let [r, _, _, a] = out.to_rgba8().get_pixel(25, 25).0;
        assert_eq!(r, 128);
        assert_eq!(a, 255);
    }

    #[test]
    fn outline_draws_black_ring_around_fill() {
        let base = create_solid_image(100, 100, [255, 255, 255, 255]);
        let out = composite_watermark(
            &base,
            &spec(WatermarkStyle::Outline, "#ff0000", 20.0),
            Size::new(100.0, 100.0),
            &BlockRasterizer::new(),
        )
        .expect("composite");
        let rgba = out.to_rgba8();
        // Fill spans x 40..60, y 40..60; the 1px stroke sits just outside.
        assert_eq!(rgba.get_pixel(50, 50).0, [255, 0, 0, 255]);
        assert_eq!(rgba.get_pixel(39, 50).0, [0, 0, 0, 255]);
        assert_eq!(rgba.get_pixel(30, 50).0, [255, 255, 255, 255]);
    }

    #[test]
    fn shadow_darkens_below_right_of_text() {
        let base = create_solid_image(100, 100, [255, 255, 255, 255]);
        let out = composite_watermark(
            &base,
            &spec(WatermarkStyle::Shadow, "#ffffff", 20.0),
            Size::new(100.0, 100.0),
            &BlockRasterizer::new(),
        )
        .expect("composite");
        let rgba = out.to_rgba8();
        assert_eq!(rgba.get_pixel(50, 50).0, [255, 255, 255, 255]);
        assert!(rgba.get_pixel(61, 61).0[0] < 255);
    }

    #[test]
    fn degenerate_display_fails() {
        let base = create_solid_image(10, 10, [0, 0, 0, 255]);
        let result = composite_watermark(
            &base,
            &WatermarkSpec::default(),
            Size::new(0.0, 10.0),
            &BlockRasterizer::new(),
        );
        assert!(matches!(result, Err(EditError::GeometryDegenerate { .. })));
    }
}
