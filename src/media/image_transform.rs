// SPDX-License-Identifier: MPL-2.0
//! Crop rasterization at source resolution.

use crate::domain::ui::{Rect, Size};
use crate::error::EditError;
use image_rs::{DynamicImage, GenericImageView};

/// Source-space rectangle in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Per-axis ratio between natural (source) and displayed size.
///
/// Returns `GeometryDegenerate` for an unsized display.
pub fn display_ratios(display: Size, natural: (u32, u32)) -> Result<(f32, f32), EditError> {
    if display.is_degenerate() {
        return Err(EditError::GeometryDegenerate {
            width: display.width,
            height: display.height,
        });
    }
    Ok((
        natural.0 as f32 / display.width,
        natural.1 as f32 / display.height,
    ))
}

/// Maps a display-space region into the source image, rounding to the nearest
/// pixel on each axis independently.
pub fn source_rect(
    region: Rect,
    display: Size,
    natural: (u32, u32),
) -> Result<PixelRect, EditError> {
    let (ratio_x, ratio_y) = display_ratios(display, natural)?;
    let to_px = |value: f32| -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let px = value.round().max(0.0) as u32;
        px
    };
    Ok(PixelRect {
        x: to_px(region.left * ratio_x),
        y: to_px(region.top * ratio_y),
        width: to_px(region.width * ratio_x).max(1),
        height: to_px(region.height * ratio_y).max(1),
    })
}

/// Crop the image to the specified rectangle.
///
/// The rectangle coordinates are clamped to the image boundaries.
/// If the resulting crop area is invalid (zero width or height), returns None.
pub fn crop(image: &DynamicImage, rect: PixelRect) -> Option<DynamicImage> {
    let (img_width, img_height) = image.dimensions();
    if img_width == 0 || img_height == 0 {
        return None;
    }

    let x = rect.x.min(img_width.saturating_sub(1));
    let y = rect.y.min(img_height.saturating_sub(1));

    let width = rect.width.min(img_width.saturating_sub(x)).max(1);
    let height = rect.height.min(img_height.saturating_sub(y)).max(1);

    Some(image.crop_imm(x, y, width, height))
}

/// Crops the pixels under a display-space region.
pub fn crop_display_region(
    image: &DynamicImage,
    region: Rect,
    display: Size,
) -> Result<DynamicImage, EditError> {
    let rect = source_rect(region, display, image.dimensions())?;
    crop(image, rect).ok_or_else(|| EditError::Compositing("image has no pixels".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_image;
    use image_rs::{DynamicImage, ImageBuffer};

    fn rect(x: u32, y: u32, width: u32, height: u32) -> PixelRect {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn crop_within_bounds() {
        let img = create_test_image(10, 8);
        let result = crop(&img, rect(2, 2, 4, 3)).expect("crop inside image");
        assert_eq!(result.dimensions(), (4, 3));
    }

    #[test]
    fn crop_clamps_to_boundaries() {
        let img = create_test_image(10, 8);
        let result = crop(&img, rect(8, 6, 10, 10)).expect("clamped crop");
        assert_eq!(result.dimensions(), (2, 2));
    }

    #[test]
    fn crop_entire_image() {
        let img = create_test_image(10, 8);
        let result = crop(&img, rect(0, 0, 10, 8)).expect("full crop");
        assert_eq!(result.dimensions(), (10, 8));
    }

    #[test]
    fn source_rect_scales_each_axis_independently() {
        let mapped = source_rect(
            Rect::new(100.0, 50.0, 400.0, 300.0),
            Size::new(800.0, 600.0),
            (1600, 900),
        )
        .expect("sized display");
        assert_eq!(mapped, rect(200, 75, 800, 450));
    }

    #[test]
    fn double_resolution_region_maps_to_double_size() {
        let img = create_test_image(1600, 1200);
        let cropped = crop_display_region(
            &img,
            Rect::new(100.0, 50.0, 400.0, 300.0),
            Size::new(800.0, 600.0),
        )
        .expect("crop");
        assert_eq!(cropped.dimensions(), (800, 600));
    }

    #[test]
    fn full_display_region_keeps_natural_size() {
        let img = create_test_image(1023, 767);
        let display = Size::new(640.0, 480.0);
        let cropped =
            crop_display_region(&img, Rect::new(0.0, 0.0, 640.0, 480.0), display).expect("crop");
        assert_eq!(cropped.dimensions(), (1023, 767));
    }

    #[test]
    fn degenerate_display_is_rejected() {
        let img = create_test_image(10, 10);
        let result = crop_display_region(&img, Rect::new(0.0, 0.0, 5.0, 5.0), Size::default());
        assert!(matches!(
            result,
            Err(EditError::GeometryDegenerate { .. })
        ));
    }

    #[test]
    fn crop_copies_the_right_pixels() {
        let mut buffer = ImageBuffer::from_pixel(4, 4, image_rs::Rgba([0, 0, 0, 255]));
        buffer.put_pixel(2, 1, image_rs::Rgba([255, 0, 0, 255]));
        let img = DynamicImage::ImageRgba8(buffer);

        let cropped = crop(&img, rect(2, 1, 2, 2)).expect("crop");
        assert_eq!(cropped.to_rgba8().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }
}
