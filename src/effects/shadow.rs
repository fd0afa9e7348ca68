use crate::{
    foundation::{
        core::{Canvas, RasterImage, Rect},
        error::PosterResult,
    },
    raster::{
        blur::soft_blur_rgba8_premul,
        composite::{PlacedLayer, paste_over},
        vector::VectorLayer,
    },
};

/// Alpha of the shadow ellipse before blurring.
pub const SHADOW_ALPHA: u8 = 70;
/// Blur radius of the shadow.
pub const SHADOW_BLUR_RADIUS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where the contact shadow lands on the canvas.
pub struct ShadowPlacement {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Shadow raster width (the product width).
    pub width: u32,
    /// Shadow raster height (a quarter of the product height).
    pub height: u32,
}

/// Shadow geometry for a product of `product_w x product_h` whose top edge is at `product_y`.
///
/// The shadow is centered horizontally and overlaps the lower edge of the product by half its
/// own height.
pub fn shadow_placement(
    canvas_width: u32,
    product_w: u32,
    product_h: u32,
    product_y: i64,
) -> ShadowPlacement {
    let height = product_h / 4;
    ShadowPlacement {
        x: (i64::from(canvas_width) - i64::from(product_w)).div_euclid(2),
        y: product_y + i64::from(product_h) - i64::from(height / 2),
        width: product_w,
        height,
    }
}

/// Composite a blurred elliptical contact shadow beneath `product`.
pub fn apply_product_shadow(
    canvas: &mut Canvas,
    product: &RasterImage,
    product_y: i64,
) -> PosterResult<()> {
    let place = shadow_placement(canvas.width(), product.width(), product.height(), product_y);
    if place.height == 0 {
        tracing::debug!("product too short for a shadow");
        return Ok(());
    }

    let mut layer = VectorLayer::new(place.width, place.height)?;
    layer.fill_ellipse(
        Rect::new(0.0, 0.0, f64::from(place.width), f64::from(place.height)),
        [0, 0, 0, SHADOW_ALPHA],
    );
    let shadow = soft_blur_rgba8_premul(
        &layer.into_premul_rgba8(),
        place.width,
        place.height,
        SHADOW_BLUR_RADIUS,
    )?;

    tracing::debug!(x = place.x, y = place.y, h = place.height, "product shadow");
    paste_over(
        canvas,
        PlacedLayer {
            width: place.width,
            height: place.height,
            rgba8_premul: &shadow,
            x: place.x,
            y: place.y,
        },
        None,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
