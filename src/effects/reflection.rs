use crate::{
    foundation::{
        core::{Canvas, RasterImage},
        error::PosterResult,
    },
    raster::{
        blur::soft_blur_rgba8_premul,
        composite::{PlacedLayer, paste_over},
    },
};

/// Fade mask value at the top row of the reflection (about 31% opacity).
pub const REFLECTION_PEAK_ALPHA: u8 = 80;
/// Blur radius softening the mirrored detail.
pub const REFLECTION_BLUR_RADIUS: u32 = 2;

/// Row-major fade mask: `REFLECTION_PEAK_ALPHA` at the top row falling linearly to 0 at the
/// bottom row, constant across each row.
pub fn fade_mask(width: u32, height: u32) -> Vec<u8> {
    let peak = f64::from(REFLECTION_PEAK_ALPHA);
    let mut out = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        let v = if height <= 1 {
            peak
        } else {
            peak - peak * f64::from(y) / f64::from(height - 1)
        };
        let v = v.floor().clamp(0.0, 255.0) as u8;
        out.extend(std::iter::repeat_n(v, width as usize));
    }
    out
}

/// Composite a flipped, softened, fading copy of `product` directly beneath it.
///
/// The effective alpha of each reflected pixel is `fade * source_alpha / 255`, so the
/// reflection is never more opaque than either the fade mask or the product itself.
pub fn apply_product_reflection(
    canvas: &mut Canvas,
    product: &RasterImage,
    product_y: i64,
) -> PosterResult<()> {
    let (w, h) = product.dimensions();
    let flipped = product.flipped_vertical();
    let softened = soft_blur_rgba8_premul(flipped.as_premul_bytes(), w, h, REFLECTION_BLUR_RADIUS)?;
    let mask = fade_mask(w, h);

    let x = (i64::from(canvas.width()) - i64::from(w)).div_euclid(2);
    let y = product_y + i64::from(h);
    tracing::debug!(x, y, "product reflection");
    paste_over(
        canvas,
        PlacedLayer {
            width: w,
            height: h,
            rgba8_premul: &softened,
            x,
            y,
        },
        Some(&mask),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/effects/reflection.rs"]
mod tests;
