use crate::{
    foundation::{
        core::{Canvas, Rect},
        error::{PosterError, PosterResult},
    },
    raster::{
        blur::soft_blur_mask, composite::intersect_alpha, resample::resize_mask,
        vector::VectorLayer,
    },
};

/// Radial falloff mask for a `width x height` canvas: 255 in the middle, fading toward the
/// corners.
///
/// An ellipse is rendered at twice the canvas size, downscaled with Lanczos3 (which softens
/// its edge) and blurred with radius `width / 3`.
pub fn vignette_mask(width: u32, height: u32) -> PosterResult<Vec<u8>> {
    let (w2, h2) = (
        width
            .checked_mul(2)
            .ok_or_else(|| PosterError::invalid_input("vignette width overflow"))?,
        height
            .checked_mul(2)
            .ok_or_else(|| PosterError::invalid_input("vignette height overflow"))?,
    );
    let mut layer = VectorLayer::new(w2, h2)?;
    layer.fill_ellipse(
        Rect::new(0.0, 0.0, f64::from(w2), f64::from(h2)),
        [255, 255, 255, 255],
    );
    let mask = resize_mask(layer.into_alpha_mask(), w2, h2, width, height)?;
    soft_blur_mask(&mask, width, height, width / 3)
}

/// Fade the canvas toward transparent at its edges by intersecting its alpha with
/// [`vignette_mask`]. Alpha never increases.
pub fn apply_vignette(canvas: &mut Canvas) -> PosterResult<()> {
    let mask = vignette_mask(canvas.width(), canvas.height())?;
    tracing::debug!("vignette");
    intersect_alpha(canvas, &mask)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/vignette.rs"]
mod tests;
