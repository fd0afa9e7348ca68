use rand::Rng;

use crate::{
    foundation::{
        core::{Canvas, Rect},
        error::PosterResult,
    },
    raster::{blur::soft_blur_rgba8_premul, composite::over_in_place, vector::VectorLayer},
};

/// Blur radius applied to the whole blob overlay.
pub const BLOB_BLUR_RADIUS: u32 = 80;
/// How far a blob anchor may sit outside the top/left canvas edge.
pub const BLOB_ANCHOR_OVERHANG: i64 = 100;
/// Inclusive range for each blob's width and height.
pub const BLOB_SIZE_RANGE: (i64, i64) = (200, 500);
/// Inclusive range for each blob's alpha.
pub const BLOB_ALPHA_RANGE: (u8, u8) = (40, 80);

#[derive(Clone, Copy, Debug, PartialEq)]
/// One translucent ellipse of the atmosphere overlay.
pub struct Blob {
    /// Bounding box of the ellipse, in canvas pixels. May extend past the canvas.
    pub bounds: Rect,
    /// Straight-alpha fill color.
    pub rgba: [u8; 4],
}

/// Draw `count` random blob geometries for a `width x height` canvas.
pub fn random_blobs<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    count: usize,
) -> Vec<Blob> {
    let (min_size, max_size) = BLOB_SIZE_RANGE;
    let max_x = (i64::from(width) - BLOB_ANCHOR_OVERHANG).max(-BLOB_ANCHOR_OVERHANG);
    let max_y = (i64::from(height) - BLOB_ANCHOR_OVERHANG).max(-BLOB_ANCHOR_OVERHANG);

    (0..count)
        .map(|_| {
            let x1 = rng.gen_range(-BLOB_ANCHOR_OVERHANG..=max_x);
            let y1 = rng.gen_range(-BLOB_ANCHOR_OVERHANG..=max_y);
            let x2 = x1 + rng.gen_range(min_size..=max_size);
            let y2 = y1 + rng.gen_range(min_size..=max_size);
            let rgba = [
                rng.r#gen::<u8>(),
                rng.r#gen::<u8>(),
                rng.r#gen::<u8>(),
                rng.gen_range(BLOB_ALPHA_RANGE.0..=BLOB_ALPHA_RANGE.1),
            ];
            Blob {
                bounds: Rect::new(x1 as f64, y1 as f64, x2 as f64, y2 as f64),
                rgba,
            }
        })
        .collect()
}

/// Rasterize `blobs` into a transparent overlay, blur it, and composite it over `canvas`.
pub fn composite_blobs(canvas: &mut Canvas, blobs: &[Blob]) -> PosterResult<()> {
    let (w, h) = (canvas.width(), canvas.height());
    let mut layer = VectorLayer::new(w, h)?;
    for blob in blobs {
        layer.fill_ellipse(blob.bounds, blob.rgba);
    }
    let overlay = layer.into_premul_rgba8();
    let overlay = soft_blur_rgba8_premul(&overlay, w, h, BLOB_BLUR_RADIUS)?;
    over_in_place(canvas.as_premul_bytes_mut(), &overlay, 1.0)
}

/// Add `count` random blurred blobs to `canvas`.
pub fn apply_blurred_blobs<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    count: usize,
    rng: &mut R,
) -> PosterResult<()> {
    let blobs = random_blobs(rng, canvas.width(), canvas.height(), count);
    tracing::debug!(count = blobs.len(), "blurred blob overlay");
    composite_blobs(canvas, &blobs)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blobs.rs"]
mod tests;
