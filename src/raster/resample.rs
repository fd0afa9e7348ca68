use image::imageops::FilterType;

use crate::foundation::{
    core::RasterImage,
    error::{PosterError, PosterResult},
};

/// Largest size within `max_w x max_h` that preserves `width / height`. Never upscales.
///
/// The constrained side lands exactly on its cap; the other side is whichever neighbouring
/// integer best preserves the aspect ratio, and never drops below 1.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let (x, y) = (max_w.max(1), max_h.max(1));

    let aspect = f64::from(width) / f64::from(height);
    let (xf, yf) = (f64::from(x), f64::from(y));
    if xf / yf >= aspect {
        let ideal = yf * aspect;
        let pick = closest(ideal, |n| (aspect - n / yf).abs());
        (pick.min(width), y)
    } else {
        let ideal = xf / aspect;
        let pick = closest(ideal, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - xf / n).abs()
            }
        });
        (x, pick.min(height))
    }
}

fn closest(ideal: f64, err: impl Fn(f64) -> f64) -> u32 {
    let lo = ideal.floor();
    let hi = ideal.ceil();
    let best = if err(hi) < err(lo) { hi } else { lo };
    (best.max(1.0)) as u32
}

/// Downscale `img` to fit inside `max_w x max_h` with Lanczos3 resampling.
///
/// Returns a clone when the image already fits.
pub fn downscale_to_fit(img: &RasterImage, max_w: u32, max_h: u32) -> PosterResult<RasterImage> {
    let (w, h) = img.dimensions();
    let (nw, nh) = fit_within(w, h, max_w, max_h);
    if (nw, nh) == (w, h) {
        return Ok(img.clone());
    }

    let src = image::RgbaImage::from_raw(w, h, img.as_premul_bytes().to_vec())
        .ok_or_else(|| PosterError::render("raster buffer does not match its dimensions"))?;
    let mut out = image::imageops::resize(&src, nw, nh, FilterType::Lanczos3).into_raw();

    // Lanczos overshoot can push premultiplied color above alpha.
    for px in out.chunks_exact_mut(4) {
        let a = px[3];
        for c in px.iter_mut().take(3) {
            *c = (*c).min(a);
        }
    }
    RasterImage::from_premul_rgba8(nw, nh, out)
}

/// Resize a single-channel mask with Lanczos3 resampling.
pub fn resize_mask(
    mask: Vec<u8>,
    width: u32,
    height: u32,
    new_width: u32,
    new_height: u32,
) -> PosterResult<Vec<u8>> {
    let src = image::GrayImage::from_raw(width, height, mask)
        .ok_or_else(|| PosterError::render("mask buffer does not match its dimensions"))?;
    Ok(image::imageops::resize(&src, new_width, new_height, FilterType::Lanczos3).into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/resample.rs"]
mod tests;
