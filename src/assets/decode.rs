use crate::{
    foundation::{
        core::RasterImage,
        error::{PosterError, PosterResult},
    },
    raster::resample::fit_within,
};

/// Largest side an SVG logo is rasterized at.
const MAX_SVG_SIDE: u32 = 16_384;

/// Decode PNG/JPEG/WebP/... bytes into a premultiplied raster.
///
/// Images without an alpha channel decode as fully opaque.
pub fn decode_image(bytes: &[u8]) -> PosterResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PosterError::invalid_input(format!("decode image from memory: {e}")))?;
    RasterImage::from_rgba_image(dyn_img.to_rgba8())
}

/// Parse an SVG and rasterize it so its longer side is `max_side` pixels.
pub fn decode_svg_logo(bytes: &[u8], max_side: u32) -> PosterResult<RasterImage> {
    if max_side == 0 || max_side > MAX_SVG_SIDE {
        return Err(PosterError::invalid_input(format!(
            "svg raster side must be in 1..={MAX_SVG_SIDE}, got {max_side}"
        )));
    }
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| PosterError::invalid_input(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(PosterError::invalid_input("svg has invalid width/height"));
    }
    // Scale the intrinsic size up to the box first so small vector logos stay sharp.
    let scale = max_side as f32 / w.max(h);
    let (width, height) = fit_within(
        ((w * scale).round() as u32).max(1),
        ((h * scale).round() as u32).max(1),
        max_side,
        max_side,
    );

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PosterError::render("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(width as f32 / w, height as f32 / h);
    resvg::render(&tree, xform, &mut pixmap.as_mut());
    RasterImage::from_premul_rgba8(width, height, pixmap.take())
}

/// Decode a logo that may be either SVG or a raster format.
pub fn decode_logo(bytes: &[u8], max_side: u32) -> PosterResult<RasterImage> {
    if looks_like_svg(bytes) {
        decode_svg_logo(bytes, max_side)
    } else {
        decode_image(bytes)
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    // The cut may split a multi-byte character; keep the valid prefix.
    let Ok(text) =
        std::str::from_utf8(head).or_else(|e| std::str::from_utf8(&head[..e.valid_up_to()]))
    else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with('<') && text.contains("<svg")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
