use crate::foundation::{
    core::Canvas,
    error::{PosterError, PosterResult},
    math::{buffer_len, mul_div255_u8},
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff "over" on premultiplied pixels with an extra opacity multiplier.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Scale every channel of a premultiplied pixel by `m / 255`.
pub fn scale_by_mask(px: PremulRgba8, m: u8) -> PremulRgba8 {
    if m == 255 {
        return px;
    }
    let m = u16::from(m);
    [
        mul_div255_u8(u16::from(px[0]), m),
        mul_div255_u8(u16::from(px[1]), m),
        mul_div255_u8(u16::from(px[2]), m),
        mul_div255_u8(u16::from(px[3]), m),
    ]
}

/// Composite a same-sized premultiplied layer over `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> PosterResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PosterError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
/// Borrowed premultiplied RGBA8 layer placed at an integer offset.
pub struct PlacedLayer<'a> {
    /// Layer width in pixels.
    pub width: u32,
    /// Layer height in pixels.
    pub height: u32,
    /// Premultiplied pixel bytes, `width * height * 4`.
    pub rgba8_premul: &'a [u8],
    /// Left edge on the canvas; may be negative.
    pub x: i64,
    /// Top edge on the canvas; may be negative.
    pub y: i64,
}

/// Composite `layer` over `canvas`, clipped to the canvas bounds.
///
/// When `mask` is given (one byte per layer pixel), each source pixel is first scaled by
/// `mask / 255`, so the effective paste alpha is `mask * source_alpha / 255`.
pub fn paste_over(
    canvas: &mut Canvas,
    layer: PlacedLayer<'_>,
    mask: Option<&[u8]>,
) -> PosterResult<()> {
    let expected = buffer_len(layer.width, layer.height, 4)
        .ok_or_else(|| PosterError::render("layer buffer size overflow"))?;
    if layer.rgba8_premul.len() != expected {
        return Err(PosterError::render("layer bytes do not match its dimensions"));
    }
    if let Some(m) = mask
        && m.len() != expected / 4
    {
        return Err(PosterError::render("paste mask does not match layer size"));
    }

    let cw = i64::from(canvas.width());
    let ch = i64::from(canvas.height());
    let lw = i64::from(layer.width);

    let x_start = layer.x.max(0);
    let y_start = layer.y.max(0);
    let x_end = (layer.x + lw).min(cw);
    let y_end = (layer.y + i64::from(layer.height)).min(ch);
    if x_start >= x_end || y_start >= y_end {
        return Ok(());
    }

    let dst = canvas.as_premul_bytes_mut();
    for ty in y_start..y_end {
        let ly = ty - layer.y;
        for tx in x_start..x_end {
            let lx = tx - layer.x;
            let li = (ly * lw + lx) as usize;
            let s = &layer.rgba8_premul[li * 4..li * 4 + 4];
            let mut src = [s[0], s[1], s[2], s[3]];
            if let Some(m) = mask {
                src = scale_by_mask(src, m[li]);
            }
            if src[3] == 0 {
                continue;
            }
            let di = ((ty * cw + tx) as usize) * 4;
            let d = &mut dst[di..di + 4];
            let out = over([d[0], d[1], d[2], d[3]], src, 1.0);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Replace each canvas alpha with `min(alpha, mask)`, rescaling the premultiplied color so
/// the straight color is preserved.
pub fn intersect_alpha(canvas: &mut Canvas, mask: &[u8]) -> PosterResult<()> {
    let n = (canvas.width() as usize) * (canvas.height() as usize);
    if mask.len() != n {
        return Err(PosterError::render("alpha mask does not match canvas size"));
    }
    for (d, &m) in canvas
        .as_premul_bytes_mut()
        .chunks_exact_mut(4)
        .zip(mask.iter())
    {
        let a = d[3];
        if m >= a {
            continue;
        }
        if m == 0 {
            d.copy_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let (a32, m32) = (u32::from(a), u32::from(m));
        for c in d.iter_mut().take(3) {
            *c = ((u32::from(*c) * m32 + a32 / 2) / a32).min(m32) as u8;
        }
        d[3] = m;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
