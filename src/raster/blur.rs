//! Separable blurs over row-major 8-bit buffers with 1..=4 interleaved channels.
//!
//! Small radii use a quantized Gaussian kernel. Large radii use three successive box passes,
//! which approximate a Gaussian at constant cost per pixel. Both clamp at the buffer edges, so
//! constant regions stay exactly constant.

use crate::foundation::{
    error::{PosterError, PosterResult},
    math::buffer_len,
};

/// Radii up to this value use the direct Gaussian kernel.
pub const GAUSSIAN_MAX_RADIUS: u32 = 8;

/// Blur a premultiplied RGBA8 buffer with radius `radius` pixels.
pub fn soft_blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
) -> PosterResult<Vec<u8>> {
    soft_blur(src, width, height, 4, radius)
}

/// Blur a single-channel mask with radius `radius` pixels.
pub fn soft_blur_mask(src: &[u8], width: u32, height: u32, radius: u32) -> PosterResult<Vec<u8>> {
    soft_blur(src, width, height, 1, radius)
}

fn soft_blur(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    radius: u32,
) -> PosterResult<Vec<u8>> {
    if radius <= GAUSSIAN_MAX_RADIUS {
        gaussian_blur(src, width, height, channels, radius, (radius as f32) / 2.0)
    } else {
        box_blur3(src, width, height, channels, radius / 3)
    }
}

fn check_len(src: &[u8], width: u32, height: u32, channels: usize) -> PosterResult<usize> {
    if !(1..=4).contains(&channels) {
        return Err(PosterError::render("blur supports 1 to 4 channels"));
    }
    let expected_len = buffer_len(width, height, channels)
        .ok_or_else(|| PosterError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(PosterError::render(
            "blur expects src matching width*height*channels",
        ));
    }
    Ok(expected_len)
}

/// Two-pass Gaussian blur with a Q16 kernel of `2 * radius + 1` taps.
pub fn gaussian_blur(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    radius: u32,
    sigma: f32,
) -> PosterResult<Vec<u8>> {
    let expected_len = check_len(src, width, height, channels)?;
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    let geom = Geometry::new(width, height, channels);
    horizontal_pass(src, &mut tmp, geom, &kernel);
    vertical_pass(&tmp, &mut out, geom, &kernel);
    Ok(out)
}

/// Three successive box blurs of radius `box_radius` in each direction.
pub fn box_blur3(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    box_radius: u32,
) -> PosterResult<Vec<u8>> {
    let expected_len = check_len(src, width, height, channels)?;
    if box_radius == 0 {
        return Ok(src.to_vec());
    }

    let geom = Geometry::new(width, height, channels);
    let mut a = src.to_vec();
    let mut b = vec![0u8; expected_len];
    for _ in 0..3 {
        box_horizontal(&a, &mut b, geom, box_radius as i32);
        box_vertical(&b, &mut a, geom, box_radius as i32);
    }
    Ok(a)
}

#[derive(Clone, Copy)]
struct Geometry {
    w: i32,
    h: i32,
    ch: usize,
}

impl Geometry {
    fn new(width: u32, height: u32, channels: usize) -> Self {
        Self {
            w: width as i32,
            h: height as i32,
            ch: channels,
        }
    }

    fn idx(self, x: i32, y: i32) -> usize {
        ((y * self.w + x) as usize) * self.ch
    }
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> PosterResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PosterError::invalid_input("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(PosterError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let target: i64 = 65536;
    let delta = target - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        let new_mid = (mid_val + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], g: Geometry, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    for y in 0..g.h {
        for x in 0..g.w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let dx = ki as i32 - radius;
                let sx = (x + dx).clamp(0, g.w - 1);
                let idx = g.idx(sx, y);
                for c in 0..g.ch {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = g.idx(x, y);
            for c in 0..g.ch {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], g: Geometry, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    for y in 0..g.h {
        for x in 0..g.w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let dy = ki as i32 - radius;
                let sy = (y + dy).clamp(0, g.h - 1);
                let idx = g.idx(x, sy);
                for c in 0..g.ch {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = g.idx(x, y);
            for c in 0..g.ch {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn box_horizontal(src: &[u8], dst: &mut [u8], g: Geometry, r: i32) {
    let n = (2 * r + 1) as u32;
    for y in 0..g.h {
        let mut acc = [0u32; 4];
        for dx in -r..=r {
            let idx = g.idx(dx.clamp(0, g.w - 1), y);
            for c in 0..g.ch {
                acc[c] += u32::from(src[idx + c]);
            }
        }
        for x in 0..g.w {
            let out_idx = g.idx(x, y);
            for c in 0..g.ch {
                dst[out_idx + c] = div_round(acc[c], n);
            }
            // Slide the window one pixel to the right.
            let leaving = g.idx((x - r).clamp(0, g.w - 1), y);
            let entering = g.idx((x + r + 1).clamp(0, g.w - 1), y);
            for c in 0..g.ch {
                acc[c] = acc[c] + u32::from(src[entering + c]) - u32::from(src[leaving + c]);
            }
        }
    }
}

fn box_vertical(src: &[u8], dst: &mut [u8], g: Geometry, r: i32) {
    let n = (2 * r + 1) as u32;
    for x in 0..g.w {
        let mut acc = [0u32; 4];
        for dy in -r..=r {
            let idx = g.idx(x, dy.clamp(0, g.h - 1));
            for c in 0..g.ch {
                acc[c] += u32::from(src[idx + c]);
            }
        }
        for y in 0..g.h {
            let out_idx = g.idx(x, y);
            for c in 0..g.ch {
                dst[out_idx + c] = div_round(acc[c], n);
            }
            let leaving = g.idx(x, (y - r).clamp(0, g.h - 1));
            let entering = g.idx(x, (y + r + 1).clamp(0, g.h - 1));
            for c in 0..g.ch {
                acc[c] = acc[c] + u32::from(src[entering + c]) - u32::from(src[leaving + c]);
            }
        }
    }
}

fn div_round(sum: u32, n: u32) -> u8 {
    ((sum + n / 2) / n).min(255) as u8
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
