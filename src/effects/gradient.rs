use crate::foundation::core::Rgb8;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Axis a linear gradient ramps along.
pub enum GradientDirection {
    /// Top (first color) to bottom (second color).
    #[default]
    Vertical,
    /// Left (first color) to right (second color).
    Horizontal,
}

/// Ramp weight `round(255 * position / extent)`.
pub fn ramp_weight(position: u32, extent: u32) -> u8 {
    if extent == 0 {
        return 0;
    }
    let num = 255u64 * u64::from(position);
    let ext = u64::from(extent);
    ((2 * num + ext) / (2 * ext)).min(255) as u8
}

/// Single-channel blend mask: a 0..255 ramp along `direction`, constant across the other axis.
pub fn ramp_mask(width: u32, height: u32, direction: GradientDirection) -> image::GrayImage {
    image::GrayImage::from_fn(width, height, |x, y| {
        let w = match direction {
            GradientDirection::Vertical => ramp_weight(y, height),
            GradientDirection::Horizontal => ramp_weight(x, width),
        };
        image::Luma([w])
    })
}

fn blend_channel(a: u8, b: u8, m: u8) -> u8 {
    let m = u32::from(m);
    ((u32::from(a) * (255 - m) + u32::from(b) * m + 127) / 255) as u8
}

/// Two-color linear gradient: `from` at position 0, approaching `to` at the far edge.
///
/// Built as `to` composited over `from` through [`ramp_mask`].
pub fn linear_gradient(
    width: u32,
    height: u32,
    from: Rgb8,
    to: Rgb8,
    direction: GradientDirection,
) -> image::RgbImage {
    let mask = ramp_mask(width, height, direction);
    let mut out = image::RgbImage::from_pixel(width, height, image::Rgb([from.r, from.g, from.b]));
    for (px, m) in out.pixels_mut().zip(mask.pixels()) {
        let m = m[0];
        *px = image::Rgb([
            blend_channel(from.r, to.r, m),
            blend_channel(from.g, to.g, m),
            blend_channel(from.b, to.b, m),
        ]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gradient.rs"]
mod tests;
