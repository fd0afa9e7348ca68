use std::io::Cursor;

use crate::foundation::{
    error::{PosterError, PosterResult},
    math::{buffer_len, premul_channel, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
};

pub use kurbo::{Point, Rect};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// Opaque RGB color. Serializes as `#rrggbb`; deserializes from a hex string, an `[r, g, b]`
/// array or an `{r, g, b}` object.
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> PosterResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(PosterError::invalid_input(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        fn hex_byte(pair: &str) -> PosterResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| PosterError::invalid_input(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        ))
    }

    /// Premultiplied RGBA8 for this color at alpha `a`.
    pub fn premul_with_alpha(self, a: u8) -> [u8; 4] {
        [
            premul_channel(self.r, a),
            premul_channel(self.g, a),
            premul_channel(self.b, a),
            a,
        ]
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr([u8; 3]),
            Obj { r: u8, g: u8, b: u8 },
        }

        match <Repr as serde::Deserialize>::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b]) | Repr::Obj { r, g, b } => Ok(Self::new(r, g, b)),
        }
    }
}

fn checked_len(width: u32, height: u32, channels: usize, what: &str) -> PosterResult<usize> {
    if width == 0 || height == 0 {
        return Err(PosterError::invalid_input(format!(
            "{what} must have non-zero dimensions, got {width}x{height}"
        )));
    }
    buffer_len(width, height, channels)
        .ok_or_else(|| PosterError::invalid_input(format!("{what} buffer size overflow")))
}

#[derive(Clone, PartialEq, Eq)]
/// Immutable RGBA8 raster held in premultiplied form.
///
/// Product cutouts and logos enter the compositor as `RasterImage`s; transparent pixels
/// (alpha 0) are where background removal took place.
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba8_premul.len())
            .finish()
    }
}

impl RasterImage {
    /// Build from straight (non-premultiplied) row-major RGBA8 bytes.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> PosterResult<Self> {
        let expected = checked_len(width, height, 4, "raster")?;
        if rgba.len() != expected {
            return Err(PosterError::invalid_input(format!(
                "raster byte length {} does not match {width}x{height}x4",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: rgba,
        })
    }

    /// Build from premultiplied row-major RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PosterResult<Self> {
        let expected = checked_len(width, height, 4, "raster")?;
        if rgba8_premul.len() != expected {
            return Err(PosterError::invalid_input(format!(
                "raster byte length {} does not match {width}x{height}x4",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul,
        })
    }

    /// Build from an `image` crate RGBA buffer (straight alpha).
    pub fn from_rgba_image(img: image::RgbaImage) -> PosterResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_straight_rgba8(width, height, img.into_raw())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Premultiplied pixel bytes.
    pub fn as_premul_bytes(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.rgba8_premul[i],
            self.rgba8_premul[i + 1],
            self.rgba8_premul[i + 2],
            self.rgba8_premul[i + 3],
        ]
    }

    /// Copy flipped top-to-bottom.
    pub fn flipped_vertical(&self) -> Self {
        let stride = (self.width as usize) * 4;
        let mut out = Vec::with_capacity(self.rgba8_premul.len());
        for row in self.rgba8_premul.chunks_exact(stride).rev() {
            out.extend_from_slice(row);
        }
        Self {
            width: self.width,
            height: self.height,
            rgba8_premul: out,
        }
    }

    /// Straight-alpha copy as an `image` crate buffer.
    pub fn to_rgba_image(&self) -> PosterResult<image::RgbaImage> {
        let mut data = self.rgba8_premul.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| PosterError::render("raster buffer does not match its dimensions"))
    }

    pub(crate) fn into_premul_bytes(self) -> Vec<u8> {
        self.rgba8_premul
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Mutable premultiplied RGBA8 poster surface.
///
/// A canvas is owned by exactly one composition call; layers composite onto it in place.
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn transparent(width: u32, height: u32) -> PosterResult<Self> {
        let len = checked_len(width, height, 4, "canvas")?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Fully opaque canvas from an RGB raster.
    pub fn from_rgb_image(img: &image::RgbImage) -> PosterResult<Self> {
        let (width, height) = img.dimensions();
        let len = checked_len(width, height, 4, "canvas")?;
        let mut data = Vec::with_capacity(len);
        for px in img.pixels() {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> PosterResult<Self> {
        let len = checked_len(width, height, 4, "canvas")?;
        if data.len() != len {
            return Err(PosterError::invalid_input(format!(
                "canvas byte length {} does not match {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Alpha channel as a row-major single-channel buffer.
    pub fn alpha_channel(&self) -> Vec<u8> {
        self.data.chunks_exact(4).map(|px| px[3]).collect()
    }

    /// Premultiplied pixel bytes.
    pub fn as_premul_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_premul_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Straight-alpha copy as an `image` crate buffer.
    pub fn to_rgba_image(&self) -> PosterResult<image::RgbaImage> {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| PosterError::render("canvas buffer does not match its dimensions"))
    }

    /// Encode as PNG (straight alpha).
    pub fn encode_png(&self) -> PosterResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| PosterError::encode(format!("png: {e}")))?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
