use std::path::PathBuf;

use crate::{
    foundation::error::{PosterError, PosterResult},
    text::layout::TextSlot,
};

/// Environment variable naming a scalable font file for poster text.
pub const ENV_FONT_PATH: &str = "POSTERKIT_FONT_PATH";
/// Environment variable overriding the blurred-blob count.
pub const ENV_BLOB_COUNT: &str = "POSTERKIT_BLOB_COUNT";
/// Environment flag enabling the remote text-to-image path.
pub const ENV_USE_REAL_AI: &str = "USE_REAL_AI";
/// Environment variable holding the remote text-to-image endpoint.
pub const ENV_REMOTE_URL: &str = "SD_WEBUI_URL";

/// Largest accepted canvas side; the vignette rasterizes at twice this size into a 16-bit layer.
pub const MAX_CANVAS_SIZE: u32 = (u16::MAX / 2) as u32;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Geometry and typography knobs for [`crate::PosterComposer`].
///
/// `Default` is the reference 1080x1080 layout.
pub struct ComposerSettings {
    /// Square canvas side in pixels.
    pub canvas_size: u32,
    /// Bounding box side the product is downscaled into.
    pub product_max: u32,
    /// Bounding box side the logo is downscaled into.
    pub logo_max: u32,
    /// Distance of the logo from the top and side edges.
    pub logo_margin: u32,
    /// Headline anchor and size.
    pub headline: TextSlot,
    /// Call-to-action anchor and size.
    pub cta: TextSlot,
    /// Alpha applied to both text runs.
    pub text_alpha: u8,
    /// Number of blobs drawn by the blurred-shapes effect.
    pub blob_count: usize,
    /// Scalable font file; system fonts are tried when unset or unusable.
    pub font_path: Option<PathBuf>,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            canvas_size: 1080,
            product_max: 650,
            logo_max: 180,
            logo_margin: 50,
            headline: TextSlot {
                x: 60,
                y: 800,
                size: 90.0,
            },
            cta: TextSlot {
                x: 60,
                y: 920,
                size: 50.0,
            },
            text_alpha: 230,
            blob_count: 3,
            font_path: None,
        }
    }
}

impl ComposerSettings {
    /// Defaults with `POSTERKIT_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let font_path = lookup(ENV_FONT_PATH)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or(defaults.font_path.clone());
        let blob_count = lookup(ENV_BLOB_COUNT)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.blob_count);
        Self {
            font_path,
            blob_count,
            ..defaults
        }
    }

    /// Reject layouts the compositor cannot draw.
    pub fn validate(&self) -> PosterResult<()> {
        if self.canvas_size == 0 || self.product_max == 0 || self.logo_max == 0 {
            return Err(PosterError::invalid_input(
                "canvas_size, product_max and logo_max must be > 0",
            ));
        }
        if self.canvas_size > MAX_CANVAS_SIZE {
            return Err(PosterError::invalid_input(format!(
                "canvas_size {} exceeds {MAX_CANVAS_SIZE}",
                self.canvas_size
            )));
        }
        for (name, slot) in [("headline", self.headline), ("cta", self.cta)] {
            if !slot.size.is_finite() || slot.size <= 0.0 {
                return Err(PosterError::invalid_input(format!(
                    "{name} font size must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Whether and where to reach a remote text-to-image backend.
pub struct GenerationSettings {
    /// `USE_REAL_AI` flag.
    pub use_remote: bool,
    /// `SD_WEBUI_URL` endpoint.
    pub remote_url: Option<String>,
}

impl GenerationSettings {
    /// Read `USE_REAL_AI` and `SD_WEBUI_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the generation flags through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let use_remote = lookup(ENV_USE_REAL_AI)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "t"))
            .unwrap_or(false);
        let remote_url = lookup(ENV_REMOTE_URL)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        Self {
            use_remote,
            remote_url,
        }
    }

    /// Remote endpoint when the remote path is both enabled and configured.
    pub fn remote_endpoint(&self) -> Option<&str> {
        if self.use_remote {
            self.remote_url.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
