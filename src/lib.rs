//! posterkit composites marketing posters from a product cutout, a logo and a named theme.
//!
//! The pipeline is procedural and CPU-only, in premultiplied RGBA8 throughout:
//!
//! - Resolve a [`ThemeConfig`] from a [`ThemeRegistry`] (unknown names fall back to `Minimal`)
//! - Paint a vertical gradient, then the theme's effect layers, product, logo and copy
//! - Encode the canvas as PNG into a [`CompositionResult`]
//!
//! [`generate_layouts`] batches several posters and optionally routes them through a remote
//! [`TextToImageBackend`], falling back to the compositor per variation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod config;
mod effects;
mod foundation;
mod generate;
mod raster;
mod text;
mod theme;

pub use crate::foundation::core::{Canvas, Point, RasterImage, Rect, Rgb8};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::assets::decode::{decode_image, decode_logo, decode_svg_logo};
pub use crate::compose::composer::{PosterComposer, RenderedPoster};
pub use crate::compose::variant::{CompositionResult, LayoutVariant, LogoPosition};
pub use crate::config::{
    ComposerSettings, ENV_BLOB_COUNT, ENV_FONT_PATH, ENV_REMOTE_URL, ENV_USE_REAL_AI,
    GenerationSettings, MAX_CANVAS_SIZE,
};
pub use crate::effects::EffectKind;
pub use crate::effects::blobs::{Blob, apply_blurred_blobs, composite_blobs, random_blobs};
pub use crate::effects::gradient::{GradientDirection, linear_gradient, ramp_weight};
pub use crate::effects::reflection::{apply_product_reflection, fade_mask};
pub use crate::effects::shadow::{ShadowPlacement, apply_product_shadow, shadow_placement};
pub use crate::effects::vignette::{apply_vignette, vignette_mask};
pub use crate::generate::backend::TextToImageBackend;
pub use crate::generate::prompt::{
    NEGATIVE_PROMPT, TextToImageRequest, build_poster_prompt, variation_prompt,
};
pub use crate::generate::strategy::{
    GeneratedLayout, GenerationStrategy, LayoutOutcome, LayoutRequest, RemoteGeneration,
    generate_layouts, product_name_from_filename,
};
pub use crate::raster::resample::{downscale_to_fit, fit_within};
pub use crate::text::fonts::{FontOrigin, FontSource, ScalableFont};
pub use crate::text::layout::{TextPainter, TextSlot};
pub use crate::theme::registry::{CTA_TEXT, FALLBACK_THEME, Palette, ThemeConfig, ThemeRegistry};
