use rand::Rng;

use crate::{
    compose::{
        composer::PosterComposer,
        variant::{CompositionResult, LayoutVariant},
    },
    config::GenerationSettings,
    foundation::{
        core::RasterImage,
        error::{PosterError, PosterResult},
    },
    generate::{backend::TextToImageBackend, prompt::TextToImageRequest},
};

/// Number of remote variations requested per batch.
pub const REMOTE_VARIATIONS: usize = 3;
/// Layouts produced by the local compositor per batch.
pub const LOCAL_VARIATIONS: [LayoutVariant; 2] = [LayoutVariant::TOP_LEFT, LayoutVariant::TOP_RIGHT];
/// JPEG quality remote results are re-encoded with.
pub const REMOTE_JPEG_QUALITY: u8 = 85;
/// Score range for remote results, `[lo, hi)`.
pub const REMOTE_SCORE_RANGE: (f64, f64) = (0.85, 0.99);
/// Score range for local compositions, `[lo, hi)`.
pub const LOCAL_SCORE_RANGE: (f64, f64) = (0.75, 0.99);

/// Which pipeline produces a batch of layouts.
#[derive(Clone, Copy)]
pub enum GenerationStrategy<'b> {
    /// Procedural compositor only.
    Local,
    /// Remote text-to-image, with per-variation fallback to the compositor.
    Remote(&'b dyn TextToImageBackend),
}

impl std::fmt::Debug for GenerationStrategy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl<'b> GenerationStrategy<'b> {
    /// Remote only when `settings` enable it and a backend is supplied.
    pub fn select(
        settings: &GenerationSettings,
        backend: Option<&'b dyn TextToImageBackend>,
    ) -> Self {
        match (settings.remote_endpoint(), backend) {
            (Some(_), Some(b)) => Self::Remote(b),
            _ => Self::Local,
        }
    }

    /// `"local"` or `"remote"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote(_) => "remote",
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Serialize)]
/// Poster returned by a text-to-image backend, re-encoded as JPEG.
pub struct RemoteGeneration {
    /// JPEG bytes.
    #[serde(skip)]
    pub image_bytes: Vec<u8>,
    /// Call-to-action label shown with the poster.
    pub cta_text: String,
    /// Always empty: remote posters have no known palette.
    pub palette: Vec<String>,
}

impl std::fmt::Debug for RemoteGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteGeneration")
            .field("image_bytes", &self.image_bytes.len())
            .field("cta_text", &self.cta_text)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
/// Where one layout came from.
pub enum LayoutOutcome {
    /// Procedural compositor output (PNG).
    Local(CompositionResult),
    /// Remote backend output (JPEG).
    Remote(RemoteGeneration),
}

impl LayoutOutcome {
    /// Encoded image bytes.
    pub fn image_bytes(&self) -> &[u8] {
        match self {
            Self::Local(r) => &r.image_bytes,
            Self::Remote(r) => &r.image_bytes,
        }
    }

    /// Call-to-action label.
    pub fn cta_text(&self) -> &str {
        match self {
            Self::Local(r) => &r.cta_text,
            Self::Remote(r) => &r.cta_text,
        }
    }

    /// Gradient palette as hex strings; empty for remote posters.
    pub fn palette(&self) -> &[String] {
        match self {
            Self::Local(r) => &r.palette,
            Self::Remote(r) => &r.palette,
        }
    }

    /// File extension matching the encoding.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Local(_) => "png",
            Self::Remote(_) => "jpg",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A layout plus its heuristic ranking score.
pub struct GeneratedLayout {
    /// The poster.
    #[serde(flatten)]
    pub outcome: LayoutOutcome,
    /// Heuristic score in `[0.75, 0.99)`.
    pub score: f64,
}

/// Inputs shared by every variation of a batch.
#[derive(Clone, Copy, Debug)]
pub struct LayoutRequest<'r> {
    /// Background-removed product cutout.
    pub product: &'r RasterImage,
    /// Brand logo.
    pub logo: &'r RasterImage,
    /// Theme name; unknown names use `Minimal`.
    pub theme: &'r str,
    /// Product name used in remote prompts.
    pub product_name: &'r str,
}

/// Product name guessed from an upload filename: stem before the first `.`, `_` as spaces.
pub fn product_name_from_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let stem = base.split('.').next().unwrap_or_default().replace('_', " ");
    if stem.trim().is_empty() {
        "product".to_owned()
    } else {
        stem
    }
}

/// Re-encode any decodable raster as JPEG at [`REMOTE_JPEG_QUALITY`].
pub fn reencode_jpeg(bytes: &[u8]) -> PosterResult<Vec<u8>> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PosterError::remote(format!("undecodable remote image: {e}")))?
        .to_rgb8();
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, REMOTE_JPEG_QUALITY)
        .encode_image(&img)
        .map_err(|e| PosterError::encode(format!("jpeg encode: {e}")))?;
    Ok(out)
}

fn score<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    rng.gen_range(lo..hi)
}

/// Produce a batch of candidate layouts.
///
/// The remote path requests [`REMOTE_VARIATIONS`] posters; each failed request is logged and
/// replaced by a local composition with the logo top-left. When the remote path yields nothing,
/// the local path composes one layout per entry of [`LOCAL_VARIATIONS`].
#[tracing::instrument(
    skip(composer, strategy, request, rng),
    fields(theme = request.theme, strategy = strategy.name())
)]
pub fn generate_layouts<R: Rng + ?Sized>(
    composer: &PosterComposer<'_>,
    strategy: GenerationStrategy<'_>,
    request: LayoutRequest<'_>,
    rng: &mut R,
) -> PosterResult<Vec<GeneratedLayout>> {
    let mut layouts = Vec::new();

    if let GenerationStrategy::Remote(backend) = strategy {
        for i in 0..REMOTE_VARIATIONS {
            let req = TextToImageRequest::for_variation(
                composer.registry(),
                request.theme,
                request.product_name,
                i,
            );
            let attempt = backend
                .request_text_to_image(&req)
                .and_then(|bytes| reencode_jpeg(&bytes));
            match attempt {
                Ok(image_bytes) => {
                    tracing::info!(variation = i + 1, bytes = image_bytes.len(), "remote layout");
                    layouts.push(GeneratedLayout {
                        outcome: LayoutOutcome::Remote(RemoteGeneration {
                            image_bytes,
                            cta_text: composer.registry().resolve(request.theme).cta_text.clone(),
                            palette: Vec::new(),
                        }),
                        score: score(rng, REMOTE_SCORE_RANGE),
                    });
                }
                Err(e) => {
                    tracing::error!(variation = i + 1, error = %e, "remote generation failed, composing locally");
                    let local = composer.compose(
                        request.product,
                        request.logo,
                        request.theme,
                        LayoutVariant::TOP_LEFT,
                        rng,
                    )?;
                    layouts.push(GeneratedLayout {
                        outcome: LayoutOutcome::Local(local),
                        score: score(rng, LOCAL_SCORE_RANGE),
                    });
                }
            }
        }
    }

    if layouts.is_empty() {
        tracing::info!("composing layouts locally");
        for variant in LOCAL_VARIATIONS {
            let local =
                composer.compose(request.product, request.logo, request.theme, variant, rng)?;
            layouts.push(GeneratedLayout {
                outcome: LayoutOutcome::Local(local),
                score: score(rng, LOCAL_SCORE_RANGE),
            });
        }
    }

    Ok(layouts)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/strategy.rs"]
mod tests;
