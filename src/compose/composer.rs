use rand::{Rng, seq::SliceRandom};

use crate::{
    compose::variant::{CompositionResult, LayoutVariant},
    config::ComposerSettings,
    effects::{
        EffectKind,
        blobs::apply_blurred_blobs,
        gradient::{GradientDirection, linear_gradient},
        reflection::apply_product_reflection,
        shadow::apply_product_shadow,
        vignette::apply_vignette,
    },
    foundation::{
        core::{Canvas, RasterImage},
        error::{PosterError, PosterResult},
    },
    raster::{
        composite::{PlacedLayer, paste_over},
        resample::downscale_to_fit,
    },
    text::{fonts::FontSource, layout::TextPainter},
    theme::registry::{Palette, ThemeConfig, ThemeRegistry},
};

/// Poster canvas before encoding, plus the palette it was painted with.
#[derive(Clone, Debug)]
pub struct RenderedPoster {
    /// Final composited canvas.
    pub canvas: Canvas,
    /// Gradient endpoints that were chosen.
    pub palette: Palette,
}

/// Sequences gradient, effect layers, product, logo and copy onto a fresh canvas.
///
/// Holds only read-only state, so one composer can serve many calls; every call allocates
/// its own canvas.
#[derive(Clone, Debug)]
pub struct PosterComposer<'a> {
    registry: &'a ThemeRegistry,
    settings: ComposerSettings,
    font: FontSource,
}

impl<'a> PosterComposer<'a> {
    /// Composer with the font resolved from `settings.font_path`, then system fonts.
    pub fn new(registry: &'a ThemeRegistry, settings: ComposerSettings) -> PosterResult<Self> {
        let font = FontSource::resolve(settings.font_path.as_deref());
        Self::with_font(registry, settings, font)
    }

    /// Composer with an explicit font.
    pub fn with_font(
        registry: &'a ThemeRegistry,
        settings: ComposerSettings,
        font: FontSource,
    ) -> PosterResult<Self> {
        settings.validate()?;
        Ok(Self {
            registry,
            settings,
            font,
        })
    }

    /// Theme table lookups go through.
    pub fn registry(&self) -> &'a ThemeRegistry {
        self.registry
    }

    /// Active settings.
    pub fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    /// Resolved text font.
    pub fn font(&self) -> &FontSource {
        &self.font
    }

    /// Compose a poster for the theme named `theme` (unknown names use `Minimal`).
    pub fn compose<R: Rng + ?Sized>(
        &self,
        product: &RasterImage,
        logo: &RasterImage,
        theme: &str,
        layout: LayoutVariant,
        rng: &mut R,
    ) -> PosterResult<CompositionResult> {
        let config = self.registry.resolve(theme);
        self.compose_with(config, product, logo, layout, rng)
    }

    /// Compose a poster for an explicit theme config and encode it as PNG.
    #[tracing::instrument(
        skip(self, config, product, logo, rng),
        fields(theme = %config.name, logo = %layout.logo_position)
    )]
    pub fn compose_with<R: Rng + ?Sized>(
        &self,
        config: &ThemeConfig,
        product: &RasterImage,
        logo: &RasterImage,
        layout: LayoutVariant,
        rng: &mut R,
    ) -> PosterResult<CompositionResult> {
        let rendered = self.render_canvas(config, product, logo, layout, rng)?;
        let image_bytes = rendered.canvas.encode_png()?;
        tracing::debug!(bytes = image_bytes.len(), "poster encoded");
        Ok(CompositionResult {
            image_bytes,
            cta_text: config.cta_text.clone(),
            palette: rendered.palette.to_hex_pair(),
        })
    }

    /// Run every compositing step and return the unencoded canvas.
    pub fn render_canvas<R: Rng + ?Sized>(
        &self,
        config: &ThemeConfig,
        product: &RasterImage,
        logo: &RasterImage,
        layout: LayoutVariant,
        rng: &mut R,
    ) -> PosterResult<RenderedPoster> {
        let s = &self.settings;
        let size = s.canvas_size;

        let palette = config.palette_options.choose(rng).copied().ok_or_else(|| {
            PosterError::invalid_input(format!("theme '{}' has no palette options", config.name))
        })?;
        tracing::debug!(from = %palette.from.to_hex(), to = %palette.to.to_hex(), "palette");

        let gradient = linear_gradient(size, size, palette.from, palette.to, GradientDirection::Vertical);
        let mut canvas = Canvas::from_rgb_image(&gradient)?;

        if config.has_effect(EffectKind::BlurredShapes) {
            apply_blurred_blobs(&mut canvas, s.blob_count, rng)?;
        }

        let product = downscale_to_fit(product, s.product_max, s.product_max)?;
        let (pw, ph) = product.dimensions();
        let product_y = (i64::from(size) - i64::from(ph)).div_euclid(2);
        let product_x = (i64::from(size) - i64::from(pw)).div_euclid(2);

        if config.has_effect(EffectKind::Shadow) {
            apply_product_shadow(&mut canvas, &product, product_y)?;
        }
        if config.has_effect(EffectKind::Reflection) {
            apply_product_reflection(&mut canvas, &product, product_y)?;
        }

        paste_over(
            &mut canvas,
            PlacedLayer {
                width: pw,
                height: ph,
                rgba8_premul: product.as_premul_bytes(),
                x: product_x,
                y: product_y,
            },
            None,
        )?;

        let logo = downscale_to_fit(logo, s.logo_max, s.logo_max)?;
        let (logo_x, logo_y) = layout.logo_origin(size, logo.width(), s.logo_margin);
        paste_over(
            &mut canvas,
            PlacedLayer {
                width: logo.width(),
                height: logo.height(),
                rgba8_premul: logo.as_premul_bytes(),
                x: logo_x,
                y: logo_y,
            },
            None,
        )?;

        let mut painter = TextPainter::new(self.font.clone());
        painter.draw(
            &mut canvas,
            &config.headline_text,
            s.headline,
            config.font_color,
            s.text_alpha,
        )?;
        painter.draw(&mut canvas, &config.cta_text, s.cta, config.font_color, s.text_alpha)?;

        if config.has_effect(EffectKind::Vignette) {
            apply_vignette(&mut canvas)?;
        }

        Ok(RenderedPoster { canvas, palette })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
