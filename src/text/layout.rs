use crate::{
    foundation::{
        core::{Canvas, Rgb8},
        error::{PosterError, PosterResult},
    },
    raster::{
        composite::{PlacedLayer, paste_over},
        vector::VectorLayer,
    },
    text::{
        bitmap,
        fonts::{FontSource, ScalableFont},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered_family: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered_family: None,
        }
    }

    fn family_for(&mut self, font_bytes: &[u8]) -> PosterResult<String> {
        if let Some(name) = &self.registered_family {
            return Ok(name.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            PosterError::render("no font families registered from font bytes")
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PosterError::render("registered font family has no name"))?
            .to_string();
        self.registered_family = Some(name.clone());
        Ok(name)
    }

    /// Shape and lay out a single line of plain text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> PosterResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::invalid_input(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self.family_for(font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Fixed text anchor: top-left corner of the text box and the requested font size.
pub struct TextSlot {
    /// Left edge in canvas pixels.
    pub x: i64,
    /// Top edge in canvas pixels.
    pub y: i64,
    /// Font size in pixels.
    pub size: f32,
}

/// Draws poster copy onto a canvas with one resolved [`FontSource`].
pub struct TextPainter {
    font: FontSource,
    engine: TextLayoutEngine,
}

impl TextPainter {
    /// Painter using `font`.
    pub fn new(font: FontSource) -> Self {
        Self {
            font,
            engine: TextLayoutEngine::new(),
        }
    }

    /// The font this painter draws with.
    pub fn font(&self) -> &FontSource {
        &self.font
    }

    /// Draw `text` with its top-left corner at the slot origin, in `color` at `alpha`.
    ///
    /// A scalable face that fails to shape degrades to the bitmap font.
    pub fn draw(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        slot: TextSlot,
        color: Rgb8,
        alpha: u8,
    ) -> PosterResult<()> {
        if text.is_empty() || alpha == 0 {
            return Ok(());
        }
        if let FontSource::Scalable(font) = &self.font {
            let font = font.clone();
            match self.draw_scalable(canvas, &font, text, slot, color, alpha) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, "scalable text failed, using bitmap font");
                    self.font = FontSource::Bitmap;
                }
            }
        }
        draw_bitmap(canvas, text, slot, color, alpha)
    }

    fn draw_scalable(
        &mut self,
        canvas: &mut Canvas,
        font: &ScalableFont,
        text: &str,
        slot: TextSlot,
        color: Rgb8,
        alpha: u8,
    ) -> PosterResult<()> {
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: alpha,
        };
        let layout = self
            .engine
            .layout_line(text, font.bytes(), slot.size, brush)?;

        // Glyph overhang past the advance box is kept by a small pad.
        let pad = (slot.size / 4.0).ceil().max(1.0);
        let w = (layout.width() + 2.0 * pad).ceil() as u32;
        let h = (layout.height() + 2.0 * pad).ceil() as u32;
        if layout.width() <= 0.0 || h == 0 {
            return Ok(());
        }

        let mut layer = VectorLayer::new(w, h)?;
        let font_data = font.font_data();
        let ctx = layer.context_mut();
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(pad),
            f64::from(pad),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        let pad = pad as i64;
        let pixels = layer.into_premul_rgba8();
        paste_over(
            canvas,
            PlacedLayer {
                width: w,
                height: h,
                rgba8_premul: &pixels,
                x: slot.x - pad,
                y: slot.y - pad,
            },
            None,
        )
    }
}

fn draw_bitmap(
    canvas: &mut Canvas,
    text: &str,
    slot: TextSlot,
    color: Rgb8,
    alpha: u8,
) -> PosterResult<()> {
    let Some(img) = bitmap::rasterize(text, color.premul_with_alpha(alpha))? else {
        return Ok(());
    };
    paste_over(
        canvas,
        PlacedLayer {
            width: img.width(),
            height: img.height(),
            rgba8_premul: img.as_premul_bytes(),
            x: slot.x,
            y: slot.y,
        },
        None,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
