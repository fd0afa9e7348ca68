use kurbo::Shape as _;

use crate::foundation::{
    core::Rect,
    error::{PosterError, PosterResult},
};

/// Transparent layer that vector shapes and glyph runs are rasterized into.
pub struct VectorLayer {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl VectorLayer {
    /// Allocate a transparent `width x height` layer.
    pub fn new(width: u32, height: u32) -> PosterResult<Self> {
        if width == 0 || height == 0 {
            return Err(PosterError::invalid_input(format!(
                "vector layer must have non-zero dimensions, got {width}x{height}"
            )));
        }
        let width: u16 = width
            .try_into()
            .map_err(|_| PosterError::invalid_input("layer width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| PosterError::invalid_input("layer height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    /// Fill the ellipse inscribed in `bounds` with a straight-alpha RGBA color.
    pub fn fill_ellipse(&mut self, bounds: Rect, rgba: [u8; 4]) {
        let e = kurbo::Ellipse::from_rect(bounds);
        let mut p = vello_cpu::kurbo::BezPath::new();
        for el in e.path_elements(0.1) {
            p.push(el);
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]));
        self.ctx.fill_path(&p);
    }

    pub(crate) fn context_mut(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    fn render(mut self) -> vello_cpu::Pixmap {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }

    /// Rasterize and return premultiplied RGBA8 bytes.
    pub fn into_premul_rgba8(self) -> Vec<u8> {
        self.render().data_as_u8_slice().to_vec()
    }

    /// Rasterize and return only the coverage (alpha) channel.
    pub fn into_alpha_mask(self) -> Vec<u8> {
        self.render()
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/vector.rs"]
mod tests;
