use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use crate::foundation::error::{PosterError, PosterResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where a scalable face came from.
pub enum FontOrigin {
    /// Explicitly configured font file.
    File(PathBuf),
    /// System face found by family query; holds the family name.
    System(String),
}

#[derive(Clone)]
/// Raw scalable font bytes plus the face index inside them.
pub struct ScalableFont {
    bytes: Arc<Vec<u8>>,
    index: u32,
    origin: FontOrigin,
}

impl std::fmt::Debug for ScalableFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalableFont")
            .field("origin", &self.origin)
            .field("index", &self.index)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl ScalableFont {
    /// Validate `bytes` as a font file and wrap them.
    pub fn from_bytes(bytes: Vec<u8>, origin: FontOrigin) -> PosterResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.clone());
        if db.faces().next().is_none() {
            return Err(PosterError::invalid_input(format!(
                "no font faces found in {origin:?}"
            )));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
            origin,
        })
    }

    /// Font file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Face index inside a collection file.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Where the face came from.
    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    pub(crate) fn font_data(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.bytes.as_ref().clone()),
            self.index,
        )
    }
}

#[derive(Clone, Debug)]
/// Resolved typeface for poster text.
pub enum FontSource {
    /// Shaped and rasterized at any size.
    Scalable(ScalableFont),
    /// Built-in fixed-size bitmap font.
    Bitmap,
}

impl FontSource {
    /// Resolve in order: `configured` file, a system sans-serif face, then the bitmap font.
    ///
    /// Never fails; each skipped step is logged.
    pub fn resolve(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            match Self::from_file(path) {
                Ok(src) => {
                    tracing::debug!(path = %path.display(), "using configured font");
                    return src;
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "configured font unusable"),
            }
        }
        if let Some(font) = system_sans_serif() {
            tracing::debug!(origin = ?font.origin, "using system font");
            return Self::Scalable(font.clone());
        }
        tracing::warn!("no scalable font available, falling back to bitmap font");
        Self::Bitmap
    }

    /// Load a scalable font from a file.
    pub fn from_file(path: &Path) -> PosterResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            PosterError::invalid_input(format!("read font '{}': {e}", path.display()))
        })?;
        ScalableFont::from_bytes(bytes, FontOrigin::File(path.to_path_buf())).map(Self::Scalable)
    }

    /// Whether this is the bitmap fallback.
    pub fn is_bitmap(&self) -> bool {
        matches!(self, Self::Bitmap)
    }

    /// Scalable font bytes, if any.
    pub fn font_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Scalable(f) => Some(f.bytes()),
            Self::Bitmap => None,
        }
    }

    /// Short human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Scalable(f) => match f.origin() {
                FontOrigin::File(p) => format!("file {}", p.display()),
                FontOrigin::System(family) => format!("system '{family}'"),
            },
            Self::Bitmap => "built-in bitmap".to_owned(),
        }
    }
}

/// First system sans-serif face, loaded once per process.
fn system_sans_serif() -> Option<&'static ScalableFont> {
    static SYSTEM: OnceLock<Option<ScalableFont>> = OnceLock::new();
    SYSTEM.get_or_init(query_system_sans_serif).as_ref()
}

fn query_system_sans_serif() -> Option<ScalableFont> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let families = [
        usvg::fontdb::Family::SansSerif,
        usvg::fontdb::Family::Name("DejaVu Sans"),
        usvg::fontdb::Family::Name("Liberation Sans"),
        usvg::fontdb::Family::Name("Arial"),
    ];
    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight::NORMAL,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    Some(ScalableFont {
        bytes: Arc::new(bytes),
        index,
        origin: FontOrigin::System(family),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
