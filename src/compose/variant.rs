use crate::foundation::error::{PosterError, PosterResult};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
/// Corner the logo is pinned to.
pub enum LogoPosition {
    /// `(margin, margin)`.
    #[default]
    TopLeft,
    /// `(canvas_width - logo_width - margin, margin)`.
    TopRight,
}

impl LogoPosition {
    /// Stable kebab-case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
        }
    }
}

impl std::fmt::Display for LogoPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogoPosition {
    type Err = PosterError;

    fn from_str(s: &str) -> PosterResult<Self> {
        match s {
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            other => Err(PosterError::invalid_input(format!(
                "unknown logo position '{other}' (expected top-left or top-right)"
            ))),
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
/// Layout knobs orthogonal to the theme. Only drives logo placement.
pub struct LayoutVariant {
    /// Logo corner.
    pub logo_position: LogoPosition,
}

impl LayoutVariant {
    /// Logo in the top-left corner.
    pub const TOP_LEFT: Self = Self {
        logo_position: LogoPosition::TopLeft,
    };
    /// Logo in the top-right corner.
    pub const TOP_RIGHT: Self = Self {
        logo_position: LogoPosition::TopRight,
    };

    /// Top-left corner of a `logo_width` wide logo on a `canvas_width` wide canvas.
    pub fn logo_origin(self, canvas_width: u32, logo_width: u32, margin: u32) -> (i64, i64) {
        let m = i64::from(margin);
        match self.logo_position {
            LogoPosition::TopLeft => (m, m),
            LogoPosition::TopRight => (i64::from(canvas_width) - i64::from(logo_width) - m, m),
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Serialize)]
/// Finished poster handed back to the caller.
pub struct CompositionResult {
    /// PNG-encoded poster.
    #[serde(skip)]
    pub image_bytes: Vec<u8>,
    /// Call-to-action copy that was drawn.
    pub cta_text: String,
    /// Background gradient endpoints as `#rrggbb`, top then bottom.
    pub palette: [String; 2],
}

impl std::fmt::Debug for CompositionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositionResult")
            .field("image_bytes", &self.image_bytes.len())
            .field("cta_text", &self.cta_text)
            .field("palette", &self.palette)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/variant.rs"]
mod tests;
