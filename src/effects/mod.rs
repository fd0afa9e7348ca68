pub(crate) mod blobs;
pub(crate) mod gradient;
pub(crate) mod reflection;
pub(crate) mod shadow;
pub(crate) mod vignette;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Optional effect layers a theme can switch on.
pub enum EffectKind {
    /// Soft translucent color fields behind everything else.
    BlurredShapes,
    /// Blurred contact shadow under the product.
    Shadow,
    /// Fading mirror image under the product.
    Reflection,
    /// Radial alpha falloff applied after all other layers.
    Vignette,
}

impl EffectKind {
    /// Stable snake_case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlurredShapes => "blurred_shapes",
            Self::Shadow => "shadow",
            Self::Reflection => "reflection",
            Self::Vignette => "vignette",
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
