use std::{collections::BTreeSet, sync::OnceLock};

use crate::{
    effects::EffectKind,
    foundation::{
        core::Rgb8,
        error::{PosterError, PosterResult},
    },
};

/// Call-to-action copy printed under every headline.
pub const CTA_TEXT: &str = "SHOP NOW";
/// Theme that unknown names resolve to.
pub const FALLBACK_THEME: &str = "Minimal";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Gradient endpoints: `from` at the top of the canvas, `to` at the bottom.
pub struct Palette {
    /// Color at the top edge.
    pub from: Rgb8,
    /// Color approached at the bottom edge.
    pub to: Rgb8,
}

impl Palette {
    /// Construct a palette.
    pub const fn new(from: Rgb8, to: Rgb8) -> Self {
        Self { from, to }
    }

    /// Both endpoints as `#rrggbb` strings, in order.
    pub fn to_hex_pair(self) -> [String; 2] {
        [self.from.to_hex(), self.to.to_hex()]
    }
}

fn default_cta() -> String {
    CTA_TEXT.to_owned()
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Fixed visual configuration for one named theme.
pub struct ThemeConfig {
    /// Theme name used for lookup.
    pub name: String,
    /// Candidate background palettes; one is picked at random per poster.
    pub palette_options: Vec<Palette>,
    /// Headline and CTA color.
    pub font_color: Rgb8,
    /// Large headline copy.
    pub headline_text: String,
    /// Smaller call-to-action copy.
    #[serde(default = "default_cta")]
    pub cta_text: String,
    /// Effect layers switched on for this theme.
    #[serde(default)]
    pub active_effects: BTreeSet<EffectKind>,
    /// Art-direction sentence used when prompting a text-to-image backend.
    #[serde(default)]
    pub prompt_style: String,
}

impl ThemeConfig {
    /// Whether `effect` is switched on.
    pub fn has_effect(&self, effect: EffectKind) -> bool {
        self.active_effects.contains(&effect)
    }

    fn validate(&self) -> PosterResult<()> {
        if self.name.trim().is_empty() {
            return Err(PosterError::invalid_input("theme name must be non-empty"));
        }
        if self.palette_options.is_empty() {
            return Err(PosterError::invalid_input(format!(
                "theme '{}' must have at least one palette",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Immutable theme table. Lookups never fail: unknown names resolve to `Minimal`.
pub struct ThemeRegistry {
    themes: Vec<ThemeConfig>,
    fallback: usize,
}

impl ThemeRegistry {
    /// Build from explicit theme configs.
    ///
    /// Names must be unique, every theme needs a palette, and `Minimal` must be present.
    pub fn from_themes(themes: Vec<ThemeConfig>) -> PosterResult<Self> {
        let mut seen = BTreeSet::new();
        for t in &themes {
            t.validate()?;
            if !seen.insert(t.name.as_str()) {
                return Err(PosterError::invalid_input(format!(
                    "duplicate theme '{}'",
                    t.name
                )));
            }
        }
        let fallback = themes
            .iter()
            .position(|t| t.name == FALLBACK_THEME)
            .ok_or_else(|| {
                PosterError::invalid_input(format!("theme table must contain '{FALLBACK_THEME}'"))
            })?;
        Ok(Self { themes, fallback })
    }

    /// Parse a JSON array of theme configs.
    pub fn from_json(json: &str) -> PosterResult<Self> {
        let themes: Vec<ThemeConfig> = serde_json::from_str(json)
            .map_err(|e| PosterError::invalid_input(format!("theme table JSON: {e}")))?;
        Self::from_themes(themes)
    }

    /// The built-in theme table.
    pub fn builtin() -> Self {
        Self {
            themes: builtin_themes(),
            fallback: 0,
        }
    }

    /// Process-wide built-in table, constructed on first use and never mutated.
    pub fn shared() -> &'static ThemeRegistry {
        static SHARED: OnceLock<ThemeRegistry> = OnceLock::new();
        SHARED.get_or_init(Self::builtin)
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&ThemeConfig> {
        self.themes.iter().find(|t| t.name == name)
    }

    /// Lookup with fallback to `Minimal`.
    pub fn resolve(&self, name: &str) -> &ThemeConfig {
        self.get(name).unwrap_or(&self.themes[self.fallback])
    }

    /// Theme names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.name.as_str())
    }

    /// All theme configs in table order.
    pub fn themes(&self) -> &[ThemeConfig] {
        &self.themes
    }

    /// Pretty JSON array of the table (round-trips through [`ThemeRegistry::from_json`]).
    pub fn to_json_pretty(&self) -> PosterResult<String> {
        serde_json::to_string_pretty(&self.themes)
            .map_err(|e| PosterError::Other(anyhow::Error::new(e).context("serialize themes")))
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn theme(
    name: &str,
    palettes: &[((u8, u8, u8), (u8, u8, u8))],
    font_color: (u8, u8, u8),
    headline: &str,
    effects: &[EffectKind],
    prompt_style: &str,
) -> ThemeConfig {
    let rgb = |(r, g, b): (u8, u8, u8)| Rgb8::new(r, g, b);
    ThemeConfig {
        name: name.to_owned(),
        palette_options: palettes
            .iter()
            .map(|&(a, b)| Palette::new(rgb(a), rgb(b)))
            .collect(),
        font_color: rgb(font_color),
        headline_text: headline.to_owned(),
        cta_text: CTA_TEXT.to_owned(),
        active_effects: effects.iter().copied().collect(),
        prompt_style: prompt_style.to_owned(),
    }
}

// `Minimal` must stay first: `builtin()` relies on its index.
fn builtin_themes() -> Vec<ThemeConfig> {
    use EffectKind::*;
    vec![
        theme(
            "Minimal",
            &[((245, 245, 245), (224, 224, 224))],
            (10, 10, 10),
            "Pure & Simple",
            &[],
            "The concept is ultra-clean and modern. Use soft, neutral gradients (light gray, \
             beige, indigo). The layout must be spacious with significant negative space. Focus \
             on a single, perfectly centered product.",
        ),
        theme(
            "Luxury",
            &[((40, 40, 40), (10, 10, 10))],
            (212, 175, 55),
            "Experience True Luxury",
            &[Reflection, Vignette],
            "The design is minimal, elegant, and sophisticated. Use a dark background (black or \
             deep charcoal) with gold or silver metallic accents. Employ a single, dramatic \
             spotlight on the product. The layout should be clean with lots of negative space.",
        ),
        theme(
            "Sporty",
            &[((200, 0, 0), (50, 50, 50)), ((0, 100, 220), (230, 230, 230))],
            (255, 255, 255),
            "UNLEASH YOUR POWER",
            &[Shadow],
            "The style is energetic and dynamic. Use a diagonal composition with bold red and \
             neon orange accents. Lighting should be dramatic, with motion lines or a sense of \
             speed. Typography zone should be reserved for strong, bold fonts.",
        ),
        theme(
            "Festival",
            &[
                ((138, 43, 226), (255, 0, 255)),
                ((255, 105, 180), (255, 185, 85)),
            ],
            (255, 255, 255),
            "Live The Moment",
            &[BlurredShapes],
            "The mood is warm, vibrant, and celebratory. Use colorful gradients of pink, purple, \
             and orange. Incorporate soft bokeh, confetti-like blobs, and festive lighting. The \
             layout should feel fun and energetic.",
        ),
        theme(
            "Nature",
            &[
                ((34, 139, 34), (189, 183, 107)),
                ((139, 69, 19), (244, 164, 96)),
            ],
            (255, 255, 255),
            "Back to Nature",
            &[Reflection, Vignette],
            "The aesthetic is calm, earthy, and eco-friendly. Use a palette of greens and earth \
             tones. Lighting should be soft and natural, perhaps dappled light through leaves. \
             Add organic textures.",
        ),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/theme/registry.rs"]
mod tests;
