use crate::theme::registry::ThemeRegistry;

/// Things the remote model is asked to avoid.
pub const NEGATIVE_PROMPT: &str = "text, letters, watermark, signature, ugly, deformed";
/// Sampling steps per remote request.
pub const REMOTE_STEPS: u32 = 25;
/// Side of the square image requested from the remote model.
pub const REMOTE_SIZE: u32 = 1024;
/// Sampler requested from the remote model.
pub const REMOTE_SAMPLER: &str = "Euler a";

/// Commercial-poster prompt for `product_name` in the art direction of `theme`.
///
/// Unknown themes use the `Minimal` description.
pub fn build_poster_prompt(registry: &ThemeRegistry, theme: &str, product_name: &str) -> String {
    let style = &registry.resolve(theme).prompt_style;
    format!(
        "Create a high-end, professional commercial advertising poster featuring a \
         '{product_name}'. The poster should be ultra-clear, crisp, and of Behance/Dribbble-level \
         quality. The composition must have clear designated space for a headline, a \
         call-to-action, and a small brand logo. Do not include any actual text in the image; \
         focus on the visual aesthetic. The aspect ratio is 1:1. {style}"
    )
}

/// [`build_poster_prompt`] tagged with a 1-based variation number.
pub fn variation_prompt(
    registry: &ThemeRegistry,
    theme: &str,
    product_name: &str,
    index: usize,
) -> String {
    let mut prompt = build_poster_prompt(registry, theme, product_name);
    prompt.push_str(&format!(" This is variation {}.", index + 1));
    prompt
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One text-to-image request, shaped like a txt2img JSON payload.
pub struct TextToImageRequest {
    /// Positive prompt.
    pub prompt: String,
    /// Negative prompt.
    pub negative_prompt: String,
    /// Sampling steps.
    pub steps: u32,
    /// Output width.
    pub width: u32,
    /// Output height.
    pub height: u32,
    /// Sampler name.
    pub sampler_name: String,
}

impl TextToImageRequest {
    /// Request for variation `index` of a themed product poster.
    pub fn for_variation(
        registry: &ThemeRegistry,
        theme: &str,
        product_name: &str,
        index: usize,
    ) -> Self {
        Self {
            prompt: variation_prompt(registry, theme, product_name, index),
            negative_prompt: NEGATIVE_PROMPT.to_owned(),
            steps: REMOTE_STEPS,
            width: REMOTE_SIZE,
            height: REMOTE_SIZE,
            sampler_name: REMOTE_SAMPLER.to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/prompt.rs"]
mod tests;
