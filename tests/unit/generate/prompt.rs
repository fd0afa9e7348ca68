use super::*;

#[test]
fn prompt_embeds_product_and_theme_style() {
    let reg = ThemeRegistry::builtin();
    let p = build_poster_prompt(&reg, "Luxury", "red shoe");
    assert!(p.starts_with(
        "Create a high-end, professional commercial advertising poster featuring a 'red shoe'. "
    ));
    assert!(p.contains("The aspect ratio is 1:1. The design is minimal, elegant"));
    assert!(p.ends_with("lots of negative space."));
    assert!(!p.contains("  "));
}

#[test]
fn unknown_theme_uses_minimal_style() {
    let reg = ThemeRegistry::builtin();
    assert_eq!(
        build_poster_prompt(&reg, "Gothic", "mug"),
        build_poster_prompt(&reg, "Minimal", "mug")
    );
}

#[test]
fn variation_suffix_is_one_based() {
    let reg = ThemeRegistry::builtin();
    let p = variation_prompt(&reg, "Sporty", "bike", 0);
    assert!(p.ends_with("strong, bold fonts. This is variation 1."));
    assert!(variation_prompt(&reg, "Sporty", "bike", 2).ends_with("This is variation 3."));
}

#[test]
fn request_payload_shape() {
    let reg = ThemeRegistry::builtin();
    let req = TextToImageRequest::for_variation(&reg, "Nature", "plant", 1);
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["negative_prompt"], "text, letters, watermark, signature, ugly, deformed");
    assert_eq!(json["steps"], 25);
    assert_eq!(json["width"], 1024);
    assert_eq!(json["height"], 1024);
    assert_eq!(json["sampler_name"], "Euler a");
    assert!(json["prompt"].as_str().unwrap().ends_with("This is variation 2."));
}
