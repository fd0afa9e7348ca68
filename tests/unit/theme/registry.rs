use super::*;

#[test]
fn unknown_theme_resolves_to_minimal() {
    let reg = ThemeRegistry::builtin();
    assert_eq!(reg.resolve("NotARealTheme"), reg.resolve("Minimal"));
    assert_eq!(reg.resolve(""), reg.resolve("Minimal"));
    // Lookup is case-sensitive.
    assert_eq!(reg.resolve("luxury").name, "Minimal");
}

#[test]
fn luxury_entry_matches_reference_configuration() {
    let reg = ThemeRegistry::builtin();
    let t = reg.resolve("Luxury");
    assert_eq!(t.font_color, Rgb8::new(212, 175, 55));
    assert_eq!(t.headline_text, "Experience True Luxury");
    assert_eq!(t.cta_text, "SHOP NOW");
    assert_eq!(
        t.active_effects,
        [EffectKind::Reflection, EffectKind::Vignette]
            .into_iter()
            .collect()
    );
    assert_eq!(
        t.palette_options,
        vec![Palette::new(Rgb8::new(40, 40, 40), Rgb8::new(10, 10, 10))]
    );
}

#[test]
fn builtin_table_is_complete() {
    let reg = ThemeRegistry::builtin();
    let names: Vec<_> = reg.names().collect();
    assert_eq!(names, ["Minimal", "Luxury", "Sporty", "Festival", "Nature"]);
    assert!(reg.resolve("Minimal").active_effects.is_empty());
    assert!(reg.resolve("Sporty").has_effect(EffectKind::Shadow));
    assert!(reg.resolve("Festival").has_effect(EffectKind::BlurredShapes));
    assert_eq!(reg.resolve("Nature").palette_options.len(), 2);
    assert!(reg.themes().iter().all(|t| !t.prompt_style.is_empty()));
}

#[test]
fn shared_registry_is_the_builtin_table() {
    assert_eq!(ThemeRegistry::shared(), &ThemeRegistry::builtin());
    assert!(std::ptr::eq(ThemeRegistry::shared(), ThemeRegistry::shared()));
}

#[test]
fn json_round_trip_preserves_table() {
    let reg = ThemeRegistry::builtin();
    let json = reg.to_json_pretty().unwrap();
    assert!(json.contains("\"#d4af37\""));
    assert!(json.contains("\"blurred_shapes\""));
    assert_eq!(ThemeRegistry::from_json(&json).unwrap(), reg);
}

#[test]
fn custom_tables_are_validated() {
    let missing_minimal = r##"[{"name": "Ocean", "palette_options": [{"from": "#003366", "to": "#66ccff"}],
        "font_color": [255, 255, 255], "headline_text": "Dive In"}]"##;
    assert!(matches!(
        ThemeRegistry::from_json(missing_minimal),
        Err(PosterError::InvalidInput(_))
    ));

    let empty_palette = r##"[{"name": "Minimal", "palette_options": [],
        "font_color": "#000000", "headline_text": "x"}]"##;
    assert!(ThemeRegistry::from_json(empty_palette).is_err());

    let ok = r##"[{"name": "Minimal", "palette_options": [{"from": "#ffffff", "to": "#eeeeee"}],
        "font_color": "#000000", "headline_text": "Hi", "active_effects": ["vignette"]}]"##;
    let reg = ThemeRegistry::from_json(ok).unwrap();
    let t = reg.resolve("anything");
    assert_eq!(t.cta_text, CTA_TEXT);
    assert!(t.has_effect(EffectKind::Vignette));

    let dup = ThemeRegistry::from_themes(vec![t.clone(), t.clone()]);
    assert!(dup.is_err());
}
