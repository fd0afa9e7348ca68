use std::collections::BTreeSet;

use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::{foundation::core::Rgb8, text::layout::TextSlot};

fn small_settings() -> ComposerSettings {
    ComposerSettings {
        canvas_size: 200,
        product_max: 100,
        logo_max: 40,
        logo_margin: 10,
        headline: TextSlot {
            x: 10,
            y: 150,
            size: 20.0,
        },
        cta: TextSlot {
            x: 10,
            y: 175,
            size: 12.0,
        },
        ..ComposerSettings::default()
    }
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RasterImage {
    RasterImage::from_straight_rgba8(w, h, rgba.repeat((w * h) as usize)).unwrap()
}

fn plain_theme(effects: &[EffectKind]) -> ThemeConfig {
    ThemeConfig {
        name: "Test".into(),
        palette_options: vec![Palette::new(Rgb8::new(200, 200, 200), Rgb8::new(100, 100, 100))],
        font_color: Rgb8::new(0, 0, 0),
        headline_text: "Hi".into(),
        cta_text: "GO".into(),
        active_effects: effects.iter().copied().collect::<BTreeSet<_>>(),
        prompt_style: String::new(),
    }
}

fn composer(registry: &ThemeRegistry) -> PosterComposer<'_> {
    PosterComposer::with_font(registry, small_settings(), FontSource::Bitmap).unwrap()
}

#[test]
fn product_is_centered_and_logo_follows_layout() {
    let reg = ThemeRegistry::builtin();
    let c = composer(&reg);
    let product = solid(300, 150, [255, 0, 0, 255]);
    let logo = solid(20, 20, [0, 0, 255, 255]);
    let mut rng = StdRng::seed_from_u64(1);

    let out = c
        .render_canvas(&plain_theme(&[]), &product, &logo, LayoutVariant::TOP_RIGHT, &mut rng)
        .unwrap();
    // 300x150 fits into 100x50, centered at x 50, y 75.
    assert_eq!(out.canvas.pixel(50, 75), [255, 0, 0, 255]);
    assert_eq!(out.canvas.pixel(149, 124), [255, 0, 0, 255]);
    assert_ne!(out.canvas.pixel(49, 75), [255, 0, 0, 255]);
    assert_ne!(out.canvas.pixel(50, 125), [255, 0, 0, 255]);
    // Logo is already small enough, pinned at (200 - 20 - 10, 10).
    assert_eq!(out.canvas.pixel(170, 10), [0, 0, 255, 255]);
    assert_eq!(out.canvas.pixel(189, 29), [0, 0, 255, 255]);
    assert_ne!(out.canvas.pixel(10, 10), [0, 0, 255, 255]);
}

#[test]
fn transparent_product_pixels_keep_the_gradient() {
    let reg = ThemeRegistry::builtin();
    let c = composer(&reg);
    let product = solid(100, 100, [255, 0, 0, 0]);
    let logo = solid(1, 1, [0, 0, 0, 0]);
    let mut rng = StdRng::seed_from_u64(2);
    let out = c
        .render_canvas(&plain_theme(&[]), &product, &logo, LayoutVariant::TOP_LEFT, &mut rng)
        .unwrap();
    // Gradient row 100 of 200: weight round(255 * 100 / 200) = 128.
    let expected = ((200u32 * 127 + 100 * 128 + 127) / 255) as u8;
    assert_eq!(out.canvas.pixel(100, 100), [expected, expected, expected, 255]);
}

#[test]
fn same_seed_gives_identical_posters() {
    let reg = ThemeRegistry::builtin();
    let c = composer(&reg);
    let product = solid(80, 120, [10, 200, 30, 255]);
    let logo = solid(60, 30, [255, 255, 255, 255]);
    let theme = reg.resolve("Festival");

    let a = c
        .compose_with(theme, &product, &logo, LayoutVariant::TOP_LEFT, &mut StdRng::seed_from_u64(9))
        .unwrap();
    let b = c
        .compose_with(theme, &product, &logo, LayoutVariant::TOP_LEFT, &mut StdRng::seed_from_u64(9))
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.cta_text, "SHOP NOW");
    let options: Vec<[String; 2]> = theme.palette_options.iter().map(|p| p.to_hex_pair()).collect();
    assert!(options.contains(&a.palette));
}

#[test]
fn output_is_a_png_of_canvas_size() {
    let reg = ThemeRegistry::builtin();
    let c = composer(&reg);
    let product = solid(40, 40, [1, 2, 3, 255]);
    let logo = solid(40, 40, [4, 5, 6, 255]);
    let out = c
        .compose(&product, &logo, "Luxury", LayoutVariant::TOP_RIGHT, &mut StdRng::seed_from_u64(3))
        .unwrap();
    assert_eq!(out.palette, ["#282828".to_owned(), "#0a0a0a".to_owned()]);
    let decoded = image::load_from_memory(&out.image_bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (200, 200));
}

#[test]
fn vignette_only_lowers_alpha() {
    let reg = ThemeRegistry::builtin();
    let c = composer(&reg);
    let product = solid(60, 60, [90, 90, 90, 255]);
    let logo = solid(20, 20, [9, 9, 9, 255]);
    let with = plain_theme(&[EffectKind::Reflection, EffectKind::Vignette]);
    let without = plain_theme(&[EffectKind::Reflection]);

    let a = c
        .render_canvas(&with, &product, &logo, LayoutVariant::TOP_LEFT, &mut StdRng::seed_from_u64(4))
        .unwrap()
        .canvas;
    let b = c
        .render_canvas(&without, &product, &logo, LayoutVariant::TOP_LEFT, &mut StdRng::seed_from_u64(4))
        .unwrap()
        .canvas;
    for (va, vb) in a.alpha_channel().iter().zip(b.alpha_channel()) {
        assert!(*va <= vb);
    }
    assert!(a.pixel(0, 0)[3] < 255);
    assert_eq!(a.pixel(100, 100)[3], 255);
}

#[test]
fn empty_palette_is_invalid_input() {
    let reg = ThemeRegistry::builtin();
    let c = composer(&reg);
    let mut theme = plain_theme(&[]);
    theme.palette_options.clear();
    let img = solid(4, 4, [0, 0, 0, 255]);
    let err = c
        .compose_with(&theme, &img, &img, LayoutVariant::TOP_LEFT, &mut StdRng::seed_from_u64(0))
        .unwrap_err();
    assert!(matches!(err, PosterError::InvalidInput(_)));
}

#[test]
fn invalid_settings_are_rejected_up_front() {
    let reg = ThemeRegistry::builtin();
    let settings = ComposerSettings {
        canvas_size: 0,
        ..ComposerSettings::default()
    };
    assert!(PosterComposer::with_font(&reg, settings, FontSource::Bitmap).is_err());
}
