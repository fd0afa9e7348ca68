use super::*;

#[test]
fn logo_origin_follows_position() {
    assert_eq!(LayoutVariant::TOP_LEFT.logo_origin(1080, 180, 50), (50, 50));
    assert_eq!(LayoutVariant::TOP_RIGHT.logo_origin(1080, 180, 50), (850, 50));
    assert_eq!(LayoutVariant::TOP_RIGHT.logo_origin(1080, 120, 50), (910, 50));
}

#[test]
fn logo_position_parses_and_serializes_kebab_case() {
    assert_eq!("top-right".parse::<LogoPosition>().unwrap(), LogoPosition::TopRight);
    assert!("TopRight".parse::<LogoPosition>().is_err());
    assert_eq!(LogoPosition::default(), LogoPosition::TopLeft);

    let json = serde_json::to_string(&LayoutVariant::TOP_RIGHT).unwrap();
    assert_eq!(json, r#"{"logo_position":"top-right"}"#);
    let back: LayoutVariant = serde_json::from_str(&json).unwrap();
    assert_eq!(back, LayoutVariant::TOP_RIGHT);
}

#[test]
fn result_summary_omits_image_bytes() {
    let r = CompositionResult {
        image_bytes: vec![1, 2, 3],
        cta_text: "SHOP NOW".into(),
        palette: ["#282828".into(), "#0a0a0a".into()],
    };
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"cta_text": "SHOP NOW", "palette": ["#282828", "#0a0a0a"]})
    );
    assert!(format!("{r:?}").contains("image_bytes: 3"));
}
