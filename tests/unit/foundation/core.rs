use super::*;

#[test]
fn hex_round_trip_is_lowercase() {
    let c = Rgb8::new(212, 175, 55);
    assert_eq!(c.to_hex(), "#d4af37");
    assert_eq!(Rgb8::from_hex("#D4AF37").unwrap(), c);
    assert_eq!(Rgb8::from_hex("d4af37").unwrap(), c);
}

#[test]
fn hex_rejects_bad_lengths_and_digits() {
    assert!(Rgb8::from_hex("#fff").is_err());
    assert!(Rgb8::from_hex("#gg0000").is_err());
}

#[test]
fn raster_rejects_zero_dimensions_and_bad_lengths() {
    assert!(matches!(
        RasterImage::from_straight_rgba8(0, 4, vec![]),
        Err(PosterError::InvalidInput(_))
    ));
    assert!(matches!(
        RasterImage::from_straight_rgba8(2, 2, vec![0; 15]),
        Err(PosterError::InvalidInput(_))
    ));
    assert!(Canvas::transparent(0, 1).is_err());
}

#[test]
fn raster_premultiplies_on_construction() {
    let img = RasterImage::from_straight_rgba8(1, 1, vec![100, 50, 200, 128]).unwrap();
    assert_eq!(
        img.pixel(0, 0),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn flipped_vertical_reverses_rows() {
    let img = RasterImage::from_straight_rgba8(
        1,
        3,
        vec![1, 1, 1, 255, 2, 2, 2, 255, 3, 3, 3, 255],
    )
    .unwrap();
    let f = img.flipped_vertical();
    assert_eq!(f.pixel(0, 0), [3, 3, 3, 255]);
    assert_eq!(f.pixel(0, 2), [1, 1, 1, 255]);
}

#[test]
fn canvas_png_encodes_with_dimensions() {
    let rgb = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
    let canvas = Canvas::from_rgb_image(&rgb).unwrap();
    assert!(canvas.alpha_channel().iter().all(|&a| a == 255));

    let png = canvas.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 255]);
}

#[test]
fn rgb_serde_accepts_hex_array_and_object() {
    let c: Rgb8 = serde_json::from_str("\"#283c50\"").unwrap();
    assert_eq!(c, Rgb8::new(40, 60, 80));
    let c: Rgb8 = serde_json::from_str("[40, 60, 80]").unwrap();
    assert_eq!(c, Rgb8::new(40, 60, 80));
    let c: Rgb8 = serde_json::from_str(r#"{"r": 40, "g": 60, "b": 80}"#).unwrap();
    assert_eq!(c, Rgb8::new(40, 60, 80));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#283c50\"");
    assert!(serde_json::from_str::<Rgb8>("\"#12\"").is_err());
}
