use super::*;

#[test]
fn ellipse_covers_center_and_leaves_corners_empty() {
    let mut layer = VectorLayer::new(40, 20).unwrap();
    layer.fill_ellipse(Rect::new(0.0, 0.0, 40.0, 20.0), [255, 255, 255, 255]);
    let mask = layer.into_alpha_mask();

    assert_eq!(mask.len(), 40 * 20);
    assert_eq!(mask[10 * 40 + 20], 255);
    assert_eq!(mask[0], 0);
    assert_eq!(mask[40 * 20 - 1], 0);
}

#[test]
fn translucent_fill_is_premultiplied() {
    let mut layer = VectorLayer::new(10, 10).unwrap();
    layer.fill_ellipse(Rect::new(-10.0, -10.0, 20.0, 20.0), [0, 0, 0, 70]);
    let px = layer.into_premul_rgba8();
    let center = (5 * 10 + 5) * 4;
    assert!((i32::from(px[center + 3]) - 70).abs() <= 1);
    assert_eq!(&px[center..center + 3], &[0, 0, 0]);
}

#[test]
fn rejects_oversized_layers() {
    assert!(VectorLayer::new(70_000, 1).is_err());
    assert!(VectorLayer::new(0, 1).is_err());
}
