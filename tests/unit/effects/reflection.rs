use super::*;

#[test]
fn fade_mask_runs_from_peak_to_zero() {
    let m = fade_mask(3, 5);
    assert_eq!(m.len(), 15);
    assert_eq!(&m[0..3], &[80, 80, 80]);
    assert_eq!(&m[3..6], &[60, 60, 60]);
    assert_eq!(&m[12..15], &[0, 0, 0]);
    assert_eq!(fade_mask(2, 1), vec![80, 80]);
}

#[test]
fn reflection_alpha_profile_is_bounded_and_non_increasing() {
    let (cw, ch) = (64u32, 200u32);
    let (pw, ph) = (20u32, 50u32);
    let mut canvas = Canvas::transparent(cw, ch).unwrap();
    let product =
        RasterImage::from_straight_rgba8(pw, ph, [10u8, 200, 30, 255].repeat((pw * ph) as usize))
            .unwrap();
    let product_y = 40i64;

    apply_product_reflection(&mut canvas, &product, product_y).unwrap();

    let x = (cw - pw) / 2 + pw / 2;
    let top = (product_y as u32) + ph;
    let bottom = top + ph - 1;

    assert!(u32::from(canvas.pixel(x, top)[3]) <= 80);
    assert_eq!(canvas.pixel(x, bottom)[3], 0);
    for y in top + 1..=bottom {
        assert!(canvas.pixel(x, y)[3] <= canvas.pixel(x, y - 1)[3]);
    }
    // Nothing is drawn over the product footprint itself.
    assert_eq!(canvas.pixel(x, top - 1)[3], 0);
}

#[test]
fn reflection_respects_source_transparency() {
    let (pw, ph) = (10u32, 10u32);
    let mut rgba = vec![0u8; (pw * ph * 4) as usize];
    // Only the left half of the product is opaque.
    for y in 0..ph {
        for x in 0..pw / 2 {
            let i = ((y * pw + x) * 4) as usize;
            rgba[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
    }
    let product = RasterImage::from_straight_rgba8(pw, ph, rgba).unwrap();
    let mut canvas = Canvas::transparent(pw, 40).unwrap();
    apply_product_reflection(&mut canvas, &product, 0).unwrap();

    assert!(canvas.pixel(0, 10)[3] > 0);
    assert_eq!(canvas.pixel(pw - 1, 10)[3], 0);
}
