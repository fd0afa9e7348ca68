use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = gaussian_blur(&src, 1, 2, 4, 0, 1.0).unwrap();
    assert_eq!(out, src);
    let out = box_blur3(&src, 1, 2, 4, 0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = gaussian_blur(&src, w, h, 4, 3, 2.0).unwrap();
    assert_eq!(out, src);

    let out = box_blur3(&src, w, h, 4, 5).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = gaussian_blur(&src, w, h, 4, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn box_blur_softens_a_hard_edge_monotonically() {
    let (w, h) = (100u32, 1u32);
    let src: Vec<u8> = (0..w).map(|x| if x < 50 { 0 } else { 255 }).collect();
    let out = soft_blur_mask(&src, w, h, 30).unwrap();

    assert_eq!(out[0], 0);
    assert_eq!(out[(w - 1) as usize], 255);
    assert!(out[49] > 0 && out[50] < 255);
    for pair in out.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn large_radius_support_stays_within_radius() {
    let (w, h) = (61u32, 1u32);
    let mut src = vec![0u8; w as usize];
    src[30] = 255;
    let out = soft_blur_mask(&src, w, h, 9).unwrap();
    assert_eq!(out[30 - 10], 0);
    assert_eq!(out[30 + 10], 0);
}

#[test]
fn rejects_mismatched_lengths() {
    assert!(soft_blur_rgba8_premul(&[0u8; 7], 1, 2, 3).is_err());
    assert!(gaussian_blur(&[0u8; 4], 1, 1, 5, 1, 1.0).is_err());
}
