use rand::{SeedableRng, rngs::StdRng};

use super::*;

#[test]
fn random_blobs_respect_ranges() {
    let mut rng = StdRng::seed_from_u64(7);
    let blobs = random_blobs(&mut rng, 1080, 1080, 64);
    assert_eq!(blobs.len(), 64);
    for b in &blobs {
        assert!(b.bounds.x0 >= -100.0 && b.bounds.x0 <= 980.0);
        assert!(b.bounds.y0 >= -100.0 && b.bounds.y0 <= 980.0);
        assert!((200.0..=500.0).contains(&b.bounds.width()));
        assert!((200.0..=500.0).contains(&b.bounds.height()));
        assert!((40..=80).contains(&b.rgba[3]));
    }
}

#[test]
fn same_seed_gives_same_blobs() {
    let a = random_blobs(&mut StdRng::seed_from_u64(42), 400, 300, 3);
    let b = random_blobs(&mut StdRng::seed_from_u64(42), 400, 300, 3);
    assert_eq!(a, b);
}

#[test]
fn blobs_only_add_to_an_opaque_canvas() {
    let rgb = image::RgbImage::from_pixel(120, 90, image::Rgb([20, 20, 20]));
    let mut canvas = Canvas::from_rgb_image(&rgb).unwrap();
    let blobs = [Blob {
        bounds: Rect::new(10.0, 10.0, 110.0, 80.0),
        rgba: [255, 255, 255, 80],
    }];
    composite_blobs(&mut canvas, &blobs).unwrap();

    assert!(canvas.alpha_channel().iter().all(|&a| a == 255));
    let center = canvas.pixel(60, 45);
    assert!(center[0] > 20, "center should be lightened: {center:?}");
}

#[test]
fn zero_blobs_leave_canvas_untouched() {
    let rgb = image::RgbImage::from_pixel(32, 32, image::Rgb([1, 2, 3]));
    let mut canvas = Canvas::from_rgb_image(&rgb).unwrap();
    let before = canvas.clone();
    apply_blurred_blobs(&mut canvas, 0, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(canvas, before);
}
