use super::*;

fn white_canvas(w: u32, h: u32) -> Canvas {
    Canvas::from_rgb_image(&image::RgbImage::from_pixel(w, h, image::Rgb([255, 255, 255]))).unwrap()
}

fn changed_pixels(a: &Canvas, b: &Canvas) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    for y in 0..a.height() {
        for x in 0..a.width() {
            if a.pixel(x, y) != b.pixel(x, y) {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn bitmap_text_lands_at_slot_origin() {
    let before = white_canvas(120, 60);
    let mut canvas = before.clone();
    let mut painter = TextPainter::new(FontSource::Bitmap);
    let slot = TextSlot {
        x: 10,
        y: 20,
        size: 90.0,
    };
    painter
        .draw(&mut canvas, "HI", slot, Rgb8::new(0, 0, 0), 230)
        .unwrap();

    let changed = changed_pixels(&before, &canvas);
    assert!(!changed.is_empty());
    let (bw, bh) = bitmap::measure("HI");
    for &(x, y) in &changed {
        assert!((10..10 + bw).contains(&x) && (20..20 + bh).contains(&y));
    }
    // Canvas stays opaque; ink darkens toward black by 230/255.
    let (x, y) = changed[0];
    let px = canvas.pixel(x, y);
    assert_eq!(px[3], 255);
    assert_eq!(px[0], 25);
}

#[test]
fn empty_or_invisible_text_is_a_no_op() {
    let before = white_canvas(40, 40);
    let mut canvas = before.clone();
    let mut painter = TextPainter::new(FontSource::Bitmap);
    let slot = TextSlot {
        x: 0,
        y: 0,
        size: 10.0,
    };
    painter.draw(&mut canvas, "", slot, Rgb8::new(0, 0, 0), 255).unwrap();
    painter.draw(&mut canvas, "X", slot, Rgb8::new(0, 0, 0), 0).unwrap();
    assert_eq!(canvas, before);
}

#[test]
fn text_outside_the_canvas_is_clipped() {
    let before = white_canvas(50, 50);
    let mut canvas = before.clone();
    let mut painter = TextPainter::new(FontSource::Bitmap);
    let slot = TextSlot {
        x: 60,
        y: 800,
        size: 90.0,
    };
    painter
        .draw(&mut canvas, "SHOP NOW", slot, Rgb8::new(0, 0, 0), 230)
        .unwrap();
    assert_eq!(canvas, before);
}

#[test]
fn scalable_text_draws_when_a_face_is_available() {
    let FontSource::Scalable(font) = FontSource::resolve(None) else {
        return;
    };
    let before = white_canvas(400, 160);
    let mut canvas = before.clone();
    let mut painter = TextPainter::new(FontSource::Scalable(font));
    let slot = TextSlot {
        x: 20,
        y: 30,
        size: 50.0,
    };
    painter
        .draw(&mut canvas, "SHOP NOW", slot, Rgb8::new(212, 175, 55), 230)
        .unwrap();

    let changed = changed_pixels(&before, &canvas);
    assert!(!changed.is_empty());
    // Nothing lands left of or above the pad around the slot origin.
    let pad = (50.0f32 / 4.0).ceil() as u32;
    assert!(changed.iter().all(|&(x, y)| x + pad >= 20 && y + pad >= 30));
    assert!(changed.iter().all(|&(x, y)| canvas.pixel(x, y)[3] == 255));
}

#[test]
fn layout_rejects_non_positive_sizes() {
    let mut engine = TextLayoutEngine::new();
    let Err(err) = engine.layout_line("x", &[], 0.0, TextBrushRgba8::default()) else {
        panic!("zero size must be rejected");
    };
    assert!(matches!(err, PosterError::InvalidInput(_)));
}
