use super::*;
use crate::foundation::core::Rgba8Premul;

fn solid(width: u32, height: u32, px: [u8; 4]) -> Raster {
    Raster::solid(
        Canvas::new(width, height).unwrap(),
        Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]),
    )
    .unwrap()
}

#[test]
fn small_views_are_not_upscaled() {
    let a = ViewAssembler::default();
    let out = a
        .assemble(&solid(300, 100, [255, 0, 0, 255]), &solid(200, 50, [0, 0, 255, 255]))
        .unwrap();
    assert_eq!((out.width, out.height), (300, 100 + 20 + 50));
    assert_eq!(out.pixel(0, 0), [255, 0, 0, 255]);
    // Side view is centered: 50px margin on each side.
    assert_eq!(out.pixel(49, 130), [0, 0, 0, 0]);
    assert_eq!(out.pixel(50, 130), [0, 0, 255, 255]);
    assert_eq!(out.pixel(250, 130), [0, 0, 0, 0]);
    // Gap stays transparent.
    assert_eq!(out.pixel(150, 110), [0, 0, 0, 0]);
}

#[test]
fn wide_views_are_scaled_to_the_cap() {
    let a = ViewAssembler::default();
    let out = a
        .assemble(&solid(2400, 400, [1, 1, 1, 255]), &solid(1200, 300, [2, 2, 2, 255]))
        .unwrap();
    assert_eq!(out.width, 1200);
    assert_eq!(out.height, 200 + 20 + 150);
}

#[test]
fn output_never_exceeds_the_cap() {
    let a = ViewAssembler::new(100, 5).unwrap();
    for (tw, sw) in [(99, 101), (333, 7), (100, 100), (1, 1000), (157, 211)] {
        let top = Canvas::new(tw, 13).unwrap();
        let side = Canvas::new(sw, 17).unwrap();
        let (out, t, s) = a.layout(top, side).unwrap();
        assert!(out.width <= 100, "{tw}x{sw} -> {}", out.width);
        assert!(t.width <= tw && s.width <= sw);
        assert_eq!(out.height, t.height + s.height + 5);
    }
}

#[test]
fn rounding_keeps_at_least_one_pixel() {
    let a = ViewAssembler::new(10, 0).unwrap();
    let (_, top, side) = a
        .layout(Canvas::new(1000, 1).unwrap(), Canvas::new(10, 1000).unwrap())
        .unwrap();
    assert_eq!(top, Canvas { width: 10, height: 1 });
    assert_eq!(side, Canvas { width: 1, height: 10 });
}

#[test]
fn zero_width_cap_is_rejected() {
    assert!(matches!(
        ViewAssembler::new(0, 20),
        Err(DesignerError::Configuration(_))
    ));
}
