use chart_engine::data_types::{AxisSide, Rect, Size, Thickness};
use chart_engine::layout::LayoutNegotiator;

fn surface(width: f64, height: f64) -> LayoutNegotiator {
    LayoutNegotiator::new(Rect::from_size(Size::new(width, height)), LayoutNegotiator::DEFAULT_QUOTA)
}

#[test]
fn test_bottom_then_left_claims() {
    let mut layout = surface(200.0, 100.0);
    let bottom = layout.claim_axis_space("x", AxisSide::Bottom, 20.0);
    let left = layout.claim_axis_space("y", AxisSide::Left, 30.0);

    assert_eq!(bottom, Rect::new(0.0, 80.0, 200.0, 20.0));
    assert_eq!(left, Rect::new(0.0, 0.0, 30.0, 80.0));
    assert_eq!(layout.remaining(), Rect::new(30.0, 0.0, 170.0, 80.0));
}

#[test]
fn test_claims_are_clipped_to_quota() {
    let mut layout = surface(200.0, 100.0);
    let top = layout.claim_space("legend", AxisSide::Top, 500.0);
    let right = layout.claim_space("panel", AxisSide::Right, 1e9);

    assert_eq!(top.height, 20.0);
    assert_eq!(right.width, 40.0);
    assert_eq!(layout.remaining(), Rect::new(0.0, 20.0, 160.0, 80.0));
}

#[test]
fn test_bad_amounts_claim_nothing() {
    let mut layout = surface(200.0, 100.0);
    assert_eq!(layout.claim_space("a", AxisSide::Left, -10.0).width, 0.0);
    assert_eq!(layout.claim_space("b", AxisSide::Left, f64::NAN).width, 0.0);
    assert_eq!(layout.remaining(), layout.layout_rect());
}

#[test]
fn test_finalize_stretches_axes_flush_with_data_area() {
    let mut layout = surface(200.0, 100.0);
    layout.claim_axis_space("x", AxisSide::Bottom, 20.0);
    layout.claim_axis_space("y", AxisSide::Left, 30.0);
    layout.claim_space("legend", AxisSide::Top, 10.0);
    assert!(!layout.is_finalized());

    layout.finalize_rects();
    assert!(layout.is_finalized());

    let data = layout.remaining();
    assert_eq!(data, Rect::new(30.0, 10.0, 170.0, 70.0));
    assert_eq!(layout.rect_for("x"), Rect::new(30.0, 80.0, 170.0, 20.0));
    assert_eq!(layout.rect_for("y"), Rect::new(0.0, 10.0, 30.0, 70.0));
    // Non-axis claims keep their original strip.
    assert_eq!(layout.rect_for("legend"), Rect::new(30.0, 0.0, 170.0, 10.0));
}

#[test]
fn test_unclaimed_requesters_get_the_data_area() {
    let mut layout = surface(200.0, 100.0);
    layout.claim_axis_space("x", AxisSide::Bottom, 20.0);
    layout.finalize_rects();

    assert!(!layout.has_claim("series"));
    assert_eq!(layout.rect_for("series"), layout.remaining());
}

#[test]
fn test_float_axis_takes_no_space() {
    let mut layout = surface(200.0, 100.0);
    layout.claim_axis_space("floating", AxisSide::Float, 25.0);
    layout.claim_axis_space("x", AxisSide::Bottom, 20.0);
    layout.finalize_rects();

    assert_eq!(layout.remaining(), Rect::new(0.0, 0.0, 200.0, 80.0));
    assert_eq!(layout.rect_for("floating"), layout.remaining());
}

#[test]
fn test_padding_shrinks_layout_rect() {
    let rect = Rect::from_size(Size::new(200.0, 100.0)).deflate(Thickness::uniform(10.0));
    let mut layout = LayoutNegotiator::new(rect, 0.5);
    layout.claim_axis_space("x", AxisSide::Bottom, 100.0);
    assert_eq!(layout.remaining(), Rect::new(10.0, 10.0, 180.0, 40.0));
}
