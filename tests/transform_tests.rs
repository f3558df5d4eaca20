mod common;

use chart_engine::data_types::Rect;
use chart_engine::transform::{
    compose, model, projection_for_quadrant, swap_components, Quadrant, TransformCache,
};
use common::assert_close;
use glam::DVec2;

#[test]
fn test_model_maps_min_to_zero_and_max_to_one() {
    for (min, max) in [(0.0, 10.0), (-5.0, 5.0), (1e-3, 2e-3), (-300.0, -100.0)] {
        let m = model(min, max, min * 2.0, max * 2.0).unwrap();
        let lo = m.transform_point2(DVec2::new(min, min * 2.0));
        let hi = m.transform_point2(DVec2::new(max, max * 2.0));
        assert_close(lo.x, 0.0);
        assert_close(lo.y, 0.0);
        assert_close(hi.x, 1.0);
        assert_close(hi.y, 1.0);
    }
}

#[test]
fn test_model_swapped_bounds_invert_sign() {
    let forward = model(0.0, 10.0, 0.0, 10.0).unwrap();
    let backward = model(10.0, 0.0, 10.0, 0.0).unwrap();
    assert_close(forward.matrix2.x_axis.x, 0.1);
    assert_close(backward.matrix2.x_axis.x, -0.1);
    assert_close(backward.matrix2.y_axis.y, -0.1);

    let p = backward.transform_point2(DVec2::new(10.0, 10.0));
    assert_close(p.x, 0.0);
    assert_close(p.y, 0.0);
}

#[test]
fn test_model_degenerate_range_is_none() {
    assert!(model(5.0, 5.0, 0.0, 1.0).is_none());
    assert!(model(0.0, 1.0, 3.0, 3.0).is_none());
    assert!(model(0.0, f64::NAN, 0.0, 1.0).is_none());
    assert!(model(0.0, f64::INFINITY, 0.0, 1.0).is_none());
}

#[test]
fn test_quadrant_lookup_table() {
    assert_eq!(Quadrant::from_directions(true, true), Quadrant::First);
    assert_eq!(Quadrant::from_directions(false, true), Quadrant::Second);
    assert_eq!(Quadrant::from_directions(false, false), Quadrant::Third);
    assert_eq!(Quadrant::from_directions(true, false), Quadrant::Fourth);
    assert_eq!(Quadrant::from_directions(false, false).number(), 3);
}

#[test]
fn test_projection_is_bijection_for_every_quadrant() {
    let rect = Rect::new(10.0, 20.0, 200.0, 100.0);
    let samples = [(0.0, 0.0), (1.0, 1.0), (0.25, 0.75), (0.5, 0.5)];
    for n in 1..=4u8 {
        let quadrant = Quadrant::try_from(n).unwrap();
        let p = projection_for_quadrant(quadrant, rect);
        let inverse = p.inverse();
        for (x, y) in samples {
            let screen = p.transform_point2(DVec2::new(x, y));
            assert!(screen.x >= rect.left() - 1e-9 && screen.x <= rect.right() + 1e-9);
            assert!(screen.y >= rect.top() - 1e-9 && screen.y <= rect.bottom() + 1e-9);
            let back = inverse.transform_point2(screen);
            assert_close(back.x, x);
            assert_close(back.y, y);
        }
    }
}

#[test]
fn test_projection_origins_per_quadrant() {
    let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    let origin = |q| projection_for_quadrant(q, rect).transform_point2(DVec2::ZERO);

    assert_eq!(origin(Quadrant::First), DVec2::new(0.0, 50.0));
    assert_eq!(origin(Quadrant::Second), DVec2::new(100.0, 50.0));
    assert_eq!(origin(Quadrant::Third), DVec2::new(100.0, 0.0));
    assert_eq!(origin(Quadrant::Fourth), DVec2::new(0.0, 0.0));
}

#[test]
fn test_composed_round_trip_lands_on_opposite_corners() {
    let rect = Rect::new(30.0, 0.0, 170.0, 80.0);
    let m = model(-2.0, 8.0, 100.0, 300.0).unwrap();
    for n in 1..=4u8 {
        let quadrant = Quadrant::try_from(n).unwrap();
        let composed = compose(m, projection_for_quadrant(quadrant, rect));
        let lo = composed.transform_point2(DVec2::new(-2.0, 100.0));
        let hi = composed.transform_point2(DVec2::new(8.0, 300.0));

        assert_close((hi.x - lo.x).abs(), rect.width);
        assert_close((hi.y - lo.y).abs(), rect.height);
        let near = |a: f64, b: f64| (a - b).abs() < 1e-9;
        for corner in [lo, hi] {
            assert!(near(corner.x, rect.left()) || near(corner.x, rect.right()));
            assert!(near(corner.y, rect.top()) || near(corner.y, rect.bottom()));
        }
    }
}

#[test]
fn test_swap_components_exchanges_axes() {
    let p = swap_components().transform_point2(DVec2::new(3.0, 7.0));
    assert_eq!(p, DVec2::new(7.0, 3.0));
}

#[test]
fn test_cache_reports_changes_by_value() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut cache = TransformCache::new();
    assert!(!cache.is_valid());
    assert!(cache.update(model(0.0, 1.0, 0.0, 1.0), projection_for_quadrant(Quadrant::First, rect)));

    // Equal values built separately do not count as a change.
    assert!(!cache.update(model(0.0, 1.0, 0.0, 1.0), projection_for_quadrant(Quadrant::First, rect)));

    // A degenerate model keeps the previous transform.
    let before = cache.composed();
    assert!(!cache.update(model(1.0, 1.0, 0.0, 1.0), projection_for_quadrant(Quadrant::Third, rect)));
    assert_eq!(cache.composed(), before);

    let screen = cache.data_to_screen(DVec2::new(0.5, 0.5));
    assert_eq!(screen, DVec2::new(50.0, 50.0));
    let data = cache.screen_to_data(screen).unwrap();
    assert_close(data.x, 0.5);
    assert_close(data.y, 0.5);

    cache.invalidate();
    assert!(cache.screen_to_data(screen).is_none());
}
