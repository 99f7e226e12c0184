use act_core::Vec2;
use act_path::{BezierPath, CubicBezier, Curve, Path, PathError, Polyline, DEFAULT_PARAM_EPSILON};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-2
}

#[test]
fn polyline_segments_share_parameter_equally() {
    let line = Polyline::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(10.0, 2.0),
    ]);

    assert_eq!(line.point(0.0), Vec2::new(0.0, 0.0));
    assert_eq!(line.point(0.5), Vec2::new(10.0, 0.0));
    assert_eq!(line.point(1.0), Vec2::new(10.0, 2.0));
    assert!(approx(line.length(), 12.0));

    // 10 units over half the parameter range, then 2 units over the other half.
    assert!(approx(line.parametric_speed(0.1, DEFAULT_PARAM_EPSILON), 20.0));
    assert!(approx(line.parametric_speed(0.8, DEFAULT_PARAM_EPSILON), 4.0));
}

#[test]
fn speed_is_zero_at_end_and_on_coincident_points() {
    let line = Polyline::new(vec![Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0)]);
    assert_eq!(line.parametric_speed(1.0, DEFAULT_PARAM_EPSILON), 0.0);

    let degenerate = Polyline::new(vec![Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0)]);
    assert_eq!(degenerate.parametric_speed(0.0, DEFAULT_PARAM_EPSILON), 0.0);
    assert_eq!(degenerate.tangent(0.0, DEFAULT_PARAM_EPSILON), None);
}

#[test]
fn tangent_uses_backward_difference_at_end() {
    let line = Polyline::new(vec![Vec2::ZERO, Vec2::new(0.0, 3.0)]);
    let t = line.tangent(1.0, DEFAULT_PARAM_EPSILON).expect("tangent");
    assert!(approx(t.x, 0.0) && approx(t.y, 1.0));
}

#[test]
fn bezier_hits_endpoints_and_line_is_uniform() {
    let path = BezierPath::new(vec![
        CubicBezier::line(Vec2::ZERO, Vec2::new(3.0, 0.0)),
        CubicBezier::new(
            Vec2::new(3.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(5.0, 1.0),
            Vec2::new(5.0, 2.0),
        ),
    ]);

    assert_eq!(path.point(0.0), Vec2::ZERO);
    assert_eq!(path.point(0.5), Vec2::new(3.0, 0.0));
    assert_eq!(path.point(1.0), Vec2::new(5.0, 2.0));
    // First curve: 3 units over half the range.
    assert!(approx(path.parametric_speed(0.25, DEFAULT_PARAM_EPSILON), 6.0));
    assert!(path.approximate_length(64) > 3.0 + 2.0_f32.hypot(2.0) * 0.9);
}

#[test]
fn validation_reports_missing_geometry() {
    assert_eq!(
        Polyline::new(vec![Vec2::ZERO]).validate(),
        Err(PathError::TooFewPoints(1))
    );
    assert_eq!(BezierPath::default().validate(), Err(PathError::NoCurves));
    assert_eq!(
        Path::from(Polyline::new(vec![Vec2::ZERO, Vec2::new(f32::NAN, 0.0)])).validate(),
        Err(PathError::NonFinite(1))
    );
    assert!(Path::from(Polyline::new(vec![Vec2::ZERO, Vec2::X])).validate().is_ok());
}
