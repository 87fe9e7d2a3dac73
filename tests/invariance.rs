use proptest::prelude::*;
use relgraph::relativity::transforms::{boost_x, lorentz_transform, lorentz_transform_slice};
use relgraph::*;

fn scale(e: &Event) -> f64 {
    1.0 + e.t * e.t + e.x * e.x + e.y * e.y
}

// Golden: the unit-rod endpoint boosted at 0.8.
#[test]
fn golden_boost_point_eight() {
    let e = lorentz_transform(&Event::new(0.0, 1.0, 0.0), Velocity::new(0.8, 0.0)).unwrap();
    assert!((lorentz_factor(0.8).unwrap() - 5.0 / 3.0).abs() < 1e-12);
    assert!((e.t - (-4.0 / 3.0)).abs() < 1e-9, "t' = {}", e.t);
    assert!((e.x - 5.0 / 3.0).abs() < 1e-9, "x' = {}", e.x);
    assert_eq!(e.y, 0.0);
}

#[test]
fn golden_malformed_vector() {
    assert_eq!(
        lorentz_transform_slice(&[], Velocity::zeros()),
        Err(RelativityError::MalformedVector { len: 0 })
    );
}

proptest! {
    #[test]
    fn prop_interval_invariance(
        vx in -0.7_f64..0.7_f64,
        vy in -0.7_f64..0.7_f64,
        t in -10.0_f64..10.0_f64,
        x in -10.0_f64..10.0_f64,
        y in -10.0_f64..10.0_f64,
    ) {
        let e = Event::new(t, x, y);
        let e2 = lorentz_transform(&e, Velocity::new(vx, vy)).unwrap();
        prop_assert!((e2.interval() - e.interval()).abs() < 1e-9 * scale(&e) * 10.0);
    }

    #[test]
    fn prop_round_trip(
        v in -0.95_f64..0.95_f64,
        t in -10.0_f64..10.0_f64,
        x in -10.0_f64..10.0_f64,
        y in -10.0_f64..10.0_f64,
    ) {
        let e = Event::new(t, x, y);
        let there = boost_x(&e, v).unwrap();
        let back = boost_x(&there, -v).unwrap();
        prop_assert!((back.t - t).abs() < 1e-9);
        prop_assert!((back.x - x).abs() < 1e-9);
        prop_assert!((back.y - y).abs() < 1e-12);
    }

    #[test]
    fn prop_zero_velocity_is_identity(
        t in -1e6_f64..1e6_f64,
        x in -1e6_f64..1e6_f64,
        y in -1e6_f64..1e6_f64,
    ) {
        let e = Event::new(t, x, y);
        prop_assert_eq!(lorentz_transform(&e, Velocity::zeros()).unwrap(), e);
        prop_assert_eq!(boost_x(&e, 0.0).unwrap(), e);
    }

    #[test]
    fn prop_round_trip_between_frames(
        ax in -0.6_f64..0.6_f64, ay in -0.6_f64..0.6_f64,
        bx in -0.6_f64..0.6_f64, by in -0.6_f64..0.6_f64,
        t in -5.0_f64..5.0_f64, x in -5.0_f64..5.0_f64, y in -5.0_f64..5.0_f64,
    ) {
        let (a, b) = (Frame::new(ax, ay).unwrap(), Frame::new(bx, by).unwrap());
        let e = Event::new(t, x, y);
        let there = transform_between(&e, a, b).unwrap();
        let back = transform_between(&there, b, a).unwrap();
        prop_assert!((there.interval() - e.interval()).abs() < 1e-8);
        prop_assert!((back.t - t).abs() < 1e-9 && (back.x - x).abs() < 1e-9 && (back.y - y).abs() < 1e-9);
    }

    #[test]
    fn prop_superluminal_rejected(
        v in 1.0_f64..10.0_f64,
        sign in prop::bool::ANY,
        t in -10.0_f64..10.0_f64,
        x in -10.0_f64..10.0_f64,
    ) {
        let v = if sign { v } else { -v };
        let result = lorentz_transform(&Event::new(t, x, 0.0), Velocity::new(v, 0.0));
        let is_invalid = matches!(result, Err(RelativityError::InvalidVelocity { .. }));
        prop_assert!(is_invalid);
        prop_assert!(boost_x(&Event::new(t, x, 0.0), v).is_err());
    }

    #[test]
    fn prop_collinear_boosts_compose_by_einstein_addition(
        v1 in -0.6_f64..0.6_f64,
        v2 in -0.6_f64..0.6_f64,
        t in -10.0_f64..10.0_f64,
        x in -10.0_f64..10.0_f64,
    ) {
        let e = Event::new(t, x, 0.0);
        let seq = boost_x(&boost_x(&e, v1).unwrap(), v2).unwrap();
        let v12 = (v1 + v2) / (1.0 + v1 * v2);
        let single = boost_x(&e, v12).unwrap();
        prop_assert!((seq.t - single.t).abs() < 1e-8);
        prop_assert!((seq.x - single.x).abs() < 1e-8);
    }

    #[test]
    fn prop_velocity_addition_stays_subluminal(
        ux in -0.7_f64..0.7_f64, uy in -0.7_f64..0.7_f64,
        vx in -0.7_f64..0.7_f64, vy in -0.7_f64..0.7_f64,
    ) {
        let w = add_velocities(Velocity::new(ux, uy), Velocity::new(vx, vy)).unwrap();
        prop_assert!(w.norm() < 1.0);
    }
}
