use proptest::prelude::*;
use relgraph::simulation::BodyKind;
use relgraph::*;

// Golden: a rod of rest length 1 seen from a frame at 0.6 measures 0.8.
#[test]
fn golden_length_contraction() {
    let mut sim = Simulation::new();
    let rod = sim.add(BodySpec::rod(0.0, 0.0, 1.0, Orientation::Horizontal)).unwrap();
    let frame = Frame::moving_x(0.6).unwrap();
    for t in [-3.0, 0.0, 2.5] {
        let snap = sim.snapshot(frame, t).unwrap();
        let width = snap.body(rod).unwrap().extent().unwrap().width();
        assert!((width - 0.8).abs() < 1e-9, "t = {t}: width {width}");
    }
}

// Golden: a rod moving through the lab, built with its proper length.
#[test]
fn golden_moving_rod_contracts_in_lab() {
    let mut sim = Simulation::new();
    let rod = sim
        .add(BodySpec::rod(-2.0, 0.0, 5.0, Orientation::Horizontal).moving_x(0.6))
        .unwrap();
    let snap = sim.snapshot(Frame::LAB, 1.0).unwrap();
    let extent = snap.body(rod).unwrap().extent().unwrap();
    assert!((extent.width() - 4.0).abs() < 1e-9);
    assert!((extent.min_x - (-2.0 + 0.6)).abs() < 1e-9);

    // Riding along with it restores the proper length.
    let snap = sim.snapshot(Frame::moving_x(0.6).unwrap(), 0.0).unwrap();
    assert!((snap.body(rod).unwrap().extent().unwrap().width() - 5.0).abs() < 1e-9);
}

#[test]
fn transverse_rod_keeps_length() {
    let mut sim = Simulation::new();
    let rod = sim
        .add(BodySpec::rod(0.0, 0.0, 5.0, Orientation::Vertical).moving_x(0.9))
        .unwrap();
    let e = sim.snapshot(Frame::LAB, 3.0).unwrap().body(rod).unwrap().extent().unwrap();
    assert!((e.height() - 5.0).abs() < 1e-9);
    assert!(e.width().abs() < 1e-9);
}

#[test]
fn train_keeps_shape_up_to_contraction() {
    let mut sim = Simulation::new();
    let train = sim
        .add(BodySpec::train(0.0, 0.0, 10.0, 2.0).in_frame(Frame::moving_x(0.8).unwrap()))
        .unwrap();
    let view = sim.snapshot(Frame::LAB, 0.0).unwrap();
    let body = view.body(train).unwrap();
    assert_eq!(body.kind, BodyKind::Train);
    assert_eq!(body.visible_segments().count(), 4);
    let e = body.extent().unwrap();
    assert!((e.width() - 6.0).abs() < 1e-9);
    assert!((e.height() - 2.0).abs() < 1e-9);
}

#[test]
fn viewing_from_another_frame_leaves_body_untouched() {
    let mut sim = Simulation::new();
    let id = sim.add(BodySpec::person(0.0, 0.0, 1.0).moving_x(0.3)).unwrap();
    let before = sim.body(id).unwrap().clone();
    let seen = before.viewed_from(Frame::new(0.2, 0.4).unwrap());
    assert_eq!(sim.body(id).unwrap(), &before);
    assert_eq!(seen.worldlines().len(), before.worldlines().len());
    assert_eq!(seen.frame(), Frame::new(0.2, 0.4).unwrap());
}

proptest! {
    #[test]
    fn prop_rod_length_matches_formula(
        v in -0.95_f64..0.95_f64,
        length in 0.1_f64..20.0_f64,
        t in -10.0_f64..10.0_f64,
    ) {
        let mut sim = Simulation::new();
        let rod = sim.add(BodySpec::rod(1.0, 2.0, length, Orientation::Horizontal)).unwrap();
        let snap = sim.snapshot(Frame::moving_x(v).unwrap(), t).unwrap();
        let width = snap.body(rod).unwrap().extent().unwrap().width();
        let expected = relativity::special::length_contraction(length, v).unwrap();
        prop_assert!((width - expected).abs() < 1e-8 * (1.0 + length));
    }

    #[test]
    fn prop_worldline_events_keep_interval(
        vx in -0.6_f64..0.6_f64,
        vy in -0.6_f64..0.6_f64,
        u in -0.9_f64..0.9_f64,
    ) {
        let mut sim = Simulation::new();
        let id = sim.add(BodySpec::point(0.0, 0.0).moving_x(u).starting_at(0.0).until(5.0)).unwrap();
        let expected = sim.proper_time(id).unwrap();
        let frame = Frame::new(vx, vy).unwrap();
        let viewed = sim.body(id).unwrap().viewed_from(frame);
        let line = &viewed.worldlines()[0];
        let (a, b) = (line.birth().unwrap(), line.death().unwrap());
        prop_assert!((a.interval_to(&b).sqrt() - expected).abs() < 1e-8);
    }
}
