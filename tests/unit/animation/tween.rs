use std::collections::BTreeMap;

use super::*;
use crate::{
    config::catalog::{Fuel, Sector},
    foundation::core::BezPath,
    layout::geometry::FlowId,
    render::surface::{Primitive, Tooltip},
};

#[derive(Default)]
struct Recorder {
    attrs: BTreeMap<(PrimitiveId, Attr), f64>,
    writes: usize,
}

impl RenderSurface for Recorder {
    fn create(&mut self, _id: PrimitiveId, _primitive: Primitive) {}

    fn set_attr(&mut self, id: PrimitiveId, attr: Attr, value: f64) {
        self.attrs.insert((id, attr), value);
        self.writes += 1;
    }

    fn attr(&self, id: PrimitiveId, attr: Attr) -> Option<f64> {
        self.attrs.get(&(id, attr)).copied()
    }

    fn set_path(&mut self, _id: PrimitiveId, _path: &BezPath) {}
    fn set_caption(&mut self, _id: PrimitiveId, _caption: &str) {}
    fn set_visible(&mut self, _id: PrimitiveId, _visible: bool) {}
    fn set_tooltip(&mut self, _tooltip: Option<Tooltip>) {}

    fn clear(&mut self) {
        self.attrs.clear();
    }
}

fn width_key() -> AttrKey {
    AttrKey::new(
        PrimitiveId::Flow(FlowId {
            fuel: Fuel::Gas,
            sector: Sector::Residential,
        }),
        Attr::StrokeWidth,
    )
}

fn height_key() -> AttrKey {
    AttrKey::new(PrimitiveId::Box(Sector::Industrial), Attr::Height)
}

#[test]
fn tween_samples_linearly_and_clamps() {
    let t = Tween {
        from: 10.0,
        to: 20.0,
        start_ms: 100.0,
        duration_ms: 200.0,
        ease: Ease::Linear,
    };
    assert_eq!(t.sample(0.0), 10.0);
    assert_eq!(t.sample(200.0), 15.0);
    assert_eq!(t.sample(1000.0), 20.0);
    assert!(!t.is_done(299.0));
    assert!(t.is_done(300.0));
}

#[test]
fn zero_duration_jumps_to_target() {
    let t = Tween {
        from: 1.0,
        to: 2.0,
        start_ms: 5.0,
        duration_ms: 0.0,
        ease: Ease::Linear,
    };
    assert_eq!(t.sample(5.0), 2.0);
}

#[test]
fn all_tweens_of_one_call_share_start_and_duration() {
    let mut engine = TransitionEngine::default();
    let mut surface = Recorder::default();
    engine.seed(width_key(), 0.0);
    engine.seed(height_key(), 100.0);

    let started = engine.retarget(0.0, 180.0, [(width_key(), 10.0), (height_key(), 200.0)]);
    assert_eq!(started, 2);

    assert!(engine.step(90.0, &mut surface));
    assert_eq!(surface.attr(width_key().id, Attr::StrokeWidth), Some(5.0));
    assert_eq!(surface.attr(height_key().id, Attr::Height), Some(150.0));

    assert!(!engine.step(180.0, &mut surface));
    assert_eq!(engine.value(width_key()), Some(10.0));
    assert_eq!(engine.value(height_key()), Some(200.0));
    assert!(!engine.is_animating());
}

#[test]
fn retarget_mid_flight_starts_from_displayed_value() {
    let mut engine = TransitionEngine::default();
    let mut surface = Recorder::default();
    engine.seed(width_key(), 0.0);

    engine.retarget(0.0, 100.0, [(width_key(), 100.0)]);
    engine.step(40.0, &mut surface);
    assert_eq!(engine.value(width_key()), Some(40.0));

    engine.retarget(50.0, 100.0, [(width_key(), 0.0)]);
    // Superseded tween would have shown 50 at t=50; the new one starts there.
    assert_eq!(engine.value(width_key()), Some(50.0));
    assert_eq!(engine.target(width_key()), Some(0.0));

    engine.step(100.0, &mut surface);
    assert_eq!(engine.value(width_key()), Some(25.0));
    engine.step(150.0, &mut surface);
    assert_eq!(surface.attr(width_key().id, Attr::StrokeWidth), Some(0.0));
}

#[test]
fn repeated_retarget_to_same_values_is_idempotent() {
    let mut once = TransitionEngine::default();
    let mut twice = TransitionEngine::default();
    let (mut s1, mut s2) = (Recorder::default(), Recorder::default());
    for e in [&mut once, &mut twice] {
        e.seed(width_key(), 3.0);
    }

    once.retarget(0.0, 100.0, [(width_key(), 9.0)]);
    twice.retarget(0.0, 100.0, [(width_key(), 9.0)]);
    twice.retarget(1.0, 100.0, [(width_key(), 9.0)]);

    once.step(500.0, &mut s1);
    twice.step(500.0, &mut s2);
    assert_eq!(once.value(width_key()), twice.value(width_key()));
    assert_eq!(s1.attrs, s2.attrs);
}

#[test]
fn unknown_keys_start_at_their_target() {
    let mut engine = TransitionEngine::default();
    let mut surface = Recorder::default();
    engine.retarget(0.0, 100.0, [(height_key(), 42.0)]);
    engine.step(10.0, &mut surface);
    assert_eq!(surface.attr(height_key().id, Attr::Height), Some(42.0));
}

#[test]
fn finish_writes_end_values_and_stops() {
    let mut engine = TransitionEngine::default();
    let mut surface = Recorder::default();
    engine.seed(height_key(), 0.0);
    engine.retarget(0.0, 1_000.0, [(height_key(), 80.0)]);
    engine.finish(&mut surface);
    assert!(!engine.is_animating());
    assert_eq!(surface.attr(height_key().id, Attr::Height), Some(80.0));
    // Nothing left to write.
    let writes = surface.writes;
    engine.step(2_000.0, &mut surface);
    assert_eq!(surface.writes, writes);
}

#[test]
fn points_lerp_componentwise() {
    use crate::foundation::core::Point;
    let p = <Point as Lerp>::lerp(&Point::new(0.0, 10.0), &Point::new(10.0, 30.0), 0.5);
    assert_eq!(p, Point::new(5.0, 20.0));
}
