use super::*;

fn drain(lp: &mut EventLoop, until: f64) -> Vec<Tick> {
    let mut out = Vec::new();
    while let Some(t) = lp.next_due(until) {
        out.push(t);
    }
    lp.advance_to(until);
    out
}

#[test]
fn interval_fires_each_period() {
    let mut lp = EventLoop::new();
    let id = lp.set_interval(200.0);
    let ticks = drain(&mut lp, 650.0);
    let at: Vec<f64> = ticks.iter().map(|t| t.at_ms).collect();
    assert_eq!(at, vec![200.0, 400.0, 600.0]);
    assert!(ticks.iter().all(|t| t.timer == id));
    assert_eq!(lp.now_ms(), 650.0);
}

#[test]
fn cleared_timer_never_fires_again() {
    let mut lp = EventLoop::new();
    let id = lp.set_interval(100.0);
    assert_eq!(lp.next_due(100.0).map(|t| t.at_ms), Some(100.0));
    assert!(lp.clear(id));
    assert!(!lp.clear(id));
    assert!(!lp.is_active(id));
    assert!(drain(&mut lp, 10_000.0).is_empty());
}

#[test]
fn timers_interleave_by_due_time() {
    let mut lp = EventLoop::new();
    let a = lp.set_interval(300.0);
    let b = lp.set_interval(200.0);
    let order: Vec<TimerId> = drain(&mut lp, 600.0).iter().map(|t| t.timer).collect();
    assert_eq!(order, vec![b, a, b, a, b]);
}

#[test]
fn interval_starts_from_current_time() {
    let mut lp = EventLoop::new();
    lp.advance_to(1_000.0);
    lp.set_interval(50.0);
    assert_eq!(lp.next_due(1_049.0), None);
    assert_eq!(lp.next_due(1_050.0).map(|t| t.at_ms), Some(1_050.0));
}

#[test]
fn clock_never_moves_backwards() {
    let mut lp = EventLoop::new();
    lp.advance_to(500.0);
    lp.advance_to(100.0);
    assert_eq!(lp.now_ms(), 500.0);
}
