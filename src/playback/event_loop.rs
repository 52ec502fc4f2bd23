/// Handle to a registered interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// One interval firing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub timer: TimerId,
    pub at_ms: f64,
}

#[derive(Clone, Debug)]
struct Interval {
    id: TimerId,
    period_ms: f64,
    due_ms: f64,
}

/// Single-threaded virtual clock with interval timers.
///
/// Time only moves when the owner calls [`EventLoop::next_due`] or [`EventLoop::advance_to`], so
/// playback is fully deterministic.
#[derive(Clone, Debug, Default)]
pub struct EventLoop {
    now_ms: f64,
    next_id: u64,
    timers: Vec<Interval>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Fire every `period_ms`, first one period from now.
    pub fn set_interval(&mut self, period_ms: f64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period_ms = period_ms.max(1.0);
        self.timers.push(Interval {
            id,
            period_ms,
            due_ms: self.now_ms + period_ms,
        });
        tracing::trace!(?id, period_ms, "interval set");
        id
    }

    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest firing due at or before `until_ms`, moving the clock to it.
    ///
    /// Timers fire in due order; ties go to the timer registered first.
    pub fn next_due(&mut self, until_ms: f64) -> Option<Tick> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.due_ms <= until_ms)
            .min_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))?;
        let tick = Tick {
            timer: timer.id,
            at_ms: timer.due_ms,
        };
        timer.due_ms += timer.period_ms;
        self.now_ms = self.now_ms.max(tick.at_ms);
        Some(tick)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, until_ms: f64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/event_loop.rs"]
mod tests;
