//! Typed publish/subscribe for collaborators outside the visualization core.
//!
//! Events are queued when emitted and only handed to subscribers on [`EventBus::flush`], which the
//! controller calls once the triggering operation has finished. A subscriber that fails or panics
//! is counted and logged; the remaining subscribers still run.

use std::{
    collections::VecDeque,
    panic::{AssertUnwindSafe, catch_unwind},
};

/// Why playback stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Paused,
    ReachedEnd,
    Destroyed,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SankeyEvent {
    DataLoaded {
        records: usize,
        first_year: i32,
        last_year: i32,
    },
    DataValidated {
        years: usize,
        heat: bool,
    },
    YearChanging {
        from: i32,
        to: i32,
    },
    YearChanged {
        year: i32,
        index: usize,
    },
    AnimationStarted {
        year: i32,
    },
    AnimationStopped {
        year: i32,
        reason: StopReason,
    },
    RenderingCompleted {
        year: i32,
        primitives: usize,
    },
    SystemError {
        message: String,
    },
}

/// Discriminant of [`SankeyEvent`], for filtered subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DataLoaded,
    DataValidated,
    YearChanging,
    YearChanged,
    AnimationStarted,
    AnimationStopped,
    RenderingCompleted,
    SystemError,
}

impl SankeyEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::DataLoaded { .. } => EventKind::DataLoaded,
            Self::DataValidated { .. } => EventKind::DataValidated,
            Self::YearChanging { .. } => EventKind::YearChanging,
            Self::YearChanged { .. } => EventKind::YearChanged,
            Self::AnimationStarted { .. } => EventKind::AnimationStarted,
            Self::AnimationStopped { .. } => EventKind::AnimationStopped,
            Self::RenderingCompleted { .. } => EventKind::RenderingCompleted,
            Self::SystemError { .. } => EventKind::SystemError,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub type Handler = Box<dyn FnMut(&SankeyEvent) -> anyhow::Result<()>>;

struct Subscriber {
    id: SubscriptionId,
    filter: Option<EventKind>,
    handler: Handler,
}

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    queue: VecDeque<SankeyEvent>,
    next_id: u64,
    handler_errors: usize,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("queued", &self.queue.len())
            .field("handler_errors", &self.handler_errors)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event.
    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&SankeyEvent) -> anyhow::Result<()> + 'static,
    ) -> SubscriptionId {
        self.add(None, Box::new(handler))
    }

    /// Receive events of one kind only.
    pub fn subscribe_to(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&SankeyEvent) -> anyhow::Result<()> + 'static,
    ) -> SubscriptionId {
        self.add(Some(kind), Box::new(handler))
    }

    fn add(&mut self, filter: Option<EventKind>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            filter,
            handler,
        });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Queue `event` for the next flush.
    pub fn emit(&mut self, event: SankeyEvent) {
        self.queue.push_back(event);
    }

    /// Deliver queued events in emission order. Returns the number of events delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.queue.pop_front() {
            tracing::trace!(kind = ?event.kind(), "dispatch");
            for sub in &mut self.subscribers {
                if sub.filter.is_some_and(|k| k != event.kind()) {
                    continue;
                }
                let outcome = catch_unwind(AssertUnwindSafe(|| (sub.handler)(&event)));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        self.handler_errors += 1;
                        tracing::warn!(kind = ?event.kind(), error = %err, "event handler failed");
                    }
                    Err(_) => {
                        self.handler_errors += 1;
                        tracing::warn!(kind = ?event.kind(), "event handler panicked");
                    }
                }
            }
            delivered += 1;
        }
        delivered
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Failed or panicked handler invocations so far.
    pub fn handler_errors(&self) -> usize {
        self.handler_errors
    }

    /// Drop all subscribers and undelivered events.
    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.queue.clear();
    }
}

/// Handler that mirrors every event into the log, used when debug logging is enabled.
pub fn log_handler() -> impl FnMut(&SankeyEvent) -> anyhow::Result<()> + 'static {
    |event: &SankeyEvent| {
        tracing::debug!(?event, "sankey event");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/events/bus.rs"]
mod tests;
