//! The visualization session: data, layout, scene and playback wired together.
//!
//! Construction runs in a fixed order (options, totals, geometry, projection, transition engine,
//! first draw) and either yields a ready instance or an error; there is no partially built state.
//! Every public command finishes by flushing the event bus, so subscribers only ever observe
//! events after the command that caused them has returned.

use crate::{
    animation::{ease::Ease, tween::TransitionEngine},
    config::options::{SankeyOptions, transition_ms},
    data::{record::EnergyRecord, store::DataStore},
    events::bus::{EventBus, SankeyEvent, StopReason, SubscriptionId, log_handler},
    foundation::error::{SankeyError, SankeyResult},
    layout::{
        geometry::{FlowGeometry, FlowId, GraphData},
        totals::Totals,
    },
    playback::event_loop::{EventLoop, TimerId},
    render::{projection::Projection, surface::RenderSurface},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Stopped,
    Playing,
}

pub struct EnergySankey<S: RenderSurface> {
    options: SankeyOptions,
    store: DataStore,
    totals: Totals,
    graphs: Vec<GraphData>,
    projection: Projection,
    engine: TransitionEngine,
    surface: S,
    bus: EventBus,
    clock: EventLoop,
    timer: Option<TimerId>,
    index: usize,
    state: PlaybackState,
    show_waste: bool,
    hovered: Option<FlowId>,
    destroyed: bool,
}

impl<S: RenderSurface> EnergySankey<S> {
    #[tracing::instrument(skip_all, fields(years = store.len()))]
    pub fn new(store: DataStore, options: SankeyOptions, mut surface: S) -> SankeyResult<Self> {
        options.validate()?;

        let totals = Totals::aggregate(&store);
        let graphs = FlowGeometry::build(&store, &totals);
        if graphs.len() != store.len() {
            return Err(SankeyError::render("geometry does not cover every year"));
        }
        let projection = Projection::new(store.catalog(), totals.box_tops.clone(), &options);

        let mut bus = EventBus::new();
        if options.debug_logging {
            bus.subscribe(log_handler());
        }
        bus.emit(SankeyEvent::DataLoaded {
            records: store.len(),
            first_year: store.first_year(),
            last_year: store.last_year(),
        });
        bus.emit(SankeyEvent::DataValidated {
            years: store.len(),
            heat: store.catalog().heat,
        });

        let first = &graphs[0];
        let milestone = store.record_by_index(0).and_then(|r| r.milestone.as_deref());
        let primitives = projection.draw(&mut surface, first, milestone, options.show_waste_heat);
        let mut engine = TransitionEngine::new(Ease::Linear);
        for (key, value) in projection.targets(first) {
            engine.seed(key, value);
        }
        bus.emit(SankeyEvent::RenderingCompleted {
            year: first.year,
            primitives,
        });
        tracing::info!(
            first = store.first_year(),
            last = store.last_year(),
            heat = store.catalog().heat,
            "energy sankey ready"
        );

        let show_waste = options.show_waste_heat;
        let auto_play = options.auto_play;
        let mut sankey = Self {
            options,
            store,
            totals,
            graphs,
            projection,
            engine,
            surface,
            bus,
            clock: EventLoop::new(),
            timer: None,
            index: 0,
            state: PlaybackState::Stopped,
            show_waste,
            hovered: None,
            destroyed: false,
        };
        if auto_play {
            sankey.start_timer();
        }
        Ok(sankey)
    }

    pub fn from_json_str(json: &str, options: SankeyOptions, surface: S) -> SankeyResult<Self> {
        Self::new(DataStore::from_json_str(json)?, options, surface)
    }

    // Queries.

    pub fn current_year(&self) -> i32 {
        self.graphs[self.index].year
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn years(&self) -> Vec<i32> {
        self.store.years()
    }

    pub fn year_index(&self, year: i32) -> Option<usize> {
        self.store.year_index(year)
    }

    pub fn year_data_by_index(&self, index: usize) -> Option<&EnergyRecord> {
        self.store.record_by_index(index)
    }

    pub fn graph_for_year(&self, year: i32) -> Option<&GraphData> {
        self.year_index(year).map(|i| &self.graphs[i])
    }

    pub fn current_graph(&self) -> &GraphData {
        &self.graphs[self.index]
    }

    pub fn is_waste_heat_visible(&self) -> bool {
        self.show_waste
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn speed_ms(&self) -> u64 {
        self.options.animation_speed
    }

    pub fn options(&self) -> &SankeyOptions {
        &self.options
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Whether the playback interval is registered with the clock.
    pub fn has_active_timer(&self) -> bool {
        self.timer.is_some_and(|t| self.clock.is_active(t))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // Events.

    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&SankeyEvent) -> anyhow::Result<()> + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(handler)
    }

    pub fn subscribe_to(
        &mut self,
        kind: crate::events::bus::EventKind,
        handler: impl FnMut(&SankeyEvent) -> anyhow::Result<()> + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe_to(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Deliver events queued since the last command.
    pub fn flush_events(&mut self) -> usize {
        self.bus.flush()
    }

    pub fn handler_errors(&self) -> usize {
        self.bus.handler_errors()
    }

    // Commands.

    pub fn play(&mut self) {
        if self.destroyed || self.is_playing() {
            return;
        }
        if self.index + 1 == self.graphs.len() && !self.options.loop_animation {
            self.go_to(0);
        }
        self.start_timer();
        self.bus.flush();
    }

    pub fn pause(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop(StopReason::Paused);
        self.bus.flush();
    }

    /// Navigate to `year`. Years not in the dataset are ignored and leave the display unchanged.
    pub fn set_year(&mut self, year: i32) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(index) = self.store.year_index(year) else {
            tracing::warn!(
                year,
                current = self.current_year(),
                "ignoring navigation to a year outside the dataset"
            );
            return false;
        };
        self.go_to(index);
        self.bus.flush();
        true
    }

    pub fn next_year(&mut self) -> bool {
        match self.graphs.get(self.index + 1).map(|g| g.year) {
            Some(year) => self.set_year(year),
            None => false,
        }
    }

    pub fn previous_year(&mut self) -> bool {
        match self.index.checked_sub(1).map(|i| self.graphs[i].year) {
            Some(year) => self.set_year(year),
            None => false,
        }
    }

    /// Change the per-year interval; a running timer is rescheduled at the new rate.
    pub fn set_speed(&mut self, ms: u64) -> SankeyResult<()> {
        if self.destroyed {
            return Ok(());
        }
        if ms == 0 {
            let err = SankeyError::validation("animation speed must be > 0 ms");
            self.bus.emit(SankeyEvent::SystemError {
                message: err.to_string(),
            });
            self.bus.flush();
            return Err(err);
        }
        self.options.animation_speed = ms;
        if let Some(timer) = self.timer.take() {
            self.clock.clear(timer);
            self.timer = Some(self.clock.set_interval(ms as f64));
        }
        tracing::debug!(ms, "speed changed");
        self.bus.flush();
        Ok(())
    }

    /// Flip waste-heat visibility and return the new state.
    pub fn toggle_waste_heat(&mut self) -> bool {
        if self.destroyed {
            return self.show_waste;
        }
        self.show_waste = !self.show_waste;
        self.projection.set_waste_visible(
            &mut self.surface,
            &self.graphs[self.index],
            self.show_waste,
        );
        self.bus.flush();
        self.show_waste
    }

    /// Highlight every flow of the hovered flow's fuel and show its tooltip.
    pub fn hover_flow(&mut self, flow: FlowId) -> bool {
        if self.destroyed {
            return false;
        }
        let graph = &self.graphs[self.index];
        let Some(tooltip) = Projection::tooltip(graph, flow) else {
            return false;
        };
        self.projection
            .highlight(&mut self.surface, graph, Some(flow.fuel));
        self.surface.set_tooltip(Some(tooltip));
        self.hovered = Some(flow);
        true
    }

    pub fn clear_hover(&mut self) {
        if self.destroyed || self.hovered.take().is_none() {
            return;
        }
        self.projection
            .highlight(&mut self.surface, &self.graphs[self.index], None);
        self.surface.set_tooltip(None);
    }

    /// Run the clock forward by `dt_ms`: fire due playback ticks and step running transitions.
    pub fn advance(&mut self, dt_ms: f64) {
        if self.destroyed {
            return;
        }
        let until = self.clock.now_ms() + dt_ms.max(0.0);
        while let Some(tick) = self.clock.next_due(until) {
            self.engine.step(tick.at_ms, &mut self.surface);
            if Some(tick.timer) == self.timer {
                self.on_tick();
            }
            self.bus.flush();
        }
        self.clock.advance_to(until);
        self.engine.step(until, &mut self.surface);
        self.bus.flush();
    }

    /// Jump running transitions to their end values.
    pub fn finish_transitions(&mut self) {
        if !self.destroyed {
            self.engine.finish(&mut self.surface);
        }
    }

    /// Stop playback, drop subscribers and clear the scene. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop(StopReason::Destroyed);
        self.bus.flush();
        self.bus.clear();
        self.engine.clear();
        self.surface.clear();
        self.hovered = None;
        self.destroyed = true;
        tracing::debug!("energy sankey destroyed");
    }

    // Internals.

    fn start_timer(&mut self) {
        let period = self.options.animation_speed as f64;
        self.timer = Some(self.clock.set_interval(period));
        self.state = PlaybackState::Playing;
        self.bus.emit(SankeyEvent::AnimationStarted {
            year: self.current_year(),
        });
        tracing::debug!(year = self.current_year(), period, "playback started");
    }

    fn stop(&mut self, reason: StopReason) {
        if let Some(timer) = self.timer.take() {
            self.clock.clear(timer);
        }
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
            self.bus.emit(SankeyEvent::AnimationStopped {
                year: self.current_year(),
                reason,
            });
            tracing::debug!(year = self.current_year(), ?reason, "playback stopped");
        }
    }

    fn on_tick(&mut self) {
        let last = self.graphs.len() - 1;
        if self.index < last {
            self.go_to(self.index + 1);
        } else if self.options.loop_animation {
            self.go_to(0);
        } else {
            self.stop(StopReason::ReachedEnd);
        }
    }

    /// Start the transition to `index`. Paths and captions swap at once; numbers tween.
    fn go_to(&mut self, index: usize) {
        let from = self.current_year();
        let graph = &self.graphs[index];
        self.bus.emit(SankeyEvent::YearChanging {
            from,
            to: graph.year,
        });

        let milestone = self
            .store
            .record_by_index(index)
            .and_then(|r| r.milestone.as_deref());
        self.projection
            .swap_paths(&mut self.surface, graph, milestone);
        let duration = transition_ms(self.options.animation_speed);
        self.engine.retarget(
            self.clock.now_ms(),
            duration,
            self.projection.targets(graph),
        );
        if let Some(flow) = self.hovered {
            self.surface
                .set_tooltip(Projection::tooltip(graph, flow));
        }

        self.index = index;
        self.bus.emit(SankeyEvent::YearChanged {
            year: graph.year,
            index,
        });
        tracing::trace!(from, to = graph.year, duration, "year transition");
    }
}

impl<S: RenderSurface> std::fmt::Debug for EnergySankey<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnergySankey")
            .field("year", &self.current_year())
            .field("state", &self.state)
            .field("show_waste", &self.show_waste)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
