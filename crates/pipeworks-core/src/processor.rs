//! Learner actions: the only path through which input changes state.
//!
//! [`ActionProcessor`] owns the registry, the health tracker, and the event
//! log, all handed to it at construction. Every action is total: invalid
//! targets come back as negative [`Feedback`], never as an error.
//!
//! # Pipe state machine
//!
//! `Damaged -> Healthy` via [`ActionProcessor::repair_pipe`] is the only
//! transition. Nothing in the core ever re-damages a pipe; decay lowers the
//! aggregate health score only.
//!
//! # Win condition
//!
//! `all_pipes_repaired` flips `false -> true` once, the moment the last
//! damaged pipe is repaired, and emits one `game_won` event. It never
//! reverts.

use crate::component::PipeStatus;
use crate::config::{Messages, SimulationConfig};
use crate::event::{AnalyticsEvent, EventKind, EventLog};
use crate::feedback::Feedback;
use crate::fixed::Millis;
use crate::health::{HealthBand, HealthTracker};
use crate::id::ComponentId;
use crate::registry::{ComponentRegistry, RegistryError};

#[derive(Debug)]
pub struct ActionProcessor {
    registry: ComponentRegistry,
    health: HealthTracker,
    log: EventLog,
    messages: Messages,
    all_pipes_repaired: bool,
}

impl ActionProcessor {
    pub fn new(
        registry: ComponentRegistry,
        health: HealthTracker,
        log: EventLog,
        messages: Messages,
    ) -> Self {
        Self {
            registry,
            health,
            log,
            messages,
            all_pipes_repaired: false,
        }
    }

    /// Build the registry and tracker from `config`. Fails on duplicate ids.
    pub fn from_config(config: &SimulationConfig, log: EventLog) -> Result<Self, RegistryError> {
        let registry = ComponentRegistry::from_specs(&config.components)?;
        let health = HealthTracker::from_config(config);
        Ok(Self::new(registry, health, log, config.messages.clone()))
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn health(&self) -> &HealthTracker {
        &self.health
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn all_pipes_repaired(&self) -> bool {
        self.all_pipes_repaired
    }

    fn now(&self) -> Millis {
        self.health.elapsed()
    }

    fn emit(&mut self, kind: EventKind, component: Option<ComponentId>, details: String) {
        let event = AnalyticsEvent {
            timestamp: self.now(),
            kind,
            component,
            details,
        };
        self.log.record(event);
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    pub fn repair_pipe(&mut self, id: ComponentId) -> Feedback {
        let Some(pipe) = self.registry.get_mut(id).and_then(|c| c.as_pipe_mut()) else {
            return Feedback::incorrect(self.messages.repair.not_a_pipe.clone());
        };

        if pipe.status == PipeStatus::Healthy {
            return Feedback::incorrect(self.messages.repair.already_healthy.clone());
        }

        pipe.status = PipeStatus::Healthy;
        let bonus = self.health.repair_bonus();
        self.health.apply_repair_bonus(bonus);

        let health = self.health.health();
        self.emit(
            EventKind::PipeRepaired,
            Some(id),
            format!("Pipe {id} repaired. Health: {health}"),
        );

        self.check_win_condition();

        Feedback::correct(self.messages.repair.success.clone())
    }

    pub fn adjust_water_flow(&mut self, id: ComponentId) -> Feedback {
        let Some(node) = self.registry.get_mut(id).and_then(|c| c.as_node_mut()) else {
            return Feedback::incorrect(self.messages.flow.not_a_valve.clone());
        };

        node.flow_active = !node.flow_active;
        let active = node.flow_active;

        let verb = if active { "activated" } else { "deactivated" };
        self.emit(
            EventKind::FlowAdjusted,
            Some(id),
            format!("Node {id} flow {verb}"),
        );

        if active {
            Feedback::correct(self.messages.flow.activated.clone())
        } else {
            Feedback::correct(self.messages.flow.deactivated.clone())
        }
    }

    /// One-shot win transition. Returns true only on the call that flips
    /// `all_pipes_repaired`; every later call returns false and emits
    /// nothing.
    pub fn check_win_condition(&mut self) -> bool {
        if self.all_pipes_repaired {
            return false;
        }
        let all_healthy = self
            .registry
            .pipes()
            .all(|c| c.status() == PipeStatus::Healthy);
        if !all_healthy {
            return false;
        }

        self.all_pipes_repaired = true;
        let health = self.health.health();
        log::info!("all pipes repaired, final health {health}");
        self.emit(
            EventKind::GameWon,
            None,
            format!("All pipes repaired! Final health: {health}"),
        );
        true
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Advance simulated time by `dt`, running every decay step that comes
    /// due. Returns the number of steps run.
    ///
    /// Repairs cannot land mid-tick, so the damaged pipe count is fixed for
    /// the whole span. With nothing damaged every step is a no-op and the
    /// loop is skipped. Otherwise each step may emit a `health_warning`, so
    /// cost is linear in `dt / decay_interval`; callers pass frame deltas.
    pub fn tick(&mut self, dt: Millis) -> u64 {
        let steps = self.health.advance(dt);
        let damaged = self.registry.damaged_pipe_count();
        if damaged == 0 {
            return steps;
        }
        for _ in 0..steps {
            let damage = self.health.apply_decay(damaged);
            log::debug!(
                "decay step: {damaged} damaged pipes, -{damage}, health {}",
                self.health.health()
            );
            self.on_periodic_decay(damaged);
        }
        steps
    }

    /// Hook run after each decay step. Emits `health_warning` when damaged
    /// pipes remain and health sits in the critical band, even if the step
    /// dealt no damage.
    pub fn on_periodic_decay(&mut self, damaged_pipes: usize) {
        if damaged_pipes == 0 {
            return;
        }
        if self.health.band() == HealthBand::Critical {
            let health = self.health.health();
            log::warn!("system health critical: {health}");
            self.emit(
                EventKind::HealthWarning,
                None,
                format!("Critical health: {health}"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentSpec};
    use crate::feedback::SoundCue;
    use crate::test_utils::*;

    fn processor(specs: Vec<ComponentSpec>) -> (ActionProcessor, CapturedEvents) {
        let (log, events) = capture_log();
        let cfg = stock_config(specs);
        (ActionProcessor::from_config(&cfg, log).unwrap(), events)
    }

    fn pipe_status(p: &ActionProcessor, id: u32) -> Option<PipeStatus> {
        p.registry()
            .get(ComponentId(id))
            .and_then(Component::as_pipe)
            .map(|pipe| pipe.status)
    }

    #[test]
    fn repair_damaged_pipe() {
        let (mut p, events) = processor(two_damaged_pipes_and_node());
        let fb = p.repair_pipe(ComponentId(1));
        assert_eq!(fb.sound, SoundCue::Correct);
        assert_eq!(fb.message, p.messages().repair.success);
        assert_eq!(pipe_status(&p, 1), Some(PipeStatus::Healthy));
        assert_eq!(p.health().health(), fixed(90.0));
        assert!(!p.all_pipes_repaired());
        assert_eq!(kinds(&events), vec![EventKind::PipeRepaired]);
        assert_eq!(events.borrow()[0].component, Some(ComponentId(1)));
    }

    #[test]
    fn repair_healthy_pipe_is_rejected_without_side_effects() {
        let (mut p, events) = processor(two_damaged_pipes_and_node());
        p.repair_pipe(ComponentId(1));
        events.borrow_mut().clear();

        let fb = p.repair_pipe(ComponentId(1));
        assert_eq!(fb.sound, SoundCue::Incorrect);
        assert_eq!(fb.message, p.messages().repair.already_healthy);
        assert_eq!(p.health().health(), fixed(90.0));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn repair_on_node_or_unknown_is_not_a_pipe() {
        let (mut p, events) = processor(two_damaged_pipes_and_node());
        let fb = p.repair_pipe(ComponentId(3));
        assert_eq!(fb, Feedback::incorrect("That's not a pipe!"));
        let fb = p.repair_pipe(ComponentId(404));
        assert_eq!(fb.sound, SoundCue::Incorrect);
        assert_eq!(p.health().health(), fixed(80.0));
        assert_eq!(
            p.registry().get(ComponentId(3)).and_then(|c| c.as_node()).map(|n| n.flow_active),
            Some(false)
        );
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn repair_bonus_caps_at_hundred() {
        let (log, _events) = capture_log();
        let mut cfg = stock_config(two_damaged_pipes_and_node());
        cfg.initial_health = fixed(95.0);
        let mut p = ActionProcessor::from_config(&cfg, log).unwrap();
        p.repair_pipe(ComponentId(1));
        assert_eq!(p.health().health(), fixed(100.0));
    }

    #[test]
    fn toggle_flow_alternates_feedback() {
        let (mut p, events) = processor(two_damaged_pipes_and_node());
        let on = p.adjust_water_flow(ComponentId(3));
        let off = p.adjust_water_flow(ComponentId(3));
        assert_eq!(on.message, p.messages().flow.activated);
        assert_eq!(off.message, p.messages().flow.deactivated);
        assert!(on.is_correct() && off.is_correct());
        assert_eq!(p.health().health(), fixed(80.0));
        assert_eq!(
            kinds(&events),
            vec![EventKind::FlowAdjusted, EventKind::FlowAdjusted]
        );
        assert_eq!(events.borrow()[0].details, "Node 3 flow activated");
        assert_eq!(events.borrow()[1].details, "Node 3 flow deactivated");
    }

    #[test]
    fn toggle_flow_on_pipe_is_not_a_valve() {
        let (mut p, events) = processor(two_damaged_pipes_and_node());
        let fb = p.adjust_water_flow(ComponentId(1));
        assert_eq!(fb, Feedback::incorrect("That's not a valve!"));
        assert_eq!(pipe_status(&p, 1), Some(PipeStatus::Damaged));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn win_fires_once_on_last_repair() {
        let (mut p, events) = processor(two_damaged_pipes_and_node());
        p.repair_pipe(ComponentId(1));
        assert!(!p.all_pipes_repaired());
        p.repair_pipe(ComponentId(2));
        assert!(p.all_pipes_repaired());
        assert_eq!(
            kinds(&events),
            vec![
                EventKind::PipeRepaired,
                EventKind::PipeRepaired,
                EventKind::GameWon
            ]
        );

        assert!(!p.check_win_condition());
        assert!(!p.check_win_condition());
        assert_eq!(count(&events, EventKind::GameWon), 1);
    }

    #[test]
    fn win_check_before_repairs_is_side_effect_free() {
        let (mut p, events) = processor(two_damaged_pipes_and_node());
        assert!(!p.check_win_condition());
        assert!(!p.all_pipes_repaired());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn topology_without_damage_wins_on_first_check() {
        let (mut p, events) = processor(vec![ComponentSpec::pipe(1, PipeStatus::Healthy, 0.0, 0.0)]);
        assert!(p.check_win_condition());
        assert!(!p.check_win_condition());
        assert_eq!(kinds(&events), vec![EventKind::GameWon]);
    }

    #[test]
    fn decay_emits_warning_only_when_critical() {
        let (log, events) = capture_log();
        let mut cfg = stock_config(two_damaged_pipes_and_node());
        cfg.initial_health = fixed(30.0);
        let mut p = ActionProcessor::from_config(&cfg, log).unwrap();

        // 30 -> 26: still warning band
        assert_eq!(p.tick(3000), 1);
        assert!(events.borrow().is_empty());

        // 26 -> 22: critical
        p.tick(3000);
        assert_eq!(kinds(&events), vec![EventKind::HealthWarning]);
        assert_eq!(events.borrow()[0].timestamp, 6000);
        assert_eq!(events.borrow()[0].component, None);
    }

    #[test]
    fn no_warning_without_damaged_pipes() {
        let (log, events) = capture_log();
        let mut cfg = stock_config(vec![ComponentSpec::node(1, false, 0.0, 0.0)]);
        cfg.initial_health = fixed(10.0);
        let mut p = ActionProcessor::from_config(&cfg, log).unwrap();
        p.tick(9000);
        assert_eq!(p.health().health(), fixed(10.0));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn warning_fires_at_zero_decay_rate_with_damage() {
        let (log, events) = capture_log();
        let mut cfg = stock_config(pipe_and_node());
        cfg.initial_health = fixed(20.0);
        cfg.health_deterioration_rate = fixed(0.0);
        let mut p = ActionProcessor::from_config(&cfg, log).unwrap();

        assert_eq!(p.tick(3000), 1);
        assert_eq!(p.health().health(), fixed(20.0));
        assert_eq!(kinds(&events), vec![EventKind::HealthWarning]);

        p.tick(6000);
        assert_eq!(count(&events, EventKind::HealthWarning), 3);
    }

    #[test]
    fn huge_delta_without_damage_returns_immediately() {
        let (log, events) = capture_log();
        let cfg = stock_config(vec![ComponentSpec::pipe(1, PipeStatus::Healthy, 0.0, 0.0)]);
        let mut p = ActionProcessor::from_config(&cfg, log).unwrap();

        assert_eq!(p.tick(u64::MAX), u64::MAX / 3000);
        assert_eq!(p.health().health(), fixed(80.0));
        assert_eq!(p.health().accumulator(), u64::MAX % 3000);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn decay_never_redamages_pipes() {
        let (mut p, _events) = processor(two_damaged_pipes_and_node());
        p.repair_pipe(ComponentId(1));
        p.tick(60_000);
        assert_eq!(pipe_status(&p, 1), Some(PipeStatus::Healthy));
        assert_eq!(p.registry().damaged_pipe_count(), 1);
    }

    #[test]
    fn events_are_timestamped_with_session_time() {
        let (mut p, events) = processor(two_damaged_pipes_and_node());
        p.tick(1234);
        p.adjust_water_flow(ComponentId(3));
        assert_eq!(events.borrow()[0].timestamp, 1234);
    }

    #[test]
    fn duplicate_topology_fails_construction() {
        let cfg = stock_config(vec![
            ComponentSpec::pipe(1, PipeStatus::Damaged, 0.0, 0.0),
            ComponentSpec::pipe(1, PipeStatus::Healthy, 0.0, 0.0),
        ]);
        let err = ActionProcessor::from_config(&cfg, EventLog::discard()).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(ComponentId(1)));
    }
}
