//! Analytics events and the pass-through event log.
//!
//! Records are fully formed by the caller; [`EventLog`] forwards each one to
//! its injected sink in call order. No filtering, buffering, or persistence
//! happens here.

use serde::{Deserialize, Serialize};

use crate::fixed::Millis;
use crate::id::ComponentId;

/// Discriminant for analytics records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PipeRepaired,
    FlowAdjusted,
    HealthWarning,
    GameWon,
    MismanagementError,
}

impl EventKind {
    /// Wire name used by analytics consumers.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::PipeRepaired => "pipe_repaired",
            EventKind::FlowAdjusted => "flow_adjusted",
            EventKind::HealthWarning => "health_warning",
            EventKind::GameWon => "game_won",
            EventKind::MismanagementError => "mismanagement_error",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notable transition in the session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Simulated session time at which the event occurred.
    pub timestamp: Millis,
    #[serde(rename = "event_type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentId>,
    pub details: String,
}

impl std::fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}ms] {}: {}", self.timestamp, self.kind, self.details)?;
        if let Some(id) = self.component {
            write!(f, " (component {id})")?;
        }
        Ok(())
    }
}

/// The single `record` capability an event log forwards to.
pub type EventSink = Box<dyn FnMut(&AnalyticsEvent)>;

/// Log target for the default sink.
pub const ANALYTICS_TARGET: &str = "pipeworks::analytics";

/// Stateless conduit from the simulation to an external analytics sink.
pub struct EventLog {
    sink: EventSink,
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog").field("sink", &"<fn>").finish()
    }
}

impl EventLog {
    pub fn new(sink: EventSink) -> Self {
        Self { sink }
    }

    /// A log that forwards every record to the `log` facade at info level.
    pub fn to_log() -> Self {
        Self::new(Box::new(|event| {
            log::info!(target: ANALYTICS_TARGET, "{event}");
        }))
    }

    /// A log that drops everything.
    pub fn discard() -> Self {
        Self::new(Box::new(|_| {}))
    }

    pub fn record(&mut self, event: AnalyticsEvent) {
        (self.sink)(&event);
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::to_log()
    }
}
