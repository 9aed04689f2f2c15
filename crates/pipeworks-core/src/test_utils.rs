//! Shared test helpers for unit tests, integration tests, and examples.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::component::{ComponentSpec, PipeStatus};
use crate::config::SimulationConfig;
use crate::event::{AnalyticsEvent, EventKind, EventLog};
use crate::fixed::Fixed64;

// ===========================================================================
// Fixed-point helper
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

// ===========================================================================
// Capturing sink
// ===========================================================================

/// Events recorded by a capturing sink, in delivery order.
pub type CapturedEvents = Rc<RefCell<Vec<AnalyticsEvent>>>;

/// An event log whose sink appends into the returned shared vector.
pub fn capture_log() -> (EventLog, CapturedEvents) {
    let events: CapturedEvents = Rc::new(RefCell::new(Vec::new()));
    let sink_events = events.clone();
    let log = EventLog::new(Box::new(move |e: &AnalyticsEvent| {
        sink_events.borrow_mut().push(e.clone());
    }));
    (log, events)
}

pub fn kinds(events: &CapturedEvents) -> Vec<EventKind> {
    events.borrow().iter().map(|e| e.kind).collect()
}

pub fn count(events: &CapturedEvents, kind: EventKind) -> usize {
    events.borrow().iter().filter(|e| e.kind == kind).count()
}

// ===========================================================================
// Topologies
// ===========================================================================

/// One damaged pipe (id 1) and one closed node (id 2).
pub fn pipe_and_node() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::pipe(1, PipeStatus::Damaged, 200.0, 300.0),
        ComponentSpec::node(2, false, 400.0, 300.0),
    ]
}

/// Damaged pipes 1 and 2, closed node 3, healthy pipe 4.
pub fn two_damaged_pipes_and_node() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::pipe(1, PipeStatus::Damaged, 100.0, 200.0),
        ComponentSpec::pipe(2, PipeStatus::Damaged, 300.0, 200.0),
        ComponentSpec::node(3, false, 200.0, 200.0),
        ComponentSpec::pipe(4, PipeStatus::Healthy, 400.0, 200.0),
    ]
}

/// Stock tunables: health 80, repair bonus 10, decay rate 2, 3000 ms
/// interval, thresholds 50 / 25.
pub fn stock_config(components: Vec<ComponentSpec>) -> SimulationConfig {
    SimulationConfig::default().with_components(components)
}
