//! Pipeworks Core -- the state engine behind the pipe-network repair trainer.
//!
//! A learner repairs damaged pipes and toggles valves while an aggregate
//! system health score decays for as long as damage is left unaddressed.
//! This crate holds every rule of that simulation; rendering, audio, and
//! pointer routing are external collaborators that read snapshots and call
//! actions, never mutating state directly.
//!
//! # Control Flow
//!
//! 1. **Initialize** -- [`engine::Simulation::new`] validates the
//!    [`config::SimulationConfig`] and builds the component registry.
//! 2. **Tick** -- the host loop calls [`engine::Simulation::tick`] with the
//!    frame delta; decay runs in fixed-interval steps.
//! 3. **Act** -- the input layer calls `repair_pipe`, `adjust_water_flow`,
//!    or `interact`; each returns [`feedback::Feedback`].
//! 4. **Observe** -- the renderer polls [`engine::Simulation::game_state`].
//!
//! ```rust,ignore
//! let mut sim = Simulation::new(&config, EventLog::to_log())?;
//! sim.tick(16);
//! let feedback = sim.repair_pipe(ComponentId(1));
//! let state = sim.game_state();
//! ```
//!
//! # Key Types
//!
//! - [`registry::ComponentRegistry`] -- Fixed set of pipes and nodes, built
//!   once from the topology.
//! - [`health::HealthTracker`] -- System health and the decay clock.
//! - [`processor::ActionProcessor`] -- Validates and applies learner actions
//!   and evaluates the win condition.
//! - [`event::EventLog`] -- Pass-through to an injected analytics sink.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic health.

pub mod component;
pub mod config;
pub mod engine;
pub mod event;
pub mod feedback;
pub mod fixed;
pub mod health;
pub mod id;
pub mod processor;
pub mod query;
pub mod registry;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
