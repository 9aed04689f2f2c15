//! The session facade driven by the host loop and the input layer.
//!
//! [`Simulation`] ties the pieces together: it builds the
//! [`ActionProcessor`] from configuration, schedules decay through
//! [`Simulation::tick`], routes clicks through [`Simulation::interact`], and
//! serves read-only snapshots to the renderer. Everything is synchronous and
//! runs strictly in call order.

use crate::component::{Component, ComponentKind};
use crate::config::{ConfigError, HealthColors, SimulationConfig};
use crate::event::EventLog;
use crate::feedback::Feedback;
use crate::fixed::{Fixed64, Millis};
use crate::health::HealthBand;
use crate::id::ComponentId;
use crate::processor::ActionProcessor;
use crate::query::{ComponentSnapshot, GameState, HitTest};
use crate::registry::RegistryError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Startup failures. There is no valid partial state, so initialization
/// either succeeds completely or returns one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A health band change the presentation layer should announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthAlert {
    pub band: HealthBand,
    pub message: String,
}

/// Result of a [`Simulation::tick`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub decay_steps: u64,
    pub health: Fixed64,
    pub band: HealthBand,
    /// Set when health moved into a different non-healthy band since the
    /// previous tick.
    pub alert: Option<HealthAlert>,
}

/// Result of a routed click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub feedback: Feedback,
    /// True only for the action that completed the network.
    pub won: bool,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Simulation {
    processor: ActionProcessor,
    colors: HealthColors,
    /// Band last reported through a tick, for transition alerts.
    observed_band: HealthBand,
}

impl Simulation {
    /// Validate `config`, build the registry, and start a session. Analytics
    /// records go to `log`.
    pub fn new(config: &SimulationConfig, log: EventLog) -> Result<Self, InitError> {
        config.validate()?;
        let processor = ActionProcessor::from_config(config, log)?;

        let registry = processor.registry();
        let pipes = registry.pipes().count();
        log::info!(
            "simulation initialized with {} components ({} pipes, {} nodes, {} damaged)",
            registry.len(),
            pipes,
            registry.len() - pipes,
            registry.damaged_pipe_count(),
        );

        let observed_band = processor.health().band();
        Ok(Self {
            processor,
            colors: config.health_colors,
            observed_band,
        })
    }

    pub fn processor(&self) -> &ActionProcessor {
        &self.processor
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    pub fn repair_pipe(&mut self, id: ComponentId) -> Feedback {
        self.processor.repair_pipe(id)
    }

    pub fn adjust_water_flow(&mut self, id: ComponentId) -> Feedback {
        self.processor.adjust_water_flow(id)
    }

    pub fn check_win_condition(&mut self) -> bool {
        self.processor.check_win_condition()
    }

    /// Once every pipe is repaired the session stops taking input.
    pub fn input_locked(&self) -> bool {
        self.processor.all_pipes_repaired()
    }

    /// Route a click on component `id` to the action for its kind, then
    /// check the win condition. Returns `None` once input is locked.
    pub fn interact(&mut self, id: ComponentId) -> Option<Interaction> {
        if self.input_locked() {
            return None;
        }

        let feedback = match self.processor.registry().get(id).map(Component::kind) {
            Some(ComponentKind::Pipe) => self.processor.repair_pipe(id),
            Some(ComponentKind::Node) => self.processor.adjust_water_flow(id),
            None => Feedback::incorrect(self.processor.messages().unknown_component.clone()),
        };

        // A repair flips the flag itself; any other click may find a clean
        // topology that has not been checked yet.
        let flipped_by_action = self.processor.all_pipes_repaired();
        let won = self.processor.check_win_condition() || flipped_by_action;
        Some(Interaction { feedback, won })
    }

    /// A click that hit no component. Returns the usage hint while input is
    /// open.
    pub fn background_click(&self) -> Option<Feedback> {
        if self.input_locked() {
            return None;
        }
        Some(Feedback::incorrect(
            self.processor.messages().background_hint.clone(),
        ))
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Advance simulated time by `dt` milliseconds.
    pub fn tick(&mut self, dt: Millis) -> TickReport {
        let decay_steps = self.processor.tick(dt);
        let health = self.processor.health().health();
        let band = self.processor.health().band();

        let alert = if band != self.observed_band {
            self.observed_band = band;
            let messages = self.processor.messages();
            match band {
                HealthBand::Healthy => None,
                HealthBand::Warning => Some(HealthAlert {
                    band,
                    message: messages.health_warning.clone(),
                }),
                HealthBand::Critical => Some(HealthAlert {
                    band,
                    message: messages.health_critical.clone(),
                }),
            }
        } else {
            None
        };

        TickReport {
            decay_steps,
            health,
            band,
            alert,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn system_health(&self) -> Fixed64 {
        self.processor.health().health()
    }

    pub fn health_band(&self) -> HealthBand {
        self.processor.health().band()
    }

    /// Bar color for the current health band.
    pub fn health_color(&self) -> u32 {
        self.colors.for_band(self.health_band())
    }

    pub fn win_message(&self) -> &str {
        &self.processor.messages().win
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.processor.registry().get(id)
    }

    pub fn game_state(&self) -> GameState {
        let registry = self.processor.registry();
        GameState {
            system_health: self.system_health(),
            band: self.health_band(),
            components: registry
                .iter_placed()
                .map(|(component, placement)| ComponentSnapshot {
                    component: *component,
                    placement,
                })
                .collect(),
            all_pipes_repaired: self.processor.all_pipes_repaired(),
        }
    }

    /// First component, in declaration order, whose visual contains
    /// `(x, y)` according to the renderer's `hit_test`.
    pub fn component_at(&self, x: f64, y: f64, hit_test: &impl HitTest) -> Option<&Component> {
        self.processor
            .registry()
            .all()
            .iter()
            .find(|c| hit_test.contains(c.id(), x, y))
    }
}
