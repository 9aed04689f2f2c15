//! Tunables and message text consumed once at initialization.
//!
//! All numeric parameters are converted to [`Fixed64`] here so the running
//! simulation never touches floating point. File formats live in the
//! `pipeworks-data` crate; this module only holds the resolved values.

use crate::component::ComponentSpec;
use crate::fixed::{Fixed64, HEALTH_MAX, HEALTH_MIN, Millis};
use crate::health::HealthBand;

/// Default period of one decay step.
pub const DEFAULT_DECAY_INTERVAL: Millis = 3000;

/// Health band boundaries. Each bound is inclusive: health equal to
/// `critical` is critical, health equal to `warning` is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthThresholds {
    pub warning: Fixed64,
    pub critical: Fixed64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            warning: Fixed64::from_num(50),
            critical: Fixed64::from_num(25),
        }
    }
}

/// Health bar colors as 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthColors {
    pub healthy: u32,
    pub warning: u32,
    pub critical: u32,
}

impl HealthColors {
    pub fn for_band(&self, band: HealthBand) -> u32 {
        match band {
            HealthBand::Healthy => self.healthy,
            HealthBand::Warning => self.warning,
            HealthBand::Critical => self.critical,
        }
    }
}

impl Default for HealthColors {
    fn default() -> Self {
        Self {
            healthy: 0x4ade80,
            warning: 0xfbbf24,
            critical: 0xef4444,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairMessages {
    pub success: String,
    pub already_healthy: String,
    pub not_a_pipe: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowMessages {
    pub activated: String,
    pub deactivated: String,
    pub warning: String,
    pub not_a_valve: String,
}

/// Learner-facing text. Every feedback message comes from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub repair: RepairMessages,
    pub flow: FlowMessages,
    pub win: String,
    pub health_warning: String,
    pub health_critical: String,
    pub unknown_component: String,
    pub background_hint: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            repair: RepairMessages {
                success: "Great job! The pipe is fixed and water flows again.".into(),
                already_healthy: "This pipe is already in good shape.".into(),
                not_a_pipe: "That's not a pipe!".into(),
            },
            flow: FlowMessages {
                activated: "Valve opened. Water is flowing through this node.".into(),
                deactivated: "Valve closed. Flow through this node has stopped.".into(),
                warning: "Careful! Closing valves can back up the system.".into(),
                not_a_valve: "That's not a valve!".into(),
            },
            win: "Congratulations! Every pipe in the network is repaired.".into(),
            health_warning: "System health is dropping. Repair damaged pipes!".into(),
            health_critical: "Critical! The network is close to failure!".into(),
            unknown_component: "Unknown component type!".into(),
            background_hint: "Click on a pipe to repair it or a valve to adjust flow!".into(),
        }
    }
}

/// Everything needed to start a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub initial_health: Fixed64,
    pub repair_health_bonus: Fixed64,
    /// Health lost per damaged pipe per decay step.
    pub health_deterioration_rate: Fixed64,
    /// Carried from data files; no rule consumes it yet.
    pub mismanagement_penalty: Fixed64,
    pub decay_interval: Millis,
    pub health_thresholds: HealthThresholds,
    pub health_colors: HealthColors,
    pub messages: Messages,
    pub components: Vec<ComponentSpec>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_health: Fixed64::from_num(80),
            repair_health_bonus: Fixed64::from_num(10),
            health_deterioration_rate: Fixed64::from_num(2),
            mismanagement_penalty: Fixed64::from_num(5),
            decay_interval: DEFAULT_DECAY_INTERVAL,
            health_thresholds: HealthThresholds::default(),
            health_colors: HealthColors::default(),
            messages: Messages::default(),
            components: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Replace the topology, keeping every tunable.
    pub fn with_components(mut self, components: Vec<ComponentSpec>) -> Self {
        self.components = components;
        self
    }

    /// Check the tunables. Topology integrity is checked by the registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let on_scale = |name: &'static str, v: Fixed64| {
            if v < HEALTH_MIN || v > HEALTH_MAX {
                Err(ConfigError::OutOfRange { name, value: v })
            } else {
                Ok(())
            }
        };
        on_scale("initial_health", self.initial_health)?;
        on_scale("health_thresholds.warning", self.health_thresholds.warning)?;
        on_scale("health_thresholds.critical", self.health_thresholds.critical)?;

        if self.health_thresholds.warning < self.health_thresholds.critical {
            return Err(ConfigError::ThresholdOrder {
                warning: self.health_thresholds.warning,
                critical: self.health_thresholds.critical,
            });
        }
        if self.repair_health_bonus < Fixed64::ZERO {
            return Err(ConfigError::Negative {
                name: "repair_health_bonus",
                value: self.repair_health_bonus,
            });
        }
        if self.health_deterioration_rate < Fixed64::ZERO {
            return Err(ConfigError::Negative {
                name: "health_deterioration_rate",
                value: self.health_deterioration_rate,
            });
        }
        if self.decay_interval == 0 {
            return Err(ConfigError::ZeroDecayInterval);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} = {value} is outside the health scale [0, 100]")]
    OutOfRange { name: &'static str, value: Fixed64 },
    #[error("warning threshold {warning} is below critical threshold {critical}")]
    ThresholdOrder { warning: Fixed64, critical: Fixed64 },
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: Fixed64 },
    #[error("decay interval must be greater than zero")]
    ZeroDecayInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
        assert_eq!(SimulationConfig::default().decay_interval, 3000);
    }

    #[test]
    fn initial_health_above_scale_rejected() {
        let cfg = SimulationConfig {
            initial_health: Fixed64::from_num(101),
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OutOfRange { name: "initial_health", .. })
        ));
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let cfg = SimulationConfig {
            health_thresholds: HealthThresholds {
                warning: Fixed64::from_num(20),
                critical: Fixed64::from_num(30),
            },
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ThresholdOrder { .. })));
    }

    #[test]
    fn negative_rates_rejected() {
        let cfg = SimulationConfig {
            health_deterioration_rate: Fixed64::from_num(-1),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Negative { .. })));

        let cfg = SimulationConfig {
            repair_health_bonus: Fixed64::from_num(-5),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn zero_interval_rejected() {
        let cfg = SimulationConfig {
            decay_interval: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroDecayInterval));
    }

    #[test]
    fn colors_by_band() {
        let colors = HealthColors::default();
        assert_eq!(colors.for_band(HealthBand::Healthy), 0x4ade80);
        assert_eq!(colors.for_band(HealthBand::Critical), 0xef4444);
    }
}
