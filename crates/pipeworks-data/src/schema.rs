//! Serde data file structs for the game configuration.
//!
//! These structs define the on-disk format. Keys are camelCase in every
//! format. They are deserialized from JSON, RON, or TOML and then resolved
//! into engine types by the loader.

use serde::Deserialize;

// ===========================================================================
// Top level
// ===========================================================================

/// A complete `game.config` file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfigData {
    #[serde(default)]
    pub game: WindowData,
    pub simulation: SimulationData,
    pub network: NetworkData,
    #[serde(default)]
    pub ui: UiData,
    pub messages: MessagesData,
}

// ===========================================================================
// Presentation (passed through, never interpreted by the engine)
// ===========================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowData {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
}

impl Default for WindowData {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            background_color: "#1a1a2e".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiData {
    #[serde(default)]
    pub popup: PopupData,
    #[serde(default)]
    pub health_bar: HealthBarData,
}

/// Popup timings in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupData {
    pub duration: u64,
    pub fade_time: u64,
}

impl Default for PopupData {
    fn default() -> Self {
        Self {
            duration: 2000,
            fade_time: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthBarData {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for HealthBarData {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 24.0,
            x: 20.0,
            y: 40.0,
        }
    }
}

// ===========================================================================
// Simulation tunables
// ===========================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationData {
    pub initial_health: f64,
    pub repair_health_bonus: f64,
    #[serde(default)]
    pub mismanagement_penalty: f64,
    pub health_deterioration_rate: f64,
    #[serde(default)]
    pub decay_interval_ms: Option<u64>,
    pub health_colors: HealthColorsData,
    pub health_thresholds: HealthThresholdsData,
}

/// Colors as 0xRRGGBB integers.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HealthColorsData {
    pub healthy: u32,
    pub warning: u32,
    pub critical: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HealthThresholdsData {
    pub warning: f64,
    pub critical: f64,
}

// ===========================================================================
// Topology
// ===========================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkData {
    pub components: Vec<ComponentData>,
}

/// The variant tag of a component entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentTypeData {
    Pipe,
    Node,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentData {
    pub id: u32,
    #[serde(rename = "type")]
    pub component_type: ComponentTypeData,
    pub x: f64,
    pub y: f64,
    /// `"healthy"` or `"damaged"`; pipes default to healthy.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub flow_active: Option<bool>,
}

// ===========================================================================
// Messages
// ===========================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesData {
    pub repair: RepairMessagesData,
    pub flow: FlowMessagesData,
    pub win: String,
    pub health_warning: String,
    pub health_critical: String,
    #[serde(default)]
    pub unknown_component: Option<String>,
    #[serde(default)]
    pub background_hint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairMessagesData {
    pub success: String,
    pub already_healthy: String,
    #[serde(default)]
    pub not_a_pipe: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowMessagesData {
    pub activated: String,
    pub deactivated: String,
    pub warning: String,
    #[serde(default)]
    pub not_a_valve: Option<String>,
}
