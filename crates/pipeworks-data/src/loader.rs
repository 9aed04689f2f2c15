//! Resolution pipeline: finds the config file, detects its format,
//! deserializes it, and resolves it into engine types.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use pipeworks_core::component::{ComponentKind, ComponentSpec, PipeStatus, Placement};
use pipeworks_core::config::{
    DEFAULT_DECAY_INTERVAL, FlowMessages, HealthColors, HealthThresholds, Messages,
    RepairMessages, SimulationConfig,
};
use pipeworks_core::engine::InitError;
use pipeworks_core::fixed::f64_to_fixed64;
use pipeworks_core::id::ComponentId;

use crate::schema::{
    ComponentData, ComponentTypeData, GameConfigData, MessagesData, UiData, WindowData,
};

/// Base name of the configuration file, without extension.
pub const CONFIG_BASE_NAME: &str = "game.config";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during config loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// No config file was found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two config files with different formats exist side by side.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A pipe declared a status other than `healthy` or `damaged`.
    #[error("unknown status '{status}' on component {id} in {file}")]
    UnknownStatus {
        file: PathBuf,
        id: u32,
        status: String,
    },

    /// The resolved config was rejected by the engine.
    #[error("invalid configuration in {file}: {source}")]
    Invalid {
        file: PathBuf,
        #[source]
        source: InitError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan `dir` for `game.config.{ron,toml,json}`.
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// more than one format is present.
pub fn find_config(dir: &Path) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{CONFIG_BASE_NAME}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_config`], but a missing file is an error.
pub fn require_config(dir: &Path) -> Result<PathBuf, DataLoadError> {
    find_config(dir)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: CONFIG_BASE_NAME,
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` in the given format. `file` is used for errors.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<T, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and deserialize it according to its extension.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

// ===========================================================================
// Resolution
// ===========================================================================

/// Presentation settings the engine passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationConfig {
    pub window: WindowData,
    pub ui: UiData,
}

/// A fully resolved configuration file.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub simulation: SimulationConfig,
    pub presentation: PresentationConfig,
}

fn resolve_component(data: &ComponentData, file: &Path) -> Result<ComponentSpec, DataLoadError> {
    let status = match data.status.as_deref() {
        None | Some("healthy") => PipeStatus::Healthy,
        Some("damaged") => PipeStatus::Damaged,
        Some(other) => {
            return Err(DataLoadError::UnknownStatus {
                file: file.to_path_buf(),
                id: data.id,
                status: other.to_string(),
            });
        }
    };
    let kind = match data.component_type {
        ComponentTypeData::Pipe => ComponentKind::Pipe,
        ComponentTypeData::Node => ComponentKind::Node,
    };
    Ok(ComponentSpec {
        id: ComponentId(data.id),
        kind,
        placement: Placement {
            x: data.x,
            y: data.y,
        },
        status,
        flow_active: data.flow_active.unwrap_or(false),
    })
}

fn resolve_messages(data: MessagesData) -> Messages {
    let defaults = Messages::default();
    Messages {
        repair: RepairMessages {
            success: data.repair.success,
            already_healthy: data.repair.already_healthy,
            not_a_pipe: data.repair.not_a_pipe.unwrap_or(defaults.repair.not_a_pipe),
        },
        flow: FlowMessages {
            activated: data.flow.activated,
            deactivated: data.flow.deactivated,
            warning: data.flow.warning,
            not_a_valve: data.flow.not_a_valve.unwrap_or(defaults.flow.not_a_valve),
        },
        win: data.win,
        health_warning: data.health_warning,
        health_critical: data.health_critical,
        unknown_component: data.unknown_component.unwrap_or(defaults.unknown_component),
        background_hint: data.background_hint.unwrap_or(defaults.background_hint),
    }
}

/// Resolve parsed file data into engine config. Tunables are validated and
/// component ids checked for collisions, so a config that resolves here
/// will start a session.
pub fn resolve(data: GameConfigData, file: &Path) -> Result<GameConfig, DataLoadError> {
    let components = data
        .network
        .components
        .iter()
        .map(|c| resolve_component(c, file))
        .collect::<Result<Vec<_>, _>>()?;

    let sim = &data.simulation;
    let simulation = SimulationConfig {
        initial_health: f64_to_fixed64(sim.initial_health),
        repair_health_bonus: f64_to_fixed64(sim.repair_health_bonus),
        health_deterioration_rate: f64_to_fixed64(sim.health_deterioration_rate),
        mismanagement_penalty: f64_to_fixed64(sim.mismanagement_penalty),
        decay_interval: sim.decay_interval_ms.unwrap_or(DEFAULT_DECAY_INTERVAL),
        health_thresholds: HealthThresholds {
            warning: f64_to_fixed64(sim.health_thresholds.warning),
            critical: f64_to_fixed64(sim.health_thresholds.critical),
        },
        health_colors: HealthColors {
            healthy: sim.health_colors.healthy,
            warning: sim.health_colors.warning,
            critical: sim.health_colors.critical,
        },
        messages: resolve_messages(data.messages),
        components,
    };

    let invalid = |source: InitError| DataLoadError::Invalid {
        file: file.to_path_buf(),
        source,
    };
    simulation.validate().map_err(|e| invalid(e.into()))?;
    pipeworks_core::registry::ComponentRegistry::from_specs(&simulation.components)
        .map_err(|e| invalid(e.into()))?;

    log::debug!(
        "resolved {} components from {}",
        simulation.components.len(),
        file.display()
    );

    Ok(GameConfig {
        simulation,
        presentation: PresentationConfig {
            window: data.game,
            ui: data.ui,
        },
    })
}

/// Load and resolve a config file. Format comes from the extension.
pub fn load_game_config(path: &Path) -> Result<GameConfig, DataLoadError> {
    let data: GameConfigData = deserialize_file(path)?;
    resolve(data, path)
}

/// Find `game.config.*` in `dir`, then load it.
pub fn load_game_config_dir(dir: &Path) -> Result<GameConfig, DataLoadError> {
    let path = require_config(dir)?;
    load_game_config(&path)
}

// ===========================================================================
// Tests
// ===========================================================================
