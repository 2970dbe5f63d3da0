//! Bot configuration, loaded from YAML.

use std::path::Path;

use ai_nav::DoorSolidMethod;
use ai_tools::TraceLog;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// How door edges are resolved during search.
    pub door_method: DoorSolidMethod,

    /// Patch the grid on door and brick events. When off, doors are walls.
    pub enable_dynamic_path: bool,

    /// Arena requested after a successful login.
    pub default_arena: Option<String>,

    /// Behavior selected after a successful login.
    pub default_behavior: Option<String>,

    /// Minimum ticks between two ship change requests.
    pub ship_request_interval_ticks: u32,

    /// Trace log capacity; 0 disables the log.
    pub trace_capacity: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            door_method: DoorSolidMethod::Dynamic,
            enable_dynamic_path: true,
            default_arena: None,
            default_behavior: None,
            ship_request_interval_ticks: default_ship_request_interval(),
            trace_capacity: TraceLog::DEFAULT_CAPACITY,
        }
    }
}

pub(crate) fn default_ship_request_interval() -> u32 {
    300
}

impl BotConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ship_request_interval_ticks == 0 {
            return Err(ConfigError::Invalid(
                "ship_request_interval_ticks must be greater than zero".into(),
            ));
        }
        if let Some(arena) = &self.default_arena {
            if arena.trim().is_empty() {
                return Err(ConfigError::Invalid("default_arena must not be blank".into()));
            }
        }
        Ok(())
    }

    /// Door method actually applied to the grid.
    pub fn effective_door_method(&self) -> DoorSolidMethod {
        if self.enable_dynamic_path {
            self.door_method
        } else {
            DoorSolidMethod::AlwaysSolid
        }
    }
}
