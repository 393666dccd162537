//! Shared configuration for Scenewright
//!
//! This crate is the single source of truth for gizmo sizing, interaction
//! sensitivity and scene-model defaults. Every field has a default so a
//! partial JSON file only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Base unit length all gizmo handle meshes are derived from
pub const DEFAULT_GIZMO_BASE_LENGTH: f32 = 1.0;

/// Radial segments of the translation arrow head cone
pub const DEFAULT_CONE_SEGMENTS: u32 = 20;

/// Line segments of a rotation ring
pub const DEFAULT_RING_SEGMENTS: u32 = 64;

/// Fraction of the camera field of view a handle should span
pub const DEFAULT_HANDLE_FOV_FRACTION: f32 = 0.2;

/// Scale applied to the world vector derived from a rotation drag
pub const DEFAULT_ROTATE_SENSITIVITY: f32 = 0.1;

/// Instance budget pushed to a new scene model's asset generator
pub const DEFAULT_INSTANCES_NR_MAX: u32 = 64;

/// Errors while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Transform gizmo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoConfig {
    /// Base length handle geometry is generated from (world units at scale 1)
    pub base_length: f32,
    /// Radial segments of the arrow head cone
    pub cone_segments: u32,
    /// Line segments of a rotation ring
    pub ring_segments: u32,
    /// Handle world scale is `tan(fraction * fov) * distance`
    pub handle_fov_fraction: f32,
    /// Multiplier on the world vector derived from a rotation drag
    pub rotate_sensitivity: f32,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            base_length: DEFAULT_GIZMO_BASE_LENGTH,
            cone_segments: DEFAULT_CONE_SEGMENTS,
            ring_segments: DEFAULT_RING_SEGMENTS,
            handle_fov_fraction: DEFAULT_HANDLE_FOV_FRACTION,
            rotate_sensitivity: DEFAULT_ROTATE_SENSITIVITY,
        }
    }
}

/// Defaults applied to newly created scene models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDefaults {
    pub instances_nr_max: u32,
    pub is_static: bool,
}

impl Default for SceneDefaults {
    fn default() -> Self {
        Self {
            instances_nr_max: DEFAULT_INSTANCES_NR_MAX,
            is_static: false,
        }
    }
}

/// Top-level editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub gizmo: GizmoConfig,
    pub scene: SceneDefaults,
}

impl EditorConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the gizmo geometry cannot be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gizmo = &self.gizmo;
        if !(gizmo.base_length > 0.0) {
            return Err(ConfigError::Invalid {
                field: "gizmo.base_length",
                reason: format!("must be positive, got {}", gizmo.base_length),
            });
        }
        if gizmo.cone_segments < 3 {
            return Err(ConfigError::Invalid {
                field: "gizmo.cone_segments",
                reason: format!("needs at least 3 segments, got {}", gizmo.cone_segments),
            });
        }
        if gizmo.ring_segments < 3 {
            return Err(ConfigError::Invalid {
                field: "gizmo.ring_segments",
                reason: format!("needs at least 3 segments, got {}", gizmo.ring_segments),
            });
        }
        if !(gizmo.handle_fov_fraction > 0.0 && gizmo.handle_fov_fraction < 1.0) {
            return Err(ConfigError::Invalid {
                field: "gizmo.handle_fov_fraction",
                reason: format!("must lie in (0, 1), got {}", gizmo.handle_fov_fraction),
            });
        }
        Ok(())
    }
}
