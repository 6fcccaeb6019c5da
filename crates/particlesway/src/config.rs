//! Engine configuration.
//!
//! Configuration files are YAML (`.yaml`/`.yml`), TOML (`.toml`) or JSON
//! (`.json`), selected by extension. All fields are optional:
//!
//! ```yaml
//! auto_rotate: true
//! show_dashboards: true
//! show_controls: true
//! particle_density: medium
//! interactive: true
//! smoothing:
//!   mode: frame_rate_independent
//!   factor: 0.1
//!   reference_fps: 60
//! seed: 42
//! ```

use particlesway_core::{EngineError, SmoothingMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Viewport width below which a device counts as mobile.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

const MOBILE_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Unknown file extension
    #[error("unsupported config format '{0}' (expected yaml, yml, toml or json)")]
    UnsupportedFormat(String),
    /// A field holds an unusable value
    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

/// Particles per stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Density {
    /// 500 particles per stream
    Low,
    /// 1000 particles per stream
    Medium,
    /// 2000 particles per stream
    #[default]
    High,
}

impl Density {
    /// Particles per stream at this density.
    #[must_use]
    pub const fn particle_count(self) -> usize {
        match self {
            Self::Low => 500,
            Self::Medium => 1_000,
            Self::High => 2_000,
        }
    }

    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// All densities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Density {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(EngineError::UnknownDensity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Density {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Engine options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Orbit the camera while nothing is selected
    pub auto_rotate: bool,
    /// Show the stats dashboards
    pub show_dashboards: bool,
    /// Show the control panel
    pub show_controls: bool,
    /// Particles per stream
    pub particle_density: Density,
    /// Accept clicks and zoom
    pub interactive: bool,
    /// How segment scales chase their targets
    pub smoothing: SmoothingMode,
    /// Seed for every random draw; entropy when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            show_dashboards: true,
            show_controls: true,
            particle_density: Density::High,
            interactive: true,
            smoothing: SmoothingMode::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse YAML and validate.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML and validate.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON and validate.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text),
            "toml" => Self::from_toml_str(&text),
            "json" => Self::from_json_str(&text),
            _ => Err(ConfigError::UnsupportedFormat(extension)),
        }
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factor = self.smoothing.factor();
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "smoothing.factor",
                message: format!("{factor} is outside (0, 1]"),
            });
        }
        if let SmoothingMode::FrameRateIndependent { reference_fps, .. } = self.smoothing {
            if !(reference_fps.is_finite() && reference_fps > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field: "smoothing.reference_fps",
                    message: format!("{reference_fps} must be a positive frame rate"),
                });
            }
        }
        Ok(())
    }
}

/// What the host knows about the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Viewport width in CSS pixels
    pub viewport_width: f32,
    /// User agent names a mobile platform
    pub is_mobile_agent: bool,
    /// Logical CPU count
    pub hardware_concurrency: u32,
}

impl DeviceProfile {
    /// Build a profile from a user-agent string.
    #[must_use]
    pub fn from_user_agent(user_agent: &str, viewport_width: f32, hardware_concurrency: u32) -> Self {
        let agent = user_agent.to_ascii_lowercase();
        Self {
            viewport_width,
            is_mobile_agent: MOBILE_AGENTS.iter().any(|m| agent.contains(m)),
            hardware_concurrency,
        }
    }

    /// Mobile by agent or by a narrow viewport.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.is_mobile_agent || self.viewport_width < MOBILE_BREAKPOINT
    }

    /// Density suited to this device.
    #[must_use]
    pub fn recommended_density(&self) -> Density {
        if self.is_mobile() {
            Density::Low
        } else if self.hardware_concurrency > 4 {
            Density::High
        } else {
            Density::Medium
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_counts() {
        assert_eq!(Density::Low.particle_count(), 500);
        assert_eq!(Density::Medium.particle_count(), 1_000);
        assert_eq!(Density::High.particle_count(), 2_000);
    }

    #[test]
    fn test_density_parse_case_insensitive() {
        assert_eq!("LOW".parse::<Density>().unwrap(), Density::Low);
        assert_eq!(" Medium ".parse::<Density>().unwrap(), Density::Medium);
        assert_eq!("high".parse::<Density>().unwrap(), Density::High);
        assert_eq!(
            "ultra".parse::<Density>(),
            Err(EngineError::UnknownDensity("ultra".to_string()))
        );
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.auto_rotate);
        assert!(config.show_dashboards);
        assert!(config.show_controls);
        assert!(config.interactive);
        assert_eq!(config.particle_density, Density::High);
        assert_eq!(config.smoothing, SmoothingMode::PerTick { factor: 0.1 });
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = EngineConfig::from_yaml_str("particle_density: Low\ninteractive: false\n").unwrap();
        assert_eq!(config.particle_density, Density::Low);
        assert!(!config.interactive);
        assert!(config.auto_rotate);
    }

    #[test]
    fn test_from_yaml_smoothing() {
        let yaml = "smoothing:\n  mode: frame_rate_independent\n  factor: 0.2\n  reference_fps: 60\nseed: 7\n";
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.smoothing,
            SmoothingMode::FrameRateIndependent {
                factor: 0.2,
                reference_fps: 60.0
            }
        );
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_from_toml() {
        let toml = "particle_density = \"medium\"\nshow_dashboards = false\n\n[smoothing]\nmode = \"per_tick\"\nfactor = 0.5\n";
        let config = EngineConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.particle_density, Density::Medium);
        assert!(!config.show_dashboards);
        assert_eq!(config.smoothing.factor(), 0.5);
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json_str(r#"{"auto_rotate": false}"#).unwrap();
        assert!(!config.auto_rotate);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_yaml_str("particle_density: ultra\n"),
            Err(ConfigError::Yaml(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml_str("smoothing:\n  mode: per_tick\n  factor: 1.5\n"),
            Err(ConfigError::InvalidValue {
                field: "smoothing.factor",
                ..
            })
        ));
        assert!(matches!(
            EngineConfig::from_yaml_str(
                "smoothing:\n  mode: frame_rate_independent\n  factor: 0.1\n  reference_fps: 0\n"
            ),
            Err(ConfigError::InvalidValue {
                field: "smoothing.reference_fps",
                ..
            })
        ));
        assert!(matches!(
            EngineConfig::from_yaml_str("colour: red\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = EngineConfig {
            particle_density: Density::Low,
            seed: Some(3),
            ..EngineConfig::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("particle_density: low"));
        assert_eq!(EngineConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_from_path_missing_file() {
        let missing = EngineConfig::from_path("/nonexistent/particlesway.yaml");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_device_profile() {
        let desktop = DeviceProfile::from_user_agent("Mozilla/5.0 (X11; Linux x86_64)", 1920.0, 8);
        assert!(!desktop.is_mobile());
        assert_eq!(desktop.recommended_density(), Density::High);

        let laptop = DeviceProfile { hardware_concurrency: 4, ..desktop };
        assert_eq!(laptop.recommended_density(), Density::Medium);

        let phone = DeviceProfile::from_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", 1920.0, 8);
        assert!(phone.is_mobile_agent);
        assert_eq!(phone.recommended_density(), Density::Low);

        let narrow = DeviceProfile { viewport_width: 700.0, ..desktop };
        assert_eq!(narrow.recommended_density(), Density::Low);
    }
}
