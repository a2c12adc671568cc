use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Default limit on nested factory resolutions
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 256;

/// Resolution settings for a [`Container`](crate::container::Container)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Fail with a cyclic resolution error instead of recursing without bound
    ///
    /// The guard rejects any factory that re-enters a key it is still
    /// producing, including recursion that would terminate on its own (a
    /// countdown factory, or an extension resolving its own key while the
    /// cached result is itself invokable). Use [`ContainerConfig::unguarded`]
    /// for containers that rely on finite re-entrant resolution.
    pub detect_cycles: bool,
    /// Maximum number of factories that may be resolving at once
    pub max_resolution_depth: usize,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with the cycle guard switched off
    pub fn unguarded() -> Self {
        Self {
            detect_cycles: false,
            ..Self::default()
        }
    }

    pub fn with_detect_cycles(mut self, detect_cycles: bool) -> Self {
        self.detect_cycles = detect_cycles;
        self
    }

    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = depth;
        self
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_resolution_depth == 0 {
            return Err(ConfigError::invalid_value(
                "max_resolution_depth",
                "0",
                "a depth of at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContainerConfig::default();
        assert!(config.detect_cycles);
        assert_eq!(config.max_resolution_depth, DEFAULT_MAX_RESOLUTION_DEPTH);
        assert!(config.validate().is_ok());
        assert!(!ContainerConfig::unguarded().detect_cycles);
    }

    #[test]
    fn test_from_yaml_fills_missing_fields() {
        let config = ContainerConfig::from_yaml_str("max_resolution_depth: 8\n").unwrap();
        assert_eq!(config.max_resolution_depth, 8);
        assert!(config.detect_cycles);
    }

    #[test]
    fn test_from_json() {
        let config = ContainerConfig::from_json_str(r#"{"detect_cycles": false}"#).unwrap();
        assert!(!config.detect_cycles);
        assert_eq!(config.max_resolution_depth, DEFAULT_MAX_RESOLUTION_DEPTH);
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let err = ContainerConfig::from_json_str(r#"{"max_resolution_depth": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "max_resolution_depth"));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            ContainerConfig::from_json_str("{not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            ContainerConfig::from_yaml_str("detect_cycles: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
