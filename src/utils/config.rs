use crate::core::{LatencyThresholds, DEFAULT_CIRCLE_POINTS, DEFAULT_PROBE_SAMPLE, FALLBACK_LATENCY_MS, REGION_RADIUS_KM};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Dashboard-wide parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Radius of region boundary circles (km)
    pub region_radius_km: f64,
    /// Samples per boundary circle
    pub circle_points: usize,
    /// Nearest probes averaged per location
    pub probe_sample_size: usize,
    /// Latency reported when no probe qualifies (ms)
    pub fallback_latency_ms: f64,
    /// Interval between latency arc recomputations (milliseconds)
    pub refresh_interval_ms: u64,
    /// Color band cut-offs
    pub latency_thresholds: LatencyThresholds,
    pub show_region_boundaries: bool,
    pub show_heatmap: bool,
    pub show_topology: bool,
    pub show_volume: bool,
    /// Enable debug logging
    pub debug_logging: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            region_radius_km: REGION_RADIUS_KM,
            circle_points: DEFAULT_CIRCLE_POINTS,
            probe_sample_size: DEFAULT_PROBE_SAMPLE,
            fallback_latency_ms: FALLBACK_LATENCY_MS,
            refresh_interval_ms: 60_000,
            latency_thresholds: LatencyThresholds::default(),
            show_region_boundaries: true,
            show_heatmap: true,
            show_topology: false,
            show_volume: false,
            debug_logging: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => write!(f, "Serialization error: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration validation result
#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

/// Owns the active configuration and its backing file
pub struct ConfigurationManager {
    config: DashboardConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationManager {
    pub fn new() -> Self {
        Self {
            config: DashboardConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Replace the whole configuration after validation
    pub fn update_config(&mut self, config: DashboardConfig) -> Result<(), ConfigError> {
        Self::ensure_valid(&config)?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: DashboardConfig = serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to parse config file '{}': {}", path_str, e),
        })?;

        Self::ensure_valid(&config)?;

        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if let Some(path) = self.config_file_path.clone() {
            self.save_to_file(path)
        } else {
            Err(ConfigError::IoError {
                message: "No file path set for saving configuration".to_string(),
            })
        }
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    // Runtime parameter adjustment. Each setter validates and returns the old value.

    pub fn set_region_radius(&mut self, radius_km: f64) -> Result<f64, ConfigError> {
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(invalid("region_radius_km", radius_km, "Radius must be a positive number of kilometers"));
        }
        let old = self.config.region_radius_km;
        self.config.region_radius_km = radius_km;
        self.is_modified = true;
        Ok(old)
    }

    pub fn set_circle_points(&mut self, points: usize) -> Result<usize, ConfigError> {
        if points < 3 {
            return Err(invalid("circle_points", points, "A circle needs at least 3 points"));
        }
        let old = self.config.circle_points;
        self.config.circle_points = points;
        self.is_modified = true;
        Ok(old)
    }

    pub fn set_probe_sample_size(&mut self, sample_size: usize) -> Result<usize, ConfigError> {
        if sample_size == 0 {
            return Err(invalid("probe_sample_size", sample_size, "At least one probe must be sampled"));
        }
        let old = self.config.probe_sample_size;
        self.config.probe_sample_size = sample_size;
        self.is_modified = true;
        Ok(old)
    }

    pub fn set_latency_thresholds(&mut self, thresholds: LatencyThresholds) -> Result<LatencyThresholds, ConfigError> {
        let mut candidate = self.config.clone();
        candidate.latency_thresholds = thresholds;
        Self::ensure_valid(&candidate)?;

        let old = self.config.latency_thresholds;
        self.config.latency_thresholds = thresholds;
        self.is_modified = true;
        Ok(old)
    }

    pub fn set_debug_logging(&mut self, enabled: bool) -> bool {
        let old = self.config.debug_logging;
        self.config.debug_logging = enabled;
        self.is_modified = true;
        old
    }

    /// Check every parameter, collecting all problems
    pub fn validate_config(config: &DashboardConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if !(config.region_radius_km.is_finite() && config.region_radius_km > 0.0) {
            errors.push(invalid("region_radius_km", config.region_radius_km, "Radius must be a positive number of kilometers"));
        } else if config.region_radius_km > 2000.0 {
            warnings.push(format!(
                "Region radius {} km will produce heavily overlapping boundaries",
                config.region_radius_km
            ));
        }

        if config.circle_points < 3 {
            errors.push(invalid("circle_points", config.circle_points, "A circle needs at least 3 points"));
        } else if config.circle_points < 8 {
            warnings.push(format!("{} circle points will render visibly polygonal boundaries", config.circle_points));
        }

        if config.probe_sample_size == 0 {
            errors.push(invalid("probe_sample_size", config.probe_sample_size, "At least one probe must be sampled"));
        }

        if !(config.fallback_latency_ms.is_finite() && config.fallback_latency_ms >= 0.0) {
            errors.push(invalid("fallback_latency_ms", config.fallback_latency_ms, "Fallback latency must be non-negative"));
        }

        if config.refresh_interval_ms < 1000 {
            errors.push(invalid("refresh_interval_ms", config.refresh_interval_ms, "Refresh interval must be at least 1000 ms"));
        }

        let thresholds = &config.latency_thresholds;
        if !(thresholds.low_ms > 0.0 && thresholds.low_ms < thresholds.high_ms) {
            errors.push(invalid(
                "latency_thresholds",
                format!("{}/{}", thresholds.low_ms, thresholds.high_ms),
                "Thresholds must satisfy 0 < low < high",
            ));
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    fn ensure_valid(config: &DashboardConfig) -> Result<(), ConfigError> {
        let validation = Self::validate_config(config);
        match validation.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
