//! Session prefetch configuration

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigExportV1;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Default small-variable threshold, in elements
pub const DEFAULT_SMALL_SIZE_LIMIT: u64 = 1 << 16;

/// Upper bound accepted for `small_size_limit`
const MAX_SMALL_SIZE_LIMIT: u64 = 1 << 40;

/// Upper bound accepted for `cache_depth`
const MAX_CACHE_DEPTH: u32 = 64;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Prefetch Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefetchConfig {
    /// Keep fetched data in the session cache
    pub cache_enabled: bool,

    /// Remote side cannot honor server-side subsetting
    pub unconstrainable: bool,

    /// Log the prefetched variable set
    pub show_fetch: bool,

    /// Variables with at most this many elements are prefetched (0..=2^40).
    /// Zero disables size-based prefetch.
    pub small_size_limit: u64,

    /// Caching depth forwarded to the cache node builder (0..=64)
    pub cache_depth: u32,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            unconstrainable: false,
            show_fetch: false,
            small_size_limit: DEFAULT_SMALL_SIZE_LIMIT,
            cache_depth: 0,
        }
    }
}

impl PrefetchConfig {
    pub fn cache_enabled(mut self, value: bool) -> Self {
        self.cache_enabled = value;
        self
    }

    pub fn unconstrainable(mut self, value: bool) -> Self {
        self.unconstrainable = value;
        self
    }

    pub fn show_fetch(mut self, value: bool) -> Self {
        self.show_fetch = value;
        self
    }

    pub fn small_size_limit(mut self, value: u64) -> Self {
        self.small_size_limit = value;
        self
    }

    pub fn cache_depth(mut self, value: u32) -> Self {
        self.cache_depth = value;
        self
    }

    /// Prefetch is pointless when nothing is cached and the server can subset
    pub fn skips_prefetch(&self) -> bool {
        !self.cache_enabled && !self.unconstrainable
    }

    /// Whether a variable of `nelems` elements is small enough to prefetch
    pub fn is_small(&self, nelems: u64) -> bool {
        self.small_size_limit > 0 && nelems <= self.small_size_limit
    }

    /// Load and validate a configuration file
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = export.prefetch.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Export as a version 1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            prefetch: Some(self.clone()),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

impl Validatable for PrefetchConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.small_size_limit > MAX_SMALL_SIZE_LIMIT {
            return Err(ConfigError::range_with_hint(
                "small_size_limit",
                self.small_size_limit,
                0,
                MAX_SMALL_SIZE_LIMIT,
                "Larger limits prefetch variables that no longer fit in memory",
            ));
        }

        if self.cache_depth > MAX_CACHE_DEPTH {
            return Err(ConfigError::range_with_hint(
                "cache_depth",
                self.cache_depth,
                0,
                MAX_CACHE_DEPTH,
                "Caching depth is forwarded to the cache node builder",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "PrefetchConfig"
    }
}
