//! Configuration I/O
//!
//! Defines the YAML schema. Loading and export live in prefetch_config.rs.

use super::prefetch_config::PrefetchConfig;
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Prefetch settings; omitted fields take their defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch: Option<PrefetchConfig>,
}
