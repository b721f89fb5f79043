//! Prefetch configuration
//!
//! Session-level switches that drive prefetch planning. Planning never reads
//! ambient state; every call receives a `PrefetchConfig` explicitly.
//!
//! # Examples
//!
//! ```rust,ignore
//! use dap_constraints::config::PrefetchConfig;
//!
//! // Defaults: caching on, constrainable server, 64Ki element limit
//! let config = PrefetchConfig::default();
//!
//! // Builder-style overrides
//! let config = PrefetchConfig::default()
//!     .small_size_limit(100)
//!     .show_fetch(true);
//!
//! // Versioned YAML file
//! let config = PrefetchConfig::from_yaml("session.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod prefetch_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
pub use prefetch_config::{PrefetchConfig, DEFAULT_SMALL_SIZE_LIMIT};
pub use validation::Validatable;
