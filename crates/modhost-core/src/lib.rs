//! # modhost-core
//!
//! Core library for modhost providing:
//! - Module descriptor types as stored in the module registry
//! - Dependency reports and the merged package dependency map
//! - The error taxonomy shared by the lifecycle crate and the CLI
//! - Hierarchical configuration loading (modhost.yaml)

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigLoader, LicenseMode, LicensingConfig, ModhostConfig};
pub use error::{Error, Result};
