//! Type definitions for module descriptors and dependency reports

mod module_types;
mod report_types;

pub use module_types::*;
pub use report_types::*;
