// Core functionality
pub mod core;

// Package manifests
pub mod package;

// Re-export commonly used types
pub use crate::core::{format_error_with_help, to_pretty_json, ErrorHelp, WebmodError, WebmodResult};
pub use crate::package::manifest::{PackageManifest, ProjectManifest, WebmodulesConfig};
