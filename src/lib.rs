//! webmod — bundle npm dependencies as browser-ready ES modules.
//!
//! This crate turns the direct dependencies declared in a project's
//! package.json into self-contained ESM bundles under `web_modules/` and
//! wires the result into the project's HTML via native import maps.

pub use webmod_core::{format_error_with_help, ErrorHelp, WebmodError, WebmodResult};
pub use webmod_core::{PackageManifest, ProjectManifest, WebmodulesConfig};

/// Core module re-exported from webmod-core.
pub mod core {
    pub use webmod_core::core::*;
    pub use webmod_core::*;

    /// Path module re-exported from webmod-core.
    pub mod path {
        pub use webmod_core::core::path::*;
    }
}

/// Dependency resolution (node_modules lookup with ESM bias).
pub mod package;

/// The external bundling step and its contract.
pub mod bundler;

/// Install orchestration (resolution ledger, bundling, reporting).
pub mod install;

/// Import-map reconciliation in HTML documents.
pub mod importmap;

/// Overlay package scaffolding.
pub mod overlay;
