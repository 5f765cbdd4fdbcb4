//! The contract between webmod and the external bundling step.
//!
//! Bundling itself is delegated to rollup, driven through a generated Node
//! script. Everything this crate needs to know about a build is captured by
//! [`BundleInputs`], [`BundleOptions`] and [`BundleOutput`]; the
//! [`ModuleBundler`] trait keeps the build step swappable in tests.

pub mod builtins;
pub mod rollup;

pub use builtins::is_node_builtin;
pub use rollup::RollupBundler;

use crate::core::WebmodResult;
use std::path::{Path, PathBuf};

/// Prefix under which the bundler isolates shared chunks. Files with this
/// prefix are not primary entries and never reach the import maps.
pub const CHUNK_PREFIX: &str = "common";

/// Ordered map from logical module name to resolved entry path.
///
/// Names are unique; inserting an existing name replaces its path
/// (last-write-wins, so "lodash-es" and "lodash-es.js" collapse into one
/// entry) while keeping the original position.
#[derive(Debug, Clone, Default)]
pub struct BundleInputs {
    entries: Vec<(String, PathBuf)>,
}

impl BundleInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, path: PathBuf) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = path;
        } else {
            self.entries.push((name.to_string(), path));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }
}

/// The fixed output configuration of a run: where bundles land and which
/// optional transforms are enabled.
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Absolute destination directory for bundled output.
    pub destination: PathBuf,
    /// Minify with terser and substitute a production NODE_ENV.
    pub optimize: bool,
    /// Static named-exports table for CommonJS interop, keyed by package.
    pub named_exports: std::collections::BTreeMap<String, Vec<String>>,
}

/// An import the bundler could not resolve. Reportable, never fatal:
/// bundling continues and the run finishes with warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedImport {
    pub source: String,
    pub importer: String,
}

/// What one bundling invocation produced.
#[derive(Debug, Clone, Default)]
pub struct BundleOutput {
    /// Every emitted filename (entries and shared chunks), relative to the
    /// destination directory, in the bundler's reported order.
    pub files: Vec<String>,
    pub unresolved: Vec<UnresolvedImport>,
}

impl BundleOutput {
    /// Primary entry bundles only, with shared chunks filtered out.
    pub fn primary_files(&self) -> Vec<String> {
        self.files
            .iter()
            .filter(|name| !name.starts_with(CHUNK_PREFIX))
            .cloned()
            .collect()
    }
}

/// The opaque external build step: one invocation per run over the full
/// input set.
pub trait ModuleBundler {
    fn bundle(
        &self,
        project_root: &Path,
        inputs: &BundleInputs,
        options: &BundleOptions,
    ) -> impl std::future::Future<Output = WebmodResult<BundleOutput>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_last_write_wins() {
        let mut inputs = BundleInputs::new();
        inputs.insert("lodash-es", PathBuf::from("/a/lodash.js"));
        inputs.insert("preact", PathBuf::from("/a/preact.mjs"));
        inputs.insert("lodash-es", PathBuf::from("/b/lodash.js"));

        assert_eq!(inputs.len(), 2);
        let entries: Vec<_> = inputs.iter().collect();
        assert_eq!(entries[0].0, "lodash-es");
        assert_eq!(entries[0].1, Path::new("/b/lodash.js"));
        assert_eq!(entries[1].0, "preact");
    }

    #[test]
    fn test_primary_files_filters_shared_chunks() {
        let output = BundleOutput {
            files: vec![
                "lodash-es.js".to_string(),
                "common/chunk-abc123.js".to_string(),
                "preact.js".to_string(),
            ],
            unresolved: Vec::new(),
        };
        assert_eq!(output.primary_files(), vec!["lodash-es.js", "preact.js"]);
    }
}
