use crate::core::{WebmodError, WebmodResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The project's package.json, reduced to the fields webmod reads.
///
/// The manifest is never written back through this struct; commands that
/// edit package.json (overlay registration) work on the raw JSON value so
/// unrelated fields survive untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub webmodules: Option<WebmodulesConfig>,
}

/// The custom `webmodules` block of a project manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebmodulesConfig {
    /// Explicit whitelist of dependencies to bundle. When present the run
    /// is fail-fast: an explicit list signals the user cares about every
    /// entry succeeding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_dependencies: Option<Vec<String>>,
    /// Static named-exports table for CommonJS interop, keyed by package.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub named_exports: BTreeMap<String, Vec<String>>,
}

impl ProjectManifest {
    /// Load package.json from a directory
    pub fn load(dir: &Path) -> WebmodResult<Self> {
        let path = dir.join("package.json");
        if !path.exists() {
            return Err(WebmodError::Manifest(format!(
                "package.json not found in {}",
                dir.display()
            )));
        }

        let content = fs::read_to_string(&path)?;
        let manifest: ProjectManifest = serde_json::from_str(&content)
            .map_err(|e| WebmodError::Manifest(format!("Failed to parse package.json: {}", e)))?;

        Ok(manifest)
    }

    /// The dependency names to process and the resolution policy.
    ///
    /// Returns `(names, whitelist)`: when `webmodules.webDependencies` is
    /// present its entries are used verbatim and `whitelist` is true
    /// (fail-fast); otherwise every key of `dependencies` is autodiscovered
    /// and failures are tolerated.
    pub fn web_dependency_list(&self) -> (Vec<String>, bool) {
        if let Some(config) = &self.webmodules {
            if let Some(listed) = &config.web_dependencies {
                return (listed.clone(), true);
            }
        }
        (self.dependencies.keys().cloned().collect(), false)
    }

    /// The named-exports override table, empty when not configured.
    pub fn named_exports(&self) -> BTreeMap<String, Vec<String>> {
        self.webmodules
            .as_ref()
            .map(|c| c.named_exports.clone())
            .unwrap_or_default()
    }
}

/// A dependency's own package.json, reduced to its entry-point fields.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    /// ESM entry point. This is the only field webmod resolves through;
    /// the CJS `main` field is deliberately never used as a fallback.
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
}

impl PackageManifest {
    /// Load package.json from a dependency directory
    pub fn load(dir: &Path) -> WebmodResult<Self> {
        let path = dir.join("package.json");
        let content = fs::read_to_string(&path).map_err(|e| {
            WebmodError::Manifest(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let manifest: PackageManifest = serde_json::from_str(&content).map_err(|e| {
            WebmodError::Manifest(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_manifest_with_webmodules_block() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{
                "name": "demo",
                "dependencies": {"lodash-es": "^4.17.0", "preact": "^10.0.0"},
                "webmodules": {
                    "webDependencies": ["lodash-es"],
                    "namedExports": {"react-table": ["useTable"]}
                }
            }"#,
        )
        .unwrap();

        let manifest = ProjectManifest::load(temp.path()).unwrap();
        let (deps, whitelist) = manifest.web_dependency_list();
        assert!(whitelist);
        assert_eq!(deps, vec!["lodash-es"]);
        assert_eq!(
            manifest.named_exports().get("react-table").unwrap(),
            &vec!["useTable".to_string()]
        );
    }

    #[test]
    fn test_autodiscovery_uses_dependency_keys() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies": {"preact": "^10.0.0", "lodash-es": "^4.17.0"}}"#,
        )
        .unwrap();

        let manifest = ProjectManifest::load(temp.path()).unwrap();
        let (deps, whitelist) = manifest.web_dependency_list();
        assert!(!whitelist);
        assert_eq!(deps, vec!["lodash-es", "preact"]);
    }

    #[test]
    fn test_missing_manifest_is_a_manifest_error() {
        let temp = TempDir::new().unwrap();
        let err = ProjectManifest::load(temp.path()).unwrap_err();
        assert!(err.to_string().contains("package.json not found"));
    }

    #[test]
    fn test_package_manifest_reads_module_field() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"name": "lodash-es", "main": "lodash.js", "module": "lodash.js"}"#,
        )
        .unwrap();

        let manifest = PackageManifest::load(temp.path()).unwrap();
        assert_eq!(manifest.module.as_deref(), Some("lodash.js"));
    }
}
