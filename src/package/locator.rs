use crate::core::path::node_modules_dir;
use crate::core::{PackageManifest, WebmodError, WebmodResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Strip a trailing ".js" from a requested dependency to form its logical
/// module name (the bundler adds the extension back to the output file).
pub fn web_dependency_name(dep: &str) -> &str {
    dep.strip_suffix(".js").unwrap_or(dep)
}

/// Resolves a bare dependency name to an absolute ESM entry-point path.
///
/// Follows logic similar to Node's resolution, but through a package.json's
/// ESM "module" field instead of the CJS "main" field. A dependency without
/// an ESM entry must be wrapped by an overlay, never silently downgraded to
/// its CJS build.
pub struct PackageLocator {
    project_root: PathBuf,
}

impl PackageLocator {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }

    /// Resolve a requested dependency to the file the bundler should ingest.
    ///
    /// Supports npm package names and file paths relative to node_modules
    /// (e.g. "lodash-es/add.js").
    pub fn resolve(&self, dep: &str) -> WebmodResult<PathBuf> {
        let location = node_modules_dir(&self.project_root).join(dep);

        let metadata = match fs::metadata(&location) {
            Ok(metadata) => metadata,
            Err(_) => {
                return Err(WebmodError::NotInstalled {
                    name: dep.to_string(),
                })
            }
        };

        if metadata.is_file() {
            return Ok(location);
        }

        if metadata.is_dir() {
            let manifest = PackageManifest::load(&location)?;
            return match manifest.module {
                Some(module) => Ok(location.join(module)),
                None => Err(WebmodError::NoEsmEntry {
                    name: dep.to_string(),
                }),
            };
        }

        Err(WebmodError::UnexpectedFsEntry {
            name: dep.to_string(),
            path: location,
            file_type: format!("{:?}", metadata.file_type()),
        })
    }
}
