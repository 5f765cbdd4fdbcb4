use crate::core::error::{WebmodError, WebmodResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find the project root by walking up from `start` until a package.json is found
pub fn find_project_root(start: &Path) -> WebmodResult<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let manifest = current.join("package.json");
        if manifest.exists() {
            return Ok(current);
        }

        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            return Err(WebmodError::Path(
                "Could not find package.json in current directory or parents".to_string(),
            ));
        }
    }
}

/// Get the npm dependency directory for a project (./node_modules)
pub fn node_modules_dir(project_root: &Path) -> PathBuf {
    project_root.join("node_modules")
}

/// Get the webmod metadata directory (./node_modules/.webmod)
///
/// The generated bundler driver lives here so that its `require` calls
/// resolve against the sibling packages in node_modules.
pub fn webmod_metadata_dir(project_root: &Path) -> PathBuf {
    node_modules_dir(project_root).join(".webmod")
}

/// Get the overlay package directory (./@es)
pub fn overlay_dir(project_root: &Path) -> PathBuf {
    project_root.join("@es")
}

/// Create a directory and all parents if missing
pub fn ensure_dir(path: &Path) -> WebmodResult<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Recursively collect every HTML document under `root`, sorted by path.
///
/// Directories named in `skip_dirs`, hidden directories, node_modules and
/// the overlay directory are never descended into.
pub fn html_files(root: &Path, skip_dirs: &[String]) -> WebmodResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        if entry.depth() > 0 && name.starts_with('.') {
            return false;
        }
        if name == "node_modules" || name == "@es" {
            return false;
        }
        !skip_dirs.iter().any(|skip| name == skip.as_str())
    });

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("html")
        {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
