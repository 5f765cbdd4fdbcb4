//! Overlay package scaffolding.
//!
//! An overlay is a hand-authored compatibility package under `@es/<name>`
//! that gives a CJS-only dependency an ESM entry point: it re-exports the
//! wrapped package so the bundler's CommonJS interop can chew through it.

use crate::core::path::{ensure_dir, overlay_dir};
use crate::core::{to_pretty_json, WebmodError, WebmodResult};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// The npm scope overlays are published under inside the project.
pub const OVERLAY_SCOPE: &str = "@es";

fn index_template(name: &str) -> String {
    format!(
        "import defaultExport from '{name}'\nexport * from '{name}'\nexport default defaultExport\n",
        name = name
    )
}

fn package_template(name: &str) -> WebmodResult<String> {
    let manifest = json!({
        "name": format!("{}/{}", OVERLAY_SCOPE, name),
        "version": "1.0.0",
        "description": format!("ES module overlay for {}", name),
        "license": "UNLICENSED",
        "module": "index.js",
        "dependencies": {
            name: "*"
        }
    });
    to_pretty_json(&manifest)
}

/// Scaffold `@es/<name>` with an index.js shim and a package.json whose
/// `module` field makes it resolvable as an ESM dependency. Existing files
/// are kept unless `force` is set. Returns the files written.
pub fn make_overlay(project_root: &Path, name: &str, force: bool) -> WebmodResult<Vec<PathBuf>> {
    if name.is_empty() {
        return Err(WebmodError::Manifest(
            "Overlay package name cannot be empty".to_string(),
        ));
    }

    let package_dir = overlay_dir(project_root).join(name);
    ensure_dir(&package_dir)?;

    let mut written = Vec::new();

    let index_path = package_dir.join("index.js");
    if force || !index_path.exists() {
        fs::write(&index_path, index_template(name))?;
        written.push(index_path);
    } else {
        println!(
            "Skip already present file generation: {}",
            index_path.display()
        );
    }

    let manifest_path = package_dir.join("package.json");
    if force || !manifest_path.exists() {
        fs::write(&manifest_path, package_template(name)?)?;
        written.push(manifest_path);
    } else {
        println!(
            "Skip already present file generation: {}",
            manifest_path.display()
        );
    }

    Ok(written)
}

/// Register the overlay under `webmodules.webDependencies` in the project
/// manifest, editing the raw JSON so unrelated fields survive byte-for-byte
/// in meaning. Returns false when the entry was already present.
pub fn register_web_dependency(project_root: &Path, name: &str) -> WebmodResult<bool> {
    let manifest_path = project_root.join("package.json");
    let content = fs::read_to_string(&manifest_path).map_err(|e| {
        WebmodError::Manifest(format!("Failed to read {}: {}", manifest_path.display(), e))
    })?;
    let mut manifest: serde_json::Value = serde_json::from_str(&content)?;

    let root = manifest.as_object_mut().ok_or_else(|| {
        WebmodError::Manifest("package.json is not a JSON object".to_string())
    })?;

    let webmodules = root
        .entry("webmodules")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| {
            WebmodError::Manifest("\"webmodules\" in package.json is not an object".to_string())
        })?;

    let listed = webmodules
        .entry("webDependencies")
        .or_insert_with(|| json!([]))
        .as_array_mut()
        .ok_or_else(|| {
            WebmodError::Manifest("\"webDependencies\" is not an array".to_string())
        })?;

    let entry = format!("{}/{}", OVERLAY_SCOPE, name);
    if listed.iter().any(|v| v.as_str() == Some(entry.as_str())) {
        return Ok(false);
    }
    listed.push(serde_json::Value::String(entry));

    fs::write(&manifest_path, to_pretty_json(&manifest)?)?;
    Ok(true)
}
