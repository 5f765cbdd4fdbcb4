use crate::core::path::html_files;
use crate::core::{to_pretty_json, WebmodError, WebmodResult};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Derive the import-map specifier for a bundle filename: strip the
/// leading path segment and the ".js" extension back to the logical module
/// name used at bundling time. This is what unwraps "@es/react.js" overlay
/// bundles to the "react" specifier the application imports.
pub fn module_specifier(filename: &str) -> &str {
    let name = filename.strip_suffix(".js").unwrap_or(filename);
    match name.split_once('/') {
        Some((_, rest)) => rest,
        None => name,
    }
}

/// Merges bundled module names into the import map of every HTML document
/// under the project root. Only the first
/// `<script type="importmap">…</script>` block of a document is rewritten;
/// everything around it is a byte-for-byte passthrough, and documents
/// without a block are left untouched. Returns how many documents changed.
pub fn update_import_maps(
    project_root: &Path,
    destination: &str,
    filenames: &[String],
) -> WebmodResult<usize> {
    let mappings: Vec<(String, String)> = filenames
        .iter()
        .map(|file| {
            (
                module_specifier(file).to_string(),
                format!("/{}/{}", destination, file),
            )
        })
        .collect();

    let documents = html_files(project_root, &[destination.to_string()])?;
    tracing::debug!(documents = documents.len(), "scanning for import maps");

    let block_re = Regex::new(r#"<script type="importmap">([^<]*)</script>"#)
        .map_err(|e| WebmodError::Path(format!("Invalid import map pattern: {}", e)))?;

    let mut updated = 0;
    for document in &documents {
        let content = fs::read_to_string(document)?;

        let captures = match block_re.captures(&content) {
            Some(captures) => captures,
            None => continue,
        };
        let Some(block) = captures.get(0) else {
            continue;
        };
        let body = captures.get(1).map(|m| m.as_str()).unwrap_or("");

        let rewritten = merge_into_block(body, &mappings)?;
        let mut next = String::with_capacity(content.len() + rewritten.len());
        next.push_str(&content[..block.start()]);
        next.push_str(&rewritten);
        next.push_str(&content[block.end()..]);

        if next != content {
            fs::write(document, next)?;
            updated += 1;
        }
    }

    Ok(updated)
}

/// Merge the (specifier, url) pairs into one import-map block body and
/// re-render the whole block. Unrelated keys survive; same-named keys are
/// overwritten, which is what makes re-runs idempotent.
fn merge_into_block(body: &str, mappings: &[(String, String)]) -> WebmodResult<String> {
    let trimmed = body.trim();
    let source = if trimmed.is_empty() { "{}" } else { trimmed };

    let mut map: serde_json::Value = serde_json::from_str(source)?;
    let root = map.as_object_mut().ok_or_else(|| {
        WebmodError::Manifest("import map block is not a JSON object".to_string())
    })?;

    let imports = root
        .entry("imports")
        .or_insert_with(|| serde_json::Value::Object(Default::default()));
    let imports = imports.as_object_mut().ok_or_else(|| {
        WebmodError::Manifest("\"imports\" in import map is not an object".to_string())
    })?;

    for (specifier, url) in mappings {
        imports.insert(
            specifier.clone(),
            serde_json::Value::String(url.clone()),
        );
    }

    Ok(format!(
        "<script type=\"importmap\">\n{}\n</script>",
        to_pretty_json(&map)?
    ))
}
