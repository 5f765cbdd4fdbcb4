use std::env;
use std::fs;
use webmod::core::path::find_project_root;
use webmod::core::{WebmodError, WebmodResult};

pub fn run(dest: String) -> WebmodResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| WebmodError::Path(format!("Failed to get current directory: {}", e)))?;
    let project_root = find_project_root(&current_dir)?;
    let destination = project_root.join(&dest);

    if !destination.exists() {
        println!("{} directory does not exist. Nothing to clean.", dest);
        return Ok(());
    }

    println!("Cleaning {} directory...", dest);

    let bundle_count = count_bundles(&destination)?;
    fs::remove_dir_all(&destination)?;

    println!("✓ Cleaned {} bundle(s)", bundle_count);
    println!("  Removed: {}", destination.display());

    Ok(())
}

fn count_bundles(destination: &std::path::Path) -> WebmodResult<usize> {
    let mut count = 0;

    for entry in fs::read_dir(destination)? {
        let entry = entry?;
        let path = entry.path();
        // Shared chunks and sourcemaps don't count as installed bundles.
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("js") {
            count += 1;
        }
    }

    Ok(count)
}
