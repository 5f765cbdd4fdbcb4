use colored::*;
use std::env;
use webmod::core::path::find_project_root;
use webmod::core::{WebmodError, WebmodResult};
use webmod::overlay::{make_overlay, register_web_dependency, OVERLAY_SCOPE};

pub fn run(package: String, force: bool) -> WebmodResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| WebmodError::Path(format!("Failed to get current directory: {}", e)))?;
    let project_root = find_project_root(&current_dir)?;

    let written = make_overlay(&project_root, &package, force)?;
    for path in &written {
        println!("{} {}", "created".green(), path.display());
    }

    if register_web_dependency(&project_root, &package)? {
        println!(
            "{} {}/{} to webmodules.webDependencies",
            "added".green(),
            OVERLAY_SCOPE,
            package
        );
    }

    println!();
    println!("Next steps:");
    println!(
        "  1. Review the generated shim under {}/{}/",
        OVERLAY_SCOPE, package
    );
    println!(
        "  2. Link it into node_modules: npm install ./{}/{}",
        OVERLAY_SCOPE, package
    );
    println!("  3. Re-run: webmod install");

    Ok(())
}
