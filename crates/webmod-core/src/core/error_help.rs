use crate::core::WebmodError;

/// Provides helpful suggestions for common errors
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for WebmodError {
    fn help(&self) -> Option<String> {
        match self {
            WebmodError::NotInstalled { .. } => Some(
                "💡 Suggestion: Did you remember to run 'npm install'?".to_string(),
            ),
            WebmodError::NoEsmEntry { name } => Some(format!(
                "💡 Suggestion: Create an ES module overlay with 'webmod overlay {}'",
                name
            )),
            WebmodError::NoInstalledPackages => Some(
                "💡 Suggestion: Run 'npm install' first to populate node_modules".to_string(),
            ),
            WebmodError::NoEsmDependencies => Some(
                "💡 Suggestion: At least one dependency must declare an ESM \"module\" entrypoint in its package.json. Wrap CJS-only packages with 'webmod overlay <name>'"
                    .to_string(),
            ),
            WebmodError::NoDependencies => Some(
                "💡 Suggestion: Declare dependencies in package.json, or list them under webmodules.webDependencies"
                    .to_string(),
            ),
            WebmodError::Bundler(msg) => {
                if msg.contains("Node.js") {
                    Some(
                        "💡 Suggestion: The bundling step runs on Node.js. Install it and make sure 'node' is on your PATH"
                            .to_string(),
                    )
                } else if msg.contains("rollup") {
                    Some(
                        "💡 Suggestion: Install the bundler toolchain: npm install --save-dev rollup rollup-plugin-node-resolve rollup-plugin-commonjs rollup-plugin-replace rollup-plugin-json rollup-plugin-terser"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            WebmodError::Path(msg) => {
                if msg.contains("Could not find package.json") {
                    Some(
                        "💡 Suggestion: Navigate to a directory with a package.json, or create one with 'npm init'"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            WebmodError::Json(e) => Some(format!(
                "💡 Suggestion: Check your JSON syntax (trailing commas and comments are not allowed)\n\nError details: {}",
                e
            )),
            WebmodError::Io(e) => {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    Some(
                        "💡 Suggestion: Check file permissions, or try running with appropriate permissions"
                            .to_string(),
                    )
                } else if e.kind() == std::io::ErrorKind::NotFound {
                    Some(
                        "💡 Suggestion: The file or directory may not exist. Check the path and try again"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Format an error with helpful suggestions
pub fn format_error_with_help(error: &WebmodError) -> String {
    let mut output = format!("❌ Error: {}", error);

    if let Some(help) = error.help() {
        output.push_str("\n\n");
        output.push_str(&help);
    }

    output
}
