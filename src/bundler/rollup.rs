use crate::bundler::{BundleInputs, BundleOptions, BundleOutput, ModuleBundler, UnresolvedImport};
use crate::core::path::{ensure_dir, node_modules_dir, webmod_metadata_dir};
use crate::core::{to_pretty_json, WebmodError, WebmodResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tokio::process::Command;

/// Node script that performs the actual rollup build.
///
/// It is written into node_modules/.webmod/ so its require() calls resolve
/// against the project's own node_modules, and reports structured events
/// back over stdout as JSON lines. The plugin pipeline is fixed: value
/// substitution for NODE_ENV, node-style resolution preferring browser and
/// module fields, JSON-as-ESM conversion, CommonJS interop with the static
/// named-exports table, and terser only for optimized builds.
const DRIVER_SCRIPT: &str = r#"'use strict'
const fs = require('fs')

const config = JSON.parse(fs.readFileSync(process.argv[2], 'utf8'))

function emit (event) {
    process.stdout.write(JSON.stringify(event) + '\n')
}

const rollup = require('rollup')
const replace = require('rollup-plugin-replace')
const nodeResolve = require('rollup-plugin-node-resolve')
const json = require('rollup-plugin-json')
const commonjs = require('rollup-plugin-commonjs')
const { terser } = require('rollup-plugin-terser')

const plugins = [
    replace({ 'process.env.NODE_ENV': JSON.stringify(config.nodeEnv) }),
    nodeResolve({
        mainFields: ['browser', 'module', 'jsnext:main', 'main'],
        modulesOnly: false,
        extensions: ['.mjs', '.cjs', '.js', '.json'],
        preferBuiltins: false
    }),
    json({ preferConst: true, indent: '  ' }),
    commonjs({ extensions: ['.js', '.cjs'], namedExports: config.namedExports })
]
if (config.minify) {
    plugins.push(terser())
}

async function run () {
    const bundle = await rollup.rollup({
        input: config.input,
        plugins,
        onwarn (warning, warn) {
            if (warning.code === 'UNRESOLVED_IMPORT') {
                emit({
                    kind: 'warning',
                    code: warning.code,
                    source: warning.source,
                    importer: warning.importer,
                    message: warning.message
                })
                return
            }
            warn(warning)
        }
    })
    const result = await bundle.write({
        dir: config.dest,
        format: 'esm',
        sourcemap: true,
        exports: 'named',
        chunkFileNames: 'common/[name]-[hash].js'
    })
    emit({ kind: 'output', files: result.output.map(chunk => chunk.fileName) })
}

run().catch(err => {
    emit({ kind: 'error', message: err && err.message ? err.message : String(err) })
    process.exit(1)
})
"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DriverConfig {
    input: serde_json::Map<String, serde_json::Value>,
    dest: String,
    node_env: String,
    minify: bool,
    named_exports: std::collections::BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum DriverEvent {
    Warning {
        code: String,
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        importer: Option<String>,
        message: String,
    },
    Output {
        files: Vec<String>,
    },
    Error {
        message: String,
    },
}

/// Drives rollup in the project's own Node toolchain.
#[derive(Debug, Default)]
pub struct RollupBundler;

impl RollupBundler {
    pub fn new() -> Self {
        Self
    }

    fn write_driver(
        &self,
        project_root: &Path,
        inputs: &BundleInputs,
        options: &BundleOptions,
    ) -> WebmodResult<(std::path::PathBuf, std::path::PathBuf)> {
        let metadata_dir = webmod_metadata_dir(project_root);
        ensure_dir(&metadata_dir)?;

        let driver_path = metadata_dir.join("bundle.cjs");
        fs::write(&driver_path, DRIVER_SCRIPT)?;

        let mut input = serde_json::Map::new();
        for (name, path) in inputs.iter() {
            input.insert(
                name.to_string(),
                serde_json::Value::String(path.to_string_lossy().into_owned()),
            );
        }

        let config = DriverConfig {
            input,
            dest: options.destination.to_string_lossy().into_owned(),
            node_env: if options.optimize {
                "production".to_string()
            } else {
                "development".to_string()
            },
            minify: options.optimize,
            named_exports: options.named_exports.clone(),
        };

        let config_path = metadata_dir.join("bundle.config.json");
        fs::write(&config_path, to_pretty_json(&config)?)?;

        Ok((driver_path, config_path))
    }

    /// Parse the driver's JSON-line events. A structured error event becomes
    /// an `Err`; `Ok(None)` means the driver never reported its output list.
    fn parse_events(stdout: &str) -> WebmodResult<Option<BundleOutput>> {
        let mut output = BundleOutput::default();
        let mut saw_output = false;

        for line in stdout.lines() {
            let event: DriverEvent = match serde_json::from_str(line) {
                Ok(event) => event,
                Err(_) => {
                    tracing::debug!(%line, "unstructured bundler output");
                    continue;
                }
            };
            match event {
                DriverEvent::Warning {
                    code,
                    source,
                    importer,
                    message,
                } => {
                    if code == "UNRESOLVED_IMPORT" {
                        output.unresolved.push(UnresolvedImport {
                            source: source.unwrap_or_default(),
                            importer: importer.unwrap_or_else(|| "<unknown>".to_string()),
                        });
                    } else {
                        tracing::debug!(%code, %message, "bundler warning");
                    }
                }
                DriverEvent::Output { files } => {
                    output.files = files;
                    saw_output = true;
                }
                DriverEvent::Error { message } => {
                    return Err(WebmodError::Bundler(message));
                }
            }
        }

        if !saw_output {
            return Ok(None);
        }
        Ok(Some(output))
    }
}

impl ModuleBundler for RollupBundler {
    async fn bundle(
        &self,
        project_root: &Path,
        inputs: &BundleInputs,
        options: &BundleOptions,
    ) -> WebmodResult<BundleOutput> {
        let node = which::which("node").map_err(|_| {
            WebmodError::Bundler("Node.js executable not found on PATH".to_string())
        })?;

        if !node_modules_dir(project_root).join("rollup").exists() {
            return Err(WebmodError::Bundler(
                "rollup is not installed in this project".to_string(),
            ));
        }

        let (driver_path, config_path) = self.write_driver(project_root, inputs, options)?;

        tracing::debug!(
            driver = %driver_path.display(),
            entries = inputs.len(),
            "invoking bundling step"
        );

        let result = Command::new(&node)
            .arg(&driver_path)
            .arg(&config_path)
            .current_dir(project_root)
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&result.stdout);
        let stderr = String::from_utf8_lossy(&result.stderr);
        for line in stderr.lines() {
            tracing::debug!(%line, "bundler stderr");
        }

        // A structured error event wins over the raw exit status; a driver
        // that died before reporting anything falls back to stderr.
        match (Self::parse_events(&stdout)?, result.status.success()) {
            (Some(output), true) => Ok(output),
            (_, false) => Err(WebmodError::Bundler(format!(
                "bundling step exited with {}: {}",
                result.status,
                stderr.trim()
            ))),
            (None, true) => Err(WebmodError::Bundler(
                "bundling step produced no output manifest".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events_collects_warnings_and_files() {
        let stdout = concat!(
            r#"{"kind":"warning","code":"UNRESOLVED_IMPORT","source":"fs","importer":"node_modules/glob/glob.js","message":"'fs' is imported by glob.js"}"#,
            "\n",
            r#"{"kind":"warning","code":"CIRCULAR_DEPENDENCY","message":"circular"}"#,
            "\n",
            r#"{"kind":"output","files":["lodash-es.js","common/chunk-abc123.js"]}"#,
            "\n",
        );

        let output = RollupBundler::parse_events(stdout).unwrap().unwrap();
        assert_eq!(output.files, vec!["lodash-es.js", "common/chunk-abc123.js"]);
        assert_eq!(
            output.unresolved,
            vec![UnresolvedImport {
                source: "fs".to_string(),
                importer: "node_modules/glob/glob.js".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_events_surfaces_driver_error() {
        let stdout = r#"{"kind":"error","message":"Could not resolve entry module"}"#;
        match RollupBundler::parse_events(stdout) {
            Err(WebmodError::Bundler(msg)) => assert!(msg.contains("entry module")),
            other => panic!("expected Bundler error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_events_without_manifest_reports_none() {
        assert!(RollupBundler::parse_events("").unwrap().is_none());
    }

    #[test]
    fn test_driver_config_serialization() {
        let mut input = serde_json::Map::new();
        input.insert(
            "lodash-es".to_string(),
            serde_json::Value::String("/proj/node_modules/lodash-es/lodash.js".to_string()),
        );
        let config = DriverConfig {
            input,
            dest: "/proj/web_modules".to_string(),
            node_env: "development".to_string(),
            minify: false,
            named_exports: Default::default(),
        };

        let json = to_pretty_json(&config).unwrap();
        assert!(json.contains("\"nodeEnv\": \"development\""));
        assert!(json.contains("\"lodash-es\""));
        assert!(json.contains("\"namedExports\": {}"));
    }

    #[test]
    fn test_driver_script_configures_the_fixed_pipeline() {
        for fragment in [
            "rollup-plugin-replace",
            "rollup-plugin-node-resolve",
            "rollup-plugin-json",
            "rollup-plugin-commonjs",
            "rollup-plugin-terser",
            "chunkFileNames: 'common/[name]-[hash].js'",
            "format: 'esm'",
            "exports: 'named'",
            "UNRESOLVED_IMPORT",
        ] {
            assert!(
                DRIVER_SCRIPT.contains(fragment),
                "driver script is missing {}",
                fragment
            );
        }
    }
}
