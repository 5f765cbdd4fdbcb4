use crate::bundler::{is_node_builtin, BundleInputs, BundleOptions, BundleOutput, ModuleBundler};
use crate::core::path::node_modules_dir;
use crate::core::{WebmodError, WebmodResult};
use crate::install::reporter::{DetectionLedger, ProgressReporter};
use crate::package::{web_dependency_name, PackageLocator};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-run configuration, created once from the project manifest and CLI
/// flags; immutable for the duration of the run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Absolute destination directory for bundled output.
    pub destination: PathBuf,
    /// Tolerate resolution failures (autodiscovery mode). A whitelist run
    /// sets this to false and aborts on the first failure.
    pub skip_failures: bool,
    /// Minify output and substitute a production NODE_ENV.
    pub optimize: bool,
    /// Static named-exports table for CommonJS interop.
    pub named_exports: BTreeMap<String, Vec<String>>,
}

/// What an install run produced, with the warning state folded through the
/// return value rather than accumulated in a global.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Primary entry bundle filenames, in the bundler's reported order.
    pub installed: Vec<String>,
    pub ledger: DetectionLedger,
    /// True when anything was logged as failed even though output was still
    /// produced; translates to a non-zero exit status.
    pub has_warnings: bool,
}

/// Resolves the declared dependencies, drives the bundling step once over
/// all successes, and partitions the output artifacts.
pub struct Installer<'a, B: ModuleBundler> {
    project_root: &'a Path,
    bundler: &'a B,
    reporter: &'a ProgressReporter,
}

impl<'a, B: ModuleBundler> Installer<'a, B> {
    pub fn new(project_root: &'a Path, bundler: &'a B, reporter: &'a ProgressReporter) -> Self {
        Self {
            project_root,
            bundler,
            reporter,
        }
    }

    pub async fn install(
        &self,
        deps: &[String],
        options: &InstallOptions,
    ) -> WebmodResult<InstallReport> {
        if deps.is_empty() {
            return Err(WebmodError::NoDependencies);
        }
        if !node_modules_dir(self.project_root).exists() {
            return Err(WebmodError::NoInstalledPackages);
        }

        let locator = PackageLocator::new(self.project_root);
        let mut ledger = DetectionLedger::new();
        let mut inputs = BundleInputs::new();

        for dep in deps {
            match locator.resolve(dep) {
                Ok(entry) => {
                    inputs.insert(web_dependency_name(dep), entry);
                    ledger.record(dep, true);
                }
                Err(err) => {
                    ledger.record(dep, false);
                    self.reporter.update(&ledger, options.skip_failures);
                    if options.skip_failures {
                        continue;
                    }
                    return Err(err);
                }
            }
            self.reporter.update(&ledger, options.skip_failures);
        }

        // Zero usable entries is always fatal, even after partial success.
        if inputs.is_empty() {
            return Err(WebmodError::NoEsmDependencies);
        }

        let bundle_options = BundleOptions {
            destination: options.destination.clone(),
            optimize: options.optimize,
            named_exports: options.named_exports.clone(),
        };
        let output = self
            .bundler
            .bundle(self.project_root, &inputs, &bundle_options)
            .await?;

        let bundling_warned = self.report_unresolved(&output);

        Ok(InstallReport {
            installed: output.primary_files(),
            has_warnings: ledger.failed_any() || bundling_warned,
            ledger,
        })
    }

    /// Unresolved imports are reportable but never fatal. The hint depends
    /// on whether the missing specifier is a platform builtin (which won't
    /// exist on the web at all) or an absent package.
    fn report_unresolved(&self, output: &BundleOutput) -> bool {
        for warning in &output.unresolved {
            self.reporter.log_error(&format!(
                "'{}' is imported by '{}', but could not be resolved",
                warning.source, warning.importer
            ));
            if is_node_builtin(&warning.source) {
                self.reporter.log_hint(&format!(
                    "'{}' is a Node.js builtin module that won't exist on the web",
                    warning.source
                ));
            } else {
                self.reporter
                    .log_hint("Make sure that the package is installed and that the file exists");
            }
        }
        !output.unresolved.is_empty()
    }
}
