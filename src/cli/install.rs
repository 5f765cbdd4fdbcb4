use colored::*;
use std::env;
use std::time::Instant;
use webmod::bundler::RollupBundler;
use webmod::core::path::find_project_root;
use webmod::core::{WebmodError, WebmodResult};
use webmod::importmap::update_import_maps;
use webmod::install::{InstallOptions, Installer, ProgressReporter};
use webmod::ProjectManifest;

pub async fn run(dest: String, optimize: bool, no_import_maps: bool) -> WebmodResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| WebmodError::Path(format!("Failed to get current directory: {}", e)))?;
    let project_root = find_project_root(&current_dir)?;

    let manifest = ProjectManifest::load(&project_root)?;
    let (deps, whitelist) = manifest.web_dependency_list();

    let options = InstallOptions {
        destination: project_root.join(&dest),
        skip_failures: !whitelist,
        optimize,
        named_exports: manifest.named_exports(),
    };

    let reporter = ProgressReporter::new();
    let bundler = RollupBundler::new();
    let installer = Installer::new(&project_root, &bundler, &reporter);

    let started = Instant::now();
    let report = match installer.install(&deps, &options).await {
        Ok(report) => report,
        Err(err) => {
            reporter.abandon();
            return Err(err);
        }
    };

    reporter.succeed(&format!(
        "{} installed: {}. {}",
        "webmodules".bold(),
        report.ledger.render(options.skip_failures),
        format!("[{:.2}s]", started.elapsed().as_secs_f64()).dimmed()
    ));

    if no_import_maps {
        println!("{}", "skipping import map update".dimmed());
    } else {
        let updated = update_import_maps(&project_root, &dest, &report.installed)?;
        println!("updated import maps in {} file(s)", updated);
    }

    if report.has_warnings {
        // Signal automation that the run needs attention even though
        // output was still produced.
        println!("{}", "Finished with warnings.".yellow());
        std::process::exit(1);
    }

    Ok(())
}
