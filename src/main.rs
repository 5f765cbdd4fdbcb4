use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use webmod::core::WebmodError;

mod cli;

#[derive(Parser)]
#[command(name = "webmod")]
#[command(about = "Bundle npm dependencies as browser-ready ES modules")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bundle web dependencies and update HTML import maps
    Install {
        /// Output directory for bundled modules
        #[arg(short, long, default_value = "web_modules")]
        dest: String,
        /// Minify output and build with a production NODE_ENV
        #[arg(short, long)]
        optimize: bool,
        /// Skip rewriting import maps in HTML files
        #[arg(long)]
        no_import_maps: bool,
    },
    /// Scaffold an ES module overlay for a CJS-only dependency
    Overlay {
        /// Package name to wrap
        package: String,
        /// Overwrite existing overlay files
        #[arg(short, long)]
        force: bool,
    },
    /// Remove the bundled output directory
    Clean {
        /// Output directory to remove
        #[arg(short, long, default_value = "web_modules")]
        dest: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), WebmodError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install {
            dest,
            optimize,
            no_import_maps,
        } => cli::install::run(dest, optimize, no_import_maps).await,
        Commands::Overlay { package, force } => cli::overlay::run(package, force),
        Commands::Clean { dest } => cli::clean::run(dest),
    };

    // Display error with helpful suggestions
    if let Err(ref e) = result {
        eprintln!("\n{}", webmod::core::format_error_with_help(e));
    }

    result
}
