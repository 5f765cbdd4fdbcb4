use clap::{Parser, Subcommand};
use webmod_core::WebmodError;

mod ui;
mod watch;
mod websocket;

#[derive(Parser)]
#[command(name = "webmod-watch")]
#[command(about = "Watch a webmod project and live-reload browsers")]
struct Cli {
    #[command(subcommand)]
    command: WatchCommands,
}

#[derive(Subcommand)]
enum WatchCommands {
    /// Watch files, rebuild bundles and push browser reloads
    Watch {
        /// Paths to watch (default: app/, web_modules/, package.json)
        #[arg(short, long)]
        paths: Option<Vec<String>>,

        /// Additional glob patterns to ignore (e.g. "**/*.tmp")
        #[arg(short, long)]
        ignore: Option<Vec<String>>,

        /// WebSocket port for browser reload
        #[arg(long)]
        websocket_port: Option<u16>,

        /// Don't re-run 'webmod install' on manifest changes
        #[arg(long)]
        no_install: bool,
    },

    /// Start the dev watch loop with defaults (alias for watch)
    Dev,
}

#[tokio::main]
async fn main() -> Result<(), WebmodError> {
    let cli = Cli::parse();

    match cli.command {
        WatchCommands::Watch {
            paths,
            ignore,
            websocket_port,
            no_install,
        } => watch::run(paths, ignore, websocket_port, no_install).await,
        WatchCommands::Dev => watch::run(None, None, None, false).await,
    }
}
