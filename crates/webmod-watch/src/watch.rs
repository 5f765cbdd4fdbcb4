use crate::ui::UI;
use crate::websocket::LiveReload;
use globset::{Glob, GlobMatcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;
use webmod_core::core::path::find_project_root;
use webmod_core::{WebmodError, WebmodResult};

/// Action to take when a watched file changes
#[derive(Debug, Clone, PartialEq, Eq)]
enum FileAction {
    /// Re-run the install pipeline (manifest changed)
    Rebuild,
    /// Push a reload to connected browsers (asset changed)
    Reload,
}

/// Configuration for watch mode
pub struct WatchConfig {
    /// Paths to watch, relative to the project root
    pub paths: Vec<PathBuf>,
    /// Glob patterns to ignore
    pub ignore: Vec<String>,
    /// Debounce delay in milliseconds
    pub debounce_ms: u64,
    /// WebSocket port for browser reload
    pub websocket_port: u16,
    /// Command re-run when the project manifest changes
    pub rebuild_command: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("app"),
                PathBuf::from("web_modules"),
                PathBuf::from("package.json"),
            ],
            ignore: vec![
                "**/node_modules/**".to_string(),
                "**/.git/**".to_string(),
                "**/*.swp".to_string(),
            ],
            debounce_ms: 300,
            websocket_port: 35729,
            rebuild_command: vec!["webmod".to_string(), "install".to_string()],
        }
    }
}

/// Watches a webmod project and keeps browsers in sync: manifest changes
/// re-run the install pipeline, asset changes push a live reload.
pub struct Watcher {
    config: WatchConfig,
    project_root: PathBuf,
    should_stop: Arc<AtomicBool>,
    ignore_matchers: Vec<GlobMatcher>,
    livereload: LiveReload,
}

impl Watcher {
    pub fn new(config: WatchConfig, project_root: PathBuf) -> WebmodResult<Self> {
        let mut ignore_matchers = Vec::new();
        for pattern in &config.ignore {
            let glob = Glob::new(pattern).map_err(|e| {
                WebmodError::Path(format!("Invalid ignore pattern '{}': {}", pattern, e))
            })?;
            ignore_matchers.push(glob.compile_matcher());
        }

        let livereload = LiveReload::new(config.websocket_port);

        Ok(Self {
            config,
            project_root,
            should_stop: Arc::new(AtomicBool::new(false)),
            ignore_matchers,
            livereload,
        })
    }

    /// Start watching; returns when Ctrl+C is received.
    pub async fn run(&self) -> WebmodResult<()> {
        UI::watcher_start(&self.format_paths(), self.config.websocket_port);

        let should_stop = Arc::clone(&self.should_stop);
        ctrlc::set_handler(move || {
            UI::watcher_stop();
            should_stop.store(true, Ordering::SeqCst);
        })
        .map_err(|e| WebmodError::Path(format!("Failed to set signal handler: {}", e)))?;

        self.livereload.start().await?;

        // Bring bundles up to date before the first reload can matter.
        self.rebuild();

        let (tx, rx) = channel();
        let mut debouncer = new_debouncer(Duration::from_millis(self.config.debounce_ms), tx)
            .map_err(|e| WebmodError::Path(format!("Failed to create file watcher: {}", e)))?;

        for path in &self.config.paths {
            let full_path = self.project_root.join(path);
            if full_path.exists() {
                debouncer
                    .watcher()
                    .watch(&full_path, notify::RecursiveMode::Recursive)
                    .map_err(|e| {
                        WebmodError::Path(format!(
                            "Failed to watch path {}: {}",
                            full_path.display(),
                            e
                        ))
                    })?;
            }
        }

        loop {
            if self.should_stop.load(Ordering::SeqCst) {
                break;
            }

            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(Ok(events)) => self.handle_events(&events),
                Ok(Err(e)) => {
                    UI::error(&format!("Watch error: {}", e));
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
                Err(e) => {
                    UI::error(&format!("Channel error: {}", e));
                    break;
                }
            }
        }

        Ok(())
    }

    fn handle_events(&self, events: &[DebouncedEvent]) {
        let Some((path, action)) = self.classify_events(events) else {
            return;
        };
        let display = path.display().to_string();
        UI::file_changed(&display);

        if action == FileAction::Rebuild {
            self.rebuild();
        }

        UI::reloading(self.livereload.client_count());
        self.livereload.notify(&display);
    }

    /// Pick the action for a debounced batch. A manifest change anywhere in
    /// the batch wins over plain asset reloads.
    fn classify_events(&self, events: &[DebouncedEvent]) -> Option<(PathBuf, FileAction)> {
        let mut reload: Option<PathBuf> = None;

        for event in events {
            let ignored = self
                .ignore_matchers
                .iter()
                .any(|matcher| matcher.is_match(&event.path));
            if ignored {
                continue;
            }

            if event.path.file_name().and_then(|n| n.to_str()) == Some("package.json") {
                return Some((event.path.clone(), FileAction::Rebuild));
            }

            if let Some(ext) = event.path.extension().and_then(|e| e.to_str()) {
                if matches!(ext, "html" | "css" | "js" | "mjs" | "map") && reload.is_none() {
                    reload = Some(event.path.clone());
                }
            }
        }

        reload.map(|path| (path, FileAction::Reload))
    }

    fn rebuild(&self) {
        let command = &self.config.rebuild_command;
        if command.is_empty() {
            return;
        }

        UI::status(&format!("Running {}...", command.join(" ")));
        let status = Command::new(&command[0])
            .args(&command[1..])
            .current_dir(&self.project_root)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) if status.success() => UI::status("Install finished"),
            Ok(status) => UI::error(&format!("Install exited with {}", status)),
            Err(e) => UI::error(&format!("Failed to run install: {}", e)),
        }
    }

    fn format_paths(&self) -> String {
        self.config
            .paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub async fn run(
    paths: Option<Vec<String>>,
    ignore: Option<Vec<String>>,
    websocket_port: Option<u16>,
    no_install: bool,
) -> WebmodResult<()> {
    let current_dir = std::env::current_dir()
        .map_err(|e| WebmodError::Path(format!("Failed to get current directory: {}", e)))?;
    let project_root = find_project_root(&current_dir)?;

    let mut config = WatchConfig::default();
    if let Some(paths) = paths {
        config.paths = paths.into_iter().map(PathBuf::from).collect();
    }
    if let Some(ignore) = ignore {
        config.ignore.extend(ignore);
    }
    if let Some(port) = websocket_port {
        config.websocket_port = port;
    }
    if no_install {
        config.rebuild_command.clear();
    }

    let watcher = Watcher::new(config, project_root)?;
    watcher.run().await
}
