pub mod orchestrator;
pub mod reporter;

pub use orchestrator::{InstallOptions, InstallReport, Installer};
pub use reporter::{DetectionLedger, ProgressReporter};
