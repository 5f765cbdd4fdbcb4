pub mod error;
pub mod error_help;
pub mod json;
pub mod path;

pub use error::{WebmodError, WebmodResult};
pub use error_help::{format_error_with_help, ErrorHelp};
pub use json::to_pretty_json;
