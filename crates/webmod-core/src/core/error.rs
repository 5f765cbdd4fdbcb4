use thiserror::Error;

pub type WebmodResult<T> = Result<T, WebmodError>;

#[derive(Error, Debug)]
pub enum WebmodError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("\"{name}\" not found in your node_modules directory")]
    NotInstalled { name: String },

    #[error("dependency \"{name}\" has no ES \"module\" entrypoint")]
    NoEsmEntry { name: String },

    #[error("error loading \"{name}\" at \"{path}\" (type: {file_type})")]
    UnexpectedFsEntry {
        name: String,
        path: std::path::PathBuf,
        file_type: String,
    },

    #[error("no dependencies found")]
    NoDependencies,

    #[error("no \"node_modules\" directory exists")]
    NoInstalledPackages,

    #[error("no ESM dependencies found")]
    NoEsmDependencies,

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Bundler error: {0}")]
    Bundler(String),

    #[error("Path error: {0}")]
    Path(String),
}
