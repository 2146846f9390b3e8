use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rastervec operations
#[derive(Error, Diagnostic, Debug)]
pub enum RvError {
    #[error("IO error: {0}")]
    #[diagnostic(code(rastervec::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(rastervec::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Could not decode image {path}: {message}")]
    #[diagnostic(code(rastervec::decode))]
    Decode {
        path: std::path::PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid pixel grid: {message}")]
    #[diagnostic(code(rastervec::grid))]
    Grid { message: String },

    #[error("Refusing to write {path}: {message}")]
    #[diagnostic(code(rastervec::output))]
    Output {
        path: std::path::PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Could not serialise {what}: {message}")]
    #[diagnostic(code(rastervec::serialize))]
    Serialize {
        what: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(rastervec::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, RvError>;
