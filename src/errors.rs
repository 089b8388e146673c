use std::path::PathBuf;
use thiserror::Error;

use crate::scan::ConfigKind;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("failed to read config file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is empty")]
    EmptyFile { path: PathBuf },

    #[error("unknown config type '{kind}'")]
    UnknownType { kind: String },

    #[error("unable to locate placement anchor '{anchor}'")]
    AnchorNotFound { anchor: String },

    #[error("invalid config value: {message}")]
    InvalidValue { message: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: ConfigKind, name: String },

    #[error("failed to save config file {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
