//! Crate-wide error type.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors raised while loading inputs, running, or writing outputs.
#[derive(Debug, thiserror::Error)]
pub enum LoadSimError {
    /// Invalid scenario configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input file could not be opened or read.
    #[error("cannot read \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file or directory could not be written.
    #[error("cannot write \"{}\": {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV file was syntactically malformed or had wrongly typed cells.
    #[error("malformed CSV in \"{}\": {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The device list parsed but violates a constraint.
    #[error("device list \"{}\": {message}", .path.display())]
    DeviceList { path: PathBuf, message: String },

    /// A utilisation profile has the wrong shape or out-of-range values.
    #[error("utilisation profile for \"{device}\": {message}")]
    Profile { device: String, message: String },

    /// Writing to an in-memory or stream sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Writing CSV records to a sink failed.
    #[error(transparent)]
    CsvWrite(#[from] csv::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LoadSimError>;
