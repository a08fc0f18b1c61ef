//! Error types for copper-pour-problem.
//!
//! Domain errors live next to their modules
//! ([`CircuitError`](crate::circuit::CircuitError),
//! [`PourError`](crate::pour::PourError)); this module holds the
//! configuration errors and the top-level [`Error`] the binary reports.

use std::path::PathBuf;

use thiserror::Error;

use crate::circuit::CircuitError;
use crate::pour::PourError;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Any error the command line tool can report.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The circuit could not be read.
    #[error(transparent)]
    Circuit(#[from] CircuitError),

    /// A pour problem could not be built.
    #[error(transparent)]
    Pour(#[from] PourError),

    /// A pour request file could not be read.
    #[error("failed to read pour request file: {path}")]
    RequestsRead {
        /// Path to the request file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A pour request file could not be parsed.
    #[error("failed to parse pour request file: {path}")]
    RequestsParse {
        /// Path to the request file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The problems could not be serialised.
    #[error("failed to serialise pour problems")]
    Serialise {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The output could not be written.
    #[error("failed to write output: {path}")]
    Output {
        /// Output path (`-` for stdout).
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
