//! Error types for the stillify conversion pipeline.
//!
//! Errors are organized by stage so failures carry the file path and
//! enough context to act on. Item-level failures never cross item
//! boundaries: the batch scheduler logs them and moves on.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for stillify operations.
#[derive(Error, Debug)]
pub enum StillifyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The .livp container could not be opened or read
    #[error("Container error for {path}: {message}")]
    Container { path: PathBuf, message: String },

    /// HEIF bitstream decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// JPEG encoding or writing failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Reading the input file failed
    #[error("Read error for {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Convenience type alias for stillify results.
pub type Result<T> = std::result::Result<T, StillifyError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
