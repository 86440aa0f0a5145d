//! Error types for orifinder.
//!
//! This module provides strongly-typed errors for every fallible operation in
//! the library. Image viewer failures have their own type because they are
//! reported but never propagated out of the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in orifinder operations.
#[derive(Debug, Error)]
pub enum OriError {
    /// K-mer length is below the minimum.
    #[error("invalid k-mer length {k}: must be at least {min}")]
    InvalidKmerLength { k: usize, min: usize },

    /// Window size is below the minimum.
    #[error("invalid window size {window}: must be at least {min}")]
    InvalidWindowSize { window: usize, min: usize },

    /// Failed to read the genome file.
    #[error("failed to read genome file '{path}': {source}")]
    GenomeRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// The genome file is gzip-compressed but gzip support is not compiled in.
    #[error("genome file '{path}' is gzip-compressed: gzip input requires the `gzip` feature")]
    GzipUnsupported { path: PathBuf },

    /// Failed to parse the genome file.
    #[error("failed to parse genome file '{path}': {details}")]
    GenomeParse { details: String, path: PathBuf },

    /// A chart was requested for an empty data set.
    #[error("no data to plot for {chart}")]
    NoDataToPlot { chart: &'static str },

    /// Failed to draw or save a chart.
    #[error("failed to render chart '{path}': {details}")]
    Render { details: String, path: PathBuf },

    /// Failed to write the report.
    #[error("failed to write output: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },
}

/// Error for invalid k-mer length.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("k-mer length {k} is out of range: must be at least {min}")]
pub struct KmerLengthError {
    /// The invalid k value that was provided.
    pub k: usize,
    /// Minimum valid k-mer length.
    pub min: usize,
}

/// Error for invalid window size.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("window size {window} is out of range: must be at least {min}")]
pub struct WindowSizeError {
    /// The invalid window size that was provided.
    pub window: usize,
    /// Minimum valid window size.
    pub min: usize,
}

/// Errors raised while handing a chart to an image viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The viewer process could not be started.
    #[error("failed to launch '{program}' for '{path}': {source}")]
    Launch {
        #[source]
        source: std::io::Error,
        program: &'static str,
        path: PathBuf,
    },

    /// The viewer process exited unsuccessfully.
    #[error("'{program}' exited with {status} for '{path}'")]
    Exit {
        program: &'static str,
        status: std::process::ExitStatus,
        path: PathBuf,
    },
}

impl From<std::io::Error> for OriError {
    fn from(source: std::io::Error) -> Self {
        Self::WriteError { source }
    }
}

impl From<serde_json::Error> for OriError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonError { source }
    }
}

impl From<KmerLengthError> for OriError {
    fn from(err: KmerLengthError) -> Self {
        Self::InvalidKmerLength {
            k: err.k,
            min: err.min,
        }
    }
}

impl From<WindowSizeError> for OriError {
    fn from(err: WindowSizeError) -> Self {
        Self::InvalidWindowSize {
            window: err.window,
            min: err.min,
        }
    }
}
