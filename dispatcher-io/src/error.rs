// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while loading a batch file.

use std::path::PathBuf;

/// Failures that can occur while opening or reading the input batch file.
///
/// Per the error handling design, a malformed *line* is never an [`IoError`]: it is
/// logged and skipped by the loader itself. This type only covers failures that make
/// the whole batch unreadable.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// The input file could not be opened for reading.
    #[error("unable to open input file '{path}' for reading: {source}")]
    Unopenable {
        /// The path that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for this crate's results.
pub type IoResult<T> = Result<T, IoError>;
