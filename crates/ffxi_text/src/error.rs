//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested window does not fit inside the input
    #[error("range {offset:#x}+{length:#x} exceeds input of {available:#x} bytes")]
    OutOfRange {
        /// Start of the requested window
        offset: usize,
        /// Length of the requested window
        length: usize,
        /// Number of bytes actually available
        available: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
