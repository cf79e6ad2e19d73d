//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

use crate::types::BlockType;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// stream does not open with a container
    #[error("expected a container at {position:#x}, found {found}")]
    MissingContainer {
        /// Offset of the offending header
        position: u64,
        /// Type of the offending header
        found: BlockType,
    },

    /// header declares a size that moves before the start of the stream
    #[error("block at {position:#x} declares an invalid size of {size}")]
    InvalidBlockSize {
        /// Offset just past the header
        position: u64,
        /// Payload size derived from the header
        size: i64,
    },

    /// field table entry or value lies outside of the record
    #[error("field {index} at {position:#x} lies outside of the record")]
    TruncatedField {
        /// Index of the field being resolved
        index: usize,
        /// Offset inside the record that could not be read
        position: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
