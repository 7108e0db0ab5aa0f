// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for pocket8

use crate::cart::CodeFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pocket8.
#[derive(Debug, Error)]
pub enum Error {
    /// The cartridge image has the wrong dimensions
    #[error("cartridge image is {width}x{height}, expected 160x205")]
    InvalidImageSize {
        /// Width of the offending image
        width: u32,
        /// Height of the offending image
        height: u32,
    },
    /// The cartridge image uses a pixel layout that can't be turned into RGBA
    #[error("cartridge image has unsupported color type {color}")]
    UnsupportedImage {
        /// The offending color type, as reported by the decoder
        color: String,
    },
    /// The code section of a cartridge could not be decompressed
    #[error("{format} code is corrupt: {reason}")]
    CorruptCode {
        /// The compression format that was being decoded
        format: CodeFormat,
        /// What the decoder tripped over
        reason: &'static str,
    },
    /// The cartridge directory has no `.p8.png` files in it
    #[error("no cartridges found in {}", dir.display())]
    NoCartridges {
        /// The directory that was searched
        dir: PathBuf,
    },
    /// There is no loaded cartridge to run
    #[error("no cartridge is loaded")]
    NoSelection,
    /// A script asked for a native function that isn't registered
    #[error("native function {name} does not exist")]
    MissingNative {
        /// The name that was looked up
        name: String,
    },
    /// The scripting engine raised an error
    #[error("{entry}: {message}")]
    Script {
        /// The entry point (or chunk) being executed
        entry: String,
        /// The engine's error message
        message: String,
    },
    /// Tried to convert a string into a number, but it was not one
    #[error("no suitable conversion of \"{text}\" into a number")]
    ParseNumber {
        /// The string which failed to become a number
        text: String,
    },
    /// Error originated in [png]
    #[error(transparent)]
    Png(#[from] png::DecodingError),
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
