// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for the desktop host

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the desktop host
#[derive(Debug, Error)]
pub enum Error {
    /// Error originated in [pocket8]
    #[error(transparent)]
    Pocket8(#[from] pocket8::error::Error),
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Error originated in [minifb]
    #[error(transparent)]
    WindowError(#[from] minifb::Error),
}
