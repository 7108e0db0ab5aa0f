// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The list of cartridges available to the menu

use super::Cartridge;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// File name suffix that marks a cartridge
pub const SUFFIX: &str = ".p8.png";

/// Cartridge file names inside one directory
///
/// Order is whatever the file system returned; don't rely on it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Library {
    dir: PathBuf,
    names: Vec<String>,
}

impl Library {
    /// Constructs a library from names already known to be in `dir`
    pub fn new(dir: impl Into<PathBuf>, names: Vec<String>) -> Self {
        Library {
            dir: dir.into(),
            names,
        }
    }

    /// Lists the cartridges in `dir`
    ///
    /// An unreadable directory or one without cartridges is an error.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut names = vec![];
        for entry in std::fs::read_dir(dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.ends_with(SUFFIX) {
                names.push(name);
            }
        }
        if names.is_empty() {
            return Err(Error::NoCartridges {
                dir: dir.to_owned(),
            });
        }
        log::info!("found {} cartridges in {}", names.len(), dir.display());
        Ok(Library::new(dir, names))
    }

    /// The directory holding the cartridges
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    /// Number of cartridges
    pub fn len(&self) -> usize {
        self.names.len()
    }
    /// True if there are no cartridges
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
    /// File name of the cartridge at `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }
    /// File name of the cartridge at `index`, for messages
    pub fn display_name(&self, index: usize) -> &str {
        self.name(index).unwrap_or("<unnamed>")
    }
    /// Full path of the cartridge at `index`
    pub fn path(&self, index: usize) -> Option<PathBuf> {
        self.name(index).map(|name| self.dir.join(name))
    }
    /// Loads the cartridge at `index`
    pub fn load(&self, index: usize) -> Result<Cartridge> {
        let path = self.path(index).ok_or(Error::NoSelection)?;
        Cartridge::open(path)
    }
}
