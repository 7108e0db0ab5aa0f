// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The seam between the console and a scripting engine
//!
//! A session never calls a cartridge function blindly: it first asks
//! [Engine::has_entry_point], then [Engine::call]s it. That keeps optional
//! callbacks optional, and lets tests stand in for a real interpreter.

use crate::{api::Api, error::Result, vm::Machine};
use std::fmt::{Debug, Display, Formatter};

/// A cartridge function the console calls on its own
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryPoint {
    /// Called once, after the code is loaded
    Init,
    /// Called every frame at 30 fps
    Update,
    /// Called every frame at 60 fps
    Update60,
    /// Called every frame, after the update
    Draw,
}

impl EntryPoint {
    /// Every entry point, in the order a frame would call them
    pub const ALL: [EntryPoint; 4] = [
        EntryPoint::Init,
        EntryPoint::Update,
        EntryPoint::Update60,
        EntryPoint::Draw,
    ];

    /// The global name a cartridge defines this entry point under
    pub const fn name(self) -> &'static str {
        match self {
            EntryPoint::Init => "_init",
            EntryPoint::Update => "_update",
            EntryPoint::Update60 => "_update60",
            EntryPoint::Draw => "_draw",
        }
    }
}

impl Display for EntryPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An interpreter for cartridge code
pub trait Engine: Debug {
    /// Loads and runs the top level of `code`
    fn load(&mut self, vm: &mut Machine, api: &Api, code: &[u8]) -> Result<()>;
    /// True if the loaded code defines `entry`
    fn has_entry_point(&self, entry: EntryPoint) -> bool;
    /// Calls `entry` to completion
    fn call(&mut self, vm: &mut Machine, api: &Api, entry: EntryPoint) -> Result<()>;
}

/// An engine that accepts any code and defines nothing
///
/// Used when no interpreter is linked in: cartridges load and their ROM
/// shows up in memory, but none of their code runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inert;

impl Engine for Inert {
    fn load(&mut self, _: &mut Machine, _: &Api, code: &[u8]) -> Result<()> {
        log::debug!("inert engine ignoring {} bytes of code", code.len());
        Ok(())
    }
    fn has_entry_point(&self, _: EntryPoint) -> bool {
        false
    }
    fn call(&mut self, _: &mut Machine, _: &Api, _: EntryPoint) -> Result<()> {
        Ok(())
    }
}
