// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements the virtual machine of a PICO-8-style fantasy console:
//! the 16.16 fixed-point number type, the 64 KiB memory map, the `.p8.png`
//! cartridge decoder with both historical code compressors, the 4bpp
//! framebuffer rasterizer, and the browse/run session that drives it all.
//!
//! The scripting language itself lives behind [engine::Engine]. This crate only
//! supplies the native functions ([api::Api]) and the shared memory they touch.

pub mod api;
pub mod cart;
pub mod engine;
pub mod error;
pub mod fix32;
pub mod gfx;
pub mod mem;
pub mod session;
pub mod vm;

/// Common imports for pocket8
pub mod prelude {
    use super::*;
    pub use api::{Api, Native, Value};
    pub use cart::{Cartridge, CodeFormat, Library};
    pub use engine::{Engine, EntryPoint, Inert};
    pub use error::{Error, Result};
    pub use fix32::Fix32;
    pub use mem::{Mem, ReadWrite, Region::*};
    pub use session::{Present, Session, State};
    pub use vm::Machine;
}
