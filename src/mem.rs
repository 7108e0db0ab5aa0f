// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The console's 64 KiB address space
//!
//! Everything the machine knows lives in one flat byte array. The regions below
//! are only a convention, enforced by whoever reads and writes them.
//! Out-of-range accesses are inert: reads give 0 and writes vanish.


pub mod read;
pub use read::{Get, ReadWrite};

use std::{
    fmt::{Debug, Display, Formatter},
    ops::Range,
    slice::SliceIndex,
};

/// Size of the address space, in bytes
pub const SIZE: usize = 0x10000;

/// Addresses of the draw-state and hardware registers
pub mod reg {
    /// Current pen color (low nibble)
    pub const PEN: usize = 0x5f25;
    /// Text cursor x position
    pub const CURSOR_X: usize = 0x5f26;
    /// Text cursor y position
    pub const CURSOR_Y: usize = 0x5f27;
    /// 16-bit fill pattern, high byte first. Bit 15 is the top-left cell.
    pub const FILL_PATTERN: usize = 0x5f31;
}

/// Represents a named region in memory
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Sprite sheet, upper half
    Sprites,
    /// Sprite sheet lower half, or map rows 32..64
    Shared,
    /// Map rows 0..32
    Map,
    /// One flag byte per sprite
    Flags,
    /// Music patterns
    Music,
    /// Sound effects
    Sfx,
    /// General purpose RAM
    Ram,
    /// Custom font
    Font,
    /// Persistent cartridge data
    CartData,
    /// Draw state: palettes, clipping, cursor, color, fill pattern
    DrawState,
    /// Hardware state: audio, RNG, buttons
    Hardware,
    /// General purpose I/O pins
    Gpio,
    /// The framebuffer, two pixels per byte
    Screen,
    /// Extended memory past the screen
    Upper,
}

impl Region {
    /// Every region, in address order
    pub const ALL: [Region; 14] = [
        Region::Sprites,
        Region::Shared,
        Region::Map,
        Region::Flags,
        Region::Music,
        Region::Sfx,
        Region::Ram,
        Region::Font,
        Region::CartData,
        Region::DrawState,
        Region::Hardware,
        Region::Gpio,
        Region::Screen,
        Region::Upper,
    ];

    /// The addresses covered by this region
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Sprites => 0x0000..0x1000,
            Region::Shared => 0x1000..0x2000,
            Region::Map => 0x2000..0x3000,
            Region::Flags => 0x3000..0x3100,
            Region::Music => 0x3100..0x3200,
            Region::Sfx => 0x3200..0x4300,
            Region::Ram => 0x4300..0x5600,
            Region::Font => 0x5600..0x5e00,
            Region::CartData => 0x5e00..0x5f00,
            Region::DrawState => 0x5f00..0x5f40,
            Region::Hardware => 0x5f40..0x5f80,
            Region::Gpio => 0x5f80..0x6000,
            Region::Screen => 0x6000..0x8000,
            Region::Upper => 0x8000..SIZE,
        }
    }

    /// The first address in this region
    pub const fn start(self) -> usize {
        self.range().start
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Sprites => "Sprites",
                Region::Shared => "Shared",
                Region::Map => "Map",
                Region::Flags => "Flags",
                Region::Music => "Music",
                Region::Sfx => "Sfx",
                Region::Ram => "Ram",
                Region::Font => "Font",
                Region::CartData => "CartData",
                Region::DrawState => "DrawState",
                Region::Hardware => "Hardware",
                Region::Gpio => "Gpio",
                Region::Screen => "Screen",
                Region::Upper => "Upper",
            }
        )
    }
}

/// The address space. Zeroed at construction and on [Mem::reset].
#[derive(Clone, PartialEq, Eq)]
pub struct Mem {
    memory: Vec<u8>,
}

impl Get<u8> for Mem {
    #[inline(always)]
    fn get<I>(&self, index: I) -> Option<&<I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get(index)
    }

    #[inline(always)]
    fn get_mut<I>(&mut self, index: I) -> Option<&mut <I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get_mut(index)
    }
}

impl Mem {
    /// Constructs a zeroed address space
    /// # Examples
    /// ```rust
    /// # use pocket8::mem::{Mem, SIZE};
    /// let mem = Mem::new();
    /// assert_eq!(SIZE, mem.len());
    /// assert_eq!(0, mem.peek(0x6000));
    /// ```
    pub fn new() -> Self {
        Mem {
            memory: vec![0; SIZE],
        }
    }

    /// Gets the length of the address space
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Always false; the address space has a fixed size
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Zeroes the entire address space
    pub fn reset(&mut self) {
        self.memory.fill(0);
    }

    /// Reads a byte
    /// # Examples
    /// ```rust
    /// # use pocket8::mem::Mem;
    /// let mut mem = Mem::new();
    /// mem.poke(0x4300, 0xa5);
    /// assert_eq!(0xa5, mem.peek(0x4300));
    /// assert_eq!(0, mem.peek(0x10000));
    /// ```
    #[inline(always)]
    pub fn peek(&self, addr: usize) -> u8 {
        ReadWrite::<u8>::read(self, addr)
    }
    /// Writes a byte
    #[inline(always)]
    pub fn poke(&mut self, addr: usize, data: u8) {
        ReadWrite::<u8>::write(self, addr, data)
    }
    /// Reads two bytes, high byte first
    /// # Examples
    /// ```rust
    /// # use pocket8::mem::Mem;
    /// let mut mem = Mem::new();
    /// mem.poke(0x4300, 0x12);
    /// mem.poke(0x4301, 0x34);
    /// assert_eq!(0x1234, mem.peek2(0x4300));
    /// ```
    #[inline(always)]
    pub fn peek2(&self, addr: usize) -> u16 {
        ReadWrite::<u16>::read(self, addr)
    }
    /// Writes two bytes, high byte first
    #[inline(always)]
    pub fn poke2(&mut self, addr: usize, data: u16) {
        ReadWrite::<u16>::write(self, addr, data)
    }
    /// Reads four bytes, high byte first
    #[inline(always)]
    pub fn peek4(&self, addr: usize) -> u32 {
        ReadWrite::<u32>::read(self, addr)
    }
    /// Writes four bytes, high byte first
    #[inline(always)]
    pub fn poke4(&mut self, addr: usize, data: u32) {
        ReadWrite::<u32>::write(self, addr, data)
    }

    /// Copies `len` bytes from `src` to `dst`. The ranges may overlap.
    ///
    /// `len` is clamped so that neither range runs off the end of memory.
    /// # Examples
    /// ```rust
    /// # use pocket8::mem::Mem;
    /// let mut mem = Mem::new();
    /// mem.poke(0x0000, 7);
    /// mem.memcpy(0xffff, 0x0000, 100);
    /// assert_eq!(7, mem.peek(0xffff));
    /// ```
    pub fn memcpy(&mut self, dst: usize, src: usize, len: usize) {
        let len = len
            .min(self.len().saturating_sub(dst))
            .min(self.len().saturating_sub(src));
        if len > 0 {
            self.memory.copy_within(src..src + len, dst);
        }
    }

    /// Sets `len` bytes starting at `addr` to `value`, clamped to the end of memory
    pub fn memset(&mut self, addr: usize, value: u8, len: usize) {
        let len = len.min(self.len().saturating_sub(addr));
        if let Some(range) = self.memory.get_mut(addr..addr + len) {
            range.fill(value);
        }
    }

    /// CRC-32 of `len` bytes starting at `addr`, wrapping past the end of memory
    /// # Examples
    /// ```rust
    /// # use pocket8::mem::Mem;
    /// let mem = Mem::new();
    /// assert_eq!(0, mem.crc32(0, 0));
    /// assert_eq!(mem.crc32(0xfff0, 0x20), mem.crc32(0, 0x20));
    /// ```
    pub fn crc32(&self, addr: usize, len: usize) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        let (mut at, mut remaining) = (addr % self.len(), len);
        while remaining > 0 {
            let chunk = remaining.min(self.len() - at);
            hasher.update(&self.memory[at..at + chunk]);
            remaining -= chunk;
            at = 0;
        }
        hasher.finalize()
    }

    /// Gets a slice of a named [Region] of memory
    /// # Examples
    /// ```rust
    /// # use pocket8::mem::{Mem, Region};
    /// let mem = Mem::new();
    /// assert_eq!(0x2000, mem.get_region(Region::Screen).len());
    /// ```
    #[inline(always)]
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Gets a mutable slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region_mut(&mut self, name: Region) -> &mut [u8] {
        &mut self.memory[name.range()]
    }

    /// Copies as much of `data` as fits into the start of a [Region]
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> &mut Self {
        let region = self.get_region_mut(name);
        let len = region.len().min(data.len());
        region[..len].copy_from_slice(&data[..len]);
        self
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        self.get_region_mut(name).fill(0);
        self
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mem")
            .field("len", &self.len())
            .field("crc32", &format_args!("{:08x}", self.crc32(0, self.len())))
            .finish()
    }
}
