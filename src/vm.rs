// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The machine: memory, random number generator, clock, and cartridge ROM
//!
//! Every native function and every drawing routine takes a `&mut Machine`;
//! there is no global state anywhere in the crate.

use crate::{
    cart::{Cartridge, ROM_SIZE},
    fix32::Fix32,
    mem::{Mem, SIZE},
};
use std::time::Instant;

/// The console's random number generator, two words of state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rng {
    hi: u32,
    lo: u32,
}

impl Rng {
    /// Constructs a generator seeded with `seed`
    pub fn new(seed: u32) -> Self {
        let mut rng = Rng { hi: 0, lo: 0 };
        rng.seed(seed);
        rng
    }

    /// Reseeds the generator, then discards the first 32 outputs
    pub fn seed(&mut self, seed: u32) {
        self.hi = if seed != 0 { seed } else { 0xdead_beef };
        self.lo = seed ^ 0xbead_29ba;
        for _ in 0..32 {
            self.step();
        }
    }

    /// Advances the state and returns the new high word
    pub fn step(&mut self) -> u32 {
        self.hi = self.hi.rotate_left(16).wrapping_add(self.lo);
        self.lo = self.lo.wrapping_add(self.hi);
        self.hi
    }

    /// A random number in `0..range`, or `0` when `range` is zero
    pub fn rnd(&mut self, range: Fix32) -> Fix32 {
        let range = range.to_bits() as u32;
        let value = self.step();
        if range == 0 {
            return Fix32::ZERO;
        }
        Fix32::from_bits((value % range) as i32)
    }
}

/// Represents the state of one console
#[derive(Clone, Debug, PartialEq)]
pub struct Machine {
    /// The shared address space
    pub mem: Mem,
    /// Random number generator state
    pub rng: Rng,
    epoch: Instant,
    rom: Vec<u8>,
}

impl Machine {
    /// Powers on a machine with zeroed memory and a freshly seeded [Rng]
    pub fn new() -> Self {
        Machine {
            mem: Mem::new(),
            rng: Rng::new(rand::random()),
            epoch: Instant::now(),
            rom: vec![0; ROM_SIZE],
        }
    }

    /// Zeroes all memory and restarts the clock. The RNG keeps its state.
    pub fn reset(&mut self) {
        self.mem.reset();
        self.epoch = Instant::now();
    }

    /// Takes a copy of a cartridge's ROM and loads it into the bottom of memory
    pub fn insert(&mut self, cart: &Cartridge) {
        self.rom.clear();
        self.rom.extend_from_slice(cart.rom());
        self.rom.resize(ROM_SIZE, 0);
        self.reload(0, 0, ROM_SIZE);
    }

    /// Copies `len` bytes of cartridge ROM at `src` into memory at `dst`
    ///
    /// Parts of either range that fall outside ROM or memory are skipped.
    pub fn reload(&mut self, dst: usize, src: usize, len: usize) {
        let len = len
            .min(self.rom.len().saturating_sub(src))
            .min(SIZE.saturating_sub(dst));
        if len == 0 {
            return;
        }
        for (offset, &byte) in self.rom[src..src + len].iter().enumerate() {
            self.mem.poke(dst + offset, byte);
        }
    }

    /// Seconds since the last [Machine::reset]
    pub fn elapsed(&self) -> Fix32 {
        Fix32::from_f64(self.epoch.elapsed().as_secs_f64())
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
