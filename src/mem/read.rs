// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Traits for reading and writing big-endian integers at arbitrary addresses

use std::slice::SliceIndex;

/// Gets a `&[T]` at [SliceIndex] `I`.
///
/// This is similar to the [SliceIndex] method `.get(...)`, however implementing this trait
/// for [u8] will auto-impl [ReadWrite]<(i8, u8, i16, u16, i32, u32)>
pub trait Get<T> {
    /// Gets the slice of Self at [SliceIndex] I
    fn get<I>(&self, index: I) -> Option<&<I as SliceIndex<[T]>>::Output>
    where
        I: SliceIndex<[T]>;

    /// Gets a mutable slice of Self at [SliceIndex] I
    fn get_mut<I>(&mut self, index: I) -> Option<&mut <I as SliceIndex<[T]>>::Output>
    where
        I: SliceIndex<[T]>;
}

/// Reads and writes a T at address `addr`, most significant byte first
///
/// Every byte is handled on its own, so a value straddling the end of memory
/// reads the missing bytes as 0 and drops them on write.
pub trait ReadWrite<T> {
    /// Reads a T from address `addr`
    fn read(&self, addr: usize) -> T;
    /// Writes a T to address `addr`
    fn write(&mut self, addr: usize, data: T);
}

/// Implements [ReadWrite] for the provided types
///
/// Relies on inherent methods of Rust numeric types:
/// - `Self::from_be_bytes`
/// - `Self::to_be_bytes`
macro_rules! impl_rw {
    ($($t:ty) ,* $(,)?) => {
        $(
            impl<T: Get<u8>> ReadWrite<$t> for T {
                #[inline(always)]
                fn read(&self, addr: usize) -> $t {
                    let mut bytes = [0u8; core::mem::size_of::<$t>()];
                    for (offset, byte) in bytes.iter_mut().enumerate() {
                        if let Some(&data) = addr.checked_add(offset).and_then(|addr| self.get(addr)) {
                            *byte = data;
                        }
                    }
                    <$t>::from_be_bytes(bytes)
                }
                #[inline(always)]
                fn write(&mut self, addr: usize, data: $t) {
                    for (offset, byte) in data.to_be_bytes().into_iter().enumerate() {
                        if let Some(slot) = addr.checked_add(offset).and_then(|addr| self.get_mut(addr)) {
                            *slot = byte;
                        }
                    }
                }
            }
        )*
    };
}

impl_rw!(i8, i16, i32);
impl_rw!(u8, u16, u32);
