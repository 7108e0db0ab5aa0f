// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The older code compressor, `:c:\0`
//!
//! | Offset | Contents                                     |
//! |--------|----------------------------------------------|
//! | 0      | `:c:\0`                                      |
//! | 4      | Decompressed length, high byte first         |
//! | 6      | Compressed length, high byte first (ignored) |
//! | 8      | Compressed stream                            |
//!
//! Each token in the stream starts with a control byte `c`:
//! - `0x00`: the next byte is copied as-is
//! - `0x01..0x3c`: one character from [LITERALS]
//! - `0x3c..`: a back-reference. With `n` the next byte, it copies
//!   `(n >> 4) + 2` bytes from `(c - 0x3c) * 16 + (n & 0xf)` bytes back.

use super::{CodeFormat, CODE_OFFSET};
use crate::error::{Error, Result};

/// Characters selected by control bytes `0x01..0x3c`. Index 0 is never emitted.
pub const LITERALS: &[u8; 60] =
    b"^\n 0123456789abcdefghijklmnopqrstuvwxyz!#%(){}[]<>+=/*:;.,~_";

fn corrupt(reason: &'static str) -> Error {
    Error::CorruptCode {
        format: CodeFormat::Legacy,
        reason,
    }
}

/// Decompresses the code section of cartridge data
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let header = data
        .get(CODE_OFFSET..CODE_OFFSET + 8)
        .ok_or_else(|| corrupt("header is truncated"))?;
    let len = u16::from_be_bytes([header[4], header[5]]) as usize;
    let mut input = data[CODE_OFFSET + 8..].iter().copied();
    let mut next = || input.next().ok_or_else(|| corrupt("stream ends early"));

    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        match next()? {
            0 => out.push(next()?),
            control @ 1..=59 => out.push(LITERALS[control as usize]),
            control => {
                let low = next()?;
                let offset = (control as usize - 60) * 16 + (low & 0xf) as usize;
                let length = (low >> 4) as usize + 2;
                if offset == 0 || offset > out.len() {
                    return Err(corrupt("back-reference points outside the output"));
                }
                for _ in 0..length {
                    out.push(out[out.len() - offset]);
                }
            }
        }
    }
    out.truncate(len);
    Ok(out)
}
