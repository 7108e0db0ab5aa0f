// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The newer code compressor, `\0pxa`
//!
//! | Offset | Contents                                       |
//! |--------|------------------------------------------------|
//! | 0      | `\0pxa`                                        |
//! | 4      | Decompressed length, high byte first           |
//! | 6      | Compressed length incl. header, high byte first|
//! | 8      | Bitstream, least significant bit first         |
//!
//! Literals are coded as indices into a move-to-front table of all 256 byte
//! values. Back-references carry a 5, 10 or 15 bit offset and a length made of
//! 3-bit parts. A 10-bit reference to offset 1 instead starts a run of raw
//! bytes terminated by a zero.

use super::{CodeFormat, CODE_OFFSET};
use crate::error::{Error, Result};

fn corrupt(reason: &'static str) -> Error {
    Error::CorruptCode {
        format: CodeFormat::Pxa,
        reason,
    }
}

/// Reads a little-endian bitstream
#[derive(Clone, Debug)]
struct Bits<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Bits<'a> {
    fn new(data: &'a [u8]) -> Self {
        Bits { data, pos: 0 }
    }
    fn bit(&mut self) -> Result<u32> {
        let byte = self
            .data
            .get(self.pos >> 3)
            .ok_or_else(|| corrupt("stream ends early"))?;
        let bit = (byte >> (self.pos & 7)) & 1;
        self.pos += 1;
        Ok(bit as u32)
    }
    fn bits(&mut self, count: u32) -> Result<u32> {
        let mut value = 0;
        for i in 0..count {
            value |= self.bit()? << i;
        }
        Ok(value)
    }
}

/// Decompresses the code section of cartridge data
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let header = data
        .get(CODE_OFFSET..CODE_OFFSET + 8)
        .ok_or_else(|| corrupt("header is truncated"))?;
    let len = u16::from_be_bytes([header[4], header[5]]) as usize;
    let compressed = u16::from_be_bytes([header[6], header[7]]) as usize;
    let end = (CODE_OFFSET + compressed).clamp(CODE_OFFSET + 8, data.len());
    let mut bits = Bits::new(&data[CODE_OFFSET + 8..end]);

    let mut mtf: Vec<u8> = (0..=255).collect();
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        if bits.bit()? == 1 {
            let mut unary = 0;
            while bits.bit()? == 1 {
                unary += 1;
                if unary > 4 {
                    return Err(corrupt("literal index is too long"));
                }
            }
            let index = (bits.bits(4 + unary)? + (((1 << unary) - 1) << 4)) as usize;
            let byte = *mtf
                .get(index)
                .ok_or_else(|| corrupt("literal index is out of range"))?;
            mtf.remove(index);
            mtf.insert(0, byte);
            out.push(byte);
            continue;
        }

        let offset_bits = if bits.bit()? == 1 {
            if bits.bit()? == 1 {
                5
            } else {
                10
            }
        } else {
            15
        };
        let offset = bits.bits(offset_bits)? as usize + 1;
        if offset_bits == 10 && offset == 1 {
            loop {
                match bits.bits(8)? {
                    0 => break,
                    byte => out.push(byte as u8),
                }
            }
            continue;
        }

        let mut length = 3;
        loop {
            let part = bits.bits(3)? as usize;
            length += part;
            if part != 7 {
                break;
            }
        }
        if offset > out.len() {
            return Err(corrupt("back-reference points outside the output"));
        }
        for _ in 0..length {
            out.push(out[out.len() - offset]);
        }
    }
    out.truncate(len);
    Ok(out)
}
