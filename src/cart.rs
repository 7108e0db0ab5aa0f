// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Loads `.p8.png` cartridges
//!
//! A cartridge is a 160x205 PNG. The two low bits of every color channel hide
//! one byte of cartridge data per pixel; the rest of the image is the label art.
//! The data holds the ROM (sprites, map, sound) followed by the code, which
//! may be stored as plain text or with one of two compressors.


pub mod legacy;
pub mod library;
pub mod pxa;
pub mod stego;

pub use library::Library;

use crate::error::{Error, Result};
use std::{
    fmt::{Debug, Display, Formatter},
    path::Path,
};

/// Width of a cartridge image, in pixels
pub const WIDTH: u32 = 160;
/// Height of a cartridge image, in pixels
pub const HEIGHT: u32 = 205;
/// Number of bytes hidden in a cartridge image
pub const CART_DATA_SIZE: usize = 0x8020;
/// Length of the ROM at the start of cartridge data
pub const ROM_SIZE: usize = 0x4300;
/// Where the code section starts inside cartridge data
pub const CODE_OFFSET: usize = 0x4300;
/// Longest code section any format may produce
pub const MAX_CODE_SIZE: usize = 0x10000;
/// Top-left corner of the label inside the cartridge image
pub const LABEL_ORIGIN: (usize, usize) = (16, 24);
/// Width and height of the label
pub const LABEL_SIZE: usize = 128;

/// How the code section of a cartridge is stored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CodeFormat {
    /// NUL-terminated text
    #[default]
    Plaintext,
    /// The older `:c:\0` compressor
    Legacy,
    /// The newer `\0pxa` compressor
    Pxa,
}

impl CodeFormat {
    /// Identifies the format from the 4-byte magic at the start of the code section
    /// # Examples
    /// ```rust
    /// # use pocket8::cart::{CodeFormat, CODE_OFFSET};
    /// let mut data = vec![0; 0x8020];
    /// data[CODE_OFFSET..CODE_OFFSET + 4].copy_from_slice(b"\0pxa");
    /// assert_eq!(CodeFormat::Pxa, CodeFormat::sniff(&data));
    /// ```
    pub fn sniff(data: &[u8]) -> Self {
        match data.get(CODE_OFFSET..CODE_OFFSET + 4) {
            Some(b":c:\0") => CodeFormat::Legacy,
            Some(b"\0pxa") => CodeFormat::Pxa,
            _ => CodeFormat::Plaintext,
        }
    }

    /// Extracts the code section from cartridge data
    pub fn decode(self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            CodeFormat::Plaintext => Ok(plaintext(data)),
            CodeFormat::Legacy => legacy::decompress(data),
            CodeFormat::Pxa => pxa::decompress(data),
        }
    }
}

impl Display for CodeFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CodeFormat::Plaintext => "plaintext",
                CodeFormat::Legacy => "legacy",
                CodeFormat::Pxa => "pxa",
            }
        )
    }
}

/// Copies code up to the first NUL
fn plaintext(data: &[u8]) -> Vec<u8> {
    data.get(CODE_OFFSET..)
        .unwrap_or_default()
        .iter()
        .take(MAX_CODE_SIZE)
        .take_while(|&&byte| byte != 0)
        .copied()
        .collect()
}

/// A decoded cartridge
#[derive(Clone, PartialEq, Eq)]
pub struct Cartridge {
    raw: Vec<u8>,
    pixels: Vec<u8>,
    data: Vec<u8>,
    code: Vec<u8>,
    format: CodeFormat,
    corrupt: bool,
}

impl Cartridge {
    /// Reads and decodes a cartridge file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let cart = Self::from_png(std::fs::read(path)?)?;
        log::info!(
            "loaded {} ({} code, {} bytes{})",
            path.display(),
            cart.format,
            cart.code.len(),
            if cart.corrupt { ", corrupt" } else { "" }
        );
        Ok(cart)
    }

    /// Decodes a cartridge from the bytes of a PNG file
    pub fn from_png(raw: Vec<u8>) -> Result<Self> {
        let (width, height, pixels) = decode_png(&raw)?;
        Self::from_rgba(raw, width, height, pixels)
    }

    /// Decodes a cartridge from an already-decoded RGBA image
    ///
    /// `raw` is kept as-is, so the cartridge can be written back out unchanged.
    /// A code section that fails to decompress doesn't make this fail; the
    /// cartridge is flagged [corrupt](Cartridge::is_corrupt) instead.
    pub fn from_rgba(raw: Vec<u8>, width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width != WIDTH || height != HEIGHT || pixels.len() != (WIDTH * HEIGHT * 4) as usize {
            return Err(Error::InvalidImageSize { width, height });
        }
        let data = stego::extract(&pixels);
        let format = CodeFormat::sniff(&data);
        let (code, corrupt) = match format.decode(&data) {
            Ok(code) => (code, false),
            Err(e) => {
                log::warn!("{e}");
                (vec![], true)
            }
        };
        log::debug!("{format} code section decoded to {} bytes", code.len());
        Ok(Cartridge {
            raw,
            pixels,
            data,
            code,
            format,
            corrupt,
        })
    }

    /// The file this cartridge was decoded from
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
    /// The decoded image, RGBA
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
    /// The bytes hidden in the image
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    /// Sprites, map, flags, music and sound effects
    pub fn rom(&self) -> &[u8] {
        &self.data[..ROM_SIZE]
    }
    /// The decompressed code section
    pub fn code(&self) -> &[u8] {
        &self.code
    }
    /// How the code section was stored
    pub fn format(&self) -> CodeFormat {
        self.format
    }
    /// True when the code section could not be decompressed
    pub fn is_corrupt(&self) -> bool {
        self.corrupt
    }

    /// The 128x128 label, as `0x00RRGGBB` pixels
    pub fn label(&self) -> Vec<u32> {
        let (left, top) = LABEL_ORIGIN;
        let stride = WIDTH as usize * 4;
        (top..top + LABEL_SIZE)
            .flat_map(|y| {
                let row = &self.pixels[y * stride + left * 4..y * stride + (left + LABEL_SIZE) * 4];
                row.chunks_exact(4)
                    .map(|p| u32::from_be_bytes([0, p[0], p[1], p[2]]))
            })
            .collect()
    }
}

impl Debug for Cartridge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("raw", &format_args!("[{} bytes]", self.raw.len()))
            .field("format", &self.format)
            .field("code", &format_args!("[{} bytes]", self.code.len()))
            .field("corrupt", &self.corrupt)
            .finish()
    }
}

/// Decodes a PNG into (width, height, RGBA pixels)
fn decode_png(raw: &[u8]) -> Result<(u32, u32, Vec<u8>)> {
    let mut decoder = png::Decoder::new(raw);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());
    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 0xff])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 0xff]).collect(),
        color => {
            return Err(Error::UnsupportedImage {
                color: format!("{color:?}"),
            })
        }
    };
    Ok((info.width, info.height, rgba))
}
