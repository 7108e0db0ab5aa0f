// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Prints what's inside a `.p8.png` cartridge
//!
//! Decoder diagnostics (why code is corrupt, codec sizes) go to the log on stderr.


use gumdrop::*;
use owo_colors::OwoColorize;
use pocket8::{
    cart::{Cartridge, LABEL_SIZE},
    error::Result,
};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Cartridge to inspect", free, required)]
    pub file: PathBuf,
    #[options(help = "Print the decompressed code")]
    pub code: bool,
    #[options(help = "Hexdump the cartridge data")]
    pub hex: bool,
    #[options(help = "Draw the label in the terminal")]
    pub label: bool,
    #[options(
        help = "Start the hexdump at offset... (hex)",
        parse(try_from_str = "parse_hex"),
        meta = "N"
    )]
    pub offset: usize,
    #[options(
        help = "Stop the hexdump after this many bytes (hex)",
        parse(try_from_str = "parse_hex"),
        meta = "N"
    )]
    pub length: Option<usize>,
    #[options(help = "Set the log filter, overriding RUST_LOG.", meta = "LEVEL")]
    pub log: Option<String>,
}

fn parse_hex(value: &str) -> std::result::Result<usize, std::num::ParseIntError> {
    usize::from_str_radix(value.trim_start_matches("0x"), 16)
}

/// Logs at `level` if given, otherwise as `RUST_LOG` says, otherwise at `info`
fn logger(level: Option<&str>) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    logger(options.log.as_deref()).init();
    let cart = Cartridge::open(&options.file)?;
    println!(
        "{}: {} code, {} bytes{}",
        options.file.display().bold(),
        cart.format().cyan(),
        cart.code().len(),
        if cart.is_corrupt() {
            format!(", {}", "corrupt".red())
        } else {
            String::new()
        }
    );
    // with nothing else asked for, show the code
    let code = options.code || !(options.hex || options.label);
    if code {
        println!("{}", String::from_utf8_lossy(cart.code()));
    }
    if options.hex {
        let data = cart.data();
        let start = options.offset.min(data.len());
        let end = options
            .length
            .map_or(data.len(), |len| start.saturating_add(len).min(data.len()));
        hexdump(&data[start..end], start);
    }
    if options.label {
        print_label(&cart.label());
    }
    Ok(())
}

/// Prints 16 bytes per line, with zeroes dimmed and an ASCII column
fn hexdump(data: &[u8], base: usize) {
    for (line, chunk) in data.chunks(16).enumerate() {
        let mut bytes = String::new();
        for byte in chunk {
            match byte {
                0 => bytes += &format!("{:02x} ", byte.bright_black()),
                _ => bytes += &format!("{byte:02x} "),
            }
        }
        let ascii: String = chunk
            .iter()
            .map(|&c| match c {
                0x20..=0x7e => c as char,
                _ => '.',
            })
            .collect();
        // escape codes throw off format padding, so pad short lines by hand
        bytes += &"   ".repeat(16 - chunk.len());
        println!(
            "{:04x}: {bytes} {}",
            (base + line * 16).yellow(),
            ascii.bright_black()
        );
    }
}

/// Draws two label rows per terminal line with upper half blocks
fn print_label(label: &[u32]) {
    let rgb = |p: u32| ((p >> 16) as u8, (p >> 8) as u8, p as u8);
    for rows in label.chunks(LABEL_SIZE * 2) {
        let (top, bottom) = rows.split_at(LABEL_SIZE.min(rows.len()));
        let line: String = top
            .iter()
            .zip(bottom.iter().chain(std::iter::repeat(&0)))
            .map(|(&t, &b)| {
                let ((tr, tg, tb), (br, bg, bb)) = (rgb(t), rgb(b));
                "▀".truecolor(tr, tg, tb).on_truecolor(br, bg, bb).to_string()
            })
            .collect();
        println!("{line}");
    }
}
