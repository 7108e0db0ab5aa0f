// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The built-in 3x5 font
//!
//! Each glyph is five rows of three bits, with the leftmost pixel in bit 2.
//! Lowercase letters share the uppercase shapes.

/// Glyph width in pixels
pub const WIDTH: i32 = 3;
/// Glyph height in pixels
pub const HEIGHT: i32 = 5;
/// Horizontal distance between characters
pub const ADVANCE: i32 = 4;
/// Vertical distance between lines
pub const LINE: i32 = 6;

/// Drawn for anything the font doesn't cover
pub const BOX: [u8; 5] = [0b111, 0b101, 0b101, 0b101, 0b111];

/// `' '..='`'`
const PRINTABLE: [[u8; 5]; 65] = [
    [0b000, 0b000, 0b000, 0b000, 0b000], // ' '
    [0b010, 0b010, 0b010, 0b000, 0b010], // !
    [0b101, 0b101, 0b000, 0b000, 0b000], // "
    [0b101, 0b111, 0b101, 0b111, 0b101], // #
    [0b111, 0b110, 0b111, 0b011, 0b111], // $
    [0b101, 0b001, 0b010, 0b100, 0b101], // %
    [0b110, 0b110, 0b011, 0b101, 0b111], // &
    [0b010, 0b100, 0b000, 0b000, 0b000], // '
    [0b010, 0b100, 0b100, 0b100, 0b010], // (
    [0b010, 0b001, 0b001, 0b001, 0b010], // )
    [0b101, 0b010, 0b111, 0b010, 0b101], // *
    [0b000, 0b010, 0b111, 0b010, 0b000], // +
    [0b000, 0b000, 0b000, 0b010, 0b100], // ,
    [0b000, 0b000, 0b111, 0b000, 0b000], // -
    [0b000, 0b000, 0b000, 0b000, 0b010], // .
    [0b001, 0b010, 0b010, 0b010, 0b100], // /
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b110, 0b010, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b011, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b100, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b001], // 9
    [0b000, 0b010, 0b000, 0b010, 0b000], // :
    [0b000, 0b010, 0b000, 0b010, 0b100], // ;
    [0b001, 0b010, 0b100, 0b010, 0b001], // <
    [0b000, 0b111, 0b000, 0b111, 0b000], // =
    [0b100, 0b010, 0b001, 0b010, 0b100], // >
    [0b111, 0b001, 0b011, 0b000, 0b010], // ?
    [0b010, 0b101, 0b101, 0b100, 0b011], // @
    [0b111, 0b101, 0b111, 0b101, 0b101], // A
    [0b111, 0b101, 0b110, 0b101, 0b111], // B
    [0b011, 0b100, 0b100, 0b100, 0b011], // C
    [0b110, 0b101, 0b101, 0b101, 0b111], // D
    [0b111, 0b100, 0b110, 0b100, 0b111], // E
    [0b111, 0b100, 0b110, 0b100, 0b100], // F
    [0b011, 0b100, 0b100, 0b101, 0b111], // G
    [0b101, 0b101, 0b111, 0b101, 0b101], // H
    [0b111, 0b010, 0b010, 0b010, 0b111], // I
    [0b111, 0b010, 0b010, 0b010, 0b110], // J
    [0b101, 0b101, 0b110, 0b101, 0b101], // K
    [0b100, 0b100, 0b100, 0b100, 0b111], // L
    [0b111, 0b111, 0b101, 0b101, 0b101], // M
    [0b110, 0b101, 0b101, 0b101, 0b101], // N
    [0b011, 0b101, 0b101, 0b101, 0b110], // O
    [0b111, 0b101, 0b111, 0b100, 0b100], // P
    [0b010, 0b101, 0b101, 0b110, 0b011], // Q
    [0b111, 0b101, 0b110, 0b101, 0b101], // R
    [0b011, 0b100, 0b111, 0b001, 0b110], // S
    [0b111, 0b010, 0b010, 0b010, 0b010], // T
    [0b101, 0b101, 0b101, 0b101, 0b011], // U
    [0b101, 0b101, 0b101, 0b111, 0b010], // V
    [0b101, 0b101, 0b101, 0b111, 0b111], // W
    [0b101, 0b101, 0b010, 0b101, 0b101], // X
    [0b101, 0b101, 0b111, 0b001, 0b111], // Y
    [0b111, 0b001, 0b010, 0b100, 0b111], // Z
    [0b110, 0b100, 0b100, 0b100, 0b110], // [
    [0b100, 0b010, 0b010, 0b010, 0b001], // \
    [0b011, 0b001, 0b001, 0b001, 0b011], // ]
    [0b010, 0b101, 0b000, 0b000, 0b000], // ^
    [0b000, 0b000, 0b000, 0b000, 0b111], // _
    [0b010, 0b001, 0b000, 0b000, 0b000], // `
];

/// `'{'..='~'`
const BRACES: [[u8; 5]; 4] = [
    [0b011, 0b010, 0b110, 0b010, 0b011], // {
    [0b010, 0b010, 0b010, 0b010, 0b010], // |
    [0b110, 0b010, 0b011, 0b010, 0b110], // }
    [0b000, 0b001, 0b111, 0b100, 0b000], // ~
];

/// Gets the glyph for a character
pub fn glyph(c: u8) -> [u8; 5] {
    match c {
        b' '..=b'`' => PRINTABLE[(c - b' ') as usize],
        b'a'..=b'z' => PRINTABLE[(c - b'a' + b'A' - b' ') as usize],
        b'{'..=b'~' => BRACES[(c - b'{') as usize],
        _ => BOX,
    }
}
