// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The fixed 16-color palette, plus the 16 "secret" colors

/// Colors 0..16, as `0x00RRGGBB`
pub const BASE: [u32; 16] = [
    0x000000, // black
    0x1d2b53, // dark blue
    0x7e2553, // dark purple
    0x008751, // dark green
    0xab5236, // brown
    0x5f574f, // dark grey
    0xc2c3c7, // light grey
    0xfff1e8, // white
    0xff004d, // red
    0xffa300, // orange
    0xffec27, // yellow
    0x00e436, // green
    0x29adff, // blue
    0x83769c, // lavender
    0xff77a8, // pink
    0xffccaa, // light peach
];

/// Colors 128..144 (also addressed as -16..0), as `0x00RRGGBB`
pub const EXTENDED: [u32; 16] = [
    0x291814, // brownish black
    0x111d35, // darker blue
    0x422136, // darker purple
    0x125359, // blue green
    0x742f29, // dark brown
    0x49333b, // darker grey
    0xa28879, // medium grey
    0xf3ef7d, // light yellow
    0xbe1250, // dark red
    0xff6c24, // dark orange
    0xa8e72e, // lime green
    0x00b543, // medium green
    0x065ab5, // true blue
    0x754665, // mauve
    0xff6e59, // dark peach
    0xff9d81, // peach
];

/// What any other index looks like
pub const DEFAULT: u32 = BASE[6];

/// Looks up a color index
/// # Examples
/// ```rust
/// # use pocket8::gfx::palette::rgb;
/// assert_eq!(0xff004d, rgb(8));
/// assert_eq!(0x291814, rgb(-16));
/// assert_eq!(0x291814, rgb(128));
/// assert_eq!(0xc2c3c7, rgb(1000));
/// ```
pub fn rgb(index: i32) -> u32 {
    match index {
        0..=15 => BASE[index as usize],
        -16..=-1 => EXTENDED[(index + 16) as usize],
        128..=143 => EXTENDED[(index - 128) as usize],
        _ => DEFAULT,
    }
}
