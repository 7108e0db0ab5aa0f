// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The byte-per-pixel channel that hides cartridge data inside the label image
//!
//! Each byte is split into four 2-bit pairs stored in the low bits of a
//! pixel's channels, most significant pair first: alpha, red, green, blue.

use super::CART_DATA_SIZE;

/// Recovers up to [CART_DATA_SIZE] bytes from RGBA pixels
/// # Examples
/// ```rust
/// # use pocket8::cart::stego::extract;
/// // 0b01_10_11_00 spread over (r, g, b, a)
/// assert_eq!(vec![0b01101100], extract(&[0xfe, 0xff, 0xfc, 0xfd]));
/// ```
pub fn extract(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .take(CART_DATA_SIZE)
        .map(|p| (p[3] & 3) << 6 | (p[0] & 3) << 4 | (p[1] & 3) << 2 | (p[2] & 3))
        .collect()
}

/// Hides `data` in the low bits of RGBA pixels, leaving the upper bits alone
///
/// Stops at whichever runs out first: data, pixels, or [CART_DATA_SIZE].
pub fn embed(data: &[u8], rgba: &mut [u8]) {
    for (&byte, p) in data
        .iter()
        .zip(rgba.chunks_exact_mut(4))
        .take(CART_DATA_SIZE)
    {
        let mut set = |channel: usize, shift: u8| {
            p[channel] = (p[channel] & !3) | (byte >> shift & 3);
        };
        set(3, 6);
        set(0, 4);
        set(1, 2);
        set(2, 0);
    }
}
