// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Drawing into the memory-mapped framebuffer
//!
//! The screen is 128x128 pixels at 4 bits each, stored at [Region::Screen].
//! Even x coordinates live in the low nibble, odd ones in the high nibble.
//!
//! Every shape ends up in [Machine::pset], which clips to the screen and
//! honours the fill pattern. Shapes themselves never pre-clip.

#[cfg(test)]
mod tests;

pub mod font;
pub mod palette;

use crate::{
    mem::{reg, Region},
    vm::Machine,
};

/// Width and height of the screen, in pixels
pub const SCREEN_SIZE: i32 = 128;
/// Bytes per framebuffer row
pub const STRIDE: usize = 64;
/// Width and height of the sprite sheet, in pixels
pub const SHEET_SIZE: i32 = 128;
/// Width of the map, in cells
pub const MAP_WIDTH: i32 = 128;
/// Height of the map, in cells
pub const MAP_HEIGHT: i32 = 64;

/// Address of the byte holding pixel (x, y) of a 128-pixel-wide 4bpp surface
#[inline(always)]
fn nibble_addr(base: usize, x: i32, y: i32) -> usize {
    base + y as usize * STRIDE + (x as usize >> 1)
}

#[inline(always)]
fn on_surface(x: i32, y: i32, size: i32) -> bool {
    (0..size).contains(&x) && (0..size).contains(&y)
}

// Pixels and draw state
impl Machine {
    /// Resolves an optional color against the pen color register
    #[inline(always)]
    fn ink(&self, color: Option<u8>) -> u8 {
        color.unwrap_or_else(|| self.mem.peek(reg::PEN)) & 0xf
    }

    /// True if the fill pattern hides pixel (x, y)
    #[inline(always)]
    fn masked(&self, x: i32, y: i32) -> bool {
        let pattern = self.mem.peek2(reg::FILL_PATTERN);
        let bit = 15 - ((y & 3) * 4 + (x & 3));
        pattern >> bit & 1 != 0
    }

    /// Sets one pixel to `color`, or to the pen color if `color` is [None]
    ///
    /// Pixels off screen, or hidden by the fill pattern, are left alone.
    /// # Examples
    /// ```rust
    /// # use pocket8::vm::Machine;
    /// let mut vm = Machine::new();
    /// vm.pset(3, 2, Some(8));
    /// assert_eq!(8, vm.pget(3, 2));
    /// assert_eq!(0x80, vm.mem.peek(0x6000 + 2 * 64 + 1));
    /// ```
    pub fn pset(&mut self, x: i32, y: i32, color: Option<u8>) {
        if !on_surface(x, y, SCREEN_SIZE) || self.masked(x, y) {
            return;
        }
        let color = self.ink(color);
        let addr = nibble_addr(Region::Screen.start(), x, y);
        let byte = self.mem.peek(addr);
        self.mem.poke(
            addr,
            if x & 1 == 0 {
                (byte & 0xf0) | color
            } else {
                (byte & 0x0f) | color << 4
            },
        );
    }

    /// Gets the color of one pixel, or 0 off screen
    pub fn pget(&self, x: i32, y: i32) -> u8 {
        if !on_surface(x, y, SCREEN_SIZE) {
            return 0;
        }
        let byte = self.mem.peek(nibble_addr(Region::Screen.start(), x, y));
        if x & 1 == 0 {
            byte & 0xf
        } else {
            byte >> 4
        }
    }

    /// Sets the pen color
    pub fn color(&mut self, color: u8) {
        self.mem.poke(reg::PEN, color & 0xf);
    }

    /// Sets the fill pattern. Bit 15 covers the top-left pixel of each 4x4 tile.
    pub fn fillp(&mut self, pattern: u16) {
        self.mem.poke2(reg::FILL_PATTERN, pattern);
    }

    /// Moves the text cursor
    pub fn cursor(&mut self, x: i32, y: i32) {
        self.mem.poke(reg::CURSOR_X, x as u8);
        self.mem.poke(reg::CURSOR_Y, y as u8);
    }

    /// Fills the screen with one color and homes the text cursor
    ///
    /// The fill pattern does not apply.
    pub fn cls(&mut self, color: u8) {
        let color = color & 0xf;
        self.mem.get_region_mut(Region::Screen).fill(color << 4 | color);
        self.cursor(0, 0);
    }

    /// Converts the framebuffer to `0x00RRGGBB` pixels, row by row
    pub fn frame_rgb(&self) -> Vec<u32> {
        self.mem
            .get_region(Region::Screen)
            .iter()
            .flat_map(|&byte| [byte & 0xf, byte >> 4])
            .map(|index| palette::rgb(index as i32))
            .collect()
    }
}

// Shapes
impl Machine {
    /// A horizontal run of pixels from x0 to x1 inclusive
    fn span(&mut self, x0: i64, x1: i64, y: i64, color: Option<u8>) {
        if !(0..SCREEN_SIZE as i64).contains(&y) {
            return;
        }
        // off-screen pixels are inert, so only the visible part is walked
        let (left, right) = (x0.min(x1).max(0), x0.max(x1).min(SCREEN_SIZE as i64 - 1));
        for x in left..=right {
            self.pset(x as i32, y as i32, color);
        }
    }

    #[inline(always)]
    fn plot(&mut self, x: i64, y: i64, color: Option<u8>) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.pset(x, y, color);
        }
    }

    /// Draws a line with Bresenham's algorithm, both endpoints included
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<u8>) {
        let (mut x, mut y) = (x0 as i64, y0 as i64);
        let (x1, y1) = (x1 as i64, y1 as i64);
        let (dx, sx) = ((x1 - x).abs(), if x < x1 { 1 } else { -1 });
        let (dy, sy) = (-(y1 - y).abs(), if y < y1 { 1 } else { -1 });
        let mut err = dx + dy;
        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws the outline of a rectangle between two corners, inclusive
    pub fn rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<u8>) {
        let (left, right) = (x0.min(x1) as i64, x0.max(x1) as i64);
        let (top, bottom) = (y0.min(y1) as i64, y0.max(y1) as i64);
        self.span(left, right, top, color);
        self.span(left, right, bottom, color);
        for y in (top + 1).max(0)..bottom.min(SCREEN_SIZE as i64) {
            self.plot(left, y, color);
            self.plot(right, y, color);
        }
    }

    /// Fills a rectangle between two corners, inclusive
    pub fn rectfill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<u8>) {
        let (top, bottom) = (y0.min(y1) as i64, y0.max(y1) as i64);
        for y in top.max(0)..=bottom.min(SCREEN_SIZE as i64 - 1) {
            self.span(x0 as i64, x1 as i64, y, color);
        }
    }

    /// Draws a circle outline with the midpoint algorithm
    pub fn circ(&mut self, cx: i32, cy: i32, r: i32, color: Option<u8>) {
        let (cx, cy) = (cx as i64, cy as i64);
        self.midpoint(r, |vm, x, y| {
            for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
                vm.plot(cx + px, cy + py, color);
            }
        });
    }

    /// Fills a circle, one span per octant step
    pub fn circfill(&mut self, cx: i32, cy: i32, r: i32, color: Option<u8>) {
        let (cx, cy) = (cx as i64, cy as i64);
        self.midpoint(r, |vm, x, y| {
            vm.span(cx - x, cx + x, cy + y, color);
            vm.span(cx - x, cx + x, cy - y, color);
            vm.span(cx - y, cx + y, cy + x, color);
            vm.span(cx - y, cx + y, cy - x, color);
        });
    }

    /// Walks the first octant of a circle of radius `r`, calling `step` with (x, y)
    fn midpoint(&mut self, r: i32, mut step: impl FnMut(&mut Self, i64, i64)) {
        if r < 0 {
            return;
        }
        let (mut x, mut y, mut err) = (r as i64, 0i64, 1 - r as i64);
        while x >= y {
            step(self, x, y);
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Draws the outline of the ellipse inscribed in a rectangle
    pub fn oval(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<u8>) {
        self.ellipse(x0, y0, x1, y1, |vm, left, right, y| {
            vm.plot(left, y, color);
            vm.plot(right, y, color);
        });
    }

    /// Fills the ellipse inscribed in a rectangle
    pub fn ovalfill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<u8>) {
        self.ellipse(x0, y0, x1, y1, |vm, left, right, y| {
            vm.span(left, right, y, color)
        });
    }

    /// Walks an ellipse by its bounding box, calling `row` with (left, right, y)
    /// for the pixel pairs on each side of every row it touches
    fn ellipse(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        mut row: impl FnMut(&mut Self, i64, i64, i64),
    ) {
        let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let mut a = (x1 - x0).abs();
        let b = (y1 - y0).abs();
        let mut b1 = b & 1;
        let mut dx = 4 * (1 - a) * b * b;
        let mut dy = 4 * (b1 + 1) * a * a;
        let mut err = dx + dy + b1 * a * a;
        if x0 > x1 {
            x0 = x1;
            x1 += a;
        }
        if y0 > y1 {
            y0 = y1;
        }
        y0 += (b + 1) / 2;
        y1 = y0 - b1;
        a *= 8 * a;
        b1 = 8 * b * b;
        loop {
            row(self, x0, x1, y0);
            row(self, x0, x1, y1);
            let e2 = 2 * err;
            if e2 <= dy {
                y0 += 1;
                y1 -= 1;
                dy += a;
                err += dy;
            }
            if e2 >= dx || 2 * err > dy {
                x0 += 1;
                x1 -= 1;
                dx += b1;
                err += dx;
            }
            if x0 > x1 {
                break;
            }
        }
        // narrow ellipses finish their tips here, out to the box edges
        while y0 - y1 <= b {
            row(self, x0 - 1, x1 + 1, y0);
            row(self, x0 - 1, x1 + 1, y1);
            y0 += 1;
            y1 -= 1;
        }
    }
}

// Text
impl Machine {
    /// Prints text with the built-in font, returning the x just past the last character
    ///
    /// Without a position, text goes at the cursor. Either way the cursor ends
    /// up at the start of the next line.
    pub fn print(&mut self, text: &[u8], at: Option<(i32, i32)>, color: Option<u8>) -> i32 {
        let (left, top) = at.unwrap_or((
            self.mem.peek(reg::CURSOR_X) as i32,
            self.mem.peek(reg::CURSOR_Y) as i32,
        ));
        let (mut x, mut y) = (left, top);
        let mut right = x;
        for &c in text {
            if c == b'\n' {
                x = left;
                y += font::LINE;
                continue;
            }
            self.glyph(c, x, y, color);
            x += font::ADVANCE;
            right = right.max(x);
        }
        self.cursor(left, y + font::LINE);
        right
    }

    fn glyph(&mut self, c: u8, x: i32, y: i32, color: Option<u8>) {
        for (row, bits) in font::glyph(c).into_iter().enumerate() {
            for col in 0..font::WIDTH {
                if bits & (1 << (font::WIDTH - 1 - col)) != 0 {
                    self.pset(x + col, y + row as i32, color);
                }
            }
        }
    }
}

// Sprites, flags and the map
impl Machine {
    /// Gets a pixel of the sprite sheet, or 0 outside it
    pub fn sget(&self, x: i32, y: i32) -> u8 {
        if !on_surface(x, y, SHEET_SIZE) {
            return 0;
        }
        let byte = self.mem.peek(nibble_addr(Region::Sprites.start(), x, y));
        if x & 1 == 0 {
            byte & 0xf
        } else {
            byte >> 4
        }
    }

    /// Sets a pixel of the sprite sheet
    pub fn sset(&mut self, x: i32, y: i32, color: Option<u8>) {
        if !on_surface(x, y, SHEET_SIZE) {
            return;
        }
        let color = self.ink(color);
        let addr = nibble_addr(Region::Sprites.start(), x, y);
        let byte = self.mem.peek(addr);
        self.mem.poke(
            addr,
            if x & 1 == 0 {
                (byte & 0xf0) | color
            } else {
                (byte & 0x0f) | color << 4
            },
        );
    }

    /// Draws `w` by `h` sprites starting at sprite `n`. Color 0 is transparent.
    #[allow(clippy::too_many_arguments)]
    pub fn spr(&mut self, n: i32, x: i32, y: i32, w: i32, h: i32, flip_x: bool, flip_y: bool) {
        let (sheet_x, sheet_y) = ((n & 0xf) * 8, (n >> 4 & 0xf) * 8);
        let (width, height) = (w.clamp(0, 16) * 8, h.clamp(0, 16) * 8);
        for dy in 0..height {
            for dx in 0..width {
                let sx = if flip_x { width - 1 - dx } else { dx };
                let sy = if flip_y { height - 1 - dy } else { dy };
                let color = self.sget(sheet_x + sx, sheet_y + sy);
                if color != 0 {
                    self.pset(x + dx, y + dy, Some(color));
                }
            }
        }
    }

    /// Gets the flag byte of sprite `n`
    pub fn fget(&self, n: i32) -> u8 {
        match usize::try_from(n) {
            Ok(n) if n < 0x100 => self.mem.peek(Region::Flags.start() + n),
            _ => 0,
        }
    }

    /// Sets the flag byte of sprite `n`
    pub fn fset(&mut self, n: i32, flags: u8) {
        if let Ok(n @ 0..=0xff) = usize::try_from(n) {
            self.mem.poke(Region::Flags.start() + n, flags);
        }
    }

    /// Address of map cell (x, y); rows 32 and up share memory with the sprite sheet
    fn cell_addr(x: i32, y: i32) -> Option<usize> {
        if !(0..MAP_WIDTH).contains(&x) || !(0..MAP_HEIGHT).contains(&y) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(if y < 32 {
            Region::Map.start() + y * 128 + x
        } else {
            Region::Shared.start() + (y - 32) * 128 + x
        })
    }

    /// Gets the sprite number in map cell (x, y), or 0 outside the map
    pub fn mget(&self, x: i32, y: i32) -> u8 {
        Self::cell_addr(x, y).map_or(0, |addr| self.mem.peek(addr))
    }

    /// Sets the sprite number in map cell (x, y)
    pub fn mset(&mut self, x: i32, y: i32, n: u8) {
        if let Some(addr) = Self::cell_addr(x, y) {
            self.mem.poke(addr, n);
        }
    }

    /// Draws a `w` by `h` block of map cells with its top-left at screen (sx, sy)
    ///
    /// Cells holding sprite 0 are skipped, as are cells whose sprite flags
    /// don't include every bit of a nonzero `layer`.
    #[allow(clippy::too_many_arguments)]
    pub fn map(&mut self, cx: i32, cy: i32, sx: i32, sy: i32, w: i32, h: i32, layer: u8) {
        for row in 0..h.clamp(0, MAP_HEIGHT) {
            for col in 0..w.clamp(0, MAP_WIDTH) {
                let n = self.mget(cx + col, cy + row);
                if n == 0 || self.fget(n as i32) & layer != layer {
                    continue;
                }
                self.spr(n as i32, sx + col * 8, sy + row * 8, 1, 1, false, false);
            }
        }
    }
}
