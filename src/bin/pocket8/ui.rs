// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(missing_docs)]
//! Window, keyboard and framebuffer plumbing for minifb

use crate::error::Result;
use minifb::*;
use pocket8::{
    gfx::SCREEN_SIZE,
    prelude::{Cartridge, Machine, Present},
};

/// Width and height of the window contents, in console pixels
pub const SIDE: usize = SCREEN_SIZE as usize;

#[derive(Clone, Debug)]
pub struct UIBuilder {
    pub name: &'static str,
    pub window_options: WindowOptions,
}

impl UIBuilder {
    pub fn new(scale: usize) -> Self {
        UIBuilder {
            window_options: WindowOptions {
                scale: scale_for(scale),
                ..Self::default().window_options
            },
            ..Default::default()
        }
    }
    pub fn build(&self) -> Result<UI> {
        let ui = UI {
            window: Window::new(self.name, SIDE, SIDE, self.window_options)?,
            keyboard: Default::default(),
            fb: Default::default(),
            name: self.name,
        };
        Ok(ui)
    }
}

impl Default for UIBuilder {
    fn default() -> Self {
        UIBuilder {
            name: "pocket8",
            window_options: WindowOptions {
                title: true,
                resize: false,
                scale: Scale::X4,
                scale_mode: ScaleMode::AspectRatioStretch,
                none: false,
                ..Default::default()
            },
        }
    }
}

/// Picks the nearest supported window scale at or below `scale`
pub fn scale_for(scale: usize) -> Scale {
    match scale {
        0 => Scale::FitScreen,
        1 => Scale::X1,
        2..=3 => Scale::X2,
        4..=7 => Scale::X4,
        8..=15 => Scale::X8,
        16..=31 => Scale::X16,
        _ => Scale::X32,
    }
}

/// The pixels most recently handed to the host
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBuffer {
    buffer: Vec<u32>,
}

impl FrameBuffer {
    /// Replaces the contents with a 128x128 image. Short images are padded with black.
    pub fn load(&mut self, pixels: &[u32]) {
        self.buffer.clear();
        self.buffer.extend(pixels.iter().take(SIDE * SIDE));
        self.buffer.resize(SIDE * SIDE, 0);
    }
    pub fn pixels(&self) -> &[u32] {
        &self.buffer
    }
    pub fn render(&self, window: &mut Window) -> Result<()> {
        window.update_with_buffer(&self.buffer, SIDE, SIDE)?;
        Ok(())
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer {
            buffer: vec![0; SIDE * SIDE],
        }
    }
}

/// What a key press asks the session to do
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Prev,
    Next,
    Confirm,
    Script,
    Back,
}

pub fn identify_key(key: Key) -> Option<Action> {
    match key {
        Key::Left | Key::A => Some(Action::Prev),
        Key::Right | Key::D => Some(Action::Next),
        Key::Enter | Key::Space | Key::Z => Some(Action::Confirm),
        Key::Key7 => Some(Action::Script),
        Key::Escape => Some(Action::Back),
        _ => None,
    }
}

#[derive(Debug)]
pub struct UI {
    window: Window,
    keyboard: Vec<Key>,
    fb: FrameBuffer,
    name: &'static str,
}

impl UI {
    /// Puts the framebuffer on screen. Returns false once the window closes.
    pub fn show(&mut self) -> Result<bool> {
        if !self.window.is_open() {
            return Ok(false);
        }
        self.fb.render(&mut self.window)?;
        Ok(true)
    }

    /// Gets the actions for keys pressed since the last call
    pub fn keys(&mut self) -> Vec<Action> {
        // minifb's get_keys_pressed misses keys between updates, so diff by hand
        let keys = self.window.get_keys();
        let actions = keys
            .iter()
            .filter(|key| !self.keyboard.contains(key))
            .filter_map(|&key| identify_key(key))
            .collect();
        self.keyboard = keys;
        actions
    }
}

impl Present for UI {
    type Error = crate::error::Error;

    fn thumbnail(&mut self, cart: &Cartridge) -> Result<()> {
        self.window.set_title(&format!(
            "{} [{}{}]",
            self.name,
            cart.format(),
            if cart.is_corrupt() { ", corrupt" } else { "" }
        ));
        self.fb.load(&cart.label());
        Ok(())
    }

    fn frame(&mut self, vm: &Machine) -> Result<()> {
        self.fb.load(&vm.frame_rgb());
        Ok(())
    }

    fn unreadable(&mut self, name: &str) -> Result<()> {
        self.window.set_title(&format!("{} [{name}: unreadable]", self.name));
        self.fb.load(&[]);
        Ok(())
    }
}
