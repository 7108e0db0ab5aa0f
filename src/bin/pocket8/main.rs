// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! pocket8: a fantasy console, in a window
//!
//! Left and right pick a cartridge, Enter runs it, Escape stops it.

mod error;
mod ui;

use error::Result;
use gumdrop::*;
use owo_colors::OwoColorize;
use pocket8::prelude::{Library, Session, State as Mode};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use ui::*;

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    logger(options.log.as_deref()).init();
    let state = match State::new(options) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e.bold().red());
            std::process::exit(1);
        }
    };
    for result in state {
        if let Err(e) = result {
            eprintln!("{}", e.bold().red());
            break;
        }
    }
    Ok(())
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

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Directory to look for .p8.png cartridges in.", free)]
    pub dir: Option<PathBuf>,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Run a plaintext script file at startup (7 reruns it).", meta = "FILE")]
    pub script: Option<PathBuf>,
    #[options(help = "Set the window scale.", default = "4", meta = "N")]
    pub scale: usize,
    #[options(help = "Set the target framerate.", default = "60", meta = "FR")]
    pub frame_rate: u64,
    #[options(help = "Set the log filter, overriding RUST_LOG.", meta = "LEVEL")]
    pub log: Option<String>,
}

#[derive(Debug)]
struct State {
    pub rate: u64,
    pub script: Option<PathBuf>,
    pub session: Session,
    pub ui: UI,
    pub ft: Instant,
}

impl State {
    fn new(options: Arguments) -> Result<Self> {
        let dir = options.dir.unwrap_or_else(|| PathBuf::from("carts"));
        let mut state = State {
            rate: options.frame_rate.max(1),
            script: options.script,
            session: Session::inert(Library::scan(dir)?)?,
            ui: UIBuilder::new(options.scale).build()?,
            ft: Instant::now(),
        };
        state.run_script()?;
        Ok(state)
    }
    fn run_script(&mut self) -> Result<()> {
        if let Some(path) = &self.script {
            log::info!("running script {}", path.display());
            let code = std::fs::read(path)?;
            self.session.run_source(&code);
        }
        Ok(())
    }
    /// Handles key presses. Returns false when it's time to quit.
    fn keys(&mut self) -> Result<bool> {
        for action in self.ui.keys() {
            match (self.session.state(), action) {
                (Mode::Browsing, Action::Prev) => self.session.select_prev(),
                (Mode::Browsing, Action::Next) => self.session.select_next(),
                (Mode::Browsing, Action::Confirm) => {
                    self.session.confirm();
                }
                (Mode::Browsing, Action::Script) => self.run_script()?,
                (Mode::Browsing, Action::Back) => return Ok(false),
                (Mode::Running, Action::Back) => self.session.cancel(),
                _ => (),
            }
        }
        Ok(true)
    }
    fn frame(&mut self) -> Result<bool> {
        self.session.tick(&mut self.ui)?;
        self.ui.show()
    }
    fn wait_for_next_frame(&mut self) {
        let rate = Duration::from_nanos(1_000_000_000 / self.rate + 1);
        std::thread::sleep(rate.saturating_sub(self.ft.elapsed()));
        self.ft += rate;
    }
}

impl Iterator for State {
    type Item = Result<()>;

    /// One frame per item, until the window closes
    fn next(&mut self) -> Option<Self::Item> {
        self.wait_for_next_frame();
        match self.keys() {
            Ok(false) => return None,
            Err(e) => return Some(Err(e)),
            _ => (),
        }
        match self.frame() {
            Ok(false) => return None,
            Err(e) => return Some(Err(e)),
            _ => (),
        }
        Some(Ok(()))
    }
}
