// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The browse/run lifecycle of the console
//!
//! A [Session] starts out [Browsing](State::Browsing) the cartridge [Library],
//! showing the selected cartridge's label. Confirming a cartridge loads its
//! ROM and code and switches to [Running](State::Running), where every
//! [Session::tick] runs one frame of the cartridge. Cancelling goes back.

use crate::{
    api::Api,
    cart::{Cartridge, Library},
    engine::{Engine, EntryPoint, Inert},
    error::{Error, Result},
    vm::Machine,
};
use std::fmt::{Debug, Display, Formatter};

/// Builds a fresh engine bound to an [Api]
pub type Binder = Box<dyn FnMut(&Api) -> Result<Box<dyn Engine>>>;

/// What the session is doing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    /// Showing the cartridge menu
    #[default]
    Browsing,
    /// Running a cartridge
    Running,
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            State::Browsing => "browsing",
            State::Running => "running",
        })
    }
}

/// The host's side of the session: puts pictures on a screen
pub trait Present {
    /// Error type of the host's display layer
    type Error;
    /// Shows the menu entry for a cartridge
    fn thumbnail(&mut self, cart: &Cartridge) -> std::result::Result<(), Self::Error>;
    /// Shows the machine's framebuffer
    fn frame(&mut self, vm: &Machine) -> std::result::Result<(), Self::Error>;
    /// Replaces the menu entry when the selected cartridge couldn't be loaded
    fn unreadable(&mut self, name: &str) -> std::result::Result<(), Self::Error>;
}

/// One console, its cartridge library, and the engine running cartridge code
pub struct Session {
    library: Library,
    selection: usize,
    /// The selection whose thumbnail is on screen
    shown: Option<usize>,
    cart: Option<Cartridge>,
    state: State,
    machine: Machine,
    api: Api,
    engine: Box<dyn Engine>,
    binder: Binder,
}

impl Session {
    /// Starts a session on the first cartridge of `library`
    ///
    /// Failing to load that cartridge, or to bind the engine, is an error.
    pub fn new(library: Library, mut binder: Binder) -> Result<Self> {
        if library.is_empty() {
            return Err(Error::NoCartridges {
                dir: library.dir().to_owned(),
            });
        }
        let cart = library.load(0)?;
        let api = Api::new();
        let engine = binder(&api)?;
        log::info!("engine bound: {engine:?}");
        Ok(Session {
            library,
            selection: 0,
            shown: None,
            cart: Some(cart),
            state: State::Browsing,
            machine: Machine::new(),
            api,
            engine,
            binder,
        })
    }

    /// Starts a session that runs no cartridge code
    pub fn inert(library: Library) -> Result<Self> {
        Self::new(library, Box::new(|_| Ok(Box::new(Inert))))
    }

    /// What the session is doing
    pub fn state(&self) -> State {
        self.state
    }
    /// Index of the selected cartridge in the [Library]
    pub fn selection(&self) -> usize {
        self.selection
    }
    /// The selected cartridge, if it loaded
    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cart.as_ref()
    }
    /// The cartridges on offer
    pub fn library(&self) -> &Library {
        &self.library
    }
    /// The console
    pub fn machine(&self) -> &Machine {
        &self.machine
    }
    /// The console, mutably
    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }
    /// The natives the engine is bound to
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Selects the next cartridge, wrapping around
    pub fn select_next(&mut self) {
        let next = (self.selection + 1) % self.library.len();
        self.select(next);
    }

    /// Selects the previous cartridge, wrapping around
    pub fn select_prev(&mut self) {
        let len = self.library.len();
        self.select((self.selection + len - 1) % len);
    }

    fn select(&mut self, index: usize) {
        if self.state != State::Browsing {
            return;
        }
        // release the old cartridge before loading the new one
        self.cart = None;
        self.selection = index;
        self.cart = match self.library.load(index) {
            Ok(cart) => Some(cart),
            Err(e) => {
                log::warn!("couldn't load {}: {e}", self.library.display_name(index));
                None
            }
        };
    }

    /// Runs the selected cartridge. Returns false if it can't be run.
    ///
    /// The cartridge is refused if it failed to load or its code is corrupt.
    pub fn confirm(&mut self) -> bool {
        if self.state != State::Browsing {
            return false;
        }
        let Some(cart) = &self.cart else {
            log::warn!("nothing to run: {}", Error::NoSelection);
            return false;
        };
        if cart.is_corrupt() {
            log::warn!(
                "refusing to run corrupt cartridge {}",
                self.library.display_name(self.selection)
            );
            return false;
        }
        let code = cart.code().to_vec();
        self.machine.reset();
        self.machine.insert(cart);
        self.start(&code);
        true
    }

    /// Runs a plaintext script with no cartridge ROM
    pub fn run_source(&mut self, code: &[u8]) {
        self.machine.reset();
        self.start(code);
    }

    /// Loads code into the engine, calls `_init`, and starts running
    fn start(&mut self, code: &[u8]) {
        if let Err(e) = self.engine.load(&mut self.machine, &self.api, code) {
            log::error!("couldn't load code: {e}");
        }
        if self.engine.has_entry_point(EntryPoint::Init) {
            self.call(EntryPoint::Init);
        }
        self.state = State::Running;
        log::info!("session {}", self.state);
    }

    /// Stops the running cartridge and returns to the menu
    ///
    /// The engine is rebound from scratch and memory is zeroed.
    pub fn cancel(&mut self) {
        if self.state != State::Running {
            return;
        }
        match (self.binder)(&self.api) {
            Ok(engine) => self.engine = engine,
            Err(e) => log::error!("couldn't rebind engine, keeping the old one: {e}"),
        }
        self.machine.reset();
        self.state = State::Browsing;
        // the menu needs redrawing over the last frame
        self.shown = None;
        log::info!("session {}", self.state);
    }

    /// Advances one frame
    ///
    /// While browsing, the thumbnail is only presented when the selection
    /// changed. A selection that failed to load is presented as unreadable.
    /// While running, the update and draw entry points are called
    /// and the framebuffer is presented.
    pub fn tick<P: Present>(&mut self, present: &mut P) -> std::result::Result<(), P::Error> {
        match self.state {
            State::Browsing => {
                if self.shown == Some(self.selection) {
                    return Ok(());
                }
                self.shown = Some(self.selection);
                match &self.cart {
                    Some(cart) => present.thumbnail(cart),
                    None => present.unreadable(self.library.display_name(self.selection)),
                }
            }
            State::Running => {
                if self.engine.has_entry_point(EntryPoint::Update60) {
                    self.call(EntryPoint::Update60);
                } else if self.engine.has_entry_point(EntryPoint::Update) {
                    self.call(EntryPoint::Update);
                }
                if self.engine.has_entry_point(EntryPoint::Draw) {
                    self.call(EntryPoint::Draw);
                }
                present.frame(&self.machine)
            }
        }
    }

    /// Calls an entry point, logging any error it raises
    fn call(&mut self, entry: EntryPoint) {
        if let Err(e) = self.engine.call(&mut self.machine, &self.api, entry) {
            log::error!("{entry}: {e}");
        }
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("library", &self.library)
            .field("selection", &self.selection)
            .field("cart", &self.cart)
            .field("state", &self.state)
            .field("machine", &self.machine)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
