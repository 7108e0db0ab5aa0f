// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Native functions exposed to the scripting engine
//!
//! An [Api] is a table of named [Native]s. The engine looks natives up by name
//! when the cartridge calls one, converts the script's arguments into [Value]s,
//! and converts the returned [Value]s back.

#[cfg(test)]
mod tests;

mod graphics;
mod maths;
mod memory;
mod strings;
mod system;

use crate::{
    error::{Error, Result},
    fix32::Fix32,
    vm::Machine,
};
use std::{collections::BTreeMap, fmt::Debug};

/// A native function. Arguments are mutable so table helpers can edit tables in place.
pub type Native = fn(&mut Machine, &mut [Value]) -> Vec<Value>;

/// A script value, as seen by native functions
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Nothing, or a missing argument
    #[default]
    Nil,
    /// `true` or `false`
    Bool(bool),
    /// The console's only number type
    Num(Fix32),
    /// A byte string
    Str(Vec<u8>),
    /// A sequence, indexed from 1 by scripts
    Table(Vec<Value>),
}

static NIL: Value = Value::Nil;

impl Value {
    /// Coerces to a number. Numeric strings parse; anything else is `0`.
    pub fn num(&self) -> Fix32 {
        match self {
            Value::Num(n) => *n,
            Value::Bool(b) => (*b).into(),
            Value::Str(s) => std::str::from_utf8(s)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            Value::Nil | Value::Table(_) => Fix32::ZERO,
        }
    }

    /// Coerces to an integer, rounding down
    pub fn int(&self) -> i32 {
        self.num().to_int()
    }

    /// Coerces to an address. Script addresses are 16 bits wide.
    pub fn addr(&self) -> usize {
        self.int() as u16 as usize
    }

    /// `false` only for `nil` and `false`
    pub fn truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// True for [Value::Nil]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Renders the value the way `tostr` does without flags
    pub fn to_text(&self) -> Vec<u8> {
        match self {
            Value::Nil => b"[nil]".to_vec(),
            Value::Bool(b) => b.to_string().into_bytes(),
            Value::Num(n) => n.to_string().into_bytes(),
            Value::Str(s) => s.clone(),
            Value::Table(_) => b"[table]".to_vec(),
        }
    }
}

impl From<Fix32> for Value {
    fn from(value: Fix32) -> Self {
        Value::Num(value)
    }
}
impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Num(Fix32::from_int(value))
    }
}
impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Num(value.into())
    }
}
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.as_bytes().to_vec())
    }
}
impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Str(value)
    }
}
impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Table(value)
    }
}

/// Positional argument access with the console's defaults
pub trait Args {
    /// Gets argument `i`, or [Value::Nil] if it wasn't passed
    fn arg(&self, i: usize) -> &Value;
    /// Gets argument `i` as a number
    fn num(&self, i: usize) -> Fix32 {
        self.arg(i).num()
    }
    /// Gets argument `i` as a number, or `default` if it is nil
    fn num_or(&self, i: usize, default: Fix32) -> Fix32 {
        match self.arg(i) {
            Value::Nil => default,
            value => value.num(),
        }
    }
    /// Gets argument `i` as an integer
    fn int(&self, i: usize) -> i32 {
        self.arg(i).int()
    }
    /// Gets argument `i` as an integer, or `default` if it is nil
    fn int_or(&self, i: usize, default: i32) -> i32 {
        match self.arg(i) {
            Value::Nil => default,
            value => value.int(),
        }
    }
    /// Gets argument `i` as an address
    fn addr(&self, i: usize) -> usize {
        self.arg(i).addr()
    }
}

impl Args for [Value] {
    fn arg(&self, i: usize) -> &Value {
        self.get(i).unwrap_or(&NIL)
    }
}

/// The table of natives handed to a scripting engine
#[derive(Clone)]
pub struct Api {
    natives: BTreeMap<&'static str, Native>,
}

impl Api {
    /// Constructs an [Api] with every built-in native registered
    /// # Examples
    /// ```rust
    /// # use pocket8::prelude::*;
    /// let api = Api::new();
    /// let mut vm = Machine::new();
    /// let out = api.call(&mut vm, "flr", &mut [Value::Num(Fix32::from_bits(0x18000))]).unwrap();
    /// assert_eq!(vec![Value::Num(Fix32::ONE)], out);
    /// ```
    pub fn new() -> Self {
        let mut api = Self::empty();
        for table in [
            graphics::NATIVES,
            memory::NATIVES,
            maths::NATIVES,
            strings::NATIVES,
            system::NATIVES,
        ] {
            for &(name, native) in table {
                api.register(name, native);
            }
        }
        api
    }

    /// Constructs an [Api] with no natives
    pub fn empty() -> Self {
        Api {
            natives: BTreeMap::new(),
        }
    }

    /// Registers a native, replacing any previous one with the same name
    pub fn register(&mut self, name: &'static str, native: Native) -> &mut Self {
        self.natives.insert(name, native);
        self
    }

    /// Looks up a native by name
    pub fn get(&self, name: &str) -> Option<Native> {
        self.natives.get(name).copied()
    }

    /// Calls a native by name
    pub fn call(&self, vm: &mut Machine, name: &str, args: &mut [Value]) -> Result<Vec<Value>> {
        let native = self.get(name).ok_or_else(|| Error::MissingNative {
            name: name.to_owned(),
        })?;
        Ok(native(vm, args))
    }

    /// Every registered name, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.natives.keys().copied()
    }

    /// The number of registered natives
    pub fn len(&self) -> usize {
        self.natives.len()
    }

    /// True if no natives are registered
    pub fn is_empty(&self) -> bool {
        self.natives.is_empty()
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
