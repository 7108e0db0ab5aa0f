// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Memory natives. Every address is reduced to 16 bits first.

use super::{Args, Native, Value};
use crate::{cart::ROM_SIZE, fix32::Fix32, vm::Machine};

pub(super) const NATIVES: &[(&str, Native)] = &[
    ("peek", peek),
    ("poke", poke),
    ("peek2", peek2),
    ("poke2", poke2),
    ("peek4", peek4),
    ("poke4", poke4),
    ("memcpy", memcpy),
    ("memset", memset),
    ("reload", reload),
];

/// Most bytes a single `peek` may return
const MAX_PEEK: i32 = 8192;

/// Reads a byte, or `n` consecutive bytes as `n` values
fn peek(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let addr = args.addr(0);
    let n = args.int_or(1, 1).clamp(0, MAX_PEEK) as usize;
    (addr..addr + n).map(|a| vm.mem.peek(a).into()).collect()
}

/// Writes each argument after the address to consecutive bytes
fn poke(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let addr = args.addr(0);
    for (offset, value) in args.iter().skip(1).enumerate() {
        vm.mem.poke(addr + offset, value.int() as u8);
    }
    vec![]
}

/// Reads a signed 16-bit integer
fn peek2(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vec![(vm.mem.peek2(args.addr(0)) as i16 as i32).into()]
}

fn poke2(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vm.mem.poke2(args.addr(0), args.int(1) as u16);
    vec![]
}

/// Reads the raw bits of a number
fn peek4(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vec![Fix32::from_bits(vm.mem.peek4(args.addr(0)) as i32).into()]
}

fn poke4(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vm.mem.poke4(args.addr(0), args.num(1).to_bits() as u32);
    vec![]
}

fn memcpy(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let len = args.int(2).max(0) as usize;
    vm.mem.memcpy(args.addr(0), args.addr(1), len);
    vec![]
}

fn memset(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let len = args.int(2).max(0) as usize;
    vm.mem.memset(args.addr(0), args.int(1) as u8, len);
    vec![]
}

/// `reload([dst], [src], [len])` copies from the cartridge ROM
fn reload(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let len = args.int_or(2, ROM_SIZE as i32).max(0) as usize;
    vm.reload(args.addr(0), args.addr(1), len);
    vec![]
}
