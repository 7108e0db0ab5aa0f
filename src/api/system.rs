// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Clock, checksum and diagnostic natives

use super::{Args, Native, Value};
use crate::{fix32::Fix32, vm::Machine};

pub(super) const NATIVES: &[(&str, Native)] = &[
    ("checksum", checksum),
    ("time", time),
    ("t", time),
    ("log", log),
    ("printh", log),
];

/// `checksum(addr, len)`: CRC-32 of memory, as raw bits
fn checksum(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let len = args.int(1).max(0) as usize;
    vec![Fix32::from_bits(vm.mem.crc32(args.addr(0), len) as i32).into()]
}

/// Seconds since the cartridge started
fn time(vm: &mut Machine, _: &mut [Value]) -> Vec<Value> {
    vec![vm.elapsed().into()]
}

/// Sends each argument to the log, space separated
fn log(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let text = args
        .iter()
        .map(|v| String::from_utf8_lossy(&v.to_text()).into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    log::info!(target: "pocket8::script", "{text}");
    vec![]
}
