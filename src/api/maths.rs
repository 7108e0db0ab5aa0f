// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Numeric natives

use super::{Args, Native, Value};
use crate::{fix32::Fix32, vm::Machine};

pub(super) const NATIVES: &[(&str, Native)] = &[
    ("max", max),
    ("min", min),
    ("mid", mid),
    ("flr", flr),
    ("ceil", ceil),
    ("abs", abs),
    ("sgn", sgn),
    ("sqrt", sqrt),
    ("sin", sin),
    ("cos", cos),
    ("atan2", atan2),
    ("rnd", rnd),
    ("srand", srand),
    ("band", band),
    ("bor", bor),
    ("bxor", bxor),
    ("bnot", bnot),
    ("shl", shl),
    ("shr", shr),
    ("lshr", lshr),
    ("rotl", rotl),
    ("rotr", rotr),
];

/// Generates natives that map one argument through a [Fix32] method
macro_rules! unary {
    ($($name:ident => $f:expr),* $(,)?) => {$(
        fn $name(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
            let f: fn(Fix32) -> Fix32 = $f;
            vec![f(args.num(0)).into()]
        }
    )*};
}

/// Generates natives that combine two arguments
macro_rules! binary {
    ($($name:ident => $f:expr),* $(,)?) => {$(
        fn $name(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
            let f: fn(Fix32, Fix32) -> Fix32 = $f;
            vec![f(args.num(0), args.num(1)).into()]
        }
    )*};
}

unary! {
    flr => Fix32::floor,
    ceil => Fix32::ceil,
    abs => Fix32::abs,
    sgn => Fix32::sgn,
    sqrt => Fix32::sqrt,
    sin => Fix32::sin,
    cos => Fix32::cos,
    bnot => |x| !x,
}

binary! {
    max => Fix32::max,
    min => Fix32::min,
    atan2 => Fix32::atan2,
    band => |x, y| x & y,
    bor => |x, y| x | y,
    bxor => |x, y| x ^ y,
    shl => |x, y| x.shl(y.to_int()),
    shr => |x, y| x.shr(y.to_int()),
    lshr => |x, y| x.lshr(y.to_int()),
    rotl => |x, y| x.rotl(y.to_int()),
    rotr => |x, y| x.rotr(y.to_int()),
}

fn mid(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vec![args.num(0).mid(args.num(1), args.num(2)).into()]
}

/// `rnd([x])` is a number in `0..x` (default 1); `rnd(table)` picks an element
fn rnd(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    match args.arg(0) {
        Value::Table(table) if table.is_empty() => vec![],
        Value::Table(table) => {
            let len = Fix32::from_int(table.len() as i32);
            let index = vm.rng.rnd(len).to_int() as usize;
            table.get(index).cloned().into_iter().collect()
        }
        _ => {
            let range = args.num_or(0, Fix32::ONE);
            vec![vm.rng.rnd(range).into()]
        }
    }
}

fn srand(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vm.rng.seed(args.num(0).to_bits() as u32);
    vec![]
}
