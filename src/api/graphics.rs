// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Drawing natives

use super::{Args, Native, Value};
use crate::{mem::reg, vm::Machine};

pub(super) const NATIVES: &[(&str, Native)] = &[
    ("pset", pset),
    ("pget", pget),
    ("line", line),
    ("rect", rect),
    ("rectfill", rectfill),
    ("circ", circ),
    ("circfill", circfill),
    ("oval", oval),
    ("ovalfill", ovalfill),
    ("cls", cls),
    ("color", color),
    ("fillp", fillp),
    ("cursor", cursor),
    ("print", print),
    ("spr", spr),
    ("sget", sget),
    ("sset", sset),
    ("mget", mget),
    ("mset", mset),
    ("fget", fget),
    ("fset", fset),
    ("map", map),
];

/// Resolves an optional color argument. An explicit color becomes the pen color.
fn pen(vm: &mut Machine, args: &[Value], i: usize) -> Option<u8> {
    match args.arg(i) {
        Value::Nil => None,
        value => {
            let color = value.int() as u8 & 0xf;
            vm.color(color);
            Some(color)
        }
    }
}

fn pset(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let color = pen(vm, args, 2);
    vm.pset(args.int(0), args.int(1), color);
    vec![]
}

fn pget(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vec![vm.pget(args.int(0), args.int(1)).into()]
}

fn line(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let color = pen(vm, args, 4);
    vm.line(args.int(0), args.int(1), args.int(2), args.int(3), color);
    vec![]
}

fn rect(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let color = pen(vm, args, 4);
    vm.rect(args.int(0), args.int(1), args.int(2), args.int(3), color);
    vec![]
}

fn rectfill(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let color = pen(vm, args, 4);
    vm.rectfill(args.int(0), args.int(1), args.int(2), args.int(3), color);
    vec![]
}

fn circ(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let color = pen(vm, args, 3);
    vm.circ(args.int(0), args.int(1), args.int_or(2, 4), color);
    vec![]
}

fn circfill(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let color = pen(vm, args, 3);
    vm.circfill(args.int(0), args.int(1), args.int_or(2, 4), color);
    vec![]
}

fn oval(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let color = pen(vm, args, 4);
    vm.oval(args.int(0), args.int(1), args.int(2), args.int(3), color);
    vec![]
}

fn ovalfill(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let color = pen(vm, args, 4);
    vm.ovalfill(args.int(0), args.int(1), args.int(2), args.int(3), color);
    vec![]
}

fn cls(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vm.cls(args.int(0) as u8);
    vec![]
}

/// Sets the pen color, returning the old one
fn color(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let old = vm.mem.peek(reg::PEN);
    vm.color(args.int_or(0, 6) as u8);
    vec![old.into()]
}

/// Sets the fill pattern, returning the old one
fn fillp(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let old = vm.mem.peek2(reg::FILL_PATTERN);
    vm.fillp(args.int(0) as u16);
    vec![(old as i16 as i32).into()]
}

fn cursor(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let (x, y) = (vm.mem.peek(reg::CURSOR_X), vm.mem.peek(reg::CURSOR_Y));
    pen(vm, args, 2);
    vm.cursor(args.int(0), args.int(1));
    vec![x.into(), y.into()]
}

/// `print(text, [x, y], [color])` or `print(text, color)`
fn print(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let text = match args.arg(0) {
        Value::Nil if args.is_empty() => vec![],
        value => value.to_text(),
    };
    let (at, color) = if args.len() == 2 {
        (None, pen(vm, args, 1))
    } else {
        let at = match (args.arg(1), args.arg(2)) {
            (Value::Nil, _) | (_, Value::Nil) => None,
            (x, y) => Some((x.int(), y.int())),
        };
        (at, pen(vm, args, 3))
    };
    vec![vm.print(&text, at, color).into()]
}

fn spr(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vm.spr(
        args.int(0),
        args.int(1),
        args.int(2),
        args.int_or(3, 1),
        args.int_or(4, 1),
        args.arg(5).truthy(),
        args.arg(6).truthy(),
    );
    vec![]
}

fn sget(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vec![vm.sget(args.int(0), args.int(1)).into()]
}

fn sset(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let color = pen(vm, args, 2);
    vm.sset(args.int(0), args.int(1), color);
    vec![]
}

fn mget(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vec![vm.mget(args.int(0), args.int(1)).into()]
}

fn mset(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vm.mset(args.int(0), args.int(1), args.int(2) as u8);
    vec![]
}

/// `fget(n)` gets the flag byte, `fget(n, f)` tests flag `f`
fn fget(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let flags = vm.fget(args.int(0));
    match args.arg(1) {
        Value::Nil => vec![flags.into()],
        f => vec![(flags >> (f.int() & 7) & 1 != 0).into()],
    }
}

/// `fset(n, flags)` sets the flag byte, `fset(n, f, on)` sets flag `f`
fn fset(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let n = args.int(0);
    let flags = if args.len() >= 3 {
        let bit = 1 << (args.int(1) & 7);
        if args.arg(2).truthy() {
            vm.fget(n) | bit
        } else {
            vm.fget(n) & !bit
        }
    } else {
        args.int(1) as u8
    };
    vm.fset(n, flags);
    vec![]
}

fn map(vm: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vm.map(
        args.int(0),
        args.int(1),
        args.int(2),
        args.int(3),
        args.int_or(4, 128),
        args.int_or(5, 64),
        args.int(6) as u8,
    );
    vec![]
}
