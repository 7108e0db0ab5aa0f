// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! String and table natives
//!
//! Script-facing indices start at 1.

use super::{Args, Native, Value};
use crate::{fix32::Fix32, vm::Machine};

pub(super) const NATIVES: &[(&str, Native)] = &[
    ("tostr", tostr),
    ("tonum", tonum),
    ("chr", chr),
    ("ord", ord),
    ("sub", sub),
    ("split", split),
    ("add", add),
    ("del", del),
    ("deli", deli),
    ("count", count),
];

/// Parses a whole byte string as a number
fn parse(bytes: &[u8]) -> Option<Fix32> {
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

/// `tostr(v, [flags])`
///
/// | flags | number format        |
/// |:-----:|----------------------|
/// | 0     | `1.5`                |
/// | 1     | `0x0001.8000`        |
/// | 2     | raw bits as decimal  |
/// | 3     | `0x00018000`         |
fn tostr(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let flags = match args.arg(1) {
        Value::Bool(b) => *b as i32,
        Value::Num(n) => n.to_int(),
        _ => 0,
    };
    let text = match args.arg(0) {
        Value::Nil if args.is_empty() => vec![],
        Value::Num(n) if flags & 3 != 0 => {
            let bits = n.to_bits() as u32;
            let (int, frac) = (bits >> 16, bits & 0xffff);
            match flags & 3 {
                3 => format!("0x{int:04x}{frac:04x}"),
                2 => format!("{}", bits as i32),
                _ => format!("0x{int:04x}.{frac:04x}"),
            }
            .into_bytes()
        }
        value => value.to_text(),
    };
    vec![text.into()]
}

/// `tonum(v, [flags])`. Flag 1 reads raw hex digits, flag 2 drops the low 16 bits.
fn tonum(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    match args.arg(0) {
        Value::Str(s) => {
            let flags = args.int(1);
            if flags & 3 == 0 {
                return parse(s).map(Value::Num).into_iter().collect();
            }
            let bits = if flags & 1 != 0 {
                // anything that isn't a hex digit counts as zero
                s.iter().take(8).fold(0u32, |bits, &c| {
                    bits << 4 | (c as char).to_digit(16).unwrap_or(0)
                })
            } else {
                let digits: Vec<u8> = s
                    .iter()
                    .copied()
                    .skip_while(u8::is_ascii_whitespace)
                    .enumerate()
                    .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && c == b'-'))
                    .map(|(_, c)| c)
                    .collect();
                String::from_utf8_lossy(&digits).parse::<i64>().unwrap_or(0) as u32
            };
            let bits = if flags & 2 != 0 { bits >> 16 } else { bits };
            vec![Value::from(bits as i32)]
        }
        Value::Num(n) => vec![(*n).into()],
        Value::Bool(b) => vec![Fix32::from(*b).into()],
        _ => vec![],
    }
}

/// Builds a string from byte values
fn chr(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    vec![args.iter().map(|c| c.int() as u8).collect::<Vec<_>>().into()]
}

/// `ord(s, [i], [n])` gets `n` byte values starting at index `i`
fn ord(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let Value::Str(s) = args.arg(0) else {
        return vec![];
    };
    let start = args.int_or(1, 1) as i64 - 1;
    let count = args.int_or(2, 1) as i64;
    if start < 0 || start >= s.len() as i64 || count < 1 {
        return vec![];
    }
    s.iter()
        .skip(start as usize)
        .take(count as usize)
        .map(|&c| c.into())
        .collect()
}

/// `sub(s, i, [j])` gets bytes `i..=j`. Negative indices count from the end.
fn sub(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let text = args.arg(0).to_text();
    let len = text.len() as i64;
    let index = |i: i64| if i < 0 { len + i + 1 } else { i };
    let start = index(args.int_or(1, 1) as i64).max(1);
    let end = index(args.int_or(2, -1) as i64).min(len);
    if start > end {
        return vec![Value::Str(vec![])];
    }
    vec![text[start as usize - 1..end as usize].to_vec().into()]
}

/// `split(s, [sep], [convert])`
///
/// `sep` is a separator character (default `,`), `""` for single characters,
/// or a number for fixed-size chunks. Numeric pieces become numbers unless
/// `convert` is false.
fn split(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let text = match args.arg(0) {
        Value::Nil => return vec![],
        value => value.to_text(),
    };
    let convert = args.len() < 3 || args.arg(2).truthy();
    let pieces: Vec<&[u8]> = match args.arg(1) {
        Value::Num(size) => text.chunks(size.to_int().max(1) as usize).collect(),
        Value::Str(sep) => match sep.first() {
            Some(&sep) => text.split(|&c| c == sep).collect(),
            None => text.chunks(1).collect(),
        },
        _ => text.split(|&c| c == b',').collect(),
    };
    let table = pieces
        .into_iter()
        .map(|piece| match parse(piece) {
            Some(n) if convert => Value::Num(n),
            _ => piece.to_vec().into(),
        })
        .collect::<Vec<_>>();
    vec![table.into()]
}

/// `add(t, v, [i])` appends `v`, or inserts it at index `i`
fn add(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let value = args.arg(1).clone();
    let at = args.arg(2).clone();
    let Some(Value::Table(table)) = args.first_mut() else {
        return vec![];
    };
    match at {
        Value::Nil => table.push(value.clone()),
        at => {
            let index = (at.int() as i64 - 1).clamp(0, table.len() as i64) as usize;
            table.insert(index, value.clone());
        }
    }
    vec![value]
}

/// `del(t, v)` removes the first element equal to `v`
fn del(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let value = args.arg(1).clone();
    let Some(Value::Table(table)) = args.first_mut() else {
        return vec![];
    };
    match table.iter().position(|v| *v == value) {
        Some(index) => vec![table.remove(index)],
        None => vec![],
    }
}

/// `deli(t, [i])` removes the element at index `i`, or the last one
fn deli(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let at = args.arg(1).clone();
    let Some(Value::Table(table)) = args.first_mut() else {
        return vec![];
    };
    let index = match at {
        Value::Nil => table.len() as i64,
        at => at.int() as i64,
    };
    if (1..=table.len() as i64).contains(&index) {
        vec![table.remove(index as usize - 1)]
    } else {
        vec![]
    }
}

/// `count(t, [v])` counts the elements, or the elements equal to `v`
fn count(_: &mut Machine, args: &mut [Value]) -> Vec<Value> {
    let Value::Table(table) = args.arg(0) else {
        return vec![Value::from(0)];
    };
    let n = match args.arg(1) {
        Value::Nil if args.len() < 2 => table.len(),
        value => table.iter().filter(|v| *v == value).count(),
    };
    vec![(n as i32).into()]
}
