// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Unit tests for [super::Api] and the built-in natives

use super::*;
use crate::mem::reg;

fn setup_environment() -> (Machine, Api) {
    (Machine::new(), Api::new())
}

fn num(bits: i32) -> Value {
    Value::Num(Fix32::from_bits(bits))
}

fn int(int: i32) -> Value {
    Value::from(int)
}

fn call(vm: &mut Machine, api: &Api, name: &str, mut args: Vec<Value>) -> Vec<Value> {
    api.call(vm, name, &mut args).expect("native should exist")
}

mod table {
    use super::*;
    #[test]
    fn every_native_registered() {
        let (_, api) = setup_environment();
        for name in [
            "pset", "pget", "line", "rect", "rectfill", "circ", "circfill", "oval", "ovalfill",
            "cls", "color", "fillp", "cursor", "print", "spr", "sget", "sset", "mget", "mset",
            "fget", "fset", "map", "peek", "poke", "peek2", "poke2", "peek4", "poke4", "memcpy",
            "memset", "reload", "max", "min", "mid", "flr", "ceil", "abs", "sgn", "sqrt", "sin",
            "cos", "atan2", "rnd", "srand", "band", "bor", "bxor", "bnot", "shl", "shr", "lshr",
            "rotl", "rotr", "tostr", "tonum", "chr", "ord", "sub", "split", "add", "del", "deli",
            "count", "checksum", "time", "t", "log", "printh",
        ] {
            assert!(api.get(name).is_some(), "{name} is missing");
        }
    }
    #[test]
    fn missing_native() {
        let (mut vm, api) = setup_environment();
        assert!(matches!(
            api.call(&mut vm, "launch_missiles", &mut []),
            Err(Error::MissingNative { name }) if name == "launch_missiles"
        ));
    }
    #[test]
    fn register_replaces() {
        fn seven(_: &mut Machine, _: &mut [Value]) -> Vec<Value> {
            vec![int(7)]
        }
        let (mut vm, mut api) = setup_environment();
        let before = api.len();
        api.register("flr", seven);
        assert_eq!(before, api.len());
        assert_eq!(vec![int(7)], call(&mut vm, &api, "flr", vec![]));
    }
    #[test]
    fn empty() {
        let api = Api::empty();
        assert!(api.is_empty());
        assert_eq!(0, api.names().count());
    }
}

mod values {
    use super::*;
    #[test]
    fn coercions() {
        assert_eq!(Fix32::ZERO, Value::Nil.num());
        assert_eq!(Fix32::ONE, Value::Bool(true).num());
        assert_eq!(Fix32::from_int(12), Value::from("12").num());
        assert_eq!(Fix32::ZERO, Value::from("twelve").num());
        assert_eq!(Fix32::ZERO, Value::Table(vec![]).num());
    }
    #[test]
    fn addresses_wrap_to_16_bits() {
        assert_eq!(0xffff, int(-1).addr());
        assert_eq!(0x0000, int(0x10000).addr());
    }
    #[test]
    fn truthiness() {
        assert!(!Value::Nil.truthy());
        assert!(!Value::Bool(false).truthy());
        assert!(int(0).truthy());
        assert!(Value::from("").truthy());
    }
}

mod graphics {
    use super::*;
    #[test]
    fn explicit_color_sets_pen() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "pset", vec![int(1), int(1), int(9)]);
        assert_eq!(9, vm.mem.peek(reg::PEN));
        call(&mut vm, &api, "pset", vec![int(2), int(1)]);
        assert_eq!(vec![int(9)], call(&mut vm, &api, "pget", vec![int(2), int(1)]));
    }
    #[test]
    fn color_returns_previous() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "color", vec![int(3)]);
        assert_eq!(vec![int(3)], call(&mut vm, &api, "color", vec![]));
        assert_eq!(6, vm.mem.peek(reg::PEN));
    }
    #[test]
    fn print_with_color_only() {
        let (mut vm, api) = setup_environment();
        let out = call(&mut vm, &api, "print", vec![Value::from("ab"), int(8)]);
        assert_eq!(vec![int(8)], out);
        assert_eq!(8, vm.mem.peek(reg::PEN));
        assert_eq!(6, vm.mem.peek(reg::CURSOR_Y));
    }
    #[test]
    fn fset_single_flag() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "fset", vec![int(2), int(3), Value::Bool(true)]);
        assert_eq!(vec![int(8)], call(&mut vm, &api, "fget", vec![int(2)]));
        assert_eq!(
            vec![Value::Bool(true)],
            call(&mut vm, &api, "fget", vec![int(2), int(3)])
        );
        call(&mut vm, &api, "fset", vec![int(2), int(3), Value::Bool(false)]);
        assert_eq!(vec![int(0)], call(&mut vm, &api, "fget", vec![int(2)]));
    }
    #[test]
    fn cls_defaults_to_black() {
        let (mut vm, api) = setup_environment();
        vm.cls(7);
        call(&mut vm, &api, "cls", vec![]);
        assert!(vm.mem.get_region(crate::mem::Region::Screen).iter().all(|&b| b == 0));
    }
}

mod memory {
    use super::*;
    #[test]
    fn peek_many() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "poke", vec![int(0x4300), int(1), int(2), int(3)]);
        assert_eq!(
            vec![int(1), int(2), int(3)],
            call(&mut vm, &api, "peek", vec![int(0x4300), int(3)])
        );
    }
    #[test]
    fn peek2_is_signed() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "poke2", vec![int(0x4300), int(-2)]);
        assert_eq!(vec![int(-2)], call(&mut vm, &api, "peek2", vec![int(0x4300)]));
        assert_eq!(0xfffe, vm.mem.peek2(0x4300));
    }
    #[test]
    fn peek4_raw_bits() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "poke4", vec![int(0x4300), num(0x0001_8000)]);
        assert_eq!(0x0001_8000, vm.mem.peek4(0x4300));
        assert_eq!(vec![num(0x0001_8000)], call(&mut vm, &api, "peek4", vec![int(0x4300)]));
    }
    #[test]
    fn negative_address_wraps() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "poke", vec![int(-1), int(0x42)]);
        assert_eq!(0x42, vm.mem.peek(0xffff));
    }
    #[test]
    fn memset_and_memcpy() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "memset", vec![int(0x4300), int(0xaa), int(4)]);
        call(&mut vm, &api, "memcpy", vec![int(0x4400), int(0x4300), int(4)]);
        assert_eq!(0xaaaa_aaaa, vm.mem.peek4(0x4400));
        call(&mut vm, &api, "memset", vec![int(0x4300), int(0xbb), int(-4)]);
        assert_eq!(0xaa, vm.mem.peek(0x4300));
    }
    #[test]
    fn reload_restores_rom() {
        let (mut vm, api) = setup_environment();
        vm.mem.poke(0x10, 0x55);
        call(&mut vm, &api, "reload", vec![]);
        assert_eq!(0, vm.mem.peek(0x10));
    }
}

mod maths {
    use super::*;
    #[test]
    fn min_max_mid() {
        let (mut vm, api) = setup_environment();
        assert_eq!(vec![int(3)], call(&mut vm, &api, "max", vec![int(3), int(-2)]));
        assert_eq!(vec![int(-2)], call(&mut vm, &api, "min", vec![int(3), int(-2)]));
        assert_eq!(vec![int(2)], call(&mut vm, &api, "mid", vec![int(3), int(1), int(2)]));
        assert_eq!(vec![int(0)], call(&mut vm, &api, "max", vec![int(-1)]));
    }
    #[test]
    fn shifts() {
        let (mut vm, api) = setup_environment();
        assert_eq!(vec![int(4)], call(&mut vm, &api, "shl", vec![int(1), int(2)]));
        assert_eq!(vec![int(-1)], call(&mut vm, &api, "shr", vec![int(-4), int(2)]));
        assert_eq!(
            vec![num(0x3fff_c000)],
            call(&mut vm, &api, "lshr", vec![int(-1), int(2)])
        );
    }
    #[test]
    fn bitwise() {
        let (mut vm, api) = setup_environment();
        assert_eq!(vec![int(0b100)], call(&mut vm, &api, "band", vec![int(0b110), int(0b101)]));
        assert_eq!(vec![int(0b111)], call(&mut vm, &api, "bor", vec![int(0b110), int(0b101)]));
        assert_eq!(vec![int(0b011)], call(&mut vm, &api, "bxor", vec![int(0b110), int(0b101)]));
        assert_eq!(vec![num(!0)], call(&mut vm, &api, "bnot", vec![int(0)]));
    }
    #[test]
    fn rnd_stays_in_range() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "srand", vec![int(42)]);
        for _ in 0..100 {
            let out = call(&mut vm, &api, "rnd", vec![int(10)]);
            let n = out[0].num();
            assert!(n >= Fix32::ZERO && n < Fix32::from_int(10), "{n:?}");
        }
        assert_eq!(vec![int(0)], call(&mut vm, &api, "rnd", vec![int(0)]));
    }
    #[test]
    fn srand_repeats() {
        let (mut vm, api) = setup_environment();
        call(&mut vm, &api, "srand", vec![int(7)]);
        let first = call(&mut vm, &api, "rnd", vec![]);
        call(&mut vm, &api, "srand", vec![int(7)]);
        assert_eq!(first, call(&mut vm, &api, "rnd", vec![]));
        assert!(first[0].num() < Fix32::ONE);
    }
    #[test]
    fn rnd_table() {
        let (mut vm, api) = setup_environment();
        let table = Value::Table(vec![Value::from("x"), Value::from("y")]);
        let out = call(&mut vm, &api, "rnd", vec![table]);
        assert!(out == vec![Value::from("x")] || out == vec![Value::from("y")]);
        assert!(call(&mut vm, &api, "rnd", vec![Value::Table(vec![])]).is_empty());
    }
}

mod strings {
    use super::*;
    #[test]
    fn tostr_flags() {
        let (mut vm, api) = setup_environment();
        let x = num(0x0001_8000);
        assert_eq!(vec![Value::from("1.5")], call(&mut vm, &api, "tostr", vec![x.clone()]));
        assert_eq!(
            vec![Value::from("0x0001.8000")],
            call(&mut vm, &api, "tostr", vec![x.clone(), Value::Bool(true)])
        );
        assert_eq!(
            vec![Value::from("98304")],
            call(&mut vm, &api, "tostr", vec![x.clone(), int(2)])
        );
        assert_eq!(
            vec![Value::from("0x00018000")],
            call(&mut vm, &api, "tostr", vec![x, int(3)])
        );
    }
    #[test]
    fn tostr_other_types() {
        let (mut vm, api) = setup_environment();
        assert_eq!(vec![Value::from("")], call(&mut vm, &api, "tostr", vec![]));
        assert_eq!(vec![Value::from("[nil]")], call(&mut vm, &api, "tostr", vec![Value::Nil]));
        assert_eq!(
            vec![Value::from("false")],
            call(&mut vm, &api, "tostr", vec![Value::Bool(false)])
        );
    }
    #[test]
    fn tonum_forms() {
        let (mut vm, api) = setup_environment();
        assert_eq!(vec![num(0x0001_8000)], call(&mut vm, &api, "tonum", vec![Value::from("1.5")]));
        assert_eq!(vec![int(0xff)], call(&mut vm, &api, "tonum", vec![Value::from("0xff")]));
        assert!(call(&mut vm, &api, "tonum", vec![Value::from("pico")]).is_empty());
        assert_eq!(
            vec![int(0xff)],
            call(&mut vm, &api, "tonum", vec![Value::from("ff"), int(1)])
        );
        assert_eq!(
            vec![int(1)],
            call(&mut vm, &api, "tonum", vec![Value::from("65536"), int(2)])
        );
        assert_eq!(
            vec![int(0xf0f)],
            call(&mut vm, &api, "tonum", vec![Value::from("fzf"), int(1)])
        );
    }
    #[test]
    fn chr_and_ord() {
        let (mut vm, api) = setup_environment();
        assert_eq!(
            vec![Value::from("hi")],
            call(&mut vm, &api, "chr", vec![int(104), int(105)])
        );
        assert_eq!(
            vec![int(105), int(33)],
            call(&mut vm, &api, "ord", vec![Value::from("hi!"), int(2), int(5)])
        );
        assert!(call(&mut vm, &api, "ord", vec![Value::from("hi"), int(3)]).is_empty());
    }
    #[test]
    fn sub_indices() {
        let (mut vm, api) = setup_environment();
        let s = || Value::from("pocket");
        assert_eq!(vec![Value::from("ock")], call(&mut vm, &api, "sub", vec![s(), int(2), int(4)]));
        assert_eq!(vec![Value::from("et")], call(&mut vm, &api, "sub", vec![s(), int(-2)]));
        assert_eq!(vec![Value::from("")], call(&mut vm, &api, "sub", vec![s(), int(5), int(2)]));
        assert_eq!(vec![Value::from("pocket")], call(&mut vm, &api, "sub", vec![s(), int(-99)]));
    }
    #[test]
    fn split_default() {
        let (mut vm, api) = setup_environment();
        let out = call(&mut vm, &api, "split", vec![Value::from("1,b,,")]);
        assert_eq!(
            vec![Value::Table(vec![int(1), Value::from("b"), Value::from(""), Value::from("")])],
            out
        );
    }
    #[test]
    fn split_chunks_and_chars() {
        let (mut vm, api) = setup_environment();
        let out = call(
            &mut vm,
            &api,
            "split",
            vec![Value::from("12345"), int(2), Value::Bool(false)],
        );
        assert_eq!(
            vec![Value::Table(vec![Value::from("12"), Value::from("34"), Value::from("5")])],
            out
        );
        let out = call(&mut vm, &api, "split", vec![Value::from("ab"), Value::from("")]);
        assert_eq!(vec![Value::Table(vec![Value::from("a"), Value::from("b")])], out);
    }
    #[test]
    fn table_helpers() {
        let (mut vm, api) = setup_environment();
        let mut args = vec![Value::Table(vec![]), int(1)];
        api.call(&mut vm, "add", &mut args).unwrap();
        args[1] = int(3);
        api.call(&mut vm, "add", &mut args).unwrap();
        let mut insert = vec![args[0].clone(), int(2), int(2)];
        api.call(&mut vm, "add", &mut insert).unwrap();
        assert_eq!(Value::Table(vec![int(1), int(2), int(3)]), insert[0]);

        let mut count = vec![insert[0].clone()];
        assert_eq!(vec![int(3)], api.call(&mut vm, "count", &mut count).unwrap());

        let mut del = vec![insert[0].clone(), int(2)];
        assert_eq!(vec![int(2)], api.call(&mut vm, "del", &mut del).unwrap());
        assert_eq!(Value::Table(vec![int(1), int(3)]), del[0]);

        let mut deli = vec![del[0].clone()];
        assert_eq!(vec![int(3)], api.call(&mut vm, "deli", &mut deli).unwrap());
        assert_eq!(Value::Table(vec![int(1)]), deli[0]);
        deli.push(int(5));
        assert!(api.call(&mut vm, "deli", &mut deli).unwrap().is_empty());
    }
    #[test]
    fn count_matching() {
        let (mut vm, api) = setup_environment();
        let table = Value::Table(vec![int(1), int(2), int(1)]);
        assert_eq!(vec![int(2)], call(&mut vm, &api, "count", vec![table, int(1)]));
    }
}

mod system {
    use super::*;
    #[test]
    fn checksum_matches_mem() {
        let (mut vm, api) = setup_environment();
        vm.mem.load_region(crate::mem::Region::Ram, b"123456789");
        assert_eq!(
            vec![num(0xcbf4_3926_u32 as i32)],
            call(&mut vm, &api, "checksum", vec![int(0x4300), int(9)])
        );
    }
    #[test]
    fn time_starts_near_zero() {
        let (mut vm, api) = setup_environment();
        vm.reset();
        let out = call(&mut vm, &api, "t", vec![]);
        assert!(out[0].num() < Fix32::from_int(5));
    }
    #[test]
    fn log_returns_nothing() {
        let (mut vm, api) = setup_environment();
        assert!(call(&mut vm, &api, "printh", vec![Value::from("hello"), int(1)]).is_empty());
    }
}
