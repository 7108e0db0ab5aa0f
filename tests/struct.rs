// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Testing methods on pocket8's structs
use pocket8::{mem::Region, prelude::*};
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

fn hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn error() {
    let error = Error::CorruptCode {
        format: CodeFormat::Legacy,
        reason: "back-reference points outside the output",
    };
    println!("{error} {error:?}");
    let error = Error::MissingNative { name: "sspr".into() };
    assert!(error.to_string().contains("sspr"));
}

mod fix32 {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(Fix32::ZERO, Fix32::default());
    }
    #[test]
    fn clone() {
        let a = Fix32::from_int(3);
        #[allow(clippy::clone_on_copy)]
        let b = a.clone();
        assert_eq!(a, b);
    }
    #[test]
    fn debug() {
        assert_eq!("Fix32(1.5 [00018000])", format!("{:?}", Fix32::from_bits(0x18000)));
    }
    #[test]
    fn display() {
        assert_eq!("-2.25", Fix32::from_f64(-2.25).to_string());
        assert_eq!("7", Fix32::from_int(7).to_string());
    }
    #[test]
    fn ord() {
        assert!(Fix32::MIN < Fix32::NEG_INF);
        assert_eq!(Fix32::ONE, Fix32::ONE.max(Fix32::ZERO));
    }
    #[test]
    fn hash() {
        assert_eq!(super::hash(&Fix32::ONE), super::hash(&Fix32::from_int(1)));
    }
}

mod region {
    use super::*;
    #[test]
    fn display() {
        assert_eq!("Screen", Screen.to_string());
        assert_eq!("DrawState", Region::DrawState.to_string());
    }
    #[test]
    fn ord() {
        let mut sorted = Region::ALL;
        sorted.sort();
        assert_eq!(Region::ALL, sorted);
    }
    #[test]
    fn regions_tile_memory() {
        let mut next = 0;
        for region in Region::ALL {
            assert_eq!(next, region.start(), "{region} leaves a gap");
            next = region.range().end;
        }
        assert_eq!(pocket8::mem::SIZE, next);
    }
    #[test]
    fn hash() {
        assert_ne!(super::hash(&Sprites), super::hash(&Shared));
    }
}

mod mem {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(Mem::new(), Mem::default());
    }
    #[test]
    fn clone() {
        let mut mem = Mem::new();
        mem.poke(0x4300, 42);
        let other = mem.clone();
        assert_eq!(mem, other);
        mem.poke(0x4300, 43);
        assert_ne!(mem, other);
    }
    #[test]
    fn debug() {
        println!("{:?}", Mem::default());
    }
}

mod machine {
    use super::*;
    #[test]
    fn default() {
        let vm = Machine::default();
        assert_eq!(Mem::new(), vm.mem);
    }
    #[test]
    fn clone() {
        let vm = Machine::new();
        assert_eq!(vm.clone(), vm);
    }
    #[test]
    fn debug() {
        println!("{:?}", Machine::default());
    }
}

mod code_format {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(CodeFormat::Plaintext, CodeFormat::default());
    }
    #[test]
    fn display() {
        assert_eq!(
            ["plaintext", "legacy", "pxa"],
            [CodeFormat::Plaintext, CodeFormat::Legacy, CodeFormat::Pxa].map(|f| f.to_string())
        );
    }
    #[test]
    fn hash() {
        assert_ne!(super::hash(&CodeFormat::Legacy), super::hash(&CodeFormat::Pxa));
    }
}

mod entry_point {
    use super::*;
    #[test]
    fn display() {
        let names: Vec<_> = EntryPoint::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(vec!["_init", "_update", "_update60", "_draw"], names);
    }
    #[test]
    fn ord() {
        assert!(EntryPoint::Init < EntryPoint::Draw);
    }
}

mod state {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(State::Browsing, State::default());
    }
    #[test]
    fn display() {
        assert_eq!("browsing", State::Browsing.to_string());
        assert_eq!("running", State::Running.to_string());
    }
    #[test]
    fn hash() {
        assert_ne!(super::hash(&State::Browsing), super::hash(&State::Running));
    }
}

mod value {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(Value::Nil, Value::default());
    }
    #[test]
    fn clone() {
        let table = Value::from(vec![Value::from(1), Value::from("two")]);
        assert_eq!(table.clone(), table);
    }
    #[test]
    fn debug() {
        println!("{:?}", Value::from(true));
    }
}

mod api {
    use super::*;
    #[test]
    fn default() {
        assert_eq!(Api::new().len(), Api::default().len());
    }
    #[test]
    fn clone() {
        let api = Api::new();
        assert!(api.clone().names().eq(api.names()));
    }
    #[test]
    fn debug() {
        let text = format!("{:?}", Api::new());
        assert!(text.contains("\"pset\""));
    }
}

mod engine {
    use super::*;
    #[test]
    fn inert() {
        let mut inert = Inert;
        let (mut vm, api) = (Machine::new(), Api::empty());
        assert!(inert.load(&mut vm, &api, b"function _init() end").is_ok());
        assert!(EntryPoint::ALL.iter().all(|&e| !inert.has_entry_point(e)));
        assert_eq!(Inert, Inert::default());
        println!("{inert:?}");
    }
}

mod library {
    use super::*;
    #[test]
    fn default() {
        let lib = Library::default();
        assert!(lib.is_empty());
        assert_eq!(None, lib.name(0));
    }
    #[test]
    fn clone_eq_hash() {
        let lib = Library::new("carts", vec!["a.p8.png".into()]);
        assert_eq!(lib.clone(), lib);
        assert_eq!(super::hash(&lib.clone()), super::hash(&lib));
        println!("{lib:?}");
    }
}
