// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Unit tests for the rasterizer

use super::*;

fn setup_environment() -> Machine {
    Machine::new()
}

fn screen(vm: &Machine) -> Vec<u8> {
    vm.mem.get_region(Region::Screen).to_vec()
}

/// Collects every lit pixel, row by row
fn lit(vm: &Machine) -> Vec<(i32, i32)> {
    (0..SCREEN_SIZE)
        .flat_map(|y| (0..SCREEN_SIZE).map(move |x| (x, y)))
        .filter(|&(x, y)| vm.pget(x, y) != 0)
        .collect()
}

mod pixels {
    use super::*;
    #[test]
    fn pset_packs_nibbles() {
        let mut vm = setup_environment();
        vm.pset(0, 0, Some(0x3));
        vm.pset(1, 0, Some(0xa));
        assert_eq!(0xa3, vm.mem.peek(0x6000));
        assert_eq!((0x3, 0xa), (vm.pget(0, 0), vm.pget(1, 0)));
    }
    #[test]
    fn pset_off_screen_is_inert() {
        let mut vm = setup_environment();
        let before = screen(&vm);
        vm.pset(200, 5, Some(8));
        vm.pset(-1, 5, Some(8));
        vm.pset(5, 128, Some(8));
        vm.pset(i32::MIN, i32::MAX, Some(8));
        assert_eq!(before, screen(&vm));
    }
    #[test]
    fn pset_uses_pen() {
        let mut vm = setup_environment();
        vm.color(12);
        vm.pset(4, 4, None);
        assert_eq!(12, vm.pget(4, 4));
    }
    #[test]
    fn pget_off_screen() {
        let mut vm = setup_environment();
        vm.cls(7);
        assert_eq!(0, vm.pget(-1, 0));
        assert_eq!(0, vm.pget(0, 128));
    }
    #[test]
    fn solid_fill_pattern_masks_everything() {
        let mut vm = setup_environment();
        vm.fillp(0xffff);
        let before = screen(&vm);
        vm.rectfill(0, 0, 127, 127, Some(9));
        vm.circfill(64, 64, 30, Some(9));
        assert_eq!(before, screen(&vm));
    }
    #[test]
    fn fill_pattern_top_left_bit() {
        let mut vm = setup_environment();
        vm.fillp(0x8000);
        vm.rectfill(0, 0, 7, 7, Some(1));
        assert_eq!(0, vm.pget(0, 0));
        assert_eq!(0, vm.pget(4, 4));
        assert_eq!(1, vm.pget(1, 0));
        assert_eq!(1, vm.pget(0, 1));
    }
    #[test]
    fn cls_fills_and_homes_cursor() {
        let mut vm = setup_environment();
        vm.cursor(40, 50);
        vm.cls(0x15);
        assert!(screen(&vm).iter().all(|&b| b == 0x55));
        assert_eq!((0, 0), (vm.mem.peek(reg::CURSOR_X), vm.mem.peek(reg::CURSOR_Y)));
    }
    #[test]
    fn cls_idempotent() {
        let mut vm = setup_environment();
        vm.line(0, 0, 127, 127, Some(3));
        vm.cls(0);
        let once = screen(&vm);
        vm.cls(0);
        assert_eq!(once, screen(&vm));
    }
    #[test]
    fn frame_rgb_uses_palette() {
        let mut vm = setup_environment();
        vm.pset(1, 0, Some(8));
        let frame = vm.frame_rgb();
        assert_eq!(128 * 128, frame.len());
        assert_eq!(palette::rgb(0), frame[0]);
        assert_eq!(palette::rgb(8), frame[1]);
    }
}

mod shapes {
    use super::*;
    #[test]
    fn line_includes_endpoints() {
        let mut vm = setup_environment();
        vm.line(2, 3, 10, 7, Some(1));
        assert_eq!(1, vm.pget(2, 3));
        assert_eq!(1, vm.pget(10, 7));
        assert_eq!(9, lit(&vm).len());
    }
    #[test]
    fn line_single_point() {
        let mut vm = setup_environment();
        vm.line(5, 5, 5, 5, Some(2));
        assert_eq!(vec![(5, 5)], lit(&vm));
    }
    #[test]
    fn line_off_screen_endpoints() {
        let mut vm = setup_environment();
        vm.line(-10, 0, 137, 0, Some(2));
        assert_eq!(128, lit(&vm).len());
    }
    #[test]
    fn rect_outline() {
        let mut vm = setup_environment();
        vm.rect(10, 10, 13, 12, Some(4));
        // 4 wide, 3 tall: 10 border pixels around a 2x1 hole
        assert_eq!(10, lit(&vm).len());
        assert_eq!(0, vm.pget(11, 11));
        assert_eq!(4, vm.pget(13, 11));
    }
    #[test]
    fn rectfill_swapped_corners() {
        let mut vm = setup_environment();
        vm.rectfill(13, 12, 10, 10, Some(4));
        assert_eq!(12, lit(&vm).len());
    }
    #[test]
    fn rectfill_clips() {
        let mut vm = setup_environment();
        vm.rectfill(-50, -50, 200, 200, Some(6));
        assert!(screen(&vm).iter().all(|&b| b == 0x66));
    }
    #[test]
    fn circle_is_symmetric() {
        let mut vm = setup_environment();
        vm.circ(64, 64, 10, Some(7));
        for (x, y) in lit(&vm) {
            let (dx, dy) = (x - 64, y - 64);
            for (mx, my) in [(-dx, dy), (dx, -dy), (dy, dx)] {
                assert_eq!(7, vm.pget(64 + mx, 64 + my), "({x}, {y}) has no mirror");
            }
        }
        assert_eq!(7, vm.pget(74, 64));
        assert_eq!(7, vm.pget(64, 54));
        assert_eq!(0, vm.pget(64, 64));
    }
    #[test]
    fn circle_radius_zero() {
        let mut vm = setup_environment();
        vm.circ(20, 20, 0, Some(1));
        assert_eq!(vec![(20, 20)], lit(&vm));
        vm.circ(30, 30, -1, Some(1));
        assert_eq!(1, lit(&vm).len());
    }
    #[test]
    fn circfill_covers_outline() {
        let mut outline = setup_environment();
        outline.circ(40, 40, 9, Some(1));
        let mut filled = setup_environment();
        filled.circfill(40, 40, 9, Some(1));
        for (x, y) in lit(&outline) {
            assert_eq!(1, filled.pget(x, y), "({x}, {y}) missing from fill");
        }
        assert_eq!(1, filled.pget(40, 40));
    }
    #[test]
    fn oval_touches_bounding_box() {
        let mut vm = setup_environment();
        vm.oval(10, 20, 30, 30, Some(5));
        let pixels = lit(&vm);
        assert_eq!(Some(10), pixels.iter().map(|p| p.0).min());
        assert_eq!(Some(30), pixels.iter().map(|p| p.0).max());
        assert_eq!(Some(20), pixels.iter().map(|p| p.1).min());
        assert_eq!(Some(30), pixels.iter().map(|p| p.1).max());
        assert_eq!(0, vm.pget(20, 25));
    }
    #[test]
    fn narrow_oval_reaches_box_ends() {
        for (x1, width) in [(10, 1), (11, 2)] {
            let mut outline = setup_environment();
            outline.oval(10, 20, x1, 30, Some(5));
            let mut filled = setup_environment();
            filled.ovalfill(10, 20, x1, 30, Some(5));
            for vm in [&outline, &filled] {
                let pixels = lit(vm);
                assert_eq!(11 * width, pixels.len());
                assert!((20..=30).all(|y| vm.pget(10, y) == 5), "gap in column 10");
                assert!(pixels.iter().all(|&(x, _)| (10..=x1).contains(&x)));
            }
        }
    }
    #[test]
    fn ovalfill_fills_center() {
        let mut vm = setup_environment();
        vm.ovalfill(30, 30, 10, 20, Some(5));
        assert_eq!(5, vm.pget(20, 25));
        assert_eq!(0, vm.pget(10, 20));
    }
    #[test]
    fn flat_oval() {
        let mut vm = setup_environment();
        vm.ovalfill(0, 5, 9, 5, Some(2));
        assert_eq!(10, lit(&vm).len());
    }
}

mod text {
    use super::*;
    #[test]
    fn print_moves_cursor() {
        let mut vm = setup_environment();
        let right = vm.print(b"hi", None, Some(7));
        assert_eq!(8, right);
        assert_eq!(font::LINE as u8, vm.mem.peek(reg::CURSOR_Y));
        vm.print(b"x", None, Some(7));
        assert_eq!(2 * font::LINE as u8, vm.mem.peek(reg::CURSOR_Y));
    }
    #[test]
    fn print_at_position() {
        let mut vm = setup_environment();
        vm.print(b"1", Some((10, 20)), Some(9));
        // "1" has a full-height stem in its middle column
        for y in 20..25 {
            assert_eq!(9, vm.pget(11, y));
        }
        assert_eq!((10, 26), (vm.mem.peek(reg::CURSOR_X), vm.mem.peek(reg::CURSOR_Y)));
    }
    #[test]
    fn print_space_draws_nothing() {
        let mut vm = setup_environment();
        vm.print(b"   ", Some((0, 0)), Some(9));
        assert!(lit(&vm).is_empty());
    }
    #[test]
    fn print_newline() {
        let mut vm = setup_environment();
        vm.print(b"a\nb", Some((4, 0)), None);
        assert_eq!((4, 12), (vm.mem.peek(reg::CURSOR_X), vm.mem.peek(reg::CURSOR_Y)));
    }
}

mod sprites {
    use super::*;
    #[test]
    fn sset_sget() {
        let mut vm = setup_environment();
        vm.sset(9, 1, Some(0xe));
        assert_eq!(0xe, vm.sget(9, 1));
        assert_eq!(0xe0, vm.mem.peek(64 + 4));
        assert_eq!(0, vm.sget(128, 0));
    }
    #[test]
    fn spr_transparent_and_flipped() {
        let mut vm = setup_environment();
        // sprite 1 occupies sheet pixels 8..16 of row 0..8
        vm.sset(8, 0, Some(3));
        vm.spr(1, 20, 20, 1, 1, false, false);
        assert_eq!(3, vm.pget(20, 20));
        assert_eq!(1, lit(&vm).len());
        vm.cls(0);
        vm.spr(1, 20, 20, 1, 1, true, true);
        assert_eq!(vec![(27, 27)], lit(&vm));
    }
    #[test]
    fn flags() {
        let mut vm = setup_environment();
        vm.fset(5, 0b101);
        assert_eq!(0b101, vm.fget(5));
        assert_eq!(0b101, vm.mem.peek(0x3005));
        vm.fset(256, 1);
        assert_eq!(0, vm.fget(256));
        assert_eq!(0, vm.fget(-1));
    }
    #[test]
    fn map_cells() {
        let mut vm = setup_environment();
        vm.mset(3, 1, 7);
        vm.mset(3, 33, 8);
        assert_eq!(7, vm.mem.peek(0x2000 + 128 + 3));
        assert_eq!(8, vm.mem.peek(0x1000 + 128 + 3));
        assert_eq!((7, 8), (vm.mget(3, 1), vm.mget(3, 33)));
        assert_eq!(0, vm.mget(0, 64));
    }
    #[test]
    fn map_draws_cells() {
        let mut vm = setup_environment();
        vm.sset(8, 0, Some(5));
        vm.mset(0, 0, 1);
        vm.mset(1, 0, 1);
        vm.map(0, 0, 0, 0, 2, 1, 0);
        assert_eq!(vec![(0, 0), (8, 0)], lit(&vm));
    }
    #[test]
    fn map_layer_filters() {
        let mut vm = setup_environment();
        vm.sset(8, 0, Some(5));
        vm.mset(0, 0, 1);
        vm.map(0, 0, 0, 0, 1, 1, 0b10);
        assert!(lit(&vm).is_empty());
        vm.fset(1, 0b11);
        vm.map(0, 0, 0, 0, 1, 1, 0b10);
        assert_eq!(vec![(0, 0)], lit(&vm));
    }
}
