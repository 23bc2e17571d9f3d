//! Geometry setters, clamping and derived state.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use thicket::{geom::Side, prelude::*, terminal::Encoding, testing::Harness};

    struct Blank;
    impl Widget for Blank {}

    #[test]
    fn sizes_clamp_into_hints() -> Result<()> {
        let mut h = Harness::new()?;
        let w = h.core.add_child(h.root(), Blank)?;
        h.core.set_size_hints(w, SizeHints::new(2, 2, 10, 5)?)?;
        assert_eq!(h.core.size(w)?, Expanse::new(2, 2));

        h.core.set_size(w, Expanse::new(30, 1), false)?;
        assert_eq!(h.core.size(w)?, Expanse::new(10, 2));
        h.core.set_width(w, 4, false)?;
        h.core.set_height(w, 9, false)?;
        assert_eq!(h.core.size(w)?, Expanse::new(4, 5));
        Ok(())
    }

    #[test]
    fn zero_sizes_floor_at_one() -> Result<()> {
        let mut h = Harness::new()?;
        let w = h.core.add_child(h.root(), Blank)?;
        h.core.set_size(w, Expanse::new(0, 0), false)?;
        assert_eq!(h.core.size(w)?, Expanse::new(1, 1));
        Ok(())
    }

    #[test]
    fn positions_floor_at_one_except_windows() -> Result<()> {
        let mut h = Harness::new()?;
        let plain = h.core.add_child(h.root(), Blank)?;
        let win = h.core.add_window(h.root(), Blank)?;
        h.core.set_pos(plain, Point::new(-3, 0), false)?;
        h.core.set_pos(win, Point::new(-3, 0), false)?;
        assert_eq!(h.core.geometry(plain)?.pos(), Point::new(1, 1));
        assert_eq!(h.core.geometry(win)?.pos(), Point::new(-3, 0));

        h.core.set_x(plain, 7, false)?;
        h.core.set_y(plain, 4, false)?;
        h.core.move_by(plain, 2, -1)?;
        assert_eq!(h.core.geometry(plain)?.pos(), Point::new(9, 3));
        Ok(())
    }

    #[test]
    fn clamped_positions_that_change_nothing_are_noops() -> Result<()> {
        let mut h = Harness::new()?;
        let w = h.core.add_child(h.root(), Blank)?;
        h.core
            .set_geometry(w, Point::new(1, 1), Expanse::new(10, 4), true)?;
        h.core.create_child_print_area(w)?;
        let resizes = h.state()?.resizes;

        h.core.set_pos(w, Point::new(0, 0), true)?;
        h.core.set_x(w, -5, true)?;
        h.core
            .set_geometry(w, Point::new(-3, 0), Expanse::new(10, 4), true)?;
        assert_eq!(h.state()?.resizes, resizes);
        assert_eq!(h.core.geometry(w)?, Rect::new(1, 1, 10, 4));

        h.core.set_pos(w, Point::new(2, 1), true)?;
        assert!(h.state()?.resizes > resizes);
        Ok(())
    }

    #[test]
    fn client_offset_follows_padding() -> Result<()> {
        let mut h = Harness::new()?;
        let w = h.core.add_child(h.root(), Blank)?;
        h.core
            .set_geometry(w, Point::new(3, 2), Expanse::new(10, 5), true)?;
        assert_eq!(h.core.term_pos(w)?, Point::new(3, 2));
        assert_eq!(h.core.client_offset(w)?, Rect::from_coords(2, 1, 11, 5));

        h.core.set_padding(w, Padding::new(1, 2, 1, 2), false)?;
        assert_eq!(h.core.client_offset(w)?, Rect::from_coords(4, 2, 9, 4));
        assert_eq!(h.core.padding(w)?, Padding::new(1, 2, 1, 2));
        Ok(())
    }

    #[test]
    fn border_mask_tracks_size() -> Result<()> {
        let mut h = Harness::new()?;
        let w = h.core.add_child(h.root(), Blank)?;
        h.core
            .set_geometry(w, Point::new(1, 1), Expanse::new(10, 5), false)?;
        h.core.set_double_flat_line(w, Side::Top, true)?;
        let mask = h.core.border_mask(w)?;
        assert_eq!(mask.len(Side::Top), 10);
        assert_eq!(mask.len(Side::Bottom), 10);
        assert_eq!(mask.len(Side::Left), 5);
        assert_eq!(mask.len(Side::Right), 5);
        assert!(mask.get(Side::Top, 9));

        h.core.set_width(w, 12, false)?;
        let mask = h.core.border_mask(w)?;
        assert_eq!(mask.len(Side::Top), 12);
        assert!(!mask.get(Side::Top, 11));
        Ok(())
    }

    #[test]
    fn window_buffer_tracks_shadow() -> Result<()> {
        let mut h = Harness::new()?;
        let win = h.core.add_window(h.root(), Blank)?;
        h.core
            .set_geometry(win, Point::new(2, 2), Expanse::new(10, 4), true)?;
        h.core.set_shadow(win, true)?;
        assert_eq!(h.core.shadow_size(win)?, Expanse::new(1, 1));
        let grid = h.grid(h.core.window_buffer(win)?)?;
        assert_eq!(grid.size(), Expanse::new(11, 5));

        h.core.set_transparent_shadow(win, true)?;
        let grid = h.grid(h.core.window_buffer(win)?)?;
        assert_eq!(grid.size(), Expanse::new(12, 5));
        Ok(())
    }

    #[test]
    fn ascii_terminals_get_no_block_shadow() -> Result<()> {
        let mut h = Harness::builder().encoding(Encoding::Ascii).build()?;
        let w = h.core.add_child(h.root(), Blank)?;
        h.core.set_shadow(w, true)?;
        assert!(!h.core.flags(w)?.shadow);
        assert_eq!(h.core.shadow_size(w)?, Expanse::new(0, 0));
        Ok(())
    }

    /// Size, client offset, terminal position and mask lengths after a
    /// resize under fixed hints and padding.
    fn resized(
        w: u32,
        h: u32,
        pad: (i32, i32, i32, i32),
    ) -> Result<(Expanse, Rect, Point, [usize; 4])> {
        let mut core = Harness::new()?.core;
        let root = core.root();
        let id = core.add_child(root, Blank)?;
        core.set_size_hints(id, SizeHints::new(2, 2, 40, 20)?)?;
        core.set_pos(id, Point::new(3, 2), false)?;
        let (top, left, bottom, right) = pad;
        core.set_padding(id, Padding::new(top, left, bottom, right), false)?;
        core.set_size(id, Expanse::new(w, h), false)?;
        let mask = core.border_mask(id)?;
        let lens = Side::ALL.map(|side| mask.len(side));
        Ok((core.size(id)?, core.client_offset(id)?, core.term_pos(id)?, lens))
    }

    proptest! {
        #[test]
        fn derived_state_follows_size(
            w in 0u32..100, h in 0u32..100,
            top in 0i32..3, left in 0i32..3, bottom in 0i32..3, right in 0i32..3,
        ) {
            let (size, client, term, lens) = resized(w, h, (top, left, bottom, right)).unwrap();
            prop_assert!((2..=40).contains(&size.w));
            prop_assert!((2..=20).contains(&size.h));
            prop_assert_eq!(
                lens,
                [size.w as usize, size.h as usize, size.w as usize, size.h as usize]
            );
            let (tx, ty) = (term.x, term.y);
            let (sw, sh) = (size.w as i32, size.h as i32);
            prop_assert_eq!(
                client,
                Rect::from_coords(
                    tx - 1 + left,
                    ty - 1 + top,
                    tx - 2 + sw - right,
                    ty - 2 + sh - bottom,
                )
            );
        }
    }
}
