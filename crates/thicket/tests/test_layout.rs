//! The layout pass: offsets, space adjustment and terminal resize.

#[cfg(test)]
mod tests {
    use thicket::{
        options::{Options, PaddingOptions},
        prelude::*,
        testing::Harness,
        widgets::Panel,
    };

    struct Blank;
    impl Widget for Blank {}

    #[test]
    fn window_client_offset() -> Result<()> {
        let mut h = Harness::new()?;
        let win = h.core.add_window(h.root(), Blank)?;
        h.core
            .set_geometry(win, Point::new(5, 5), Expanse::new(20, 10), true)?;
        assert_eq!(h.core.offset(win)?, Rect::from_coords(0, 0, 79, 23));
        assert_eq!(h.core.term_geometry(win)?, Rect::new(5, 5, 20, 10));
        assert_eq!(h.core.client_offset(win)?, Rect::from_coords(4, 4, 23, 13));
        Ok(())
    }

    #[test]
    fn plain_widgets_move_before_shrinking() -> Result<()> {
        let mut h = Harness::new()?;
        let w = h.core.add_child(h.root(), Blank)?;
        h.core
            .set_geometry(w, Point::new(70, 20), Expanse::new(20, 10), true)?;
        assert_eq!(h.core.geometry(w)?, Rect::new(61, 15, 20, 10));
        assert_eq!(h.core.requested_geometry(w)?, Rect::new(70, 20, 20, 10));

        h.core
            .set_geometry(w, Point::new(1, 1), Expanse::new(100, 30), true)?;
        assert_eq!(h.core.geometry(w)?, Rect::new(1, 1, 80, 24));
        Ok(())
    }

    #[test]
    fn windows_are_not_adjusted() -> Result<()> {
        let mut h = Harness::new()?;
        let win = h.core.add_window(h.root(), Blank)?;
        h.core
            .set_geometry(win, Point::new(70, 20), Expanse::new(20, 10), true)?;
        assert_eq!(h.core.geometry(win)?, Rect::new(70, 20, 20, 10));
        Ok(())
    }

    #[test]
    fn root_padding_offsets_windows() -> Result<()> {
        let options = Options {
            root_padding: PaddingOptions {
                top: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut h = Harness::builder().options(options).build()?;
        assert_eq!(h.core.client_offset(h.root())?, Rect::from_coords(0, 1, 79, 23));

        let padded = h.core.add_window(h.root(), Blank)?;
        let bare = h.core.add_window(h.root(), Blank)?;
        let dialog = h.core.add_dialog(h.root(), Blank)?;
        h.core.set_ignore_padding(bare, true)?;
        h.core.set_ignore_padding(dialog, true)?;
        for w in [padded, bare, dialog] {
            h.core
                .set_geometry(w, Point::new(5, 5), Expanse::new(10, 4), true)?;
        }
        assert_eq!(h.core.term_pos(padded)?, Point::new(5, 6));
        assert_eq!(h.core.term_pos(bare)?, Point::new(5, 5));
        // Dialogs always respect the desktop padding.
        assert_eq!(h.core.term_pos(dialog)?, Point::new(5, 6));

        h.core.set_root_padding(Padding::new(3, 0, 0, 0), true)?;
        assert_eq!(h.core.term_pos(padded)?, Point::new(5, 8));
        assert_eq!(h.core.term_pos(bare)?, Point::new(5, 5));
        Ok(())
    }

    #[test]
    fn children_sit_inside_parent_padding() -> Result<()> {
        let mut h = Harness::new()?;
        let root = h.root();
        let panel = Panel::new().install(&mut h.core, root)?;
        h.core
            .set_geometry(panel, Point::new(2, 2), Expanse::new(20, 10), true)?;
        let child = h.core.add_child(panel, Blank)?;
        h.core
            .set_geometry(child, Point::new(1, 1), Expanse::new(5, 3), true)?;
        assert_eq!(h.core.term_pos(child)?, Point::new(3, 3));

        h.core.set_ignore_padding(child, true)?;
        h.core.adjust_size(child)?;
        assert_eq!(h.core.term_pos(child)?, Point::new(2, 2));
        Ok(())
    }

    #[test]
    fn children_follow_their_parent() -> Result<()> {
        let mut h = Harness::new()?;
        let win = h.core.add_window(h.root(), Blank)?;
        let child = h.core.add_child(win, Blank)?;
        h.core
            .set_geometry(win, Point::new(5, 5), Expanse::new(20, 10), true)?;
        h.core
            .set_geometry(child, Point::new(2, 3), Expanse::new(6, 1), true)?;
        assert_eq!(h.core.term_pos(child)?, Point::new(6, 7));

        h.core.move_by(win, 10, 1)?;
        assert_eq!(h.core.term_pos(child)?, Point::new(16, 8));
        Ok(())
    }

    #[test]
    fn terminal_resize_relays_out_the_tree() -> Result<()> {
        let mut h = Harness::new()?;
        let big = h.core.add_child(h.root(), Blank)?;
        h.core
            .set_geometry(big, Point::new(1, 1), Expanse::new(100, 30), true)?;
        assert_eq!(h.core.size(big)?, Expanse::new(80, 24));

        h.set_term_size(100, 30)?;
        let root = h.root();
        assert!(h.core.send_event(root, &Event::Resize)?.is_accepted());
        assert_eq!(h.core.size(root)?, Expanse::new(100, 30));
        assert_eq!(h.core.size(big)?, Expanse::new(100, 30));
        let desktop = h.grid(h.core.desktop())?;
        assert_eq!(desktop.size(), Expanse::new(100, 30));
        Ok(())
    }

    #[test]
    fn shrinking_the_terminal_pulls_plain_widgets_back_on_screen() -> Result<()> {
        let mut h = Harness::new()?;
        let root = h.root();
        let win = h.core.add_window(root, Blank)?;
        h.core
            .set_geometry(win, Point::new(5, 5), Expanse::new(20, 10), true)?;
        let inner = h.core.add_child(win, Blank)?;
        h.core
            .set_geometry(inner, Point::new(2, 2), Expanse::new(5, 3), true)?;
        let wide = h.core.add_child(root, Blank)?;
        h.core
            .set_geometry(wide, Point::new(5, 5), Expanse::new(20, 10), true)?;
        let hinted = h.core.add_child(root, Blank)?;
        h.core.set_size_hints(hinted, SizeHints::minimum(12, 7))?;
        h.core
            .set_geometry(hinted, Point::new(3, 3), Expanse::new(12, 8), true)?;
        assert_eq!(h.core.client_offset(win)?, Rect::from_coords(4, 4, 23, 13));
        assert_eq!(h.core.geometry(wide)?, Rect::new(5, 5, 20, 10));

        h.set_term_size(10, 10)?;
        assert!(h.core.send_event(root, &Event::Resize)?.is_accepted());
        assert_eq!(h.grid(h.core.desktop())?.size(), Expanse::new(10, 10));

        // Plain widgets move left and up first, then shrink to fit.
        assert_eq!(h.core.geometry(wide)?, Rect::new(1, 1, 10, 10));
        assert_eq!(h.core.requested_geometry(wide)?, Rect::new(5, 5, 20, 10));
        // Shrinking stops at the minimum hints.
        assert_eq!(h.core.geometry(hinted)?, Rect::new(1, 3, 12, 8));

        // Windows keep their place, and so does their content.
        assert_eq!(h.core.term_geometry(win)?, Rect::new(5, 5, 20, 10));
        assert_eq!(h.core.client_offset(win)?, Rect::from_coords(4, 4, 23, 13));
        assert_eq!(h.core.term_pos(inner)?, Point::new(6, 6));

        // Growing again restores the requested geometry.
        h.set_term_size(80, 24)?;
        h.core.send_event(root, &Event::Resize)?;
        assert_eq!(h.core.geometry(wide)?, Rect::new(5, 5, 20, 10));
        assert_eq!(h.core.geometry(hinted)?, Rect::new(3, 3, 12, 8));
        Ok(())
    }

    #[test]
    fn unchanged_terminal_size_is_a_noop() -> Result<()> {
        let mut h = Harness::new()?;
        let root = h.root();
        let before = h.core.client_offset(root)?;
        h.core.resize(root)?;
        assert_eq!(h.core.client_offset(root)?, before);
        assert_eq!(h.core.size(root)?, Expanse::new(80, 24));
        Ok(())
    }
}
