//! Print area resolution and child print areas.

#[cfg(test)]
mod tests {
    use thicket::{PrintArea, error::Error, prelude::*, testing::Harness};

    struct Blank;
    impl Widget for Blank {}

    #[test]
    fn nested_widgets_draw_into_their_window() -> Result<()> {
        let mut h = Harness::new()?;
        let win = h.core.add_window(h.root(), Blank)?;
        let a = h.core.add_child(win, Blank)?;
        let b = h.core.add_child(a, Blank)?;
        let c = h.core.add_child(b, Blank)?;

        let area = h.core.print_area(c)?;
        assert_eq!(
            area,
            PrintArea {
                buffer: h.core.window_buffer(win)?,
                owner: Some(win),
            }
        );
        assert!(h.core.has_print_area(c)?);
        assert!(!h.core.is_child_print_area(c)?);
        assert_eq!(h.core.print_area(win)?.owner, Some(win));
        Ok(())
    }

    #[test]
    fn desktop_widgets_are_not_cached() -> Result<()> {
        let mut h = Harness::new()?;
        let w = h.core.add_child(h.root(), Blank)?;
        let area = h.core.print_area(w)?;
        assert_eq!(area.buffer, h.core.desktop());
        assert_eq!(area.owner, None);
        assert!(!h.core.has_print_area(w)?);
        Ok(())
    }

    #[test]
    fn child_print_area_captures_descendants() -> Result<()> {
        let mut h = Harness::new()?;
        let p = h.core.add_child(h.root(), Blank)?;
        h.core
            .set_geometry(p, Point::new(2, 2), Expanse::new(10, 5), true)?;
        h.core.set_padding(p, Padding::uniform(1), true)?;
        let q = h.core.add_child(p, Blank)?;
        h.core
            .set_geometry(q, Point::new(1, 1), Expanse::new(4, 1), true)?;
        assert_eq!(h.core.print_area(q)?.buffer, h.core.desktop());

        let buf = h.core.create_child_print_area(p)?;
        assert!(h.core.has_child_print_area(p)?);
        assert_eq!(h.core.print_area(q)?.owner, Some(p));
        assert!(h.core.is_child_print_area(q)?);
        assert!(!h.core.is_child_print_area(p)?);
        assert_eq!(h.grid(buf)?.size(), Expanse::new(8, 3));
        // Asking twice hands back the same buffer.
        assert_eq!(h.core.create_child_print_area(p)?, buf);

        h.core.print(q, Point::new(1, 1), "hi", Style::default())?;
        assert!(h.grid(buf)?.line(0).starts_with("hi"));

        h.core.release_child_print_area(p)?;
        assert!(!h.core.has_child_print_area(p)?);
        assert_eq!(h.core.print_area(q)?.buffer, h.core.desktop());
        assert!(h.state()?.grid(buf).is_none());
        Ok(())
    }

    #[test]
    fn preprocessing_handlers_resolve_the_print_area() -> Result<()> {
        let mut h = Harness::new()?;
        let win = h.core.add_window(h.root(), Blank)?;
        let a = h.core.add_child(win, Blank)?;
        let c = h.core.add_child(a, Blank)?;
        let vwin = h.core.window_buffer(win)?;
        assert!(!h.core.has_print_area(c)?);

        h.core.add_preprocessing_handler(c)?;
        assert!(h.core.has_print_area(c)?);
        assert!(!h.core.has_print_area(a)?);
        h.core.add_preprocessing_handler(a)?;
        assert_eq!(h.state()?.handlers, vec![(vwin, c), (vwin, a)]);

        h.core.del_preprocessing_handler(c)?;
        assert_eq!(h.state()?.handlers, vec![(vwin, a)]);

        // Handlers follow a child print area, and go with it.
        let p = h.core.add_child(h.root(), Blank)?;
        let q = h.core.add_child(p, Blank)?;
        let buf = h.core.create_child_print_area(p)?;
        h.core.add_preprocessing_handler(q)?;
        assert!(h.state()?.handlers.contains(&(buf, q)));
        h.core.release_child_print_area(p)?;
        assert_eq!(h.state()?.handlers, vec![(vwin, a)]);
        Ok(())
    }

    #[test]
    fn windows_cannot_own_child_print_areas() -> Result<()> {
        let mut h = Harness::new()?;
        let win = h.core.add_window(h.root(), Blank)?;
        assert!(matches!(
            h.core.create_child_print_area(win),
            Err(Error::Structure(_))
        ));
        Ok(())
    }

    #[test]
    fn allocation_failures_propagate() -> Result<()> {
        let mut h = Harness::new()?;
        h.state()?.fail_allocations = true;
        assert!(matches!(
            h.core.add_window(h.root(), Blank),
            Err(Error::Allocation(_))
        ));
        Ok(())
    }

    #[test]
    fn printing_is_widget_relative() -> Result<()> {
        let mut h = Harness::new()?;
        let win = h.core.add_window(h.root(), Blank)?;
        h.core
            .set_geometry(win, Point::new(5, 5), Expanse::new(20, 10), true)?;
        let a = h.core.add_child(win, Blank)?;
        h.core
            .set_geometry(a, Point::new(2, 3), Expanse::new(6, 1), true)?;
        h.core.print(a, Point::new(1, 1), "hello", Style::default())?;
        let lines = h.window_lines(win)?;
        assert_eq!(&lines[2][..6], " hello");

        let d = h.core.add_child(h.root(), Blank)?;
        h.core
            .set_geometry(d, Point::new(3, 2), Expanse::new(6, 1), true)?;
        h.core.print(d, Point::new(1, 1), "desk", Style::default())?;
        assert!(h.desktop_lines()?[1].starts_with("  desk"));
        Ok(())
    }

    #[test]
    fn cursor_reaches_renderer_only_when_focused_in_a_window() -> Result<()> {
        let mut h = Harness::new()?;
        let win = h.core.add_window(h.root(), Blank)?;
        h.core
            .set_geometry(win, Point::new(5, 5), Expanse::new(20, 10), true)?;
        let a = h.core.add_child(win, Blank)?;
        h.core
            .set_geometry(a, Point::new(2, 3), Expanse::new(6, 1), true)?;

        assert!(!h.core.set_cursor_pos(a, Point::new(3, 1))?);
        assert_eq!(h.core.cursor_pos(a)?, Point::new(3, 1));

        h.core.set_focus(a, true)?;
        assert!(h.core.set_cursor_pos(a, Point::new(3, 1))?);
        let grid = h.grid(h.core.window_buffer(win)?)?;
        assert_eq!(grid.cursor(), Some((Point::new(3, 2), false)));

        let desk = h.core.add_child(h.root(), Blank)?;
        h.core.set_focus(desk, true)?;
        assert!(!h.core.set_cursor_pos(desk, Point::new(1, 1))?);
        Ok(())
    }
}
