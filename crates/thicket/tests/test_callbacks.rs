//! Signal handlers: free and instance-bound.

#[cfg(test)]
mod tests {
    use std::{any::Any, cell::RefCell, rc::Rc};

    use thicket::{callback::Callback, prelude::*, testing::Harness};

    struct Blank;
    impl Widget for Blank {}

    /// Counts how often it was poked.
    #[derive(Default)]
    struct Counter {
        hits: u32,
        last: Option<String>,
    }

    impl Widget for Counter {}

    /// Shared call log.
    type Log = Rc<RefCell<Vec<String>>>;

    /// A free handler that logs `tag` and the payload, if it's a string.
    fn logger(log: &Log, tag: &'static str) -> Callback {
        let log = log.clone();
        Rc::new(move |_core: &mut Core, _id: WidgetId, payload: &dyn Any| {
            let data = payload.downcast_ref::<&str>().copied().unwrap_or("-");
            log.borrow_mut().push(format!("{tag}:{data}"));
            Ok(())
        })
    }

    #[test]
    fn free_handlers_run_before_bound_ones() -> Result<()> {
        let log = Log::default();
        let mut h = Harness::new()?;
        let root = h.root();
        let button = h.core.add_child(root, Blank)?;
        let counter = h.core.add_child(root, Counter::default())?;

        let bound_log = log.clone();
        h.core.add_instance_callback::<Counter, _>(
            button,
            "clicked",
            counter,
            move |c, _core, _emitter, _payload| {
                c.hits += 1;
                bound_log.borrow_mut().push("bound".into());
                Ok(())
            },
            (),
        )?;
        h.core
            .add_callback(button, "clicked", logger(&log, "first"), "a")?;
        h.core
            .add_callback(button, "clicked", logger(&log, "second"), 7u32)?;
        assert_eq!(h.core.callback_count(button)?, 3);

        h.core.emit_callback(button, "clicked")?;
        assert_eq!(*log.borrow(), vec!["first:a", "second:-", "bound"]);
        let hits = h.core.with_widget::<Counter, _>(counter, |c, _| Ok(c.hits))?;
        assert_eq!(hits, 1);
        Ok(())
    }

    #[test]
    fn signals_are_matched_by_name() -> Result<()> {
        let log = Log::default();
        let mut h = Harness::new()?;
        let root = h.root();
        let w = h.core.add_child(root, Blank)?;
        h.core.add_callback(w, "activate", logger(&log, "act"), ())?;
        h.core.emit_callback(w, "changed")?;
        assert!(log.borrow().is_empty());
        h.core.emit_callback(w, "activate")?;
        h.core.emit_callback(w, "activate")?;
        assert_eq!(log.borrow().len(), 2);
        Ok(())
    }

    #[test]
    fn handlers_are_removed_by_identity() -> Result<()> {
        let log = Log::default();
        let mut h = Harness::new()?;
        let root = h.root();
        let w = h.core.add_child(root, Blank)?;
        let keep = logger(&log, "keep");
        let gone = logger(&log, "gone");
        h.core.add_callback(w, "s", keep.clone(), ())?;
        h.core.add_callback(w, "s", gone.clone(), ())?;
        h.core.add_callback(w, "t", gone.clone(), ())?;

        h.core.del_callback(w, &gone)?;
        assert_eq!(h.core.callback_count(w)?, 1);
        h.core.emit_callback(w, "s")?;
        h.core.emit_callback(w, "t")?;
        assert_eq!(*log.borrow(), vec!["keep:-"]);

        h.core.del_callbacks(w)?;
        assert_eq!(h.core.callback_count(w)?, 0);
        Ok(())
    }

    #[test]
    fn payloads_reach_bound_handlers() -> Result<()> {
        let mut h = Harness::new()?;
        let root = h.root();
        let source = h.core.add_child(root, Blank)?;
        let counter = h.core.add_child(root, Counter::default())?;
        h.core.add_instance_callback::<Counter, _>(
            source,
            "renamed",
            counter,
            |c, _core, _emitter, payload| {
                c.last = payload.downcast_ref::<String>().cloned();
                Ok(())
            },
            String::from("fresh"),
        )?;
        h.core.emit_callback(source, "renamed")?;
        let last = h
            .core
            .with_widget::<Counter, _>(counter, |c, _| Ok(c.last.clone()))?;
        assert_eq!(last.as_deref(), Some("fresh"));
        Ok(())
    }

    #[test]
    fn mismatched_instances_are_skipped() -> Result<()> {
        let mut h = Harness::new()?;
        let root = h.root();
        let source = h.core.add_child(root, Blank)?;
        let other = h.core.add_child(root, Blank)?;
        h.core.add_instance_callback::<Counter, _>(
            source,
            "s",
            other,
            |c, _core, _emitter, _payload| {
                c.hits += 1;
                Ok(())
            },
            (),
        )?;
        h.core.emit_callback(source, "s")?;
        Ok(())
    }

    #[test]
    fn destroyed_receivers_are_unbound() -> Result<()> {
        let mut h = Harness::new()?;
        let root = h.root();
        let source = h.core.add_child(root, Blank)?;
        let a = h.core.add_child(root, Counter::default())?;
        let b = h.core.add_child(root, Counter::default())?;
        for target in [a, b] {
            h.core.add_instance_callback::<Counter, _>(
                source,
                "s",
                target,
                |c, _core, _emitter, _payload| {
                    c.hits += 1;
                    Ok(())
                },
                (),
            )?;
        }
        assert_eq!(h.core.callback_count(source)?, 2);

        h.core.destroy(a)?;
        assert_eq!(h.core.callback_count(source)?, 1);
        h.core.emit_callback(source, "s")?;
        let hits = h.core.with_widget::<Counter, _>(b, |c, _| Ok(c.hits))?;
        assert_eq!(hits, 1);

        h.core.del_instance_callbacks(source, b)?;
        assert_eq!(h.core.callback_count(source)?, 0);
        Ok(())
    }

    /// Emits a signal from its own key handler.
    struct Emitter;

    impl Widget for Emitter {
        fn on_event(&mut self, event: &Event, ctx: &mut Context) -> Result<Outcome> {
            match event {
                Event::KeyPress(_) => {
                    ctx.emit("pressed")?;
                    Ok(Outcome::Accepted)
                }
                _ => ctx.default_event(event),
            }
        }
    }

    #[test]
    fn widgets_emit_from_their_handlers() -> Result<()> {
        let log = Log::default();
        let mut h = Harness::new()?;
        let root = h.root();
        let e = h.core.add_child(root, Emitter)?;
        h.core.add_callback(e, "pressed", logger(&log, "pressed"), "key")?;
        h.core.set_focus(e, true)?;
        h.key('p')?;
        assert_eq!(*log.borrow(), vec!["pressed:key"]);
        Ok(())
    }

    /// Counts its own bound handler runs, and on a key press emits
    /// `poke` on `target`, or on itself when there is none.
    #[derive(Default)]
    struct Clicker {
        hits: u32,
        target: Option<WidgetId>,
    }

    impl Widget for Clicker {
        fn on_event(&mut self, event: &Event, ctx: &mut Context) -> Result<Outcome> {
            match event {
                Event::KeyPress(_) => {
                    let target = self.target.unwrap_or(ctx.id());
                    ctx.core().emit_callback(target, "poke")?;
                    Ok(Outcome::Accepted)
                }
                _ => ctx.default_event(event),
            }
        }
    }

    /// Bind a hit-counting `poke` handler on `source` to `receiver`.
    fn bind_hits(h: &mut Harness, source: WidgetId, receiver: WidgetId) -> Result<()> {
        h.core.add_instance_callback::<Clicker, _>(
            source,
            "poke",
            receiver,
            |c, _core, _emitter, _payload| {
                c.hits += 1;
                Ok(())
            },
            (),
        )
    }

    #[test]
    fn self_bound_handlers_run_after_the_emitting_hook() -> Result<()> {
        let mut h = Harness::new()?;
        let root = h.root();
        let c = h.core.add_child(root, Clicker::default())?;
        bind_hits(&mut h, c, c)?;
        h.core.set_focus(c, true)?;

        assert_eq!(h.key('x')?, Outcome::Accepted);
        assert_eq!(h.core.with_widget::<Clicker, _>(c, |c, _| Ok(c.hits))?, 1);
        h.key('y')?;
        assert_eq!(h.core.with_widget::<Clicker, _>(c, |c, _| Ok(c.hits))?, 2);
        Ok(())
    }

    #[test]
    fn handlers_bound_to_a_busy_parent_are_delivered() -> Result<()> {
        let mut h = Harness::new()?;
        let root = h.root();
        let parent = h.core.add_child(root, Clicker::default())?;
        let child = h.core.add_child(parent, Blank)?;
        h.core.with_widget::<Clicker, _>(parent, |p, _| {
            p.target = Some(child);
            Ok(())
        })?;
        bind_hits(&mut h, child, parent)?;
        h.core.set_focus(parent, true)?;

        h.key('x')?;
        assert_eq!(
            h.core.with_widget::<Clicker, _>(parent, |p, _| Ok(p.hits))?,
            1
        );
        Ok(())
    }

    #[test]
    fn deferred_calls_die_with_their_receiver() -> Result<()> {
        /// Destroys itself after emitting.
        struct Doomed;
        impl Widget for Doomed {
            fn on_event(&mut self, event: &Event, ctx: &mut Context) -> Result<Outcome> {
                if let Event::KeyPress(_) = event {
                    let id = ctx.id();
                    ctx.core().emit_callback(id, "poke")?;
                    ctx.core().destroy(id)?;
                    return Ok(Outcome::Accepted);
                }
                ctx.default_event(event)
            }
        }

        let mut h = Harness::new()?;
        let root = h.root();
        let d = h.core.add_child(root, Doomed)?;
        let ran = Rc::new(RefCell::new(false));
        let flag = ran.clone();
        h.core.add_instance_callback::<Doomed, _>(
            d,
            "poke",
            d,
            move |_w, _core, _emitter, _payload| {
                *flag.borrow_mut() = true;
                Ok(())
            },
            (),
        )?;
        h.core.set_focus(d, true)?;
        h.key('x')?;
        assert!(!h.core.contains(d));
        assert!(!*ran.borrow());
        Ok(())
    }
}
