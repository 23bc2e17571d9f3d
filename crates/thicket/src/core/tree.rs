//! Generic tree walks over the widget arena.
//!
//! Layout, redrawing, destruction and print-area invalidation visit a
//! subtree through `preorder`, pruning with `Walk::Skip`. Focus cycling uses
//! `cycle_from`. Hit testing keeps its own descent because it reads the tree
//! immutably, and edge-focus search because it backtracks out of windows
//! with nothing to focus.

use crate::{
    core::{id::WidgetId, world::Core},
    error::Result,
};

/// Traversal control returned by a visitor.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Walk<T> {
    /// Don't descend into this node's children, but keep walking.
    Skip,
    /// Stop the walk and return a value.
    Handle(T),
    /// Keep walking.
    Continue,
}

impl<T> Walk<T> {
    /// The handle value of the traversal, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Handle(v) => Some(v),
            _ => None,
        }
    }

    /// Did the traversal return Handle?
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handle(_))
    }

    /// Did the traversal return Continue?
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Order in which siblings are visited.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    /// First child to last.
    Forward,
    /// Last child to first.
    Backward,
}

impl Direction {
    /// Iterate a slice in this direction.
    pub(crate) fn iter<'a, T>(self, items: &'a [T]) -> Box<dyn Iterator<Item = &'a T> + 'a> {
        match self {
            Self::Forward => Box::new(items.iter()),
            Self::Backward => Box::new(items.iter().rev()),
        }
    }
}

/// Scan `items` circularly starting just after `start` (or just before it,
/// going backward), returning the first item other than `start` that matches
/// `pred`. Each item is visited at most once.
pub(crate) fn cycle_from<T: Copy + PartialEq>(
    items: &[T],
    start: T,
    dir: Direction,
    mut pred: impl FnMut(T) -> bool,
) -> Option<T> {
    let n = items.len();
    let pos = items.iter().position(|i| *i == start)?;
    (1..n)
        .map(|step| match dir {
            Direction::Forward => items[(pos + step) % n],
            Direction::Backward => items[(pos + n - step) % n],
        })
        .find(|i| pred(*i))
}

impl Core {
    /// A preorder traversal of the subtree under `id`, in the given sibling
    /// direction.
    ///
    /// - Walk::Skip prunes the children of the current node.
    /// - Walk::Handle stops the traversal and the contained value is returned.
    /// - Any error return stops the traversal and the error is returned.
    ///
    /// The visitor may mutate the core. Children are read after the visitor
    /// returns, so a visitor that destroys nodes only affects what follows.
    pub(crate) fn preorder<T>(
        &mut self,
        id: WidgetId,
        dir: Direction,
        f: &mut dyn FnMut(&mut Self, WidgetId) -> Result<Walk<T>>,
    ) -> Result<Walk<T>> {
        let res = f(self, id)?;
        if res.is_continue() {
            let children = match self.nodes.get(id) {
                Some(n) => n.children.clone(),
                None => return Ok(Walk::Continue),
            };
            for child in dir.iter(&children) {
                if !self.contains(*child) {
                    continue;
                }
                if let Walk::Handle(t) = self.preorder(*child, dir, f)? {
                    return Ok(Walk::Handle(t));
                }
            }
        }
        // Skip is not propagated upwards, so we translate it to continue.
        Ok(match res {
            Walk::Skip => Walk::Continue,
            _ => res,
        })
    }
}
