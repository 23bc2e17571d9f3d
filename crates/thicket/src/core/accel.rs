//! Accelerator tables.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

use crate::{
    core::{id::WidgetId, node::Kind, world::Core},
    error::{Error, Result},
    event::Key,
};

/// A key bound to a target widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accelerator {
    /// The bound key.
    pub key: Key,
    /// The widget that receives the accelerator event.
    pub target: WidgetId,
}

impl Core {
    /// The widget whose table holds accelerators for `target`: its window,
    /// unless that is the status bar or menu bar, in which case the root.
    pub(crate) fn accelerator_owner(&self, target: WidgetId) -> Result<WidgetId> {
        Ok(match self.window_of(target)? {
            Some(w) if !matches!(self.node(w)?.kind, Kind::StatusBar | Kind::MenuBar) => w,
            _ => self.root,
        })
    }

    /// Bind `key` to `target`.
    pub fn add_accelerator(&mut self, key: Key, target: WidgetId) -> Result<()> {
        let owner = self.accelerator_owner(target)?;
        match self.node_mut(owner)?.accelerators.as_mut() {
            Some(table) => {
                table.push(Accelerator { key, target });
                Ok(())
            }
            None => Err(Error::Internal(format!(
                "{owner:?} has no accelerator table"
            ))),
        }
    }

    /// Remove every binding that targets `target`.
    pub fn del_accelerator(&mut self, target: WidgetId) -> Result<()> {
        let owner = self.accelerator_owner(target)?;
        if let Some(table) = self.node_mut(owner)?.accelerators.as_mut() {
            table.retain(|a| a.target != target);
        }
        Ok(())
    }

    /// The accelerator table owned by `owner`, if it has one.
    pub fn accelerators(&self, owner: WidgetId) -> Result<&[Accelerator]> {
        Ok(self.node(owner)?.accelerators.as_deref().unwrap_or_default())
    }

    /// Find the target bound to `key`, searching `window`'s table and then
    /// the root's.
    pub(crate) fn find_accelerator(&self, window: Option<WidgetId>, key: Key) -> Option<WidgetId> {
        let tables = window.into_iter().chain([self.root]);
        for owner in tables {
            let Some(node) = self.nodes.get(owner) else {
                continue;
            };
            if let Some(a) = node
                .accelerators
                .iter()
                .flatten()
                .find(|a| a.key == key)
            {
                return Some(a.target);
            }
        }
        None
    }

    /// Render the bindings in `owner`'s table for display.
    pub fn accelerator_table(&self, owner: WidgetId) -> Result<String> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Key", "Target"]);
        for a in self.accelerators(owner)? {
            let name = self.node(a.target).map(|n| n.name.as_str()).unwrap_or("?");
            table.add_row(vec![format!("{:?}", a.key.key), format!("{name} {:?}", a.target)]);
        }
        Ok(table.to_string())
    }
}
