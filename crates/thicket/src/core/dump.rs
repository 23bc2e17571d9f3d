use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    core::{id::WidgetId, world::Core},
    error::Result,
};

/// Render the subtree under `root` with each widget's kind, geometry and
/// state for visual display. This is a debug function.
pub fn dump(core: &Core, root: WidgetId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, core, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Like [`dump`], without color codes.
pub fn dump_plain(core: &Core, root: WidgetId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, core, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Emit one widget and recurse into its children.
fn dump_node(buffer: &mut Buffer, core: &Core, id: WidgetId, level: usize) -> Result<()> {
    let node = core.node(id)?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name)?;
    buffer.reset()?;
    write!(buffer, " {id:?} {:?}", node.kind)?;

    let f = node.flags;
    let indicators: Vec<&str> = [
        (f.focus, "FOCUSED"),
        (f.shown, "shown"),
        (f.hidden, "hidden"),
        (!f.active, "disabled"),
        (f.modal, "modal"),
        (f.window_active, "active"),
    ]
    .into_iter()
    .filter_map(|(on, s)| on.then_some(s))
    .collect();
    if !indicators.is_empty() {
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(buffer, " [{}]", indicators.join(", "))?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    let t = node.term_geometry();
    write_field(
        buffer,
        &indent,
        "term:",
        &format!("({}, {}) {}x{}", t.x1, t.y1, t.width(), t.height()),
    )?;
    let c = node.client_offset;
    write_field(
        buffer,
        &indent,
        "client:",
        &format!("({}, {})-({}, {})", c.x1, c.y1, c.x2, c.y2),
    )?;
    if !node.padding.is_zero() {
        write_field(buffer, &indent, "padding:", &format!("{:?}", node.padding))?;
    }
    if let Some(area) = node.print_area {
        write_field(buffer, &indent, "print area:", &format!("{:?}", area.buffer))?;
    }

    for child in &node.children {
        dump_node(buffer, core, *child, level + 1)?;
    }
    Ok(())
}
