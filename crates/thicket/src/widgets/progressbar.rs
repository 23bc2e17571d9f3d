use tracing::trace;

use crate::{
    core::{context::Context, id::WidgetId, world::Core},
    error::Result,
    geom::Point,
    style::{Color, Style},
    widget::Widget,
};

/// A horizontal bar showing completion from 0 to 100 percent.
///
/// The percentage label sits on the row above the bar, right-aligned with
/// it. Progress only moves forward: a value at or below the current one is
/// ignored until the bar is reset.
#[derive(Debug, Default)]
pub struct ProgressBar {
    /// Completion, or `None` before any progress has been reported.
    percentage: Option<u32>,
}

/// The cells of a bar: filled cells, an optional boundary cell, and the
/// remaining empty cells.
#[derive(Debug, PartialEq, Eq)]
struct BarCells {
    /// Fully filled cells.
    filled: usize,
    /// The boundary cell: `true` for a half block, `false` for a filled
    /// blank.
    partial: Option<bool>,
    /// Cells left empty.
    empty: usize,
}

/// Split a bar of `len` cells at `percentage`. Terminals with fewer than 16
/// colors never get the half block.
fn bar_cells(percentage: Option<u32>, len: usize, max_colors: u32) -> BarCells {
    let exact = match percentage {
        Some(p) => (len as f64 * f64::from(p)) / 100.0,
        None => 0.0,
    };
    let filled = exact.trunc() as usize;
    let partial = match percentage {
        Some(p) if p > 0 && p <= 100 && filled < len => {
            Some(exact.round() <= exact.trunc() && max_colors >= 16)
        }
        _ => None,
    };
    let used = filled + usize::from(partial.is_some());
    BarCells {
        filled,
        partial,
        empty: len.saturating_sub(used),
    }
}

/// The percentage label.
fn label(percentage: Option<u32>) -> String {
    match percentage {
        Some(p) => format!("{p:3} %"),
        None => "--- %".into(),
    }
}

impl ProgressBar {
    /// A bar with no progress reported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a progress bar under `parent`. Progress bars never take focus
    /// and draw a shadow where the terminal can show one.
    pub fn install(self, core: &mut Core, parent: WidgetId) -> Result<WidgetId> {
        let id = core.add_child(parent, self)?;
        core.set_focusable(id, false)?;
        core.set_shadow(id, true)?;
        Ok(id)
    }

    /// Current completion.
    pub fn percentage(&self) -> Option<u32> {
        self.percentage
    }

    /// Report progress. `None` clears it; values above 100 are capped; a
    /// value that doesn't move the bar forward is ignored.
    pub fn set_percentage(&mut self, ctx: &mut Context, value: Option<u32>) -> Result<()> {
        match (value, self.percentage) {
            (None, _) => self.percentage = None,
            (Some(v), _) if v > 100 => self.percentage = Some(100),
            (Some(v), Some(cur)) if v <= cur => return Ok(()),
            (Some(v), _) => self.percentage = Some(v),
        }
        trace!(percentage = ?self.percentage, "progress");
        self.refresh(ctx)
    }

    /// Clear the reported progress.
    pub fn reset(&mut self, ctx: &mut Context) -> Result<()> {
        self.percentage = None;
        self.refresh(ctx)
    }

    /// Hide the bar, blanking it, its shadow and its label.
    pub fn hide(&mut self, ctx: &mut Context) -> Result<()> {
        let id = ctx.id();
        ctx.core().hide(id)?;
        let size = ctx.size()?;
        let shadow = ctx.core().shadow_size(id)?;
        ctx.hide_area(size.grow(shadow.w, shadow.h))?;
        let (fg, bg) = self.label_colors(ctx)?;
        ctx.print(Point::new(size.w as i32 - 4, 0), "      ", Style::new(fg, bg))
    }

    /// Redraw the label and bar if shown, then flush.
    fn refresh(&mut self, ctx: &mut Context) -> Result<()> {
        if ctx.flags()?.shown {
            self.draw_percentage(ctx)?;
            self.draw_bar(ctx)?;
        }
        ctx.flush()
    }

    /// The parent's colors, or the dialog colors for a parentless bar.
    fn label_colors(&self, ctx: &mut Context) -> Result<(Color, Color)> {
        let id = ctx.id();
        match ctx.core().parent(id)? {
            Some(p) => ctx.core().widget_colors(p),
            None => Ok((ctx.colors().dialog_fg, ctx.colors().dialog_bg)),
        }
    }

    /// Draw the percentage label above the right end of the bar.
    fn draw_percentage(&mut self, ctx: &mut Context) -> Result<()> {
        let (fg, bg) = self.label_colors(ctx)?;
        let style = Style::new(fg, bg).reverse(ctx.capabilities().monochrome);
        let w = ctx.size()?.w as i32;
        ctx.print(Point::new(w - 3, 0), &label(self.percentage), style)
    }

    /// Draw the bar itself.
    fn draw_bar(&mut self, ctx: &mut Context) -> Result<()> {
        let len = ctx.size()?.w as usize;
        let caps = *ctx.capabilities();
        let (pfg, pbg) = (ctx.colors().progressbar_fg, ctx.colors().progressbar_bg);
        let mono = caps.monochrome;
        let cells = bar_cells(self.percentage, len, caps.max_colors);

        let filled = Style::new(pbg, pfg);
        let rest = Style::new(pfg, pbg).reverse(mono);
        let mut x = 1;
        ctx.print(Point::new(x, 1), &" ".repeat(cells.filled), filled)?;
        x += cells.filled as i32;
        match cells.partial {
            Some(true) => {
                ctx.print(Point::new(x, 1), "▌", Style::new(pfg, pbg))?;
                x += 1;
            }
            Some(false) => {
                ctx.print(Point::new(x, 1), " ", filled)?;
                x += 1;
            }
            None => {}
        }
        let fill = if caps.max_colors < 16 { "▒" } else { " " };
        ctx.print(Point::new(x, 1), &fill.repeat(cells.empty), rest)
    }
}

impl Widget for ProgressBar {
    fn draw(&mut self, ctx: &mut Context) -> Result<()> {
        self.draw_percentage(ctx)?;
        self.draw_bar(ctx)?;
        if ctx.flags()?.shadow {
            ctx.draw_shadow()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(label(None), "--- %");
        assert_eq!(label(Some(7)), "  7 %");
        assert_eq!(label(Some(100)), "100 %");
    }

    #[test]
    fn cells() {
        // 40% of 10 is exact, so the boundary is a half block.
        assert_eq!(
            bar_cells(Some(40), 10, 16),
            BarCells {
                filled: 4,
                partial: Some(true),
                empty: 5
            }
        );
        // 25% of 10 is 2.5, which rounds up: a filled blank.
        assert_eq!(
            bar_cells(Some(25), 10, 16),
            BarCells {
                filled: 2,
                partial: Some(false),
                empty: 7
            }
        );
        // Eight colors never get the half block.
        assert_eq!(bar_cells(Some(24), 10, 8).partial, Some(false));
        assert_eq!(
            bar_cells(None, 10, 16),
            BarCells {
                filled: 0,
                partial: None,
                empty: 10
            }
        );
        assert_eq!(
            bar_cells(Some(100), 10, 16),
            BarCells {
                filled: 10,
                partial: None,
                empty: 0
            }
        );
        assert_eq!(bar_cells(Some(0), 4, 16).empty, 4);
    }
}
