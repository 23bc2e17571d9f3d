use std::sync::{Arc, Mutex, MutexGuard};

use slotmap::SlotMap;
use unicode_width::UnicodeWidthChar;

use crate::{
    core::{
        id::{BufferId, WidgetId},
        render::Renderer,
    },
    error::{Error, Result},
    geom::{Expanse, Point},
    style::Style,
};

/// One character cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// The character. `'\0'` marks the trailing half of a wide character.
    pub ch: char,
    /// The style it was printed with.
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// An in-memory buffer of cells.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Size in cells.
    size: Expanse,
    /// Row-major cells.
    cells: Vec<Cell>,
    /// Last cursor placement and visibility.
    cursor: Option<(Point, bool)>,
    /// Placement on the terminal, 0-based.
    origin: Point,
    /// Is the buffer composited?
    visible: bool,
}

impl Grid {
    /// A blank grid.
    pub fn new(size: Expanse) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size.area() as usize],
            cursor: None,
            origin: Point::zero(),
            visible: false,
        }
    }

    /// Size in cells.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Index of a position, if it's inside the grid.
    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x as u32 >= self.size.w || p.y as u32 >= self.size.h {
            return None;
        }
        Some(p.y as usize * self.size.w as usize + p.x as usize)
    }

    /// The cell at a position.
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Print text, clipping at the edges.
    pub fn put(&mut self, at: Point, text: &str, style: Style) {
        let mut x = at.x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if let Some(i) = self.index(Point::new(x, at.y)) {
                self.cells[i] = Cell { ch, style };
            }
            if w == 2
                && let Some(i) = self.index(Point::new(x + 1, at.y))
            {
                self.cells[i] = Cell { ch: '\0', style };
            }
            x += w;
        }
    }

    /// Fill with blanks.
    pub fn fill(&mut self, style: Style) {
        for c in &mut self.cells {
            *c = Cell { ch: ' ', style };
        }
    }

    /// Change size, keeping whatever content still fits.
    pub fn resize(&mut self, size: Expanse) {
        let mut next = Self::new(size);
        for y in 0..size.h.min(self.size.h) as i32 {
            for x in 0..size.w.min(self.size.w) as i32 {
                let p = Point::new(x, y);
                if let (Some(src), Some(dst)) = (self.index(p), next.index(p)) {
                    next.cells[dst] = self.cells[src].clone();
                }
            }
        }
        next.cursor = self.cursor;
        next.origin = self.origin;
        next.visible = self.visible;
        *self = next;
    }

    /// One row as text, with trailing blanks kept.
    pub fn line(&self, y: u32) -> String {
        (0..self.size.w as i32)
            .filter_map(|x| self.get(Point::new(x, y as i32)))
            .filter(|c| c.ch != '\0')
            .map(|c| c.ch)
            .collect()
    }

    /// Every row as text.
    pub fn lines(&self) -> Vec<String> {
        (0..self.size.h).map(|y| self.line(y)).collect()
    }

    /// Last cursor placement and whether it was visible.
    pub fn cursor(&self) -> Option<(Point, bool)> {
        self.cursor
    }

    /// Terminal placement.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Is the buffer composited?
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Everything a [`GridRenderer`] has been told.
#[derive(Debug, Default)]
pub struct GridState {
    /// Live buffers.
    pub buffers: SlotMap<BufferId, Grid>,
    /// Calls to `start_update`.
    pub starts: usize,
    /// Calls to `finish_update`.
    pub finishes: usize,
    /// Calls to `flush`.
    pub flushes: usize,
    /// Calls to `resize_buffer`.
    pub resizes: usize,
    /// Registered preprocessing handlers.
    pub handlers: Vec<(BufferId, WidgetId)>,
    /// Make every allocation fail.
    pub fail_allocations: bool,
}

impl GridState {
    /// A buffer by id.
    pub fn grid(&self, id: BufferId) -> Option<&Grid> {
        self.buffers.get(id)
    }

    /// The text of a buffer, one string per row.
    pub fn lines(&self, id: BufferId) -> Vec<String> {
        self.grid(id).map(Grid::lines).unwrap_or_default()
    }
}

/// An in-memory [`Renderer`]. Its state is shared, so tests keep a handle
/// and inspect it after the renderer has been given to the core.
#[derive(Debug, Clone, Default)]
pub struct GridRenderer {
    /// Shared state.
    state: Arc<Mutex<GridState>>,
}

impl GridRenderer {
    /// A renderer and a handle to its state.
    pub fn create() -> (Arc<Mutex<GridState>>, Self) {
        let r = Self::default();
        (r.state.clone(), r)
    }

    /// Lock the state.
    fn lock(&self) -> Result<MutexGuard<'_, GridState>> {
        self.state
            .lock()
            .map_err(|_| Error::Render("grid state poisoned".into()))
    }

    /// Run `f` against a live buffer.
    fn with_grid(&self, buffer: BufferId, f: impl FnOnce(&mut Grid)) -> Result<()> {
        let mut s = self.lock()?;
        let grid = s
            .buffers
            .get_mut(buffer)
            .ok_or_else(|| Error::Render(format!("unknown buffer {buffer:?}")))?;
        f(grid);
        Ok(())
    }
}

impl Renderer for GridRenderer {
    fn allocate_buffer(&mut self, size: Expanse) -> Result<BufferId> {
        let mut s = self.lock()?;
        if s.fail_allocations {
            return Err(Error::Allocation(format!(
                "refusing {}x{} buffer",
                size.w, size.h
            )));
        }
        Ok(s.buffers.insert(Grid::new(size)))
    }

    fn resize_buffer(&mut self, buffer: BufferId, size: Expanse) -> Result<()> {
        self.with_grid(buffer, |g| g.resize(size))?;
        self.lock()?.resizes += 1;
        Ok(())
    }

    fn release_buffer(&mut self, buffer: BufferId) {
        if let Ok(mut s) = self.lock() {
            s.buffers.remove(buffer);
            s.handlers.retain(|(b, _)| *b != buffer);
        }
    }

    fn clear(&mut self, buffer: BufferId, style: Style) -> Result<()> {
        self.with_grid(buffer, |g| g.fill(style))
    }

    fn print(&mut self, buffer: BufferId, at: Point, text: &str, style: Style) -> Result<()> {
        self.with_grid(buffer, |g| g.put(at, text, style))
    }

    fn set_cursor(&mut self, buffer: BufferId, at: Point, visible: bool) -> Result<()> {
        self.with_grid(buffer, |g| g.cursor = Some((at, visible)))
    }

    fn place_buffer(&mut self, buffer: BufferId, origin: Point, visible: bool) -> Result<()> {
        self.with_grid(buffer, |g| {
            g.origin = origin;
            g.visible = visible;
        })
    }

    fn start_update(&mut self) {
        if let Ok(mut s) = self.lock() {
            s.starts += 1;
        }
    }

    fn finish_update(&mut self) -> Result<()> {
        self.lock()?.finishes += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.lock()?.flushes += 1;
        Ok(())
    }

    fn add_preprocessing_handler(&mut self, buffer: BufferId, owner: WidgetId) {
        if let Ok(mut s) = self.lock() {
            s.handlers.push((buffer, owner));
        }
    }

    fn del_preprocessing_handler(&mut self, buffer: BufferId, owner: WidgetId) {
        if let Ok(mut s) = self.lock() {
            s.handlers.retain(|h| *h != (buffer, owner));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_clips() {
        let mut g = Grid::new(Expanse::new(4, 2));
        g.put(Point::new(2, 0), "abcd", Style::default());
        g.put(Point::new(-1, 1), "xyz", Style::default());
        assert_eq!(g.lines(), vec!["  ab", "yz  "]);
    }

    #[test]
    fn wide_chars() {
        let mut g = Grid::new(Expanse::new(4, 1));
        g.put(Point::new(0, 0), "日x", Style::default());
        assert_eq!(g.line(0), "日x ");
    }

    #[test]
    fn resize_keeps_content() {
        let mut g = Grid::new(Expanse::new(3, 3));
        g.put(Point::new(0, 0), "abc", Style::default());
        g.resize(Expanse::new(2, 1));
        assert_eq!(g.lines(), vec!["ab"]);
    }

    #[test]
    fn allocation_failure() -> Result<()> {
        let (state, mut r) = GridRenderer::create();
        let a = r.allocate_buffer(Expanse::new(2, 2))?;
        state.lock().unwrap().fail_allocations = true;
        assert!(matches!(
            r.allocate_buffer(Expanse::new(2, 2)),
            Err(Error::Allocation(_))
        ));
        r.release_buffer(a);
        assert!(state.lock().unwrap().buffers.is_empty());
        Ok(())
    }
}
