//! Matching grid contents in tests.
use crate::{
    core::testing::grid::Grid,
    geom::Point,
    style::Color,
};

/// Build the expected-lines slice for [`BufTest`] assertions.
#[macro_export]
macro_rules! buf {
    ($($line:literal)*) => {
        &[$($line),*]
    };
}

/// Compares a [`Grid`] against expected text. The trailing half of a wide
/// character shows as 'X' unless told otherwise, and trailing blanks are
/// ignored on both sides.
pub struct BufTest<'a> {
    /// The grid under test.
    grid: &'a Grid,
    /// Stand-in for wide-character continuation cells.
    null_char: char,
    /// Wildcard matching any cell.
    any_char: Option<char>,
}

impl<'a> BufTest<'a> {
    /// Test against `grid`.
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            null_char: 'X',
            any_char: None,
        }
    }

    /// Change the continuation-cell marker.
    pub fn with_null(mut self, null_char: char) -> Self {
        self.null_char = null_char;
        self
    }

    /// Treat `any_char` in expected lines as matching any cell.
    pub fn with_any(mut self, any_char: char) -> Self {
        self.any_char = Some(any_char);
        self
    }

    /// Grid rows with continuation cells replaced by the marker.
    pub fn lines(&self) -> Vec<String> {
        let size = self.grid.size();
        (0..size.h as i32)
            .map(|y| {
                (0..size.w as i32)
                    .filter_map(|x| self.grid.get(Point::new(x, y)))
                    .map(|c| if c.ch == '\0' { self.null_char } else { c.ch })
                    .collect()
            })
            .collect()
    }

    /// Does the grid match the expected lines?
    pub fn matches(&self, expected: &[&str]) -> bool {
        let actual = self.lines();
        if expected.len() != actual.len() {
            return false;
        }
        expected.iter().zip(&actual).all(|(want, got)| {
            let (want, got) = (want.trim_end(), got.trim_end());
            want.chars().count() == got.chars().count()
                && want
                    .chars()
                    .zip(got.chars())
                    .all(|(w, g)| Some(w) == self.any_char || w == g)
        })
    }

    /// Panic with both renderings if the grid doesn't match.
    pub fn assert_matches(&self, expected: &[&str]) {
        if self.matches(expected) {
            return;
        }
        let actual = self.lines();
        let width = expected
            .iter()
            .map(|l| l.chars().count())
            .chain(actual.iter().map(|l| l.chars().count()))
            .max()
            .unwrap_or(10);
        let mut out = String::from("\nExpected:\n");
        for line in expected {
            out.push_str(&format!("│{line:width$}│\n"));
        }
        out.push_str("\nActual:\n");
        for line in &actual {
            out.push_str(&format!("│{line:width$}│\n"));
        }
        panic!("grid contents did not match{out}");
    }

    /// Does any row contain `txt`?
    pub fn contains_text(&self, txt: &str) -> bool {
        self.lines().iter().any(|l| l.contains(txt))
    }

    /// Does any row contain `txt` with every character in background `bg`?
    pub fn contains_text_bg(&self, txt: &str, bg: Color) -> bool {
        let n = txt.chars().count() as i32;
        let size = self.grid.size();
        if n == 0 || n > size.w as i32 {
            return false;
        }
        (0..size.h as i32).any(|y| {
            (0..=size.w as i32 - n).any(|x| {
                txt.chars().enumerate().all(|(i, ch)| {
                    self.grid
                        .get(Point::new(x + i as i32, y))
                        .is_some_and(|c| c.ch == ch && c.style.bg == bg)
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::Expanse, style::Style};

    #[test]
    fn wildcard_and_trailing_blanks() {
        let mut g = Grid::new(Expanse::new(5, 2));
        g.put(Point::new(0, 0), "ab", Style::default());
        g.put(Point::new(1, 1), "日", Style::new(Color::Red, Color::Blue));
        let t = BufTest::new(&g).with_any('?');
        assert!(t.matches(buf!("a?" " 日X")));
        assert!(!t.matches(buf!("ab" " 日")));
        assert!(t.contains_text_bg("日", Color::Blue));
        assert!(!t.contains_text_bg("ab", Color::Blue));
        t.assert_matches(buf!("ab   " " 日X  "));
    }
}
