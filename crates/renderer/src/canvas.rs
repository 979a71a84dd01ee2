use std::sync::Arc;
use strain_core::BACKGROUND;

/// One character cell: a glyph plus the palette attribute it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub attr:   &'static str,
}

impl Cell {
    pub const BLANK: Self = Self { symbol: ' ', attr: BACKGROUND };

    pub const fn new(symbol: char, attr: &'static str) -> Self {
        Self { symbol, attr }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// A single rendered bar, top cell first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    cells:  Vec<Cell>,
    filled: usize,
}

impl Column {
    /// A background-only column `rows` cells tall.
    pub fn blank(rows: usize) -> Self {
        Self { cells: vec![Cell::BLANK; rows], filled: 0 }
    }

    /// Build a column whose bottom `filled` cells are taken from `fill`, the
    /// cell just above them optionally replaced by `cap`.
    ///
    /// `filled` counts the capped cell.
    pub(crate) fn bar(rows: usize, filled: usize, fill: Cell, cap: Option<Cell>) -> Self {
        let filled = filled.min(rows);
        let mut cells = vec![Cell::BLANK; rows];
        for cell in &mut cells[rows - filled..] {
            *cell = fill;
        }
        if let (Some(cap), true) = (cap, filled > 0) {
            cells[rows - filled] = cap;
        }
        Self { cells, filled }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of non-background cells, counted from the bottom.
    pub fn filled(&self) -> usize {
        self.filled
    }
}

/// The output of one [`ScalableBarGraph`](crate::ScalableBarGraph) render:
/// columns left to right.
///
/// Columns are shared with the graph's render cache, so two canvases taken
/// from consecutive renders can be compared column-by-column with
/// [`Arc::ptr_eq`] to see which columns were actually recomputed.
#[derive(Debug, Clone)]
pub struct Canvas {
    rows:    usize,
    columns: Vec<Arc<Column>>,
}

impl Canvas {
    pub(crate) fn new(rows: usize, columns: Vec<Arc<Column>>) -> Self {
        Self { rows, columns }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    /// Cell at `(col, row)`, row 0 at the top.
    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        self.columns.get(col)?.cells.get(row).copied()
    }

    /// Filled-cell count of every column.
    pub fn heights(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.filled()).collect()
    }
}

/// A row-major cell grid that a whole [`Tree`](crate::Tree) is composited into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    cols:  usize,
    rows:  usize,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows, cells: vec![Cell::BLANK; cols * rows] }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.cols && y < self.rows).then(|| self.cells[y * self.cols + x])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x] = cell;
        }
    }

    /// One row of cells, `None` past the bottom edge.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        (y < self.rows).then(|| &self.cells[y * self.cols..(y + 1) * self.cols])
    }

    /// Write `text` starting at `(x, y)`, clipped to `width` cells and the
    /// surface edge.
    pub fn put_str(&mut self, x: usize, y: usize, width: usize, text: &str, attr: &'static str) {
        for (i, ch) in text.chars().take(width).enumerate() {
            self.set(x + i, y, Cell::new(ch, attr));
        }
    }

    /// Write `text` centred inside `width` cells starting at `x`.
    pub fn put_centered(&mut self, x: usize, y: usize, width: usize, text: &str, attr: &'static str) {
        let len = text.chars().count().min(width);
        self.put_str(x + (width - len) / 2, y, width, text, attr);
    }

    /// Copy a graph canvas with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, x: usize, y: usize, canvas: &Canvas) {
        for (dx, column) in canvas.columns().iter().enumerate() {
            for (dy, &cell) in column.cells().iter().enumerate() {
                self.set(x + dx, y + dy, cell);
            }
        }
    }

    /// The glyphs of every row as plain strings.
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(|c| c.symbol).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Cell = Cell::new(' ', "fill");

    #[test]
    fn bar_fills_from_the_bottom() {
        let col = Column::bar(4, 2, FILL, None);
        let attrs: Vec<_> = col.cells().iter().map(|c| c.attr).collect();
        assert_eq!(attrs, vec![BACKGROUND, BACKGROUND, "fill", "fill"]);
        assert_eq!(col.filled(), 2);
    }

    #[test]
    fn bar_cap_replaces_top_filled_cell() {
        let col = Column::bar(3, 2, FILL, Some(Cell::new('▄', "cap")));
        assert_eq!(col.cells()[1], Cell::new('▄', "cap"));
        assert_eq!(col.cells()[2], FILL);
    }

    #[test]
    fn bar_height_is_clamped() {
        assert_eq!(Column::bar(3, 9, FILL, None).filled(), 3);
    }

    #[test]
    fn surface_clips_text() {
        let mut s = Surface::new(4, 1);
        s.put_str(2, 0, 10, "abc", "t");
        assert_eq!(s.lines(), vec!["  ab".to_string()]);
    }

    #[test]
    fn surface_centres_text() {
        let mut s = Surface::new(7, 1);
        s.put_centered(0, 0, 7, "abc", "t");
        assert_eq!(s.lines(), vec!["  abc  ".to_string()]);
    }

    #[test]
    fn blit_copies_columns() {
        let canvas = Canvas::new(2, vec![Arc::new(Column::bar(2, 1, Cell::new('#', "f"), None))]);
        let mut s = Surface::new(3, 2);
        s.blit(1, 0, &canvas);
        assert_eq!(s.lines(), vec!["   ".to_string(), " # ".to_string()]);
    }
}
