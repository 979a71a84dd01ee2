use crate::canvas::{Canvas, Cell, Column};
use std::collections::VecDeque;
use std::sync::Arc;
use strain_core::Palette;

/// Partial-cell glyphs indexed by filled eighths (0 = none).
const EIGHTHS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];

/// One bar of input: its value and which of the two palette colours it uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub value: f32,
    pub dark:  bool,
}

impl Point {
    pub fn new(value: f32, dark: bool) -> Self {
        Self { value, dark }
    }
}

/// Single-series bar chart rendered into a character-cell grid.
///
/// Rendering is incremental.  The graph keeps the columns it drew last time;
/// when the size, scale, palette and window width are unchanged it only
/// renders the bars added since, pushes them on the right and drops the same
/// number from the left.  Anything else triggers a full rebuild.
#[derive(Debug, Clone)]
pub struct ScalableBarGraph {
    palette: Palette,
    smooth:  bool,
    points:  Vec<Point>,
    top:     f32,
    /// `set_data` calls since the last render.
    pending: usize,
    /// Cached columns must not be reused.
    stale:   bool,
    columns: VecDeque<Arc<Column>>,
    /// `(rows, cols)` of the last render.
    size:    (usize, usize),
}

impl ScalableBarGraph {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            smooth:  false,
            points:  Vec::new(),
            top:     0.0,
            pending: 0,
            stale:   true,
            columns: VecDeque::new(),
            size:    (0, 0),
        }
    }

    /// Replace the data window.  `points` should cover the visible columns,
    /// oldest first, and is expected to have advanced by one sample since the
    /// previous call.  A window narrower than the graph is redrawn in full on
    /// every render.  Nothing is drawn until [`render`](Self::render).
    pub fn set_data(&mut self, points: Vec<Point>, top: f32) {
        if top != self.top || points.len() != self.points.len() {
            self.stale = true;
        }
        self.points = points;
        self.top = top;
        self.pending += 1;
    }

    pub fn set_palette(&mut self, palette: Palette) {
        if palette != self.palette {
            self.palette = palette;
            self.stale = true;
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        if smooth != self.smooth {
            self.smooth = smooth;
            self.stale = true;
        }
    }

    /// Force the next render to rebuild every column.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// `(rows, cols)` of the last render, `(0, 0)` before the first one.
    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn render(&mut self, cols: usize, rows: usize) -> Canvas {
        let size = (rows, cols);
        let shift = self.pending;

        // Scrolling only holds when the data spans the whole width; otherwise
        // the leftmost columns are padding and must stay blank.
        let scrollable = self.points.len() >= cols && shift < cols;
        if size != self.size || self.stale || !scrollable {
            self.rebuild(cols, rows);
        } else {
            for point in &self.points[self.points.len() - shift..] {
                let column = render_column(*point, self.top, rows, self.palette, self.smooth);
                self.columns.push_back(Arc::new(column));
                self.columns.pop_front();
            }
        }

        self.size = size;
        self.pending = 0;
        self.stale = false;
        Canvas::new(rows, self.columns.iter().cloned().collect())
    }

    fn rebuild(&mut self, cols: usize, rows: usize) {
        let data = &self.points[self.points.len().saturating_sub(cols)..];
        let blank = Arc::new(Column::blank(rows));

        self.columns.clear();
        self.columns
            .extend(std::iter::repeat(blank).take(cols - data.len()));
        self.columns.extend(
            data.iter()
                .map(|p| Arc::new(render_column(*p, self.top, rows, self.palette, self.smooth))),
        );
    }
}

/// Number of filled cells for `value` on a `rows`-tall graph scaled to `top`:
/// `ceil(rows * value / top)` clamped to `[0, rows]`.
///
/// A non-positive or non-finite `top` draws nothing.
pub fn cell_height(value: f32, top: f32, rows: usize) -> usize {
    eighths(value, top, rows).div_ceil(8)
}

/// Filled eighth-cells; `ceil` of the exact height so any positive value
/// shows at least one eighth.
fn eighths(value: f32, top: f32, rows: usize) -> usize {
    if !(top > 0.0 && top.is_finite()) || !(value > 0.0) {
        return 0;
    }
    if value >= top {
        return rows * 8;
    }
    let height = rows as f64 * f64::from(value) / f64::from(top);
    ((height * 8.0).ceil() as usize).min(rows * 8)
}

fn render_column(point: Point, top: f32, rows: usize, palette: Palette, smooth: bool) -> Column {
    let fill = Cell::new(' ', palette.fill(point.dark));

    if !smooth {
        return Column::bar(rows, cell_height(point.value, top, rows), fill, None);
    }

    let eighths = eighths(point.value, top, rows);
    let partial = eighths % 8;
    let cap = (partial > 0).then(|| Cell::new(EIGHTHS[partial], palette.smooth(point.dark)));
    Column::bar(rows, eighths.div_ceil(8), fill, cap)
}
