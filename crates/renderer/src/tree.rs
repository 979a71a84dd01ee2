use crate::bar_graph::ScalableBarGraph;
use crate::canvas::{Cell, Surface};
use strain_core::{AXIS, LINE, TITLE};

/// Placeholder shown when no scale has been computed yet.
pub const PLACEHOLDER_TICK: &str = "1";

/// Layout of a labelled graph vector: the axis labels and which series are
/// drawn, in what order.
///
/// Built by [`render_tree`] and replaced wholesale whenever visibility or the
/// scale changes; the host renders whatever tree is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    /// Nothing visible.
    Empty,
    Graphs {
        /// Overall title row, `None` when the title is empty.
        title: Option<String>,
        /// Tick labels for the current scale.
        axis:  Axis,
        /// Shared Y-axis followed by series and dividers.
        panes: Vec<Pane>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pane {
    /// The shared tick-label gutter.
    Axis,
    /// Series `index` with its one-row sub-title.
    Series { index: usize, title: String },
    /// One-column vertical line.
    Divider,
}

/// Shared Y-axis tick labels, lowest value first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    labels: Vec<String>,
    width:  usize,
}

impl Axis {
    /// An empty label list yields the single placeholder tick.
    pub fn new(labels: Vec<String>) -> Self {
        let labels = if labels.is_empty() {
            vec![PLACEHOLDER_TICK.to_string()]
        } else {
            labels
        };
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Self { labels, width }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Gutter width: the longest label.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row of label `i` in a `rows`-tall graph area, 0 at the top.  The last
    /// label sits on the top row and the first on the bottom row.
    fn row_of(&self, i: usize, rows: usize) -> usize {
        let last = self.labels.len() - 1;
        if last == 0 || rows <= 1 {
            return 0;
        }
        let span = rows - 1;
        span - (i * span + last / 2) / last
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Build the layout for the series whose visibility flag is set, labelled
/// with `axis`.
///
/// Visible series are separated by single dividers with none after the last.
/// With nothing visible the whole layout, title and axis included, collapses
/// to [`Tree::Empty`].
pub fn render_tree(title: &str, sub_titles: &[String], visible: &[bool], axis: &Axis) -> Tree {
    let mut panes = vec![Pane::Axis];

    for (index, sub_title) in sub_titles.iter().enumerate() {
        if !visible.get(index).copied().unwrap_or(false) {
            continue;
        }
        if panes.len() > 1 {
            panes.push(Pane::Divider);
        }
        panes.push(Pane::Series { index, title: sub_title.clone() });
    }

    if panes.len() == 1 {
        return Tree::Empty;
    }

    Tree::Graphs {
        title: (!title.is_empty()).then(|| title.to_string()),
        axis: axis.clone(),
        panes,
    }
}

impl Tree {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Indices of the series this tree draws, left to right.
    pub fn series(&self) -> Vec<usize> {
        match self {
            Self::Empty => Vec::new(),
            Self::Graphs { panes, .. } => panes
                .iter()
                .filter_map(|p| match p {
                    Pane::Series { index, .. } => Some(*index),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Composite the tree into a `cols` x `rows` surface, rendering every
    /// visible graph at its share of the width.
    ///
    /// Width left after the axis and dividers is split evenly between series;
    /// the leftmost series absorb the remainder one column each.
    pub fn compose(&self, graphs: &mut [ScalableBarGraph], cols: usize, rows: usize) -> Surface {
        let mut surface = Surface::new(cols, rows);
        let Self::Graphs { title, axis, panes } = self else {
            return surface;
        };

        let mut top = 0;
        if let Some(title) = title {
            surface.put_centered(0, 0, cols, title, TITLE);
            top = 1;
        }

        let series_count = panes.iter().filter(|p| matches!(p, Pane::Series { .. })).count();
        let divider_count = panes.iter().filter(|p| matches!(p, Pane::Divider)).count();
        let available = cols.saturating_sub(axis.width() + divider_count);
        let (share, extra) = (available / series_count, available % series_count);

        // Sub-title row, then the graph area.
        let graph_top = top + 1;
        let graph_rows = rows.saturating_sub(graph_top);

        let mut x = 0;
        let mut nth_series = 0;
        for pane in panes {
            match pane {
                Pane::Axis => {
                    for (i, label) in axis.labels().iter().enumerate() {
                        if graph_rows == 0 {
                            break;
                        }
                        let pad = axis.width() - label.chars().count();
                        let y = graph_top + axis.row_of(i, graph_rows);
                        surface.put_str(x + pad, y, label.len(), label, AXIS);
                    }
                    x += axis.width();
                }
                Pane::Divider => {
                    for y in top..rows {
                        surface.set(x, y, Cell::new('│', LINE));
                    }
                    x += 1;
                }
                Pane::Series { index, title } => {
                    let width = share + usize::from(nth_series < extra);
                    nth_series += 1;
                    surface.put_centered(x, top, width, title, TITLE);
                    if let Some(graph) = graphs.get_mut(*index) {
                        let canvas = graph.render(width, graph_rows);
                        surface.blit(x, graph_top, &canvas);
                    }
                    x += width;
                }
            }
        }

        surface
    }
}
