use crate::bar_graph::ScalableBarGraph;
use crate::canvas::Surface;
use crate::tree::{render_tree, Axis, Tree};
use strain_core::{Result, StrainError};
use tracing::warn;

/// Several [`ScalableBarGraph`]s side by side under one title, sharing a
/// Y-axis, each with its own sub-title.
#[derive(Debug, Clone)]
pub struct LabeledBarGraphVector {
    title:      String,
    sub_titles: Vec<String>,
    graphs:     Vec<ScalableBarGraph>,
    visible:    Vec<bool>,
    axis:       Axis,
    tree:       Tree,
}

impl LabeledBarGraphVector {
    /// Sub-titles and graphs must pair up one to one.  A visibility vector
    /// shorter than the series list is padded with `true`; a longer one is
    /// rejected.
    pub fn new(
        title: impl Into<String>,
        sub_titles: Vec<String>,
        y_label: Vec<String>,
        graphs: Vec<ScalableBarGraph>,
        visible: Vec<bool>,
    ) -> Result<Self> {
        if sub_titles.len() != graphs.len() {
            return Err(StrainError::Layout(format!(
                "{} sub-titles for {} graphs",
                sub_titles.len(),
                graphs.len()
            )));
        }

        let mut vector = Self {
            title: title.into(),
            sub_titles,
            graphs,
            visible: Vec::new(),
            axis: Axis::new(y_label),
            tree: Tree::Empty,
        };
        vector.set_visible_graphs(Some(visible))?;
        Ok(vector)
    }

    /// Replace the shared tick labels; empty means the placeholder scale.
    /// The tree is rebuilt only if the labels changed.
    pub fn set_y_label(&mut self, values: Vec<String>) {
        let axis = Axis::new(values);
        if axis != self.axis {
            self.axis = axis;
            self.rebuild();
        }
    }

    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Rebuild the layout, optionally with a new visibility vector.
    pub fn set_visible_graphs(&mut self, visible: Option<Vec<bool>>) -> Result<()> {
        if let Some(mut visible) = visible {
            if visible.len() > self.graphs.len() {
                return Err(StrainError::Layout(format!(
                    "visibility for {} series but only {} exist",
                    visible.len(),
                    self.graphs.len()
                )));
            }
            if visible.len() < self.graphs.len() {
                warn!(
                    "visibility vector has {} of {} entries; showing the rest",
                    visible.len(),
                    self.graphs.len()
                );
                visible.resize(self.graphs.len(), true);
            }
            self.visible = visible;
        }

        self.rebuild();
        Ok(())
    }

    /// Rebuild the tree from the current titles, visibility and axis.
    ///
    /// This is the only place the layout tree is built.
    pub fn rebuild(&mut self) {
        self.tree = render_tree(&self.title, &self.sub_titles, &self.visible, &self.axis);
    }

    /// Rename series `index`.  Takes effect on the next layout rebuild.
    pub fn set_sub_title(&mut self, index: usize, sub_title: impl Into<String>) {
        if let Some(slot) = self.sub_titles.get_mut(index) {
            *slot = sub_title.into();
        }
    }

    /// Append a series that appeared at runtime.  Takes effect on the next
    /// layout rebuild.
    pub fn push_series(&mut self, sub_title: impl Into<String>, graph: ScalableBarGraph, visible: bool) {
        self.sub_titles.push(sub_title.into());
        self.graphs.push(graph);
        self.visible.push(visible);
    }

    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn sub_titles(&self) -> &[String] {
        &self.sub_titles
    }

    pub fn graphs(&self) -> &[ScalableBarGraph] {
        &self.graphs
    }

    pub fn graphs_mut(&mut self) -> &mut [ScalableBarGraph] {
        &mut self.graphs
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// The current layout tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Composite the current tree at the given size.
    pub fn render(&mut self, cols: usize, rows: usize) -> Surface {
        self.tree.compose(&mut self.graphs, cols, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar_graph::Point;
    use strain_core::Palette;

    const PALETTE: Palette = Palette::new("light", "dark", "light smooth", "dark smooth");

    fn vector(n: usize, visible: Vec<bool>) -> Result<LabeledBarGraphVector> {
        LabeledBarGraphVector::new(
            "Util",
            (0..n).map(|i| format!("Core {i}")).collect(),
            Vec::new(),
            (0..n).map(|_| ScalableBarGraph::new(PALETTE)).collect(),
            visible,
        )
    }

    #[test]
    fn mismatched_sub_titles_are_rejected() {
        let err = LabeledBarGraphVector::new(
            "x",
            vec!["a".into()],
            Vec::new(),
            vec![ScalableBarGraph::new(PALETTE), ScalableBarGraph::new(PALETTE)],
            vec![true, true],
        )
        .unwrap_err();
        assert!(matches!(err, StrainError::Layout(_)));
    }

    #[test]
    fn oversized_visibility_is_rejected() {
        assert!(matches!(vector(2, vec![true; 3]), Err(StrainError::Layout(_))));
    }

    #[test]
    fn short_visibility_is_padded_visible() {
        let v = vector(3, vec![false]).unwrap();
        assert_eq!(v.visible(), &[false, true, true]);
    }

    #[test]
    fn empty_y_label_uses_placeholder() {
        let mut v = vector(1, vec![true]).unwrap();
        assert_eq!(v.axis().labels(), &["1".to_string()]);
        v.set_y_label(vec!["0".into(), "1000".into()]);
        assert_eq!(v.axis().width(), 4);
        v.set_y_label(Vec::new());
        assert_eq!(v.axis().labels(), &["1".to_string()]);
    }

    #[test]
    fn hiding_everything_collapses_layout() {
        let mut v = vector(2, vec![true, true]).unwrap();
        v.set_visible_graphs(Some(vec![false, false])).unwrap();
        assert!(v.tree().is_empty());
        let surface = v.render(10, 4);
        assert!(surface.lines().iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn reshowing_keeps_graph_data() {
        let mut v = vector(2, vec![true, true]).unwrap();
        v.graphs_mut()[1].set_data(vec![Point::new(100.0, false); 3], 100.0);
        v.render(9, 5);

        v.set_visible_graphs(Some(vec![true, false])).unwrap();
        assert_eq!(v.tree().series(), vec![0]);
        v.set_visible_graphs(Some(vec![true, true])).unwrap();
        assert_eq!(v.tree().series(), vec![0, 1]);

        v.render(9, 5);
        let heights = v.graphs_mut()[1].render(3, 4).heights();
        assert_eq!(heights, vec![4, 4, 4]);
    }

    #[test]
    fn new_labels_rebuild_the_tree() {
        let mut v = vector(1, vec![true]).unwrap();
        let before = v.tree().clone();
        v.set_y_label(vec!["0".into(), "140".into()]);
        assert_ne!(v.tree(), &before);
        assert!(matches!(v.tree(), Tree::Graphs { axis, .. } if axis.labels()[1] == "140"));
    }

    #[test]
    fn renamed_series_shows_after_rebuild() {
        let mut v = vector(2, vec![true, true]).unwrap();
        v.set_sub_title(1, "Core 7");
        v.rebuild();
        assert_eq!(v.sub_titles()[1], "Core 7");
        let Tree::Graphs { panes, .. } = v.tree() else { panic!("expected graphs") };
        assert!(panes.contains(&crate::tree::Pane::Series { index: 1, title: "Core 7".into() }));
    }

    #[test]
    fn pushed_series_shows_after_rebuild() {
        let mut v = vector(1, vec![true]).unwrap();
        v.push_series("Core 1", ScalableBarGraph::new(PALETTE), true);
        assert_eq!(v.tree().series(), vec![0]);
        v.rebuild();
        assert_eq!(v.tree().series(), vec![0, 1]);
        assert_eq!(v.len(), 2);
    }
}
