use crate::bar_graph::{Point, ScalableBarGraph};
use crate::buffer::SampleBuffer;
use crate::canvas::Surface;
use crate::labeled::LabeledBarGraphVector;
use crate::tree::Tree;
use std::collections::{HashMap, VecDeque};
use strain_core::{Palette, Result, Source};
use tracing::{debug, info};

/// Graph rows per Y-axis interval.
const SCALE_DENSITY: usize = 5;

/// Scale reported before the first update seeds it from the source.
pub const UNSET_MAX: f32 = 1.0;

/// Which palette the graphs are currently drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteState {
    Regular,
    Alert,
}

/// One graphed sensor.
#[derive(Debug, Clone)]
struct Series {
    buffer:  SampleBuffer,
    /// Flips on every append; combined with a sample's age it gives each
    /// sample a colour role that stays fixed as it scrolls left.
    counter: bool,
}

/// Drives a [`LabeledBarGraphVector`] from a live [`Source`].
///
/// Owns the source, one sample history per sensor, the regular/alert palette
/// pair and the shared Y-axis maximum.  Series are keyed by sensor name so a
/// sensor appearing mid-run simply grows the arena.
#[derive(Debug)]
pub struct BarGraphVector {
    source:    Box<dyn Source>,
    regular:   Palette,
    alert:     Palette,
    state:     PaletteState,
    history:   usize,
    series:    Vec<Series>,
    index:     HashMap<String, usize>,
    /// Pre-provisioned series not yet bound to a sensor, lowest first.
    unbound:   VecDeque<usize>,
    graphs:    LabeledBarGraphVector,
    graph_max: Option<f32>,
    smooth:    bool,
}

impl BarGraphVector {
    /// Build a vector with `graph_count` series named after the source's
    /// current sensors.  `alert` defaults to `regular`.
    ///
    /// Series beyond the current sensor list start untitled and are bound,
    /// lowest index first, to sensors that appear later.
    pub fn new(
        source: Box<dyn Source>,
        regular: Palette,
        graph_count: usize,
        visible: Vec<bool>,
        alert: Option<Palette>,
        history: usize,
    ) -> Result<Self> {
        let names: Vec<String> = (0..graph_count)
            .map(|i| source.sensors().get(i).cloned().unwrap_or_default())
            .collect();
        let bound = source.sensors().len().min(graph_count);

        let title = match source.unit() {
            "" => source.name().to_string(),
            unit => format!("{} ({unit})", source.name()),
        };

        let graphs = LabeledBarGraphVector::new(
            title,
            names.clone(),
            Vec::new(),
            (0..graph_count).map(|_| ScalableBarGraph::new(regular)).collect(),
            visible,
        )?;

        Ok(Self {
            source,
            regular,
            alert: alert.unwrap_or(regular),
            state: PaletteState::Regular,
            history,
            series: (0..graph_count)
                .map(|_| Series { buffer: SampleBuffer::new(history), counter: false })
                .collect(),
            index: names.into_iter().take(bound).enumerate().map(|(i, n)| (n, i)).collect(),
            unbound: (bound..graph_count).collect(),
            graphs,
            graph_max: None,
            smooth: false,
        })
    }

    /// One series per current sensor, all visible, palettes taken from the
    /// source.  `hidden` names sensors to start hidden.
    pub fn from_source(source: Box<dyn Source>, history: usize, hidden: &[String]) -> Result<Self> {
        let visible = source.sensors().iter().map(|s| !hidden.contains(s)).collect::<Vec<_>>();
        let (palette, alert) = (source.palette(), source.alert_palette());
        let count = visible.len();
        Self::new(source, palette, count, visible, alert, history)
    }

    pub fn source(&self) -> &dyn Source {
        self.source.as_ref()
    }

    pub fn source_mut(&mut self) -> &mut dyn Source {
        self.source.as_mut()
    }

    /// Advance every visible series by the source's latest readings.
    pub fn update(&mut self) {
        if !self.source.is_available() {
            return;
        }

        match self.source.edge_triggered() {
            Ok(triggered) => self.set_palette_state(if triggered {
                PaletteState::Alert
            } else {
                PaletteState::Regular
            }),
            Err(e) if e.is_unsupported() => {}
            Err(e) => debug!("{}: edge trigger unavailable: {e}", self.source.name()),
        }

        let sensors = self.source.sensors().to_vec();
        let readings = self.source.readings().to_vec();
        for (name, value) in sensors.into_iter().zip(readings) {
            let index = match self.index.get(&name) {
                Some(&i) => i,
                None => self.bind_series(name),
            };
            if self.graphs.is_visible(index) {
                let series = &mut self.series[index];
                series.buffer.append(value);
                series.counter = !series.counter;
            }
        }

        self.update_max();
        let top = self.graph_max();

        for (index, series) in self.series.iter().enumerate() {
            if !self.graphs.is_visible(index) {
                continue;
            }
            let graph = &mut self.graphs.graphs_mut()[index];
            let window = series.buffer.window(window_len(graph, self.history));
            let newest = window.len().saturating_sub(1);
            let points = window
                .into_iter()
                .enumerate()
                .map(|(col, v)| Point::new(round1(v), series.counter ^ ((newest - col) % 2 == 1)))
                .collect();
            graph.set_data(points, top);
        }

        let rows = (0..self.series.len())
            .filter(|&i| self.graphs.is_visible(i))
            .map(|i| self.graphs.graphs()[i].size().0)
            .max()
            .unwrap_or(0);
        // A new scale changes the labels, which rebuilds the tree.
        self.graphs.set_y_label(label_scale(0.0, top, rows));
    }

    /// Seed the maximum from the source if unset, then raise it to the
    /// ceiling of the largest visible sample.
    fn update_max(&mut self) {
        let current = match self.graph_max {
            Some(max) => max,
            None => self.source.top(),
        };

        let local = self
            .series
            .iter()
            .enumerate()
            .filter(|(i, _)| self.graphs.is_visible(*i))
            .filter_map(|(i, s)| {
                s.buffer.window_max(window_len(&self.graphs.graphs()[i], self.history))
            })
            .reduce(f32::max)
            .map(f32::ceil);

        self.graph_max = match local {
            Some(local) if local > current => {
                debug!("{}: scale raised {current} -> {local}", self.source.name());
                Some(local)
            }
            _ => Some(current),
        };
    }

    /// Give a newly seen sensor the lowest unbound series, or a new one.
    fn bind_series(&mut self, name: String) -> usize {
        let Some(index) = self.unbound.pop_front() else {
            return self.add_series(name);
        };
        info!("{}: sensor '{name}' took series {index}", self.source.name());
        self.graphs.set_sub_title(index, name.clone());
        self.index.insert(name, index);
        self.graphs.rebuild();
        index
    }

    fn add_series(&mut self, name: String) -> usize {
        let index = self.series.len();
        info!("{}: sensor '{name}' appeared", self.source.name());
        let mut graph = ScalableBarGraph::new(self.active_palette());
        graph.set_smooth(self.smooth);
        self.graphs.push_series(name.clone(), graph, true);
        self.series.push(Series { buffer: SampleBuffer::new(self.history), counter: false });
        self.index.insert(name, index);
        self.graphs.rebuild();
        index
    }

    fn set_palette_state(&mut self, state: PaletteState) {
        if state == self.state {
            return;
        }
        debug!("{}: palette {:?} -> {state:?}", self.source.name(), self.state);
        self.state = state;
        let palette = self.active_palette();
        for graph in self.graphs.graphs_mut() {
            graph.set_palette(palette);
        }
    }

    fn active_palette(&self) -> Palette {
        match self.state {
            PaletteState::Regular => self.regular,
            PaletteState::Alert => self.alert,
        }
    }

    pub fn palette_state(&self) -> PaletteState {
        self.state
    }

    /// Zero all history and unset the maximum so the next update re-seeds it
    /// from the source.  Visibility and palette are untouched.
    pub fn reset(&mut self) {
        for series in &mut self.series {
            series.buffer.reset();
        }
        for graph in self.graphs.graphs_mut() {
            graph.invalidate();
        }
        self.graph_max = None;
    }

    /// Current scale ceiling; [`UNSET_MAX`] until the first update.
    pub fn graph_max(&self) -> f32 {
        self.graph_max.unwrap_or(UNSET_MAX)
    }

    pub fn is_seeded(&self) -> bool {
        self.graph_max.is_some()
    }

    pub fn set_visible_graphs(&mut self, visible: Vec<bool>) -> Result<()> {
        self.graphs.set_visible_graphs(Some(visible))
    }

    pub fn visible(&self) -> &[bool] {
        self.graphs.visible()
    }

    pub fn sensors(&self) -> &[String] {
        self.graphs.sub_titles()
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
        for graph in self.graphs.graphs_mut() {
            graph.set_smooth(smooth);
        }
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    /// The most recent `k` samples of series `index`.
    pub fn window(&self, index: usize, k: usize) -> Option<Vec<f32>> {
        self.series.get(index).map(|s| s.buffer.window(k))
    }

    pub fn labels(&self) -> &LabeledBarGraphVector {
        &self.graphs
    }

    pub fn tree(&self) -> &Tree {
        self.graphs.tree()
    }

    pub fn render(&mut self, cols: usize, rows: usize) -> Surface {
        self.graphs.render(cols, rows)
    }
}

/// Tick labels from `min` to `max` for a `rows`-tall graph: one interval per
/// [`SCALE_DENSITY`] rows, at least one.  Integers once the scale reaches 100,
/// one decimal below that.
pub fn label_scale(min: f32, max: f32, rows: usize) -> Vec<String> {
    let count = (rows / SCALE_DENSITY).max(1);
    (0..=count)
        .map(|i| {
            let value = f64::from(min) + i as f64 * f64::from(max - min) / count as f64;
            if max >= 100.0 {
                format!("{}", value.trunc() as i64)
            } else {
                format!("{:.1}", (value * 10.0).round() / 10.0)
            }
        })
        .collect()
}

/// Samples a graph shows: its rendered width, or the whole history before
/// its first render.
fn window_len(graph: &ScalableBarGraph, history: usize) -> usize {
    match graph.size().1 {
        0 => history,
        cols => cols,
    }
}

fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}
