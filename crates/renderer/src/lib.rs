//! Incremental bar-graph engine.
//!
//! - [`SampleBuffer`]: fixed-length per-sensor history
//! - [`ScalableBarGraph`]: one series rendered column by column, reusing the
//!   columns it drew on the previous frame
//! - [`LabeledBarGraphVector`]: series side by side with a shared Y-axis
//! - [`BarGraphVector`]: feeds the above from a live [`Source`](strain_core::Source)
//!
//! Nothing here touches the terminal; the output is a [`Surface`] of cells
//! tagged with palette attribute names for the host to paint.

pub mod bar_graph;
pub mod buffer;
pub mod canvas;
pub mod labeled;
pub mod tree;
pub mod vector;

#[cfg(test)]
mod testing;

pub use bar_graph::{cell_height, Point, ScalableBarGraph};
pub use buffer::{SampleBuffer, DEFAULT_HISTORY};
pub use canvas::{Canvas, Cell, Column, Surface};
pub use labeled::LabeledBarGraphVector;
pub use tree::{render_tree, Axis, Pane, Tree};
pub use vector::{label_scale, BarGraphVector, PaletteState, UNSET_MAX};
