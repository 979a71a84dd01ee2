pub mod graph;
pub mod header;
pub mod summary;

pub use graph::GraphWidget;
pub use header::HeaderWidget;
pub use summary::{format_value, SummaryPanel, SummaryWidget};
