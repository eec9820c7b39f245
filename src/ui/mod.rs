//! egui widgets: filter side panel, top bar and the chart grid.

pub mod charts;
pub mod panels;
