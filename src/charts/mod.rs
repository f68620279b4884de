//! Chart descriptors and the function that derives them from a selection.
//!
//! Descriptors are plain data; `ui::plot` turns them into `egui_plot` items.

pub mod descriptor;
pub mod update;

pub use descriptor::DashboardCharts;
pub use update::update_charts;
