use std::path::PathBuf;

/// Startup settings for the dashboard window and its data source.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Emissions table, read once before the window opens.
    pub data_path: PathBuf,
    /// Window title and page heading.
    pub heading: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub dark_theme: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            heading: "Global Carbon Emissions Dashboard".to_string(),
            window_size: [1280.0, 960.0],
            min_window_size: [800.0, 600.0],
            dark_theme: true,
        }
    }
}
