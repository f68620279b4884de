use eframe::egui::Color32;

use crate::data::model::{COUNTRY_COLUMN, EMISSIONS_COLUMN, NOTES_COLUMN, YEAR_COLUMN};

// ---------------------------------------------------------------------------
// Layout shared by every chart
// ---------------------------------------------------------------------------

/// Presentation settings applied identically to all three charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub plot_background: Color32,
    pub paper_background: Color32,
    pub font_color: Color32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub height: f32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            plot_background: Color32::TRANSPARENT,
            paper_background: Color32::TRANSPARENT,
            font_color: Color32::WHITE,
            margin_top: 40.0,
            margin_bottom: 20.0,
            height: 400.0,
        }
    }
}

/// Build a tooltip from `(field, value)` lines.
pub fn tooltip(lines: &[(&str, String)]) -> String {
    lines
        .iter()
        .map(|(field, value)| format!("{field}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Which column the bar chart's category axis shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarAxis {
    Country,
    Year,
}

impl BarAxis {
    pub fn column(self) -> &'static str {
        match self {
            BarAxis::Country => COUNTRY_COLUMN,
            BarAxis::Year => YEAR_COLUMN,
        }
    }
}

/// One source row inside a bar category.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub value: f64,
    pub notes: String,
}

/// A coloured bar; several points stack in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarCategory {
    pub label: String,
    pub color: Color32,
    pub points: Vec<BarPoint>,
}

impl BarCategory {
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub axis: BarAxis,
    pub categories: Vec<BarCategory>,
    pub layout: ChartLayout,
}

impl BarChart {
    pub fn category_labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn point_tooltip(&self, category: &BarCategory, point: &BarPoint) -> String {
        tooltip(&[
            (self.axis.column(), category.label.clone()),
            (EMISSIONS_COLUMN, point.value.to_string()),
            (NOTES_COLUMN, point.notes.clone()),
        ])
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    pub label: String,
    pub value: f64,
    /// Non-empty notes of every row summed into this segment.
    pub notes: Vec<String>,
    pub color: Color32,
}

/// A ring chart; `hole` is the inner radius as a fraction of the outer one.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub hole: f64,
    pub segments: Vec<PieSegment>,
    pub layout: ChartLayout,
}

impl PieChart {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.value).sum()
    }

    /// Start and end of every segment as fractions of the full turn.
    ///
    /// A zero total yields zero-width wedges instead of NaN. Otherwise the
    /// last wedge ends exactly at 1 so rounding leaves no unhoverable gap.
    pub fn wedges(&self) -> Vec<(f64, f64)> {
        let total = self.total();
        let mut start = 0.0;
        let mut wedges: Vec<(f64, f64)> = self
            .segments
            .iter()
            .map(|s| {
                let share = if total > 0.0 { s.value / total } else { 0.0 };
                let wedge = (start, start + share);
                start += share;
                wedge
            })
            .collect();
        if total > 0.0 {
            if let Some(last) = wedges.last_mut() {
                last.1 = 1.0;
            }
        }
        wedges
    }

    /// Index of the segment covering `fraction` of the turn (0 ≤ fraction < 1).
    pub fn segment_at(&self, fraction: f64) -> Option<usize> {
        self.wedges()
            .iter()
            .position(|&(start, end)| fraction >= start && fraction < end)
    }

    pub fn segment_tooltip(&self, segment: &PieSegment) -> String {
        let total = self.total();
        let percent = if total > 0.0 { segment.value / total * 100.0 } else { 0.0 };
        tooltip(&[
            (COUNTRY_COLUMN, segment.label.clone()),
            (EMISSIONS_COLUMN, format!("{} ({percent:.1}%)", segment.value)),
            (NOTES_COLUMN, segment.notes.join("; ")),
        ])
    }
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub year: i32,
    pub value: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: Color32,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub markers: bool,
    pub series: Vec<LineSeries>,
    pub layout: ChartLayout,
}

impl LineChart {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Tooltip for the points of series `name` at `year`, if there are any.
    ///
    /// Duplicate rows for one year share a tooltip listing every value.
    pub fn point_tooltip(&self, name: &str, year: i32) -> Option<String> {
        let series = self.series.iter().find(|s| s.name == name)?;
        let points: Vec<&LinePoint> = series.points.iter().filter(|p| p.year == year).collect();
        if points.is_empty() {
            return None;
        }
        let values = points
            .iter()
            .map(|p| p.value.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let notes = points
            .iter()
            .filter(|p| !p.notes.is_empty())
            .map(|p| p.notes.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Some(tooltip(&[
            (COUNTRY_COLUMN, series.name.clone()),
            (YEAR_COLUMN, year.to_string()),
            (EMISSIONS_COLUMN, values),
            (NOTES_COLUMN, notes),
        ]))
    }
}

// ---------------------------------------------------------------------------
// The three charts of one selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    pub bar: BarChart,
    pub pie: PieChart,
    pub line: LineChart,
}

impl DashboardCharts {
    /// Apply the same presentation settings to every chart.
    pub fn apply_layout(&mut self, layout: ChartLayout) {
        self.bar.layout = layout;
        self.pie.layout = layout;
        self.line.layout = layout;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pie(values: &[f64]) -> PieChart {
        PieChart {
            title: String::new(),
            hole: 0.4,
            segments: values
                .iter()
                .enumerate()
                .map(|(i, &value)| PieSegment {
                    label: format!("c{i}"),
                    value,
                    notes: Vec::new(),
                    color: Color32::WHITE,
                })
                .collect(),
            layout: ChartLayout::default(),
        }
    }

    #[test]
    fn default_layout_matches_dashboard_theme() {
        let layout = ChartLayout::default();
        assert_eq!(layout.plot_background, Color32::TRANSPARENT);
        assert_eq!(layout.paper_background, Color32::TRANSPARENT);
        assert_eq!(layout.font_color, Color32::WHITE);
        assert_eq!(layout.margin_top, 40.0);
        assert_eq!(layout.margin_bottom, 20.0);
        assert_eq!(layout.height, 400.0);
    }

    #[test]
    fn wedges_partition_the_turn() {
        let chart = pie(&[110.0, 300.0, 0.0, 90.0]);
        let wedges = chart.wedges();

        assert_relative_eq!(wedges[0].1, 0.22);
        assert_relative_eq!(wedges[1].0, 0.22);
        assert_relative_eq!(wedges[3].1, 1.0, epsilon = 1e-12);
        assert_eq!(wedges[2].0, wedges[2].1);

        assert_eq!(chart.segment_at(0.1), Some(0));
        assert_eq!(chart.segment_at(0.5), Some(1));
        assert_eq!(chart.segment_at(0.9), Some(3));
    }

    #[test]
    fn zero_total_pie_has_no_hoverable_segment() {
        let chart = pie(&[0.0, 0.0]);
        assert_eq!(chart.wedges(), vec![(0.0, 0.0), (0.0, 0.0)]);
        assert_eq!(chart.segment_at(0.0), None);
    }

    #[test]
    fn tooltips_include_notes() {
        let mut chart = pie(&[25.0, 75.0]);
        chart.segments[1].notes = vec!["revised".to_string(), "estimate".to_string()];
        let text = chart.segment_tooltip(&chart.segments[1]);
        assert!(text.contains("CO2 Emissions (million tons)=75 (75.0%)"));
        assert!(text.ends_with("Notes=revised; estimate"));

        let line = LineChart {
            title: String::new(),
            markers: true,
            series: vec![LineSeries {
                name: "USA".to_string(),
                color: Color32::WHITE,
                points: vec![LinePoint { year: 2021, value: 100.0, notes: "base year".to_string() }],
            }],
            layout: ChartLayout::default(),
        };
        let text = line.point_tooltip("USA", 2021).expect("point exists");
        assert_eq!(
            text,
            "Country Name=USA\nYear=2021\nCO2 Emissions (million tons)=100\nNotes=base year"
        );
        assert!(line.point_tooltip("USA", 2022).is_none());
    }

    #[test]
    fn last_wedge_closes_the_turn() {
        let chart = pie(&[0.1, 0.2, 0.3]);
        let wedges = chart.wedges();
        assert_eq!(wedges[2].1, 1.0);
        assert_eq!(chart.segment_at(0.999_999_999_999), Some(2));
    }

    #[test]
    fn line_tooltip_lists_every_row_of_a_year() {
        let point = |value: f64, notes: &str| LinePoint { year: 2021, value, notes: notes.to_string() };
        let line = LineChart {
            title: String::new(),
            markers: true,
            series: vec![LineSeries {
                name: "USA".to_string(),
                color: Color32::WHITE,
                points: vec![point(100.0, "first"), point(90.0, ""), point(95.0, "revised")],
            }],
            layout: ChartLayout::default(),
        };
        let text = line.point_tooltip("USA", 2021).expect("point exists");
        assert!(text.contains("CO2 Emissions (million tons)=100, 90, 95"));
        assert!(text.ends_with("Notes=first; revised"));
    }
}
