use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, FontId, Sense, Stroke, Ui};
use egui_plot::{Bar, BarChart as PlotBarChart, Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::charts::descriptor::{tooltip, BarChart, ChartLayout, LineChart, PieChart};
use crate::data::model::{EMISSIONS_COLUMN, YEAR_COLUMN};

const BAR_WIDTH: f64 = 0.8;
const MARKER_RADIUS: f32 = 3.5;
/// Arc resolution of a full pie turn.
const PIE_STEPS_PER_TURN: f64 = 180.0;

// ---------------------------------------------------------------------------
// Shared chart frame
// ---------------------------------------------------------------------------

/// Draw the chart region: title in the top margin, the plot body, then the
/// bottom margin. The whole region is `layout.height` tall, empty or not.
fn chart_frame(
    ui: &mut Ui,
    layout: &ChartLayout,
    title: &str,
    empty: bool,
    body: impl FnOnce(&mut Ui, f32),
) {
    egui::Frame::default()
        .fill(layout.paper_background)
        .show(ui, |ui: &mut Ui| {
            ui.visuals_mut().override_text_color = Some(layout.font_color);

            let width = ui.available_width();
            let (title_rect, _) =
                ui.allocate_exact_size(egui::vec2(width, layout.margin_top), Sense::hover());
            ui.painter().text(
                title_rect.left_center() + egui::vec2(8.0, 0.0),
                Align2::LEFT_CENTER,
                title,
                FontId::proportional(17.0),
                layout.font_color,
            );

            let body_height = (layout.height - layout.margin_top - layout.margin_bottom).max(0.0);
            if empty {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(width, body_height), Sense::hover());
                ui.painter().text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "No data for this selection",
                    FontId::proportional(14.0),
                    layout.font_color.gamma_multiply(0.6),
                );
            } else {
                body(ui, body_height);
            }

            ui.add_space(layout.margin_bottom);
        });
}

fn base_plot<'a>(id: &str, layout: &ChartLayout, height: f32) -> Plot<'a> {
    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .show_background(layout.plot_background.a() > 0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, chart: &BarChart) {
    chart_frame(ui, &chart.layout, &chart.title, chart.is_empty(), |ui, height| {
        let labels: Vec<String> = chart
            .category_labels()
            .into_iter()
            .map(str::to_string)
            .collect();

        base_plot("bar-chart", &chart.layout, height)
            .x_axis_label(chart.axis.column())
            .y_axis_label(EMISSIONS_COLUMN)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| category_tick(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, category) in chart.categories.iter().enumerate() {
                    let mut base = 0.0;
                    let bars: Vec<Bar> = category
                        .points
                        .iter()
                        .map(|point| {
                            let bar = Bar::new(i as f64, point.value)
                                .base_offset(base)
                                .width(BAR_WIDTH)
                                .fill(category.color)
                                .name(chart.point_tooltip(category, point));
                            base += point.value;
                            bar
                        })
                        .collect();

                    plot_ui.bar_chart(
                        PlotBarChart::new(bars)
                            .name(&category.label)
                            .color(category.color)
                            .element_formatter(Box::new(|bar: &Bar, _: &PlotBarChart| bar.name.clone())),
                    );
                }
            });
    });
}

/// Axis tick text for a category index; non-integer ticks stay blank.
fn category_tick(labels: &[String], value: f64) -> String {
    if value < 0.0 || value.fract() != 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

pub fn pie_chart(ui: &mut Ui, chart: &PieChart) {
    chart_frame(ui, &chart.layout, &chart.title, chart.is_empty(), |ui, height| {
        let wedges = chart.wedges();

        let response = base_plot("pie-chart", &chart.layout, height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .include_x(-1.3)
            .include_x(1.3)
            .include_y(-1.1)
            .include_y(1.1)
            .show(ui, |plot_ui| {
                for (segment, &(start, end)) in chart.segments.iter().zip(&wedges) {
                    for quad in ring_quads(start, end, chart.hole) {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(quad.to_vec()))
                                .name(&segment.label)
                                .fill_color(segment.color)
                                .stroke(Stroke::new(0.5, segment.color)),
                        );
                    }
                }

                plot_ui
                    .pointer_coordinate()
                    .and_then(|p| turn_fraction(p.x, p.y, chart.hole))
                    .and_then(|fraction| chart.segment_at(fraction))
            });

        if let Some(i) = response.inner {
            response
                .response
                .on_hover_text(chart.segment_tooltip(&chart.segments[i]));
        }
    });
}

/// Point on the unit circle for a fraction of the turn, starting at twelve
/// o'clock and running clockwise.
fn ring_point(fraction: f64, radius: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - TAU * fraction;
    [radius * angle.cos(), radius * angle.sin()]
}

/// Split the ring sector `[start, end)` into convex quads.
fn ring_quads(start: f64, end: f64, hole: f64) -> Vec<[[f64; 2]; 4]> {
    let span = end - start;
    if span <= 0.0 {
        return Vec::new();
    }
    let steps = (span * PIE_STEPS_PER_TURN).ceil().max(1.0) as usize;
    (0..steps)
        .map(|k| {
            let a = start + span * k as f64 / steps as f64;
            let b = start + span * (k + 1) as f64 / steps as f64;
            [
                ring_point(a, 1.0),
                ring_point(b, 1.0),
                ring_point(b, hole),
                ring_point(a, hole),
            ]
        })
        .collect()
}

/// Fraction of the turn at plot coordinate `(x, y)`, or `None` outside the ring.
fn turn_fraction(x: f64, y: f64, hole: f64) -> Option<f64> {
    let radius = x.hypot(y);
    if radius < hole || radius > 1.0 {
        return None;
    }
    Some(((FRAC_PI_2 - y.atan2(x)) / TAU).rem_euclid(1.0))
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

pub fn line_chart(ui: &mut Ui, chart: &LineChart) {
    chart_frame(ui, &chart.layout, &chart.title, chart.is_empty(), |ui, height| {
        let hover_chart = chart.clone();

        base_plot("line-chart", &chart.layout, height)
            .x_axis_label(YEAR_COLUMN)
            .y_axis_label(EMISSIONS_COLUMN)
            .label_formatter(move |name, value| {
                let year = value.x.round() as i32;
                hover_chart.point_tooltip(name, year).unwrap_or_else(|| {
                    tooltip(&[
                        (YEAR_COLUMN, format!("{:.0}", value.x)),
                        (EMISSIONS_COLUMN, format!("{:.1}", value.y)),
                    ])
                })
            })
            .show(ui, |plot_ui| {
                for series in &chart.series {
                    let coords: Vec<[f64; 2]> = series
                        .points
                        .iter()
                        .map(|p| [f64::from(p.year), p.value])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from(coords.clone()))
                            .name(&series.name)
                            .color(series.color)
                            .width(2.0),
                    );
                    if chart.markers {
                        plot_ui.points(
                            Points::new(PlotPoints::from(coords))
                                .name(&series.name)
                                .color(series.color)
                                .radius(MARKER_RADIUS),
                        );
                    }
                }
            });
    });
}
