use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CarbonDashApp {
    pub state: AppState,
    heading: String,
}

impl CarbonDashApp {
    pub fn new(state: AppState, heading: impl Into<String>) -> Self {
        Self {
            state,
            heading: heading.into(),
        }
    }
}

impl eframe::App for CarbonDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: heading + selectors ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            panels::header(ui, &self.heading, &self.state);
            panels::selectors(ui, &mut self.state);
        });

        // ---- Central panel: bar + pie side by side, line beneath ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let charts = &self.state.charts;
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.columns(2, |cols: &mut [Ui]| {
                        plot::bar_chart(&mut cols[0], &charts.bar);
                        plot::pie_chart(&mut cols[1], &charts.pie);
                    });
                    plot::line_chart(ui, &charts.line);
                });
        });
    }
}
