use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Header – page heading and dataset summary
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, heading: &str, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(8.0);
        ui.heading(RichText::new(heading).strong().size(26.0));
        ui.label(
            RichText::new(format!(
                "{} records · {} countries · {} years",
                state.table.len(),
                state.table.countries().len(),
                state.table.years().len()
            ))
            .weak(),
        );
        ui.add_space(8.0);
    });
}

// ---------------------------------------------------------------------------
// Selectors – country and year dropdowns
// ---------------------------------------------------------------------------

/// Render both dropdowns side by side and apply any change to `state`.
pub fn selectors(ui: &mut Ui, state: &mut AppState) {
    let mut selection = state.selection.clone();

    ui.columns(2, |cols: &mut [Ui]| {
        let width = cols[0].available_width();
        egui::ComboBox::from_id_salt("country-selector")
            .selected_text(selection.country.label())
            .width(width)
            .show_ui(&mut cols[0], |ui: &mut Ui| {
                for option in &state.country_options {
                    ui.selectable_value(&mut selection.country, option.clone(), option.label());
                }
            });

        let width = cols[1].available_width();
        egui::ComboBox::from_id_salt("year-selector")
            .selected_text(selection.year.to_string())
            .width(width)
            .show_ui(&mut cols[1], |ui: &mut Ui| {
                for &year in state.years() {
                    ui.selectable_value(&mut selection.year, year, year.to_string());
                }
            });
    });
    ui.add_space(12.0);

    state.select(selection);
}
