use crate::charts::{update_charts, DashboardCharts};
use crate::data::filter::{country_options, CountrySelection, Selection};
use crate::data::model::EmissionsTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table; never replaced after startup.
    pub table: EmissionsTable,

    /// Country selector options, sentinel first.
    pub country_options: Vec<CountrySelection>,

    /// Current filter values.
    pub selection: Selection,

    /// Charts for `selection` (cached until it changes).
    pub charts: DashboardCharts,
}

impl AppState {
    /// Start with the default selection and compute the first charts.
    pub fn new(table: EmissionsTable) -> Self {
        let selection = Selection::default();
        if !table.contains_year(selection.year) {
            log::warn!(
                "default year {} is not in the dataset, first view will be empty",
                selection.year
            );
        }
        let charts = update_charts(&table, &selection);
        Self {
            country_options: country_options(&table),
            table,
            selection,
            charts,
        }
    }

    /// Replace the selection, recomputing the charts only when it changed.
    /// Returns whether anything changed.
    pub fn select(&mut self, selection: Selection) -> bool {
        if selection == self.selection {
            return false;
        }
        self.charts = update_charts(&self.table, &selection);
        log::debug!(
            "selection {} / {} → {} bar categories, {} pie segments",
            selection.country,
            selection.year,
            self.charts.bar.categories.len(),
            self.charts.pie.segments.len()
        );
        self.selection = selection;
        true
    }

    pub fn years(&self) -> &[i32] {
        self.table.years()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::EmissionsRecord;

    fn state() -> AppState {
        AppState::new(EmissionsTable::from_records(vec![
            EmissionsRecord::new("USA", 2021, 100.0, ""),
            EmissionsRecord::new("USA", 2022, 110.0, ""),
            EmissionsRecord::new("China", 2022, 300.0, ""),
        ]))
    }

    #[test]
    fn starts_with_default_selection_and_charts() {
        let s = state();
        assert_eq!(s.selection, Selection::default());
        assert_eq!(s.charts, update_charts(&s.table, &Selection::default()));
        assert_eq!(s.country_options.len(), 3);
        assert_eq!(s.years(), [2021, 2022]);
    }

    #[test]
    fn select_recomputes_only_on_change() {
        let mut s = state();
        assert!(!s.select(Selection::default()));

        let usa = Selection::new(CountrySelection::Country("USA".to_string()), 2022);
        assert!(s.select(usa.clone()));
        assert_eq!(s.selection, usa);
        assert_eq!(s.charts.bar.title, "Emissions Distribution for USA");
        assert!(!s.select(usa));
    }

    #[test]
    fn missing_default_year_starts_empty() {
        let s = AppState::new(EmissionsTable::from_records(vec![EmissionsRecord::new(
            "USA", 2019, 90.0, "",
        )]));
        assert_eq!(s.selection.year, 2022);
        assert!(s.charts.bar.is_empty());
        assert!(s.charts.pie.is_empty());
        assert!(!s.charts.line.is_empty());
    }
}
