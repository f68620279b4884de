use std::fmt;

use super::model::{EmissionsRecord, EmissionsTable};

/// Year selected when the dashboard opens, whether or not the table has it.
pub const DEFAULT_YEAR: i32 = 2022;

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// The country selector value.
///
/// `All` is a variant of its own, so a country literally named "All" is
/// still a `Country`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CountrySelection {
    #[default]
    All,
    Country(String),
}

impl CountrySelection {
    /// Label shown in the selector.
    pub fn label(&self) -> &str {
        match self {
            CountrySelection::All => "All Countries",
            CountrySelection::Country(name) => name,
        }
    }
}

impl fmt::Display for CountrySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The pair of filter values held by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub country: CountrySelection,
    pub year: i32,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(CountrySelection::All, DEFAULT_YEAR)
    }
}

impl Selection {
    pub fn new(country: CountrySelection, year: i32) -> Self {
        Self { country, year }
    }
}

/// Options for the country selector: the sentinel first, then every country
/// in table order.
pub fn country_options(table: &EmissionsTable) -> Vec<CountrySelection> {
    std::iter::once(CountrySelection::All)
        .chain(table.countries().iter().cloned().map(CountrySelection::Country))
        .collect()
}

// ---------------------------------------------------------------------------
// Row filters
// ---------------------------------------------------------------------------

/// Rows recorded for `year`, in table order.
pub fn rows_for_year(table: &EmissionsTable, year: i32) -> impl Iterator<Item = &EmissionsRecord> {
    table.records().iter().filter(move |r| r.year == year)
}

/// Rows recorded for `country`, in table order.
pub fn rows_for_country<'a>(
    table: &'a EmissionsTable,
    country: &'a str,
) -> impl Iterator<Item = &'a EmissionsRecord> {
    table.records().iter().filter(move |r| r.country == country)
}
