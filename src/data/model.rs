use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Column names of the fixed schema
// ---------------------------------------------------------------------------

pub const COUNTRY_COLUMN: &str = "Country Name";
pub const YEAR_COLUMN: &str = "Year";
pub const EMISSIONS_COLUMN: &str = "CO2 Emissions (million tons)";
pub const NOTES_COLUMN: &str = "Notes";

/// All columns a source file must provide, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 4] = [COUNTRY_COLUMN, YEAR_COLUMN, EMISSIONS_COLUMN, NOTES_COLUMN];

// ---------------------------------------------------------------------------
// EmissionsRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single (country, year) measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionsRecord {
    pub country: String,
    pub year: i32,
    /// CO2 emissions in million tons, finite and non-negative.
    pub emissions: f64,
    /// Free text shown in tooltips only.
    pub notes: String,
}

impl EmissionsRecord {
    pub fn new(country: impl Into<String>, year: i32, emissions: f64, notes: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            year,
            emissions,
            notes: notes.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// EmissionsTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full table plus the distinct values used to populate the selectors.
///
/// Fields are private: once built the table is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionsTable {
    records: Vec<EmissionsRecord>,
    /// Distinct country names in order of first appearance.
    countries: Vec<String>,
    /// Distinct years in order of first appearance.
    years: Vec<i32>,
}

impl EmissionsTable {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(records: Vec<EmissionsRecord>) -> Self {
        let mut seen_countries: HashSet<&str> = HashSet::new();
        let mut seen_years: HashSet<i32> = HashSet::new();
        let mut countries = Vec::new();
        let mut years = Vec::new();

        for rec in &records {
            if seen_countries.insert(rec.country.as_str()) {
                countries.push(rec.country.clone());
            }
            if seen_years.insert(rec.year) {
                years.push(rec.year);
            }
        }

        EmissionsTable {
            records,
            countries,
            years,
        }
    }

    pub fn records(&self) -> &[EmissionsRecord] {
        &self.records
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
