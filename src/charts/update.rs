use std::collections::HashMap;

use crate::color::{ColorMap, Palette};
use crate::data::filter::{rows_for_country, rows_for_year, CountrySelection, Selection};
use crate::data::model::{EmissionsRecord, EmissionsTable};

use super::descriptor::{
    BarAxis, BarCategory, BarChart, BarPoint, ChartLayout, DashboardCharts, LineChart, LinePoint,
    LineSeries, PieChart, PieSegment,
};

/// Inner radius of the pie ring relative to its outer radius.
pub const PIE_HOLE: f64 = 0.4;

pub const LINE_TITLE: &str = "Emission Trends Over Time";

/// Compute the three charts for `selection`.
///
/// Pure: the same table and selection always give equal charts. Filters
/// matching no rows give empty charts. The pie chart only looks at the year,
/// the line chart at neither filter.
pub fn update_charts(table: &EmissionsTable, selection: &Selection) -> DashboardCharts {
    let mut charts = DashboardCharts {
        bar: bar_chart(table, selection),
        pie: pie_chart(table, selection.year),
        line: line_chart(table),
    };
    charts.apply_layout(ChartLayout::default());
    charts
}

/// Group rows by a key, keeping first-appearance order of the keys.
fn group_by<'a, K>(
    rows: impl Iterator<Item = &'a EmissionsRecord>,
    key: K,
) -> Vec<(String, Vec<&'a EmissionsRecord>)>
where
    K: Fn(&EmissionsRecord) -> String,
{
    let mut groups: Vec<(String, Vec<&EmissionsRecord>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for rec in rows {
        let k = key(rec);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(rec),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![rec]));
            }
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

fn bar_chart(table: &EmissionsTable, selection: &Selection) -> BarChart {
    let (rows, axis, suffix): (Vec<&EmissionsRecord>, BarAxis, String) = match &selection.country {
        CountrySelection::All => (
            rows_for_year(table, selection.year).collect(),
            BarAxis::Country,
            format!("({})", selection.year),
        ),
        CountrySelection::Country(name) => (
            rows_for_country(table, name).collect(),
            BarAxis::Year,
            format!("for {name}"),
        ),
    };

    let mut groups = group_by(rows.into_iter(), |rec| match axis {
        BarAxis::Country => rec.country.clone(),
        BarAxis::Year => rec.year.to_string(),
    });
    // Years sit on a numeric axis; countries keep table order.
    if axis == BarAxis::Year {
        groups.sort_by_key(|(_, recs)| recs[0].year);
    }
    let colors = ColorMap::new(groups.iter().map(|(label, _)| label.as_str()), Palette::Pastel);

    let categories = groups
        .into_iter()
        .map(|(label, recs)| BarCategory {
            color: colors.color_for(&label),
            points: recs
                .into_iter()
                .map(|r| BarPoint {
                    value: r.emissions,
                    notes: r.notes.clone(),
                })
                .collect(),
            label,
        })
        .collect();

    BarChart {
        title: format!("Emissions Distribution {suffix}"),
        axis,
        categories,
        layout: ChartLayout::default(),
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

fn pie_chart(table: &EmissionsTable, year: i32) -> PieChart {
    let groups = group_by(rows_for_year(table, year), |rec| rec.country.clone());
    let colors = ColorMap::new(groups.iter().map(|(label, _)| label.as_str()), Palette::Qualitative);

    let segments = groups
        .into_iter()
        .map(|(label, recs)| PieSegment {
            color: colors.color_for(&label),
            value: recs.iter().map(|r| r.emissions).sum(),
            notes: recs
                .iter()
                .filter(|r| !r.notes.is_empty())
                .map(|r| r.notes.clone())
                .collect(),
            label,
        })
        .collect();

    PieChart {
        title: format!("Global Emissions Distribution ({year})"),
        hole: PIE_HOLE,
        segments,
        layout: ChartLayout::default(),
    }
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

fn line_chart(table: &EmissionsTable) -> LineChart {
    let groups = group_by(table.records().iter(), |rec| rec.country.clone());
    let colors = ColorMap::new(groups.iter().map(|(label, _)| label.as_str()), Palette::Qualitative);

    let series = groups
        .into_iter()
        .map(|(name, recs)| LineSeries {
            color: colors.color_for(&name),
            points: recs
                .into_iter()
                .map(|r| LinePoint {
                    year: r.year,
                    value: r.emissions,
                    notes: r.notes.clone(),
                })
                .collect(),
            name,
        })
        .collect();

    LineChart {
        title: LINE_TITLE.to_string(),
        markers: true,
        series,
        layout: ChartLayout::default(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    fn scenario_table() -> EmissionsTable {
        EmissionsTable::from_records(vec![
            EmissionsRecord::new("USA", 2021, 100.0, ""),
            EmissionsRecord::new("USA", 2022, 110.0, ""),
            EmissionsRecord::new("China", 2022, 300.0, ""),
        ])
    }

    fn all(year: i32) -> Selection {
        Selection::new(CountrySelection::All, year)
    }

    fn country(name: &str, year: i32) -> Selection {
        Selection::new(CountrySelection::Country(name.to_string()), year)
    }

    fn bar_values(chart: &BarChart) -> Vec<f64> {
        chart.categories.iter().map(BarCategory::total).collect()
    }

    #[test]
    fn all_countries_for_a_year() {
        let charts = update_charts(&scenario_table(), &all(2022));

        assert_eq!(charts.bar.axis, BarAxis::Country);
        assert_eq!(charts.bar.category_labels(), ["USA", "China"]);
        assert_eq!(bar_values(&charts.bar), [110.0, 300.0]);
        assert_eq!(charts.bar.title, "Emissions Distribution (2022)");

        let pie: Vec<(&str, f64)> = charts
            .pie
            .segments
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect();
        assert_eq!(pie, [("USA", 110.0), ("China", 300.0)]);
        assert_eq!(charts.pie.title, "Global Emissions Distribution (2022)");
        assert_eq!(charts.pie.hole, 0.4);

        let line: Vec<(&str, Vec<(i32, f64)>)> = charts
            .line
            .series
            .iter()
            .map(|s| (s.name.as_str(), s.points.iter().map(|p| (p.year, p.value)).collect()))
            .collect();
        assert_eq!(
            line,
            [
                ("USA", vec![(2021, 100.0), (2022, 110.0)]),
                ("China", vec![(2022, 300.0)]),
            ]
        );
        assert_eq!(charts.line.title, "Emission Trends Over Time");
        assert!(charts.line.markers);
    }

    #[test]
    fn single_country_uses_year_axis() {
        let charts = update_charts(&scenario_table(), &country("USA", 2021));

        assert_eq!(charts.bar.axis, BarAxis::Year);
        assert_eq!(charts.bar.axis.column(), "Year");
        assert_eq!(charts.bar.category_labels(), ["2021", "2022"]);
        assert_eq!(bar_values(&charts.bar), [100.0, 110.0]);
        assert_eq!(charts.bar.title, "Emissions Distribution for USA");

        // The pie still follows the year only.
        let pie: Vec<(&str, f64)> = charts
            .pie
            .segments
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect();
        assert_eq!(pie, [("USA", 100.0)]);
        assert_eq!(charts.pie.title, "Global Emissions Distribution (2021)");
    }

    #[test]
    fn year_axis_is_ascending_whatever_the_table_order() {
        let table = EmissionsTable::from_records(vec![
            EmissionsRecord::new("India", 2022, 2_900.0, ""),
            EmissionsRecord::new("Brazil", 2019, 470.0, ""),
            EmissionsRecord::new("India", 2020, 2_400.0, "lockdown"),
            EmissionsRecord::new("India", 2021, 2_700.0, ""),
        ]);

        let charts = update_charts(&table, &country("India", 2022));
        assert_eq!(charts.bar.category_labels(), ["2020", "2021", "2022"]);
        assert_eq!(bar_values(&charts.bar), [2_400.0, 2_700.0, 2_900.0]);
        assert_eq!(charts.bar.categories[0].points[0].notes, "lockdown");
        assert_eq!(charts.bar.categories[0].color, Palette::Pastel.color(0));

        // The country axis keeps table order.
        let table = EmissionsTable::from_records(vec![
            EmissionsRecord::new("USA", 2022, 110.0, ""),
            EmissionsRecord::new("China", 2022, 300.0, ""),
            EmissionsRecord::new("Brazil", 2022, 480.0, ""),
        ]);
        let charts = update_charts(&table, &all(2022));
        assert_eq!(charts.bar.category_labels(), ["USA", "China", "Brazil"]);
    }

    #[test]
    fn absent_year_gives_empty_bar_and_pie() {
        let table = scenario_table();
        let charts = update_charts(&table, &all(2099));

        assert!(charts.bar.is_empty());
        assert!(charts.pie.is_empty());
        assert_eq!(charts.line, update_charts(&table, &all(2022)).line);
        assert!(!charts.line.is_empty());
    }

    #[test]
    fn unknown_country_gives_empty_bar() {
        let charts = update_charts(&scenario_table(), &country("Atlantis", 2022));
        assert!(charts.bar.is_empty());
        assert_eq!(charts.bar.title, "Emissions Distribution for Atlantis");
        assert_eq!(charts.pie.segments.len(), 2);
    }

    #[test]
    fn country_named_all_is_not_the_sentinel() {
        let table = EmissionsTable::from_records(vec![
            EmissionsRecord::new("All", 2020, 5.0, ""),
            EmissionsRecord::new("USA", 2022, 110.0, ""),
        ]);
        let charts = update_charts(&table, &country("All", 2022));
        assert_eq!(charts.bar.axis, BarAxis::Year);
        assert_eq!(charts.bar.category_labels(), ["2020"]);
    }

    #[test]
    fn repeated_rows_stack_and_sum() {
        let table = EmissionsTable::from_records(vec![
            EmissionsRecord::new("USA", 2022, 60.5, "mainland"),
            EmissionsRecord::new("China", 2022, 300.0, ""),
            EmissionsRecord::new("USA", 2022, 49.5, "territories"),
        ]);
        let charts = update_charts(&table, &all(2022));

        assert_eq!(charts.bar.categories[0].points.len(), 2);
        assert_relative_eq!(charts.bar.categories[0].total(), 110.0);

        let usa = &charts.pie.segments[0];
        assert_relative_eq!(usa.value, 110.0);
        assert_eq!(usa.notes, ["mainland", "territories"]);
    }

    #[test]
    fn every_chart_gets_the_dashboard_layout() {
        let charts = update_charts(&scenario_table(), &all(2022));
        let layout = ChartLayout::default();
        assert_eq!(charts.bar.layout, layout);
        assert_eq!(charts.pie.layout, layout);
        assert_eq!(charts.line.layout, layout);
    }

    #[test]
    fn categories_get_distinct_colors() {
        let charts = update_charts(&scenario_table(), &all(2022));
        assert_eq!(charts.bar.categories[0].color, Palette::Pastel.color(0));
        assert_eq!(charts.bar.categories[1].color, Palette::Pastel.color(1));
        assert_eq!(charts.line.series[1].color, Palette::Qualitative.color(1));
    }

    const COUNTRIES: [&str; 5] = ["USA", "China", "India", "Brazil", "All"];

    fn arb_table() -> impl Strategy<Value = EmissionsTable> {
        prop::collection::vec((0..COUNTRIES.len(), 2015i32..2023, 0.0f64..5_000.0, any::<bool>()), 0..40)
            .prop_map(|rows| {
                EmissionsTable::from_records(
                    rows.into_iter()
                        .map(|(c, year, value, noted)| {
                            let notes = if noted { "revised" } else { "" };
                            EmissionsRecord::new(COUNTRIES[c], year, value, notes)
                        })
                        .collect(),
                )
            })
    }

    fn arb_country() -> impl Strategy<Value = CountrySelection> {
        prop_oneof![
            Just(CountrySelection::All),
            (0..COUNTRIES.len()).prop_map(|c| CountrySelection::Country(COUNTRIES[c].to_string())),
            Just(CountrySelection::Country("Atlantis".to_string())),
        ]
    }

    proptest! {
        #[test]
        fn all_countries_bar_lists_countries_present_that_year(table in arb_table(), year in 2014i32..2024) {
            let charts = update_charts(&table, &all(year));
            let labels: BTreeSet<&str> = charts.bar.category_labels().into_iter().collect();
            let expected: BTreeSet<&str> = rows_for_year(&table, year).map(|r| r.country.as_str()).collect();
            prop_assert_eq!(labels, expected);
            prop_assert_eq!(charts.bar.category_labels().len(), charts.bar.categories.len());
        }

        #[test]
        fn country_bar_lists_that_countrys_years(table in arb_table(), c in 0..COUNTRIES.len(), year in 2014i32..2024) {
            let name = COUNTRIES[c];
            let charts = update_charts(&table, &country(name, year));
            let labels: BTreeSet<String> = charts.bar.category_labels().into_iter().map(String::from).collect();
            let expected: BTreeSet<String> = rows_for_country(&table, name).map(|r| r.year.to_string()).collect();
            prop_assert_eq!(labels, expected);
        }

        #[test]
        fn pie_ignores_country(table in arb_table(), a in arb_country(), b in arb_country(), year in 2014i32..2024) {
            let first = update_charts(&table, &Selection::new(a, year));
            let second = update_charts(&table, &Selection::new(b, year));
            prop_assert_eq!(first.pie, second.pie);
        }

        #[test]
        fn line_ignores_both_filters(
            table in arb_table(),
            a in arb_country(),
            b in arb_country(),
            y1 in 2014i32..2024,
            y2 in 2014i32..2024,
        ) {
            let first = update_charts(&table, &Selection::new(a, y1));
            let second = update_charts(&table, &Selection::new(b, y2));
            prop_assert_eq!(first.line, second.line);
        }

        #[test]
        fn update_is_idempotent(table in arb_table(), sel_country in arb_country(), year in 2014i32..2024) {
            let selection = Selection::new(sel_country, year);
            prop_assert_eq!(update_charts(&table, &selection), update_charts(&table, &selection));
        }
    }
}
