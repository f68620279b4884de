use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-1, 1)`.
    fn jitter(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }
}

struct Row {
    country: &'static str,
    year: i64,
    emissions: f64,
    notes: String,
}

/// (country, emissions in the first year, yearly growth)
const COUNTRIES: [(&str, f64, f64); 8] = [
    ("China", 9_800.0, 0.021),
    ("United States", 5_400.0, -0.008),
    ("India", 2_200.0, 0.045),
    ("Russia", 1_650.0, 0.004),
    ("Japan", 1_180.0, -0.012),
    ("Germany", 790.0, -0.021),
    ("Brazil", 460.0, 0.010),
    ("United Kingdom", 420.0, -0.035),
];

const FIRST_YEAR: i64 = 2010;
const LAST_YEAR: i64 = 2022;

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        for &(country, base, growth) in &COUNTRIES {
            let t = (year - FIRST_YEAR) as f64;
            let mut emissions = base * (1.0 + growth).powf(t) * (1.0 + 0.02 * rng.jitter());

            let notes = if year == 2020 {
                emissions *= 0.93;
                "Pandemic-related drop".to_string()
            } else if year == LAST_YEAR {
                "Provisional estimate".to_string()
            } else {
                String::new()
            };

            rows.push(Row {
                country,
                year,
                emissions: (emissions * 10.0).round() / 10.0,
                notes,
            });
        }
    }
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["Country Name", "Year", "CO2 Emissions (million tons)", "Notes"])?;
    for row in rows {
        writer.write_record([
            row.country.to_string(),
            row.year.to_string(),
            row.emissions.to_string(),
            row.notes.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Country Name", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("CO2 Emissions (million tons)", DataType::Float64, false),
        Field::new("Notes", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(rows.iter().map(|r| r.country).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.emissions).collect::<Vec<_>>())),
            Arc::new(StringArray::from(
                rows.iter()
                    .map(|r| (!r.notes.is_empty()).then_some(r.notes.as_str()))
                    .collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv("data.csv", &rows)?;
    write_parquet("data.parquet", &rows)?;

    println!(
        "Wrote {} rows ({} countries, {FIRST_YEAR}–{LAST_YEAR}) to data.csv and data.parquet",
        rows.len(),
        COUNTRIES.len()
    );
    Ok(())
}
