use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::error::LoadError;
use super::model::{
    EmissionsRecord, EmissionsTable, COUNTRY_COLUMN, EMISSIONS_COLUMN, NOTES_COLUMN,
    REQUIRED_COLUMNS, YEAR_COLUMN,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the emissions table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the four required columns
/// * `.json`    – `[{ "Country Name": "...", "Year": 2022, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Extra columns are ignored. Row numbers in errors count data rows from 1.
pub fn load_file(path: &Path) -> Result<EmissionsTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::debug!("parsed {} rows from {}", table.len(), path.display());
    Ok(table)
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Validate one row's cells and build the record.
fn build_record(
    row: usize,
    country: &str,
    year: i64,
    emissions: f64,
    notes: String,
) -> Result<EmissionsRecord, LoadError> {
    if country.trim().is_empty() {
        return Err(LoadError::invalid(row, COUNTRY_COLUMN, "empty country name"));
    }
    let year = i32::try_from(year)
        .map_err(|_| LoadError::invalid(row, YEAR_COLUMN, format!("year {year} out of range")))?;
    if !emissions.is_finite() || emissions < 0.0 {
        return Err(LoadError::invalid(
            row,
            EMISSIONS_COLUMN,
            format!("expected a non-negative number, got {emissions}"),
        ));
    }
    Ok(EmissionsRecord::new(country, year, emissions, notes))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<EmissionsTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    read_csv(file)
}

/// One CSV row, matched to the header by column name.
///
/// Numeric cells stay text here so a bad cell reports its row and column
/// instead of a generic deserialisation error.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Country Name")]
    country: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "CO2 Emissions (million tons)")]
    emissions: String,
    #[serde(rename = "Notes")]
    notes: String,
}

/// Parse CSV from any reader. Header names are matched after trimming;
/// column order is free.
pub fn read_csv<R: std::io::Read>(source: R) -> Result<EmissionsTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader.headers()?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();

    for (i, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = i + 1;
        let raw = result?;

        let year = parse_year(&raw.year, row)?;
        let emissions = parse_emissions(&raw.emissions, row)?;

        records.push(build_record(row, &raw.country, year, emissions, raw.notes)?);
    }

    Ok(EmissionsTable::from_records(records))
}

/// Accepts `2021` as well as `2021.0` (tables round-tripped through float columns).
fn parse_year(s: &str, row: usize) -> Result<i64, LoadError> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(LoadError::invalid(row, YEAR_COLUMN, format!("'{s}' is not an integer year"))),
    }
}

fn parse_emissions(s: &str, row: usize) -> Result<f64, LoadError> {
    let s = s.trim();
    s.parse::<f64>()
        .map_err(|_| LoadError::invalid(row, EMISSIONS_COLUMN, format!("'{s}' is not a number")))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Country Name": "USA", "Year": 2022, "CO2 Emissions (million tons)": 110.0, "Notes": "" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<EmissionsTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<EmissionsTable, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::invalid(0, "<root>", "expected a top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, value) in rows.iter().enumerate() {
        let row = i + 1;
        let obj = value
            .as_object()
            .ok_or_else(|| LoadError::invalid(row, "<row>", "not a JSON object"))?;

        let country = json_field(obj, COUNTRY_COLUMN)?
            .as_str()
            .ok_or_else(|| LoadError::invalid(row, COUNTRY_COLUMN, "expected a string"))?;

        let year_value = json_field(obj, YEAR_COLUMN)?;
        let year = match year_value.as_i64() {
            Some(y) => y,
            None => match year_value.as_f64() {
                Some(f) if f.fract() == 0.0 => f as i64,
                _ => {
                    return Err(LoadError::invalid(row, YEAR_COLUMN, format!("{year_value} is not an integer year")))
                }
            },
        };

        let emissions = json_field(obj, EMISSIONS_COLUMN)?
            .as_f64()
            .ok_or_else(|| LoadError::invalid(row, EMISSIONS_COLUMN, "expected a number"))?;

        let notes = match json_field(obj, NOTES_COLUMN)? {
            JsonValue::Null => String::new(),
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };

        records.push(build_record(row, country, year, emissions, notes)?);
    }

    Ok(EmissionsTable::from_records(records))
}

fn json_field<'a>(obj: &'a Map<String, JsonValue>, column: &str) -> Result<&'a JsonValue, LoadError> {
    obj.get(column)
        .ok_or_else(|| LoadError::MissingColumn(column.to_string()))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the four columns.
///
/// Column types are normalised with Arrow casts, so files written by
/// **Pandas** (`int64` years, `double` emissions) and by tools that store
/// years as `int32` or emissions as integers load the same way.
fn load_parquet(path: &Path) -> Result<EmissionsTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = builder.schema().clone();
    for column in REQUIRED_COLUMNS {
        if schema.index_of(column).is_err() {
            return Err(LoadError::MissingColumn(column.to_string()));
        }
    }

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &str, to: &DataType| -> Result<std::sync::Arc<dyn Array>, LoadError> {
            let idx = schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
            Ok(cast(batch.column(idx).as_ref(), to)?)
        };

        // A float -> int cast truncates, so float years are checked first.
        let raw_years = batch.column(schema.index_of(YEAR_COLUMN)?);
        let float_years = if raw_years.data_type().is_floating() {
            Some(cast(raw_years.as_ref(), &DataType::Float64)?)
        } else {
            None
        };
        let float_years = float_years.as_ref().map(|a| a.as_primitive::<Float64Type>());

        let countries = column(COUNTRY_COLUMN, &DataType::Utf8)?;
        let years = column(YEAR_COLUMN, &DataType::Int64)?;
        let emissions = column(EMISSIONS_COLUMN, &DataType::Float64)?;
        let notes = column(NOTES_COLUMN, &DataType::Utf8)?;

        let countries = countries.as_string::<i32>();
        let years = years.as_primitive::<Int64Type>();
        let emissions = emissions.as_primitive::<Float64Type>();
        let notes = notes.as_string::<i32>();

        for i in 0..batch.num_rows() {
            let row = records.len() + 1;

            if countries.is_null(i) {
                return Err(LoadError::invalid(row, COUNTRY_COLUMN, "null value"));
            }
            if let Some(float_years) = float_years {
                let year = float_years.value(i);
                if !float_years.is_null(i) && (!year.is_finite() || year.fract() != 0.0) {
                    return Err(LoadError::invalid(
                        row,
                        YEAR_COLUMN,
                        format!("'{year}' is not an integer year"),
                    ));
                }
            }
            if years.is_null(i) {
                return Err(LoadError::invalid(row, YEAR_COLUMN, "null value"));
            }
            if emissions.is_null(i) {
                return Err(LoadError::invalid(row, EMISSIONS_COLUMN, "null value"));
            }
            let note = if notes.is_null(i) {
                String::new()
            } else {
                notes.value(i).to_string()
            };

            records.push(build_record(
                row,
                countries.value(i),
                years.value(i),
                emissions.value(i),
                note,
            )?);
        }
    }

    Ok(EmissionsTable::from_records(records))
}
