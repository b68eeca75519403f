use std::io::Read;
use std::path::Path;

use thiserror::Error;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

pub const COL_MODEL_YEAR: &str = "Model Year";
pub const COL_MAKE: &str = "Make";
pub const COL_ELECTRIC_RANGE: &str = "Electric Range";
pub const COL_EXPECTED_PRICE: &str = "Expected Price ($1k)";

/// Bundled default dataset, used when the user has not opened a file.
static DEFAULT_DATASET: &str = include_str!("../../assets/ev_sample.csv");

/// Failure to produce a dataset from an input file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("opening file: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a CSV file on disk.
pub fn load_path(path: &Path) -> Result<Dataset, ParseError> {
    let file = std::fs::File::open(path)?;
    load_reader(file)
}

/// Load the bundled sample dataset.
pub fn load_default() -> Result<Dataset, ParseError> {
    load_reader(DEFAULT_DATASET.as_bytes())
}

/// Parse CSV with a header row into a cleaned [`Dataset`].
///
/// The four required columns must be present; any other columns are ignored.
/// Rows with a missing or unparseable value in a required column are dropped,
/// matching a projection-then-dropna cleanup.
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(ParseError::MissingColumn(name))
    };
    let year_idx = column(COL_MODEL_YEAR)?;
    let make_idx = column(COL_MAKE)?;
    let range_idx = column(COL_ELECTRIC_RANGE)?;
    let price_idx = column(COL_EXPECTED_PRICE)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in rdr.records() {
        let row = row?;
        match parse_row(&row, year_idx, make_idx, range_idx, price_idx) {
            Some(rec) => records.push(rec),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!("dropped {dropped} rows with missing values");
    }

    Ok(Dataset::from_records(records))
}

fn parse_row(
    row: &csv::StringRecord,
    year_idx: usize,
    make_idx: usize,
    range_idx: usize,
    price_idx: usize,
) -> Option<Record> {
    let make = row.get(make_idx)?.trim();
    if make.is_empty() {
        return None;
    }
    Some(Record {
        model_year: parse_year(row.get(year_idx)?)?,
        make: make.to_string(),
        electric_range: parse_number(row.get(range_idx)?)?,
        expected_price: parse_number(row.get(price_idx)?)?,
    })
}

/// Years sometimes arrive as floats ("2020.0") from spreadsheet exports.
fn parse_year(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GOOD_CSV: &str = "\
Model Year,Make,Electric Range,Expected Price ($1k),County
2020,Tesla,322,79.99,King
2019,Nissan,150,32.5,Kitsap
2021,Chevrolet,259,41.0,Thurston
";

    #[test]
    fn loads_rows_and_ignores_extra_columns() {
        let ds = load_reader(GOOD_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].make, "Tesla");
        assert_eq!(ds.records[0].electric_range, 322.0);
        assert_eq!(ds.records[1].expected_price, 32.5);
        assert_eq!(ds.makes, vec!["Chevrolet", "Nissan", "Tesla"]);
    }

    #[test]
    fn missing_required_column_is_a_parse_error() {
        let csv = "Model Year,Make,Electric Range\n2020,Tesla,322\n";
        match load_reader(csv.as_bytes()) {
            Err(ParseError::MissingColumn(col)) => assert_eq!(col, COL_EXPECTED_PRICE),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn rows_with_missing_values_are_dropped() {
        let csv = "\
Model Year,Make,Electric Range,Expected Price ($1k)
2020,Tesla,322,79.99
,Nissan,150,32.5
2021,,259,41.0
2022,Ford,,45.0
2019,Kia,230,not-a-number
2018,BMW,153,54.0
";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].make, "Tesla");
        assert_eq!(ds.records[1].make, "BMW");
    }

    #[test]
    fn float_years_are_truncated() {
        let csv = "Model Year,Make,Electric Range,Expected Price ($1k)\n2020.0,Tesla,322,79.99\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].model_year, 2020);
    }

    #[test]
    fn loads_from_a_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GOOD_CSV.as_bytes()).unwrap();
        let ds = load_path(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        match load_path(Path::new("/nonexistent/evs.csv")) {
            Err(ParseError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn bundled_dataset_parses_and_is_nonempty() {
        let ds = load_default().unwrap();
        assert!(!ds.is_empty());
        assert!(ds.makes.len() > 1);
    }
}
