// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single vehicle entry (one row of the source CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub model_year: i64,
    pub make: String,
    /// Electric range in miles, >= 0.
    pub electric_range: f64,
    /// Expected price in thousands of currency units, >= 0.
    pub expected_price: f64,
}

impl Record {
    /// Price per mile of range, in whole currency units.
    ///
    /// A zero range is substituted with one mile so the metric stays finite.
    pub fn price_per_mile(&self) -> f64 {
        let miles = if self.electric_range == 0.0 {
            1.0
        } else {
            self.electric_range
        };
        self.expected_price * 1000.0 / miles
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset with pre-computed widget bounds.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in source order.
    pub records: Vec<Record>,
    /// Sorted distinct makes.
    pub makes: Vec<String>,
    /// Min/max model year.
    pub year_bounds: (i64, i64),
    /// Min/max expected price ($1k).
    pub price_bounds: (f64, f64),
    /// Min/max electric range (miles).
    pub range_bounds: (f64, f64),
}

impl Dataset {
    /// Build the make list and slider bounds from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut makes: Vec<String> = Vec::new();
        let mut year_bounds = (i64::MAX, i64::MIN);
        let mut price_bounds = (f64::INFINITY, f64::NEG_INFINITY);
        let mut range_bounds = (f64::INFINITY, f64::NEG_INFINITY);

        for rec in &records {
            if !makes.contains(&rec.make) {
                makes.push(rec.make.clone());
            }
            year_bounds.0 = year_bounds.0.min(rec.model_year);
            year_bounds.1 = year_bounds.1.max(rec.model_year);
            price_bounds.0 = price_bounds.0.min(rec.expected_price);
            price_bounds.1 = price_bounds.1.max(rec.expected_price);
            range_bounds.0 = range_bounds.0.min(rec.electric_range);
            range_bounds.1 = range_bounds.1.max(rec.electric_range);
        }
        makes.sort();

        if records.is_empty() {
            year_bounds = (0, 0);
            price_bounds = (0.0, 0.0);
            range_bounds = (0.0, 0.0);
        }

        Dataset {
            records,
            makes,
            year_bounds,
            price_bounds,
            range_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i64, make: &str, range: f64, price: f64) -> Record {
        Record {
            model_year: year,
            make: make.to_string(),
            electric_range: range,
            expected_price: price,
        }
    }

    #[test]
    fn price_per_mile_divides_by_range() {
        assert_eq!(rec(2020, "A", 100.0, 40.0).price_per_mile(), 400.0);
    }

    #[test]
    fn price_per_mile_substitutes_one_for_zero_range() {
        assert_eq!(rec(2020, "A", 0.0, 40.0).price_per_mile(), 40_000.0);
    }

    #[test]
    fn bounds_and_makes_from_records() {
        let ds = Dataset::from_records(vec![
            rec(2020, "Nissan", 150.0, 30.0),
            rec(2018, "Tesla", 310.0, 80.0),
            rec(2022, "Nissan", 212.0, 35.0),
        ]);
        assert_eq!(ds.makes, vec!["Nissan".to_string(), "Tesla".to_string()]);
        assert_eq!(ds.year_bounds, (2018, 2022));
        assert_eq!(ds.price_bounds, (30.0, 80.0));
        assert_eq!(ds.range_bounds, (150.0, 310.0));
    }

    #[test]
    fn empty_dataset_has_zero_bounds() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.year_bounds, (0, 0));
    }
}
