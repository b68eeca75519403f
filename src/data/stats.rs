use super::model::Dataset;

// ---------------------------------------------------------------------------
// Elementary statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean. `None` on empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile of pre-sorted values with linear interpolation between order
/// statistics (the pandas default). `None` on empty input.
///
/// `q` is clamped to [0, 1]; `sorted` must be ascending.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

// ---------------------------------------------------------------------------
// Summary metrics over the full dataset
// ---------------------------------------------------------------------------

/// Headline averages shown in the top bar. Computed over the *unfiltered*
/// dataset, once per load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub mean_range: f64,
    pub mean_price: f64,
}

impl SummaryStats {
    /// `None` if the dataset has no rows.
    pub fn of(dataset: &Dataset) -> Option<Self> {
        let ranges: Vec<f64> = dataset.records.iter().map(|r| r.electric_range).collect();
        let prices: Vec<f64> = dataset.records.iter().map(|r| r.expected_price).collect();
        Some(SummaryStats {
            mean_range: mean(&ranges)?,
            mean_price: mean(&prices)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let v = [1.0, 2.0, 3.0, 4.0];
        // pos = 0.25 * 3 = 0.75 → 1 + 0.75 * (2 - 1)
        assert_eq!(quantile(&v, 0.25), Some(1.75));
        assert_eq!(quantile(&v, 0.5), Some(2.5));
        assert_eq!(quantile(&v, 0.75), Some(3.25));
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
    }

    #[test]
    fn quantile_of_empty_is_none() {
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn quantile_of_single_value_is_that_value() {
        assert_eq!(quantile(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile(&[7.0], 0.75), Some(7.0));
    }

    #[test]
    fn summary_stats_use_full_dataset() {
        let ds = Dataset::from_records(vec![
            Record {
                model_year: 2020,
                make: "A".into(),
                electric_range: 100.0,
                expected_price: 40.0,
            },
            Record {
                model_year: 2021,
                make: "B".into(),
                electric_range: 300.0,
                expected_price: 35.0,
            },
            Record {
                model_year: 2022,
                make: "A".into(),
                electric_range: 50.0,
                expected_price: 90.0,
            },
        ]);
        let stats = SummaryStats::of(&ds).unwrap();
        assert_eq!(stats.mean_range, 150.0);
        assert!((stats.mean_price - 55.0).abs() < 1e-9);
    }

    #[test]
    fn summary_stats_of_empty_dataset_is_none() {
        assert!(SummaryStats::of(&Dataset::from_records(Vec::new())).is_none());
    }
}
