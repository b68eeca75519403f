use super::model::{Dataset, Record};
use super::stats::quantile;

// ---------------------------------------------------------------------------
// FilterCriteria – the user-chosen bounds and toggles
// ---------------------------------------------------------------------------

/// The current filter selection, rebuilt from widget state on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Exact make to match; `None` means "All".
    pub brand: Option<String>,
    /// Records with a later model year are excluded.
    pub max_model_year: i64,
    /// Closed interval on expected price ($1k).
    pub price_interval: (f64, f64),
    /// Closed interval on electric range (miles).
    pub range_interval: (f64, f64),
    /// When *false*, price outliers are removed with the IQR rule.
    pub show_outliers: bool,
    /// Whether the interactive scatter is rendered.
    pub show_advanced_charts: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            brand: None,
            max_model_year: 0,
            price_interval: (0.0, 0.0),
            range_interval: (0.0, 0.0),
            show_outliers: true,
            show_advanced_charts: false,
        }
    }
}

impl FilterCriteria {
    /// Criteria that pass every record: intervals at the dataset bounds,
    /// all brands, outliers shown.
    pub fn widest(dataset: &Dataset) -> Self {
        FilterCriteria {
            brand: None,
            max_model_year: dataset.year_bounds.1,
            price_interval: dataset.price_bounds,
            range_interval: dataset.range_bounds,
            show_outliers: true,
            show_advanced_charts: false,
        }
    }

    /// Initial widget values after a dataset loads: price defaults to
    /// [0, 100] and range to [0, 300], both clamped to the dataset bounds.
    pub fn initial(dataset: &Dataset) -> Self {
        let (p_min, p_max) = dataset.price_bounds;
        let (r_min, r_max) = dataset.range_bounds;
        FilterCriteria {
            price_interval: (0.0f64.clamp(p_min, p_max), 100.0f64.clamp(p_min, p_max)),
            range_interval: (0.0f64.clamp(r_min, r_max), 300.0f64.clamp(r_min, r_max)),
            ..FilterCriteria::widest(dataset)
        }
    }

    fn matches(&self, rec: &Record) -> bool {
        rec.model_year <= self.max_model_year
            && rec.expected_price >= self.price_interval.0
            && rec.expected_price <= self.price_interval.1
            && rec.electric_range >= self.range_interval.0
            && rec.electric_range <= self.range_interval.1
            && self.brand.as_deref().is_none_or(|b| rec.make == b)
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the surviving records plus the derived metric
// ---------------------------------------------------------------------------

/// One surviving record with its derived price-per-mile.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub record: Record,
    pub price_per_mile: f64,
}

/// The dataset subset satisfying the current criteria, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub rows: Vec<ViewRow>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Apply the criteria to the dataset: predicate pass first, then the
/// optional IQR trim on price over the already-filtered subset.
pub fn apply(dataset: &Dataset, criteria: &FilterCriteria) -> FilteredView {
    let mut kept: Vec<Record> = dataset
        .records
        .iter()
        .filter(|rec| criteria.matches(rec))
        .cloned()
        .collect();

    if !criteria.show_outliers {
        kept = trim_price_outliers(kept);
    }

    let rows = kept
        .into_iter()
        .map(|record| {
            let price_per_mile = record.price_per_mile();
            ViewRow {
                record,
                price_per_mile,
            }
        })
        .collect();

    FilteredView { rows }
}

/// Drop records whose price falls outside [Q1 - 1.5·IQR, Q3 + 1.5·IQR].
///
/// On an empty input the quartiles are undefined; the trim degrades to the
/// identity instead of erroring.
fn trim_price_outliers(records: Vec<Record>) -> Vec<Record> {
    let mut prices: Vec<f64> = records.iter().map(|r| r.expected_price).collect();
    prices.sort_by(f64::total_cmp);

    let (Some(q1), Some(q3)) = (quantile(&prices, 0.25), quantile(&prices, 0.75)) else {
        return records;
    };
    let iqr = q3 - q1;
    let lo = q1 - 1.5 * iqr;
    let hi = q3 + 1.5 * iqr;

    records
        .into_iter()
        .filter(|r| r.expected_price >= lo && r.expected_price <= hi)
        .collect()
}
