use crate::color::MakeColors;
use crate::data::filter::{self, FilterCriteria, FilteredView};
use crate::data::model::Dataset;
use crate::data::stats::SummaryStats;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub dataset: Option<Dataset>,

    /// Current filter selection, bound to the side-panel widgets.
    pub criteria: FilterCriteria,

    /// Records passing the current criteria (cached, recomputed on change).
    pub view: FilteredView,

    /// Headline averages over the unfiltered dataset.
    pub summary: Option<SummaryStats>,

    /// Per-make colours for the scatter chart.
    pub make_colors: Option<MakeColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            view: FilteredView::default(),
            summary: None,
            make_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reset criteria to the widget defaults.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.criteria = FilterCriteria::initial(&dataset);
        self.summary = SummaryStats::of(&dataset);
        self.make_colors = Some(MakeColors::new(&dataset.makes));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the cached view after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.view = filter::apply(ds, &self.criteria);
        } else {
            self.view = FilteredView::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
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
        ])
    }

    #[test]
    fn set_dataset_initialises_criteria_and_view() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.view.len(), 2);
        assert_eq!(state.criteria.max_model_year, 2021);
        assert!(state.summary.is_some());
        assert!(state.make_colors.is_some());
    }

    #[test]
    fn refilter_tracks_criteria_changes() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.criteria.brand = Some("A".to_string());
        state.refilter();
        assert_eq!(state.view.len(), 1);
        assert_eq!(state.view.rows[0].record.make, "A");
    }

    #[test]
    fn summary_ignores_later_filtering() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        let before = state.summary;
        state.criteria.brand = Some("A".to_string());
        state.refilter();
        assert_eq!(state.summary, before);
    }
}
