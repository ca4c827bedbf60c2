use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::{DashboardMode, ViewSettings};
use crate::data::cascade::{Cascade, DISTRICT_LEVELS, DISTRICT_METRICS};
use crate::data::error::DataResult;
use crate::data::filter::{apply_filters, available_values, lookup, FilterPath, FilteredView, Lookup};
use crate::data::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Explorer selections
// ---------------------------------------------------------------------------

/// Dropdown selections of the explorer dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplorerState {
    /// Categorical column to filter on; `None` means "All".
    pub filter_column: Option<String>,
    /// Value of `filter_column` rows must equal.
    pub filter_value: Option<CellValue>,
    /// Numeric column for the trend and distribution charts.
    pub series_column: Option<String>,
    /// Categorical column the comparison chart groups by.
    pub group_column: Option<String>,
    /// Numeric column averaged per group.
    pub group_value_column: Option<String>,
}

impl ExplorerState {
    fn for_dataset(dataset: &Dataset) -> Self {
        let numeric = dataset.schema().numeric_columns();
        let categorical = dataset.schema().categorical_columns();
        Self {
            filter_column: None,
            filter_value: None,
            series_column: numeric.first().cloned(),
            group_column: categorical.first().cloned(),
            group_value_column: numeric.first().cloned(),
        }
    }

    /// The single-constraint path of the current filter, if any.
    pub fn path(&self) -> FilterPath {
        match (&self.filter_column, &self.filter_value) {
            (Some(col), Some(value)) => FilterPath::new().with(col.clone(), value.clone()),
            _ => FilterPath::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is opened).
    pub dataset: Option<Arc<Dataset>>,

    pub settings: ViewSettings,

    /// Dashboard currently shown.
    pub mode: DashboardMode,

    pub explorer: ExplorerState,

    /// State → District → Category → Indicator selections.
    pub cascade: Cascade,

    /// Rows passing the active dashboard's filters, rebuilt on every change.
    pub view: FilteredView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewSettings::default(), DashboardMode::default())
    }
}

impl AppState {
    pub fn new(settings: ViewSettings, mode: DashboardMode) -> Self {
        Self {
            dataset: None,
            settings,
            mode,
            explorer: ExplorerState::default(),
            cascade: Cascade::district(),
            view: FilteredView::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset every selection.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.explorer = ExplorerState::for_dataset(&dataset);
        self.cascade = Cascade::district();
        self.view = FilteredView::all(&dataset);
        self.dataset = Some(Arc::new(dataset));
        self.status_message = None;
        self.refilter();
    }

    pub fn set_mode(&mut self, mode: DashboardMode) {
        if self.mode != mode {
            self.mode = mode;
            self.status_message = None;
            self.refilter();
        }
    }

    /// Choose the explorer filter column (`None` = "All"). The value falls
    /// back to the column's first option.
    pub fn set_filter_column(&mut self, column: Option<String>) {
        self.explorer.filter_column = column;
        self.explorer.filter_value = None;
        let first = self
            .filter_options()
            .ok()
            .and_then(|opts| opts.into_iter().next());
        self.explorer.filter_value = first;
        self.refilter();
    }

    pub fn set_filter_value(&mut self, value: CellValue) {
        self.explorer.filter_value = Some(value);
        self.refilter();
    }

    /// Values offered for the explorer filter column, ascending.
    pub fn filter_options(&self) -> DataResult<BTreeSet<CellValue>> {
        match (&self.dataset, &self.explorer.filter_column) {
            (Some(ds), Some(col)) => available_values(ds, &[], col),
            _ => Ok(BTreeSet::new()),
        }
    }

    /// Select `value` at cascade `level`; lower levels are re-defaulted.
    pub fn select_level(&mut self, level: usize, value: CellValue) {
        self.cascade.select(level, value);
        self.refilter();
    }

    /// Options for cascade `level` given the levels above it.
    pub fn level_options(&self, level: usize) -> DataResult<BTreeSet<CellValue>> {
        match &self.dataset {
            Some(ds) => self.cascade.options(ds, level),
            None => Ok(BTreeSet::new()),
        }
    }

    /// Rows matching the complete district path, if every level is chosen.
    pub fn district_lookup(&self) -> Option<Lookup> {
        let ds = self.dataset.as_ref()?;
        if !self.cascade.is_complete() {
            return None;
        }
        match lookup(ds, &self.cascade.path()) {
            Ok(found) => Some(found),
            Err(e) => {
                log::error!("district lookup failed: {e}");
                None
            }
        }
    }

    /// Recompute `view` from scratch for the active dashboard.
    pub fn refilter(&mut self) {
        let Some(ds) = self.dataset.clone() else {
            return;
        };
        let result = match self.mode {
            DashboardMode::Explorer => apply_filters(&ds, self.explorer.path().as_slice()),
            DashboardMode::District => self.refilter_district(&ds),
        };
        match result {
            Ok(view) => {
                log::debug!("{} of {} rows visible", view.len(), ds.len());
                self.view = view;
            }
            Err(e) => {
                log::error!("filtering failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.view = FilteredView::default();
            }
        }
    }

    /// Rows of the selected district and category, across all indicators.
    ///
    /// The lookup panel charts these; the single selected indicator is taken
    /// from [`AppState::district_lookup`].
    fn refilter_district(&mut self, ds: &Dataset) -> DataResult<FilteredView> {
        let mut required: Vec<&str> = DISTRICT_LEVELS.to_vec();
        required.extend(DISTRICT_METRICS);
        ds.schema().require(&required)?;

        self.cascade.fill_defaults(ds)?;
        let mut path = self.cascade.path();
        path.truncate(DISTRICT_LEVELS.len() - 1);
        apply_filters(ds, path.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{dataset, survey};

    fn district_data() -> Dataset {
        dataset(
            &[
                "State",
                "District Name",
                "Category",
                "Indicator",
                "NFHS 4",
                "NFHS 5",
                "Change",
            ],
            &[
                &["Goa", "North Goa", "Health", "Anaemia", "30", "35", "5"],
                &["Goa", "North Goa", "Health", "Obesity", "10", "12", "2"],
                &["Goa", "South Goa", "Health", "Anaemia", "28", "27", "-1"],
                &["Kerala", "Kollam", "Health", "Anaemia", "33", "36", "3"],
                &["Kerala", "Kollam", "Health", "Anaemia", "34", "37", "3"],
            ],
        )
    }

    #[test]
    fn new_dataset_shows_every_row() {
        let mut state = AppState::default();
        state.set_dataset(survey());
        assert_eq!(state.view.len(), 3);
        assert_eq!(state.explorer.series_column.as_deref(), Some("Change"));
        assert_eq!(state.explorer.group_column.as_deref(), Some("State"));
        assert_eq!(state.explorer.filter_column, None);
    }

    #[test]
    fn explorer_filter_defaults_to_first_value() {
        let mut state = AppState::default();
        state.set_dataset(survey());

        state.set_filter_column(Some("State".to_string()));
        assert_eq!(state.explorer.filter_value, Some(CellValue::text("X")));
        assert_eq!(state.view.indices(), &[0, 1]);

        state.set_filter_value(CellValue::text("Y"));
        assert_eq!(state.view.indices(), &[2]);

        state.set_filter_column(None);
        assert_eq!(state.view.len(), 3);
    }

    #[test]
    fn explorer_options_skip_missing_cells() {
        let mut state = AppState::default();
        state.set_dataset(dataset(
            &["Region", "Value"],
            &[&["", "1"], &["north", "2"], &["NA", "3"]],
        ));
        state.set_filter_column(Some("Region".to_string()));
        let options: Vec<_> = state.filter_options().unwrap().into_iter().collect();
        assert_eq!(options, vec![CellValue::text("north")]);
        assert_eq!(state.explorer.filter_value, Some(CellValue::text("north")));
        assert_eq!(state.view.indices(), &[1]);
    }

    #[test]
    fn district_mode_requires_survey_columns() {
        let mut state = AppState::new(ViewSettings::default(), DashboardMode::District);
        state.set_dataset(survey());
        assert!(state.view.is_empty());
        let msg = state.status_message.clone().unwrap_or_default();
        assert!(msg.contains("NFHS 4"), "{msg}");

        state.set_mode(DashboardMode::Explorer);
        assert_eq!(state.status_message, None);
        assert_eq!(state.view.len(), 3);
    }

    #[test]
    fn district_mode_views_selected_district_and_category() {
        let mut state = AppState::new(ViewSettings::default(), DashboardMode::District);
        state.set_dataset(district_data());

        // First options preselected: Goa / North Goa / Health / Anaemia.
        assert_eq!(state.view.indices(), &[0, 1]);
        assert_eq!(state.district_lookup(), Some(Lookup::Single(0)));

        state.select_level(3, CellValue::text("Obesity"));
        assert_eq!(state.district_lookup(), Some(Lookup::Single(1)));

        state.select_level(1, CellValue::text("South Goa"));
        assert_eq!(state.view.indices(), &[2]);
        assert_eq!(state.district_lookup(), Some(Lookup::Single(2)));
    }

    #[test]
    fn duplicate_rows_surface_as_multiple_matches() {
        let mut state = AppState::new(ViewSettings::default(), DashboardMode::District);
        state.set_dataset(district_data());
        state.select_level(0, CellValue::text("Kerala"));
        assert_eq!(state.district_lookup(), Some(Lookup::Multiple(vec![3, 4])));
    }

    #[test]
    fn level_options_follow_selection() {
        let mut state = AppState::new(ViewSettings::default(), DashboardMode::District);
        assert!(state.level_options(0).unwrap().is_empty());
        state.set_dataset(district_data());
        state.select_level(0, CellValue::text("Kerala"));
        let districts: Vec<_> = state.level_options(1).unwrap().into_iter().collect();
        assert_eq!(districts, vec![CellValue::text("Kollam")]);
    }
}
