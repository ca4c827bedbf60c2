use std::collections::BTreeSet;

use super::error::DataResult;
use super::filter::{available_values, Constraint, FilterPath};
use super::model::{CellValue, Dataset};

/// Filter levels of the district lookup, outermost first.
pub const DISTRICT_LEVELS: [&str; 4] = ["State", "District Name", "Category", "Indicator"];

/// Value columns shown for a looked-up district indicator.
pub const DISTRICT_METRICS: [&str; 3] = ["NFHS 4", "NFHS 5", "Change"];

/// Hierarchical dropdown selections: each level's options depend on the
/// values chosen at every level before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cascade {
    levels: Vec<String>,
    selections: Vec<Option<CellValue>>,
}

impl Cascade {
    pub fn new<S: Into<String>>(levels: impl IntoIterator<Item = S>) -> Self {
        let levels: Vec<String> = levels.into_iter().map(Into::into).collect();
        let selections = vec![None; levels.len()];
        Cascade { levels, selections }
    }

    pub fn district() -> Self {
        Self::new(DISTRICT_LEVELS)
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn selection(&self, level: usize) -> Option<&CellValue> {
        self.selections.get(level).and_then(|s| s.as_ref())
    }

    /// Set `level` and clear every level after it.
    pub fn select(&mut self, level: usize, value: CellValue) {
        if level >= self.levels.len() {
            return;
        }
        if self.selections[level].as_ref() != Some(&value) {
            self.clear_from(level + 1);
        }
        self.selections[level] = Some(value);
    }

    /// Clear `level` and every level after it.
    pub fn clear_from(&mut self, level: usize) {
        for slot in self.selections.iter_mut().skip(level) {
            *slot = None;
        }
    }

    /// Constraints of the leading run of selected levels.
    pub fn path(&self) -> FilterPath {
        self.prefix(self.levels.len())
    }

    pub fn is_complete(&self) -> bool {
        self.selections.iter().all(Option::is_some)
    }

    /// Values available at `level` given the selections above it.
    pub fn options(&self, dataset: &Dataset, level: usize) -> DataResult<BTreeSet<CellValue>> {
        let Some(column) = self.levels.get(level) else {
            return Ok(BTreeSet::new());
        };
        available_values(dataset, self.prefix(level).as_slice(), column)
    }

    /// Make every level hold one of its currently available values.
    ///
    /// Unset or stale selections fall back to the first option, the way a
    /// dropdown preselects its first entry. Stops at the first level with no
    /// options, leaving it and everything below unset.
    pub fn fill_defaults(&mut self, dataset: &Dataset) -> DataResult<()> {
        for level in 0..self.levels.len() {
            let options = self.options(dataset, level)?;
            let current_ok = self
                .selection(level)
                .is_some_and(|value| options.contains(value));
            if current_ok {
                continue;
            }
            match options.into_iter().next() {
                Some(first) => self.select(level, first),
                None => {
                    self.clear_from(level);
                    break;
                }
            }
        }
        Ok(())
    }

    fn prefix(&self, len: usize) -> FilterPath {
        self.levels
            .iter()
            .zip(&self.selections)
            .take(len)
            .map_while(|(column, value)| {
                value
                    .as_ref()
                    .map(|v| Constraint::new(column.clone(), v.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DataError;
    use crate::data::filter::{lookup, Lookup};
    use crate::data::test_support::{dataset, survey};

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    fn full_survey() -> Dataset {
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
                &["Goa", "North Goa", "Health", "Anaemia", "30.1", "35.4", "5.3"],
                &["Goa", "North Goa", "Nutrition", "Stunting", "20.0", "25.8", "5.8"],
                &["Goa", "South Goa", "Health", "Anaemia", "28.0", "27.0", "-1.0"],
                &["Kerala", "Kollam", "Health", "Anaemia", "33.0", "36.5", "3.5"],
            ],
        )
    }

    #[test]
    fn options_depend_on_earlier_levels() {
        let ds = full_survey();
        let mut cascade = Cascade::district();

        let states = cascade.options(&ds, 0).unwrap();
        assert_eq!(states.into_iter().collect::<Vec<_>>(), vec![text("Goa"), text("Kerala")]);

        cascade.select(0, text("Goa"));
        let districts = cascade.options(&ds, 1).unwrap();
        assert_eq!(
            districts.into_iter().collect::<Vec<_>>(),
            vec![text("North Goa"), text("South Goa")]
        );

        cascade.select(1, text("North Goa"));
        let categories = cascade.options(&ds, 2).unwrap();
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn changing_a_level_clears_the_levels_below() {
        let ds = full_survey();
        let mut cascade = Cascade::district();
        cascade.fill_defaults(&ds).unwrap();
        assert!(cascade.is_complete());

        cascade.select(0, text("Kerala"));
        assert_eq!(cascade.selection(0), Some(&text("Kerala")));
        assert_eq!(cascade.selection(1), None);
        assert_eq!(cascade.path().len(), 1);

        cascade.fill_defaults(&ds).unwrap();
        assert_eq!(cascade.selection(1), Some(&text("Kollam")));
    }

    #[test]
    fn reselecting_the_same_value_keeps_lower_levels() {
        let ds = full_survey();
        let mut cascade = Cascade::district();
        cascade.fill_defaults(&ds).unwrap();
        let before = cascade.clone();
        cascade.select(0, text("Goa"));
        assert_eq!(cascade, before);
    }

    #[test]
    fn complete_path_resolves_to_one_row() {
        let ds = full_survey();
        let mut cascade = Cascade::district();
        cascade.fill_defaults(&ds).unwrap();

        let path = cascade.path();
        assert_eq!(path.len(), DISTRICT_LEVELS.len());
        match lookup(&ds, &path).unwrap() {
            Lookup::Single(row) => {
                assert_eq!(ds.value(row, "Indicator").unwrap(), &text("Anaemia"));
                assert_eq!(ds.value(row, "Change").unwrap(), &CellValue::Float(5.3));
            }
            other => panic!("expected a single row, got {other:?}"),
        }
    }

    #[test]
    fn path_stops_at_first_unset_level() {
        let mut cascade = Cascade::district();
        cascade.select(0, text("Goa"));
        cascade.select(2, text("Health"));
        let columns: Vec<_> = cascade.path().iter().map(|c| c.column.clone()).collect();
        assert_eq!(columns, vec!["State"]);
    }

    #[test]
    fn unknown_selection_gives_empty_options() {
        let ds = survey();
        let mut cascade = Cascade::new(["State", "District Name"]);
        cascade.select(0, text("Z"));
        assert!(cascade.options(&ds, 1).unwrap().is_empty());
        assert!(cascade.options(&ds, 7).unwrap().is_empty());
    }

    #[test]
    fn stale_selection_is_replaced_by_first_option() {
        let ds = survey();
        let mut cascade = Cascade::new(["State", "District Name"]);
        cascade.select(0, text("Z"));
        cascade.fill_defaults(&ds).unwrap();
        assert_eq!(cascade.selection(0), Some(&text("X")));
        assert_eq!(cascade.selection(1), Some(&text("A")));
    }

    #[test]
    fn empty_dataset_leaves_everything_unset() {
        let ds = dataset(&["State", "District Name"], &[]);
        let mut cascade = Cascade::new(["State", "District Name"]);
        cascade.fill_defaults(&ds).unwrap();
        assert_eq!(cascade.selection(0), None);
        assert!(cascade.path().is_empty());
    }

    #[test]
    fn missing_level_column_is_an_error() {
        let ds = survey();
        let mut cascade = Cascade::new(["State", "Region"]);
        assert_eq!(
            cascade.fill_defaults(&ds).unwrap_err(),
            DataError::ColumnNotFound("Region".to_string())
        );
    }
}
