use std::collections::BTreeSet;

use super::error::DataResult;
use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Constraints and filter paths
// ---------------------------------------------------------------------------

/// A single `column == value` constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub column: String,
    pub value: CellValue,
}

impl Constraint {
    pub fn new(column: impl Into<String>, value: CellValue) -> Self {
        Constraint {
            column: column.into(),
            value,
        }
    }
}

/// Ordered constraints, combined with logical AND.
///
/// Order only matters to the cascade that builds the path; evaluation is
/// order-independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPath {
    constraints: Vec<Constraint>,
}

impl FilterPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Builder-style [`FilterPath::push`].
    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.push(Constraint::new(column, value));
        self
    }

    /// Keep only the first `len` constraints.
    pub fn truncate(&mut self, len: usize) {
        self.constraints.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    pub fn as_slice(&self) -> &[Constraint] {
        &self.constraints
    }
}

impl FromIterator<Constraint> for FilterPath {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        FilterPath {
            constraints: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FilterPath {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Indices of dataset rows that satisfy a filter path, in original row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// A view over every row of `dataset`.
    pub fn all(dataset: &Dataset) -> Self {
        FilteredView {
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Outcome of resolving a full filter path down to individual rows.
///
/// The data is expected to hold one row per full path, but that is not
/// guaranteed, so callers must decide what to show for the other cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Empty,
    Single(usize),
    Multiple(Vec<usize>),
}

impl Lookup {
    pub fn rows(&self) -> &[usize] {
        match self {
            Lookup::Empty => &[],
            Lookup::Single(idx) => std::slice::from_ref(idx),
            Lookup::Multiple(rows) => rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Return the rows of `dataset` matching every constraint in `constraints`.
///
/// Each constraint is evaluated to a boolean mask that is intersected with
/// the running mask. An empty path selects every row. Referencing a column
/// absent from the dataset fails with `ColumnNotFound`.
pub fn apply_filters(dataset: &Dataset, constraints: &[Constraint]) -> DataResult<FilteredView> {
    let mut mask = vec![true; dataset.len()];

    for constraint in constraints {
        let values = dataset.column_values(&constraint.column)?;
        for (keep, value) in mask.iter_mut().zip(values) {
            *keep = *keep && *value == constraint.value;
        }
    }

    let indices = mask
        .iter()
        .enumerate()
        .filter(|(_, keep)| **keep)
        .map(|(i, _)| i)
        .collect();
    Ok(FilteredView { indices })
}

/// Distinct values of `target` among rows matching `fixed`, ascending.
///
/// Missing cells are left out: they are not a value a row can be selected
/// by. Yields an empty set when no row matches; the caller renders that as
/// an empty option list.
pub fn available_values(
    dataset: &Dataset,
    fixed: &[Constraint],
    target: &str,
) -> DataResult<BTreeSet<CellValue>> {
    let view = apply_filters(dataset, fixed)?;
    let target_values = dataset.column_values(target)?;
    Ok(view
        .indices()
        .iter()
        .map(|&i| target_values[i])
        .filter(|v| !v.is_null())
        .cloned()
        .collect())
}

/// Apply `path` and classify how many rows it resolved to.
pub fn lookup(dataset: &Dataset, path: &FilterPath) -> DataResult<Lookup> {
    let view = apply_filters(dataset, path.as_slice())?;
    Ok(match view.indices() {
        [] => Lookup::Empty,
        [single] => Lookup::Single(*single),
        many => Lookup::Multiple(many.to_vec()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DataError;
    use crate::data::test_support::survey;

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn empty_path_is_identity() {
        let ds = survey();
        let view = apply_filters(&ds, &[]).unwrap();
        assert_eq!(view, FilteredView::all(&ds));
        assert_eq!(view.indices(), &[0, 1, 2]);
    }

    #[test]
    fn cascade_narrows_to_single_row() {
        let ds = survey();
        let path = FilterPath::new()
            .with("State", text("X"))
            .with("District Name", text("A"));

        let view = apply_filters(&ds, path.as_slice()).unwrap();
        assert_eq!(view.indices(), &[0, 1]);
        let indicators: Vec<_> = view
            .indices()
            .iter()
            .map(|&i| ds.value(i, "Indicator").unwrap().to_string())
            .collect();
        assert_eq!(indicators, vec!["I1", "I2"]);

        let path = path.with("Indicator", text("I1"));
        match lookup(&ds, &path).unwrap() {
            Lookup::Single(row) => {
                assert_eq!(ds.value(row, "Change").unwrap(), &CellValue::Integer(5));
            }
            other => panic!("expected a single row, got {other:?}"),
        }
    }

    #[test]
    fn every_returned_row_satisfies_every_constraint() {
        let ds = survey();
        let paths = [
            FilterPath::new().with("Category", text("Health")),
            FilterPath::new().with("Indicator", text("I1")),
            FilterPath::new()
                .with("Indicator", text("I1"))
                .with("State", text("Y")),
            FilterPath::new().with("Change", CellValue::Integer(-2)),
        ];
        for path in &paths {
            let view = apply_filters(&ds, path.as_slice()).unwrap();
            assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
            for &row in view.indices() {
                assert!(row < ds.len());
                for c in path {
                    assert_eq!(ds.value(row, &c.column).unwrap(), &c.value);
                }
            }
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = survey();
        let path = FilterPath::new().with("Indicator", text("I1"));
        let first = apply_filters(&ds, path.as_slice()).unwrap();
        let second = apply_filters(&ds, path.as_slice()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn numeric_constraint_matches_float_and_integer_cells() {
        let ds = survey();
        let view = apply_filters(&ds, &[Constraint::new("Change", CellValue::Float(5.0))]).unwrap();
        assert_eq!(view.indices(), &[0]);
    }

    #[test]
    fn available_values_are_sorted_and_unique() {
        let ds = survey();
        let states = available_values(&ds, &[], "State").unwrap();
        assert_eq!(states.into_iter().collect::<Vec<_>>(), vec![text("X"), text("Y")]);

        let fixed = [Constraint::new("State", text("X"))];
        let indicators = available_values(&ds, &fixed, "Indicator").unwrap();
        assert_eq!(
            indicators.into_iter().collect::<Vec<_>>(),
            vec![text("I1"), text("I2")]
        );

        let districts = available_values(&ds, &[], "District Name").unwrap();
        assert_eq!(districts.len(), 2);
    }

    #[test]
    fn missing_cells_are_not_offered_as_options() {
        let ds = crate::data::test_support::dataset(
            &["State", "Category"],
            &[&["Goa", "Health"], &["Goa", ""], &["Kerala", "NA"]],
        );
        let categories = available_values(&ds, &[], "Category").unwrap();
        assert_eq!(categories.into_iter().collect::<Vec<_>>(), vec![text("Health")]);

        let fixed = [Constraint::new("State", text("Kerala"))];
        assert!(available_values(&ds, &fixed, "Category").unwrap().is_empty());
    }

    #[test]
    fn unknown_state_yields_no_options() {
        let ds = survey();
        let fixed = [Constraint::new("State", text("Z"))];
        let districts = available_values(&ds, &fixed, "District Name").unwrap();
        assert!(districts.is_empty());
    }

    #[test]
    fn unknown_column_is_an_error() {
        let ds = survey();
        let err = apply_filters(&ds, &[Constraint::new("Region", text("X"))]).unwrap_err();
        assert_eq!(err, DataError::ColumnNotFound("Region".to_string()));

        let err = available_values(&ds, &[], "Region").unwrap_err();
        assert_eq!(err, DataError::ColumnNotFound("Region".to_string()));
    }

    #[test]
    fn lookup_reports_empty_and_multiple_matches() {
        let ds = survey();
        let missing = FilterPath::new().with("State", text("Z"));
        assert_eq!(lookup(&ds, &missing).unwrap(), Lookup::Empty);
        assert!(lookup(&ds, &missing).unwrap().rows().is_empty());

        let health = FilterPath::new().with("Category", text("Health"));
        assert_eq!(lookup(&ds, &health).unwrap(), Lookup::Multiple(vec![0, 1, 2]));
    }

    #[test]
    fn truncating_a_path_widens_the_view() {
        let ds = survey();
        let mut path = FilterPath::new()
            .with("State", text("X"))
            .with("Indicator", text("I2"));
        assert_eq!(apply_filters(&ds, path.as_slice()).unwrap().len(), 1);
        path.truncate(1);
        assert_eq!(apply_filters(&ds, path.as_slice()).unwrap().len(), 2);
    }
}
