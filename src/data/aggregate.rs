use std::collections::HashMap;

use super::error::{DataError, DataResult};
use super::filter::FilteredView;
use super::model::{CellValue, ColumnType, Dataset};

// ---------------------------------------------------------------------------
// Means
// ---------------------------------------------------------------------------

/// Arithmetic mean of the non-missing values of `column` within `view`.
///
/// Returns `None` when the view holds no values for the column.
pub fn mean_of(dataset: &Dataset, view: &FilteredView, column: &str) -> DataResult<Option<f64>> {
    let values = numeric_series(dataset, view, column)?;
    if values.is_empty() {
        return Ok(None);
    }
    let sum: f64 = values.iter().map(|(_, v)| v).sum();
    Ok(Some(sum / values.len() as f64))
}

/// Mean of `value_column` for each distinct value of `group_column`.
///
/// Groups come out in discovery order; sort them if the chart needs a
/// stable order. Rows with a missing group key are skipped, as are groups
/// without a single numeric value.
pub fn group_mean(
    dataset: &Dataset,
    view: &FilteredView,
    group_column: &str,
    value_column: &str,
) -> DataResult<Vec<(CellValue, f64)>> {
    require_numeric(dataset, value_column)?;
    let keys = dataset.column_values(group_column)?;
    let values = dataset.column_values(value_column)?;

    let mut slots: HashMap<&CellValue, usize> = HashMap::new();
    let mut groups: Vec<(&CellValue, f64, usize)> = Vec::new();

    for &row in view.indices() {
        let key = keys[row];
        if key.is_null() {
            continue;
        }
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push((key, 0.0, 0));
            groups.len() - 1
        });
        if let Some(v) = values[row].as_f64() {
            groups[slot].1 += v;
            groups[slot].2 += 1;
        }
    }

    Ok(groups
        .into_iter()
        .filter(|(_, _, count)| *count > 0)
        .map(|(key, sum, count)| (key.clone(), sum / count as f64))
        .collect())
}

/// Means of the first `limit` numeric columns, in schema order.
pub fn column_means(
    dataset: &Dataset,
    view: &FilteredView,
    limit: usize,
) -> DataResult<Vec<(String, Option<f64>)>> {
    dataset
        .schema()
        .numeric_columns()
        .into_iter()
        .take(limit)
        .map(|col| {
            let mean = mean_of(dataset, view, &col)?;
            Ok((col, mean))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series and distributions
// ---------------------------------------------------------------------------

/// `(row index, value)` pairs of the non-missing values of `column`, in view
/// order.
pub fn numeric_series(
    dataset: &Dataset,
    view: &FilteredView,
    column: &str,
) -> DataResult<Vec<(usize, f64)>> {
    require_numeric(dataset, column)?;
    let values = dataset.column_values(column)?;
    Ok(view
        .indices()
        .iter()
        .filter_map(|&row| values[row].as_f64().map(|v| (row, v)))
        .collect())
}

/// One equal-width histogram bucket covering `[start, end)`; the last
/// bucket also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Split the finite `values` into `bins` equal-width buckets over
/// `[min, max]`. Constant data collapses into a single bucket.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range == 0.0 {
        return vec![Bin {
            start: min,
            end: max,
            count: finite.len(),
        }];
    }

    let width = range / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

fn require_numeric(dataset: &Dataset, column: &str) -> DataResult<()> {
    match dataset.schema().column_type(column)? {
        ColumnType::Numeric => Ok(()),
        ColumnType::Categorical => Err(DataError::NotNumeric(column.to_string())),
    }
}
