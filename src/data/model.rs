use std::cmp::Ordering;
use std::fmt;

use super::error::{DataError, DataResult};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A typed cell value. The variant is fixed by the column's declared
/// [`ColumnType`] when the dataset is built.
///
/// Numeric variants compare by value, so `Integer(1) == Float(1.0)`; this
/// keeps equality filters independent of how a number was written in the
/// source file.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl CellValue {
    /// Interpret the value as an `f64` for aggregation and plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Shorthand for `CellValue::Text`.
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }
}

// -- Manual Eq/Ord so CellValue can live in a BTreeSet --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) | Float(_) => 1,
                Text(_) => 2,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            // `==` first so that 0.0 and -0.0 are equal, like Integer(0).
            (Float(a), Float(b)) if a == b => Ordering::Equal,
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(i), Float(f)) => cmp_int_float(*i, *f),
            (Float(f), Integer(i)) => cmp_int_float(*i, *f).reverse(),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

/// `2^63`, the first float above every `i64`.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Exact comparison of an integer with a float, without rounding the
/// integer through `f64`. NaN sorts like `f64::total_cmp` does.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match (i as i128).cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64
            .partial_cmp(&(f - whole))
            .unwrap_or(Ordering::Equal),
        unequal => unequal,
    }
}

/// The integer a float is equal to, if it is integral and in `i64` range.
fn integral(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            CellValue::Null => 0u8.hash(state),
            // Values equal to an integer hash like that integer.
            CellValue::Integer(i) => {
                1u8.hash(state);
                i.hash(state);
            }
            CellValue::Float(f) => match integral(*f) {
                Some(i) => {
                    1u8.hash(state);
                    i.hash(state);
                }
                None => {
                    3u8.hash(state);
                    f.to_bits().hash(state);
                }
            },
            CellValue::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => {
                let s = format!("{v:.4}");
                let s = s.trim_end_matches('0').trim_end_matches('.');
                write!(f, "{s}")
            }
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Schema – declared once at load time
// ---------------------------------------------------------------------------

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ColumnType,
}

/// Ordered column definitions of a [`Dataset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    columns: Vec<ColumnDef>,
}

impl Schema {
    /// Infer column types from raw text cells.
    ///
    /// A column is numeric when it has at least one present cell and every
    /// present cell parses as a number. Empty cells and the usual
    /// missing-value markers (see [`is_missing`]) don't count either way.
    pub fn infer(headers: &[String], rows: &[Vec<String>]) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let mut seen = false;
                let numeric = rows.iter().all(|row| {
                    let cell = row.get(idx).map(|s| s.trim()).unwrap_or("");
                    if is_missing(cell) {
                        return true;
                    }
                    seen = true;
                    cell.parse::<f64>().is_ok()
                });
                let kind = if numeric && seen {
                    ColumnType::Numeric
                } else {
                    ColumnType::Categorical
                };
                ColumnDef {
                    name: name.clone(),
                    kind,
                }
            })
            .collect();
        Schema { columns }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Position of `name`, or [`DataError::ColumnNotFound`].
    pub fn index_of(&self, name: &str) -> DataResult<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    pub fn column_type(&self, name: &str) -> DataResult<ColumnType> {
        let idx = self.index_of(name)?;
        Ok(self.columns[idx].kind)
    }

    pub fn numeric_columns(&self) -> Vec<String> {
        self.names_of(ColumnType::Numeric)
    }

    pub fn categorical_columns(&self) -> Vec<String> {
        self.names_of(ColumnType::Categorical)
    }

    /// Fail on the first column of `names` missing from the schema.
    pub fn require(&self, names: &[&str]) -> DataResult<()> {
        for name in names {
            self.index_of(name)?;
        }
        Ok(())
    }

    fn names_of(&self, kind: ColumnType) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table. Built once and never mutated; share it through
/// `Arc<Dataset>`.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Where the data came from (file name), for display.
    pub source: String,
    schema: Schema,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset from raw text cells, inferring the schema once.
    ///
    /// Every row must have exactly `headers.len()` cells.
    pub fn from_text_rows(
        source: impl Into<String>,
        headers: Vec<String>,
        raw_rows: Vec<Vec<String>>,
    ) -> Self {
        let schema = Schema::infer(&headers, &raw_rows);
        let rows = raw_rows
            .into_iter()
            .map(|raw| {
                raw.iter()
                    .zip(schema.columns())
                    .map(|(cell, def)| typed_cell(cell, def.kind))
                    .collect()
            })
            .collect();
        Dataset {
            source: source.into(),
            schema,
            rows,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<&[CellValue]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    /// Cell at (`row`, `column`). Out-of-range rows yield `Null`.
    pub fn value(&self, row: usize, column: &str) -> DataResult<&CellValue> {
        let col = self.schema.index_of(column)?;
        Ok(self
            .rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&NULL_CELL))
    }

    /// All cells of a column in row order.
    pub fn column_values(&self, column: &str) -> DataResult<Vec<&CellValue>> {
        let col = self.schema.index_of(column)?;
        Ok(self.rows.iter().map(|r| &r[col]).collect())
    }
}

static NULL_CELL: CellValue = CellValue::Null;

/// Markers read as a missing value, the set dataframe CSV readers use by
/// default.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a (trimmed) raw cell stands for a missing value.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

fn typed_cell(raw: &str, kind: ColumnType) -> CellValue {
    let s = raw.trim();
    if is_missing(s) {
        return CellValue::Null;
    }
    match kind {
        ColumnType::Numeric => {
            if let Ok(i) = s.parse::<i64>() {
                CellValue::Integer(i)
            } else if let Ok(f) = s.parse::<f64>() {
                CellValue::Float(f)
            } else {
                CellValue::Null
            }
        }
        ColumnType::Categorical => CellValue::Text(s.to_string()),
    }
}
