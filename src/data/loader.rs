use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{ColumnType, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – comma-separated, header row with column names (recommended)
/// * `.tsv`  – tab-separated, same layout
/// * `.json` – `[{ "State": "...", "NFHS 4": 12.3, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_delimited(path, b','),
        "tsv" => load_delimited(path, b'\t'),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.schema().columns().len(),
        path.display()
    );
    for col in dataset.schema().columns() {
        let kind = match col.kind {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
        };
        log::debug!("column '{}': {kind}", col.name);
    }

    Ok(dataset)
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line. Every record must
/// have as many fields as the header.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Dataset> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening file")?;
    read_delimited(reader, source_name(path))
}

fn read_delimited<R: std::io::Read>(mut reader: csv::Reader<R>, source: String) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("no columns in header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        // Row numbers are 1-based and count the header line.
        let record = result.with_context(|| format!("row {}", row_no + 2))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(Dataset::from_text_rows(source, headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (what a dataframe exports with
/// `orient='records'`):
///
/// ```json
/// [
///   { "State": "Goa", "District Name": "North Goa", "NFHS 4": 30.1 },
///   ...
/// ]
/// ```
///
/// Columns are taken in first-seen order; keys missing from a record are
/// treated as empty cells.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text, source_name(path))
}

fn parse_json(text: &str, source: String) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Record {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(Dataset::from_text_rows(source, headers, rows))
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
