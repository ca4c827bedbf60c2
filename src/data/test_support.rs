use super::model::Dataset;

/// Build a dataset from string literals, inferring the schema like the loader.
pub fn dataset(headers: &[&str], rows: &[&[&str]]) -> Dataset {
    Dataset::from_text_rows(
        "test",
        headers.iter().map(|s| s.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}

/// Three survey-change rows over two states.
pub fn survey() -> Dataset {
    dataset(
        &["State", "District Name", "Category", "Indicator", "Change"],
        &[
            &["X", "A", "Health", "I1", "5"],
            &["X", "A", "Health", "I2", "-2"],
            &["Y", "B", "Health", "I1", "1"],
        ],
    )
}
