/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset (schema inferred once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  immutable rows + Schema, shared as Arc<Dataset>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌─────────┐
///   │  filter  │ ◄─── │ cascade │  dropdown levels → FilterPath
///   └──────────┘      └─────────┘
///        │  FilteredView (row indices)
///        ▼
///   ┌───────────┐
///   │ aggregate │  means, group means, histograms
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cascade;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod test_support;
