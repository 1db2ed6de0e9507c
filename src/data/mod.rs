//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + validate rows → Dataset (bad rows quarantined)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<ContentRecord>, unique values, year bounds
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterSpec predicates → DatasetView (row indices)
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod view;

pub use filter::FilterSpec;
pub use loader::{load_file, LoadError};
pub use model::{ContentRecord, ContentType, Dataset, Month, RejectedRow, RowError};
pub use view::DatasetView;
