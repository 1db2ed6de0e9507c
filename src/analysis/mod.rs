//! Reporting core: aggregate a filtered view, then derive recommendations.
//!
//! ```text
//!   DatasetView ──► aggregate ──► Summary ──► Recommendations
//!                                   │
//!                  DashboardView ◄──┴──► Report
//! ```

pub mod aggregate;
pub mod dashboard;
pub mod recommend;
pub mod report;

pub use aggregate::{aggregate, format_stat, Summary, SummaryOptions, NO_DATA};
pub use dashboard::{DashboardView, ScatterPoint};
pub use recommend::{Pick, Recommendations, Variant};
pub use report::Report;
