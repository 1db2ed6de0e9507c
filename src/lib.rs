//! Filter-and-aggregate core for exploring streaming content metadata.
//!
//! The `streamscope` dashboard binary and the `streamscope-report` console
//! binary are thin shells over [`data`] and [`analysis`].

pub mod analysis;
pub mod data;
