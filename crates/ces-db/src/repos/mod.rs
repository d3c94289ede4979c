//! Repository methods on [`CesDb`](crate::CesDb), one module per table plus
//! the read-side summary.

pub mod campaign;
pub mod insight;
pub mod metric;
pub mod summary;
