//! Predicates for querying close approaches.
//!
//! - [`predicate`]: the [`Predicate`] contract consumed by the query engine
//! - [`attribute`]: attribute extractors, comparisons, and [`AttributeFilter`]
//! - [`criteria`]: canonical [`FilterKey`]s, [`Criteria`], and [`limit`]

pub mod attribute;
pub mod criteria;
pub mod predicate;

pub use attribute::{Attribute, AttributeFilter, Comparison, Threshold, Value, ValueKind};
pub use criteria::{create_filters, limit, Criteria, FilterKey};
pub use predicate::{from_fn, FromFn, Predicate};
