//! The contract between the query engine and the filters it applies.

use crate::model::LinkedApproach;

/// A pure, boolean test over one close approach.
///
/// The query engine knows nothing about a predicate beyond this method and
/// may stop evaluating a conjunction at the first `false`, so implementations
/// must be free of side effects.
pub trait Predicate {
    fn matches(&self, approach: &LinkedApproach<'_>) -> bool;
}

impl<P: Predicate + ?Sized> Predicate for &P {
    fn matches(&self, approach: &LinkedApproach<'_>) -> bool {
        (**self).matches(approach)
    }
}

impl<P: Predicate + ?Sized> Predicate for Box<P> {
    fn matches(&self, approach: &LinkedApproach<'_>) -> bool {
        (**self).matches(approach)
    }
}

/// Predicate backed by a closure. Created with [`from_fn`].
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

/// Wraps a closure as a [`Predicate`].
///
/// ```
/// use celestial_neo::filters::{from_fn, Predicate};
///
/// let close = from_fn(|a| a.distance() < 0.05);
/// # let _ = &close as &dyn Predicate;
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&LinkedApproach<'_>) -> bool,
{
    FromFn(f)
}

impl<F> Predicate for FromFn<F>
where
    F: Fn(&LinkedApproach<'_>) -> bool,
{
    fn matches(&self, approach: &LinkedApproach<'_>) -> bool {
        (self.0)(approach)
    }
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FromFn")
    }
}
