//! Attribute/operator filters over close approaches.
//!
//! An [`AttributeFilter`] pairs an [`Attribute`] extractor with a
//! [`Comparison`] and an optional [`Threshold`]. Extracted [`Value`]s are
//! compared against the threshold with a partial order in which mismatched
//! kinds and NaN numbers are unordered; an unordered comparison never matches.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

use super::predicate::Predicate;
use crate::errors::{NeoError, NeoResult};
use crate::model::LinkedApproach;

/// The kind of value an attribute produces and a threshold must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Date,
    Number,
    Flag,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
            Self::Flag => "boolean",
        }
    }
}

/// A value read off a linked approach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Date(NaiveDate),
    Number(f64),
    Flag(bool),
}

impl Value<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Date(_) => ValueKind::Date,
            Self::Number(_) => ValueKind::Number,
            Self::Flag(_) => ValueKind::Flag,
        }
    }

    /// Orders two values of the same kind. `None` for mismatched kinds or NaN.
    pub fn compare(&self, other: &Value<'_>) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Self::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Self::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Self::Flag(a), Value::Flag(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// A caller-supplied bound for an [`AttributeFilter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Threshold {
    Text(String),
    Date(NaiveDate),
    Number(f64),
    Flag(bool),
}

impl Threshold {
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Self::Text(s) => Value::Text(s),
            Self::Date(d) => Value::Date(*d),
            Self::Number(n) => Value::Number(*n),
            Self::Flag(b) => Value::Flag(*b),
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.as_value().kind()
    }
}

impl From<&str> for Threshold {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Threshold {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for Threshold {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<f64> for Threshold {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Threshold {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// A comparable property of a close approach or of its linked object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Designation,
    Date,
    Distance,
    Velocity,
    Name,
    Diameter,
    Hazardous,
}

impl Attribute {
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Designation | Self::Name => ValueKind::Text,
            Self::Date => ValueKind::Date,
            Self::Distance | Self::Velocity | Self::Diameter => ValueKind::Number,
            Self::Hazardous => ValueKind::Flag,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Designation => "designation",
            Self::Date => "date",
            Self::Distance => "distance",
            Self::Velocity => "velocity",
            Self::Name => "name",
            Self::Diameter => "diameter",
            Self::Hazardous => "hazardous",
        }
    }

    /// Reads this attribute off `approach`.
    ///
    /// Object attributes are `None` when the approach is unlinked, and
    /// [`Attribute::Name`] is `None` for an unnamed object.
    pub fn extract<'a>(self, approach: &LinkedApproach<'a>) -> Option<Value<'a>> {
        match self {
            Self::Designation => Some(Value::Text(approach.designation())),
            Self::Date => Some(Value::Date(approach.date())),
            Self::Distance => Some(Value::Number(approach.distance())),
            Self::Velocity => Some(Value::Number(approach.velocity())),
            Self::Name => approach.neo()?.name().map(Value::Text),
            Self::Diameter => approach.neo().map(|neo| Value::Number(neo.diameter())),
            Self::Hazardous => approach.neo().map(|neo| Value::Flag(neo.hazardous())),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    AtLeast,
    AtMost,
}

impl Comparison {
    pub fn accepts(self, ordering: Option<Ordering>) -> bool {
        matches!(
            (self, ordering),
            (Self::Equals, Some(Ordering::Equal))
                | (Self::AtLeast, Some(Ordering::Greater | Ordering::Equal))
                | (Self::AtMost, Some(Ordering::Less | Ordering::Equal))
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
        }
    }
}

/// `attribute <comparison> threshold`, vacuously true without a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeFilter {
    attribute: Attribute,
    comparison: Comparison,
    threshold: Option<Threshold>,
}

impl AttributeFilter {
    /// # Errors
    /// [`NeoError::InvalidThreshold`] when the threshold kind does not match
    /// the attribute kind.
    pub fn new(
        attribute: Attribute,
        comparison: Comparison,
        threshold: Option<Threshold>,
    ) -> NeoResult<Self> {
        if let Some(t) = &threshold {
            if t.kind() != attribute.kind() {
                return Err(NeoError::invalid_threshold(
                    attribute.as_str(),
                    attribute.kind().as_str(),
                ));
            }
        }
        Ok(Self {
            attribute,
            comparison,
            threshold,
        })
    }

    pub(crate) fn from_parts(
        attribute: Attribute,
        comparison: Comparison,
        threshold: Option<Threshold>,
    ) -> Self {
        Self {
            attribute,
            comparison,
            threshold,
        }
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn threshold(&self) -> Option<&Threshold> {
        self.threshold.as_ref()
    }

    pub fn is_vacuous(&self) -> bool {
        self.threshold.is_none()
    }
}

impl Predicate for AttributeFilter {
    fn matches(&self, approach: &LinkedApproach<'_>) -> bool {
        let Some(threshold) = &self.threshold else {
            return true;
        };
        match self.attribute.extract(approach) {
            Some(value) => self
                .comparison
                .accepts(value.compare(&threshold.as_value())),
            None => false,
        }
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.threshold {
            Some(t) => write!(f, "{} {} {:?}", self.attribute, self.comparison.symbol(), t),
            None => write!(f, "{} {} *", self.attribute, self.comparison.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CloseApproach, NearEarthObject};

    fn approach(designation: &str, date: (i32, u32, u32), distance: f64, velocity: f64) -> CloseApproach {
        let time = NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        CloseApproach::new(designation, time, distance, velocity)
    }

    fn filter(attribute: Attribute, comparison: Comparison, t: impl Into<Threshold>) -> AttributeFilter {
        AttributeFilter::new(attribute, comparison, Some(t.into())).unwrap()
    }

    #[test]
    fn test_compare_same_kind() {
        assert_eq!(Value::Number(1.0).compare(&Value::Number(2.0)), Some(Ordering::Less));
        assert_eq!(Value::Text("b").compare(&Value::Text("a")), Some(Ordering::Greater));
        assert_eq!(Value::Flag(true).compare(&Value::Flag(true)), Some(Ordering::Equal));
    }

    #[test]
    fn test_compare_nan_and_mismatch_unordered() {
        assert_eq!(Value::Number(f64::NAN).compare(&Value::Number(1.0)), None);
        assert_eq!(Value::Number(1.0).compare(&Value::Flag(true)), None);
        for cmp in [Comparison::Equals, Comparison::AtLeast, Comparison::AtMost] {
            assert!(!cmp.accepts(None));
        }
    }

    #[test]
    fn test_comparison_bounds_are_inclusive() {
        assert!(Comparison::AtLeast.accepts(Some(Ordering::Equal)));
        assert!(Comparison::AtMost.accepts(Some(Ordering::Equal)));
        assert!(!Comparison::AtMost.accepts(Some(Ordering::Greater)));
        assert!(!Comparison::Equals.accepts(Some(Ordering::Less)));
    }

    #[test]
    fn test_threshold_kind_mismatch_rejected() {
        let err = AttributeFilter::new(
            Attribute::Distance,
            Comparison::AtMost,
            Some(Threshold::Flag(true)),
        )
        .unwrap_err();
        assert!(matches!(err, NeoError::InvalidThreshold { expected: "number", .. }));
    }

    #[test]
    fn test_absent_threshold_is_vacuous() {
        let ca = approach("9999XYZ", (2020, 1, 1), 0.5, 10.0);
        let linked = LinkedApproach::new(&ca, None);
        let f = AttributeFilter::new(Attribute::Hazardous, Comparison::Equals, None).unwrap();
        assert!(f.is_vacuous());
        assert!(f.matches(&linked));
    }

    #[test]
    fn test_approach_attributes() {
        let ca = approach("2020 AB", (2020, 3, 4), 0.5, 10.0);
        let linked = LinkedApproach::new(&ca, None);

        assert!(filter(Attribute::Designation, Comparison::Equals, "2020 AB").matches(&linked));
        assert!(!filter(Attribute::Designation, Comparison::Equals, "2020 ab").matches(&linked));
        let day = NaiveDate::from_ymd_opt(2020, 3, 4).unwrap();
        assert!(filter(Attribute::Date, Comparison::Equals, day).matches(&linked));
        assert!(filter(Attribute::Date, Comparison::AtLeast, day).matches(&linked));
        assert!(filter(Attribute::Date, Comparison::AtMost, day).matches(&linked));
        assert!(filter(Attribute::Distance, Comparison::AtMost, 0.5).matches(&linked));
        assert!(!filter(Attribute::Velocity, Comparison::AtLeast, 10.5).matches(&linked));
    }

    #[test]
    fn test_object_attributes_false_when_unlinked() {
        let ca = approach("9999XYZ", (2020, 1, 1), 0.5, 10.0);
        let linked = LinkedApproach::new(&ca, None);

        assert!(!filter(Attribute::Name, Comparison::Equals, "Eros").matches(&linked));
        assert!(!filter(Attribute::Diameter, Comparison::AtLeast, 0.0).matches(&linked));
        assert!(!filter(Attribute::Hazardous, Comparison::Equals, false).matches(&linked));
    }

    #[test]
    fn test_unknown_diameter_never_matches_bounds() {
        let neo = NearEarthObject::new("2020 AB", None, f64::NAN, false);
        let ca = approach("2020 AB", (2020, 1, 1), 0.5, 10.0);
        let linked = LinkedApproach::new(&ca, Some(&neo));

        assert!(!filter(Attribute::Diameter, Comparison::AtLeast, 0.0).matches(&linked));
        assert!(!filter(Attribute::Diameter, Comparison::AtMost, 1e9).matches(&linked));
    }

    #[test]
    fn test_linked_object_attributes() {
        let neo = NearEarthObject::new("433", Some("Eros".to_string()), 16.84, false);
        let ca = approach("433", (2020, 1, 1), 0.5, 10.0);
        let linked = LinkedApproach::new(&ca, Some(&neo));

        assert!(filter(Attribute::Name, Comparison::Equals, "Eros").matches(&linked));
        assert!(filter(Attribute::Diameter, Comparison::AtLeast, 16.84).matches(&linked));
        assert!(!filter(Attribute::Diameter, Comparison::AtMost, 16.0).matches(&linked));
        assert!(filter(Attribute::Hazardous, Comparison::Equals, false).matches(&linked));
        assert!(!filter(Attribute::Hazardous, Comparison::Equals, true).matches(&linked));
    }

    #[test]
    fn test_display() {
        let f = filter(Attribute::Distance, Comparison::AtMost, 0.1);
        assert_eq!(f.to_string(), "distance <= Number(0.1)");
    }
}
