//! Canonical filter keys and user criteria.
//!
//! Each [`FilterKey`] names one `(attribute, comparison)` pairing. Keys are
//! validated when filters are built, so the query engine only ever receives
//! ready-made predicates.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::attribute::{Attribute, AttributeFilter, Comparison, Threshold};
use crate::errors::{NeoError, NeoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Designation,
    Date,
    StartDate,
    EndDate,
    DistanceMin,
    DistanceMax,
    VelocityMin,
    VelocityMax,
    Name,
    DiameterMin,
    DiameterMax,
    Hazardous,
}

impl FilterKey {
    pub const ALL: [FilterKey; 12] = [
        FilterKey::Designation,
        FilterKey::Date,
        FilterKey::StartDate,
        FilterKey::EndDate,
        FilterKey::DistanceMin,
        FilterKey::DistanceMax,
        FilterKey::VelocityMin,
        FilterKey::VelocityMax,
        FilterKey::Name,
        FilterKey::DiameterMin,
        FilterKey::DiameterMax,
        FilterKey::Hazardous,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Designation => "designation",
            Self::Date => "date",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::DistanceMin => "distance_min",
            Self::DistanceMax => "distance_max",
            Self::VelocityMin => "velocity_min",
            Self::VelocityMax => "velocity_max",
            Self::Name => "name",
            Self::DiameterMin => "diameter_min",
            Self::DiameterMax => "diameter_max",
            Self::Hazardous => "hazardous",
        }
    }

    pub fn attribute(self) -> Attribute {
        match self {
            Self::Designation => Attribute::Designation,
            Self::Date | Self::StartDate | Self::EndDate => Attribute::Date,
            Self::DistanceMin | Self::DistanceMax => Attribute::Distance,
            Self::VelocityMin | Self::VelocityMax => Attribute::Velocity,
            Self::Name => Attribute::Name,
            Self::DiameterMin | Self::DiameterMax => Attribute::Diameter,
            Self::Hazardous => Attribute::Hazardous,
        }
    }

    pub fn comparison(self) -> Comparison {
        match self {
            Self::Designation | Self::Date | Self::Name | Self::Hazardous => Comparison::Equals,
            Self::StartDate | Self::DistanceMin | Self::VelocityMin | Self::DiameterMin => {
                Comparison::AtLeast
            }
            Self::EndDate | Self::DistanceMax | Self::VelocityMax | Self::DiameterMax => {
                Comparison::AtMost
            }
        }
    }

    /// Builds the filter for this key.
    ///
    /// # Errors
    /// [`NeoError::InvalidThreshold`] if `threshold` has the wrong kind.
    pub fn filter(self, threshold: Option<Threshold>) -> NeoResult<AttributeFilter> {
        AttributeFilter::new(self.attribute(), self.comparison(), threshold).map_err(|err| {
            match err {
                NeoError::InvalidThreshold { expected, .. } => {
                    NeoError::invalid_threshold(self.as_str(), expected)
                }
                other => other,
            }
        })
    }
}

impl FromStr for FilterKey {
    type Err = NeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "des" {
            return Ok(Self::Designation);
        }
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| NeoError::unknown_criterion(s))
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds one filter per `(key, threshold)` pair.
///
/// # Errors
/// [`NeoError::UnknownCriterion`] for an unrecognized key and
/// [`NeoError::InvalidThreshold`] for a mistyped threshold.
pub fn create_filters<I, K>(pairs: I) -> NeoResult<Vec<AttributeFilter>>
where
    I: IntoIterator<Item = (K, Option<Threshold>)>,
    K: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(key, threshold)| key.as_ref().parse::<FilterKey>()?.filter(threshold))
        .collect()
}

/// User-specified query criteria, one optional bound per [`FilterKey`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub designation: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub name: Option<String>,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
    pub hazardous: Option<bool>,
}

impl Criteria {
    pub fn threshold(&self, key: FilterKey) -> Option<Threshold> {
        match key {
            FilterKey::Designation => self.designation.clone().map(Threshold::Text),
            FilterKey::Date => self.date.map(Threshold::Date),
            FilterKey::StartDate => self.start_date.map(Threshold::Date),
            FilterKey::EndDate => self.end_date.map(Threshold::Date),
            FilterKey::DistanceMin => self.distance_min.map(Threshold::Number),
            FilterKey::DistanceMax => self.distance_max.map(Threshold::Number),
            FilterKey::VelocityMin => self.velocity_min.map(Threshold::Number),
            FilterKey::VelocityMax => self.velocity_max.map(Threshold::Number),
            FilterKey::Name => self.name.clone().map(Threshold::Text),
            FilterKey::DiameterMin => self.diameter_min.map(Threshold::Number),
            FilterKey::DiameterMax => self.diameter_max.map(Threshold::Number),
            FilterKey::Hazardous => self.hazardous.map(Threshold::Flag),
        }
    }

    /// Number of criteria that carry a bound.
    pub fn active(&self) -> usize {
        FilterKey::ALL
            .into_iter()
            .filter(|&key| self.threshold(key).is_some())
            .count()
    }

    /// One filter per key; unset criteria become vacuous filters.
    pub fn into_filters(self) -> Vec<AttributeFilter> {
        FilterKey::ALL
            .into_iter()
            .map(|key| {
                // Threshold kinds come from the typed fields.
                AttributeFilter::from_parts(key.attribute(), key.comparison(), self.threshold(key))
            })
            .collect()
    }
}

/// Yields at most `n` items; `None` or `Some(0)` leaves the iterator unbounded.
pub fn limit<I: Iterator>(iter: I, n: Option<usize>) -> std::iter::Take<I> {
    iter.take(n.filter(|&n| n > 0).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Predicate;

    #[test]
    fn test_key_round_trip_names() {
        for key in FilterKey::ALL {
            assert_eq!(key.as_str().parse::<FilterKey>().unwrap(), key);
        }
        assert_eq!("des".parse::<FilterKey>().unwrap(), FilterKey::Designation);
    }

    #[test]
    fn test_unknown_key() {
        let err = "colour".parse::<FilterKey>().unwrap_err();
        assert!(matches!(err, NeoError::UnknownCriterion { ref key } if key == "colour"));
    }

    #[test]
    fn test_key_table() {
        assert_eq!(FilterKey::StartDate.attribute(), Attribute::Date);
        assert_eq!(FilterKey::StartDate.comparison(), Comparison::AtLeast);
        assert_eq!(FilterKey::EndDate.comparison(), Comparison::AtMost);
        assert_eq!(FilterKey::DiameterMax.attribute(), Attribute::Diameter);
        assert_eq!(FilterKey::Hazardous.comparison(), Comparison::Equals);
    }

    #[test]
    fn test_create_filters_rejects_unknown_key() {
        let result = create_filters([
            ("distance_max", Some(Threshold::Number(1.0))),
            ("speed", Some(Threshold::Number(1.0))),
        ]);
        assert!(matches!(result, Err(NeoError::UnknownCriterion { .. })));
    }

    #[test]
    fn test_create_filters_reports_key_on_bad_threshold() {
        let err = create_filters([("hazardous", Some(Threshold::Number(1.0)))]).unwrap_err();
        match err {
            NeoError::InvalidThreshold { key, expected } => {
                assert_eq!(key, "hazardous");
                assert_eq!(expected, "boolean");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_create_filters_allows_absent_threshold() {
        let filters = create_filters([("name", None::<Threshold>)]).unwrap();
        assert_eq!(filters.len(), 1);
        assert!(filters[0].is_vacuous());
    }

    #[test]
    fn test_criteria_into_filters_is_uniform() {
        let criteria = Criteria {
            distance_max: Some(0.1),
            hazardous: Some(true),
            ..Default::default()
        };
        assert_eq!(criteria.active(), 2);

        let filters = criteria.into_filters();
        assert_eq!(filters.len(), FilterKey::ALL.len());
        assert_eq!(filters.iter().filter(|f| !f.is_vacuous()).count(), 2);
    }

    #[test]
    fn test_default_criteria_match_everything() {
        use crate::model::{CloseApproach, LinkedApproach};

        let time = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let ca = CloseApproach::new("9999XYZ", time, 0.5, 10.0);
        let linked = LinkedApproach::new(&ca, None);

        assert!(Criteria::default()
            .into_filters()
            .iter()
            .all(|f| f.matches(&linked)));
    }

    #[test]
    fn test_limit() {
        assert_eq!(limit(0..20, Some(3)).count(), 3);
        assert_eq!(limit(0..20, Some(0)).count(), 20);
        assert_eq!(limit(0..20, None).count(), 20);
        assert_eq!(limit(0..2, Some(5)).count(), 2);
    }
}
