//! Near-Earth objects, their close approaches, and the linked view over both.
//!
//! Objects and approaches are plain records until a
//! [`NeoDatabase`](crate::NeoDatabase) links them. Linking never creates owning
//! pointers between the two: an object keeps the [`ApproachId`]s of its
//! approaches and an approach keeps the [`NeoId`] of its object, both of which
//! index into the flat collections owned by the database.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

use crate::extract::datetime_to_str;

/// Index of a [`NearEarthObject`] within its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(pub(crate) usize);

impl NeoId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a [`CloseApproach`] within its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(pub(crate) usize);

impl ApproachId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A near-Earth object, keyed by its primary designation.
#[derive(Debug, Clone)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    diameter: f64,
    hazardous: bool,
    pub(crate) approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Creates an unlinked object.
    ///
    /// An empty `name` is stored as absent. `diameter` is in kilometers; pass
    /// `f64::NAN` when it is unknown.
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: f64,
        hazardous: bool,
    ) -> Self {
        Self {
            designation: designation.into(),
            name: name.filter(|n| !n.is_empty()),
            diameter,
            hazardous,
            approaches: Vec::new(),
        }
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Diameter in kilometers; NaN when unknown.
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn diameter_km(&self) -> Option<f64> {
        (!self.diameter.is_nan()).then_some(self.diameter)
    }

    pub fn hazardous(&self) -> bool {
        self.hazardous
    }

    /// Approaches of this object in input order. Empty until linked.
    pub fn approach_ids(&self) -> &[ApproachId] {
        &self.approaches
    }

    /// Designation followed by the parenthesized name, when there is one.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous { "is" } else { "is not" };
        match self.diameter_km() {
            Some(d) => write!(
                f,
                "NEO {} has a diameter of {:.3} km and {} potentially hazardous.",
                self.fullname(),
                d,
                hazard
            ),
            None => write!(
                f,
                "NEO {} has an unknown diameter and {} potentially hazardous.",
                self.fullname(),
                hazard
            ),
        }
    }
}

/// A single close approach of an object to Earth.
///
/// The designation is the join key used while linking; after linking the
/// object is reached through [`CloseApproach::neo_id`].
#[derive(Debug, Clone)]
pub struct CloseApproach {
    designation: String,
    time: NaiveDateTime,
    distance: f64,
    velocity: f64,
    pub(crate) neo: Option<NeoId>,
}

impl CloseApproach {
    /// Creates an unlinked approach. `distance` is in au, `velocity` in km/s.
    pub fn new(
        designation: impl Into<String>,
        time: NaiveDateTime,
        distance: f64,
        velocity: f64,
    ) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Approach time, UTC.
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    /// Approach time formatted as `YYYY-MM-DD HH:MM`.
    pub fn time_str(&self) -> String {
        datetime_to_str(&self.time)
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// The linked object; `None` before linking or when no object matched.
    pub fn neo_id(&self) -> Option<NeoId> {
        self.neo
    }
}

/// A close approach together with the object it was linked to.
///
/// Yielded by [`NeoDatabase::query`](crate::NeoDatabase::query) and inspected
/// by [`Predicate`](crate::filters::Predicate)s.
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'db> {
    approach: &'db CloseApproach,
    neo: Option<&'db NearEarthObject>,
}

impl<'db> LinkedApproach<'db> {
    pub(crate) fn new(approach: &'db CloseApproach, neo: Option<&'db NearEarthObject>) -> Self {
        Self { approach, neo }
    }

    pub fn approach(&self) -> &'db CloseApproach {
        self.approach
    }

    pub fn neo(&self) -> Option<&'db NearEarthObject> {
        self.neo
    }

    pub fn designation(&self) -> &'db str {
        self.approach.designation()
    }

    pub fn time(&self) -> NaiveDateTime {
        self.approach.time()
    }

    pub fn date(&self) -> NaiveDate {
        self.approach.date()
    }

    pub fn distance(&self) -> f64 {
        self.approach.distance()
    }

    pub fn velocity(&self) -> f64 {
        self.approach.velocity()
    }
}

impl fmt::Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = match self.neo {
            Some(neo) => neo.fullname(),
            None => self.approach.designation().to_string(),
        };
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.approach.time_str(),
            who,
            self.approach.distance(),
            self.approach.velocity()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_name_is_absent() {
        let neo = NearEarthObject::new("2020 AB", Some(String::new()), f64::NAN, false);
        assert_eq!(neo.name(), None);
        assert_eq!(neo.fullname(), "2020 AB");
    }

    #[test]
    fn test_fullname_with_name() {
        let neo = NearEarthObject::new("433", Some("Eros".to_string()), 16.84, false);
        assert_eq!(neo.fullname(), "433 (Eros)");
    }

    #[test]
    fn test_diameter_km_unknown() {
        let neo = NearEarthObject::new("2020 AB", None, f64::NAN, false);
        assert!(neo.diameter().is_nan());
        assert_eq!(neo.diameter_km(), None);

        let neo = NearEarthObject::new("433", None, 16.84, false);
        assert_eq!(neo.diameter_km(), Some(16.84));
    }

    #[test]
    fn test_neo_display() {
        let neo = NearEarthObject::new("433", Some("Eros".to_string()), 16.84, false);
        assert_eq!(
            neo.to_string(),
            "NEO 433 (Eros) has a diameter of 16.840 km and is not potentially hazardous."
        );

        let neo = NearEarthObject::new("99942", Some("Apophis".to_string()), f64::NAN, true);
        assert_eq!(
            neo.to_string(),
            "NEO 99942 (Apophis) has an unknown diameter and is potentially hazardous."
        );
    }

    #[test]
    fn test_new_objects_are_unlinked() {
        let neo = NearEarthObject::new("433", None, 16.84, false);
        assert!(neo.approach_ids().is_empty());

        let approach = CloseApproach::new("433", at(2020, 1, 1, 0, 0), 0.5, 10.0);
        assert_eq!(approach.neo_id(), None);
    }

    #[test]
    fn test_approach_time_accessors() {
        let approach = CloseApproach::new("433", at(2020, 1, 31, 14, 5), 0.5, 10.0);
        assert_eq!(approach.date(), NaiveDate::from_ymd_opt(2020, 1, 31).unwrap());
        assert_eq!(approach.time_str(), "2020-01-31 14:05");
    }

    #[test]
    fn test_linked_display_falls_back_to_designation() {
        let approach = CloseApproach::new("9999XYZ", at(2021, 6, 2, 3, 4), 0.25, 7.5);
        let linked = LinkedApproach::new(&approach, None);
        assert_eq!(
            linked.to_string(),
            "On 2021-06-02 03:04, '9999XYZ' approaches Earth at a distance of 0.25 au and a velocity of 7.50 km/s."
        );

        let neo = NearEarthObject::new("433", Some("Eros".to_string()), 16.84, false);
        let linked = LinkedApproach::new(&approach, Some(&neo));
        assert!(linked.to_string().contains("'433 (Eros)'"));
    }
}
