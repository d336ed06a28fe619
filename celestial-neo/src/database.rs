//! Linked, indexed storage of near-Earth objects and close approaches.
//!
//! [`NeoDatabase`] takes ownership of both collections, links every approach
//! to its object through a designation index, and is read-only afterwards.
//! Objects and approaches refer to each other by [`NeoId`] / [`ApproachId`]
//! indices into the flat collections, never by owning pointers.
//!
//! ```
//! use celestial_neo::filters::Criteria;
//! use celestial_neo::{CloseApproach, NearEarthObject, NeoDatabase};
//! use chrono::NaiveDate;
//!
//! let time = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let db = NeoDatabase::new(
//!     vec![NearEarthObject::new("2020 AB", None, f64::NAN, false)],
//!     vec![CloseApproach::new("2020 AB", time, 0.5, 10.0)],
//! )?;
//!
//! let filters = Criteria { distance_max: Some(1.0), ..Default::default() }.into_filters();
//! assert_eq!(db.query(&filters).count(), 1);
//! # Ok::<(), celestial_neo::NeoError>(())
//! ```

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::errors::{NeoError, NeoResult};
use crate::filters::Predicate;
use crate::model::{ApproachId, CloseApproach, LinkedApproach, NearEarthObject, NeoId};

/// What to do with an approach whose designation matches no object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Keep the approach unlinked. Object criteria never match it.
    #[default]
    Lenient,
    /// Fail construction with [`NeoError::UnmatchedDesignation`].
    Strict,
}

#[derive(Debug, Clone, Default)]
pub struct DatabaseBuilder {
    link_policy: LinkPolicy,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link_policy(mut self, policy: LinkPolicy) -> Self {
        self.link_policy = policy;
        self
    }

    pub fn strict(self) -> Self {
        self.with_link_policy(LinkPolicy::Strict)
    }

    /// Indexes `neos` and links `approaches` to them.
    ///
    /// Runs in `O(|neos| + |approaches|)`. Approaches are appended to their
    /// object's list in input order.
    ///
    /// # Errors
    /// [`NeoError::DuplicateDesignation`] or [`NeoError::DuplicateName`] when an
    /// index key is not unique, and [`NeoError::UnmatchedDesignation`] under
    /// [`LinkPolicy::Strict`].
    pub fn build(
        self,
        mut neos: Vec<NearEarthObject>,
        mut approaches: Vec<CloseApproach>,
    ) -> NeoResult<NeoDatabase> {
        let mut by_designation = HashMap::with_capacity(neos.len());
        let mut by_name = HashMap::new();

        for (index, neo) in neos.iter_mut().enumerate() {
            neo.approaches.clear();
            let id = NeoId(index);
            if by_designation
                .insert(neo.designation().to_string(), id)
                .is_some()
            {
                return Err(NeoError::duplicate_designation(neo.designation()));
            }
            if let Some(name) = neo.name() {
                if by_name.insert(name.to_string(), id).is_some() {
                    return Err(NeoError::duplicate_name(name));
                }
            }
        }

        let mut unmatched = 0;
        for (index, approach) in approaches.iter_mut().enumerate() {
            match by_designation.get(approach.designation()) {
                Some(&id) => {
                    approach.neo = Some(id);
                    neos[id.0].approaches.push(ApproachId(index));
                }
                None if self.link_policy == LinkPolicy::Strict => {
                    return Err(NeoError::unmatched_designation(approach.designation()));
                }
                None => {
                    approach.neo = None;
                    unmatched += 1;
                }
            }
        }

        if unmatched > 0 {
            warn!(unmatched, "close approaches reference unknown designations");
        }
        debug!(
            neos = neos.len(),
            named = by_name.len(),
            approaches = approaches.len(),
            "linked database"
        );

        Ok(NeoDatabase {
            neos,
            approaches,
            by_designation,
            by_name,
            unmatched,
        })
    }
}

/// An immutable, linked set of near-Earth objects and close approaches.
#[derive(Debug)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
    unmatched: usize,
}

impl NeoDatabase {
    /// Links the collections with [`LinkPolicy::Lenient`].
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> NeoResult<Self> {
        DatabaseBuilder::new().build(neos, approaches)
    }

    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Exact, case-sensitive lookup by primary designation.
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .map(|&id| &self.neos[id.0])
    }

    /// Exact, case-sensitive lookup by name. Never matches an unnamed object.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name).map(|&id| &self.neos[id.0])
    }

    /// Lazily yields the approaches that satisfy every filter, in collection order.
    ///
    /// With no filters every approach is yielded. Evaluation stops at the
    /// first filter that rejects an approach.
    pub fn query<'a, P: Predicate + 'a>(
        &'a self,
        filters: &'a [P],
    ) -> impl Iterator<Item = LinkedApproach<'a>> + 'a {
        self.approaches()
            .filter(move |approach| filters.iter().all(|f| f.matches(approach)))
    }

    /// Every approach in collection order.
    pub fn approaches(&self) -> impl Iterator<Item = LinkedApproach<'_>> + '_ {
        self.approaches.iter().map(move |approach| self.link(approach))
    }

    /// Approaches of `neo` in input order.
    pub fn approaches_of<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = LinkedApproach<'a>> + 'a {
        neo.approach_ids()
            .iter()
            .filter_map(move |&id| self.approach(id))
    }

    pub fn approach(&self, id: ApproachId) -> Option<LinkedApproach<'_>> {
        self.approaches.get(id.0).map(|approach| self.link(approach))
    }

    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.0)
    }

    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    pub fn neo_count(&self) -> usize {
        self.neos.len()
    }

    pub fn approach_count(&self) -> usize {
        self.approaches.len()
    }

    /// Approaches left unlinked by lenient linking.
    pub fn unmatched_count(&self) -> usize {
        self.unmatched
    }

    fn link<'a>(&'a self, approach: &'a CloseApproach) -> LinkedApproach<'a> {
        LinkedApproach::new(approach, approach.neo.and_then(|id| self.neos.get(id.0)))
    }
}
