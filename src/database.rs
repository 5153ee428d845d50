//! In-memory database linking NEOs with their close approaches.
//!
//! [`NeoDatabase`] owns both record collections and builds everything it
//! needs at construction time: a designation index, a name index, and the
//! bidirectional NEO-approach linkage. After construction the database is
//! read-only; every accessor takes `&self` and queries can run back to back
//! over the same data.
//!
//! Linkage is index-based. Approaches store the arena index of their NEO and
//! NEOs store the arena indices of their approaches, so the two-way relation
//! needs no shared ownership or interior mutability. Both passes are linear:
//! one over the NEOs to build the indices, one over the approaches to link,
//! O(N + A) overall where a naive designation scan per approach would be
//! O(N x A).

use std::collections::HashMap;
use std::fmt;

use crate::errors::NeoError;
use crate::filters::Filter;
use crate::model::{CloseApproach, NearEarthObject};

/// A database of near-Earth objects and their close approaches.
///
/// ```
/// use neo_catalog::database::NeoDatabase;
/// use neo_catalog::filters::{create_filters, QueryOptions};
/// use neo_catalog::model::{CloseApproach, NearEarthObject};
/// use neo_catalog::parsing::parse_approach_time;
///
/// let neos = vec![NearEarthObject::new(
///     "433",
///     Some("Eros".to_string()),
///     Some(16.84),
///     false,
/// )];
/// let approaches = vec![CloseApproach::new(
///     "433",
///     parse_approach_time("2020-Jan-01 00:00").unwrap(),
///     0.15,
///     5.0,
/// )];
///
/// let db = NeoDatabase::new(neos, approaches);
/// let eros = db.get_neo_by_name("Eros").unwrap();
/// assert_eq!(eros.approaches.len(), 1);
///
/// let filters = create_filters(&QueryOptions {
///     distance_max: Some(0.2),
///     ..QueryOptions::default()
/// });
/// assert_eq!(db.query(&filters).count(), 1);
/// ```
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    designation_index: HashMap<String, usize>,
    name_index: HashMap<String, usize>,
}

impl NeoDatabase {
    /// Builds the database from loaded records, constructing the lookup
    /// indices and linking each approach to its NEO.
    ///
    /// Approaches whose designation matches no NEO are kept but stay
    /// unlinked; they participate in queries until a NEO-dependent filter
    /// touches them. Should two NEOs share a designation or name, the later
    /// record wins the index slot and receives the links, matching the
    /// source dataset's observable behavior.
    pub fn new(mut neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Self {
        let mut designation_index = HashMap::with_capacity(neos.len());
        let mut name_index = HashMap::new();
        for (neo_idx, neo) in neos.iter().enumerate() {
            designation_index.insert(neo.designation.clone(), neo_idx);
            if let Some(name) = &neo.name {
                name_index.insert(name.clone(), neo_idx);
            }
        }

        for (approach_idx, approach) in approaches.iter_mut().enumerate() {
            if let Some(&neo_idx) = designation_index.get(&approach.designation) {
                approach.neo = Some(neo_idx);
                neos[neo_idx].approaches.push(approach_idx);
            }
        }

        Self {
            neos,
            approaches,
            designation_index,
            name_index,
        }
    }

    /// Looks up an NEO by primary designation. O(1) expected time.
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.designation_index
            .get(designation)
            .map(|&idx| &self.neos[idx])
    }

    /// Looks up an NEO by IAU name. O(1) expected time.
    ///
    /// Unnamed NEOs are never indexed, so the empty string matches nothing.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.name_index.get(name).map(|&idx| &self.neos[idx])
    }

    /// All NEOs, in load order.
    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    /// All close approaches, in load order.
    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// Resolves an approach's NEO link against this database's arena.
    pub fn neo_for(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo.map(|idx| &self.neos[idx])
    }

    /// Resolves a NEO's linked approaches, in link (dataset) order.
    pub fn approaches_of<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = &'a CloseApproach> {
        neo.approaches.iter().map(|&idx| &self.approaches[idx])
    }

    /// Queries close approaches matching every filter in `filters`.
    ///
    /// The returned iterator is lazy: approaches are tested one at a time,
    /// in load order, so composing with [`crate::filters::limit`] never
    /// touches more of the dataset than the cap requires. Filters evaluate
    /// in slice order and short-circuit on the first miss; an empty slice
    /// matches everything.
    ///
    /// Each yielded item is `Ok` with the match, or `Err` if a
    /// NEO-dependent filter hit an unlinked approach
    /// ([`NeoError::MissingLinkage`]); after an error the iterator is
    /// exhausted.
    pub fn query<'a>(&'a self, filters: &'a [Filter]) -> Query<'a> {
        Query {
            db: self,
            filters,
            next: 0,
            failed: false,
        }
    }
}

impl fmt::Debug for NeoDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeoDatabase")
            .field("neos", &self.neos.len())
            .field("approaches", &self.approaches.len())
            .finish()
    }
}

/// A close approach paired with its resolved NEO link.
///
/// This is the unit the writers consume: it carries the approach's own
/// fields plus, for linked approaches, the NEO attributes the export formats
/// include.
#[derive(Debug, Clone, Copy)]
pub struct QueryMatch<'a> {
    /// The matching close approach.
    pub approach: &'a CloseApproach,
    /// The linked NEO, or `None` for orphaned approaches.
    pub neo: Option<&'a NearEarthObject>,
}

impl fmt::Display for QueryMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fullname = match self.neo {
            Some(neo) => neo.fullname(),
            None => self.approach.designation.clone(),
        };
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s",
            self.approach.time_str(),
            fullname,
            self.approach.distance,
            self.approach.velocity
        )
    }
}

/// Lazy iterator over filtered close approaches. Created by
/// [`NeoDatabase::query`].
pub struct Query<'a> {
    db: &'a NeoDatabase,
    filters: &'a [Filter],
    next: usize,
    failed: bool,
}

impl<'a> Iterator for Query<'a> {
    type Item = Result<QueryMatch<'a>, NeoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while self.next < self.db.approaches.len() {
            let approach = &self.db.approaches[self.next];
            self.next += 1;
            let neo = self.db.neo_for(approach);

            match Self::matches_all(self.filters, approach, neo) {
                Ok(true) => return Some(Ok(QueryMatch { approach, neo })),
                Ok(false) => continue,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl Query<'_> {
    fn matches_all(
        filters: &[Filter],
        approach: &CloseApproach,
        neo: Option<&NearEarthObject>,
    ) -> Result<bool, NeoError> {
        for filter in filters {
            if !filter.matches(approach, neo)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
