//! Filter predicates for close-approach queries.
//!
//! A query is a conjunction of [`Filter`]s, each pairing a [`Comparator`]
//! with a reference value for one filterable attribute: approach date,
//! distance, velocity, or the linked NEO's diameter or hazard flag.
//! [`create_filters`] builds the conjunction from a flat [`QueryOptions`]
//! parameter set, and [`limit`] caps a result stream without consuming past
//! the cap.
//!
//! Every numeric threshold in [`QueryOptions`] is an `Option`: `Some(0.0)`
//! is a real threshold, not "unset". The result cap follows the opposite,
//! historical convention — see [`limit`].

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::errors::{NeoError, NeoResult};
use crate::model::{CloseApproach, NearEarthObject};

/// Binary comparison applied between an extracted attribute and a filter's
/// reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Attribute equals the reference value.
    Eq,
    /// Attribute is less than or equal to the reference value.
    Le,
    /// Attribute is greater than or equal to the reference value.
    Ge,
}

impl Comparator {
    fn admits(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Le => ordering != Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }

    /// Applies the comparison to any partially ordered pair.
    ///
    /// An incomparable pair (either side NaN) satisfies no comparator kind,
    /// so filters over an unknown diameter evaluate to `false` rather than
    /// erroring.
    pub fn compare<T: PartialOrd>(self, lhs: &T, rhs: &T) -> bool {
        lhs.partial_cmp(rhs)
            .is_some_and(|ordering| self.admits(ordering))
    }
}

/// A single predicate over one attribute of a close approach.
///
/// Each variant fixes the attribute-extraction rule; the comparator and
/// reference value travel with it. `Date` compares only the calendar-date
/// component of the approach time, ignoring time-of-day. `Diameter` and
/// `Hazardous` read the linked NEO and fail with
/// [`NeoError::MissingLinkage`] when the approach is orphaned.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Calendar date of the approach.
    Date(Comparator, NaiveDate),
    /// Approach distance in astronomical units.
    Distance(Comparator, f64),
    /// Approach velocity in kilometers per second.
    Velocity(Comparator, f64),
    /// Linked NEO's diameter in kilometers.
    Diameter(Comparator, f64),
    /// Linked NEO's hazard classification.
    Hazardous(Comparator, bool),
}

impl Filter {
    /// Evaluates the predicate against one approach and its resolved NEO
    /// link.
    ///
    /// # Errors
    /// Returns [`NeoError::MissingLinkage`] if the variant needs the NEO and
    /// `neo` is `None`. Masking that condition as `Ok(false)` would corrupt
    /// query semantics, so it always surfaces.
    pub fn matches(
        &self,
        approach: &CloseApproach,
        neo: Option<&NearEarthObject>,
    ) -> NeoResult<bool> {
        match self {
            Self::Date(cmp, value) => Ok(cmp.compare(&approach.time.date(), value)),
            Self::Distance(cmp, value) => Ok(cmp.compare(&approach.distance, value)),
            Self::Velocity(cmp, value) => Ok(cmp.compare(&approach.velocity, value)),
            Self::Diameter(cmp, value) => {
                let neo = Self::linked(approach, neo)?;
                Ok(cmp.compare(&neo.diameter, value))
            }
            Self::Hazardous(cmp, value) => {
                let neo = Self::linked(approach, neo)?;
                Ok(cmp.compare(&neo.hazardous, value))
            }
        }
    }

    fn linked<'a>(
        approach: &CloseApproach,
        neo: Option<&'a NearEarthObject>,
    ) -> NeoResult<&'a NearEarthObject> {
        neo.ok_or_else(|| NeoError::missing_linkage(&approach.designation))
    }
}

/// Flat optional-parameter set describing a query, one field per filterable
/// criterion.
///
/// `date` may be combined with `start_date`/`end_date`; the factory does not
/// enforce mutual exclusivity. Thresholds of zero are honored.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Match approaches occurring on exactly this date.
    pub date: Option<NaiveDate>,
    /// Match approaches on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Match approaches on or before this date.
    pub end_date: Option<NaiveDate>,
    /// Minimum approach distance, in astronomical units.
    pub distance_min: Option<f64>,
    /// Maximum approach distance, in astronomical units.
    pub distance_max: Option<f64>,
    /// Minimum approach velocity, in kilometers per second.
    pub velocity_min: Option<f64>,
    /// Maximum approach velocity, in kilometers per second.
    pub velocity_max: Option<f64>,
    /// Minimum NEO diameter, in kilometers.
    pub diameter_min: Option<f64>,
    /// Maximum NEO diameter, in kilometers.
    pub diameter_max: Option<f64>,
    /// Match only hazardous (`true`) or non-hazardous (`false`) NEOs.
    pub hazardous: Option<bool>,
}

/// Builds the ordered filter conjunction for a parameter set.
///
/// Each supplied parameter contributes exactly one filter: `Eq` for the
/// exact date and the hazard flag, `Ge` for every minimum/start bound, `Le`
/// for every maximum/end bound. Unset parameters contribute nothing, so the
/// empty options produce the match-everything query.
pub fn create_filters(options: &QueryOptions) -> Vec<Filter> {
    let mut filters = Vec::new();

    if let Some(date) = options.date {
        filters.push(Filter::Date(Comparator::Eq, date));
    }
    if let Some(start) = options.start_date {
        filters.push(Filter::Date(Comparator::Ge, start));
    }
    if let Some(end) = options.end_date {
        filters.push(Filter::Date(Comparator::Le, end));
    }
    if let Some(min) = options.distance_min {
        filters.push(Filter::Distance(Comparator::Ge, min));
    }
    if let Some(max) = options.distance_max {
        filters.push(Filter::Distance(Comparator::Le, max));
    }
    if let Some(min) = options.velocity_min {
        filters.push(Filter::Velocity(Comparator::Ge, min));
    }
    if let Some(max) = options.velocity_max {
        filters.push(Filter::Velocity(Comparator::Le, max));
    }
    if let Some(min) = options.diameter_min {
        filters.push(Filter::Diameter(Comparator::Ge, min));
    }
    if let Some(max) = options.diameter_max {
        filters.push(Filter::Diameter(Comparator::Le, max));
    }
    if let Some(hazardous) = options.hazardous {
        filters.push(Filter::Hazardous(Comparator::Eq, hazardous));
    }

    filters
}

/// Caps a result stream at `cap` items without consuming past the cap.
///
/// `None` means unlimited. So does `Some(0)`: the cap keeps the dataset's
/// historical zero-means-unlimited convention, which deliberately differs
/// from the [`QueryOptions`] thresholds, where a supplied zero is a real
/// bound. An unlimited cap still returns a lazy iterator over the whole
/// input.
pub fn limit<I: Iterator>(iter: I, cap: Option<usize>) -> std::iter::Take<I> {
    let n = match cap {
        Some(n) if n > 0 => n,
        _ => usize::MAX,
    };
    iter.take(n)
}
