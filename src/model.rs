//! Record types for NEOs and their close approaches.
//!
//! [`NearEarthObject`] and [`CloseApproach`] are plain data holders produced
//! by the loaders in [`crate::extract`] (or constructed directly) and handed
//! to [`NeoDatabase`](crate::database::NeoDatabase), which links the two
//! sides together. The link is stored as arena indices rather than owned
//! references: an approach holds the index of its NEO, and a NEO holds the
//! indices of its approaches, both resolved through the database that owns
//! the arenas. Neither side is meaningful without the database that built it.

use std::fmt;

use chrono::NaiveDateTime;

use crate::parsing::format_approach_time;

/// A near-Earth object: an asteroid or comet with close-Earth approach
/// potential.
///
/// The primary designation is the unique catalog key and never changes after
/// construction. The IAU name is optional; most NEOs have none. An unknown
/// diameter is stored as `f64::NAN` rather than an `Option` so that filter
/// comparisons degrade to "no match" without special casing.
#[derive(Debug, Clone)]
pub struct NearEarthObject {
    /// Primary designation, e.g. `433` or `2020 AB`. Unique, non-empty.
    pub designation: String,
    /// IAU name, e.g. `Eros`. `None` when the object is unnamed.
    pub name: Option<String>,
    /// Diameter in kilometers. `NAN` when no measurement exists.
    pub diameter: f64,
    /// Whether the object is classified as potentially hazardous.
    pub hazardous: bool,
    /// Indices of this NEO's close approaches in the owning database's
    /// approach arena, in dataset order. Populated during linking; empty
    /// until then.
    pub approaches: Vec<usize>,
}

impl NearEarthObject {
    /// Creates a NEO record.
    ///
    /// An empty `name` normalizes to `None`, and an absent `diameter`
    /// becomes the `NAN` sentinel, so downstream code never distinguishes
    /// "empty" from "missing".
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: Option<f64>,
        hazardous: bool,
    ) -> Self {
        Self {
            designation: designation.into(),
            name: name.filter(|n| !n.is_empty()),
            diameter: diameter.unwrap_or(f64::NAN),
            hazardous,
            approaches: Vec::new(),
        }
    }

    /// Full designation-plus-name form, e.g. `433 (Eros)`, or the bare
    /// designation for unnamed objects.
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
        if self.diameter.is_nan() {
            write!(
                f,
                "NEO {} has an unknown diameter and {} potentially hazardous",
                self.fullname(),
                hazard
            )
        } else {
            write!(
                f,
                "NEO {} has a diameter of {:.3} km and {} potentially hazardous",
                self.fullname(),
                self.diameter,
                hazard
            )
        }
    }
}

/// A single recorded close approach of an NEO to Earth.
///
/// The `designation` is a foreign key into the NEO side of the catalog; it
/// may reference an object the dataset never defined, in which case the
/// approach stays unlinked ("orphaned") and NEO-dependent filters refuse to
/// evaluate against it.
#[derive(Debug, Clone)]
pub struct CloseApproach {
    /// Primary designation of the approaching NEO.
    pub designation: String,
    /// Approach time in UTC, minute precision.
    pub time: NaiveDateTime,
    /// Nominal approach distance in astronomical units.
    pub distance: f64,
    /// Relative approach velocity in kilometers per second.
    pub velocity: f64,
    /// Index of the linked NEO in the owning database's NEO arena. Set once
    /// during linking; `None` for orphaned approaches.
    pub neo: Option<usize>,
}

impl CloseApproach {
    /// Creates an approach record. The NEO link starts unset.
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

    /// Approach time rendered as `YYYY-MM-DD HH:MM`.
    pub fn time_str(&self) -> String {
        format_approach_time(&self.time)
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s",
            self.time_str(),
            self.designation,
            self.distance,
            self.velocity
        )
    }
}
