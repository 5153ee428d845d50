//! In-memory catalog of near-Earth objects and their close approaches.
//!
//! Loads the NASA NEO and close-approach datasets, links every approach to
//! its NEO at construction time, and answers ad-hoc queries by composing
//! filter predicates over date, distance, velocity, diameter, and hazard
//! status. Matching approaches stream lazily, cap cleanly, and export to
//! CSV or JSON.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`model`] | [`NearEarthObject`], [`CloseApproach`] record types |
//! | [`database`] | [`NeoDatabase`] construction, lookups, lazy [`query`](NeoDatabase::query) |
//! | [`filters`] | [`Filter`] predicates, [`QueryOptions`], [`create_filters`], [`limit`] |
//! | [`extract`] | `neos.csv` / `cad.json` loaders |
//! | [`write`] | CSV / JSON exporters |
//! | [`parsing`] | approach-timestamp parse/format helpers |
//! | [`errors`] | [`NeoError`], [`NeoResult`] |
//!
//! # Quick Start
//!
//! ```ignore
//! use neo_catalog::{create_filters, limit, NeoDatabase, QueryOptions};
//!
//! let db = NeoDatabase::new(
//!     neo_catalog::extract::load_neos("data/neos.csv")?,
//!     neo_catalog::extract::load_approaches("data/cad.json")?,
//! );
//!
//! let filters = create_filters(&QueryOptions {
//!     hazardous: Some(true),
//!     distance_max: Some(0.1),
//!     ..QueryOptions::default()
//! });
//! for result in limit(db.query(&filters), Some(10)) {
//!     println!("{}", result?);
//! }
//! ```
//!
//! # Features
//!
//! - **`cli`** — Enables the `neoq` binary for inspecting and querying the
//!   catalog from the command line.

pub mod database;
pub mod errors;
pub mod extract;
pub mod filters;
pub mod model;
pub mod parsing;
pub mod write;

pub use database::{NeoDatabase, Query, QueryMatch};
pub use errors::{NeoError, NeoResult};
pub use filters::{create_filters, limit, Comparator, Filter, QueryOptions};
pub use model::{CloseApproach, NearEarthObject};
