//! In-memory index and query engine for near-Earth objects (NEOs) and their
//! close approaches to Earth.
//!
//! Two collections are loaded once (NEOs from CSV, close approaches from JSON),
//! linked by designation, and then queried read-only: point lookups by
//! designation or name, and lazy filtered scans over every close approach.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`model`] | [`NearEarthObject`], [`CloseApproach`], and the [`LinkedApproach`] view |
//! | [`database`] | [`NeoDatabase`]: linking, lookups, and [`query`](NeoDatabase::query) |
//! | [`filters`] | [`Predicate`](filters::Predicate), attribute filters, [`Criteria`](filters::Criteria) |
//! | [`extract`] | CSV / JSON loaders |
//! | [`write`] | CSV / JSON reports |
//! | [`config`] | [`DataConfig`] for one-call loading |
//!
//! # Quick Start
//!
//! ```ignore
//! use celestial_neo::filters::{limit, Criteria};
//! use celestial_neo::DataConfig;
//!
//! let db = DataConfig::default().load()?;
//!
//! let filters = Criteria {
//!     distance_max: Some(0.01),
//!     hazardous: Some(true),
//!     ..Default::default()
//! }
//! .into_filters();
//!
//! for approach in limit(db.query(&filters), Some(10)) {
//!     println!("{}", approach);
//! }
//! ```
//!
//! # Features
//!
//! - **`cli`**: enables the `neo` binary with `inspect` and `query` subcommands.

pub mod config;
pub mod database;
pub mod errors;
pub mod extract;
pub mod filters;
pub mod model;
pub mod write;

pub use config::DataConfig;
pub use database::{DatabaseBuilder, LinkPolicy, NeoDatabase};
pub use errors::{NeoError, NeoResult};
pub use model::{ApproachId, CloseApproach, LinkedApproach, NearEarthObject, NeoId};
