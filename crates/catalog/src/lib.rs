//! Souk catalog layer.
//!
//! This crate defines the read-only entity snapshots the search engine ranks
//! (vendors, items, taxonomic categories), the weighted searchable corpus
//! attached to each entity, and the seams the engine talks through:
//!
//! - [`CatalogProvider`] — fetches entity snapshots per request. Persistence
//!   of entity records belongs to an external catalog service; this crate
//!   only models what a snapshot looks like and how to ask for one.
//! - [`Clock`] — the single wall-clock dependence in the whole engine.
//!   Availability (vendor opening hours) is evaluated against an injected
//!   clock so everything else stays a pure function of its inputs.
//!
//! Entities are immutable once fetched. A snapshot fetched for one request
//! is discarded when the request completes; nothing in this crate caches.

mod clock;
mod entity;
mod error;
mod geo;
mod provider;

pub use crate::clock::{Clock, FixedClock, OpeningHours, SystemClock};
pub use crate::entity::{
    Category, CorpusField, EntityId, EntityKind, FieldRole, Item, SearchableEntity, Vendor,
};
pub use crate::error::CatalogError;
pub use crate::geo::{distance_km, GeoPoint, EARTH_RADIUS_KM};
pub use crate::provider::{CatalogProvider, FetchHints, InMemoryCatalog};
