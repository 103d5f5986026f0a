//! # Catalog Indexer Shared
//!
//! This crate defines shared data structures and types used across the catalog
//! indexer ecosystem: the search documents produced by the sync pipeline, the
//! entity/document kind enums that drive it, and the backoff retry policy
//! applied around fallible external calls.

pub mod retry;
pub mod types;

pub use retry::{Backoff, RetryClass};
pub use types::{
    CatalogDocument, ChangeWindow, DocumentKind, EntityKind, FilmRef, GenreDocument, GenreRef,
    MovieDocument, PersonDocument, PersonFilm, PersonRef, Role,
};
