//! This module defines the core data structures and types used across the
//! catalog indexer. It re-exports the document types for each search index
//! and the enums describing the relational catalog.

pub mod catalog;
pub mod genre;
pub mod movie;
pub mod person;

pub use catalog::{CatalogDocument, ChangeWindow, DocumentKind, EntityKind, Role};
pub use genre::{FilmRef, GenreDocument};
pub use movie::{GenreRef, MovieDocument, PersonRef};
pub use person::{PersonDocument, PersonFilm};
