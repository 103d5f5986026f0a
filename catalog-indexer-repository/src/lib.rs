//! # Catalog Indexer Repository
//!
//! This crate provides traits and implementations for reading the relational
//! media catalog and for persisting the sync checkpoint. It includes
//! definitions for errors, interfaces, a concrete PostgreSQL implementation
//! of the catalog read-side, and a JSON-file implementation of the
//! checkpoint store.

pub mod checkpoint;
pub mod errors;
pub mod interfaces;
pub mod postgres;
pub mod relations;
pub mod types;

pub use checkpoint::{
    decode_timestamp, encode_timestamp, CheckpointRecord, FileCheckpointStore, LAST_UPDATE_KEY,
};
pub use errors::{CatalogRepositoryError, CheckpointStoreError};
pub use interfaces::{CatalogRepository, CheckpointStore};
pub use postgres::PostgresCatalogRepository;
pub use relations::{
    JoinRelation, FILMWORK_TO_GENRE, FILMWORK_TO_PERSON, GENRE_TO_FILMWORK, PERSON_TO_FILMWORK,
};
pub use types::{GenreRecord, Json, MovieRecord, PersonRoleRow};
