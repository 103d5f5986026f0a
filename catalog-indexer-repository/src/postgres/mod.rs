//! PostgreSQL implementation of the catalog read-side.

mod catalog_repository;

pub use catalog_repository::PostgresCatalogRepository;
