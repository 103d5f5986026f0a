//! This module defines and re-exports the interfaces for the catalog
//! read-side and the checkpoint store. It serves as a central point for
//! accessing traits related to data interaction.

mod catalog;
mod checkpoint;

pub use catalog::CatalogRepository;
pub use checkpoint::CheckpointStore;
