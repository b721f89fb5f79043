//! Infrastructure layer - in-memory adapters for the domain ports

pub mod dataset_tree;
pub mod metadata_cache;

pub use dataset_tree::DatasetTree;
pub use metadata_cache::MetadataCacheBuilder;
