//! In-memory stores

mod catalog_store;

pub use catalog_store::Catalog;
