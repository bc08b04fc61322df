//! Repositories backing the engine's lookup traits.

pub mod catalog;
pub mod fixture;

pub use catalog::PgCatalogRepository;
pub use fixture::MongoBomRepository;
