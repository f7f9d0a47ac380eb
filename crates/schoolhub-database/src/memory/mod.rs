//! In-memory document store.

pub mod seed;
pub mod store;

pub use store::MemoryDocumentStore;
