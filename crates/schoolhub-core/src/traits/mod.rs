//! Core traits defined in `schoolhub-core` and implemented by other crates.

pub mod document_store;

pub use document_store::{DocumentStore, FieldMatch, GuardedWrites, WriteOp};
