//! # schoolhub-database
//!
//! Document store providers (in-memory and PostgreSQL) and the
//! repositories built on top of them.

pub mod connection;
pub mod manager;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;

pub use connection::DatabasePool;
pub use manager::StoreManager;
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
