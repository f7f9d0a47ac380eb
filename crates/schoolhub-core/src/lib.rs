//! # schoolhub-core
//!
//! Core crate for SchoolHub. Contains configuration schemas, the unified
//! error system, and the document storage contract consumed by every
//! other crate.
//!
//! This crate has **no** internal dependencies on other SchoolHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
