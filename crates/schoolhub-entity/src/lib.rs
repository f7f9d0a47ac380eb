//! # schoolhub-entity
//!
//! Domain entity models for SchoolHub. Every struct in this crate
//! represents a stored document or a value derived from one. Documents are
//! addressed by the collection constants each module exports.

pub mod enrollment;
pub mod role_config;
pub mod session;
pub mod timetable;
pub mod user;
