//! Core type definitions used across the SchoolHub workspace.

pub mod document;
pub mod path;
pub mod timestamp;

pub use document::{Document, Fields, encode_fields};
pub use path::DocumentPath;
pub use timestamp::{is_server_timestamp, resolve_server_timestamps, server_timestamp};
