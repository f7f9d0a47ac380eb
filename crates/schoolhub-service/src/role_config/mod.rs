//! Role configuration lookup.

pub mod service;

pub use service::RoleConfigService;
