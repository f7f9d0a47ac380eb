//! HTTP request handlers.

pub mod auth;
pub mod classes;
pub mod health;
pub mod role_config;
pub mod timetable;
pub mod user;
