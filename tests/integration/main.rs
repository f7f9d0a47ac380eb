//! HTTP-level integration tests driving the router against the memory store.

mod helpers;

mod auth_test;
mod classes_test;
mod profile_test;
mod timetable_test;
