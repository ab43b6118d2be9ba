//! Domain endpoint façade
//!
//! One thin method per backend endpoint, grouped by domain. Every
//! method follows the same shape: build a path (plus query or body),
//! issue exactly one call through the request pipeline, and decode the
//! response envelope. Failures are normalized by the pipeline; no
//! method fabricates data on failure.
//!
//! List endpoints take filter structs of optional fields; absent or
//! empty values are omitted from the query string.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod courses;
pub mod finance;
pub mod jobs;
pub mod notifications;
pub mod parent;
pub mod results;
pub mod schedule;
pub mod services;
pub mod staff;
pub mod student;
pub mod teacher;
