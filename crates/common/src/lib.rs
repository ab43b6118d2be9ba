//! # CampusHub Common
//!
//! Reusable utilities shared across the CampusHub client SDK:
//! - A bounded response cache with TTL expiry and LRU eviction
//! - A `Clock` abstraction so time-dependent code is deterministic in tests
//! - Tracing initialization

pub mod cache;
pub mod observability;
pub mod time;

pub use cache::{Cache, CacheConfig};
pub use observability::init_tracing;
pub use time::{Clock, MockClock, SystemClock};
