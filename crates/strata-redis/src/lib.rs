//! Strata Redis Data Layer
//!
//! Async Redis-backed remote store for the shared strategic analysis record.

pub mod client;
pub mod queries;

pub use client::{RedisError, RedisPool, RedisResult, init_pool};
pub use queries::strategic_data;
