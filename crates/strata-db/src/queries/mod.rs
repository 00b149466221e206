//! Database query implementations.

pub mod kv;
