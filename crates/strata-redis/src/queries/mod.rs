//! Query modules for Strata records stored in Redis.

pub mod strategic_data;
