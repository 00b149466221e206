//! Strata Core Library
//!
//! Strategic analysis models (SWOT, IFE/EFE, KSF, CPM), scoring, and the
//! local, remote and file persistence contracts.

pub mod analysis;
pub mod config;
pub mod error;
pub mod exchange;
pub mod persistence;
pub mod scoring;
pub mod session;

pub use analysis::model::StrategicData;
pub use error::{StrataError, StrataResult};
