//! Local key-value persistence: one key per sub-collection.

use crate::analysis::model::{Competitor, Factor, KsfItem, StrategicData, SwotItem};
use crate::error::StrataResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use strata_db::queries::kv;
use strata_db::DbPool;
use tracing::{debug, warn};

pub const IFE_FACTORS_KEY: &str = "ifeFactors";
pub const EFE_FACTORS_KEY: &str = "efeFactors";
pub const STRENGTHS_KEY: &str = "strengths";
pub const WEAKNESSES_KEY: &str = "weaknesses";
pub const OPPORTUNITIES_KEY: &str = "opportunities";
pub const THREATS_KEY: &str = "threats";
pub const KSF_ITEMS_KEY: &str = "ksfItems";
pub const COMPETITORS_KEY: &str = "competitors";

/// Everything `load_local` could recover.
///
/// Absent or unreadable keys come back empty. `competitors` is `None` when
/// the key is absent so callers can keep their own default rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalSnapshot {
    pub ife: Vec<Factor>,
    pub efe: Vec<Factor>,
    pub strengths: Vec<SwotItem>,
    pub weaknesses: Vec<SwotItem>,
    pub opportunities: Vec<SwotItem>,
    pub threats: Vec<SwotItem>,
    pub ksf: Vec<KsfItem>,
    pub competitors: Option<Vec<Competitor>>,
}

impl LocalSnapshot {
    /// Merge into `data`: every collection is replaced wholesale, except
    /// competitors when none were stored.
    pub fn merge_into(self, data: &mut StrategicData) {
        data.matrices.ife = self.ife;
        data.matrices.efe = self.efe;
        data.swot.strengths = self.strengths;
        data.swot.weaknesses = self.weaknesses;
        data.swot.opportunities = self.opportunities;
        data.swot.threats = self.threats;
        data.ksf = self.ksf;
        if let Some(competitors) = self.competitors {
            data.competitors = competitors;
        }
    }
}

fn encode<T: Serialize>(key: &'static str, value: &T) -> StrataResult<(&'static str, String)> {
    Ok((key, serde_json::to_string(value)?))
}

/// Write every sub-collection under its own key.
pub fn save_local(pool: &DbPool, data: &StrategicData) -> StrataResult<()> {
    let entries = [
        encode(IFE_FACTORS_KEY, &data.matrices.ife)?,
        encode(EFE_FACTORS_KEY, &data.matrices.efe)?,
        encode(STRENGTHS_KEY, &data.swot.strengths)?,
        encode(WEAKNESSES_KEY, &data.swot.weaknesses)?,
        encode(OPPORTUNITIES_KEY, &data.swot.opportunities)?,
        encode(THREATS_KEY, &data.swot.threats)?,
        encode(KSF_ITEMS_KEY, &data.ksf)?,
        encode(COMPETITORS_KEY, &data.competitors)?,
    ];
    kv::set_values(pool, &entries)?;
    debug!(keys = entries.len(), "Saved analysis to local store");
    Ok(())
}

/// Read one collection. Absent, unreadable and malformed values all yield `None`.
fn read_collection<T: DeserializeOwned>(pool: &DbPool, key: &str) -> Option<Vec<T>> {
    let raw = match kv::get_value(pool, key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read local key");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding malformed local value");
            None
        }
    }
}

/// Load every sub-collection. Never fails.
pub fn load_local(pool: &DbPool) -> LocalSnapshot {
    LocalSnapshot {
        ife: read_collection(pool, IFE_FACTORS_KEY).unwrap_or_default(),
        efe: read_collection(pool, EFE_FACTORS_KEY).unwrap_or_default(),
        strengths: read_collection(pool, STRENGTHS_KEY).unwrap_or_default(),
        weaknesses: read_collection(pool, WEAKNESSES_KEY).unwrap_or_default(),
        opportunities: read_collection(pool, OPPORTUNITIES_KEY).unwrap_or_default(),
        threats: read_collection(pool, THREATS_KEY).unwrap_or_default(),
        ksf: read_collection(pool, KSF_ITEMS_KEY).unwrap_or_default(),
        competitors: read_collection(pool, COMPETITORS_KEY),
    }
}
