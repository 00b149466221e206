//! Strategic analysis domain models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Mint a fresh entity id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A weighted factor in an IFE or EFE matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    1
}

impl Factor {
    /// Blank factor: no description, zero weight, lowest rating.
    pub fn new() -> Self {
        Self {
            id: new_id(),
            description: String::new(),
            weight: 0.0,
            rating: 1,
        }
    }
}

impl Default for Factor {
    fn default() -> Self {
        Self::new()
    }
}

/// A free-text entry in one of the four SWOT buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwotItem {
    pub id: String,
    #[serde(default)]
    pub description: String,
}

impl SwotItem {
    pub fn new() -> Self {
        Self {
            id: new_id(),
            description: String::new(),
        }
    }
}

impl Default for SwotItem {
    fn default() -> Self {
        Self::new()
    }
}

/// A key success factor.
///
/// Older documents carry no `weight`/`performance`; both default to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KsfItem {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub measure: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub performance: f64,
}

impl KsfItem {
    pub fn new() -> Self {
        Self {
            id: new_id(),
            description: String::new(),
            target: String::new(),
            measure: String::new(),
            weight: 0.0,
            performance: 0.0,
        }
    }
}

impl Default for KsfItem {
    fn default() -> Self {
        Self::new()
    }
}

/// A company rated against the shared set of KSFs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// KSF id -> rating in `[0, 4]`. Entries for removed KSFs are kept.
    #[serde(default)]
    pub ratings: BTreeMap<String, f64>,
}

impl Competitor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            ratings: BTreeMap::new(),
        }
    }
}

/// The four SWOT buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwotData {
    #[serde(default)]
    pub strengths: Vec<SwotItem>,
    #[serde(default)]
    pub weaknesses: Vec<SwotItem>,
    #[serde(default)]
    pub opportunities: Vec<SwotItem>,
    #[serde(default)]
    pub threats: Vec<SwotItem>,
}

impl SwotData {
    pub fn bucket(&self, bucket: SwotBucket) -> &Vec<SwotItem> {
        match bucket {
            SwotBucket::Strengths => &self.strengths,
            SwotBucket::Weaknesses => &self.weaknesses,
            SwotBucket::Opportunities => &self.opportunities,
            SwotBucket::Threats => &self.threats,
        }
    }

    pub fn bucket_mut(&mut self, bucket: SwotBucket) -> &mut Vec<SwotItem> {
        match bucket {
            SwotBucket::Strengths => &mut self.strengths,
            SwotBucket::Weaknesses => &mut self.weaknesses,
            SwotBucket::Opportunities => &mut self.opportunities,
            SwotBucket::Threats => &mut self.threats,
        }
    }
}

/// IFE and EFE factor matrices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Matrices {
    #[serde(default)]
    pub ife: Vec<Factor>,
    #[serde(default)]
    pub efe: Vec<Factor>,
}

impl Matrices {
    pub fn matrix(&self, kind: MatrixKind) -> &Vec<Factor> {
        match kind {
            MatrixKind::Ife => &self.ife,
            MatrixKind::Efe => &self.efe,
        }
    }

    pub fn matrix_mut(&mut self, kind: MatrixKind) -> &mut Vec<Factor> {
        match kind {
            MatrixKind::Ife => &mut self.ife,
            MatrixKind::Efe => &mut self.efe,
        }
    }
}

/// The aggregate root: unit of export/import and full-state load/save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategicData {
    #[serde(default)]
    pub swot: SwotData,
    #[serde(default)]
    pub matrices: Matrices,
    #[serde(default)]
    pub ksf: Vec<KsfItem>,
    #[serde(default)]
    pub competitors: Vec<Competitor>,
}

/// Default competitor rows of a fresh analysis as `(id, name)`. The ids are
/// fixed so an unsaved seed is addressable the same way on every run.
pub const SEED_COMPETITORS: &[(&str, &str)] = &[
    ("1", "Our Company"),
    ("2", "Competitor 1"),
    ("3", "Competitor 2"),
];

impl StrategicData {
    /// Fresh analysis with the default competitor rows.
    pub fn seeded() -> Self {
        Self {
            competitors: SEED_COMPETITORS
                .iter()
                .map(|&(id, name)| Competitor {
                    id: id.to_string(),
                    ..Competitor::new(name)
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Parse a JSON analysis document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize as a pretty-printed (2-space) JSON document.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Which factor matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixKind {
    Ife,
    Efe,
}

impl MatrixKind {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ife" | "internal" => Some(Self::Ife),
            "efe" | "external" => Some(Self::Efe),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ife => "ife",
            Self::Efe => "efe",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Ife => "Internal Factors",
            Self::Efe => "External Factors",
        }
    }
}

/// Which SWOT bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwotBucket {
    Strengths,
    Weaknesses,
    Opportunities,
    Threats,
}

impl SwotBucket {
    /// Fixed display order.
    pub const ALL: [SwotBucket; 4] = [
        Self::Strengths,
        Self::Weaknesses,
        Self::Opportunities,
        Self::Threats,
    ];

    /// Parse from string; accepts singular forms and initials.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strengths" | "strength" | "s" => Some(Self::Strengths),
            "weaknesses" | "weakness" | "w" => Some(Self::Weaknesses),
            "opportunities" | "opportunity" | "o" => Some(Self::Opportunities),
            "threats" | "threat" | "t" => Some(Self::Threats),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strengths => "strengths",
            Self::Weaknesses => "weaknesses",
            Self::Opportunities => "opportunities",
            Self::Threats => "threats",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strengths => "Strengths",
            Self::Weaknesses => "Weaknesses",
            Self::Opportunities => "Opportunities",
            Self::Threats => "Threats",
        }
    }
}

/// Partial update for a factor. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct FactorUpdate {
    pub description: Option<String>,
    pub weight: Option<f64>,
    pub rating: Option<f64>,
}

/// Partial update for a KSF item. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct KsfUpdate {
    pub description: Option<String>,
    pub target: Option<String>,
    pub measure: Option<String>,
    pub weight: Option<f64>,
    pub performance: Option<f64>,
}
