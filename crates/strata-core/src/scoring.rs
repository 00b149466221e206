//! Scoring and chart series.
//!
//! Pure functions over the analysis entities. Values are plain `f64` with no
//! rounding; display code decides how many decimals to show.

use crate::analysis::model::{Competitor, Factor, KsfItem, StrategicData, SwotBucket, SwotItem};
use serde::{Deserialize, Serialize};

/// Label used for factors without a description.
pub const UNNAMED_FACTOR: &str = "Unnamed Factor";
/// Label used for KSFs without a description.
pub const UNNAMED_KSF: &str = "Unnamed KSF";

/// Weighted score of a single factor row.
pub fn factor_score(factor: &Factor) -> f64 {
    factor.weight * f64::from(factor.rating)
}

/// Σ weight × rating over a matrix.
pub fn matrix_total(factors: &[Factor]) -> f64 {
    factors.iter().map(factor_score).sum()
}

/// Σ weight over a matrix. Nominally 1.0; never normalized here.
pub fn weight_total(factors: &[Factor]) -> f64 {
    factors.iter().map(|f| f.weight).sum()
}

/// Per-item KSF contribution: weight fraction × performance fraction × 100.
pub fn ksf_item_score(item: &KsfItem) -> f64 {
    (item.weight / 100.0) * (item.performance / 100.0) * 100.0
}

/// Total KSF score.
pub fn ksf_score(items: &[KsfItem]) -> f64 {
    items.iter().map(ksf_item_score).sum()
}

/// Σ weight(ksf) × rating over a competitor's ratings.
///
/// Ratings against KSFs that no longer exist contribute nothing.
pub fn competitor_score(competitor: &Competitor, ksf: &[KsfItem]) -> f64 {
    competitor
        .ratings
        .iter()
        .map(|(ksf_id, rating)| {
            ksf.iter()
                .find(|k| &k.id == ksf_id)
                .map_or(0.0, |k| k.weight * rating)
        })
        .sum()
}

fn label_or(description: &str, placeholder: &str) -> String {
    if description.is_empty() {
        placeholder.to_string()
    } else {
        description.to_string()
    }
}

/// Radar chart series for an IFE/EFE matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub labels: Vec<String>,
    pub weighted_score: Vec<f64>,
    pub weight: Vec<f64>,
    pub rating: Vec<f64>,
}

pub fn radar_series(factors: &[Factor]) -> RadarSeries {
    RadarSeries {
        labels: factors
            .iter()
            .map(|f| label_or(&f.description, UNNAMED_FACTOR))
            .collect(),
        weighted_score: factors.iter().map(factor_score).collect(),
        weight: factors.iter().map(|f| f.weight).collect(),
        rating: factors.iter().map(|f| f64::from(f.rating)).collect(),
    }
}

/// Radar chart series for the KSF list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KsfRadarSeries {
    pub labels: Vec<String>,
    /// Performance at face value (0–100).
    pub achievement: Vec<f64>,
    pub weighted_score: Vec<f64>,
}

pub fn ksf_radar_series(items: &[KsfItem]) -> KsfRadarSeries {
    KsfRadarSeries {
        labels: items
            .iter()
            .map(|k| label_or(&k.description, UNNAMED_KSF))
            .collect(),
        achievement: items.iter().map(|k| k.performance).collect(),
        weighted_score: items.iter().map(ksf_item_score).collect(),
    }
}

/// Bar chart series: item count per SWOT bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwotCounts {
    pub labels: [&'static str; 4],
    pub counts: [usize; 4],
}

pub fn swot_counts(
    strengths: &[SwotItem],
    weaknesses: &[SwotItem],
    opportunities: &[SwotItem],
    threats: &[SwotItem],
) -> SwotCounts {
    SwotCounts {
        labels: SwotBucket::ALL.map(|b| b.label()),
        counts: [
            strengths.len(),
            weaknesses.len(),
            opportunities.len(),
            threats.len(),
        ],
    }
}

/// One competitor's ratings aligned with the KSF labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpmDataset {
    pub competitor_id: String,
    pub name: String,
    pub ratings: Vec<f64>,
}

/// Radar chart series comparing selected competitors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpmSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<CpmDataset>,
}

/// Build the comparison for the competitors whose ids are in `selected`,
/// in competitor order. Missing ratings read as 0.
pub fn cpm_series(competitors: &[Competitor], ksf: &[KsfItem], selected: &[String]) -> CpmSeries {
    let datasets = competitors
        .iter()
        .filter(|c| selected.contains(&c.id))
        .map(|c| CpmDataset {
            competitor_id: c.id.clone(),
            name: c.name.clone(),
            ratings: ksf
                .iter()
                .map(|k| c.ratings.get(&k.id).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    CpmSeries {
        labels: ksf
            .iter()
            .map(|k| label_or(&k.description, UNNAMED_KSF))
            .collect(),
        datasets,
    }
}

/// Score of one competitor in a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorScore {
    pub id: String,
    pub name: String,
    pub score: f64,
}

/// Every derived number of an analysis in one place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub ife_total: f64,
    pub ife_weight_total: f64,
    pub efe_total: f64,
    pub efe_weight_total: f64,
    pub ksf_score: f64,
    pub competitors: Vec<CompetitorScore>,
    pub swot: SwotCounts,
}

impl AnalysisSummary {
    pub fn compute(data: &StrategicData) -> Self {
        Self {
            ife_total: matrix_total(&data.matrices.ife),
            ife_weight_total: weight_total(&data.matrices.ife),
            efe_total: matrix_total(&data.matrices.efe),
            efe_weight_total: weight_total(&data.matrices.efe),
            ksf_score: ksf_score(&data.ksf),
            competitors: data
                .competitors
                .iter()
                .map(|c| CompetitorScore {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    score: competitor_score(c, &data.ksf),
                })
                .collect(),
            swot: swot_counts(
                &data.swot.strengths,
                &data.swot.weaknesses,
                &data.swot.opportunities,
                &data.swot.threats,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn factor(weight: f64, rating: u8) -> Factor {
        Factor {
            weight,
            rating,
            ..Factor::new()
        }
    }

    fn ksf(id: &str, weight: f64, performance: f64) -> KsfItem {
        KsfItem {
            id: id.to_string(),
            weight,
            performance,
            ..KsfItem::new()
        }
    }

    fn competitor(ratings: &[(&str, f64)]) -> Competitor {
        Competitor {
            ratings: ratings
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            ..Competitor::new("Acme")
        }
    }

    #[test]
    fn test_matrix_total() {
        let factors = vec![factor(0.5, 2), factor(0.3, 4)];
        assert_eq!(matrix_total(&factors), 0.5 * 2.0 + 0.3 * 4.0);
        assert!((matrix_total(&factors) - 2.2).abs() < 1e-12);
    }

    #[test]
    fn test_weight_total_is_not_normalized() {
        let factors = vec![factor(0.7, 1), factor(0.6, 3)];
        assert_eq!(weight_total(&factors), 0.7 + 0.6);
        assert!(weight_total(&factors) > 1.0);
    }

    #[test]
    fn test_ksf_score() {
        let items = vec![ksf("a", 50.0, 80.0), ksf("b", 50.0, 20.0)];
        assert!((ksf_score(&items) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_competitor_score_ignores_unmatched_ratings() {
        let ksf_items = vec![ksf("k1", 0.6, 0.0), ksf("k2", 0.4, 0.0)];
        let c = competitor(&[("k1", 3.0), ("k2", 1.0)]);
        assert!((competitor_score(&c, &ksf_items) - 2.2).abs() < 1e-12);

        let with_orphan = competitor(&[("k1", 3.0), ("k2", 1.0), ("gone", 4.0)]);
        assert_eq!(
            competitor_score(&with_orphan, &ksf_items),
            competitor_score(&c, &ksf_items)
        );
    }

    #[test]
    fn test_empty_state() {
        assert_eq!(matrix_total(&[]), 0.0);
        assert_eq!(weight_total(&[]), 0.0);
        assert_eq!(ksf_score(&[]), 0.0);
        assert_eq!(competitor_score(&competitor(&[]), &[]), 0.0);

        let counts = swot_counts(&[], &[], &[], &[]);
        assert_eq!(counts.labels, ["Strengths", "Weaknesses", "Opportunities", "Threats"]);
        assert_eq!(counts.counts, [0, 0, 0, 0]);
    }

    #[test]
    fn test_swot_counts_follow_fixed_order() {
        let counts = swot_counts(
            &[SwotItem::new()],
            &[],
            &[SwotItem::new(), SwotItem::new(), SwotItem::new()],
            &[SwotItem::new(), SwotItem::new()],
        );
        assert_eq!(counts.counts, [1, 0, 3, 2]);
    }

    #[test]
    fn test_radar_series() {
        let mut named = factor(0.4, 3);
        named.description = "Market share".to_string();
        let series = radar_series(&[named, factor(0.1, 2)]);

        assert_eq!(series.labels, vec!["Market share", UNNAMED_FACTOR]);
        assert_eq!(series.weighted_score, vec![0.4 * 3.0, 0.1 * 2.0]);
        assert_eq!(series.weight, vec![0.4, 0.1]);
        assert_eq!(series.rating, vec![3.0, 2.0]);
    }

    #[test]
    fn test_ksf_radar_series_matches_score_terms() {
        let items = vec![ksf("a", 30.0, 90.0), ksf("b", 70.0, 40.0)];
        let series = ksf_radar_series(&items);

        assert_eq!(series.labels, vec![UNNAMED_KSF, UNNAMED_KSF]);
        assert_eq!(series.achievement, vec![90.0, 40.0]);
        assert_eq!(series.weighted_score.iter().sum::<f64>(), ksf_score(&items));
    }

    #[test]
    fn test_cpm_series_defaults_missing_ratings() {
        let mut k1 = ksf("k1", 0.5, 0.0);
        k1.description = "Price".to_string();
        let ksf_items = vec![k1, ksf("k2", 0.5, 0.0)];

        let a = competitor(&[("k1", 3.0)]);
        let b = competitor(&[("k2", 2.0)]);
        let series = cpm_series(&[a.clone(), b.clone()], &ksf_items, &[b.id.clone()]);

        assert_eq!(series.labels, vec!["Price", UNNAMED_KSF]);
        assert_eq!(series.datasets.len(), 1);
        assert_eq!(series.datasets[0].competitor_id, b.id);
        assert_eq!(series.datasets[0].ratings, vec![0.0, 2.0]);

        assert!(cpm_series(&[a], &ksf_items, &[]).datasets.is_empty());
    }

    #[test]
    fn test_summary() {
        let mut data = StrategicData::default();
        data.matrices.ife = vec![factor(0.5, 2), factor(0.5, 4)];
        data.ksf = vec![ksf("k1", 100.0, 50.0)];
        data.competitors = vec![competitor(&[("k1", 2.0)])];

        let summary = AnalysisSummary::compute(&data);
        assert_eq!(summary.ife_total, 3.0);
        assert_eq!(summary.ife_weight_total, 1.0);
        assert_eq!(summary.efe_total, 0.0);
        assert_eq!(summary.ksf_score, 50.0);
        assert_eq!(summary.competitors[0].score, 200.0);
    }
}
