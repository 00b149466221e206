//! Strategic analysis entities and their mutations.
//!
//! Every bounded numeric field is clamped at the point of mutation:
//! factor weight `[0, 1]`, factor rating `[1, 4]`, KSF weight and
//! performance `[0, 100]`, competitor rating `[0, 4]`. Documents loaded from
//! storage are taken as-is.

pub mod model;

use crate::error::{StrataError, StrataResult};
use model::{
    Competitor, Factor, FactorUpdate, KsfItem, KsfUpdate, MatrixKind, StrategicData, SwotBucket,
    SwotItem,
};

pub const FACTOR_WEIGHT_RANGE: (f64, f64) = (0.0, 1.0);
pub const FACTOR_RATING_RANGE: (f64, f64) = (1.0, 4.0);
pub const KSF_PERCENT_RANGE: (f64, f64) = (0.0, 100.0);
pub const COMPETITOR_RATING_RANGE: (f64, f64) = (0.0, 4.0);

/// Clamp `value` into `range`, rejecting NaN and infinities.
pub fn clamp_field(field: &str, value: f64, range: (f64, f64)) -> StrataResult<f64> {
    if !value.is_finite() {
        return Err(StrataError::validation(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    Ok(value.clamp(range.0, range.1))
}

fn clamp_rating(value: f64) -> StrataResult<u8> {
    let clamped = clamp_field("rating", value, FACTOR_RATING_RANGE)?;
    Ok(clamped.round() as u8)
}

impl StrategicData {
    /// Replace every collection with those of `other`.
    pub fn replace(&mut self, other: StrategicData) {
        *self = other;
    }

    // ---- IFE / EFE ----

    pub fn add_factor(&mut self, kind: MatrixKind) -> &Factor {
        let factors = self.matrices.matrix_mut(kind);
        factors.push(Factor::new());
        &factors[factors.len() - 1]
    }

    pub fn update_factor(
        &mut self,
        kind: MatrixKind,
        id: &str,
        update: FactorUpdate,
    ) -> StrataResult<&Factor> {
        let weight = update
            .weight
            .map(|w| clamp_field("weight", w, FACTOR_WEIGHT_RANGE))
            .transpose()?;
        let rating = update.rating.map(clamp_rating).transpose()?;

        let factor = self
            .matrices
            .matrix_mut(kind)
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| StrataError::FactorNotFound {
                matrix: kind.as_str().to_string(),
                id: id.to_string(),
            })?;

        if let Some(description) = update.description {
            factor.description = description;
        }
        if let Some(weight) = weight {
            factor.weight = weight;
        }
        if let Some(rating) = rating {
            factor.rating = rating;
        }
        Ok(&*factor)
    }

    pub fn remove_factor(&mut self, kind: MatrixKind, id: &str) -> StrataResult<Factor> {
        let factors = self.matrices.matrix_mut(kind);
        let pos = factors.iter().position(|f| f.id == id).ok_or_else(|| {
            StrataError::FactorNotFound {
                matrix: kind.as_str().to_string(),
                id: id.to_string(),
            }
        })?;
        Ok(factors.remove(pos))
    }

    // ---- SWOT ----

    pub fn add_swot_item(&mut self, bucket: SwotBucket) -> &SwotItem {
        let items = self.swot.bucket_mut(bucket);
        items.push(SwotItem::new());
        &items[items.len() - 1]
    }

    pub fn update_swot_item(
        &mut self,
        bucket: SwotBucket,
        id: &str,
        description: impl Into<String>,
    ) -> StrataResult<&SwotItem> {
        let item = self
            .swot
            .bucket_mut(bucket)
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StrataError::SwotItemNotFound {
                bucket: bucket.as_str().to_string(),
                id: id.to_string(),
            })?;
        item.description = description.into();
        Ok(&*item)
    }

    pub fn remove_swot_item(&mut self, bucket: SwotBucket, id: &str) -> StrataResult<SwotItem> {
        let items = self.swot.bucket_mut(bucket);
        let pos = items.iter().position(|i| i.id == id).ok_or_else(|| {
            StrataError::SwotItemNotFound {
                bucket: bucket.as_str().to_string(),
                id: id.to_string(),
            }
        })?;
        Ok(items.remove(pos))
    }

    // ---- KSF ----

    pub fn add_ksf_item(&mut self) -> &KsfItem {
        self.ksf.push(KsfItem::new());
        &self.ksf[self.ksf.len() - 1]
    }

    pub fn update_ksf_item(&mut self, id: &str, update: KsfUpdate) -> StrataResult<&KsfItem> {
        let weight = update
            .weight
            .map(|w| clamp_field("weight", w, KSF_PERCENT_RANGE))
            .transpose()?;
        let performance = update
            .performance
            .map(|p| clamp_field("performance", p, KSF_PERCENT_RANGE))
            .transpose()?;

        let item = self
            .ksf
            .iter_mut()
            .find(|k| k.id == id)
            .ok_or_else(|| StrataError::KsfNotFound(id.to_string()))?;

        if let Some(description) = update.description {
            item.description = description;
        }
        if let Some(target) = update.target {
            item.target = target;
        }
        if let Some(measure) = update.measure {
            item.measure = measure;
        }
        if let Some(weight) = weight {
            item.weight = weight;
        }
        if let Some(performance) = performance {
            item.performance = performance;
        }
        Ok(&*item)
    }

    /// Remove a KSF. Competitor ratings that reference it are left in place.
    pub fn remove_ksf_item(&mut self, id: &str) -> StrataResult<KsfItem> {
        let pos = self
            .ksf
            .iter()
            .position(|k| k.id == id)
            .ok_or_else(|| StrataError::KsfNotFound(id.to_string()))?;
        Ok(self.ksf.remove(pos))
    }

    // ---- CPM ----

    pub fn add_competitor(&mut self, name: impl Into<String>) -> &Competitor {
        self.competitors.push(Competitor::new(name));
        &self.competitors[self.competitors.len() - 1]
    }

    pub fn rename_competitor(&mut self, id: &str, name: impl Into<String>) -> StrataResult<&Competitor> {
        let competitor = self.competitor_mut(id)?;
        competitor.name = name.into();
        Ok(&*competitor)
    }

    /// Rate `competitor_id` against `ksf_id`, clamped to `[0, 4]`.
    ///
    /// The KSF must exist at rating time.
    pub fn set_competitor_rating(
        &mut self,
        competitor_id: &str,
        ksf_id: &str,
        rating: f64,
    ) -> StrataResult<f64> {
        let rating = clamp_field("rating", rating, COMPETITOR_RATING_RANGE)?;
        if !self.ksf.iter().any(|k| k.id == ksf_id) {
            return Err(StrataError::KsfNotFound(ksf_id.to_string()));
        }
        let competitor = self.competitor_mut(competitor_id)?;
        competitor.ratings.insert(ksf_id.to_string(), rating);
        Ok(rating)
    }

    pub fn remove_competitor(&mut self, id: &str) -> StrataResult<Competitor> {
        let pos = self
            .competitors
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StrataError::CompetitorNotFound(id.to_string()))?;
        Ok(self.competitors.remove(pos))
    }

    fn competitor_mut(&mut self, id: &str) -> StrataResult<&mut Competitor> {
        self.competitors
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StrataError::CompetitorNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_constructor_defaults() {
        let factor = Factor::new();
        assert_eq!(factor.weight, 0.0);
        assert_eq!(factor.rating, 1);
        assert!(factor.description.is_empty());

        let swot = SwotItem::new();
        assert!(swot.description.is_empty());

        let ksf = KsfItem::new();
        assert_eq!(ksf.weight, 0.0);
        assert_eq!(ksf.performance, 0.0);

        let competitor = Competitor::new("Acme");
        assert_eq!(competitor.name, "Acme");
        assert!(competitor.ratings.is_empty());
    }

    #[test]
    fn test_ten_thousand_factor_ids_are_distinct() {
        let ids: HashSet<String> = (0..10_000).map(|_| Factor::new().id).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_consecutive_entities_never_share_an_id() {
        for _ in 0..10_000 {
            let a = SwotItem::new();
            let b = KsfItem::new();
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_factor_lifecycle() {
        let mut data = StrategicData::default();
        let id = data.add_factor(MatrixKind::Ife).id.clone();
        data.add_factor(MatrixKind::Ife);

        data.update_factor(
            MatrixKind::Ife,
            &id,
            FactorUpdate {
                description: Some("Brand strength".to_string()),
                weight: Some(0.25),
                rating: Some(3.0),
            },
        )
        .unwrap();

        let factor = &data.matrices.ife[0];
        assert_eq!(factor.description, "Brand strength");
        assert_eq!(factor.weight, 0.25);
        assert_eq!(factor.rating, 3);
        assert!(data.matrices.efe.is_empty());

        data.remove_factor(MatrixKind::Ife, &id).unwrap();
        assert_eq!(data.matrices.ife.len(), 1);
        assert!(data.remove_factor(MatrixKind::Ife, &id).is_err());
    }

    #[test]
    fn test_factor_fields_are_clamped() {
        let mut data = StrategicData::default();
        let id = data.add_factor(MatrixKind::Efe).id.clone();

        let factor = data
            .update_factor(
                MatrixKind::Efe,
                &id,
                FactorUpdate {
                    weight: Some(1.7),
                    rating: Some(9.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(factor.weight, 1.0);
        assert_eq!(factor.rating, 4);

        let factor = data
            .update_factor(
                MatrixKind::Efe,
                &id,
                FactorUpdate {
                    weight: Some(-0.2),
                    rating: Some(0.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(factor.weight, 0.0);
        assert_eq!(factor.rating, 1);
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let mut data = StrategicData::default();
        let id = data.add_factor(MatrixKind::Ife).id.clone();
        let result = data.update_factor(
            MatrixKind::Ife,
            &id,
            FactorUpdate {
                weight: Some(f64::NAN),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(StrataError::ValidationError(_))));
        assert_eq!(data.matrices.ife[0].weight, 0.0);
    }

    #[test]
    fn test_swot_lifecycle() {
        let mut data = StrategicData::default();
        let id = data.add_swot_item(SwotBucket::Threats).id.clone();
        data.update_swot_item(SwotBucket::Threats, &id, "New entrants").unwrap();
        assert_eq!(data.swot.threats[0].description, "New entrants");

        // Ids are scoped to their bucket.
        assert!(data.update_swot_item(SwotBucket::Strengths, &id, "x").is_err());

        data.remove_swot_item(SwotBucket::Threats, &id).unwrap();
        assert!(data.swot.threats.is_empty());
    }

    #[test]
    fn test_ksf_update_clamps_percentages() {
        let mut data = StrategicData::default();
        let id = data.add_ksf_item().id.clone();
        let item = data
            .update_ksf_item(
                &id,
                KsfUpdate {
                    description: Some("On-time delivery".to_string()),
                    target: Some("98%".to_string()),
                    measure: Some("Monthly audit".to_string()),
                    weight: Some(140.0),
                    performance: Some(-5.0),
                },
            )
            .unwrap();
        assert_eq!(item.weight, 100.0);
        assert_eq!(item.performance, 0.0);
        assert_eq!(item.target, "98%");
    }

    #[test]
    fn test_competitor_rating_is_clamped() {
        let mut data = StrategicData::seeded();
        let ksf_id = data.add_ksf_item().id.clone();
        let competitor_id = data.competitors[0].id.clone();

        let rating = data.set_competitor_rating(&competitor_id, &ksf_id, 7.5).unwrap();
        assert_eq!(rating, 4.0);
        let rating = data.set_competitor_rating(&competitor_id, &ksf_id, -1.0).unwrap();
        assert_eq!(rating, 0.0);
        assert_eq!(data.competitors[0].ratings[&ksf_id], 0.0);
    }

    #[test]
    fn test_rating_unknown_ksf_fails() {
        let mut data = StrategicData::seeded();
        let competitor_id = data.competitors[1].id.clone();
        assert!(matches!(
            data.set_competitor_rating(&competitor_id, "missing", 2.0),
            Err(StrataError::KsfNotFound(_))
        ));
    }

    #[test]
    fn test_removing_ksf_keeps_competitor_ratings() {
        let mut data = StrategicData::seeded();
        let ksf_id = data.add_ksf_item().id.clone();
        let competitor_id = data.competitors[2].id.clone();
        data.set_competitor_rating(&competitor_id, &ksf_id, 3.0).unwrap();

        data.remove_ksf_item(&ksf_id).unwrap();
        assert_eq!(data.competitors[2].ratings.get(&ksf_id), Some(&3.0));
    }

    #[test]
    fn test_seeded_competitors() {
        let data = StrategicData::seeded();
        let names: Vec<&str> = data.competitors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Our Company", "Competitor 1", "Competitor 2"]);
        let ids: Vec<&str> = data.competitors.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(StrategicData::seeded(), data);
        assert!(StrategicData::default().competitors.is_empty());
    }

    #[test]
    fn test_legacy_ksf_document_defaults_missing_fields() {
        let json = r#"{"ksf":[{"id":"k1","description":"Quality","target":"A","measure":"B"}]}"#;
        let data = StrategicData::from_json(json).unwrap();
        assert_eq!(data.ksf[0].weight, 0.0);
        assert_eq!(data.ksf[0].performance, 0.0);
        assert!(data.swot.strengths.is_empty());
        assert!(data.competitors.is_empty());
    }
}
