use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::vec2;
use rand::Rng;
use rand::rngs::StdRng;
use thiserror::Error;

use super::entity::{Entity, LayoutConfig, RankedRecord};

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("record {address} has percentage share {share} outside (0, 100]")]
    ShareOutOfRange { address: String, share: f32 },
    #[error("record {address} has a non-finite percentage share")]
    ShareNotFinite { address: String },
}

pub fn validate_record(record: &RankedRecord) -> Result<(), ValidationError> {
    if !record.percentage_share.is_finite() {
        return Err(ValidationError::ShareNotFinite {
            address: record.address.clone(),
        });
    }
    if record.percentage_share <= 0.0 || record.percentage_share > 100.0 {
        return Err(ValidationError::ShareOutOfRange {
            address: record.address.clone(),
            share: record.percentage_share,
        });
    }
    Ok(())
}

pub fn normalize(
    records: &[RankedRecord],
    layout: &LayoutConfig,
    rng: &mut StdRng,
) -> Result<Vec<Entity>, ValidationError> {
    for record in records {
        validate_record(record)?;
    }

    let slot_count = records.len().max(layout.slot_count_floor);
    let mut index_by_address = HashMap::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        index_by_address.entry(record.address.as_str()).or_insert(index);
    }

    let mut entities = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let angle = (index as f32 * TAU) / slot_count as f32;
        let ring_radius = layout.ring_radius(record.percentage_share);
        let jitter = vec2(
            (rng.random::<f32>() - 0.5) * (2.0 * layout.jitter_extent),
            (rng.random::<f32>() - 0.5) * (2.0 * layout.jitter_extent),
        );
        let position = layout.center + (vec2(angle.cos(), angle.sin()) * ring_radius) + jitter;

        let mut connections = record
            .connections
            .iter()
            .filter_map(|address| index_by_address.get(address.as_str()).copied())
            .filter(|&target| target != index)
            .collect::<Vec<_>>();
        connections.sort_unstable();
        connections.dedup();

        entities.push(Entity {
            id: index,
            address: record.address.clone(),
            percentage_share: record.percentage_share,
            balance: record.balance.clone(),
            tag: record.tag.clone(),
            transaction_count: record.transaction_count,
            position,
            ring_position: position,
            connections,
        });
    }

    Ok(entities)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn record(address: &str, share: f32) -> RankedRecord {
        RankedRecord {
            address: address.to_string(),
            percentage_share: share,
            ..RankedRecord::default()
        }
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let mut rng = StdRng::seed_from_u64(7);
        let entities = normalize(&[], &LayoutConfig::default(), &mut rng).unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn same_seed_reproduces_identical_positions() {
        let records = vec![record("0xa", 35.2), record("0xb", 22.8), record("0xc", 4.5)];
        let layout = LayoutConfig::default();

        let mut first_rng = StdRng::seed_from_u64(42);
        let mut second_rng = StdRng::seed_from_u64(42);
        let first = normalize(&records, &layout, &mut first_rng).unwrap();
        let second = normalize(&records, &layout, &mut second_rng).unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.ring_position, b.ring_position);
        }
    }

    #[test]
    fn positions_stay_within_ring_plus_jitter() {
        let records = vec![record("0xa", 35.2), record("0xb", 7.8), record("0xc", 0.9)];
        let layout = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(3);

        let entities = normalize(&records, &layout, &mut rng).unwrap();
        for entity in &entities {
            let ring_radius = layout.ring_radius(entity.percentage_share);
            let offset = entity.ring_position - layout.center;
            let max_distance = ring_radius + (layout.jitter_extent * 2.0_f32.sqrt());
            assert!(offset.length() <= max_distance + 0.001);
        }
    }

    #[test]
    fn non_finite_share_is_rejected() {
        let records = vec![record("0xa", f32::NAN)];
        let mut rng = StdRng::seed_from_u64(1);

        let error = normalize(&records, &LayoutConfig::default(), &mut rng).unwrap_err();
        assert_eq!(
            error,
            ValidationError::ShareNotFinite {
                address: "0xa".to_string()
            }
        );
    }

    #[test]
    fn out_of_range_share_is_rejected_not_coerced() {
        for bad in [0.0, -4.0, 100.01] {
            let records = vec![record("0xbad", bad)];
            let mut rng = StdRng::seed_from_u64(1);
            let error = normalize(&records, &LayoutConfig::default(), &mut rng).unwrap_err();
            assert!(matches!(error, ValidationError::ShareOutOfRange { .. }));
        }
    }

    #[test]
    fn dangling_and_self_connections_are_dropped() {
        let mut linked = record("0xa", 20.0);
        linked.connections = vec![
            "0xb".to_string(),
            "0xa".to_string(),
            "0xmissing".to_string(),
            "0xb".to_string(),
        ];
        let records = vec![linked, record("0xb", 10.0)];
        let mut rng = StdRng::seed_from_u64(9);

        let entities = normalize(&records, &LayoutConfig::default(), &mut rng).unwrap();
        assert_eq!(entities[0].connections, vec![1]);
        assert!(entities[1].connections.is_empty());
    }
}
