use rand::Rng;
use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::warn;

use crate::engine::{RankedRecord, validate_record};

#[derive(Clone, Debug, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default, rename = "totalSupply")]
    pub total_supply: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetKind {
    Holders,
    Senders,
}

impl DatasetKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Holders => "holders",
            Self::Senders => "senders",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawHolderRow {
    pub(super) address: String,
    #[serde(rename = "percentageShare", alias = "percentage")]
    pub(super) percentage_share: f32,
    #[serde(default)]
    pub(super) balance: Option<String>,
    #[serde(default)]
    pub(super) tag: Option<String>,
    #[serde(default, rename = "transactionCount")]
    pub(super) transaction_count: Option<u64>,
    #[serde(default)]
    pub(super) connections: Vec<String>,
}

impl RawHolderRow {
    pub(super) fn into_record(self) -> RankedRecord {
        RankedRecord {
            address: self.address,
            percentage_share: self.percentage_share,
            balance: self.balance,
            tag: self.tag,
            transaction_count: self.transaction_count,
            connections: self.connections,
        }
    }
}

// Upstream indexers supply noisy rows; dropping them here keeps the engine's
// validation strict without failing the whole dataset.
pub fn sanitize_records(records: Vec<RankedRecord>) -> Vec<RankedRecord> {
    records
        .into_iter()
        .filter(|record| match validate_record(record) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "dropping malformed record");
                false
            }
        })
        .collect()
}

// Demo embellishment: link roughly a third of the records to their
// predecessor so the map has arrows to draw.
pub fn synthesize_connections(records: &mut [RankedRecord], rng: &mut StdRng) {
    for index in 1..records.len() {
        if !records[index].connections.is_empty() {
            continue;
        }
        if rng.random::<f32>() > 0.7 {
            let previous = records[index - 1].address.clone();
            records[index].connections.push(previous);
        }
    }
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
    fn sanitize_drops_only_malformed_rows() {
        let records = vec![
            record("0xa", 25.0),
            record("0xnan", f32::NAN),
            record("0xzero", 0.0),
            record("0xb", 3.5),
        ];

        let kept = sanitize_records(records);
        let addresses = kept
            .iter()
            .map(|r| r.address.as_str())
            .collect::<Vec<_>>();
        assert_eq!(addresses, vec!["0xa", "0xb"]);
    }

    #[test]
    fn synthesized_connections_are_deterministic_per_seed() {
        let build = |seed: u64| {
            let mut records = (0..12)
                .map(|i| record(&format!("0x{i}"), 10.0))
                .collect::<Vec<_>>();
            let mut rng = StdRng::seed_from_u64(seed);
            synthesize_connections(&mut records, &mut rng);
            records
                .iter()
                .map(|r| r.connections.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(build(5), build(5));
    }

    #[test]
    fn synthesized_connections_only_point_to_the_predecessor() {
        let mut records = (0..20)
            .map(|i| record(&format!("0x{i}"), 5.0))
            .collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(2);
        synthesize_connections(&mut records, &mut rng);

        for (index, record) in records.iter().enumerate() {
            for connection in &record.connections {
                assert_eq!(connection, &format!("0x{}", index - 1));
            }
        }
    }
}
