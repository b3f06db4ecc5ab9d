use anyhow::{Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::RankedRecord;

use super::records::{TokenInfo, synthesize_connections};
use super::source::TokenSource;

pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";
pub const MOON_COIN_TYPE: &str =
    "0x7b888393d6a552819bb0a7f878183abaf04550bfb9546b20ea586d338210826f::moon::MOON";

pub struct DemoSource {
    seed: u64,
}

impl DemoSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

fn record(
    address: &str,
    share: f32,
    tag: Option<&str>,
    balance: &str,
    connections: &[&str],
) -> RankedRecord {
    RankedRecord {
        address: address.to_string(),
        percentage_share: share,
        balance: Some(balance.to_string()),
        tag: tag.map(str::to_string),
        transaction_count: None,
        connections: connections.iter().map(|c| c.to_string()).collect(),
    }
}

fn sui_holders() -> Vec<RankedRecord> {
    let a1 = "0xsui1234567890abcdef1234567890abcdef123456";
    let a2 = "0xsui9876543210fedcba9876543210fedcba987654";
    let a3 = "0xsuiabcdef1234567890abcdef1234567890abcdef";
    let a4 = "0xsuifedcba9876543210fedcba9876543210fedcba";
    let a5 = "0xsui5555666677778888999900001111222233334";
    let a6 = "0xsui1111222233334444555566667777888899990";

    vec![
        record(a1, 35.2, Some("Foundation"), "3520000000000000000", &[a2, a3, a4]),
        record(a2, 22.8, Some("Validator #1"), "2280000000000000000", &[a1]),
        record(a3, 15.6, None, "1560000000000000000", &[a1, a4]),
        record(a4, 11.3, Some("DEX Pool"), "1130000000000000000", &[a1, a3]),
        record(a5, 7.8, None, "780000000000000000", &[]),
        record(a6, 4.5, None, "450000000000000000", &[]),
    ]
}

fn moon_holders() -> Vec<RankedRecord> {
    let a1 = "0x1234567890abcdef1234567890abcdef12345678";
    let a2 = "0xabcdef1234567890abcdef1234567890abcdef12";
    let a3 = "0x9876543210fedcba9876543210fedcba98765432";
    let a4 = "0xfedcba9876543210fedcba9876543210fedcba98";
    let a5 = "0x5555666677778888999900001111222233334444";
    let a6 = "0x1111222233334444555566667777888899990000";
    let a7 = "0xaaaaaabbbbbbccccccddddddeeeeeeffffffffff";

    vec![
        record(a1, 25.5, Some("Oddy"), "25500000000000", &[a2, a3]),
        record(a2, 18.3, Some("Whale #1"), "18300000000000", &[a1, a4]),
        record(a3, 12.7, None, "12700000000000", &[a1]),
        record(a4, 8.9, Some("Exchange"), "8900000000000", &[a2, a5]),
        record(a5, 6.4, None, "6400000000000", &[a4]),
        record(a6, 4.2, None, "4200000000000", &[]),
        record(a7, 3.1, None, "3100000000000", &[]),
    ]
}

fn with_transaction_counts(
    mut records: Vec<RankedRecord>,
    counts: &[u64],
) -> Vec<RankedRecord> {
    for (record, &count) in records.iter_mut().zip(counts) {
        record.transaction_count = Some(count);
        record.connections.clear();
    }
    records
}

impl TokenSource for DemoSource {
    fn token_info(&self, coin_type: &str) -> Result<TokenInfo> {
        match coin_type {
            SUI_COIN_TYPE => Ok(TokenInfo {
                symbol: "SUI".to_string(),
                name: "Sui Network".to_string(),
                decimals: 9,
                total_supply: Some("10000000000000000000".to_string()),
            }),
            MOON_COIN_TYPE => Ok(TokenInfo {
                symbol: "MOON".to_string(),
                name: "Moon Coin".to_string(),
                decimals: 6,
                total_supply: Some("100000000000000".to_string()),
            }),
            _ => Err(anyhow!("token metadata not found for {coin_type}")),
        }
    }

    fn holders(&self, coin_type: &str, limit: usize) -> Result<Vec<RankedRecord>> {
        let mut holders = match coin_type {
            SUI_COIN_TYPE => sui_holders(),
            MOON_COIN_TYPE => moon_holders(),
            _ => return Err(anyhow!("no holders found for token {coin_type}")),
        };
        holders.truncate(limit);
        Ok(holders)
    }

    fn senders(&self, coin_type: &str, limit: usize) -> Result<Vec<RankedRecord>> {
        let base = match coin_type {
            SUI_COIN_TYPE => sui_holders(),
            MOON_COIN_TYPE => moon_holders(),
            _ => return Err(anyhow!("no senders found for token {coin_type}")),
        };

        let counts = [412, 230, 187, 95, 44, 12, 7];
        let mut senders = with_transaction_counts(base, &counts);
        let mut rng = StdRng::seed_from_u64(self.seed);
        synthesize_connections(&mut senders, &mut rng);
        senders.truncate(limit);
        Ok(senders)
    }
}
