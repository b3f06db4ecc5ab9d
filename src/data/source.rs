use anyhow::Result;
use tracing::info;

use crate::engine::RankedRecord;

use super::records::{DatasetKind, TokenInfo, sanitize_records};

pub const HOLDER_LIMIT: usize = 50;

pub trait TokenSource: Send + Sync {
    fn token_info(&self, coin_type: &str) -> Result<TokenInfo>;
    fn holders(&self, coin_type: &str, limit: usize) -> Result<Vec<RankedRecord>>;
    fn senders(&self, coin_type: &str, limit: usize) -> Result<Vec<RankedRecord>>;
}

#[derive(Clone, Debug)]
pub struct TokenDataset {
    pub token: TokenInfo,
    pub kind: DatasetKind,
    pub query: String,
    pub records: Vec<RankedRecord>,
}

pub fn fetch_dataset(
    source: &dyn TokenSource,
    coin_type: &str,
    kind: DatasetKind,
) -> Result<TokenDataset> {
    let token = source.token_info(coin_type)?;
    let records = match kind {
        DatasetKind::Holders => source.holders(coin_type, HOLDER_LIMIT)?,
        DatasetKind::Senders => source.senders(coin_type, HOLDER_LIMIT)?,
    };

    let mut records = sanitize_records(records);
    records.truncate(HOLDER_LIMIT);

    info!(
        coin_type,
        kind = kind.label(),
        records = records.len(),
        "dataset ready"
    );

    Ok(TokenDataset {
        token,
        kind,
        query: coin_type.to_string(),
        records,
    })
}
