use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::engine::RankedRecord;

use super::records::{RawHolderRow, TokenInfo};
use super::source::TokenSource;

#[derive(Debug, Deserialize)]
struct FileDataset {
    token: TokenInfo,
    #[serde(default)]
    holders: Vec<RawHolderRow>,
    #[serde(default)]
    senders: Vec<RawHolderRow>,
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<FileDataset> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read dataset file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid dataset JSON in {}", self.path.display()))
    }
}

impl TokenSource for FileSource {
    fn token_info(&self, _coin_type: &str) -> Result<TokenInfo> {
        Ok(self.load()?.token)
    }

    fn holders(&self, coin_type: &str, limit: usize) -> Result<Vec<RankedRecord>> {
        let dataset = self.load()?;
        if dataset.holders.is_empty() {
            return Err(anyhow!(
                "dataset file {} carries no holder rows for {coin_type}",
                self.path.display()
            ));
        }

        let mut records = dataset
            .holders
            .into_iter()
            .map(RawHolderRow::into_record)
            .collect::<Vec<_>>();
        records.truncate(limit);
        Ok(records)
    }

    fn senders(&self, coin_type: &str, limit: usize) -> Result<Vec<RankedRecord>> {
        let dataset = self.load()?;
        if dataset.senders.is_empty() {
            return Err(anyhow!(
                "dataset file {} carries no sender rows for {coin_type}",
                self.path.display()
            ));
        }

        let mut records = dataset
            .senders
            .into_iter()
            .map(RawHolderRow::into_record)
            .collect::<Vec<_>>();
        records.truncate(limit);
        Ok(records)
    }
}
