mod demo;
mod file;
mod records;
mod source;

pub use demo::{DemoSource, MOON_COIN_TYPE, SUI_COIN_TYPE};
pub use file::FileSource;
pub use records::{DatasetKind, TokenInfo, sanitize_records, synthesize_connections};
pub use source::{HOLDER_LIMIT, TokenDataset, TokenSource, fetch_dataset};
