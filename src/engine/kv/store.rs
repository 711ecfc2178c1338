use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::engine::errors::StoreError;

use super::lmdb_store::LmdbStore;
use super::lsm_store::LsmStore;

/// How a store is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only access to an existing store.
    Read,
    /// Fresh creation; the location must not already hold data.
    New,
}

/// Forward-only, ordered iteration over a store's records.
///
/// `key` and `value` are only meaningful while `valid` returns true. Cursors
/// read from the store as they advance; only the current record is held.
pub trait KvCursor {
    fn seek_to_first(&mut self) -> Result<(), StoreError>;
    fn valid(&self) -> bool;
    fn next(&mut self) -> Result<(), StoreError>;
    fn key(&self) -> &[u8];
    fn value(&self) -> &[u8];
}

/// A group of staged puts persisted atomically by `commit`.
pub trait Transaction {
    fn put(&mut self, key: &[u8], value: &[u8]);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Persists every staged put. The handle is consumed; open a new one to keep writing.
    fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

/// Ordered key-value store capability shared by every backend.
pub trait KvStore {
    fn name(&self) -> &'static str;
    fn cursor(&self) -> Result<Box<dyn KvCursor + '_>, StoreError>;
    fn new_transaction(&mut self) -> Box<dyn Transaction + '_>;
    fn close(&mut self) -> Result<(), StoreError>;
}

/// On-disk backends selectable for the existing and destination stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// LMDB environment (memory-mapped B+tree)
    #[default]
    Lmdb,
    /// Log-structured merge tree keyspace
    #[serde(alias = "leveldb")]
    #[value(alias = "leveldb")]
    Lsm,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Lmdb => "lmdb",
            StoreBackend::Lsm => "lsm",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lmdb" => Ok(StoreBackend::Lmdb),
            "lsm" | "leveldb" => Ok(StoreBackend::Lsm),
            other => Err(StoreError::UnknownBackend(other.to_string())),
        }
    }
}

/// Opens the store at `path` with the requested backend.
pub fn open_store(
    backend: StoreBackend,
    path: &Path,
    mode: OpenMode,
) -> Result<Box<dyn KvStore>, StoreError> {
    match backend {
        StoreBackend::Lmdb => Ok(Box::new(LmdbStore::open(path, mode)?)),
        StoreBackend::Lsm => Ok(Box::new(LsmStore::open(path, mode)?)),
    }
}
