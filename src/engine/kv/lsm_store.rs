use std::path::{Path, PathBuf};

use fjall::{Config, Keyspace, KvPair, PartitionCreateOptions, PartitionHandle, PersistMode};
use tracing::{debug, info};

use crate::engine::errors::StoreError;
use crate::shared::path::dir_has_entries;

use super::store::{KvCursor, KvStore, OpenMode, Transaction};
use super::write_batch::WriteBatch;

/// Partition every record lives in.
pub const RECORDS_PARTITION: &str = "records";

/// Store backed by an LSM-tree keyspace.
///
/// Each commit is one atomic keyspace batch followed by a journal fsync.
pub struct LsmStore {
    dir: PathBuf,
    keyspace: Keyspace,
    records: PartitionHandle,
    mode: OpenMode,
    commits: u64,
}

impl LsmStore {
    pub fn open(path: &Path, mode: OpenMode) -> Result<Self, StoreError> {
        let dir = path.to_path_buf();
        match mode {
            OpenMode::New => {
                if dir_has_entries(&dir)? {
                    return Err(StoreError::DestinationExists(dir));
                }
                std::fs::create_dir_all(&dir)?;
            }
            OpenMode::Read => {
                if !dir_has_entries(&dir)? {
                    return Err(StoreError::NotFound(dir));
                }
            }
        }

        let keyspace = Config::new(&dir).open()?;
        if mode == OpenMode::Read && !keyspace.partition_exists(RECORDS_PARTITION) {
            return Err(StoreError::NotFound(dir));
        }
        let records =
            keyspace.open_partition(RECORDS_PARTITION, PartitionCreateOptions::default())?;
        info!(target: "lsm_store::open", ?dir, ?mode, "Opened LSM store");

        Ok(Self {
            dir,
            keyspace,
            records,
            mode,
            commits: 0,
        })
    }

    fn write_batch(&mut self, batch: WriteBatch) -> Result<(), StoreError> {
        if self.mode == OpenMode::Read {
            return Err(StoreError::ReadOnly(self.dir.clone()));
        }
        let len = batch.len();
        let mut lsm_batch = self.keyspace.batch();
        for (key, value) in batch.into_entries() {
            lsm_batch.insert(&self.records, key, value);
        }
        lsm_batch.commit()?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        self.commits += 1;

        debug!(
            target: "lsm_store::write_batch",
            dir = ?self.dir, records = len, commits = self.commits,
            "Committed batch"
        );
        Ok(())
    }

    pub fn commits(&self) -> u64 {
        self.commits
    }
}

pub struct LsmTransaction<'a> {
    store: &'a mut LsmStore,
    batch: WriteBatch,
}

impl Transaction for LsmTransaction<'_> {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.batch.put(key, value);
    }

    fn len(&self) -> usize {
        self.batch.len()
    }

    fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let this = *self;
        if this.batch.is_empty() {
            return Ok(());
        }
        this.store.write_batch(this.batch)
    }
}

/// Cursor over a snapshot iterator of the records partition.
pub struct LsmCursor {
    records: PartitionHandle,
    iter: Box<dyn Iterator<Item = fjall::Result<KvPair>>>,
    current: Option<KvPair>,
}

impl LsmCursor {
    fn advance(&mut self) -> Result<(), StoreError> {
        self.current = self.iter.next().transpose()?;
        Ok(())
    }
}

impl KvCursor for LsmCursor {
    fn seek_to_first(&mut self) -> Result<(), StoreError> {
        self.iter = Box::new(self.records.iter());
        self.advance()
    }

    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn next(&mut self) -> Result<(), StoreError> {
        if self.current.is_none() {
            return Ok(());
        }
        self.advance()
    }

    fn key(&self) -> &[u8] {
        self.current.as_ref().map(|(k, _)| &k[..]).unwrap_or_default()
    }

    fn value(&self) -> &[u8] {
        self.current.as_ref().map(|(_, v)| &v[..]).unwrap_or_default()
    }
}

impl KvStore for LsmStore {
    fn name(&self) -> &'static str {
        "lsm"
    }

    fn cursor(&self) -> Result<Box<dyn KvCursor + '_>, StoreError> {
        let mut cursor = LsmCursor {
            records: self.records.clone(),
            iter: Box::new(std::iter::empty()),
            current: None,
        };
        cursor.seek_to_first()?;
        Ok(Box::new(cursor))
    }

    fn new_transaction(&mut self) -> Box<dyn Transaction + '_> {
        Box::new(LsmTransaction {
            store: self,
            batch: WriteBatch::new(),
        })
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if self.mode == OpenMode::New {
            self.keyspace.persist(PersistMode::SyncAll)?;
            info!(
                target: "lsm_store::close",
                dir = ?self.dir, commits = self.commits,
                "Closed LSM store"
            );
        }
        Ok(())
    }
}
