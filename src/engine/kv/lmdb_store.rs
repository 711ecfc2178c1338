use std::path::{Path, PathBuf};

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions, RoTxn};
use tracing::{debug, info};

use crate::engine::errors::StoreError;
use crate::shared::config::CONFIG;
use crate::shared::path::dir_has_entries;

use super::store::{KvCursor, KvStore, OpenMode, Transaction};
use super::write_batch::WriteBatch;

/// Data file LMDB keeps inside an environment directory.
pub const LMDB_DATA_FILE: &str = "data.mdb";

/// Store backed by an LMDB environment with a single unnamed database.
pub struct LmdbStore {
    dir: PathBuf,
    env: Env,
    db: Database<Bytes, Bytes>,
    mode: OpenMode,
    commits: u64,
}

impl LmdbStore {
    pub fn open(path: &Path, mode: OpenMode) -> Result<Self, StoreError> {
        Self::open_with_map_size(path, mode, CONFIG.store.lmdb_map_size)
    }

    pub fn open_with_map_size(
        path: &Path,
        mode: OpenMode,
        map_size: usize,
    ) -> Result<Self, StoreError> {
        let dir = path.to_path_buf();
        match mode {
            OpenMode::New => {
                if dir_has_entries(&dir)? {
                    return Err(StoreError::DestinationExists(dir));
                }
                std::fs::create_dir_all(&dir)?;
            }
            OpenMode::Read => {
                if !dir.join(LMDB_DATA_FILE).is_file() {
                    return Err(StoreError::NotFound(dir));
                }
            }
        }

        // SAFETY: each environment path is opened once per store and never
        // mapped by another handle in this process while the store is alive.
        let env = unsafe { EnvOpenOptions::new().map_size(map_size).open(&dir)? };

        let db = match mode {
            OpenMode::New => {
                let mut wtxn = env.write_txn()?;
                let db = env.create_database::<Bytes, Bytes>(&mut wtxn, None)?;
                wtxn.commit()?;
                info!(target: "lmdb_store::open", ?dir, map_size, "Created LMDB store");
                db
            }
            OpenMode::Read => {
                let rtxn = env.read_txn()?;
                let db = env
                    .open_database::<Bytes, Bytes>(&rtxn, None)?
                    .ok_or_else(|| StoreError::NotFound(dir.clone()))?;
                let entries = db.len(&rtxn)?;
                rtxn.commit()?;
                info!(target: "lmdb_store::open", ?dir, entries, "Opened LMDB store for reading");
                db
            }
        };

        Ok(Self {
            dir,
            env,
            db,
            mode,
            commits: 0,
        })
    }

    fn write_batch(&mut self, batch: WriteBatch) -> Result<(), StoreError> {
        if self.mode == OpenMode::Read {
            return Err(StoreError::ReadOnly(self.dir.clone()));
        }
        let mut wtxn = self.env.write_txn()?;
        for (key, value) in batch.entries() {
            self.db.put(&mut wtxn, key, value)?;
        }
        wtxn.commit()?;
        self.commits += 1;

        debug!(
            target: "lmdb_store::write_batch",
            dir = ?self.dir, records = batch.len(), commits = self.commits,
            "Committed batch"
        );
        Ok(())
    }

    pub fn commits(&self) -> u64 {
        self.commits
    }
}

pub struct LmdbTransaction<'a> {
    store: &'a mut LmdbStore,
    batch: WriteBatch,
}

impl Transaction for LmdbTransaction<'_> {
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

/// Cursor holding one read transaction; each step seeks past the current key.
pub struct LmdbCursor<'a> {
    txn: RoTxn<'a>,
    db: Database<Bytes, Bytes>,
    current: Option<(Vec<u8>, Vec<u8>)>,
}

impl KvCursor for LmdbCursor<'_> {
    fn seek_to_first(&mut self) -> Result<(), StoreError> {
        self.current = self
            .db
            .first(&self.txn)?
            .map(|(k, v)| (k.to_vec(), v.to_vec()));
        Ok(())
    }

    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn next(&mut self) -> Result<(), StoreError> {
        let next = match &self.current {
            Some((key, _)) => self
                .db
                .get_greater_than(&self.txn, key)?
                .map(|(k, v)| (k.to_vec(), v.to_vec())),
            None => return Ok(()),
        };
        self.current = next;
        Ok(())
    }

    fn key(&self) -> &[u8] {
        self.current.as_ref().map(|(k, _)| k.as_slice()).unwrap_or_default()
    }

    fn value(&self) -> &[u8] {
        self.current.as_ref().map(|(_, v)| v.as_slice()).unwrap_or_default()
    }
}

impl KvStore for LmdbStore {
    fn name(&self) -> &'static str {
        "lmdb"
    }

    fn cursor(&self) -> Result<Box<dyn KvCursor + '_>, StoreError> {
        let txn = self.env.read_txn()?;
        let mut cursor = LmdbCursor {
            txn,
            db: self.db,
            current: None,
        };
        cursor.seek_to_first()?;
        Ok(Box::new(cursor))
    }

    fn new_transaction(&mut self) -> Box<dyn Transaction + '_> {
        Box::new(LmdbTransaction {
            store: self,
            batch: WriteBatch::new(),
        })
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if self.mode == OpenMode::New {
            self.env.force_sync()?;
            info!(
                target: "lmdb_store::close",
                dir = ?self.dir, commits = self.commits,
                "Closed LMDB store"
            );
        }
        Ok(())
    }
}
