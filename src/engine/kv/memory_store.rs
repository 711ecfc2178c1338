use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::engine::errors::StoreError;

use super::store::{KvCursor, KvStore, Transaction};
use super::write_batch::WriteBatch;

/// In-process store. Records every commit's size so callers can inspect how a
/// writer batched its output.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<Vec<u8>, Vec<u8>>,
    commit_sizes: Vec<usize>,
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<K, V, I>(records: I) -> Self
    where
        K: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.records.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> Vec<String> {
        self.records
            .keys()
            .map(|k| String::from_utf8_lossy(k).into_owned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn commit_count(&self) -> usize {
        self.commit_sizes.len()
    }

    pub fn commit_sizes(&self) -> &[usize] {
        &self.commit_sizes
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

pub struct MemoryTransaction<'a> {
    store: &'a mut MemoryStore,
    batch: WriteBatch,
}

impl Transaction for MemoryTransaction<'_> {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.batch.put(key, value);
    }

    fn len(&self) -> usize {
        self.batch.len()
    }

    fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let this = *self;
        this.store.commit_sizes.push(this.batch.len());
        this.store.records.extend(this.batch.into_entries());
        Ok(())
    }
}

/// Cursor over the in-memory map.
pub struct MemoryCursor<'a> {
    map: &'a BTreeMap<Vec<u8>, Vec<u8>>,
    iter: btree_map::Iter<'a, Vec<u8>, Vec<u8>>,
    current: Option<(&'a Vec<u8>, &'a Vec<u8>)>,
}

impl KvCursor for MemoryCursor<'_> {
    fn seek_to_first(&mut self) -> Result<(), StoreError> {
        self.iter = self.map.iter();
        self.current = self.iter.next();
        Ok(())
    }

    fn valid(&self) -> bool {
        self.current.is_some()
    }

    fn next(&mut self) -> Result<(), StoreError> {
        if self.current.is_some() {
            self.current = self.iter.next();
        }
        Ok(())
    }

    fn key(&self) -> &[u8] {
        self.current.map(|(k, _)| k.as_slice()).unwrap_or_default()
    }

    fn value(&self) -> &[u8] {
        self.current.map(|(_, v)| v.as_slice()).unwrap_or_default()
    }
}

impl KvStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn cursor(&self) -> Result<Box<dyn KvCursor + '_>, StoreError> {
        let mut iter = self.records.iter();
        let current = iter.next();
        Ok(Box::new(MemoryCursor {
            map: &self.records,
            iter,
            current,
        }))
    }

    fn new_transaction(&mut self) -> Box<dyn Transaction + '_> {
        Box::new(MemoryTransaction {
            store: self,
            batch: WriteBatch::new(),
        })
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.closed = true;
        Ok(())
    }
}
