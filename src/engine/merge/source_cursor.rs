use tracing::debug;

use crate::engine::errors::StoreError;
use crate::engine::kv::{KvCursor, KvStore};

/// A record copied out of the existing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingRecord {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

/// Forward-only reader over the existing store, starting at its first key.
pub struct SourceCursor<'a> {
    cursor: Box<dyn KvCursor + 'a>,
    consumed: u64,
}

impl<'a> SourceCursor<'a> {
    pub fn open(store: &'a dyn KvStore) -> Result<Self, StoreError> {
        let mut cursor = store.cursor()?;
        cursor.seek_to_first()?;
        debug!(target: "source_cursor::open", store = store.name(), "Opened existing store cursor");
        Ok(Self {
            cursor,
            consumed: 0,
        })
    }

    /// Records handed out so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Copies out the current record and steps past it, or `None` once the
    /// store is exhausted.
    pub fn next_record(&mut self) -> Result<Option<ExistingRecord>, StoreError> {
        if !self.cursor.valid() {
            return Ok(None);
        }
        let record = ExistingRecord {
            key: self.cursor.key().to_vec(),
            value: self.cursor.value().to_vec(),
        };
        self.cursor.next()?;
        self.consumed += 1;
        Ok(Some(record))
    }

    /// Advances to the end and returns how many records were left unread.
    pub fn drain_remaining(&mut self) -> Result<u64, StoreError> {
        let mut left = 0;
        while self.cursor.valid() {
            left += 1;
            self.cursor.next()?;
        }
        Ok(left)
    }
}

/// Counts the records of a store with a full pass from its first key.
pub fn count_records(store: &dyn KvStore) -> Result<u64, StoreError> {
    let mut cursor = store.cursor()?;
    cursor.seek_to_first()?;
    let mut count = 0;
    while cursor.valid() {
        count += 1;
        cursor.next()?;
    }
    Ok(count)
}
