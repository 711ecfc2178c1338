use crate::engine::kv::{KvStore, MemoryStore, OpenMode, StoreBackend, open_store};
use std::path::Path;

pub struct ExistingStoreFactory {
    keys: Vec<String>,
}

impl ExistingStoreFactory {
    pub fn new() -> Self {
        Self {
            keys: vec![
                "00000000_a.jpg".into(),
                "00000001_b.jpg".into(),
                "00000002_c.jpg".into(),
            ],
        }
    }

    pub fn with_keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    /// Keys `<position>_old_<n>.jpg` for `count` records.
    pub fn with_generated(mut self, count: usize) -> Self {
        self.keys = (0..count)
            .map(|i| format!("{:08}_old_{:05}.jpg", i, i))
            .collect();
        self
    }

    fn value_for(key: &str) -> Vec<u8> {
        format!("payload:{}", key).into_bytes()
    }

    pub fn build_memory(&self) -> MemoryStore {
        MemoryStore::from_records(
            self.keys
                .iter()
                .map(|k| (k.clone().into_bytes(), Self::value_for(k))),
        )
    }

    pub fn build_on_disk(&self, backend: StoreBackend, path: &Path) {
        let mut store = open_store(backend, path, OpenMode::New).expect("create existing store");
        let mut txn = store.new_transaction();
        for key in &self.keys {
            txn.put(key.as_bytes(), &Self::value_for(key));
        }
        txn.commit().expect("commit existing store");
        store.close().expect("close existing store");
    }
}
