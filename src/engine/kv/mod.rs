pub mod lmdb_store;
pub mod lsm_store;
pub mod memory_store;
pub mod store;
pub mod write_batch;

pub use lmdb_store::LmdbStore;
pub use lsm_store::LsmStore;
pub use memory_store::MemoryStore;
pub use store::{KvCursor, KvStore, OpenMode, StoreBackend, Transaction, open_store};
pub use write_batch::WriteBatch;

#[cfg(test)]
mod store_test;
