use crate::engine::errors::StoreError;
use crate::engine::kv::memory_store::MemoryStore;
use crate::engine::kv::store::{KvStore, OpenMode, StoreBackend, open_store};
use tempfile::tempdir;

#[test]
fn cursor_walks_records_in_key_order_and_stops() {
    let store = MemoryStore::from_records([("b", "2"), ("a", "1")]);
    let mut cursor = store.cursor().unwrap();

    cursor.seek_to_first().unwrap();
    assert!(cursor.valid());
    assert_eq!(cursor.key(), b"a");
    assert_eq!(cursor.value(), b"1");
    cursor.next().unwrap();
    assert_eq!(cursor.key(), b"b");
    cursor.next().unwrap();
    assert!(!cursor.valid());
    assert!(cursor.key().is_empty());

    // Advancing past the end stays exhausted; seeking restarts
    cursor.next().unwrap();
    assert!(!cursor.valid());
    cursor.seek_to_first().unwrap();
    assert_eq!(cursor.key(), b"a");
}

#[test]
fn backend_parses_case_insensitively() {
    assert_eq!("LMDB".parse::<StoreBackend>().unwrap(), StoreBackend::Lmdb);
    assert_eq!("lsm".parse::<StoreBackend>().unwrap(), StoreBackend::Lsm);
    assert_eq!("leveldb".parse::<StoreBackend>().unwrap(), StoreBackend::Lsm);
    assert!(matches!(
        "rocks".parse::<StoreBackend>().unwrap_err(),
        StoreError::UnknownBackend(_)
    ));
    assert_eq!(StoreBackend::default().to_string(), "lmdb");
}

#[test]
fn open_store_round_trips_through_every_backend() {
    for backend in [StoreBackend::Lmdb, StoreBackend::Lsm] {
        let dir = tempdir().unwrap();
        let path = dir.path().join(backend.as_str());

        let mut store = open_store(backend, &path, OpenMode::New).unwrap();
        assert_eq!(store.name(), backend.as_str());
        let mut txn = store.new_transaction();
        txn.put(b"00000000_x.png", b"payload");
        txn.commit().unwrap();
        store.close().unwrap();
        drop(store);

        let store = open_store(backend, &path, OpenMode::Read).unwrap();
        {
            let mut cursor = store.cursor().unwrap();
            cursor.seek_to_first().unwrap();
            assert_eq!(cursor.key(), b"00000000_x.png");
            assert_eq!(cursor.value(), b"payload");
        }
        drop(store);

        let err = open_store(backend, &path, OpenMode::New).err().unwrap();
        assert!(matches!(err, StoreError::DestinationExists(_)));
    }
}

#[test]
fn missing_store_is_not_found() {
    let dir = tempdir().unwrap();
    for backend in [StoreBackend::Lmdb, StoreBackend::Lsm] {
        let err = open_store(backend, &dir.path().join("absent"), OpenMode::Read)
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
