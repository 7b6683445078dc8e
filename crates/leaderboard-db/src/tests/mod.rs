use crate::RecordStore;

/// A store inside a fresh temp dir. Keep the `TempDir` alive for the test.
fn test_store() -> (tempfile::TempDir, RecordStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = RecordStore::open(dir.path().join("users.json"));
    (dir, store)
}
