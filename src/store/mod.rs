pub mod disk;
pub mod memory;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Durable storage for a single serialized rate snapshot.
pub trait SnapshotStore: Send + Sync {
    /// Returns the stored snapshot bytes, or `None` when nothing was persisted
    /// yet or the store cannot be read.
    fn read(&self) -> Option<Vec<u8>>;

    /// Overwrites any prior snapshot.
    fn write(&self, bytes: &[u8]) -> Result<()>;
}

/// Opens the disk-backed store under `data_dir`. When the keyspace cannot be
/// opened (read-only filesystem, concurrent instance holding the lock) the app
/// keeps working against a process-local store instead.
pub fn open_or_memory(data_dir: &Path) -> Arc<dyn SnapshotStore> {
    match disk::DiskSnapshotStore::open(data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "falling back to in-memory snapshot store");
            Arc::new(memory::MemorySnapshotStore::new())
        }
    }
}
