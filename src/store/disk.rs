use crate::store::SnapshotStore;
use anyhow::Result;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;
use tracing::debug;

const SNAPSHOT_KEY: &str = "snapshot";

/// Snapshot persistence backed by a fjall keyspace under the data directory.
pub struct DiskSnapshotStore {
    partition: PartitionHandle,
    keyspace: Keyspace,
}

impl DiskSnapshotStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let keyspace = fjall::Config::new(data_dir.join("cache")).open()?;
        let partition = keyspace.open_partition("rates", PartitionCreateOptions::default())?;
        Ok(Self {
            partition,
            keyspace,
        })
    }
}

impl SnapshotStore for DiskSnapshotStore {
    fn read(&self) -> Option<Vec<u8>> {
        match self.partition.get(SNAPSHOT_KEY) {
            Ok(value) => value.map(|slice| slice.to_vec()),
            Err(e) => {
                debug!(error = %e, "snapshot read failed");
                None
            }
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        self.partition.insert(SNAPSHOT_KEY, bytes)?;
        self.keyspace.persist(fjall::PersistMode::Buffer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disk_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = DiskSnapshotStore::open(dir.path()).unwrap();

        assert!(store.read().is_none());

        store.write(b"first").unwrap();
        assert_eq!(store.read().unwrap(), b"first");

        // Writes replace the previous snapshot wholesale
        store.write(b"second").unwrap();
        assert_eq!(store.read().unwrap(), b"second");
    }

    #[test]
    fn test_disk_store_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = DiskSnapshotStore::open(dir.path()).unwrap();
            store.write(b"persisted").unwrap();
        }

        let reopened = DiskSnapshotStore::open(dir.path()).unwrap();
        assert_eq!(reopened.read().unwrap(), b"persisted");
    }
}
