use crate::store::SnapshotStore;
use anyhow::Result;
use std::sync::Mutex;

/// Process-local snapshot store. Used by tests and as a fallback when the disk
/// store is unavailable.
#[derive(Default)]
pub struct MemorySnapshotStore {
    inner: Mutex<Option<Vec<u8>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self) -> Option<Vec<u8>> {
        self.inner.lock().unwrap().clone()
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        *self.inner.lock().unwrap() = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySnapshotStore::new();
        assert!(store.read().is_none());

        store.write(b"bytes").unwrap();
        assert_eq!(store.read().unwrap(), b"bytes");
    }
}
