//! In-process key-value storage.
//!
//! Used for tests and ephemeral sessions. Failure injection lets callers
//! exercise the error paths of code built on `KvStorage`.

use super::{KvError, KvResult, KvStorage};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryKvStorage {
    items: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryKvStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get_item` fail until reset.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Makes every subsequent `set_item` fail until reset.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Raw stored value, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl KvStorage for MemoryKvStorage {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        if self.fail_reads {
            return Err(KvError::Unavailable(format!("read of `{key}` refused")));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()> {
        if self.fail_writes {
            return Err(KvError::Unavailable(format!("write of `{key}` refused")));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
