use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Raw durable key -> payload storage. Holds opaque text; parsing into
/// records happens one layer up, in the repository.
///
/// All operations are synchronous and complete before returning. Two
/// processes sharing the same backing store can still race each other's
/// read-modify-write cycles; single-writer use is assumed.
pub trait RecordStore {
    /// The stored payload for `key`, or `None` if the key has never been
    /// written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload for `key`. A subsequent `get` in this process
    /// observes either the old payload or the new one, never a partial
    /// write.
    fn set(&self, key: &str, payload: &str) -> Result<()>;
}

/// File-backed store: one `<key>.json` file per collection under a data
/// directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl RecordStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, payload: &str) -> Result<()> {
        // Write to a sibling temp file, then rename over the target, so a
        // crash mid-write never leaves a truncated collection behind.
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(payload.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &target)?;
        Ok(())
    }
}

/// In-memory store used to exercise the repository in tests.
#[cfg(test)]
pub(crate) struct MemoryStore {
    cells: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            cells: std::cell::RefCell::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(test)]
impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cells.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, payload: &str) -> Result<()> {
        self.cells.borrow_mut().insert(key.into(), payload.into());
        Ok(())
    }
}
