//! Storage tiers: where a session record can live.
//!
//! Two lifetimes exist. The tab-scoped tier dies with the client process
//! (`MemoryTier`). The persistent tier survives restarts (`FileTier`, or
//! the OS keyring behind the `keyring-store` feature).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use zeroize::Zeroizing;

use crate::errors::{PwVaultError, Result};

/// A string key-value store with one particular lifetime.
pub trait StorageTier {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<Zeroizing<String>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: StorageTier + ?Sized> StorageTier for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn read(&self, key: &str) -> Result<Option<Zeroizing<String>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Tab-scoped tier: in-process memory.
///
/// Clones share the same storage, so a caller can keep a handle and
/// inspect what a `SessionStore` wrote. Dropping every handle is the
/// equivalent of closing the tab.
#[derive(Clone, Default)]
pub struct MemoryTier {
    entries: Rc<RefCell<HashMap<String, Zeroizing<String>>>>,
}

impl MemoryTier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageTier for MemoryTier {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn read(&self, key: &str) -> Result<Option<Zeroizing<String>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), Zeroizing::new(value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Persistent tier: one JSON file per key inside a directory.
///
/// Writes are atomic (temp file + rename) and the file is owner-only
/// on Unix.
#[derive(Debug, Clone)]
pub struct FileTier {
    dir: PathBuf,
}

impl FileTier {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageTier for FileTier {
    fn name(&self) -> &'static str {
        "file"
    }

    fn read(&self, key: &str) -> Result<Option<Zeroizing<String>>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(Zeroizing::new(contents))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PwVaultError::SessionStorage(format!(
                "failed to read {}: {e}",
                self.path_for(key).display()
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".{key}.json.tmp"));

        let written = write_private(&tmp_path, value).and_then(|()| fs::rename(&tmp_path, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(PwVaultError::SessionStorage(format!(
                "failed to write {}: {e}",
                path.display()
            )));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PwVaultError::SessionStorage(format!(
                "failed to remove {}: {e}",
                self.path_for(key).display()
            ))),
        }
    }
}

/// Write `contents` to a new owner-only file at `path`.
///
/// The mode is set at creation, so the file is never readable by others.
/// A stale file left at `path` is replaced.
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
