use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, TaskflowError};
use crate::store::lock::KeyLock;
use crate::store::storage::Storage;

pub const DATA_DIR: &str = ".taskflow";

/// File-backed key-value storage rooted at a `.taskflow` directory.
///
/// On-disk layout:
///   - `config.json`      settings
///   - `{key}.json`       one document per key
///   - `{key}.lock`       advisory write lock for that key
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open an existing .taskflow directory under `base`.
    pub fn open(base: &Path) -> Result<Self> {
        let root = base.join(DATA_DIR);
        if !Config::path(&root).exists() {
            return Err(TaskflowError::NotInitialized);
        }
        Ok(Self { root })
    }

    /// Create a new .taskflow directory under `base` with default settings.
    pub fn init(base: &Path) -> Result<Self> {
        let root = base.join(DATA_DIR);
        if Config::path(&root).exists() {
            return Err(TaskflowError::AlreadyInitialized);
        }
        fs::create_dir_all(&root)?;
        Config::default().save(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.lock"))
    }
}

fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid storage key '{key}'"),
        )
        .into())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        let _lock = KeyLock::acquire(&self.lock_path(key))?;

        // Write-then-rename so readers never observe a half-written document.
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.value_path(key))?;
        debug!(key, path = %self.value_path(key).display(), "wrote document");
        Ok(())
    }
}
