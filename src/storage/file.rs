//! JSON-file-based store backend.
//!
//! Stores each key in its own file under a configurable directory
//! (default: `$XDG_DATA_HOME/cartstash/`). This is the desktop
//! equivalent of a browser's per-origin local storage: durable across
//! sessions, scoped to one user, and safe to lose.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{CartStashError, Result};

/// Application name used for the XDG data directory.
const APP_NAME: &str = "cartstash";

/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "store.lock";

/// File-backed store persisting each key as a `<key>.json` file.
///
/// # Concurrency
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]. Cross-process safety is achieved via an advisory file
/// lock on `store.lock` (using [`std::fs::File::lock`] /
/// [`std::fs::File::lock_shared`]). Read operations acquire a shared
/// lock, write operations an exclusive one. Two processes writing the
/// same key still race with last-write-wins; the lock only keeps
/// individual reads and writes from interleaving.
///
/// # Keys
///
/// Keys name files, so they are restricted to ASCII alphanumerics,
/// `-`, `_` and `.`; anything else is rejected with a storage error.
#[derive(Debug)]
pub struct FileStore {
    /// Root directory containing all value files.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileStore {
    /// Creates a new file store rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist. Also
    /// opens (or creates) the `store.lock` sentinel file used for
    /// cross-process advisory locking.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the lock
    /// file cannot be opened.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(storage_io_error)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        })
    }

    /// Returns the default XDG-compliant data directory for this
    /// application.
    ///
    /// On Linux: `$XDG_DATA_HOME/cartstash/` (typically
    /// `~/.local/share/cartstash/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be
    /// determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                CartStashError::Storage("could not determine platform data directory".into())
            })
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Returns the full path for a given key's value file.
    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Rejects keys that would not map to a safe file name.
    fn validate_key(key: &str) -> Result<()> {
        let safe = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        if safe {
            Ok(())
        } else {
            Err(CartStashError::Storage(
                format!("invalid storage key {key:?}").into(),
            ))
        }
    }

    /// Acquires an in-process mutex guard and a shared (read) file
    /// lock, executes `op`, then releases the file lock.
    fn with_shared_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock_shared().map_err(storage_io_error)?;
        let result = op();
        // Only surface the unlock error when the operation succeeded;
        // otherwise the original error is more useful.
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Acquires an in-process mutex guard and an exclusive (write)
    /// file lock, executes `op`, then releases the file lock.
    fn with_exclusive_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock().map_err(storage_io_error)?;
        let result = op();
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Reads a key's value file. Returns `None` if the file does not
    /// exist.
    fn read_value(&self, key: &str) -> Result<Option<String>> {
        Self::validate_key(key)?;
        self.with_shared_lock(|| match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_io_error(err)),
        })
    }

    /// Atomically writes a key's value file (write-to-tmp then
    /// rename).
    fn write_value(&self, key: &str, value: &str) -> Result<()> {
        Self::validate_key(key)?;
        self.with_exclusive_lock(|| {
            let path = self.path(key);
            let tmp_path = self.dir.join(format!("{key}.json.tmp"));
            fs::write(&tmp_path, value).map_err(storage_io_error)?;
            fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
            Ok(())
        })
    }

    /// Deletes a key's value file. Absent files are not an error.
    fn remove_value(&self, key: &str) -> Result<()> {
        Self::validate_key(key)?;
        self.with_exclusive_lock(|| match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_io_error(err)),
        })
    }

    /// Checks whether a key's value file exists.
    fn contains_value(&self, key: &str) -> Result<bool> {
        Self::validate_key(key)?;
        self.with_shared_lock(|| self.path(key).try_exists().map_err(storage_io_error))
    }
}

// ── Free-standing helpers ───────────────────────────────────────────────

/// Wraps an I/O error into a [`CartStashError::Storage`].
fn storage_io_error(err: std::io::Error) -> CartStashError {
    CartStashError::Storage(Box::new(err))
}

/// Wraps a mutex poison error into a [`CartStashError::Storage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> CartStashError {
    CartStashError::Storage(err.to_string().into())
}

// ── BlockingKeyValueStore implementation ────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingKeyValueStore for FileStore {
    #[inline]
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.read_value(key)
    }

    #[inline]
    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.write_value(key, value)
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<()> {
        self.remove_value(key)
    }

    #[inline]
    fn contains(&self, key: &str) -> Result<bool> {
        self.contains_value(key)
    }
}

// ── KeyValueStore (async) implementation ────────────────────────────────

#[cfg(feature = "async")]
impl super::KeyValueStore for FileStore {
    #[inline]
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send {
        core::future::ready(self.read_value(key))
    }

    #[inline]
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.write_value(key, value))
    }

    #[inline]
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.remove_value(key))
    }

    #[inline]
    fn contains(&self, key: &str) -> impl Future<Output = Result<bool>> + Send {
        core::future::ready(self.contains_value(key))
    }
}
