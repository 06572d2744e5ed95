//! # File I/O Module
//!
//! Project file operations:
//! - **Atomic saves**: JSON is written to a `.tmp` sibling, synced, then renamed
//! - **File locking**: an OS lock plus a `.lock` sidecar naming the holder
//! - **Version validation**: files from a newer schema are refused
//!
//! ## Example
//!
//! ```rust,no_run
//! use rebar_core::file_io::{save_project, load_project, FileLock};
//! use rebar_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("beams.rbp");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//! save_project(&project, path).unwrap();
//! drop(lock);
//!
//! let reloaded = load_project(path).unwrap();
//! assert_eq!(reloaded.meta.job_id, "25-001");
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Extension used for project files
pub const PROJECT_EXTENSION: &str = "rbp";

/// Locks older than this are considered abandoned
const STALE_LOCK_HOURS: i64 = 24;

/// Contents of a `.lock` sidecar file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where the lock was taken
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Whether the holder is gone or the lock has simply aged out
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > chrono::Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        #[cfg(target_os = "linux")]
        {
            if hostname().as_deref() == Some(self.machine.as_str()) {
                return !Path::new(&format!("/proc/{}", self.pid)).exists();
            }
        }
        false
    }
}

fn hostname() -> Option<String> {
    let var = if cfg!(windows) { "COMPUTERNAME" } else { "HOSTNAME" };
    std::env::var(var).ok().or_else(|| std::env::var("HOST").ok())
}

/// Exclusive lock on a project file, released on drop.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    /// Holds the OS-level lock for the lifetime of the guard
    _handle: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Errors
    ///
    /// * `CalcError::FileLocked` - another user or process holds the lock
    /// * `CalcError::FileError` - the sidecar could not be written
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);

        if let Some(existing) = Self::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let lock_err = |op: &str, e: std::io::Error| {
            CalcError::file_error(op, lock_path.display().to_string(), e.to_string())
        };

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| lock_err("create lock", e))?;

        handle.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let info = LockInfo::new(user_id);
        let json = serde_json::to_string_pretty(&info).map_err(CalcError::serialization)?;
        handle
            .write_all(json.as_bytes())
            .map_err(|e| lock_err("write lock", e))?;
        handle.sync_all().map_err(|e| lock_err("sync lock", e))?;

        debug!(path = %path.display(), user = %info.user_id, "acquired project lock");

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Return the current holder of a live lock, if any.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path))
            .ok()
            .filter(|info| !info.is_stale())
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_path) {
            warn!(path = %self.lock_path.display(), error = %e, "could not remove lock file");
        }
    }
}

/// `beams.rbp` -> `beams.rbp.lock`
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut name = project_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = fs::read_to_string(lock_path).map_err(|e| {
        CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;
    serde_json::from_str(&contents).map_err(CalcError::serialization)
}

/// Save a project with atomic write semantics.
///
/// # Errors
/// `CalcError::FileError` on any I/O failure; the target is left untouched.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(CalcError::serialization)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let tmp_err = |op: &str, e: std::io::Error| {
        CalcError::file_error(op, tmp_path.display().to_string(), e.to_string())
    };

    let mut tmp_file = File::create(&tmp_path).map_err(|e| tmp_err("create temp file", e))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| tmp_err("write temp file", e))?;
    tmp_file.sync_all().map_err(|e| tmp_err("sync temp file", e))?;
    drop(tmp_file);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CalcError::file_error(
            "rename to final",
            path.display().to_string(),
            e.to_string(),
        ));
    }

    debug!(path = %path.display(), items = project.item_count(), "saved project");
    Ok(())
}

/// Load a project from a file.
///
/// # Errors
///
/// * `CalcError::FileError` - the file cannot be read
/// * `CalcError::SerializationError` - the file is not a valid project
/// * `CalcError::VersionMismatch` - the file uses an incompatible schema
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Load a project and report whether someone else holds its lock.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Major versions must match; while in 0.x the file's minor version may not
/// be newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file = parse(file_version);
    let current = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file.as_slice(), current.as_slice()) {
        ([f_major, ..], [c_major, ..]) if f_major != c_major => Err(mismatch()),
        ([0, f_minor, ..], [0, c_minor, ..]) if f_minor > c_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::bar_layout::{BarLayer, BeamSection};
    use crate::calculations::{BarLayoutInput, CalculationItem};
    use std::env::temp_dir;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("rebar_test_{}_{}.{}", name, std::process::id(), PROJECT_EXTENSION))
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/path/to/beams.rbp"));
        assert_eq!(lock_path, Path::new("/path/to/beams.rbp.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("test@example.com");
        assert_eq!(info.user_id, "test@example.com");
        assert!(info.pid > 0);
        assert!(!info.is_stale());
    }

    #[test]
    fn test_old_lock_is_stale() {
        let mut info = LockInfo::new("someone");
        info.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        assert!(info.is_stale());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let mut project = Project::new("Test Engineer", "TEST-001", "Test Client");
        let id = project.add_item(CalculationItem::BarLayout(BarLayoutInput {
            label: "B-1".to_string(),
            section: BeamSection::new(300.0, 500.0, 30.0, 11.0, 20.0),
            layers: vec![BarLayer::new(1, 25.0, 3)],
        }));
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.get_item(&id), project.get_item(&id));
        assert!(loaded.get_item(&id).unwrap().run().is_ok());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_project_path("atomic");
        save_project(&Project::default(), &path).unwrap();

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_project_path("lock");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.project_path(), path.as_path());
        assert!(lock_path_for(&path).exists());

        let second = FileLock::acquire(&path, "other@example.com");
        assert!(matches!(second, Err(CalcError::FileLocked { .. })));

        drop(lock);
        assert!(!lock_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let path = temp_project_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_project_path("lock_check");
        save_project(&Project::new("Test", "TEST", "Client"), &path).unwrap();

        let (loaded, lock_info) = load_project_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }
}
