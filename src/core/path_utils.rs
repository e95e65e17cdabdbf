/*
 * Resolves the per-user directories the application persists into. Both the
 * configuration file and the default key-value storage live under the local
 * (non-roaming) config directory reported by `ProjectDirs`.
 */
use directories::ProjectDirs;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const STORAGE_SUBFOLDER_NAME: &str = "storage";

/*
 * Makes sure `dir` exists, creating it and any missing parents. Returns `None`
 * (after logging) when the directory cannot be created.
 */
pub fn ensure_dir(dir: &Path) -> Option<PathBuf> {
    if dir.exists() {
        log::trace!("PathUtils: Directory already exists: {dir:?}");
        return Some(dir.to_path_buf());
    }
    match fs::create_dir_all(dir) {
        Ok(()) => {
            log::debug!("PathUtils: Created directory: {dir:?}");
            Some(dir.to_path_buf())
        }
        Err(e) => {
            log::error!("PathUtils: Failed to create directory {dir:?}: {e}");
            None
        }
    }
}

/*
 * Retrieves the application's local configuration directory, creating it if
 * necessary. Returns `None` when no home directory can be determined or the
 * directory cannot be created.
 */
pub fn get_base_app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    log::trace!("PathUtils: Resolving base app config local dir for '{app_name}'");
    let proj_dirs = ProjectDirs::from("", "", app_name)?;
    ensure_dir(proj_dirs.config_local_dir())
}

/*
 * Picks the directory backing the durable store: the explicit override when
 * configured, otherwise a `storage` folder inside the app's config directory.
 */
pub fn resolve_storage_dir(app_name: &str, override_dir: Option<&Path>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) => ensure_dir(dir),
        None => {
            let base = get_base_app_config_local_dir(app_name)?;
            ensure_dir(&base.join(STORAGE_SUBFOLDER_NAME))
        }
    }
}

/* The staging file `write_atomically` writes before renaming it over `path`. */
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/*
 * Replaces the contents of `path` with `contents`. The bytes go to a sibling
 * staging file, are synced, and the staging file is then renamed over `path`,
 * so a failed or interrupted write leaves the previous contents in place.
 */
pub fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(path);
    let result = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));
    if let Err(e) = &result {
        log::warn!("PathUtils: Atomic write of {path:?} failed: {e}");
        if let Err(cleanup_err) = fs::remove_file(&temp_path) {
            if cleanup_err.kind() != io::ErrorKind::NotFound {
                log::warn!("PathUtils: Could not remove staging file {temp_path:?}: {cleanup_err}");
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_creates_nested_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let created = ensure_dir(&nested);

        assert_eq!(created, Some(nested.clone()));
        assert!(nested.is_dir());
    }

    #[test]
    fn test_resolve_storage_dir_prefers_override() {
        let dir = tempdir().unwrap();
        let override_dir = dir.path().join("custom_storage");

        let resolved = resolve_storage_dir("IgnoredApp", Some(&override_dir));

        assert_eq!(resolved, Some(override_dir));
    }

    #[test]
    fn test_write_atomically_replaces_contents_and_leaves_no_staging_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("value.json");
        fs::write(&path, b"old").unwrap();

        write_atomically(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!temp_path_for(&path).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomically_reports_full_disk_and_keeps_old_contents() {
        let dev_full = Path::new("/dev/full");
        if !dev_full.exists() {
            return;
        }
        let dir = tempdir().unwrap();
        let path = dir.path().join("value.json");
        fs::write(&path, b"old").unwrap();
        std::os::unix::fs::symlink(dev_full, temp_path_for(&path)).unwrap();

        let result = write_atomically(&path, b"new");

        assert!(result.is_err());
        assert_eq!(fs::read(&path).unwrap(), b"old");
    }

    #[test]
    fn test_get_base_app_config_local_dir_contains_app_name() {
        let unique_app_name = format!("TestApp_PathUtils_{}", rand::random::<u64>());

        let Some(path) = get_base_app_config_local_dir(&unique_app_name) else {
            // No home directory in this environment; nothing to verify.
            return;
        };

        assert!(path.is_dir());
        assert!(
            path.to_string_lossy()
                .to_lowercase()
                .contains(&unique_app_name.to_lowercase()),
            "Path should contain the app name. Path: {path:?}"
        );

        if let Err(e) = fs::remove_dir_all(&path) {
            eprintln!("Test cleanup failed for {path:?}: {e}");
        }
    }
}
