//! Common file system operations with unified error handling

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::fs::{read_error, write_error};
use crate::error::{Result, file_delete_failed, file_move_failed};

/// Create `path` and all missing parents
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(write_error(path))
}

/// Move `from` to `to`, replacing any file already at `to`
///
/// Running the same move twice with identical content leaves the same
/// result, which is what makes content-addressed renames re-runnable.
pub fn replace_file(from: &Path, to: &Path) -> Result<()> {
    if from == to {
        return Ok(());
    }
    if to.exists() {
        remove_file(to)?;
    }
    fs::rename(from, to).map_err(|e| {
        file_move_failed(
            from.display().to_string(),
            to.display().to_string(),
            e.to_string(),
        )
    })
}

/// Copy `from` to `to`, overwriting `to`
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(|e| {
        file_move_failed(
            from.display().to_string(),
            to.display().to_string(),
            e.to_string(),
        )
    })?;
    Ok(())
}

/// Delete a single file
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path)
        .map_err(|e| file_delete_failed(path.display().to_string(), e.to_string()))
}

/// Write `contents` to `path` through a temporary sibling file
///
/// Readers either see the previous file or the complete new one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir).map_err(write_error(path))?;
    temp.write_all(contents).map_err(write_error(path))?;
    temp.as_file().sync_all().map_err(write_error(path))?;
    temp.persist(path).map_err(|e| write_error(path)(e.error))?;
    Ok(())
}

/// Regular files directly inside `dir`, sorted by name
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error(dir))? {
        let entry = entry.map_err(read_error(dir))?;
        if entry.file_type().map_err(read_error(dir))?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Copy a directory recursively
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    ensure_dir(dst)?;

    for entry in fs::read_dir(src).map_err(read_error(src))? {
        let entry = entry.map_err(read_error(src))?;
        let entry_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if entry_path.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path)?;
        } else {
            copy_file(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_replace_file_overwrites_target() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("ui_icons");
        let to = temp.path().join("ui_icons_abc.bundle");
        fs::write(&from, "new").unwrap();
        fs::write(&to, "old").unwrap();

        replace_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "new");
    }

    #[test]
    fn test_replace_file_missing_source() {
        let temp = TempDir::new().unwrap();
        let result = replace_file(&temp.path().join("nope"), &temp.path().join("dest"));
        assert!(matches!(
            result,
            Err(crate::error::BundleKitError::FileMoveFailed { .. })
        ));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manifest.json");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(list_files(temp.path()).unwrap(), vec![path]);
    }

    #[test]
    fn test_list_files_skips_directories() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let files = list_files(temp.path()).unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("a.txt"), temp.path().join("b.txt")]
        );
    }

    #[test]
    fn test_copy_dir_recursive() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("top.txt"), "top").unwrap();
        fs::write(src.join("nested/inner.txt"), "inner").unwrap();

        let dst = temp.path().join("dst");
        copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("top.txt")).unwrap(), "top");
        assert_eq!(
            fs::read_to_string(dst.join("nested/inner.txt")).unwrap(),
            "inner"
        );
    }
}
