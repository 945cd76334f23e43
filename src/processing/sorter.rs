//! Writes original resume files into per-category folders

use crate::error::{CategorizerError, Result};
use crate::processing::category::Category;
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Lays files out as `root/<category label>/<filename>`.
///
/// Directories are created on first use; an existing file with the same name
/// is overwritten. Concurrent writers to the same target race, last write wins.
#[derive(Debug, Default, Clone)]
pub struct FileSorter;

impl FileSorter {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_root(&self, root: &Path) -> Result<()> {
        create_dir(root)
    }

    pub fn store(&self, root: &Path, category: &Category, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let filename = plain_file_name(filename)?;

        self.ensure_root(root)?;
        let category_dir = root.join(category.label());
        create_dir(&category_dir)?;

        let target = category_dir.join(filename);
        std::fs::write(&target, bytes).map_err(|source| CategorizerError::FileSorting {
            path: target.clone(),
            source,
        })?;

        debug!("Stored {} ({} bytes)", target.display(), bytes.len());
        Ok(target)
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|source| CategorizerError::FileSorting {
        path: dir.to_path_buf(),
        source,
    })
}

/// Uploaded names must be a single ordinary path component
fn plain_file_name(filename: &str) -> Result<&Path> {
    let path = Path::new(filename);
    let mut components = path.components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !filename.contains('\\') => Ok(path),
        _ => Err(CategorizerError::InvalidInput(format!(
            "Unsafe upload filename: '{}'",
            filename
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_root_and_category_folder() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("out");

        let target = FileSorter::new()
            .store(&root, &Category::DataScience, "jane.pdf", b"%PDF-1.4")
            .unwrap();

        assert_eq!(target, root.join("Data Science").join("jane.pdf"));
        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.4".to_vec());
    }

    #[test]
    fn test_same_name_overwrites() {
        let dir = TempDir::new().unwrap();
        let sorter = FileSorter::new();

        sorter.store(dir.path(), &Category::Hr, "cv.pdf", b"first").unwrap();
        let target = sorter.store(dir.path(), &Category::Hr, "cv.pdf", b"second").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"second".to_vec());
        let entries = std::fs::read_dir(dir.path().join("HR")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_unknown_category_folder() {
        let dir = TempDir::new().unwrap();
        let target = FileSorter::new()
            .store(dir.path(), &Category::Unrecognized(42), "x.pdf", b"x")
            .unwrap();
        assert_eq!(target, dir.path().join("Unknown").join("x.pdf"));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let sorter = FileSorter::new();

        for name in ["../escape.pdf", "a/b.pdf", "", "..", "/etc/passwd", "a\\b.pdf"] {
            let result = sorter.store(dir.path(), &Category::Sales, name, b"x");
            assert!(matches!(result, Err(CategorizerError::InvalidInput(_))), "{:?}", name);
        }
        assert!(!dir.path().join("Sales").exists());
    }

    #[test]
    fn test_root_blocked_by_file_is_sorting_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let result = FileSorter::new().store(&blocker, &Category::Arts, "a.pdf", b"a");
        assert!(matches!(result, Err(CategorizerError::FileSorting { .. })));
    }
}
