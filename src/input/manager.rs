//! Collects uploads from local paths for the command-line batch

use crate::error::{CategorizerError, Result};
use crate::processing::document::UploadedDocument;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

pub struct InputManager {
    recursive: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self { recursive: true }
    }

    pub fn with_recursion(mut self, enable: bool) -> Self {
        self.recursive = enable;
        self
    }

    /// Read every file named by `paths` into an upload, in argument order.
    ///
    /// Directories contribute their files sorted by path. Every file is read,
    /// whatever its extension: the orchestrator decides what to skip.
    pub async fn collect(&self, paths: &[PathBuf]) -> Result<Vec<UploadedDocument>> {
        let mut uploads = Vec::new();

        for path in paths {
            if !path.exists() {
                return Err(CategorizerError::InvalidInput(format!(
                    "File does not exist: {}",
                    path.display()
                )));
            }

            if path.is_dir() {
                let files = self.list_directory(path);
                info!("Found {} files under {}", files.len(), path.display());
                for file in files {
                    uploads.push(self.read_upload(&file).await?);
                }
            } else {
                uploads.push(self.read_upload(path).await?);
            }
        }

        Ok(uploads)
    }

    fn list_directory(&self, dir: &Path) -> Vec<PathBuf> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();
        files.sort();
        files
    }

    async fn read_upload(&self, path: &Path) -> Result<UploadedDocument> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                CategorizerError::InvalidInput(format!("Path has no file name: {}", path.display()))
            })?;

        debug!("Reading {}", path.display());
        let bytes = fs::read(path).await?;

        Ok(UploadedDocument::new(filename, bytes))
    }
}
