//! File destinations and the pickers that choose them.

use crate::error::StrataResult;
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A readable, writable file chosen by the user.
#[async_trait]
pub trait FileHandle: Debug + Send + Sync {
    /// Display name of the file.
    fn name(&self) -> String;

    /// Filesystem path, when the handle has one.
    fn path(&self) -> Option<&Path> {
        None
    }

    async fn read_to_string(&self) -> std::io::Result<String>;

    /// Replace the whole file with `contents`.
    async fn write_all(&self, contents: &str) -> std::io::Result<()>;
}

/// A file on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FileHandle for LocalFile {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    async fn read_to_string(&self) -> std::io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }

    async fn write_all(&self, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, contents).await
    }
}

/// What a picker should offer the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    pub suggested_name: String,
    pub description: String,
    pub mime_type: String,
    pub extension: String,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            suggested_name: "strategic-analysis.json".to_string(),
            description: "JSON File".to_string(),
            mime_type: "application/json".to_string(),
            extension: ".json".to_string(),
        }
    }
}

impl PickerOptions {
    pub fn with_suggested_name(mut self, name: impl Into<String>) -> Self {
        self.suggested_name = name.into();
        self
    }
}

/// Asks the user for a destination or source file.
///
/// `Ok(None)` means the user cancelled.
#[async_trait]
pub trait FilePicker: Send + Sync {
    async fn pick_save(&self, options: &PickerOptions) -> StrataResult<Option<Arc<dyn FileHandle>>>;

    async fn pick_open(&self, options: &PickerOptions) -> StrataResult<Option<Arc<dyn FileHandle>>>;
}

/// Picker that always answers with a fixed path.
#[derive(Debug, Clone)]
pub struct PathPicker {
    path: PathBuf,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FilePicker for PathPicker {
    async fn pick_save(&self, _options: &PickerOptions) -> StrataResult<Option<Arc<dyn FileHandle>>> {
        Ok(Some(Arc::new(LocalFile::new(self.path.clone()))))
    }

    async fn pick_open(&self, _options: &PickerOptions) -> StrataResult<Option<Arc<dyn FileHandle>>> {
        Ok(Some(Arc::new(LocalFile::new(self.path.clone()))))
    }
}

/// Picker for sessions with no way to ask; every request is a cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPicker;

#[async_trait]
impl FilePicker for NoPicker {
    async fn pick_save(&self, _options: &PickerOptions) -> StrataResult<Option<Arc<dyn FileHandle>>> {
        Ok(None)
    }

    async fn pick_open(&self, _options: &PickerOptions) -> StrataResult<Option<Arc<dyn FileHandle>>> {
        Ok(None)
    }
}
