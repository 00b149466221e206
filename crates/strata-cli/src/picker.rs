//! Terminal file picker: asks for a path on the prompt.

use async_trait::async_trait;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::path::PathBuf;
use std::sync::Arc;
use strata_core::exchange::{FileHandle, FilePicker, LocalFile, PickerOptions};
use strata_core::{StrataError, StrataResult};

/// Prompts for a file path. An empty answer cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptPicker;

impl PromptPicker {
    async fn ask(prompt: String, initial: String, extension: String) -> StrataResult<Option<PathBuf>> {
        let answer = tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .with_initial_text(initial)
                .allow_empty(true)
                .interact_text()
        })
        .await
        .map_err(|e| StrataError::Io(std::io::Error::other(e)))?
        .map_err(|e| StrataError::Io(std::io::Error::other(e)))?;

        normalize_answer(&answer, &extension)
            .map(std::path::absolute)
            .transpose()
            .map_err(StrataError::Io)
    }
}

/// Trim the answer and append `extension` when it is missing.
fn normalize_answer(answer: &str, extension: &str) -> Option<PathBuf> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }
    if answer.to_lowercase().ends_with(&extension.to_lowercase()) {
        Some(PathBuf::from(answer))
    } else {
        Some(PathBuf::from(format!("{}{}", answer, extension)))
    }
}

#[async_trait]
impl FilePicker for PromptPicker {
    async fn pick_save(&self, options: &PickerOptions) -> StrataResult<Option<Arc<dyn FileHandle>>> {
        let picked = Self::ask(
            format!("Save as ({})", options.description),
            options.suggested_name.clone(),
            options.extension.clone(),
        )
        .await?;
        Ok(picked.map(|path| Arc::new(LocalFile::new(path)) as Arc<dyn FileHandle>))
    }

    async fn pick_open(&self, options: &PickerOptions) -> StrataResult<Option<Arc<dyn FileHandle>>> {
        let picked = Self::ask(
            format!("Open ({})", options.description),
            String::new(),
            options.extension.clone(),
        )
        .await?;
        Ok(picked.map(|path| Arc::new(LocalFile::new(path)) as Arc<dyn FileHandle>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_cancels() {
        assert_eq!(normalize_answer("", ".json"), None);
        assert_eq!(normalize_answer("   ", ".json"), None);
    }

    #[test]
    fn test_extension_is_appended_once() {
        assert_eq!(normalize_answer("plan", ".json"), Some(PathBuf::from("plan.json")));
        assert_eq!(normalize_answer(" plan.JSON ", ".json"), Some(PathBuf::from("plan.JSON")));
    }
}
