//! JSON file export/import with debounced auto-save.
//!
//! The active file is chosen by the first successful export or import and
//! kept for the lifetime of the [`FileExchange`]. Auto-saves go to that file.

pub mod handle;

pub use handle::{FileHandle, FilePicker, LocalFile, NoPicker, PathPicker, PickerOptions};

use crate::analysis::model::StrategicData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Quiet period before an auto-save is written.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOutcome {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub data: Option<StrategicData>,
}

struct PendingSave {
    generation: u64,
    contents: String,
    timer: JoinHandle<()>,
}

#[derive(Default)]
struct ExchangeState {
    active: Option<Arc<dyn FileHandle>>,
    pending: Option<PendingSave>,
    generation: u64,
}

impl ExchangeState {
    fn cancel_pending(&mut self) -> Option<String> {
        self.pending.take().map(|pending| {
            pending.timer.abort();
            pending.contents
        })
    }
}

/// Export/import adapter owning the active file and the auto-save timer.
pub struct FileExchange {
    picker: Arc<dyn FilePicker>,
    options: PickerOptions,
    debounce: Duration,
    state: Arc<Mutex<ExchangeState>>,
}

impl FileExchange {
    pub fn new(picker: Arc<dyn FilePicker>) -> Self {
        Self {
            picker,
            options: PickerOptions::default(),
            debounce: AUTOSAVE_DEBOUNCE,
            state: Arc::new(Mutex::new(ExchangeState::default())),
        }
    }

    pub fn with_options(mut self, options: PickerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    fn state(&self) -> MutexGuard<'_, ExchangeState> {
        lock_state(&self.state)
    }

    pub fn has_active_file(&self) -> bool {
        self.state().active.is_some()
    }

    pub fn active_file(&self) -> Option<Arc<dyn FileHandle>> {
        self.state().active.clone()
    }

    pub fn active_file_name(&self) -> Option<String> {
        self.state().active.as_ref().map(|h| h.name())
    }

    /// Use `handle` as the active file, e.g. one remembered from an earlier run.
    pub fn set_active_file(&self, handle: Arc<dyn FileHandle>) {
        debug!(file = %handle.name(), "Active file set");
        self.state().active = Some(handle);
    }

    /// Write `data` to the active file, asking for one if none is set.
    pub async fn export_to_file(&self, data: &StrategicData) -> ExportOutcome {
        let handle = match self.active_file() {
            Some(handle) => handle,
            None => match self.picker.pick_save(&self.options).await {
                Ok(Some(handle)) => handle,
                Ok(None) => {
                    info!("Export cancelled");
                    return ExportOutcome { success: false };
                }
                Err(e) => {
                    error!(error = %e, "Error choosing export destination");
                    return ExportOutcome { success: false };
                }
            },
        };

        let contents = match data.to_json_pretty() {
            Ok(contents) => contents,
            Err(e) => {
                error!(error = %e, "Error serializing analysis");
                return ExportOutcome { success: false };
            }
        };

        // A queued auto-save holds an older snapshot.
        self.state().cancel_pending();

        if let Err(e) = handle.write_all(&contents).await {
            error!(file = %handle.name(), error = %e, "Error saving file");
            return ExportOutcome { success: false };
        }

        info!(file = %handle.name(), "Analysis exported");
        self.state().active = Some(handle);
        ExportOutcome { success: true }
    }

    /// Ask for a JSON file, parse it, and make it the active file.
    pub async fn import_from_file(&self) -> ImportOutcome {
        let handle = match self.picker.pick_open(&self.options).await {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                info!("Import cancelled");
                return ImportOutcome { data: None };
            }
            Err(e) => {
                error!(error = %e, "Error choosing import source");
                return ImportOutcome { data: None };
            }
        };

        let contents = match handle.read_to_string().await {
            Ok(contents) => contents,
            Err(e) => {
                error!(file = %handle.name(), error = %e, "Error loading file");
                return ImportOutcome { data: None };
            }
        };

        match StrategicData::from_json(&contents) {
            Ok(data) => {
                info!(file = %handle.name(), "Analysis imported");
                let mut state = self.state();
                state.cancel_pending();
                state.active = Some(handle);
                ImportOutcome { data: Some(data) }
            }
            Err(e) => {
                error!(file = %handle.name(), error = %e, "Error parsing file");
                ImportOutcome { data: None }
            }
        }
    }

    /// Schedule a write of `data` to the active file.
    ///
    /// Does nothing until a file has been exported to or imported from. Each
    /// call replaces the pending snapshot and restarts the quiet period.
    /// Must be called from within a tokio runtime.
    pub fn auto_save(&self, data: &StrategicData) {
        if !self.has_active_file() {
            return;
        }

        let contents = match data.to_json_pretty() {
            Ok(contents) => contents,
            Err(e) => {
                error!(error = %e, "Error serializing analysis for auto-save");
                return;
            }
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!("Auto-save skipped: no async runtime");
                return;
            }
        };

        let mut state = self.state();
        state.cancel_pending();
        state.generation += 1;
        let generation = state.generation;

        let shared = Arc::clone(&self.state);
        let debounce = self.debounce;
        let timer = runtime.spawn(async move {
            tokio::time::sleep(debounce).await;
            write_pending(shared, generation).await;
        });

        state.pending = Some(PendingSave {
            generation,
            contents,
            timer,
        });
        debug!(generation, "Auto-save scheduled");
    }

    pub fn has_pending_save(&self) -> bool {
        self.state().pending.is_some()
    }

    /// Write the pending auto-save now. Returns whether a snapshot was written.
    pub async fn flush(&self) -> bool {
        let (contents, handle) = {
            let mut state = self.state();
            let Some(contents) = state.cancel_pending() else {
                return false;
            };
            let Some(handle) = state.active.clone() else {
                return false;
            };
            (contents, handle)
        };

        match handle.write_all(&contents).await {
            Ok(()) => {
                info!(file = %handle.name(), "Auto-save flushed");
                true
            }
            Err(e) => {
                error!(file = %handle.name(), error = %e, "Error flushing auto-save");
                false
            }
        }
    }
}

impl Drop for FileExchange {
    fn drop(&mut self) {
        if self.state().cancel_pending().is_some() {
            warn!("Discarding unsaved auto-save snapshot");
        }
    }
}

fn lock_state(state: &Mutex<ExchangeState>) -> MutexGuard<'_, ExchangeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn write_pending(shared: Arc<Mutex<ExchangeState>>, generation: u64) {
    let (contents, handle) = {
        let mut state = lock_state(&shared);
        if state.pending.as_ref().map(|p| p.generation) != Some(generation) {
            return;
        }
        let Some(pending) = state.pending.take() else {
            return;
        };
        let Some(handle) = state.active.clone() else {
            return;
        };
        (pending.contents, handle)
    };

    match handle.write_all(&contents).await {
        Ok(()) => info!(file = %handle.name(), "Auto-saved successfully"),
        Err(e) => error!(file = %handle.name(), error = %e, "Error auto-saving"),
    }
}
