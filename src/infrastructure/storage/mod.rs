//! File-based storage implementation

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::application::errors::StorageError;
use crate::domain::entities::MonitorState;
use crate::domain::traits::ConfigStore;

/// JSON file-based store for the monitor state
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<MonitorState, StorageError> {
        let file = File::open(&self.path)?;
        let state = serde_json::from_reader(BufReader::new(file))?;
        Ok(state)
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> MonitorState {
        match self.read() {
            Ok(state) => {
                tracing::info!("Loaded monitor state from {}", self.path.display());
                state
            }
            Err(StorageError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No state file at {}, writing defaults", self.path.display());
                let state = MonitorState::default();
                if let Err(e) = self.save(&state) {
                    tracing::error!("Failed to write default state: {}", e);
                }
                state
            }
            Err(e) => {
                // the file is left alone so it can be repaired by hand
                tracing::error!("Failed to load state from {}: {}", self.path.display(), e);
                MonitorState::default()
            }
        }
    }

    fn save(&self, state: &MonitorState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, state)?;
        writer.flush()?;

        tracing::info!("Monitor state saved to {}", self.path.display());
        Ok(())
    }
}
