use crate::application::errors::StorageError;
use crate::domain::entities::MonitorState;

/// Persistence of the monitor state
pub trait ConfigStore: Send + Sync {
    /// Never fails: a missing or unreadable record yields the built-in defaults
    fn load(&self) -> MonitorState;

    /// Whole-record overwrite
    fn save(&self, state: &MonitorState) -> Result<(), StorageError>;
}
