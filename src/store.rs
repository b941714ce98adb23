// Last-selected source persistence
//
// The pipeline itself is stateless; the previously selected source is an
// explicit caller input. This store is the single piece of process-external
// state: read once at startup to skip straight to listing, overwritten
// whenever a new source is confirmed.

use std::fs;
use std::path::PathBuf;

use crate::pipeline::errors::PipelineError;
use crate::pipeline::models::ContentSource;

pub trait SelectionStore {
    /// The previously confirmed source, if any
    fn load(&self) -> Result<Option<ContentSource>, PipelineError>;

    fn save(&self, source: &ContentSource) -> Result<(), PipelineError>;
}

/// Stores the selection as a flat JSON record on disk
pub struct FileSelectionStore {
    path: PathBuf,
}

impl FileSelectionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the user configuration directory
    pub fn default_location() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tunelist");
        Self::new(dir.join("last_source.json"))
    }
}

impl SelectionStore for FileSelectionStore {
    fn load(&self) -> Result<Option<ContentSource>, PipelineError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let source = serde_json::from_str(&contents).map_err(|e| {
                    PipelineError::Storage(format!("corrupt selection record: {}", e))
                })?;
                Ok(Some(source))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PipelineError::Storage(e.to_string())),
        }
    }

    fn save(&self, source: &ContentSource) -> Result<(), PipelineError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::Storage(e.to_string()))?;
        }
        let json =
            serde_json::to_string_pretty(source).map_err(|e| PipelineError::Storage(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| PipelineError::Storage(e.to_string()))
    }
}
