use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use chrono::Local;
use log::warn;
use serde::Serialize;

// @module: Per-run debug artifact logging
//
// Artifact writes are best-effort; a failed write is logged and never fails
// the pipeline.

/// Session-scoped debug artifact writer
#[derive(Debug, Clone)]
pub struct SessionLogger {
    /// Timestamp-derived session identifier
    session_id: String,

    /// Directory holding this session's artifacts
    session_dir: PathBuf,
}

impl SessionLogger {
    /// Create a new session directory under the debug root
    pub fn create<P: AsRef<Path>>(debug_root: P) -> Result<Self> {
        let session_id = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let session_dir = debug_root.as_ref().join(&session_id);

        fs::create_dir_all(&session_dir)
            .with_context(|| format!("Failed to create session directory: {}", session_dir.display()))?;

        Ok(SessionLogger { session_id, session_dir })
    }

    /// The session identifier
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The session artifact directory
    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    /// Write one artifact file into the session directory
    pub fn record(&self, filename: &str, content: &str) {
        let path = self.session_dir.join(filename);
        if let Err(e) = fs::write(&path, content) {
            warn!("Could not save debug artifact {}: {}", path.display(), e);
        }
    }

    /// Write one artifact as pretty-printed JSON
    pub fn record_json<T: Serialize>(&self, filename: &str, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => self.record(filename, &json),
            Err(e) => warn!("Could not serialize debug artifact {}: {}", filename, e),
        }
    }
}
