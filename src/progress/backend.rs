//! Persistence backends for the progress store.

use super::types::{PersistedEnvelope, STORAGE_KEY, STORAGE_VERSION};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// Where the persisted envelope lives
pub trait ProgressBackend {
    /// Saved envelope, or None when nothing has been saved yet
    fn load(&self) -> Result<Option<PersistedEnvelope>>;

    fn save(&mut self, envelope: &PersistedEnvelope) -> Result<()>;
}

/// Keeps the last saved envelope in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    saved: Option<PersistedEnvelope>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Option<&PersistedEnvelope> {
        self.saved.as_ref()
    }
}

/// Drop envelopes written under another storage version
fn current_version(envelope: PersistedEnvelope, source: &str) -> Option<PersistedEnvelope> {
    if envelope.version != STORAGE_VERSION {
        warn!(
            source,
            found = envelope.version,
            expected = STORAGE_VERSION,
            "Ignoring saved progress with unsupported version"
        );
        return None;
    }
    Some(envelope)
}

impl ProgressBackend for MemoryBackend {
    fn load(&self) -> Result<Option<PersistedEnvelope>> {
        Ok(self
            .saved
            .clone()
            .and_then(|envelope| current_version(envelope, "memory")))
    }

    fn save(&mut self, envelope: &PersistedEnvelope) -> Result<()> {
        self.saved = Some(envelope.clone());
        Ok(())
    }
}

/// One JSON file, `labverse-storage.json`, inside a caller-chosen directory
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create storage directory: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            path: dir.join(format!("{STORAGE_KEY}.json")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<PersistedEnvelope>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read progress file: {}", self.path.display()))?;
        let envelope: PersistedEnvelope = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse progress file: {}", self.path.display()))?;

        Ok(current_version(envelope, &self.path.display().to_string()))
    }

    /// Writes a sibling temp file and renames it over the progress file, so a
    /// reader sees either the previous or the new state.
    fn save(&mut self, envelope: &PersistedEnvelope) -> Result<()> {
        let json = serde_json::to_string_pretty(envelope)
            .context("Failed to serialize progress state")?;

        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("Failed to create temp file in: {}", self.dir.display()))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .with_context(|| format!("Failed to write temp file: {}", tmp.path().display()))?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write progress file: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::types::PersistedState;

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::new();
        assert!(backend.load().unwrap().is_none());

        let envelope = PersistedEnvelope::new(PersistedState::default());
        backend.save(&envelope).unwrap();
        assert_eq!(backend.load().unwrap(), Some(envelope));
    }

    #[test]
    fn test_memory_backend_skips_other_versions() {
        let mut backend = MemoryBackend::new();
        let mut envelope = PersistedEnvelope::new(PersistedState::default());
        envelope.version = 3;
        backend.save(&envelope).unwrap();

        assert!(backend.saved().is_some());
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_file_backend_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::new(dir.path()).unwrap();

        let mut state = PersistedState::default();
        state.progress.cases_completed = (0..50).map(|i| format!("case-{i}")).collect();
        backend.save(&PersistedEnvelope::new(state)).unwrap();

        let small = PersistedEnvelope::new(PersistedState::default());
        backend.save(&small).unwrap();

        assert_eq!(backend.load().unwrap(), Some(small));
        // Only the progress file remains; the temp file was renamed over it
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::new(dir.path()).unwrap();
        assert!(backend.path().ends_with("labverse-storage.json"));
        assert!(backend.load().unwrap().is_none());

        let mut state = PersistedState::default();
        state.progress.lessons_completed.push("anion-gap-basics".to_string());
        let envelope = PersistedEnvelope::new(state);
        backend.save(&envelope).unwrap();

        assert_eq!(backend.load().unwrap(), Some(envelope));
    }

    #[test]
    fn test_file_backend_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path()).unwrap();
        fs::write(backend.path(), "{ not json").unwrap();

        let err = backend.load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse progress file"));
    }

    #[test]
    fn test_file_backend_skips_other_versions() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::new(dir.path()).unwrap();
        let mut envelope = PersistedEnvelope::new(PersistedState::default());
        envelope.version = 3;
        backend.save(&envelope).unwrap();

        assert!(backend.load().unwrap().is_none());
    }
}
