//! Durable storage for the trainer state.
//!
//! [`KeyValueStorage`] is the port: one string slot per key. [`GameStateStore`]
//! is the only thing that talks to it, and writes the full record through on
//! every mutation.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{Result, TrainerError};
use crate::trainer_engine::models::{PersistedState, STORAGE_KEY};

/// Key-value backend holding serialized records.
pub trait KeyValueStorage {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

/// In-memory backend for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a slot, e.g. with a record from an older run.
    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.slots.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TrainerError::Io { path, source }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| TrainerError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| TrainerError::Io { path, source })
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Canonical owner of the persisted record.
pub struct GameStateStore<S: KeyValueStorage> {
    storage: S,
    state: PersistedState,
}

impl<S: KeyValueStorage> GameStateStore<S> {
    /// Load the stored record. Malformed data is an error.
    pub fn open(storage: S) -> Result<Self> {
        let state = load(&storage)?;
        Ok(GameStateStore { storage, state })
    }

    /// Load the stored record, starting over from defaults if it is malformed.
    /// Storage I/O failures still propagate.
    pub fn open_or_default(storage: S) -> Result<Self> {
        let state = load_or_default(&storage)?;
        Ok(GameStateStore { storage, state })
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply `f` to the state and write the result through before returning.
    ///
    /// If the write fails the change is rolled back, so memory never runs
    /// ahead of storage.
    pub fn update<T>(&mut self, f: impl FnOnce(&mut PersistedState) -> T) -> Result<T> {
        let before = self.state.clone();
        let out = f(&mut self.state);
        if let Err(e) = save(&mut self.storage, &self.state) {
            self.state = before;
            return Err(e);
        }
        Ok(out)
    }
}

/// Read the record under [`STORAGE_KEY`]; defaults when absent.
pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> Result<PersistedState> {
    match storage.read(STORAGE_KEY)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| TrainerError::CorruptState {
            key: STORAGE_KEY.to_string(),
            source,
        }),
        None => {
            debug!("no stored state, starting fresh");
            Ok(PersistedState::default())
        }
    }
}

/// Like [`load`], but malformed records fall back to defaults.
pub fn load_or_default<S: KeyValueStorage + ?Sized>(storage: &S) -> Result<PersistedState> {
    match load(storage) {
        Err(e) if e.is_corrupt_state() => {
            warn!(error = %e, "discarding malformed stored state");
            Ok(PersistedState::default())
        }
        other => other,
    }
}

/// Serialize and write the full record.
pub fn save<S: KeyValueStorage + ?Sized>(storage: &mut S, state: &PersistedState) -> Result<()> {
    let raw = serde_json::to_string(state)?;
    storage.write(STORAGE_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer_engine::models::{HistoryEntry, Outcome};
    use tempfile::TempDir;

    const LEGACY_RECORD: &str = r#"{"correct":120,"incorrect":80,"attempts":200,"currentColor":"bg-red-500","gameHistory":[{"accuracy":55,"correct":110,"incorrect":90,"date":"01.02.2025, 10:00:00"}],"gameCompleted":true,"maxAttempts":200}"#;

    #[test]
    fn absent_record_loads_defaults() {
        let state = load(&MemoryStorage::new()).unwrap();
        assert_eq!(state, PersistedState::default());
        assert_eq!(state.max_attempts, 200);
        assert_eq!(state.current_outcome, Outcome::Neutral);
    }

    #[test]
    fn legacy_record_without_archived_flag_loads() {
        let storage = MemoryStorage::new().with_entry(STORAGE_KEY, LEGACY_RECORD);
        let state = load(&storage).unwrap();
        assert_eq!(state.correct, 120);
        assert_eq!(state.current_outcome, Outcome::Red);
        assert!(state.completed);
        assert!(!state.archived);
        assert_eq!(
            state.history,
            vec![HistoryEntry {
                accuracy: 55,
                correct: 110,
                incorrect: 90,
                date: "01.02.2025, 10:00:00".into(),
            }]
        );
    }

    #[test]
    fn legacy_record_already_in_history_loads_archived() {
        let raw = r#"{"correct":120,"incorrect":80,"attempts":200,"currentColor":"bg-red-500","gameHistory":[{"accuracy":60,"correct":120,"incorrect":80,"date":"01.02.2025, 10:00:00"}],"gameCompleted":true,"maxAttempts":200}"#;
        let state = load(&MemoryStorage::new().with_entry(STORAGE_KEY, raw)).unwrap();
        assert!(state.archived);
    }

    #[test]
    fn explicit_archived_flag_wins_over_history() {
        let raw = r#"{"correct":120,"incorrect":80,"attempts":200,"currentColor":"bg-red-500","gameHistory":[{"accuracy":60,"correct":120,"incorrect":80,"date":"d"}],"gameCompleted":true,"maxAttempts":200,"archived":false}"#;
        let state = load(&MemoryStorage::new().with_entry(STORAGE_KEY, raw)).unwrap();
        assert!(!state.archived);
    }

    /// Backend whose writes always fail.
    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStorage for ReadOnlyStorage {
        fn read(&self, key: &str) -> Result<Option<String>> {
            self.0.read(key)
        }

        fn write(&mut self, key: &str, _value: &str) -> Result<()> {
            Err(TrainerError::Io {
                path: PathBuf::from(key),
                source: std::io::Error::new(ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn failed_write_rolls_back_update() {
        let mut store = GameStateStore::open(ReadOnlyStorage(MemoryStorage::new())).unwrap();
        let err = store.update(|s| s.correct = 9).unwrap_err();
        assert!(matches!(err, TrainerError::Io { .. }));
        assert_eq!(store.state(), &PersistedState::default());
    }

    #[test]
    fn malformed_record_is_an_error() {
        let storage = MemoryStorage::new().with_entry(STORAGE_KEY, "{not json");
        let err = load(&storage).unwrap_err();
        assert!(err.is_corrupt_state());
        assert!(GameStateStore::open(storage).is_err());
    }

    #[test]
    fn malformed_record_falls_back_when_hardened() {
        let storage = MemoryStorage::new().with_entry(STORAGE_KEY, "[]");
        let store = GameStateStore::open_or_default(storage).unwrap();
        assert_eq!(store.state(), &PersistedState::default());
    }

    #[test]
    fn save_of_load_is_byte_identical() {
        let mut storage = MemoryStorage::new();
        let mut state = PersistedState::default();
        state.history.push(HistoryEntry {
            accuracy: 60,
            correct: 120,
            incorrect: 80,
            date: "02.03.2025, 11:12:13".into(),
        });
        save(&mut storage, &state).unwrap();
        let first = storage.get(STORAGE_KEY).unwrap().to_string();

        let reloaded = load(&storage).unwrap();
        save(&mut storage, &reloaded).unwrap();
        assert_eq!(storage.get(STORAGE_KEY).unwrap(), first);
    }

    #[test]
    fn update_writes_through() {
        let mut store = GameStateStore::open(MemoryStorage::new()).unwrap();
        assert!(store.storage().get(STORAGE_KEY).is_none());
        store.update(|s| s.correct = 5).unwrap();
        let stored = load(store.storage()).unwrap();
        assert_eq!(stored.correct, 5);
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));
        assert!(storage.read(STORAGE_KEY).unwrap().is_none());

        storage.write(STORAGE_KEY, "{}").unwrap();
        assert_eq!(storage.read(STORAGE_KEY).unwrap().as_deref(), Some("{}"));
        assert!(storage.path_for(STORAGE_KEY).ends_with("intuitionTrainerState.json"));
    }

    #[test]
    fn serialized_layout_uses_stored_field_names() {
        let raw = serde_json::to_string(&PersistedState::default()).unwrap();
        assert_eq!(
            raw,
            r#"{"correct":0,"incorrect":0,"attempts":0,"currentColor":"bg-gray-300","gameHistory":[],"gameCompleted":false,"maxAttempts":200,"archived":false}"#
        );
    }
}
