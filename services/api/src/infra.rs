use biomarker_insights::dashboard::{NoteKey, NoteStore, NoteStoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNoteStore {
    entries: Arc<Mutex<HashMap<NoteKey, String>>>,
}

impl NoteStore for InMemoryNoteStore {
    fn get(&self, key: &NoteKey) -> Result<Option<String>, NoteStoreError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| NoteStoreError::Unavailable("note mutex poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: NoteKey, text: String) -> Result<(), NoteStoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| NoteStoreError::Unavailable("note mutex poisoned".to_string()))?;
        if text.is_empty() {
            guard.remove(&key);
        } else {
            guard.insert(key, text);
        }
        Ok(())
    }
}

/// Notes persisted as a single JSON object keyed by result id, rewritten on every change.
pub(crate) struct JsonFileNoteStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<NoteKey, String>>,
}

impl JsonFileNoteStore {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Result<Self, NoteStoreError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<NoteKey, String>) -> Result<(), NoteStoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl NoteStore for JsonFileNoteStore {
    fn get(&self, key: &NoteKey) -> Result<Option<String>, NoteStoreError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| NoteStoreError::Unavailable("note mutex poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: NoteKey, text: String) -> Result<(), NoteStoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| NoteStoreError::Unavailable("note mutex poisoned".to_string()))?;
        let previous = if text.is_empty() {
            guard.remove(&key)
        } else {
            guard.insert(key.clone(), text)
        };

        if let Err(err) = self.persist(&guard) {
            match previous {
                Some(text) => guard.insert(key, text),
                None => guard.remove(&key),
            };
            return Err(err);
        }
        Ok(())
    }
}

/// Note backend chosen at startup from `NOTES_PATH`.
pub(crate) enum ConfiguredNoteStore {
    Memory(InMemoryNoteStore),
    File(JsonFileNoteStore),
}

impl ConfiguredNoteStore {
    pub(crate) fn from_path(path: Option<&Path>) -> Result<Self, NoteStoreError> {
        match path {
            Some(path) => JsonFileNoteStore::open(path).map(Self::File),
            None => Ok(Self::Memory(InMemoryNoteStore::default())),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "in-memory".to_string(),
            Self::File(store) => store.path().display().to_string(),
        }
    }
}

impl NoteStore for ConfiguredNoteStore {
    fn get(&self, key: &NoteKey) -> Result<Option<String>, NoteStoreError> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::File(store) => store.get(key),
        }
    }

    fn set(&self, key: NoteKey, text: String) -> Result<(), NoteStoreError> {
        match self {
            Self::Memory(store) => store.set(key, text),
            Self::File(store) => store.set(key, text),
        }
    }
}
