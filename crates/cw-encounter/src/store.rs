//! Persistence for session records, keyed by fight id.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::EncounterResult;
use crate::session::EncounterSession;

/// Somewhere to keep encounter sessions between requests.
pub trait SessionStore {
    /// Load the session for a fight, if one exists.
    fn load(&self, fight_id: Uuid) -> EncounterResult<Option<EncounterSession>>;

    /// Save a session, replacing any previous record for its fight.
    fn save(&mut self, session: &EncounterSession) -> EncounterResult<()>;

    /// Delete a fight's session. Returns whether one existed.
    fn remove(&mut self, fight_id: Uuid) -> EncounterResult<bool>;
}

/// Sessions held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: HashMap<Uuid, EncounterSession>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, fight_id: Uuid) -> EncounterResult<Option<EncounterSession>> {
        Ok(self.sessions.get(&fight_id).cloned())
    }

    fn save(&mut self, session: &EncounterSession) -> EncounterResult<()> {
        self.sessions.insert(session.fight_id(), session.clone());
        Ok(())
    }

    fn remove(&mut self, fight_id: Uuid) -> EncounterResult<bool> {
        Ok(self.sessions.remove(&fight_id).is_some())
    }
}

/// Sessions stored as one `<fight-id>.json` file each.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Use `dir` for session files. It is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory sessions are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a fight's session is stored in.
    pub fn path_for(&self, fight_id: Uuid) -> PathBuf {
        self.dir.join(format!("{fight_id}.json"))
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self, fight_id: Uuid) -> EncounterResult<Option<EncounterSession>> {
        let path = self.path_for(fight_id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded session");
        Ok(Some(session))
    }

    fn save(&mut self, session: &EncounterSession) -> EncounterResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(session.fight_id());
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), "saved session");
        Ok(())
    }

    fn remove(&mut self, fight_id: Uuid) -> EncounterResult<bool> {
        match fs::remove_file(self.path_for(fight_id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncounterConfig;
    use crate::error::EncounterError;
    use tempfile::TempDir;

    fn session(n: u128) -> EncounterSession {
        EncounterSession::new(Uuid::from_u128(n), EncounterConfig::default().with_seed(n as u64))
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let s = session(1);
        assert!(store.load(s.fight_id()).unwrap().is_none());
        store.save(&s).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(s.fight_id()).unwrap(), Some(s.clone()));
        assert!(store.remove(s.fight_id()).unwrap());
        assert!(!store.remove(s.fight_id()).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn json_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("sessions"));
        let s = session(7);

        assert!(store.load(s.fight_id()).unwrap().is_none());
        store.save(&s).unwrap();
        assert!(store.path_for(s.fight_id()).exists());
        assert_eq!(store.load(s.fight_id()).unwrap(), Some(s.clone()));

        assert!(store.remove(s.fight_id()).unwrap());
        assert!(!store.remove(s.fight_id()).unwrap());
    }

    #[test]
    fn json_store_reports_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let id = Uuid::from_u128(3);
        fs::write(store.path_for(id), "not json").unwrap();
        assert!(matches!(store.load(id), Err(EncounterError::Encoding(_))));
    }
}
