// file: src/store/evaluations.rs
// description: typed evaluation record persistence over a key-value backend
// reference: serde_json records keyed by record id

use crate::error::{Result, WorkbenchError};
use crate::models::EvaluationRecord;
use crate::store::kv::KeyValueStore;

pub struct EvaluationStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> EvaluationStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn save(&mut self, record: &EvaluationRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.backend.set(&record.id, json)
    }

    pub fn load(&self, id: &str) -> Result<EvaluationRecord> {
        let json = self
            .backend
            .get(id)
            .ok_or_else(|| WorkbenchError::RecordNotFound(id.to_string()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// All records, newest first.
    pub fn list(&self) -> Result<Vec<EvaluationRecord>> {
        let mut records = Vec::new();
        for key in self.backend.keys() {
            records.push(self.load(&key)?);
        }
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        match self.backend.remove(id)? {
            Some(_) => Ok(()),
            None => Err(WorkbenchError::RecordNotFound(id.to_string())),
        }
    }

    pub fn clear(&mut self) -> Result<usize> {
        let keys = self.backend.keys();
        for key in &keys {
            self.backend.remove(key)?;
        }
        Ok(keys.len())
    }

    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::{JsonFileStore, MemoryStore};
    use tempfile::tempdir;

    fn sample_record(prompt: &str) -> EvaluationRecord {
        EvaluationRecord::new(prompt.to_string(), None, "fa".to_string())
    }

    #[test]
    fn test_save_and_load() {
        let mut store = EvaluationStore::new(MemoryStore::new());
        let record = sample_record("prompt one");
        store.save(&record).unwrap();

        let loaded = store.load(&record.id).unwrap();
        assert_eq!(loaded.prompt_en, "prompt one");
        assert_eq!(loaded.id, record.id);
    }

    #[test]
    fn test_load_missing_record() {
        let store = EvaluationStore::new(MemoryStore::new());
        assert!(matches!(
            store.load("nope"),
            Err(WorkbenchError::RecordNotFound(_))
        ));
    }

    #[test]
    fn test_list_newest_first() {
        let mut store = EvaluationStore::new(MemoryStore::new());
        let mut older = sample_record("older");
        older.created_at = 100;
        let mut newer = sample_record("newer");
        newer.created_at = 200;
        store.save(&older).unwrap();
        store.save(&newer).unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].prompt_en, "newer");
    }

    #[test]
    fn test_clear() {
        let mut store = EvaluationStore::new(MemoryStore::new());
        store.save(&sample_record("a")).unwrap();
        store.save(&sample_record("b")).unwrap();

        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_backed_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("evaluations.json");
        let record = sample_record("persisted");

        {
            let backend = JsonFileStore::open(path.clone(), true).unwrap();
            let mut store = EvaluationStore::new(backend);
            store.save(&record).unwrap();
        }

        {
            let backend = JsonFileStore::open(path, true).unwrap();
            let store = EvaluationStore::new(backend);
            let loaded = store.load(&record.id).unwrap();
            assert_eq!(loaded.prompt_en, "persisted");
        }
    }
}
