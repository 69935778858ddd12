//! File-backed JSON document store.
//!
//! One JSON array file per collection under the data directory. The whole
//! store is loaded into memory at open; reads are served from memory.
//! Mutations are staged, persisted to the collection file, and only then
//! committed to memory, so neither a restart nor a concurrent read ever
//! sees a write that was not acknowledged.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;

use super::document::new_document_id;
use super::filter::{Filter, Projection, SortOrder};
use super::{DocumentStore, StoreError, StoreResult};

/// File-backed document store
pub struct JsonStore {
    root: PathBuf,
    /// Collection name -> documents in insertion order
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl JsonStore {
    /// Open (or initialize) a store at the given data directory.
    ///
    /// Creates the directory when missing and loads every existing
    /// `<collection>.json` file. Any unreadable or malformed file fails
    /// the open; callers treat that as fatal.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(&root).map_err(|source| StoreError::Open {
            path: root.display().to_string(),
            source,
        })?;

        let mut collections = HashMap::new();

        let entries = fs::read_dir(&root).map_err(|source| StoreError::Open {
            path: root.display().to_string(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Open {
                path: root.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let docs = load_collection_file(name, &path)?;
            collections.insert(name.to_string(), docs);
        }

        Ok(Self {
            root,
            collections: RwLock::new(collections),
        })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    /// Write a collection file through. Writes to a sibling temp file and
    /// renames so a crash mid-write leaves the previous contents intact.
    fn persist(&self, collection: &str, docs: &[Value]) -> StoreResult<()> {
        let path = self.collection_path(collection);
        let tmp = self.root.join(format!("{collection}.json.tmp"));

        let body =
            serde_json::to_vec_pretty(docs).map_err(|_| StoreError::Corrupt(collection.into()))?;

        fs::write(&tmp, body).map_err(|source| StoreError::Io {
            collection: collection.into(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            collection: collection.into(),
            source,
        })?;

        Ok(())
    }

    fn position_of(docs: &[Value], id: &str) -> Option<usize> {
        docs.iter()
            .position(|d| d.get("id").and_then(|v| v.as_str()) == Some(id))
    }
}

fn load_collection_file(name: &str, path: &Path) -> StoreResult<Vec<Value>> {
    let raw = fs::read(path).map_err(|source| StoreError::Io {
        collection: name.into(),
        source,
    })?;

    let parsed: Value =
        serde_json::from_slice(&raw).map_err(|_| StoreError::Corrupt(name.into()))?;

    match parsed {
        Value::Array(docs) if docs.iter().all(|d| d.is_object()) => Ok(docs),
        _ => Err(StoreError::Corrupt(name.into())),
    }
}

impl DocumentStore for JsonStore {
    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<&SortOrder>,
        projection: Option<&Projection>,
    ) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut docs: Vec<Value> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();

        if let Some(sort) = sort {
            sort.apply(&mut docs);
        }
        if let Some(projection) = projection {
            docs = docs.into_iter().map(|d| projection.apply(d)).collect();
        }

        Ok(docs)
    }

    fn find_one(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().map_err(|_| StoreError::LockPoisoned)?;

        Ok(collections.get(collection).and_then(|docs| {
            Self::position_of(docs, id).map(|idx| docs[idx].clone())
        }))
    }

    fn insert_one(&self, collection: &str, mut doc: Value) -> StoreResult<String> {
        let id = new_document_id();
        if let Some(obj) = doc.as_object_mut() {
            obj.insert("id".to_string(), Value::String(id.clone()));
        }

        let mut collections = self.collections.write().map_err(|_| StoreError::LockPoisoned)?;
        let docs = collections.entry(collection.to_string()).or_default();

        // Stage, persist, then commit: a failed write must not be visible
        let mut staged = docs.clone();
        staged.push(doc);
        self.persist(collection, &staged)?;
        *docs = staged;

        Ok(id)
    }

    fn update_one(&self, collection: &str, id: &str, fields_to_set: Value) -> StoreResult<u64> {
        let mut collections = self.collections.write().map_err(|_| StoreError::LockPoisoned)?;

        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let Some(idx) = Self::position_of(docs, id) else {
            return Ok(0);
        };

        let mut staged = docs.clone();
        if let (Some(target), Some(updates)) =
            (staged[idx].as_object_mut(), fields_to_set.as_object())
        {
            for (key, value) in updates {
                target.insert(key.clone(), value.clone());
            }
        }

        self.persist(collection, &staged)?;
        *docs = staged;
        Ok(1)
    }

    fn delete_one(&self, collection: &str, id: &str) -> StoreResult<u64> {
        let mut collections = self.collections.write().map_err(|_| StoreError::LockPoisoned)?;

        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let Some(idx) = Self::position_of(docs, id) else {
            return Ok(0);
        };

        let mut staged = docs.clone();
        staged.remove(idx);

        self.persist(collection, &staged)?;
        *docs = staged;
        Ok(1)
    }
}
