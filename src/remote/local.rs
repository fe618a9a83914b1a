//! Local document store
//!
//! An in-memory [`DocumentStore`] that can persist itself to a single JSON
//! file. Every accepted write bumps one store-wide revision, rewrites the
//! file atomically and pushes fresh snapshots to the listeners of the
//! touched collection and document.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::file_io::{read_json, write_json_atomic};
use super::store::{
    CollectionEvent, CollectionListener, CollectionPath, CollectionSnapshot, Document,
    DocumentEvent, DocumentListener, DocumentPath, DocumentSnapshot, DocumentStore, WriteAck,
    WriteMode,
};
use crate::error::{PlannerError, PlannerResult};
use crate::subscription::{ListenerSet, Subscription};

/// Serializable store contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    revision: u64,
    /// collection path -> document id -> body
    collections: BTreeMap<String, BTreeMap<String, Document>>,
}

type Documents = BTreeMap<String, Document>;

/// Listener sets keyed by path; an entry lives only while it has listeners
type ListenerMap<K, T> = Arc<Mutex<HashMap<K, ListenerSet<T>>>>;

/// File-backed document store
pub struct LocalStore {
    path: Option<PathBuf>,
    data: RwLock<StoreData>,
    collection_listeners: ListenerMap<CollectionPath, CollectionEvent>,
    document_listeners: ListenerMap<DocumentPath, DocumentEvent>,
}

impl LocalStore {
    /// A store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::with_data(None, StoreData::default())
    }

    /// Open (or start) a store persisted at `path`
    pub fn open(path: PathBuf) -> PlannerResult<Self> {
        let data: StoreData = read_json(&path)?;
        debug!(path = %path.display(), revision = data.revision, "Opened local store");
        Ok(Self::with_data(Some(path), data))
    }

    fn with_data(path: Option<PathBuf>, data: StoreData) -> Self {
        Self {
            path,
            data: RwLock::new(data),
            collection_listeners: Arc::new(Mutex::new(HashMap::new())),
            document_listeners: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Latest revision
    pub fn revision(&self) -> PlannerResult<u64> {
        let data = self.data.read().map_err(|e| {
            PlannerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.revision)
    }

    /// One-shot read of a whole collection
    pub fn read_collection(&self, collection: &CollectionPath) -> PlannerResult<CollectionSnapshot> {
        let data = self.data.read().map_err(|e| {
            PlannerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(collection_snapshot(
            data.revision,
            data.collections.get(collection.as_str()),
        ))
    }

    /// One-shot read of a single document
    pub fn read_document(&self, path: &DocumentPath) -> PlannerResult<DocumentSnapshot> {
        let data = self.data.read().map_err(|e| {
            PlannerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(DocumentSnapshot {
            revision: data.revision,
            data: data
                .collections
                .get(path.collection.as_str())
                .and_then(|docs| docs.get(&path.id))
                .cloned(),
        })
    }

    /// Apply `mutate` to one collection, persist, then notify listeners
    ///
    /// If persisting fails the collection and revision are rolled back.
    fn commit<F>(&self, collection: &CollectionPath, id: &str, mutate: F) -> PlannerResult<WriteAck>
    where
        F: FnOnce(&mut Documents) -> PlannerResult<()>,
    {
        let (ack, collection_snap, document_snap) = {
            let mut data = self.data.write().map_err(|e| {
                PlannerError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;

            let previous = data.collections.get(collection.as_str()).cloned();
            let mut documents = previous.clone().unwrap_or_default();
            mutate(&mut documents)?;

            data.revision += 1;
            data.collections
                .insert(collection.as_str().to_string(), documents);

            if let Err(e) = self.persist(&data) {
                data.revision -= 1;
                match previous {
                    Some(documents) => {
                        data.collections
                            .insert(collection.as_str().to_string(), documents);
                    }
                    None => {
                        data.collections.remove(collection.as_str());
                    }
                }
                return Err(e);
            }

            let revision = data.revision;
            let documents = data.collections.get(collection.as_str());
            (
                WriteAck {
                    id: id.to_string(),
                    revision,
                },
                collection_snapshot(revision, documents),
                DocumentSnapshot {
                    revision,
                    data: documents.and_then(|docs| docs.get(id)).cloned(),
                },
            )
        };

        debug!(collection = %collection, id = %ack.id, revision = ack.revision, "Write committed");
        self.notify(&collection.doc(id), collection_snap, document_snap)?;
        Ok(ack)
    }

    fn persist(&self, data: &StoreData) -> PlannerResult<()> {
        match &self.path {
            Some(path) => write_json_atomic(path, data),
            None => Ok(()),
        }
    }

    /// Push snapshots to listeners; runs with no store lock held
    fn notify(
        &self,
        path: &DocumentPath,
        collection: CollectionSnapshot,
        document: DocumentSnapshot,
    ) -> PlannerResult<()> {
        let collection_listeners = self
            .collection_listeners
            .lock()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire lock: {}", e)))?
            .get(&path.collection)
            .cloned();
        let document_listeners = self
            .document_listeners
            .lock()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire lock: {}", e)))?
            .get(path)
            .cloned();

        if let Some(listeners) = collection_listeners {
            listeners.notify(&Ok(collection));
        }
        if let Some(listeners) = document_listeners {
            listeners.notify(&Ok(document));
        }
        Ok(())
    }
}

/// Add `callback` under `key`; the entry is removed with its last listener
fn register<K, T>(
    map: &ListenerMap<K, T>,
    key: &K,
    callback: impl Fn(&T) + Send + Sync + 'static,
) -> PlannerResult<Subscription>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: 'static,
{
    let inner = map
        .lock()
        .map_err(|e| PlannerError::Storage(format!("Failed to acquire lock: {}", e)))?
        .entry(key.clone())
        .or_default()
        .add(callback);

    let map = Arc::downgrade(map);
    let key = key.clone();
    Ok(Subscription::new(move || {
        inner.unsubscribe();
        let Some(map) = map.upgrade() else {
            return;
        };
        if let Ok(mut listeners) = map.lock() {
            if listeners.get(&key).is_some_and(ListenerSet::is_empty) {
                listeners.remove(&key);
            }
        };
    }))
}

fn collection_snapshot(revision: u64, documents: Option<&Documents>) -> CollectionSnapshot {
    CollectionSnapshot {
        revision,
        documents: documents
            .map(|docs| {
                docs.iter()
                    .map(|(id, body)| (id.clone(), body.clone()))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

impl DocumentStore for LocalStore {
    fn add_document(&self, collection: &CollectionPath, body: Document) -> PlannerResult<WriteAck> {
        let id = Uuid::new_v4().simple().to_string();
        self.commit(collection, &id, |documents| {
            documents.insert(id.clone(), body);
            Ok(())
        })
    }

    fn set_document(
        &self,
        path: &DocumentPath,
        body: Document,
        mode: WriteMode,
    ) -> PlannerResult<WriteAck> {
        self.commit(&path.collection, &path.id, |documents| {
            match (mode, documents.get_mut(&path.id)) {
                (WriteMode::Merge, Some(existing)) => existing.extend(body),
                _ => {
                    documents.insert(path.id.clone(), body);
                }
            }
            Ok(())
        })
    }

    fn update_document(&self, path: &DocumentPath, body: Document) -> PlannerResult<WriteAck> {
        self.commit(&path.collection, &path.id, |documents| {
            let existing = documents
                .get_mut(&path.id)
                .ok_or_else(|| PlannerError::document_not_found(path.to_string()))?;
            existing.extend(body);
            Ok(())
        })
    }

    fn delete_document(&self, path: &DocumentPath) -> PlannerResult<WriteAck> {
        self.commit(&path.collection, &path.id, |documents| {
            documents
                .remove(&path.id)
                .map(|_| ())
                .ok_or_else(|| PlannerError::document_not_found(path.to_string()))
        })
    }

    fn subscribe_collection(
        &self,
        collection: &CollectionPath,
        listener: CollectionListener,
    ) -> PlannerResult<Subscription> {
        let listener: Arc<dyn Fn(&CollectionEvent) + Send + Sync> = Arc::from(listener);

        let registered = Arc::clone(&listener);
        let subscription = register(&self.collection_listeners, collection, move |event| {
            registered(event)
        })?;

        // A write racing with this read is delivered with a higher revision
        let snapshot = self.read_collection(collection)?;
        listener(&Ok(snapshot));
        Ok(subscription)
    }

    fn subscribe_document(
        &self,
        path: &DocumentPath,
        listener: DocumentListener,
    ) -> PlannerResult<Subscription> {
        let listener: Arc<dyn Fn(&DocumentEvent) + Send + Sync> = Arc::from(listener);

        let registered = Arc::clone(&listener);
        let subscription = register(&self.document_listeners, path, move |event| {
            registered(event)
        })?;

        let snapshot = self.read_document(path)?;
        listener(&Ok(snapshot));
        Ok(subscription)
    }
}
