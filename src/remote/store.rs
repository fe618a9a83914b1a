//! Document store collaborator
//!
//! The planner never talks to a database directly. Everything goes through
//! [`DocumentStore`]: writes return a [`WriteAck`], reads arrive as pushed
//! snapshots. Every write and every snapshot carries the store revision it
//! reflects, so consumers can drop stale deliveries.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::PlannerResult;
use crate::models::{EntityKind, UserId, BUDGET_DOCUMENT_ID};
use crate::subscription::Subscription;

/// A document body as stored
pub type Document = Map<String, Value>;

/// Path of a collection, e.g. `artifacts/{app}/users/{uid}/wedding_budget`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath(String);

impl CollectionPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of a document inside this collection
    pub fn doc(&self, id: impl Into<String>) -> DocumentPath {
        DocumentPath {
            collection: self.clone(),
            id: id.into(),
        }
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path of a single document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    pub collection: CollectionPath,
    pub id: String,
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// The per-user area of the store every entity lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    app_id: String,
    user_id: UserId,
}

impl Namespace {
    pub fn new(app_id: impl Into<String>, user_id: UserId) -> Self {
        Self {
            app_id: app_id.into(),
            user_id,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Collection holding one kind of entity
    pub fn collection(&self, kind: EntityKind) -> CollectionPath {
        CollectionPath::new(format!(
            "artifacts/{}/users/{}/{}",
            self.app_id,
            self.user_id,
            kind.collection()
        ))
    }

    /// The single document holding the initial budget
    pub fn budget_document(&self) -> DocumentPath {
        self.collection(EntityKind::BudgetSetting)
            .doc(BUDGET_DOCUMENT_ID)
    }
}

/// How `set_document` treats an existing document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the whole body
    Replace,
    /// Overwrite only the given fields
    Merge,
}

/// Acknowledgement of an accepted write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAck {
    /// Id of the written document
    pub id: String,
    /// Store revision that includes the write
    pub revision: u64,
}

/// Every document of a collection at one revision
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot {
    pub revision: u64,
    pub documents: Vec<(String, Document)>,
}

/// One document at one revision; `data` is `None` when it does not exist
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub revision: u64,
    pub data: Option<Document>,
}

/// What a collection listener receives; errors are the store's message
pub type CollectionEvent = Result<CollectionSnapshot, String>;

/// What a document listener receives
pub type DocumentEvent = Result<DocumentSnapshot, String>;

pub type CollectionListener = Box<dyn Fn(&CollectionEvent) + Send + Sync>;
pub type DocumentListener = Box<dyn Fn(&DocumentEvent) + Send + Sync>;

/// A remote document store with push-based reads
///
/// Subscribing delivers the current state right away and then again after
/// every change. Deliveries may arrive out of order; compare revisions.
pub trait DocumentStore: Send + Sync {
    /// Create a document with a store-assigned id
    fn add_document(&self, collection: &CollectionPath, body: Document) -> PlannerResult<WriteAck>;

    /// Create or overwrite a document
    fn set_document(
        &self,
        path: &DocumentPath,
        body: Document,
        mode: WriteMode,
    ) -> PlannerResult<WriteAck>;

    /// Overwrite fields of an existing document; fails with `NotFound` if it is missing
    fn update_document(&self, path: &DocumentPath, body: Document) -> PlannerResult<WriteAck>;

    /// Remove an existing document; fails with `NotFound` if it is missing
    fn delete_document(&self, path: &DocumentPath) -> PlannerResult<WriteAck>;

    fn subscribe_collection(
        &self,
        collection: &CollectionPath,
        listener: CollectionListener,
    ) -> PlannerResult<Subscription>;

    fn subscribe_document(
        &self,
        path: &DocumentPath,
        listener: DocumentListener,
    ) -> PlannerResult<Subscription>;
}
