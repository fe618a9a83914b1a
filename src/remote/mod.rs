//! Remote document store
//!
//! The [`DocumentStore`] trait is the only way the planner reads or writes
//! data. [`LocalStore`] implements it on top of a JSON file.

pub mod file_io;
pub mod local;
pub mod store;

pub use local::LocalStore;
pub use store::{
    CollectionEvent, CollectionListener, CollectionPath, CollectionSnapshot, Document,
    DocumentEvent, DocumentListener, DocumentPath, DocumentSnapshot, DocumentStore, Namespace,
    WriteAck, WriteMode,
};
