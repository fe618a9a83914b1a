//! Stored records
//!
//! Document bodies never carry their own identifier; the store assigns one
//! and hands it back next to the body. [`Stored`] pairs the two.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The four kinds of data kept in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    BudgetSetting,
    BudgetItem,
    Todo,
    Vendor,
}

impl EntityKind {
    /// Collection name under the user's namespace
    pub fn collection(&self) -> &'static str {
        match self {
            Self::BudgetSetting => "wedding_settings",
            Self::BudgetItem => "wedding_budget",
            Self::Todo => "wedding_todos",
            Self::Vendor => "wedding_vendors",
        }
    }

    /// Localized noun used in command notices
    pub fn noun(&self) -> &'static str {
        match self {
            Self::BudgetSetting => "anggaran awal",
            Self::BudgetItem => "item anggaran",
            Self::Todo => "tugas",
            Self::Vendor => "vendor",
        }
    }

    /// Localized noun used when a subscription fails
    pub fn fetch_noun(&self) -> &'static str {
        match self {
            Self::Todo => "item tugas",
            other => other.noun(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetSetting => write!(f, "BudgetSetting"),
            Self::BudgetItem => write!(f, "BudgetItem"),
            Self::Todo => write!(f, "Todo"),
            Self::Vendor => write!(f, "Vendor"),
        }
    }
}

/// A document body kept in one of the per-user collections
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Typed wrapper around the store-assigned id
    type Id: Clone
        + fmt::Debug
        + fmt::Display
        + Eq
        + Hash
        + Ord
        + From<String>
        + AsRef<str>
        + Serialize
        + Send
        + Sync
        + 'static;

    /// Which collection this entity lives in
    const KIND: EntityKind;

    /// Order in which a snapshot of this entity is presented
    fn presentation_order(a: &Stored<Self>, b: &Stored<Self>) -> Ordering;

    /// Short human-readable description for logs and the audit trail
    fn summary(&self) -> String;

    /// Encode the body as a store document
    fn to_document(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "{} did not encode as an object: {}",
                Self::KIND,
                other
            ))),
        }
    }
}

/// An entity together with the identifier the store assigned to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<E: Entity> {
    pub id: E::Id,
    #[serde(flatten)]
    pub data: E,
}

impl<E: Entity> Stored<E> {
    /// Pair a body with its id
    pub fn new(id: impl Into<E::Id>, data: E) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Decode a store document
    ///
    /// Unknown fields (including a stray `id` written by older clients)
    /// are ignored; missing or malformed known fields are an error.
    pub fn from_document(id: &str, body: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        let data = serde_json::from_value(Value::Object(body.clone()))?;
        Ok(Self {
            id: E::Id::from(id.to_string()),
            data,
        })
    }
}

impl<E: Entity> Deref for Stored<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.data
    }
}

/// Sort a snapshot into the entity's presentation order
pub fn sort_for_presentation<E: Entity>(records: &mut [Stored<E>]) {
    records.sort_by(E::presentation_order);
}
