//! Live sync between the store and the mirrors
//!
//! [`LiveSync::attach`] subscribes the four mirrors to one user's
//! namespace. Dropping the handle unsubscribes all four.

use tracing::{error, warn};

use super::mirror::Mirror;
use crate::error::PlannerResult;
use crate::models::{
    sort_for_presentation, BudgetItem, BudgetSetting, Entity, EntityKind, Stored, TodoItem,
    Vendor,
};
use crate::remote::{
    CollectionEvent, CollectionListener, CollectionSnapshot, DocumentEvent, DocumentListener,
    DocumentStore, Namespace,
};
use crate::subscription::Subscription;

/// The four mirrors the planner works from
#[derive(Clone)]
pub struct Mirrors {
    pub budget: Mirror<BudgetSetting>,
    pub items: Mirror<Vec<Stored<BudgetItem>>>,
    pub todos: Mirror<Vec<Stored<TodoItem>>>,
    pub vendors: Mirror<Vec<Stored<Vendor>>>,
}

impl Default for Mirrors {
    fn default() -> Self {
        Self {
            budget: Mirror::new(EntityKind::BudgetSetting),
            items: Mirror::new(EntityKind::BudgetItem),
            todos: Mirror::new(EntityKind::Todo),
            vendors: Mirror::new(EntityKind::Vendor),
        }
    }
}

impl Mirrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty all four mirrors
    pub fn clear(&self) {
        self.budget.clear();
        self.items.clear();
        self.todos.clear();
        self.vendors.clear();
    }

    /// Snapshot errors currently held, in mirror order
    pub fn errors(&self) -> Vec<String> {
        [
            self.budget.last_error(),
            self.items.last_error(),
            self.todos.last_error(),
            self.vendors.last_error(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Total documents left out because they did not decode
    pub fn rejected_documents(&self) -> usize {
        self.budget.rejected_documents()
            + self.items.rejected_documents()
            + self.todos.rejected_documents()
            + self.vendors.rejected_documents()
    }
}

/// Entities kept in a list mirror
pub trait Mirrored: Entity {
    fn mirror(mirrors: &Mirrors) -> &Mirror<Vec<Stored<Self>>>;

    /// Look up one record in the current snapshot
    fn find(mirrors: &Mirrors, id: &Self::Id) -> Option<Stored<Self>> {
        Self::mirror(mirrors)
            .current_snapshot()
            .into_iter()
            .find(|record| &record.id == id)
    }
}

impl Mirrored for BudgetItem {
    fn mirror(mirrors: &Mirrors) -> &Mirror<Vec<Stored<Self>>> {
        &mirrors.items
    }
}

impl Mirrored for TodoItem {
    fn mirror(mirrors: &Mirrors) -> &Mirror<Vec<Stored<Self>>> {
        &mirrors.todos
    }
}

impl Mirrored for Vendor {
    fn mirror(mirrors: &Mirrors) -> &Mirror<Vec<Stored<Self>>> {
        &mirrors.vendors
    }
}

/// Active subscriptions for one namespace
#[derive(Debug)]
pub struct LiveSync {
    namespace: Namespace,
    _subscriptions: Vec<Subscription>,
}

impl LiveSync {
    /// Subscribe `mirrors` to `namespace`
    pub fn attach(
        store: &dyn DocumentStore,
        namespace: Namespace,
        mirrors: &Mirrors,
    ) -> PlannerResult<Self> {
        let subscriptions = vec![
            store.subscribe_document(
                &namespace.budget_document(),
                budget_listener(mirrors.budget.clone()),
            )?,
            store.subscribe_collection(
                &namespace.collection(EntityKind::BudgetItem),
                collection_listener(mirrors.items.clone()),
            )?,
            store.subscribe_collection(
                &namespace.collection(EntityKind::Todo),
                collection_listener(mirrors.todos.clone()),
            )?,
            store.subscribe_collection(
                &namespace.collection(EntityKind::Vendor),
                collection_listener(mirrors.vendors.clone()),
            )?,
        ];

        Ok(Self {
            namespace,
            _subscriptions: subscriptions,
        })
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }
}

fn fetch_error(kind: EntityKind, message: &str) -> String {
    format!("Gagal mengambil {}: {}", kind.fetch_noun(), message)
}

fn budget_listener(mirror: Mirror<BudgetSetting>) -> DocumentListener {
    Box::new(move |event: &DocumentEvent| match event {
        Ok(snapshot) => {
            let (budget, rejected) = match &snapshot.data {
                Some(body) => BudgetSetting::from_document(body),
                None => (BudgetSetting::default(), 0),
            };
            mirror.apply(snapshot.revision, budget, rejected);
        }
        Err(message) => {
            error!("Error fetching initial budget: {}", message);
            mirror.fail(fetch_error(EntityKind::BudgetSetting, message));
        }
    })
}

fn collection_listener<E: Entity>(mirror: Mirror<Vec<Stored<E>>>) -> CollectionListener {
    Box::new(move |event: &CollectionEvent| match event {
        Ok(snapshot) => {
            let (records, rejected) = decode_collection::<E>(snapshot);
            mirror.apply(snapshot.revision, records, rejected);
        }
        Err(message) => {
            error!(kind = %E::KIND, "Error fetching collection: {}", message);
            mirror.fail(fetch_error(E::KIND, message));
        }
    })
}

/// Decode a collection snapshot into presentation order
///
/// Documents that do not decode are left out and counted.
pub fn decode_collection<E: Entity>(snapshot: &CollectionSnapshot) -> (Vec<Stored<E>>, usize) {
    let mut records = Vec::with_capacity(snapshot.documents.len());
    let mut rejected = 0;

    for (id, body) in &snapshot.documents {
        match Stored::<E>::from_document(id, body) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(kind = %E::KIND, id = %id, "Rejecting document: {}", e);
                rejected += 1;
            }
        }
    }

    sort_for_presentation(&mut records);
    (records, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, UserId};
    use crate::remote::{Document, LocalStore, WriteMode};
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    fn namespace(uid: &str) -> Namespace {
        Namespace::new("horja", UserId::new(uid))
    }

    fn item_doc(date: &str, amount: serde_json::Value) -> Document {
        doc(json!({
            "date": date,
            "category": "Katering",
            "item": "Makan malam",
            "vendor": "",
            "amount": amount,
            "paymentMethod": "Tunai",
            "status": "Lunas"
        }))
    }

    #[test]
    fn test_attach_delivers_existing_data() {
        let store = LocalStore::in_memory();
        let ns = namespace("u1");
        store
            .add_document(&ns.collection(EntityKind::BudgetItem), item_doc("2025-01-02", json!(1000)))
            .unwrap();
        store
            .set_document(&ns.budget_document(), doc(json!({"Katering": 10000000})), WriteMode::Merge)
            .unwrap();

        let mirrors = Mirrors::new();
        let _sync = LiveSync::attach(&store, ns, &mirrors).unwrap();

        assert_eq!(mirrors.items.current_snapshot().len(), 1);
        assert_eq!(
            mirrors.budget.current_snapshot().planned(Category::Catering),
            Money::from_rupiah(10_000_000)
        );
    }

    #[test]
    fn test_writes_flow_into_mirrors_sorted() {
        let store = LocalStore::in_memory();
        let ns = namespace("u1");
        let mirrors = Mirrors::new();
        let _sync = LiveSync::attach(&store, ns.clone(), &mirrors).unwrap();

        let items = ns.collection(EntityKind::BudgetItem);
        store.add_document(&items, item_doc("2025-01-02", json!(1000))).unwrap();
        let ack = store.add_document(&items, item_doc("2025-03-04", json!(2000))).unwrap();

        let snapshot = mirrors.items.current_snapshot();
        assert_eq!(snapshot.len(), 2);
        // Newest first
        assert_eq!(snapshot[0].id.as_str(), ack.id);
        assert_eq!(mirrors.items.revision(), Some(ack.revision));
    }

    #[test]
    fn test_invalid_documents_are_rejected_and_counted() {
        let store = LocalStore::in_memory();
        let ns = namespace("u1");
        let items = ns.collection(EntityKind::BudgetItem);
        store.add_document(&items, item_doc("2025-01-02", json!(1000))).unwrap();
        store.add_document(&items, item_doc("2025-01-02", json!("banyak"))).unwrap();
        store.add_document(&items, item_doc("2025-01-02", json!(-5))).unwrap();

        let mirrors = Mirrors::new();
        let _sync = LiveSync::attach(&store, ns, &mirrors).unwrap();

        assert_eq!(mirrors.items.current_snapshot().len(), 1);
        assert_eq!(mirrors.items.rejected_documents(), 2);
        assert_eq!(mirrors.rejected_documents(), 2);
    }

    #[test]
    fn test_drop_detaches() {
        let store = LocalStore::in_memory();
        let ns = namespace("u1");
        let mirrors = Mirrors::new();
        let sync = LiveSync::attach(&store, ns.clone(), &mirrors).unwrap();
        drop(sync);

        store
            .add_document(&ns.collection(EntityKind::Vendor), doc(json!({"category": "Katering", "name": "Catering Horas"})))
            .unwrap();
        assert!(mirrors.vendors.current_snapshot().is_empty());
    }

    #[test]
    fn test_other_namespace_is_invisible() {
        let store = LocalStore::in_memory();
        let mirrors = Mirrors::new();
        let _sync = LiveSync::attach(&store, namespace("u1"), &mirrors).unwrap();

        store
            .add_document(
                &namespace("u2").collection(EntityKind::Todo),
                doc(json!({
                    "stage": "Pemberkatan",
                    "task": "Konseling pranikah",
                    "responsible": "Pendeta",
                    "dueDate": "2025-02-01",
                    "status": "Belum Mulai",
                    "priority": "Tinggi"
                })),
            )
            .unwrap();
        assert!(mirrors.todos.current_snapshot().is_empty());
    }

    #[test]
    fn test_fetch_error_text() {
        let mirrors = Mirrors::new();
        let listener = collection_listener(mirrors.todos.clone());
        listener(&Err("permission denied".to_string()));
        assert_eq!(
            mirrors.errors(),
            vec!["Gagal mengambil item tugas: permission denied".to_string()]
        );
    }
}
