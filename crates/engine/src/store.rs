//! In-memory document store backing the engine.
//!
//! Collections keep insertion order and hand out immutable [`Snapshot`]s; the
//! read pipeline (scope, filter, aggregate) only ever sees snapshots. An
//! optional JSON file persists the whole store after every committed
//! mutation, in the same shape as the application's JSON export:
//! `{ "users": [...], "cards": [...], "orders": [...], "transactions": [...] }`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{CreditCard, EngineError, Order, ResultEngine, Transaction, User};

/// Immutable copy of all four collections at a point in time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub cards: Vec<CreditCard>,
    pub orders: Vec<Order>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug)]
pub struct Store {
    users: Vec<User>,
    cards: Vec<CreditCard>,
    orders: Vec<Order>,
    transactions: Vec<Transaction>,
    snapshot_path: Option<PathBuf>,
    revision: watch::Sender<u64>,
}

/// Generates by-id accessors and mutators for one collection.
macro_rules! impl_collection {
    ($list:ident, $get:ident, $insert:ident, $replace:ident, $remove:ident, $field:ident, $ty:ty, $label:literal) => {
        pub fn $list(&self) -> &[$ty] {
            &self.$field
        }

        pub fn $get(&self, id: &str) -> Option<&$ty> {
            self.$field.iter().find(|item| item.id == id)
        }

        pub(crate) fn $insert(&mut self, item: $ty) -> ResultEngine<()> {
            if self.$get(&item.id).is_some() {
                return Err(EngineError::ExistingKey(format!("{} {}", $label, item.id)));
            }
            self.$field.push(item);
            Ok(())
        }

        pub(crate) fn $replace(&mut self, item: $ty) -> ResultEngine<()> {
            match self.$field.iter_mut().find(|cur| cur.id == item.id) {
                Some(slot) => {
                    *slot = item;
                    Ok(())
                }
                None => Err(EngineError::KeyNotFound(format!("{} {}", $label, item.id))),
            }
        }

        pub(crate) fn $remove(&mut self, id: &str) -> ResultEngine<$ty> {
            match self.$field.iter().position(|item| item.id == id) {
                Some(idx) => Ok(self.$field.remove(idx)),
                None => Err(EngineError::KeyNotFound(format!("{} {}", $label, id))),
            }
        }
    };
}

impl Store {
    /// Volatile store, used by tests and the admin CLI dry runs.
    pub fn in_memory() -> Self {
        Self::from_snapshot(Snapshot::default(), None)
    }

    /// Opens (or creates) a store persisted at `path`.
    pub fn open(path: impl Into<PathBuf>) -> ResultEngine<Self> {
        let path = path.into();
        let snapshot = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            Snapshot::default()
        };
        Ok(Self::from_snapshot(snapshot, Some(path)))
    }

    fn from_snapshot(snapshot: Snapshot, snapshot_path: Option<PathBuf>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            users: snapshot.users,
            cards: snapshot.cards,
            orders: snapshot.orders,
            transactions: snapshot.transactions,
            snapshot_path,
            revision,
        }
    }

    impl_collection!(users, user, insert_user, replace_user, remove_user, users, User, "user");
    impl_collection!(cards, card, insert_card, replace_card, remove_card, cards, CreditCard, "card");
    impl_collection!(orders, order, insert_order, replace_order, remove_order, orders, Order, "order");
    impl_collection!(
        transactions,
        transaction,
        insert_transaction,
        replace_transaction,
        remove_transaction,
        transactions,
        Transaction,
        "transaction"
    );

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            users: self.users.clone(),
            cards: self.cards.clone(),
            orders: self.orders.clone(),
            transactions: self.transactions.clone(),
        }
    }

    pub(crate) fn replace_all(&mut self, snapshot: Snapshot) {
        self.users = snapshot.users;
        self.cards = snapshot.cards;
        self.orders = snapshot.orders;
        self.transactions = snapshot.transactions;
    }

    /// Drops everything except user accounts.
    pub(crate) fn clear_records(&mut self) {
        self.cards.clear();
        self.orders.clear();
        self.transactions.clear();
    }

    /// Persists the current state and wakes subscribers. Called once per
    /// successful mutation, after all checks have passed.
    pub(crate) fn commit(&mut self) -> ResultEngine<()> {
        if let Some(path) = self.snapshot_path.clone() {
            self.persist(&path)?;
        }
        self.revision.send_modify(|rev| *rev += 1);
        Ok(())
    }

    fn persist(&self, path: &Path) -> ResultEngine<()> {
        let raw = serde_json::to_string_pretty(&self.snapshot())?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Change notification: the receiver yields a new revision number after
    /// every committed mutation. Presentation layers rerun the scope, filter
    /// and aggregate pipeline on each change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
