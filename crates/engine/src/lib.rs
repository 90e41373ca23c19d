//! FoneFlow core engine.
//!
//! Holds the reseller's collections (users, credit cards, orders, payment
//! transactions) in an in-memory document [`Store`] and derives every
//! dashboard figure from immutable snapshots: access scoping first, then
//! filtering, then aggregation. Mutations go through [`Engine`] methods that
//! enforce role rules and referential integrity before committing.

pub use cards::{CARD_NUMBER_LEN, CreditCard};
pub use error::EngineError;
pub use orders::{Order, OrderDraft};
pub use store::{Snapshot, Store};
pub use transactions::{OnlinePaymentType, PaymentMode, Transaction, TransactionDraft};
pub use users::{Role, User};

pub use ops::{
    Engine, EngineBuilder, OrderFilter, ScopedCollections, Stats, UserUpdate, card_bills,
    cashback_total, compute_stats, credit_card_bill, dealers, filter_orders, scope,
};

mod cards;
mod error;
pub mod ops;
mod orders;
mod store;
mod transactions;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
