use crate::{EngineError, ResultEngine, Snapshot, Store, User};

mod access;
mod cards;
mod data;
mod filters;
mod orders;
mod stats;
mod transactions;
mod users;

pub use access::{ScopedCollections, scope};
pub use filters::{OrderFilter, dealers, filter_orders};
pub use stats::{Stats, card_bills, cashback_total, compute_stats, credit_card_bill};
pub use users::UserUpdate;

#[derive(Debug)]
pub struct Engine {
    store: Store,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Immutable copy of all collections, the input of the read pipeline.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// See [`Store::subscribe`].
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.store.subscribe()
    }

    /// Resolves the acting user for HTTP Basic credentials.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        self.store
            .users()
            .iter()
            .find(|user| user.email == email && user.password == password)
            .cloned()
    }

    pub(super) fn require_user(&self, user_id: &str) -> ResultEngine<&User> {
        self.store
            .user(user_id)
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    snapshot_path: Option<std::path::PathBuf>,
}

impl EngineBuilder {
    /// Persist the store at `path` (loaded on build if the file exists).
    pub fn snapshot_path(mut self, path: impl Into<std::path::PathBuf>) -> EngineBuilder {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        let store = match self.snapshot_path {
            Some(path) => Store::open(path)?,
            None => Store::in_memory(),
        };
        Ok(Engine { store })
    }
}
