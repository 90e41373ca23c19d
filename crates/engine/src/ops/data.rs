//! Snapshot import/export and the data reset, mirroring the dashboard's
//! admin menu.

use crate::{EngineError, ResultEngine, Snapshot, User};

use super::Engine;

impl Engine {
    fn require_admin(acting: &User, what: &str) -> ResultEngine<()> {
        if acting.role.is_admin() {
            Ok(())
        } else {
            Err(EngineError::Forbidden(format!("only admins can {what}")))
        }
    }

    pub fn export(&self, acting: &User) -> ResultEngine<Snapshot> {
        Self::require_admin(acting, "export data")?;
        Ok(self.snapshot())
    }

    pub fn import(&mut self, acting: &User, snapshot: Snapshot) -> ResultEngine<()> {
        Self::require_admin(acting, "import data")?;
        self.restore(snapshot)
    }

    /// Replaces every collection with `snapshot`. Also used by the admin CLI
    /// where no acting user exists yet.
    ///
    /// Dangling references inside the snapshot are tolerated (the read
    /// pipeline resolves them to "Unknown"), but a snapshot without a single
    /// admin would lock everyone out and is rejected.
    pub fn restore(&mut self, snapshot: Snapshot) -> ResultEngine<()> {
        if !snapshot.users.iter().any(|user| user.role.is_admin()) {
            return Err(EngineError::InvalidInput(
                "snapshot contains no admin user".to_string(),
            ));
        }
        for user in &snapshot.users {
            if user.id.trim().is_empty() {
                return Err(EngineError::InvalidInput("empty user id".to_string()));
            }
        }
        tracing::info!(
            users = snapshot.users.len(),
            cards = snapshot.cards.len(),
            orders = snapshot.orders.len(),
            transactions = snapshot.transactions.len(),
            "restoring snapshot"
        );
        self.store.replace_all(snapshot);
        self.store.commit()?;
        Ok(())
    }

    /// Clears orders, cards and transactions. User accounts survive.
    pub fn reset(&mut self, acting: &User) -> ResultEngine<()> {
        Self::require_admin(acting, "reset data")?;
        tracing::info!("clearing all non-user data");
        self.store.clear_records();
        self.store.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn setup() -> (Engine, User) {
        let mut engine = Engine::builder().build().unwrap();
        let id = engine
            .bootstrap_admin("Root", "root@example.com", "secret")
            .unwrap();
        let admin = engine.require_user(&id).unwrap().clone();
        (engine, admin)
    }

    #[test]
    fn import_requires_an_admin_in_snapshot() {
        let (mut engine, admin) = setup();
        let mut snapshot = engine.export(&admin).unwrap();
        snapshot.users[0].role = Role::User;
        let err = engine.import(&admin, snapshot).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn export_then_import_round_trips() {
        let (mut engine, admin) = setup();
        engine
            .new_card(&admin, "Regalia", "4111111111111111", None)
            .unwrap();
        let snapshot = engine.export(&admin).unwrap();

        let mut other = Engine::builder().build().unwrap();
        other
            .bootstrap_admin("Temp", "temp@example.com", "pw")
            .unwrap();
        let temp = other.authenticate("temp@example.com", "pw").unwrap();
        other.import(&temp, snapshot.clone()).unwrap();
        assert_eq!(other.snapshot(), snapshot);
    }

    #[test]
    fn reset_keeps_users() {
        let (mut engine, admin) = setup();
        engine
            .new_card(&admin, "Regalia", "4111111111111111", None)
            .unwrap();
        engine.reset(&admin).unwrap();
        let snapshot = engine.snapshot();
        assert!(snapshot.cards.is_empty());
        assert_eq!(snapshot.users.len(), 1);
    }
}
