//! Payment transaction management (admin-only, like the dashboard tab).

use crate::{EngineError, ResultEngine, Transaction, TransactionDraft, User};

use super::{Engine, normalize_optional_text};

impl Engine {
    fn check_transaction_refs(&self, acting: &User, draft: &TransactionDraft) -> ResultEngine<()> {
        if !acting.role.is_admin() {
            return Err(EngineError::Forbidden(
                "only admins can record payments".to_string(),
            ));
        }
        self.require_user(&draft.user_id)?;
        if let Some(card_id) = &draft.card_id {
            if self.store.card(card_id).is_none() {
                return Err(EngineError::KeyNotFound("card not exists".to_string()));
            }
        }
        Ok(())
    }

    pub fn new_transaction(
        &mut self,
        acting: &User,
        mut draft: TransactionDraft,
    ) -> ResultEngine<String> {
        self.check_transaction_refs(acting, &draft)?;
        draft.description = normalize_optional_text(draft.description.as_deref());
        let tx = Transaction::new(draft)?;
        let id = tx.id.clone();
        self.store.insert_transaction(tx)?;
        self.store.commit()?;
        Ok(id)
    }

    /// Full replace by id.
    pub fn update_transaction(
        &mut self,
        acting: &User,
        transaction_id: &str,
        draft: TransactionDraft,
    ) -> ResultEngine<()> {
        if self.store.transaction(transaction_id).is_none() {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        self.check_transaction_refs(acting, &draft)?;

        let mut replacement = Transaction::new(draft)?;
        replacement.id = transaction_id.to_string();
        self.store.replace_transaction(replacement)?;
        self.store.commit()?;
        Ok(())
    }

    pub fn delete_transaction(&mut self, acting: &User, transaction_id: &str) -> ResultEngine<()> {
        if !acting.role.is_admin() {
            return Err(EngineError::Forbidden(
                "only admins can delete payments".to_string(),
            ));
        }
        self.store.remove_transaction(transaction_id)?;
        self.store.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OnlinePaymentType, PaymentMode, Role};
    use chrono::NaiveDate;

    fn setup() -> (Engine, User, User) {
        let mut engine = Engine::builder().build().unwrap();
        let admin_id = engine
            .bootstrap_admin("Root", "root@example.com", "secret")
            .unwrap();
        let admin = engine.require_user(&admin_id).unwrap().clone();
        let bob_id = engine
            .new_user(&admin, "Bob", "bob@example.com", "pw", Role::User)
            .unwrap();
        let bob = engine.require_user(&bob_id).unwrap().clone();
        (engine, admin, bob)
    }

    fn draft(user_id: &str) -> TransactionDraft {
        TransactionDraft {
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            amount: 500,
            dealer: "Acme".to_string(),
            description: Some("  part payment  ".to_string()),
            user_id: user_id.to_string(),
            card_id: None,
            payment_mode: PaymentMode::Online,
            online_payment_type: Some(OnlinePaymentType::BankTransfer),
        }
    }

    #[test]
    fn only_admins_record_payments() {
        let (mut engine, admin, bob) = setup();
        let err = engine.new_transaction(&bob, draft(&bob.id)).unwrap_err();
        assert!(matches!(err, EngineError::Forbidden(_)));

        let id = engine.new_transaction(&admin, draft(&bob.id)).unwrap();
        let tx = engine.store.transaction(&id).unwrap();
        assert_eq!(tx.description.as_deref(), Some("part payment"));
    }

    #[test]
    fn card_reference_must_exist_at_write() {
        let (mut engine, admin, bob) = setup();
        let mut d = draft(&bob.id);
        d.card_id = Some("ghost".to_string());
        let err = engine.new_transaction(&admin, d).unwrap_err();
        assert!(matches!(err, EngineError::KeyNotFound(_)));
    }

    #[test]
    fn update_replaces_in_place() {
        let (mut engine, admin, bob) = setup();
        let id = engine.new_transaction(&admin, draft(&bob.id)).unwrap();

        let mut d = draft(&bob.id);
        d.amount = 750;
        engine.update_transaction(&admin, &id, d).unwrap();

        let tx = engine.store.transaction(&id).unwrap();
        assert_eq!(tx.amount, 750);
        assert_eq!(engine.snapshot().transactions.len(), 1);
    }
}
