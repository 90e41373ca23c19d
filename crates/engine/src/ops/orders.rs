//! Order management.
//!
//! Creation and edits check that the charged card exists and belongs to the
//! ordering user; a user cannot order against another user's card.

use crate::{EngineError, Order, OrderDraft, ResultEngine, User};

use super::Engine;

impl Engine {
    fn require_order(&self, order_id: &str) -> ResultEngine<&Order> {
        self.store
            .order(order_id)
            .ok_or_else(|| EngineError::KeyNotFound("order not exists".to_string()))
    }

    fn check_order_refs(&self, acting: &User, draft: &OrderDraft) -> ResultEngine<()> {
        if !acting.role.is_admin() && draft.user_id != acting.id {
            return Err(EngineError::Forbidden(
                "cannot manage orders of another user".to_string(),
            ));
        }
        self.require_user(&draft.user_id)?;
        let card = self
            .store
            .card(&draft.card_id)
            .ok_or_else(|| EngineError::KeyNotFound("card not exists".to_string()))?;
        if card.user_id != draft.user_id {
            return Err(EngineError::InvalidInput(
                "card belongs to a different user".to_string(),
            ));
        }
        Ok(())
    }

    pub fn new_order(&mut self, acting: &User, draft: OrderDraft) -> ResultEngine<String> {
        self.check_order_refs(acting, &draft)?;
        let order = Order::new(draft)?;
        let id = order.id.clone();
        self.store.insert_order(order)?;
        self.store.commit()?;
        Ok(id)
    }

    /// Full replace by id.
    pub fn update_order(
        &mut self,
        acting: &User,
        order_id: &str,
        draft: OrderDraft,
    ) -> ResultEngine<()> {
        let current = self.require_order(order_id)?;
        if !acting.role.is_admin() && current.user_id != acting.id {
            return Err(EngineError::KeyNotFound("order not exists".to_string()));
        }
        self.check_order_refs(acting, &draft)?;

        let mut replacement = Order::new(draft)?;
        replacement.id = order_id.to_string();
        self.store.replace_order(replacement)?;
        self.store.commit()?;
        Ok(())
    }

    pub fn delete_order(&mut self, acting: &User, order_id: &str) -> ResultEngine<()> {
        let current = self.require_order(order_id)?;
        if !acting.role.is_admin() && current.user_id != acting.id {
            return Err(EngineError::KeyNotFound("order not exists".to_string()));
        }
        self.store.remove_order(order_id)?;
        self.store.commit()?;
        Ok(())
    }
}
