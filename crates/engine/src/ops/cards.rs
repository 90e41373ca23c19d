//! Credit card management.

use crate::{CreditCard, EngineError, ResultEngine, User, cards::validate_card_number};

use super::{Engine, normalize_required_name};

impl Engine {
    fn require_card(&self, card_id: &str) -> ResultEngine<&CreditCard> {
        self.store
            .card(card_id)
            .ok_or_else(|| EngineError::KeyNotFound("card not exists".to_string()))
    }

    /// A regular user creates cards for themselves; admins may pass any
    /// owner.
    pub fn new_card(
        &mut self,
        acting: &User,
        name: &str,
        card_number: &str,
        user_id: Option<&str>,
    ) -> ResultEngine<String> {
        let owner_id = match user_id {
            Some(id) if acting.role.is_admin() || id == acting.id => id.to_string(),
            Some(_) => {
                return Err(EngineError::Forbidden(
                    "cannot create a card for another user".to_string(),
                ));
            }
            None => acting.id.clone(),
        };
        self.require_user(&owner_id)?;

        let name = normalize_required_name(name, "card")?;
        let card = CreditCard::new(name, card_number.to_string(), owner_id)?;
        let id = card.id.clone();
        self.store.insert_card(card)?;
        self.store.commit()?;
        Ok(id)
    }

    pub fn update_card(
        &mut self,
        acting: &User,
        card_id: &str,
        name: &str,
        card_number: &str,
        user_id: &str,
    ) -> ResultEngine<()> {
        let current = self.require_card(card_id)?.clone();
        if !acting.role.is_admin() {
            if current.user_id != acting.id {
                return Err(EngineError::KeyNotFound("card not exists".to_string()));
            }
            if user_id != acting.id {
                return Err(EngineError::Forbidden(
                    "cannot move a card to another user".to_string(),
                ));
            }
        }
        self.require_user(user_id)?;
        // Orders pin the card to its owner; re-assigning would break the
        // order/card ownership invariant.
        if user_id != current.user_id
            && self
                .store
                .orders()
                .iter()
                .any(|order| order.card_id == card_id)
        {
            return Err(EngineError::InUse(format!("card {card_id} has orders")));
        }

        let name = normalize_required_name(name, "card")?;
        validate_card_number(card_number)?;
        self.store.replace_card(CreditCard {
            id: current.id,
            name,
            card_number: card_number.to_string(),
            user_id: user_id.to_string(),
        })?;
        self.store.commit()?;
        Ok(())
    }

    pub fn delete_card(&mut self, acting: &User, card_id: &str) -> ResultEngine<()> {
        let current = self.require_card(card_id)?;
        if !acting.role.is_admin() && current.user_id != acting.id {
            return Err(EngineError::KeyNotFound("card not exists".to_string()));
        }
        if self
            .store
            .orders()
            .iter()
            .any(|order| order.card_id == card_id)
        {
            return Err(EngineError::InUse(format!("card {card_id} has orders")));
        }
        self.store.remove_card(card_id)?;
        self.store.commit()?;
        Ok(())
    }
}
