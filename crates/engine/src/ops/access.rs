//! Access scope resolver.
//!
//! Every read starts here: the raw collections are narrowed to what the
//! acting user may see *before* any filtering or aggregation runs, so a
//! non-admin can never reconstruct restricted rows through the later stages.

use crate::{CreditCard, EngineError, Order, ResultEngine, Role, Snapshot, Transaction, User};

use super::Engine;

/// The subset of each collection the acting user is permitted to see.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopedCollections {
    pub users: Vec<User>,
    pub cards: Vec<CreditCard>,
    pub orders: Vec<Order>,
    pub transactions: Vec<Transaction>,
}

/// Pure function of its inputs; no side effects.
///
/// - No acting user: [`EngineError::Unauthenticated`], the caller redirects
///   to login.
/// - Admin: all four collections unchanged.
/// - Regular user: only their own rows, and only themselves in `users`.
pub fn scope(acting: Option<&User>, snapshot: &Snapshot) -> ResultEngine<ScopedCollections> {
    let Some(acting) = acting else {
        return Err(EngineError::Unauthenticated);
    };

    match acting.role {
        Role::Admin => Ok(ScopedCollections {
            users: snapshot.users.clone(),
            cards: snapshot.cards.clone(),
            orders: snapshot.orders.clone(),
            transactions: snapshot.transactions.clone(),
        }),
        Role::User => Ok(ScopedCollections {
            users: vec![acting.clone()],
            cards: snapshot
                .cards
                .iter()
                .filter(|card| card.user_id == acting.id)
                .cloned()
                .collect(),
            orders: snapshot
                .orders
                .iter()
                .filter(|order| order.user_id == acting.id)
                .cloned()
                .collect(),
            transactions: snapshot
                .transactions
                .iter()
                .filter(|tx| tx.user_id == acting.id)
                .cloned()
                .collect(),
        }),
    }
}

impl Engine {
    /// Scoped view over the current store snapshot.
    pub fn scoped(&self, acting: Option<&User>) -> ResultEngine<ScopedCollections> {
        scope(acting, &self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            password: "pw".to_string(),
            role,
        }
    }

    fn order(id: &str, user_id: &str) -> Order {
        Order {
            id: id.to_string(),
            model: "Pixel".to_string(),
            variant: String::new(),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ordered_price: 100,
            cashback: 0,
            user_id: user_id.to_string(),
            card_id: "c1".to_string(),
            delivery_date: None,
            selling_price: None,
            dealer: None,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            users: vec![user("admin", Role::Admin), user("u1", Role::User)],
            cards: vec![
                CreditCard {
                    id: "c1".to_string(),
                    name: "Card".to_string(),
                    card_number: "4111111111111111".to_string(),
                    user_id: "u1".to_string(),
                },
                CreditCard {
                    id: "c2".to_string(),
                    name: "Other".to_string(),
                    card_number: "4222222222222222".to_string(),
                    user_id: "admin".to_string(),
                },
            ],
            orders: vec![order("o1", "u1"), order("o2", "admin")],
            transactions: Vec::new(),
        }
    }

    #[test]
    fn missing_actor_is_unauthenticated() {
        assert_eq!(
            scope(None, &snapshot()).unwrap_err(),
            EngineError::Unauthenticated
        );
    }

    #[test]
    fn admin_sees_everything_unchanged() {
        let snap = snapshot();
        let admin = user("admin", Role::Admin);
        let scoped = scope(Some(&admin), &snap).unwrap();
        assert_eq!(scoped.users, snap.users);
        assert_eq!(scoped.cards, snap.cards);
        assert_eq!(scoped.orders, snap.orders);
        assert_eq!(scoped.transactions, snap.transactions);
    }

    #[test]
    fn regular_user_only_sees_own_rows() {
        let snap = snapshot();
        let u1 = user("u1", Role::User);
        let scoped = scope(Some(&u1), &snap).unwrap();
        assert_eq!(scoped.users, vec![u1.clone()]);
        assert!(scoped.cards.iter().all(|card| card.user_id == "u1"));
        assert!(scoped.orders.iter().all(|order| order.user_id == "u1"));
        assert_eq!(scoped.orders.len(), 1);
    }

    #[test]
    fn user_without_data_gets_empty_collections() {
        let snap = snapshot();
        let u2 = user("u2", Role::User);
        let scoped = scope(Some(&u2), &snap).unwrap();
        assert_eq!(scoped.users, vec![u2]);
        assert!(scoped.cards.is_empty());
        assert!(scoped.orders.is_empty());
        assert!(scoped.transactions.is_empty());
    }
}
