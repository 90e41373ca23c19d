//! Order filter engine.
//!
//! Criteria are optional; `None` means "all". Runs strictly after access
//! scoping.

use chrono::NaiveDate;

use crate::{CreditCard, Order};

use super::Engine;
use crate::{ResultEngine, User};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Inclusive on both ends: an order dated exactly `from` or `to` passes.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub user_id: Option<String>,
    pub card_id: Option<String>,
    pub dealer: Option<String>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        let in_range = match self.date_range {
            Some((from, to)) => order.order_date >= from && order.order_date <= to,
            None => true,
        };
        let user_match = self
            .user_id
            .as_ref()
            .is_none_or(|user_id| order.user_id == *user_id);
        let card_match = self
            .card_id
            .as_ref()
            .is_none_or(|card_id| order.card_id == *card_id);
        let dealer_match = self
            .dealer
            .as_ref()
            .is_none_or(|dealer| order.dealer.as_ref() == Some(dealer));
        in_range && user_match && card_match && dealer_match
    }

    /// Resolves an inconsistent user/card combination.
    ///
    /// The valid card choices are restricted to cards of the selected user;
    /// a card filter not owned by that user resets to "all" instead of
    /// silently producing an empty result that looks like a bug.
    pub fn normalized(&self, cards: &[CreditCard]) -> OrderFilter {
        let mut filter = self.clone();
        if let (Some(user_id), Some(card_id)) = (&filter.user_id, &filter.card_id) {
            let owned = cards
                .iter()
                .any(|card| card.id == *card_id && card.user_id == *user_id);
            if !owned {
                filter.card_id = None;
            }
        }
        filter
    }
}

/// Returns the orders passing `filter`, preserving relative order. The input
/// is never mutated.
pub fn filter_orders(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order))
        .cloned()
        .collect()
}

/// Distinct dealer labels in first-seen order, feeding the dealer filter
/// options.
pub fn dealers(orders: &[Order]) -> Vec<String> {
    let mut seen = Vec::new();
    for order in orders {
        if let Some(dealer) = &order.dealer {
            if !seen.iter().any(|s| s == dealer) {
                seen.push(dealer.clone());
            }
        }
    }
    seen
}

impl Engine {
    /// Scope, normalize the filter against the scoped cards, then filter.
    pub fn orders_view(
        &self,
        acting: Option<&User>,
        filter: &OrderFilter,
    ) -> ResultEngine<Vec<Order>> {
        let scoped = self.scoped(acting)?;
        let filter = filter.normalized(&scoped.cards);
        Ok(filter_orders(&scoped.orders, &filter))
    }
}
