//! Phone purchase orders.
//!
//! An order is charged to one credit card owned by the ordering user. An
//! order is *sold* once a selling price is recorded; selling does not by
//! itself count as money received, only a recorded payment does.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Phone model, e.g. "iPhone 15".
    pub model: String,
    /// Storage/colour variant, e.g. "256GB Black".
    pub variant: String,
    pub order_date: NaiveDate,
    pub ordered_price: i64,
    #[serde(default)]
    pub cashback: i64,
    pub user_id: String,
    pub card_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealer: Option<String>,
}

/// Everything needed to build an [`Order`]; validation happens in
/// [`Order::new`] so handlers can forward payloads untouched.
#[derive(Clone, Debug)]
pub struct OrderDraft {
    pub model: String,
    pub variant: String,
    pub order_date: NaiveDate,
    pub ordered_price: i64,
    pub cashback: i64,
    pub user_id: String,
    pub card_id: String,
    pub delivery_date: Option<NaiveDate>,
    pub selling_price: Option<i64>,
    pub dealer: Option<String>,
}

impl Order {
    pub fn new(draft: OrderDraft) -> ResultEngine<Self> {
        let model = draft.model.trim().to_string();
        if model.is_empty() {
            return Err(EngineError::InvalidInput(
                "order model must not be empty".to_string(),
            ));
        }
        if draft.ordered_price < 0 {
            return Err(EngineError::InvalidInput(
                "ordered price must be >= 0".to_string(),
            ));
        }
        if draft.cashback < 0 {
            return Err(EngineError::InvalidInput(
                "cashback must be >= 0".to_string(),
            ));
        }
        if draft.selling_price.is_some_and(|price| price < 0) {
            return Err(EngineError::InvalidInput(
                "selling price must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            model,
            variant: draft.variant.trim().to_string(),
            order_date: draft.order_date,
            ordered_price: draft.ordered_price,
            cashback: draft.cashback,
            user_id: draft.user_id,
            card_id: draft.card_id,
            delivery_date: draft.delivery_date,
            selling_price: draft.selling_price,
            dealer: draft
                .dealer
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }

    pub fn is_sold(&self) -> bool {
        self.selling_price.is_some()
    }

    pub fn net_cost(&self) -> i64 {
        self.ordered_price - self.cashback
    }

    /// Profit for a sold order, `None` while it is still in stock.
    pub fn profit(&self) -> Option<i64> {
        self.selling_price.map(|price| price - self.net_cost())
    }

    /// Profit as a percentage of the net cost. Undefined when the order is
    /// unsold or the net cost is not positive.
    pub fn profit_percent(&self) -> Option<f64> {
        let profit = self.profit()?;
        let net_cost = self.net_cost();
        (net_cost > 0).then(|| profit as f64 / net_cost as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> OrderDraft {
        OrderDraft {
            model: "Pixel 9".to_string(),
            variant: "128GB".to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            ordered_price: 1000,
            cashback: 100,
            user_id: "u1".to_string(),
            card_id: "c1".to_string(),
            delivery_date: None,
            selling_price: None,
            dealer: Some("  Acme  ".to_string()),
        }
    }

    #[test]
    fn profit_uses_net_cost() {
        let mut order = Order::new(draft()).unwrap();
        assert_eq!(order.net_cost(), 900);
        assert!(!order.is_sold());
        assert_eq!(order.profit(), None);

        order.selling_price = Some(1200);
        assert!(order.is_sold());
        assert_eq!(order.profit(), Some(300));
        let percent = order.profit_percent().unwrap();
        assert!((percent - 300.0 / 900.0 * 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn profit_percent_undefined_for_zero_net_cost() {
        let mut d = draft();
        d.ordered_price = 100;
        d.cashback = 100;
        d.selling_price = Some(50);
        let order = Order::new(d).unwrap();
        assert_eq!(order.profit(), Some(50));
        assert_eq!(order.profit_percent(), None);
    }

    #[test]
    fn dealer_label_is_trimmed() {
        let order = Order::new(draft()).unwrap();
        assert_eq!(order.dealer.as_deref(), Some("Acme"));
    }

    #[test]
    fn rejects_negative_amounts() {
        let mut d = draft();
        d.cashback = -1;
        assert!(Order::new(d).is_err());
    }
}
