//! Aggregation over filtered orders and scoped transactions.
//!
//! All functions are total: a record referencing a missing entity degrades
//! the single figure it feeds, never the whole computation.

use std::collections::HashMap;

use crate::{CreditCard, Order, ResultEngine, Transaction, User};

use super::{Engine, OrderFilter, filter_orders};

/// Dashboard summary figures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_phones: usize,
    pub total_invested: i64,
    pub total_invested_after_cashback: i64,
    /// Recorded payment transactions only; a sale without a recorded payment
    /// is not "received".
    pub total_received: i64,
    /// `total_invested - total_received`. May go negative when receipts
    /// exceed the investment visible under the current filter; that is
    /// allowed, not an error.
    pub total_pending: i64,
    pub total_profit: i64,
    /// Integer division over the number of sold orders; 0 when none sold.
    pub avg_profit: i64,
}

pub fn compute_stats(filtered_orders: &[Order], scoped_transactions: &[Transaction]) -> Stats {
    let total_invested: i64 = filtered_orders.iter().map(|o| o.ordered_price).sum();
    let total_invested_after_cashback: i64 = filtered_orders.iter().map(|o| o.net_cost()).sum();
    let total_received: i64 = scoped_transactions.iter().map(|tx| tx.amount).sum();

    let sold_count = filtered_orders.iter().filter(|o| o.is_sold()).count();
    let total_profit: i64 = filtered_orders.iter().filter_map(|o| o.profit()).sum();
    let avg_profit = if sold_count > 0 {
        total_profit / sold_count as i64
    } else {
        0
    };

    Stats {
        total_phones: filtered_orders.len(),
        total_invested,
        total_invested_after_cashback,
        total_received,
        total_pending: total_invested - total_received,
        total_profit,
        avg_profit,
    }
}

/// Cashback earned over `orders`, optionally narrowed to one user.
///
/// This uses its own user filter, independent of the shared order filter
/// criteria; date, card and dealer never apply to cashback reporting.
pub fn cashback_total(orders: &[Order], user_filter: Option<&str>) -> i64 {
    orders
        .iter()
        .filter(|order| user_filter.is_none_or(|user_id| order.user_id == user_id))
        .map(|order| order.cashback)
        .sum()
}

/// Running balance of one card: ordered prices charged to it minus payments
/// recorded against it. Computed over unfiltered (access-scoped only)
/// collections; card bills ignore the dashboard filters.
pub fn credit_card_bill(card_id: &str, orders: &[Order], transactions: &[Transaction]) -> i64 {
    let spent: i64 = orders
        .iter()
        .filter(|order| order.card_id == card_id)
        .map(|order| order.ordered_price)
        .sum();
    let paid: i64 = transactions
        .iter()
        .filter(|tx| tx.card_id.as_deref() == Some(card_id))
        .map(|tx| tx.amount)
        .sum();
    spent - paid
}

/// Bill per known card. Transactions referencing an unknown card are
/// ignored rather than failing the computation.
pub fn card_bills(
    cards: &[CreditCard],
    orders: &[Order],
    transactions: &[Transaction],
) -> HashMap<String, i64> {
    cards
        .iter()
        .map(|card| {
            (
                card.id.clone(),
                credit_card_bill(&card.id, orders, transactions),
            )
        })
        .collect()
}

impl Engine {
    /// Full pipeline: scope, normalize + apply the order filter, aggregate.
    /// Transactions stay scoped but unfiltered, matching the dashboard.
    pub fn stats(&self, acting: Option<&User>, filter: &OrderFilter) -> ResultEngine<Stats> {
        let scoped = self.scoped(acting)?;
        let filter = filter.normalized(&scoped.cards);
        let filtered = filter_orders(&scoped.orders, &filter);
        Ok(compute_stats(&filtered, &scoped.transactions))
    }

    /// Cashback figure for the dashboard card. A regular user always gets
    /// their own total; the user filter only means something to admins.
    pub fn cashback(&self, acting: Option<&User>, user_filter: Option<&str>) -> ResultEngine<i64> {
        let scoped = self.scoped(acting)?;
        Ok(cashback_total(&scoped.orders, user_filter))
    }

    /// Scoped cards with their running bills, in store order.
    pub fn card_bills(&self, acting: Option<&User>) -> ResultEngine<Vec<(CreditCard, i64)>> {
        let scoped = self.scoped(acting)?;
        Ok(scoped
            .cards
            .iter()
            .map(|card| {
                (
                    card.clone(),
                    credit_card_bill(&card.id, &scoped.orders, &scoped.transactions),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::{OnlinePaymentType, PaymentMode};

    fn order(id: &str, price: i64, cashback: i64, selling: Option<i64>) -> Order {
        Order {
            id: id.to_string(),
            model: "Pixel".to_string(),
            variant: String::new(),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ordered_price: price,
            cashback,
            user_id: "u1".to_string(),
            card_id: "c1".to_string(),
            delivery_date: None,
            selling_price: selling,
            dealer: None,
        }
    }

    fn payment(id: &str, amount: i64, card_id: Option<&str>) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            amount,
            dealer: "Acme".to_string(),
            description: None,
            user_id: "u1".to_string(),
            card_id: card_id.map(ToString::to_string),
            payment_mode: PaymentMode::Online,
            online_payment_type: Some(OnlinePaymentType::Upi),
        }
    }

    #[test]
    fn single_sold_order_no_payments() {
        // Scenario A from the dashboard figures.
        let orders = vec![order("o1", 1000, 100, Some(1200))];
        let stats = compute_stats(&orders, &[]);
        assert_eq!(stats.total_phones, 1);
        assert_eq!(stats.total_invested, 1000);
        assert_eq!(stats.total_invested_after_cashback, 900);
        assert_eq!(stats.total_profit, 300);
        assert_eq!(stats.avg_profit, 300);
        assert_eq!(stats.total_received, 0);
        assert_eq!(stats.total_pending, 1000);
    }

    #[test]
    fn avg_profit_counts_only_sold_orders() {
        let orders = vec![order("o1", 1000, 0, Some(1400)), order("o2", 800, 0, None)];
        let stats = compute_stats(&orders, &[]);
        assert_eq!(stats.total_phones, 2);
        assert_eq!(stats.total_profit, 400);
        assert_eq!(stats.avg_profit, 400);
    }

    #[test]
    fn avg_profit_zero_when_nothing_sold() {
        let orders = vec![order("o1", 1000, 0, None)];
        let stats = compute_stats(&orders, &[]);
        assert_eq!(stats.avg_profit, 0);
        assert_eq!(stats.total_profit, 0);
    }

    #[test]
    fn pending_may_go_negative() {
        let orders = vec![order("o1", 100, 0, None)];
        let txs = vec![payment("t1", 500, None)];
        let stats = compute_stats(&orders, &txs);
        assert_eq!(stats.total_received, 500);
        assert_eq!(stats.total_pending, -400);
    }

    #[test]
    fn card_bill_tracks_orders_and_payments() {
        let orders = vec![order("o1", 1000, 0, None), order("o2", 700, 0, None)];
        let txs = vec![payment("t1", 300, Some("c1"))];
        assert_eq!(credit_card_bill("c1", &orders, &txs), 1400);

        // Each payment against the card lowers the bill by its amount,
        // each order charged to it raises it by the ordered price.
        let more_txs = vec![payment("t1", 300, Some("c1")), payment("t2", 250, Some("c1"))];
        assert_eq!(credit_card_bill("c1", &orders, &more_txs), 1150);
    }

    #[test]
    fn unknown_card_reference_is_tolerated() {
        let orders = vec![order("o1", 1000, 0, None)];
        let txs = vec![payment("t1", 300, Some("ghost"))];
        let cards = vec![CreditCard {
            id: "c1".to_string(),
            name: "Card".to_string(),
            card_number: "4111111111111111".to_string(),
            user_id: "u1".to_string(),
        }];
        let bills = card_bills(&cards, &orders, &txs);
        assert_eq!(bills.get("c1"), Some(&1000));
        assert_eq!(bills.len(), 1);
    }

    #[test]
    fn cashback_ignores_other_filters() {
        let mut o1 = order("o1", 1000, 150, None);
        o1.user_id = "u1".to_string();
        let mut o2 = order("o2", 500, 50, None);
        o2.user_id = "u2".to_string();
        let orders = vec![o1, o2];
        assert_eq!(cashback_total(&orders, None), 200);
        assert_eq!(cashback_total(&orders, Some("u1")), 150);
        assert_eq!(cashback_total(&orders, Some("ghost")), 0);
    }
}
