//! Request/response types of the FoneFlow HTTP API.
//!
//! Shared between the server and any client; carries no engine logic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Account role as exposed over the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        pub password: String,
        pub role: Role,
    }

    /// Full replacement of a user record. `password: None` keeps the
    /// current password.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserUpdate {
        pub name: String,
        pub email: String,
        pub password: Option<String>,
        pub role: Role,
    }

    /// Never carries the password.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: String,
        pub name: String,
        pub email: String,
        pub role: Role,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserCreated {
        pub id: String,
    }
}

pub mod card {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardNew {
        pub name: String,
        pub card_number: String,
        /// Defaults to the acting user; only admins may set someone else.
        pub user_id: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardUpdate {
        pub name: String,
        pub card_number: String,
        pub user_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardView {
        pub id: String,
        pub name: String,
        pub card_number: String,
        /// Last four digits, for masked display ("···· 1234").
        pub card_suffix: String,
        pub user_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardCreated {
        pub id: String,
    }

    /// One row of the "Card Bills" tab: amount spent on orders minus
    /// payments recorded against the card.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardBillView {
        pub card: CardView,
        pub bill: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardBillsResponse {
        pub bills: Vec<CardBillView>,
    }
}

pub mod order {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderNew {
        pub model: String,
        pub variant: String,
        pub order_date: NaiveDate,
        pub ordered_price: i64,
        #[serde(default)]
        pub cashback: i64,
        /// Defaults to the acting user; only admins may set someone else.
        pub user_id: Option<String>,
        pub card_id: String,
        pub delivery_date: Option<NaiveDate>,
        pub selling_price: Option<i64>,
        pub dealer: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderUpdate {
        pub model: String,
        pub variant: String,
        pub order_date: NaiveDate,
        pub ordered_price: i64,
        #[serde(default)]
        pub cashback: i64,
        pub user_id: String,
        pub card_id: String,
        pub delivery_date: Option<NaiveDate>,
        pub selling_price: Option<i64>,
        pub dealer: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderView {
        pub id: String,
        pub model: String,
        pub variant: String,
        pub order_date: NaiveDate,
        pub ordered_price: i64,
        pub cashback: i64,
        pub net_cost: i64,
        pub user_id: String,
        pub card_id: String,
        pub delivery_date: Option<NaiveDate>,
        pub selling_price: Option<i64>,
        pub profit: Option<i64>,
        pub profit_percent: Option<f64>,
        pub dealer: Option<String>,
        pub sold: bool,
    }

    /// Filter criteria for order lists and statistics, all optional.
    /// `from`/`to` are inclusive.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct OrderListQuery {
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
        pub user: Option<String>,
        pub card: Option<String>,
        pub dealer: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderListResponse {
        pub orders: Vec<OrderView>,
        /// Distinct dealer labels of the scoped orders, for the filter
        /// dropdown.
        pub dealers: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderCreated {
        pub id: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentMode {
        Cash,
        Online,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum OnlinePaymentType {
        Upi,
        BankTransfer,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub date: NaiveDate,
        pub amount: i64,
        pub dealer: String,
        pub description: Option<String>,
        pub user_id: String,
        pub card_id: Option<String>,
        pub payment_mode: PaymentMode,
        pub online_payment_type: Option<OnlinePaymentType>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: String,
        pub date: NaiveDate,
        pub amount: i64,
        pub dealer: String,
        pub description: Option<String>,
        pub user_id: String,
        pub card_id: Option<String>,
        pub payment_mode: PaymentMode,
        pub online_payment_type: Option<OnlinePaymentType>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: String,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Statistic {
        pub total_phones: usize,
        pub total_invested: i64,
        pub total_invested_after_cashback: i64,
        pub total_received: i64,
        pub total_pending: i64,
        pub total_profit: i64,
        pub avg_profit: i64,
    }

    /// Cashback reporting uses its own user filter, independent of the
    /// shared order filter.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CashbackQuery {
        pub user: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashbackResponse {
        pub total_cashback: i64,
    }
}
