//! Payments received from dealers.
//!
//! Transactions are the authoritative record of money received; they also
//! pay down the bill of the card they reference.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    Cash,
    Online,
}

impl PaymentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Online => "online",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnlinePaymentType {
    Upi,
    BankTransfer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub dealer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: String,
    /// Card being paid down. Optional: cash collected but not yet applied to
    /// a card has no card reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    pub payment_mode: PaymentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_payment_type: Option<OnlinePaymentType>,
}

#[derive(Clone, Debug)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub amount: i64,
    pub dealer: String,
    pub description: Option<String>,
    pub user_id: String,
    pub card_id: Option<String>,
    pub payment_mode: PaymentMode,
    pub online_payment_type: Option<OnlinePaymentType>,
}

impl Transaction {
    pub fn new(draft: TransactionDraft) -> ResultEngine<Self> {
        if draft.amount <= 0 {
            return Err(EngineError::InvalidInput("amount must be > 0".to_string()));
        }
        let dealer = draft.dealer.trim().to_string();
        if dealer.is_empty() {
            return Err(EngineError::InvalidInput(
                "dealer must not be empty".to_string(),
            ));
        }
        match (draft.payment_mode, draft.online_payment_type) {
            (PaymentMode::Online, None) => {
                return Err(EngineError::InvalidInput(
                    "online payments require an online payment type".to_string(),
                ));
            }
            (PaymentMode::Cash, Some(_)) => {
                return Err(EngineError::InvalidInput(
                    "cash payments must not carry an online payment type".to_string(),
                ));
            }
            _ => {}
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            date: draft.date,
            amount: draft.amount,
            dealer,
            description: draft
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            user_id: draft.user_id,
            card_id: draft.card_id,
            payment_mode: draft.payment_mode,
            online_payment_type: draft.online_payment_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TransactionDraft {
        TransactionDraft {
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            amount: 500,
            dealer: "Acme".to_string(),
            description: None,
            user_id: "u1".to_string(),
            card_id: Some("c1".to_string()),
            payment_mode: PaymentMode::Online,
            online_payment_type: Some(OnlinePaymentType::Upi),
        }
    }

    #[test]
    fn rejects_non_positive_amount() {
        let mut d = draft();
        d.amount = 0;
        assert!(Transaction::new(d).is_err());
    }

    #[test]
    fn online_requires_payment_type() {
        let mut d = draft();
        d.online_payment_type = None;
        assert!(Transaction::new(d).is_err());
    }

    #[test]
    fn cash_rejects_payment_type() {
        let mut d = draft();
        d.payment_mode = PaymentMode::Cash;
        assert!(Transaction::new(d).is_err());

        let mut d = draft();
        d.payment_mode = PaymentMode::Cash;
        d.online_payment_type = None;
        assert!(Transaction::new(d).is_ok());
    }
}
