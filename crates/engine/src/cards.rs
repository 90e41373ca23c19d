//! Credit cards used to fund orders. A card belongs to exactly one user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

pub const CARD_NUMBER_LEN: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    /// Display label, e.g. "HDFC Regalia".
    pub name: String,
    pub card_number: String,
    pub user_id: String,
}

impl CreditCard {
    pub fn new(name: String, card_number: String, user_id: String) -> ResultEngine<Self> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(EngineError::InvalidInput(
                "card name must not be empty".to_string(),
            ));
        }
        validate_card_number(&card_number)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            card_number,
            user_id,
        })
    }

    /// Last four digits, for display without exposing the full number.
    /// Counts characters, not bytes: imported snapshots may carry card
    /// numbers that never went through [`validate_card_number`].
    pub fn masked_suffix(&self) -> String {
        let count = self.card_number.chars().count();
        self.card_number
            .chars()
            .skip(count.saturating_sub(4))
            .collect()
    }
}

pub fn validate_card_number(card_number: &str) -> ResultEngine<()> {
    if card_number.len() != CARD_NUMBER_LEN || !card_number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::InvalidInput(format!(
            "card number must be {CARD_NUMBER_LEN} digits"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sixteen_digits() {
        let card = CreditCard::new(
            "Regalia".to_string(),
            "4111111111111111".to_string(),
            "u1".to_string(),
        )
        .unwrap();
        assert_eq!(card.masked_suffix(), "1111");
    }

    #[test]
    fn masked_suffix_survives_imported_numbers() {
        // restore() accepts any string here; the suffix must not panic on
        // non-ASCII content.
        let card = CreditCard {
            id: "c1".to_string(),
            name: "Imported".to_string(),
            card_number: "•••• 1234".to_string(),
            user_id: "u1".to_string(),
        };
        assert_eq!(card.masked_suffix(), "1234");

        let short = CreditCard {
            card_number: "42".to_string(),
            ..card
        };
        assert_eq!(short.masked_suffix(), "42");
    }

    #[test]
    fn rejects_short_or_non_numeric() {
        assert!(validate_card_number("411111111111111").is_err());
        assert!(validate_card_number("4111-1111-1111-11").is_err());
    }
}
