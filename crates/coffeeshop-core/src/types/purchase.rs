//! Purchase types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// A purchase as returned by `/purchase/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub user_id: i64,
    pub coffee_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coffee_name: Option<String>,
    pub quantity: i64,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Purchase {
    /// Returns the best available timestamp for display.
    pub fn date(&self) -> Option<&str> {
        self.purchase_date
            .as_deref()
            .or(self.created_at.as_deref())
    }
}

/// Request body for creating a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewPurchase {
    pub coffee_id: i64,
    pub quantity: i64,
}

impl NewPurchase {
    /// Check the form-level rules before contacting the server.
    pub fn validate(&self) -> Result<(), Error> {
        if self.quantity < 1 {
            return Err(InvalidInputError::field("quantity", "must be at least 1").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_parses_server_shape() {
        let json = r#"{"id":5,"user_id":2,"coffee_id":1,"coffee_name":"Mocha",
            "quantity":2,"total_price":7.0,"purchase_date":"2024-03-01T10:00:00"}"#;
        let purchase: Purchase = serde_json::from_str(json).unwrap();
        assert_eq!(purchase.coffee_name.as_deref(), Some("Mocha"));
        assert_eq!(purchase.date(), Some("2024-03-01T10:00:00"));
    }

    #[test]
    fn date_falls_back_to_created_at() {
        let json = r#"{"id":5,"user_id":2,"coffee_id":1,"quantity":1,
            "total_price":3.5,"created_at":"2024-03-02"}"#;
        let purchase: Purchase = serde_json::from_str(json).unwrap();
        assert_eq!(purchase.date(), Some("2024-03-02"));
    }

    #[test]
    fn quantity_must_be_positive() {
        let purchase = NewPurchase {
            coffee_id: 1,
            quantity: 0,
        };
        assert!(purchase.validate().is_err());
    }
}
