//! Coffee catalogue types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// A coffee as listed by `/coffee/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coffee {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Coffee {
    /// Returns true if at least one unit can be purchased.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Request body for creating a coffee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCoffee {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

impl NewCoffee {
    /// Check the form-level rules before contacting the server.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(InvalidInputError::field("name", "must not be empty").into());
        }
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        Ok(())
    }
}

/// Partial update for `PUT /coffee/{id}`. Unset fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoffeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl CoffeePatch {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
    }

    /// Check the fields that are set.
    pub fn validate(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(InvalidInputError::Other {
                message: "update must change at least one field".to_string(),
            }
            .into());
        }
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(InvalidInputError::field("name", "must not be empty").into());
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        Ok(())
    }
}

fn validate_price(price: f64) -> Result<(), Error> {
    if !price.is_finite() || price < 0.0 {
        return Err(InvalidInputError::field("price", "must be a non-negative number").into());
    }
    Ok(())
}

fn validate_stock(stock: i64) -> Result<(), Error> {
    if stock < 0 {
        return Err(InvalidInputError::field("stock", "must not be negative").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coffee_parses_server_listing() {
        let json = r#"{"id":1,"name":"Espresso","description":"Strong","price":2.5,"stock":10}"#;
        let coffee: Coffee = serde_json::from_str(json).unwrap();
        assert_eq!(coffee.name, "Espresso");
        assert!(coffee.in_stock());
        assert!(coffee.created_at.is_none());
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = CoffeePatch {
            price: Some(3.0),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({"price": 3.0}));
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(CoffeePatch::default().is_empty());
        assert!(CoffeePatch::default().validate().is_err());
    }

    #[test]
    fn new_coffee_validation() {
        let mut coffee = NewCoffee {
            name: "Latte".to_string(),
            description: String::new(),
            price: 3.5,
            stock: 4,
        };
        assert!(coffee.validate().is_ok());

        coffee.price = -1.0;
        assert!(coffee.validate().is_err());

        coffee.price = f64::NAN;
        assert!(coffee.validate().is_err());

        coffee.price = 1.0;
        coffee.stock = -2;
        assert!(coffee.validate().is_err());

        coffee.stock = 0;
        coffee.name = "  ".to_string();
        assert!(coffee.validate().is_err());
    }
}
