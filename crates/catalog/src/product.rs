use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Highest rating the catalog feed uses.
pub const MAX_RATING: f64 = 5.0;

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

impl ValueObject for Rating {}

/// Catalog product as delivered by the feed.
///
/// Immutable once fetched within a session: views are derived by cloning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub price: f64,
    pub rating: Rating,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Check the numeric ranges the filter and sort engines rely on.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::invalid_input(format!(
                "product {}: price must be a non-negative number",
                self.id
            )));
        }
        if !self.rating.rate.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating.rate) {
            return Err(DomainError::invalid_input(format!(
                "product {}: rating must be within [0, {MAX_RATING}]",
                self.id
            )));
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::product;

    #[test]
    fn deserializes_upstream_feed_shape() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Your perfect pack",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.get(), 1);
        assert_eq!(p.rating.count, 120);
        assert_eq!(p.description.as_deref(), Some("Your perfect pack"));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn description_is_optional() {
        let json = r#"{"id":2,"title":"Ring","price":9,"category":"jewelery","image":"x","rating":{"rate":4,"count":1}}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.description, None);
    }

    #[test]
    fn validate_rejects_negative_price_and_out_of_range_rating() {
        let mut p = product(1, "Phone", "electronics", -1.0, 4.0);
        assert!(matches!(p.validate(), Err(DomainError::InvalidInput(_))));

        p.price = 1.0;
        p.rating.rate = 5.5;
        assert!(matches!(p.validate(), Err(DomainError::InvalidInput(_))));

        p.rating.rate = f64::NAN;
        assert!(p.validate().is_err());
    }
}
