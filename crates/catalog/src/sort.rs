//! Sort engine.
//!
//! Every key falls back to ascending id on ties, so ordering never depends on
//! the input order and sorting twice gives the same result.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::DomainError;

use crate::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Ascending id ("most popular" in the storefront UI).
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    /// Best rated first.
    Rating,
    /// Title A to Z.
    Name,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Name => "name",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self {
            SortKey::Default => Ordering::Equal,
            SortKey::PriceLow => a.price.total_cmp(&b.price),
            SortKey::PriceHigh => b.price.total_cmp(&a.price),
            SortKey::Rating => b.rating.rate.total_cmp(&a.rating.rate),
            SortKey::Name => compare_titles(&a.title, &b.title),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" => Ok(SortKey::Default),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            "name" => Ok(SortKey::Name),
            other => Err(DomainError::invalid_input(format!(
                "sort must be one of: default, price-low, price-high, rating, name (got {other:?})"
            ))),
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Case-folded comparison first so "apple" and "Apple" sit together, then the
// raw titles to keep the order total.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Produce a new ordered sequence; the input is left untouched.
pub fn sort(list: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = list.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::product;

    fn prices(list: &[Product]) -> Vec<f64> {
        list.iter().map(|p| p.price).collect()
    }

    fn ids(list: &[Product]) -> Vec<u64> {
        list.iter().map(|p| p.id.get()).collect()
    }

    fn sample() -> Vec<Product> {
        vec![
            product(3, "banana stand", "misc", 10.0, 3.5),
            product(1, "Apple Watch", "electronics", 900.0, 4.8),
            product(2, "apple pie tin", "kitchen", 50.0, 3.5),
        ]
    }

    #[test]
    fn price_high_orders_descending() {
        let sorted = sort(&sample(), SortKey::PriceHigh);
        assert_eq!(prices(&sorted), vec![900.0, 50.0, 10.0]);
    }

    #[test]
    fn price_low_orders_ascending() {
        let sorted = sort(&sample(), SortKey::PriceLow);
        assert_eq!(prices(&sorted), vec![10.0, 50.0, 900.0]);
    }

    #[test]
    fn default_orders_by_id() {
        assert_eq!(ids(&sort(&sample(), SortKey::Default)), vec![1, 2, 3]);
    }

    #[test]
    fn rating_orders_best_first_with_id_tie_break() {
        assert_eq!(ids(&sort(&sample(), SortKey::Rating)), vec![1, 2, 3]);
    }

    #[test]
    fn name_ignores_case() {
        let titles: Vec<String> = sort(&sample(), SortKey::Name)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["apple pie tin", "Apple Watch", "banana stand"]);
    }

    #[test]
    fn equal_prices_fall_back_to_id() {
        let list = vec![
            product(9, "b", "x", 5.0, 1.0),
            product(4, "a", "x", 5.0, 1.0),
            product(6, "c", "x", 5.0, 1.0),
        ];
        assert_eq!(ids(&sort(&list, SortKey::PriceHigh)), vec![4, 6, 9]);
        assert_eq!(ids(&sort(&list, SortKey::PriceLow)), vec![4, 6, 9]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let list = sample();
        let before = list.clone();
        let _ = sort(&list, SortKey::PriceLow);
        assert_eq!(list, before);
    }

    #[test]
    fn sort_key_parses_and_displays_wire_names() {
        for key in [
            SortKey::Default,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Rating,
            SortKey::Name,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_key() -> impl Strategy<Value = SortKey> {
            prop_oneof![
                Just(SortKey::Default),
                Just(SortKey::PriceLow),
                Just(SortKey::PriceHigh),
                Just(SortKey::Rating),
                Just(SortKey::Name),
            ]
        }

        fn arb_list() -> impl Strategy<Value = Vec<Product>> {
            // Coarse prices/ratings so ties are frequent.
            prop::collection::vec(("[a-cA-C]{1,3}", 0u8..5, 0u8..6), 0..30).prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (title, price, rate))| {
                        product(i as i64 + 1, &title, "c", price as f64, rate as f64)
                    })
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: sorting an already sorted list changes nothing.
            #[test]
            fn sort_is_idempotent(list in arb_list(), key in arb_key()) {
                let once = sort(&list, key);
                let twice = sort(&once, key);
                prop_assert_eq!(once, twice);
            }

            /// Property: the result does not depend on the input order.
            #[test]
            fn sort_is_input_order_independent(list in arb_list(), key in arb_key()) {
                let mut reversed = list.clone();
                reversed.reverse();
                prop_assert_eq!(sort(&list, key), sort(&reversed, key));
            }

            /// Property: sorting is a permutation.
            #[test]
            fn sort_keeps_every_product(list in arb_list(), key in arb_key()) {
                let sorted = sort(&list, key);
                prop_assert_eq!(sorted.len(), list.len());
                prop_assert!(list.iter().all(|p| sorted.contains(p)));
            }
        }
    }
}
