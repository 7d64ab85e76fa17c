use serde::Serialize;

use storefront_catalog::{Product, SortKey};

/// What the results header says about the current narrowing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ResultsHeading {
    /// A search term is set (shown as typed).
    Search(String),
    /// No search, but a category is selected.
    Category(String),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsSummary {
    pub heading: ResultsHeading,
    pub count: usize,
}

impl ResultsSummary {
    /// Search wins over category; rating and price never show in the heading.
    pub fn describe(search: &str, category: &str, count: usize) -> Self {
        let search = search.trim();
        let category = category.trim();
        let heading = if !search.is_empty() {
            ResultsHeading::Search(search.to_string())
        } else if !category.is_empty() && category != "all" {
            ResultsHeading::Category(category.to_string())
        } else {
            ResultsHeading::All
        };
        Self { heading, count }
    }
}

impl core::fmt::Display for ResultsSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.heading {
            ResultsHeading::Search(term) => write!(f, "Results for \"{term}\"")?,
            ResultsHeading::Category(category) => {
                write!(f, "{} Products", capitalize_first(category))?
            }
            ResultsHeading::All => f.write_str("All Products")?,
        }
        write!(f, " ({})", self.count)
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Filtered + sorted products ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub products: Vec<Product>,
    pub sort: SortKey,
    pub summary: ResultsSummary,
}

impl CatalogView {
    /// Nothing matched; the presenter shows its "no products" state.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_heading_takes_precedence() {
        let summary = ResultsSummary::describe(" Phone ", "electronics", 2);
        assert_eq!(summary.heading, ResultsHeading::Search("Phone".into()));
        assert_eq!(summary.to_string(), "Results for \"Phone\" (2)");
    }

    #[test]
    fn category_heading_is_capitalized() {
        let summary = ResultsSummary::describe("", "men's clothing", 4);
        assert_eq!(summary.to_string(), "Men's clothing Products (4)");
    }

    #[test]
    fn falls_back_to_all_products() {
        assert_eq!(ResultsSummary::describe("", "", 20).to_string(), "All Products (20)");
        assert_eq!(ResultsSummary::describe("  ", "all", 0).to_string(), "All Products (0)");
    }
}
