use serde::{Deserialize, Serialize};

use storefront_cart::CartLine;
use storefront_catalog::Product;

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub count: usize,
    pub products: Vec<Product>,
    /// Server-local `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<String>,
}

/// Add-to-cart form body. Fields stay raw so bad input maps to our own errors.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartForm {
    pub id: Option<String>,
    pub qty: Option<String>,
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub success: bool,
    pub count: u64,
    pub id: u64,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub count: u64,
    pub items: Vec<CartLine>,
}
