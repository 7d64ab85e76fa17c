use storefront_core::ProductId;

use crate::view::CatalogView;

/// Rendering seam. Implementations draw the views; they never feed back into
/// the session except through new input events.
pub trait Presenter: Send + Sync + 'static {
    /// Replace the product grid and results header.
    fn render(&self, view: &CatalogView);

    /// Inline error in place of the grid (catalog load failures, bad input).
    fn show_error(&self, message: &str);

    /// Header badge after a successful add.
    fn cart_updated(&self, product_id: ProductId, total: u64);

    /// Transient error state on the add button; the control reverts on its own.
    fn cart_failed(&self, product_id: Option<ProductId>, message: &str);
}
