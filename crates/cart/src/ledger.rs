use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, AggregateRoot, DomainError, DomainResult, ProductId, SessionId};

/// Quantity used when the caller gives none, or a non-positive one.
pub const DEFAULT_QUANTITY: u64 = 1;

/// One ledger entry (quantity is always >= 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub quantity: u64,
}

/// Aggregate root: the session cart.
///
/// Increment-only: there is no removal, entries accumulate on repeat adds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLedger {
    id: SessionId,
    entries: BTreeMap<ProductId, u64>,
    version: u64,
}

impl CartLedger {
    pub fn empty(id: SessionId) -> Self {
        Self {
            id,
            entries: BTreeMap::new(),
            version: 0,
        }
    }

    /// Validate, decide and apply an add in one step; returns the new total.
    ///
    /// `qty <= 0` is replaced by the default of 1 rather than rejected.
    pub fn add_to_cart(&mut self, product_id: i64, qty: i64) -> DomainResult<u64> {
        let cmd = CartCommand::AddItem(AddItem::new(product_id, qty)?);
        for event in self.handle(&cmd)? {
            self.apply(&event);
        }
        Ok(self.total_count())
    }

    /// Sum of all quantities.
    pub fn total_count(&self) -> u64 {
        self.entries.values().sum()
    }

    /// Quantity for one product; 0 when absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u64 {
        self.entries.get(&product_id).copied().unwrap_or(0)
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.entries
            .iter()
            .map(|(id, quantity)| CartLine {
                id: *id,
                quantity: *quantity,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        if cmd.quantity == 0 {
            return Err(DomainError::invalid_input("quantity must be positive"));
        }
        // Reject before apply so the ledger never wraps.
        self.quantity_of(cmd.product_id)
            .checked_add(cmd.quantity)
            .and_then(|_| self.total_count().checked_add(cmd.quantity))
            .ok_or_else(|| DomainError::invariant("cart quantity overflow"))?;

        Ok(vec![CartEvent::ItemAdded {
            product_id: cmd.product_id,
            quantity: cmd.quantity,
        }])
    }
}

impl AggregateRoot for CartLedger {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: add a product (or more of it) to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub product_id: ProductId,
    pub quantity: u64,
}

impl AddItem {
    pub fn new(product_id: i64, qty: i64) -> DomainResult<Self> {
        let product_id = ProductId::new(product_id)?;
        let quantity = if qty <= 0 { DEFAULT_QUANTITY } else { qty as u64 };
        Ok(Self {
            product_id,
            quantity,
        })
    }

    /// Parse the `id` / `qty` form fields of an add-to-cart request.
    ///
    /// `id` is required and must be a positive integer. A missing or empty
    /// `qty` means 1; a present `qty` must be an integer.
    pub fn from_form(id: Option<&str>, qty: Option<&str>) -> DomainResult<Self> {
        let id = id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DomainError::invalid_input("Invalid product ID"))?;
        let id: i64 = id
            .parse()
            .map_err(|_| DomainError::invalid_input("Invalid product ID"))?;

        let qty = match qty.map(str::trim).filter(|s| !s.is_empty()) {
            None => DEFAULT_QUANTITY as i64,
            Some(raw) => raw
                .parse()
                .map_err(|_| DomainError::invalid_input("Invalid quantity"))?,
        };

        Self::new(id, qty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded { product_id: ProductId, quantity: u64 },
}

impl Aggregate for CartLedger {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded {
                product_id,
                quantity,
            } => {
                *self.entries.entry(*product_id).or_insert(0) += quantity;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add(cmd),
        }
    }
}
