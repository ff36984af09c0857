use crate::domain::money::Money;
use rust_decimal::Decimal;
use serde::Deserialize;

/// A single line in the shopping cart.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CartItem {
    pub sku: String,
    pub unit_price: Money,
    pub quantity: u32,
    /// Recurring items (subscriptions) restrict which payment methods apply.
    #[serde(default)]
    pub is_recurring: bool,
}

impl CartItem {
    pub fn line_total(&self) -> Money {
        Money::new(self.unit_price.value() * Decimal::from(self.quantity))
    }
}

/// Read-only view of the cart a requirement step evaluates against.
///
/// The step never owns or mutates the cart; a fresh snapshot is supplied on
/// every navigation pass since contents may change between passes.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CartSnapshot {
    pub customer_id: u64,
    pub store_id: u32,
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    pub fn contains_recurring_item(&self) -> bool {
        self.items.iter().any(|item| item.is_recurring)
    }

    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::ZERO, |acc, item| acc + item.line_total())
    }
}
