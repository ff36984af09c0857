use crate::domain::cart::CartSnapshot;
use crate::domain::money::Money;
use crate::domain::provider::{PaymentMethodType, PaymentProvider};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves available payment providers for a store.
#[async_trait]
pub trait ProviderRegistry: Send + Sync {
    /// Looks up a provider by system name. With `active_only`, inactive
    /// providers resolve to `None` just like unknown ones.
    async fn resolve_by_name(
        &self,
        system_name: &str,
        active_only: bool,
        store_id: u32,
    ) -> Result<Option<Arc<dyn PaymentProvider>>>;

    /// Lists active providers for the store, restricted to the given
    /// method types.
    async fn load_active(
        &self,
        cart: &CartSnapshot,
        store_id: u32,
        allowed_types: &[PaymentMethodType],
    ) -> Result<Vec<Arc<dyn PaymentProvider>>>;
}

/// Computes the order total used by the activation decision.
#[async_trait]
pub trait CartTotalCalculator: Send + Sync {
    async fn cart_total(&self, cart: &CartSnapshot, include_reward_points: bool) -> Result<Money>;
}

/// Durable key-value attributes on the customer. The selected payment
/// method survives across checkout sessions until overwritten.
#[async_trait]
pub trait CustomerAttributeStore: Send + Sync {
    async fn selected_payment_method(&self, customer_id: u64) -> Result<Option<String>>;

    async fn set_selected_payment_method(
        &self,
        customer_id: u64,
        system_name: &str,
    ) -> Result<()>;
}

pub type ProviderRegistryBox = Box<dyn ProviderRegistry>;
pub type CartTotalCalculatorBox = Box<dyn CartTotalCalculator>;
pub type CustomerAttributeStoreBox = Box<dyn CustomerAttributeStore>;
