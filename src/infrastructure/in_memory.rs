use crate::domain::cart::CartSnapshot;
use crate::domain::money::Money;
use crate::domain::ports::{CartTotalCalculator, CustomerAttributeStore, ProviderRegistry};
use crate::domain::provider::{PaymentMethodType, PaymentProvider};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

struct RegisteredProvider {
    provider: Arc<dyn PaymentProvider>,
    active: bool,
    /// Stores the provider is limited to; `None` means all stores.
    store_ids: Option<Vec<u32>>,
}

impl RegisteredProvider {
    fn serves_store(&self, store_id: u32) -> bool {
        match &self.store_ids {
            Some(ids) => ids.contains(&store_id),
            None => true,
        }
    }
}

/// An in-memory provider registry.
///
/// Registration order is preserved, so listing results are deterministic.
/// Ideal for testing and for the demo binary; production deployments back
/// the `ProviderRegistry` port with their plugin system.
#[derive(Default)]
pub struct InMemoryProviderRegistry {
    providers: Vec<RegisteredProvider>,
}

impl InMemoryProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an active provider available in all stores.
    pub fn register(&mut self, provider: Arc<dyn PaymentProvider>) {
        self.providers.push(RegisteredProvider {
            provider,
            active: true,
            store_ids: None,
        });
    }

    /// Registers a provider that resolves only when `active_only` is false.
    pub fn register_inactive(&mut self, provider: Arc<dyn PaymentProvider>) {
        self.providers.push(RegisteredProvider {
            provider,
            active: false,
            store_ids: None,
        });
    }

    /// Registers an active provider limited to the given stores.
    pub fn register_for_stores(&mut self, provider: Arc<dyn PaymentProvider>, store_ids: Vec<u32>) {
        self.providers.push(RegisteredProvider {
            provider,
            active: true,
            store_ids: Some(store_ids),
        });
    }
}

#[async_trait]
impl ProviderRegistry for InMemoryProviderRegistry {
    async fn resolve_by_name(
        &self,
        system_name: &str,
        active_only: bool,
        store_id: u32,
    ) -> Result<Option<Arc<dyn PaymentProvider>>> {
        Ok(self
            .providers
            .iter()
            .find(|entry| {
                entry.provider.system_name() == system_name
                    && entry.serves_store(store_id)
                    && (!active_only || entry.active)
            })
            .map(|entry| entry.provider.clone()))
    }

    async fn load_active(
        &self,
        _cart: &CartSnapshot,
        store_id: u32,
        allowed_types: &[PaymentMethodType],
    ) -> Result<Vec<Arc<dyn PaymentProvider>>> {
        Ok(self
            .providers
            .iter()
            .filter(|entry| {
                entry.active
                    && entry.serves_store(store_id)
                    && allowed_types.contains(&entry.provider.method_type())
            })
            .map(|entry| entry.provider.clone())
            .collect())
    }
}

/// Cart total calculator summing item line totals.
///
/// Stands in for the pricing engine; discounts and reward points are not
/// modeled, so `include_reward_points` has no effect here.
#[derive(Default, Clone)]
pub struct SubtotalCalculator;

impl SubtotalCalculator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CartTotalCalculator for SubtotalCalculator {
    async fn cart_total(&self, cart: &CartSnapshot, _include_reward_points: bool) -> Result<Money> {
        Ok(cart.subtotal())
    }
}

/// A thread-safe in-memory customer attribute store.
///
/// Uses `Arc<RwLock<HashMap<u64, String>>>` to allow shared concurrent
/// access. The selected payment method outlives any single session.
#[derive(Default, Clone)]
pub struct InMemoryCustomerAttributeStore {
    selected_methods: Arc<RwLock<HashMap<u64, String>>>,
}

impl InMemoryCustomerAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerAttributeStore for InMemoryCustomerAttributeStore {
    async fn selected_payment_method(&self, customer_id: u64) -> Result<Option<String>> {
        let methods = self.selected_methods.read().await;
        Ok(methods.get(&customer_id).cloned())
    }

    async fn set_selected_payment_method(
        &self,
        customer_id: u64,
        system_name: &str,
    ) -> Result<()> {
        let mut methods = self.selected_methods.write().await;
        methods.insert(customer_id, system_name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartItem;
    use crate::domain::provider::SELECTABLE_METHOD_TYPES;
    use crate::infrastructure::providers::{CashOnDeliveryProvider, CreditCardProvider};
    use rust_decimal_macros::dec;

    fn cart(store_id: u32) -> CartSnapshot {
        CartSnapshot {
            customer_id: 1,
            store_id,
            items: vec![CartItem {
                sku: "item".to_string(),
                unit_price: Money::new(dec!(10.00)),
                quantity: 2,
                is_recurring: false,
            }],
        }
    }

    #[tokio::test]
    async fn test_resolve_by_name_honors_active_flag() {
        let mut registry = InMemoryProviderRegistry::new();
        registry.register_inactive(Arc::new(CashOnDeliveryProvider::new()));

        let resolved = registry
            .resolve_by_name("cash-on-delivery", true, 1)
            .await
            .unwrap();
        assert!(resolved.is_none());

        let resolved = registry
            .resolve_by_name("cash-on-delivery", false, 1)
            .await
            .unwrap();
        assert!(resolved.is_some());
    }

    #[tokio::test]
    async fn test_registry_scopes_providers_to_stores() {
        let mut registry = InMemoryProviderRegistry::new();
        registry.register_for_stores(Arc::new(CashOnDeliveryProvider::new()), vec![2]);

        assert!(
            registry
                .resolve_by_name("cash-on-delivery", true, 1)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            registry
                .resolve_by_name("cash-on-delivery", true, 2)
                .await
                .unwrap()
                .is_some()
        );

        let listed = registry
            .load_active(&cart(1), 1, &SELECTABLE_METHOD_TYPES)
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_load_active_filters_by_method_type() {
        let mut registry = InMemoryProviderRegistry::new();
        registry.register(Arc::new(CashOnDeliveryProvider::new()));
        registry.register(Arc::new(CreditCardProvider::new()));

        let listed = registry
            .load_active(&cart(1), 1, &[PaymentMethodType::Standard])
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);

        let listed = registry
            .load_active(&cart(1), 1, &[PaymentMethodType::Redirection])
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_subtotal_calculator() {
        let calculator = SubtotalCalculator::new();
        let total = calculator.cart_total(&cart(1), false).await.unwrap();
        assert_eq!(total, Money::new(dec!(20.00)));
    }

    #[tokio::test]
    async fn test_attribute_store_overwrites_selection() {
        let store = InMemoryCustomerAttributeStore::new();
        assert_eq!(store.selected_payment_method(1).await.unwrap(), None);

        store
            .set_selected_payment_method(1, "cash-on-delivery")
            .await
            .unwrap();
        store
            .set_selected_payment_method(1, "credit-card")
            .await
            .unwrap();

        assert_eq!(
            store.selected_payment_method(1).await.unwrap(),
            Some("credit-card".to_string())
        );
        assert_eq!(store.selected_payment_method(2).await.unwrap(), None);
    }
}
