use serde::Serialize;
use std::collections::HashMap;

/// Session key under which structured payment info is stored for the
/// order-placement stage.
pub const ORDER_PAYMENT_INFO_KEY: &str = "OrderPaymentInfo";

/// Mutable checkout state shared across requirement steps for the lifetime
/// of one checkout session.
#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct CheckoutState {
    pub is_payment_required: bool,
    pub is_payment_selection_skipped: bool,
    pub payment_summary: Option<String>,
    /// Raw form snapshot so the user must not re-enter data on retry.
    pub payment_data: HashMap<String, String>,
}

/// Per-session container owning the checkout state and an opaque object map
/// standing in for host session storage.
///
/// Created at session start, cleared at order completion or session expiry.
/// Exclusively owned by its session; the engine assumes at most one
/// in-flight evaluation per session.
#[derive(Debug, Default)]
pub struct CheckoutSession {
    pub state: CheckoutState,
    objects: HashMap<String, serde_json::Value>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_object(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.objects.insert(key.into(), value);
    }

    pub fn get_object(&self, key: &str) -> Option<&serde_json::Value> {
        self.objects.get(key)
    }

    /// Clears all session state, called at order completion or expiry.
    pub fn reset(&mut self) {
        self.state = CheckoutState::default();
        self.objects.clear();
    }
}
