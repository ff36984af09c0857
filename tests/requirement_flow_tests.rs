use checkoutflow::application::payment_requirement::{PaymentMethodRequirement, PaymentSettings};
use checkoutflow::domain::cart::{CartItem, CartSnapshot};
use checkoutflow::domain::form::{FormData, RequestMethod, RequestSnapshot};
use checkoutflow::domain::money::Money;
use checkoutflow::domain::ports::CustomerAttributeStore;
use checkoutflow::domain::requirement::{CheckoutRequirement, EvaluationContext};
use checkoutflow::domain::state::{CheckoutSession, ORDER_PAYMENT_INFO_KEY};
use checkoutflow::infrastructure::in_memory::{
    InMemoryCustomerAttributeStore, InMemoryProviderRegistry, SubtotalCalculator,
};
use checkoutflow::infrastructure::providers::{CashOnDeliveryProvider, CreditCardProvider};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn cart() -> CartSnapshot {
    CartSnapshot {
        customer_id: 42,
        store_id: 1,
        items: vec![CartItem {
            sku: "book".to_string(),
            unit_price: Money::new(dec!(19.99)),
            quantity: 1,
            is_recurring: false,
        }],
    }
}

fn engine(
    attributes: InMemoryCustomerAttributeStore,
    bypass: bool,
) -> PaymentMethodRequirement {
    let mut registry = InMemoryProviderRegistry::new();
    registry.register(Arc::new(CashOnDeliveryProvider::new()));
    registry.register(Arc::new(CreditCardProvider::new()));
    PaymentMethodRequirement::new(
        Box::new(registry),
        Box::new(SubtotalCalculator::new()),
        Box::new(attributes),
        PaymentSettings {
            bypass_payment_method_selection_if_only_one: bypass,
        },
    )
}

fn card_submission(card_number: &str) -> RequestSnapshot {
    let mut form = FormData::new();
    form.set("CardNumber", card_number);
    RequestSnapshot {
        method: RequestMethod::Post,
        action: "PaymentMethod".to_string(),
        payment_method: Some("credit-card".to_string()),
        form,
    }
}

#[tokio::test]
async fn test_retry_after_validation_failure() {
    let attributes = InMemoryCustomerAttributeStore::new();
    let requirement = engine(attributes.clone(), false);
    let cart = cart();
    let mut session = CheckoutSession::new();

    // First pass: plain navigation, nothing selected yet.
    let navigation = RequestSnapshot::navigation();
    let mut ctx = EvaluationContext::new(&cart, &navigation, &mut session);
    let result = requirement.evaluate(&mut ctx).await.unwrap();
    assert!(!result.success);
    assert!(result.errors.is_empty());

    // Second pass: bad card number. Selection persists, validation fails.
    let bad = card_submission("4111111111111112");
    let mut ctx = EvaluationContext::new(&cart, &bad, &mut session);
    let result = requirement.evaluate(&mut ctx).await.unwrap();
    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        attributes.selected_payment_method(42).await.unwrap(),
        Some("credit-card".to_string())
    );
    // The submitted data was snapshotted for the retry form.
    assert_eq!(
        session.state.payment_data.get("CardNumber").map(String::as_str),
        Some("4111111111111112")
    );

    // Third pass: corrected number commits the step.
    let good = card_submission("4111111111111111");
    let mut ctx = EvaluationContext::new(&cart, &good, &mut session);
    let result = requirement.evaluate(&mut ctx).await.unwrap();
    assert!(result.success);
    assert_eq!(session.state.payment_summary.as_deref(), Some("Credit card"));
    let info = session.get_object(ORDER_PAYMENT_INFO_KEY).unwrap();
    assert_eq!(info["card_last_four"], "1111");

    // Fourth pass: navigation is now satisfied.
    let mut ctx = EvaluationContext::new(&cart, &navigation, &mut session);
    assert!(requirement.evaluate(&mut ctx).await.unwrap().success);
}

#[tokio::test]
async fn test_cash_on_delivery_end_to_end() {
    let attributes = InMemoryCustomerAttributeStore::new();
    let requirement = engine(attributes.clone(), false);
    let cart = cart();
    let mut session = CheckoutSession::new();

    let request = RequestSnapshot {
        method: RequestMethod::Post,
        action: "PaymentMethod".to_string(),
        payment_method: Some("cash-on-delivery".to_string()),
        form: FormData::new(),
    };
    let mut ctx = EvaluationContext::new(&cart, &request, &mut session);
    let result = requirement.evaluate(&mut ctx).await.unwrap();

    assert!(result.success);
    assert_eq!(
        session.state.payment_summary.as_deref(),
        Some("Cash on delivery")
    );
    assert_eq!(
        session.get_object(ORDER_PAYMENT_INFO_KEY).unwrap()["method"],
        "cash-on-delivery"
    );
}

#[tokio::test]
async fn test_selection_survives_session_reset() {
    let attributes = InMemoryCustomerAttributeStore::new();
    let requirement = engine(attributes.clone(), false);
    let cart = cart();
    let mut session = CheckoutSession::new();

    let request = RequestSnapshot {
        method: RequestMethod::Post,
        action: "PaymentMethod".to_string(),
        payment_method: Some("cash-on-delivery".to_string()),
        form: FormData::new(),
    };
    let mut ctx = EvaluationContext::new(&cart, &request, &mut session);
    assert!(requirement.evaluate(&mut ctx).await.unwrap().success);

    // Order completed: session state goes away, the durable attribute stays.
    session.reset();
    assert!(session.get_object(ORDER_PAYMENT_INFO_KEY).is_none());

    let navigation = RequestSnapshot::navigation();
    let mut ctx = EvaluationContext::new(&cart, &navigation, &mut session);
    assert!(requirement.evaluate(&mut ctx).await.unwrap().success);
}

#[tokio::test]
async fn test_submission_for_other_step_falls_through_to_activation() {
    let attributes = InMemoryCustomerAttributeStore::new();
    let requirement = engine(attributes.clone(), false);
    let cart = cart();
    let mut session = CheckoutSession::new();

    // A POST targeting another step must not be treated as a submission.
    let request = RequestSnapshot {
        method: RequestMethod::Post,
        action: "ShippingMethod".to_string(),
        payment_method: Some("cash-on-delivery".to_string()),
        form: FormData::new(),
    };
    let mut ctx = EvaluationContext::new(&cart, &request, &mut session);
    let result = requirement.evaluate(&mut ctx).await.unwrap();

    assert!(!result.success);
    assert!(session.state.is_payment_required);
    assert!(session.state.payment_summary.is_none());
}
