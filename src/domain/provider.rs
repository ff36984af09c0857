use crate::domain::form::FormData;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// How a payment method integrates with the checkout flow.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethodType {
    Standard,
    Redirection,
    Button,
    StandardAndButton,
    StandardAndRedirection,
}

/// Method types a customer can pick on the payment selection page.
pub const SELECTABLE_METHOD_TYPES: [PaymentMethodType; 4] = [
    PaymentMethodType::Standard,
    PaymentMethodType::Redirection,
    PaymentMethodType::StandardAndRedirection,
    PaymentMethodType::StandardAndButton,
];

/// Level of recurring payment support a provider offers.
///
/// Variant order matters: anything above `NotSupported` qualifies for carts
/// containing recurring items.
#[derive(Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurringPaymentType {
    #[default]
    NotSupported,
    Manual,
    Automatic,
}

impl RecurringPaymentType {
    pub fn supports_recurring(&self) -> bool {
        *self > Self::NotSupported
    }
}

/// A single validation error scoped to one form field.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FieldError {
    pub field_name: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a provider validating submitted payment data.
///
/// Errors keep the order the provider produced them in.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// A pluggable payment method.
///
/// One descriptor carries both identity (system name) and behavior: the
/// capability flags the activation decision reads, and the validate / info /
/// summary calls the submission path delegates to.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Unique system name, e.g. "cash-on-delivery".
    fn system_name(&self) -> &str;

    fn method_type(&self) -> PaymentMethodType;

    /// Whether the method needs user input before it can be charged.
    /// Non-interactive methods are eligible for auto-selection.
    fn requires_interaction(&self) -> bool;

    fn recurring_payment_type(&self) -> RecurringPaymentType;

    /// Validates raw submitted form data for this method.
    async fn validate_payment_data(&self, form: &FormData) -> Result<ValidationResult>;

    /// Builds the structured payment info consumed by order placement.
    /// The payload is opaque to the requirement engine.
    async fn get_payment_info(&self, form: &FormData) -> Result<serde_json::Value>;

    /// Human-readable summary shown on the confirmation page.
    async fn payment_summary(&self) -> Result<String>;
}
