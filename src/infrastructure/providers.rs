use crate::domain::form::FormData;
use crate::domain::provider::{
    FieldError, PaymentMethodType, PaymentProvider, RecurringPaymentType, ValidationResult,
};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::json;

/// Cash on delivery: no payment data to collect, charged offline.
///
/// Non-interactive, so it is eligible for auto-selection when it is the
/// only candidate.
#[derive(Default, Clone)]
pub struct CashOnDeliveryProvider;

impl CashOnDeliveryProvider {
    pub const SYSTEM_NAME: &'static str = "cash-on-delivery";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProvider for CashOnDeliveryProvider {
    fn system_name(&self) -> &str {
        Self::SYSTEM_NAME
    }

    fn method_type(&self) -> PaymentMethodType {
        PaymentMethodType::Standard
    }

    fn requires_interaction(&self) -> bool {
        false
    }

    fn recurring_payment_type(&self) -> RecurringPaymentType {
        RecurringPaymentType::NotSupported
    }

    async fn validate_payment_data(&self, _form: &FormData) -> Result<ValidationResult> {
        // Nothing to validate, the method has no required fields.
        Ok(ValidationResult::valid())
    }

    async fn get_payment_info(&self, _form: &FormData) -> Result<serde_json::Value> {
        Ok(json!({ "method": Self::SYSTEM_NAME }))
    }

    async fn payment_summary(&self) -> Result<String> {
        Ok("Cash on delivery".to_string())
    }
}

/// Credit card payment collected through a form post.
#[derive(Default, Clone)]
pub struct CreditCardProvider;

impl CreditCardProvider {
    pub const SYSTEM_NAME: &'static str = "credit-card";
    pub const CARD_NUMBER_FIELD: &'static str = "CardNumber";

    pub fn new() -> Self {
        Self
    }

    fn is_valid_card_number(number: &str) -> bool {
        let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != number.len() || !(12..=19).contains(&digits.len()) {
            return false;
        }
        luhn_checksum(&digits) % 10 == 0
    }
}

fn luhn_checksum(digits: &[u32]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum()
}

#[async_trait]
impl PaymentProvider for CreditCardProvider {
    fn system_name(&self) -> &str {
        Self::SYSTEM_NAME
    }

    fn method_type(&self) -> PaymentMethodType {
        PaymentMethodType::Standard
    }

    fn requires_interaction(&self) -> bool {
        true
    }

    fn recurring_payment_type(&self) -> RecurringPaymentType {
        RecurringPaymentType::Automatic
    }

    async fn validate_payment_data(&self, form: &FormData) -> Result<ValidationResult> {
        let card_number = form.value(Self::CARD_NUMBER_FIELD).unwrap_or_default();
        if Self::is_valid_card_number(card_number) {
            Ok(ValidationResult::valid())
        } else {
            Ok(ValidationResult::invalid(vec![FieldError::new(
                Self::CARD_NUMBER_FIELD,
                "The card number is invalid.",
            )]))
        }
    }

    async fn get_payment_info(&self, form: &FormData) -> Result<serde_json::Value> {
        let card_number = form.value(Self::CARD_NUMBER_FIELD).unwrap_or_default();
        let last_four = if card_number.len() >= 4 {
            &card_number[card_number.len() - 4..]
        } else {
            card_number
        };
        Ok(json!({
            "method": Self::SYSTEM_NAME,
            "card_last_four": last_four,
        }))
    }

    async fn payment_summary(&self) -> Result<String> {
        Ok("Credit card".to_string())
    }
}
