//! Application layer containing the requirement engine logic.
//!
//! This module defines the `PaymentMethodRequirement`, the checkout step
//! gating progression until a payment method has been chosen and validated.
//! It owns the boxed ports it collaborates with and awaits each port call in
//! sequence for a single evaluation.

pub mod payment_requirement;
