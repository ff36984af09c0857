use crate::domain::form::FormData;
use crate::domain::ports::{CartTotalCalculatorBox, CustomerAttributeStoreBox, ProviderRegistryBox};
use crate::domain::provider::SELECTABLE_METHOD_TYPES;
use crate::domain::requirement::{CheckoutRequirement, EvaluationContext, RequirementResult};
use crate::domain::state::ORDER_PAYMENT_INFO_KEY;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Payment-related configuration consumed by the requirement step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentSettings {
    /// Skip the selection page when exactly one eligible non-interactive
    /// provider exists, auto-selecting it for the customer.
    pub bypass_payment_method_selection_if_only_one: bool,
}

/// The payment-method-selection step of the checkout workflow.
///
/// Decides whether payment selection applies to the current cart, possibly
/// auto-skips itself, validates submitted method data through the chosen
/// provider, and persists the derived session state later steps consume.
pub struct PaymentMethodRequirement {
    registry: ProviderRegistryBox,
    calculator: CartTotalCalculatorBox,
    attributes: CustomerAttributeStoreBox,
    settings: PaymentSettings,
}

impl PaymentMethodRequirement {
    pub fn new(
        registry: ProviderRegistryBox,
        calculator: CartTotalCalculatorBox,
        attributes: CustomerAttributeStoreBox,
        settings: PaymentSettings,
    ) -> Self {
        Self {
            registry,
            calculator,
            attributes,
            settings,
        }
    }

    /// Computes the activation decision once per pass and memoizes it in the
    /// context. Side effects: sets `is_payment_required` and
    /// `is_payment_selection_skipped` on the checkout state, and persists the
    /// auto-selected method when the skip heuristic fires.
    async fn ensure_activation(&self, ctx: &mut EvaluationContext<'_>) -> Result<()> {
        if ctx.cached_active().is_some() {
            return Ok(());
        }

        let total = self.calculator.cart_total(ctx.cart, false).await?;
        ctx.session.state.is_payment_required = !total.is_zero();

        if self.settings.bypass_payment_method_selection_if_only_one {
            let mut candidates = self
                .registry
                .load_active(ctx.cart, ctx.cart.store_id, &SELECTABLE_METHOD_TYPES)
                .await?;
            if ctx.cart.contains_recurring_item() {
                candidates.retain(|p| p.recurring_payment_type().supports_recurring());
            }

            ctx.session.state.is_payment_selection_skipped =
                candidates.len() == 1 && !candidates[0].requires_interaction();

            if ctx.session.state.is_payment_selection_skipped {
                // Auto-selection needs no user action, persist right away.
                self.attributes
                    .set_selected_payment_method(ctx.cart.customer_id, candidates[0].system_name())
                    .await?;
            }
        }

        if !ctx.session.state.is_payment_required {
            ctx.session.state.is_payment_selection_skipped = true;
        }

        ctx.cache_active(!ctx.session.state.is_payment_selection_skipped);
        Ok(())
    }

    async fn handle_submission(
        &self,
        ctx: &mut EvaluationContext<'_>,
        method_name: &str,
    ) -> Result<RequirementResult> {
        let Some(provider) = self
            .registry
            .resolve_by_name(method_name, true, ctx.cart.store_id)
            .await?
        else {
            return Ok(RequirementResult::rejected());
        };

        // Persisted before validation so the choice survives a failed attempt.
        self.attributes
            .set_selected_payment_method(ctx.cart.customer_id, method_name)
            .await?;

        // Save payment data so that the user must not re-enter it.
        for (field, values) in ctx.request.form.iter() {
            ctx.session
                .state
                .payment_data
                .insert(field.to_string(), FormData::stored_value(values));
        }

        let validation = provider.validate_payment_data(&ctx.request.form).await?;
        if validation.is_valid() {
            let payment_info = provider.get_payment_info(&ctx.request.form).await?;
            ctx.session.set_object(ORDER_PAYMENT_INFO_KEY, payment_info);
            ctx.session.state.payment_summary = Some(provider.payment_summary().await?);

            Ok(RequirementResult::ok())
        } else {
            Ok(RequirementResult::rejected_with(validation.into_errors()))
        }
    }
}

#[async_trait]
impl CheckoutRequirement for PaymentMethodRequirement {
    fn order(&self) -> u32 {
        40
    }

    fn action_name(&self) -> &str {
        "PaymentMethod"
    }

    async fn is_active(&self, ctx: &mut EvaluationContext<'_>) -> Result<bool> {
        self.ensure_activation(ctx).await?;
        Ok(ctx.cached_active().unwrap_or(true))
    }

    async fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> Result<RequirementResult> {
        if ctx.request.is_submission_for(self.action_name())
            && let Some(method_name) = ctx.request.payment_method.clone()
        {
            return self.handle_submission(ctx, &method_name).await;
        }

        self.ensure_activation(ctx).await?;

        let selected = self
            .attributes
            .selected_payment_method(ctx.cart.customer_id)
            .await?;

        Ok(if selected.is_some() {
            RequirementResult::ok()
        } else {
            RequirementResult::rejected()
        })
    }
}
