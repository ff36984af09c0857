use crate::domain::cart::CartSnapshot;
use crate::domain::form::RequestSnapshot;
use crate::domain::provider::FieldError;
use crate::domain::state::CheckoutSession;
use crate::error::Result;
use async_trait::async_trait;

/// Terminal outcome of one requirement evaluation.
///
/// A failed result with field errors re-renders the step with those errors;
/// a failed result without errors re-renders the step's input form.
#[derive(Debug, PartialEq, Clone)]
pub struct RequirementResult {
    pub success: bool,
    pub errors: Vec<FieldError>,
}

impl RequirementResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    pub fn rejected() -> Self {
        Self {
            success: false,
            errors: Vec::new(),
        }
    }

    pub fn rejected_with(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}

/// Everything one evaluation call operates on: the cart snapshot, the
/// inbound request, and the session's shared checkout state.
///
/// A fresh context is constructed per navigation pass. The activation memo
/// lives here rather than on the requirement itself, so no mutable state
/// leaks across requests or sessions.
pub struct EvaluationContext<'a> {
    pub cart: &'a CartSnapshot,
    pub request: &'a RequestSnapshot,
    pub session: &'a mut CheckoutSession,
    active: Option<bool>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(
        cart: &'a CartSnapshot,
        request: &'a RequestSnapshot,
        session: &'a mut CheckoutSession,
    ) -> Self {
        Self {
            cart,
            request,
            session,
            active: None,
        }
    }

    /// Activation decision memoized earlier in this pass, if any.
    pub fn cached_active(&self) -> Option<bool> {
        self.active
    }

    pub fn cache_active(&mut self, active: bool) {
        self.active = Some(active);
    }
}

/// One gate in the checkout workflow.
///
/// The workflow driver holds an ordered sequence of these and is agnostic
/// to which concrete step each is.
#[async_trait]
pub trait CheckoutRequirement: Send + Sync {
    /// Position of this step within the workflow.
    fn order(&self) -> u32;

    /// Route action name form posts for this step are targeted at.
    fn action_name(&self) -> &str;

    /// Whether this step applies to the current cart. Computed lazily and
    /// memoized in the context for the lifetime of one pass.
    async fn is_active(&self, ctx: &mut EvaluationContext<'_>) -> Result<bool>;

    /// Runs the step once: submission handling when the request targets
    /// this step's action, otherwise the activation/satisfaction check.
    async fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> Result<RequirementResult>;
}
