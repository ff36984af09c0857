use checkoutflow::application::payment_requirement::PaymentMethodRequirement;
use checkoutflow::domain::ports::CustomerAttributeStore;
use checkoutflow::domain::requirement::{CheckoutRequirement, EvaluationContext};
use checkoutflow::domain::state::CheckoutSession;
use checkoutflow::infrastructure::in_memory::{
    InMemoryCustomerAttributeStore, InMemoryProviderRegistry, SubtotalCalculator,
};
use checkoutflow::infrastructure::providers::{CashOnDeliveryProvider, CreditCardProvider};
use checkoutflow::interfaces::json::scenario_reader::ScenarioReader;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Checkout scenario JSON file to replay
    scenario: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = File::open(cli.scenario).into_diagnostic()?;
    let scenario = ScenarioReader::new(file).read().into_diagnostic()?;

    // Built-in sample providers; real deployments wire their own registry.
    let mut registry = InMemoryProviderRegistry::new();
    registry.register(Arc::new(CashOnDeliveryProvider::new()));
    registry.register(Arc::new(CreditCardProvider::new()));

    let attributes = InMemoryCustomerAttributeStore::new();
    let requirement = PaymentMethodRequirement::new(
        Box::new(registry),
        Box::new(SubtotalCalculator::new()),
        Box::new(attributes.clone()),
        scenario.settings.clone(),
    );

    let mut session = CheckoutSession::new();
    for (index, request) in scenario.requests.iter().enumerate() {
        // Fresh context per request: each one models a navigation pass.
        let mut ctx = EvaluationContext::new(&scenario.cart, request, &mut session);
        match requirement.evaluate(&mut ctx).await {
            Ok(result) if result.success => println!("request {}: satisfied", index + 1),
            Ok(result) if result.errors.is_empty() => {
                println!("request {}: unsatisfied", index + 1);
            }
            Ok(result) => {
                println!("request {}: rejected", index + 1);
                for error in &result.errors {
                    println!("  {}: {}", error.field_name, error.message);
                }
            }
            Err(e) => eprintln!("Error evaluating request {}: {}", index + 1, e),
        }
    }

    let selected = attributes
        .selected_payment_method(scenario.cart.customer_id)
        .await
        .into_diagnostic()?;

    println!(
        "payment_required={} selection_skipped={} selected_method={}",
        session.state.is_payment_required,
        session.state.is_payment_selection_skipped,
        selected.as_deref().unwrap_or("-")
    );
    if let Some(summary) = &session.state.payment_summary {
        println!("payment_summary={summary}");
    }

    Ok(())
}
