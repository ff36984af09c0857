use crate::application::payment_requirement::PaymentSettings;
use crate::domain::cart::CartSnapshot;
use crate::domain::form::RequestSnapshot;
use crate::error::Result;
use serde::Deserialize;
use std::io::Read;

/// A replayable checkout scenario: settings, one cart, and the sequence of
/// requests a customer sends while stepping through the checkout.
#[derive(Debug, Deserialize, Clone)]
pub struct Scenario {
    #[serde(default)]
    pub settings: PaymentSettings,
    pub cart: CartSnapshot,
    pub requests: Vec<RequestSnapshot>,
}

pub struct ScenarioReader<R: Read> {
    source: R,
}

impl<R: Read> ScenarioReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(mut self) -> Result<Scenario> {
        let mut raw = String::new();
        self.source.read_to_string(&mut raw)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
