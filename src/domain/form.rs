use serde::Deserialize;
use std::collections::BTreeMap;

/// Submitted form fields, each carrying one or more string values.
///
/// Multi-valued fields come from the checkbox + hidden-fallback rendering
/// pattern, where the browser posts two values for a checked box.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(transparent)]
pub struct FormData {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, values: Vec<String>) {
        self.fields.insert(field.into(), values);
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), vec![value.into()]);
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// First value of a field, the common case for single-valued inputs.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, values)| (field.as_str(), values.as_slice()))
    }

    /// Renders a field's values for storage in the checkout state snapshot.
    ///
    /// A field with exactly two values whose first value is the literal
    /// string "true" collapses to "true" (checked checkbox plus its hidden
    /// fallback). Everything else joins all values with ",".
    pub fn stored_value(values: &[String]) -> String {
        if values.len() == 2 && values[0] == "true" {
            "true".to_string()
        } else {
            values.join(",")
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    Get,
    Post,
}

/// Snapshot of the inbound request handed to a requirement step.
///
/// Replaces ambient HTTP accessors: the caller extracts what the step needs
/// (route target, submitted method name, raw form) and passes it explicitly.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct RequestSnapshot {
    pub method: RequestMethod,
    pub action: String,
    /// Submitted payment method system name, when present in the form post.
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub form: FormData,
}

impl RequestSnapshot {
    /// Plain navigation request (no form post), as produced when the user
    /// simply steps through the checkout.
    pub fn navigation() -> Self {
        Self {
            method: RequestMethod::Get,
            action: String::new(),
            payment_method: None,
            form: FormData::new(),
        }
    }

    /// True when this request is a POST targeted at the given step action.
    pub fn is_submission_for(&self, action_name: &str) -> bool {
        self.method == RequestMethod::Post && self.action.eq_ignore_ascii_case(action_name)
    }
}
