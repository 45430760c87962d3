//! API request structures

use serde::Deserialize;

use crate::{
    engine::plan::effective_message,
    input::{parse_number, StartInputs},
};

/// A numeric form field sent either as a JSON number or as raw text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => parse_number(text),
        }
    }
}

/// Body of `POST /start`; missing fields count as 0 or the default message
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub hours: Option<RawNumber>,
    #[serde(default)]
    pub warning_minutes: Option<RawNumber>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StartRequest {
    pub fn into_inputs(self) -> StartInputs {
        StartInputs::new(
            self.hours.map_or(0.0, |h| h.value()),
            self.warning_minutes.map_or(0.0, |w| w.value()),
            effective_message(self.message.as_deref().unwrap_or_default()),
        )
    }
}
