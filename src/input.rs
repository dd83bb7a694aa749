//! Boundary between raw form input and the core.
//!
//! Everything past `ContractInput::normalize` is a well-formed `Contract`:
//! a known option type, a finite non-negative strike and a finite premium.

use crate::errors::{EngineError, EngineResult};
use crate::portfolio::{Contract, OptionType};

/// A number as the form sends it: either already numeric or raw text.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl Default for RawNumber {
    fn default() -> Self {
        RawNumber::Number(0.0)
    }
}

impl RawNumber {
    /// Blank text coerces to 0, anything else must parse to a finite number.
    fn resolve(&self, field: &str) -> EngineResult<f64> {
        let value = match self {
            RawNumber::Number(v) => *v,
            RawNumber::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>()
                        .map_err(|e| EngineError::InvalidInput(format!("{field}: {e}")))?
                }
            }
        };
        if !value.is_finite() {
            return Err(EngineError::InvalidInput(format!("{field}: must be finite")));
        }
        Ok(value)
    }
}

/// Add-contract request. A fresh form is a zero-strike, zero-premium call.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ContractInput {
    #[serde(rename = "type", default = "default_type")]
    pub option_type: String,
    #[serde(default)]
    pub strike: RawNumber,
    #[serde(default)]
    pub premium: RawNumber,
}

fn default_type() -> String {
    OptionType::Call.to_string()
}

impl Default for ContractInput {
    fn default() -> Self {
        Self {
            option_type: default_type(),
            strike: RawNumber::default(),
            premium: RawNumber::default(),
        }
    }
}

impl ContractInput {
    pub fn normalize(&self) -> EngineResult<Contract> {
        let option_type = self.option_type.parse::<OptionType>()?;
        let strike = self.strike.resolve("strike")?;
        if strike < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "strike: must be non-negative, got {strike}"
            )));
        }
        let premium = self.premium.resolve("premium")?;
        Ok(Contract::new(option_type, strike, premium))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> EngineResult<Contract> {
        serde_json::from_str::<ContractInput>(json)?.normalize()
    }

    #[test]
    fn test_default_form_is_zero_call() {
        let c = ContractInput::default().normalize().unwrap();
        assert_eq!(c.option_type(), OptionType::Call);
        assert_eq!(c.strike(), 0.0);
        assert_eq!(c.premium(), 0.0);
    }

    #[test]
    fn test_numeric_and_text_fields() {
        let c = parse(r#"{"type":"put","strike":50,"premium":"2.5"}"#).unwrap();
        assert_eq!(c.option_type(), OptionType::Put);
        assert_eq!(c.strike(), 50.0);
        assert_eq!(c.premium(), 2.5);
    }

    #[test]
    fn test_blank_text_coerces_to_zero() {
        let c = parse(r#"{"type":"call","strike":" ","premium":""}"#).unwrap();
        assert_eq!(c.strike(), 0.0);
        assert_eq!(c.premium(), 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let c = parse(r#"{"strike":12}"#).unwrap();
        assert_eq!(c.option_type(), OptionType::Call);
        assert_eq!(c.premium(), 0.0);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse(r#"{"type":"call","strike":"abc","premium":1}"#).is_err());
        assert!(parse(r#"{"type":"call","strike":"NaN","premium":1}"#).is_err());
        assert!(parse(r#"{"type":"put","strike":1,"premium":"inf"}"#).is_err());
        assert!(parse(r#"{"type":"straddle","strike":1,"premium":1}"#).is_err());
        assert!(parse(r#"{"type":"call","strike":-5,"premium":1}"#).is_err());
    }

    #[test]
    fn test_negative_premium_passes_through() {
        let c = parse(r#"{"type":"call","strike":10,"premium":-1}"#).unwrap();
        assert_eq!(c.premium(), -1.0);
    }
}
