pub mod domain;
pub mod engine;

use crate::portfolio::{Contract, OptionType};

/// Per-contract profit/loss at expiry.
/// payoff() must be a pure function: same contract and price, same output.
/// Send + Sync required so handlers can share one instance.
pub trait PayoffModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Profit/loss of holding `contract` when the underlying settles at `price`.
    fn payoff(&self, contract: &Contract, price: f64) -> f64;
}

/// Intrinsic value at expiration minus premium.
///
/// Call: max(0, p - K) - premium
/// Put:  max(0, K - p) - premium
///
/// No time value, volatility, rates or dividends.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntrinsicPayoff;

impl PayoffModel for IntrinsicPayoff {
    #[inline]
    fn name(&self) -> &'static str {
        "Intrinsic"
    }

    #[inline]
    fn payoff(&self, contract: &Contract, price: f64) -> f64 {
        let intrinsic = match contract.option_type() {
            OptionType::Call => (price - contract.strike()).max(0.0),
            OptionType::Put => (contract.strike() - price).max(0.0),
        };
        intrinsic - contract.premium()
    }
}
