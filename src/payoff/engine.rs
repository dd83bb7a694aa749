use crate::payoff::domain::PriceDomain;
use crate::payoff::PayoffModel;
use crate::portfolio::Contract;

/// Chart label for the aggregate series.
pub const SERIES_LABEL: &str = "Profit/Loss";

/// Aggregate P/L sampled over a price domain, as parallel vectors for plotting.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PayoffSeries {
    pub prices: Vec<f64>,
    pub values: Vec<f64>,
}

impl PayoffSeries {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.prices.iter().copied().zip(self.values.iter().copied())
    }
}

/// Derived from one series, never stored on its own.
///
/// `max_loss` is the signed minimum of the series: positive means no loss
/// anywhere on the grid.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryStats {
    pub max_profit: f64,
    pub max_loss: f64,
    /// Grid prices whose value is exactly 0.0. No tolerance, no interpolation.
    pub break_even: Vec<f64>,
}

impl std::fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let points: Vec<String> = self.break_even.iter().map(|p| p.to_string()).collect();
        writeln!(f, "Max Profit: {}", self.max_profit)?;
        writeln!(f, "Max Loss: {}", self.max_loss)?;
        write!(f, "Break-even Points: {}", points.join(", "))
    }
}

/// Series and statistics computed together from the same portfolio snapshot.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PayoffReport {
    pub label: &'static str,
    #[serde(flatten)]
    pub series: PayoffSeries,
    #[serde(flatten)]
    pub stats: SummaryStats,
}

/// Sum of every contract's payoff at `price`. Empty portfolio gives exactly 0.
#[inline]
pub fn aggregate_payoff(model: &dyn PayoffModel, contracts: &[Contract], price: f64) -> f64 {
    let mut total = 0.0;
    for c in contracts {
        total += model.payoff(c, price);
    }
    total
}

/// Evaluate the aggregate payoff at every domain price, ascending.
pub fn compute_series(
    model: &dyn PayoffModel,
    contracts: &[Contract],
    domain: &PriceDomain,
) -> PayoffSeries {
    let prices: Vec<f64> = domain.prices().collect();
    let values = prices
        .iter()
        .map(|&p| aggregate_payoff(model, contracts, p))
        .collect();
    PayoffSeries { prices, values }
}

/// Max, signed min and exact-zero prices of a series.
/// The series must be non-empty; `PriceDomain` guarantees at least one point.
pub fn summarize(series: &PayoffSeries) -> SummaryStats {
    let max_profit = series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_loss = series.values.iter().copied().fold(f64::INFINITY, f64::min);
    let break_even = series
        .points()
        .filter(|&(_, v)| v == 0.0)
        .map(|(p, _)| p)
        .collect();

    SummaryStats { max_profit, max_loss, break_even }
}

/// Full evaluation. Pure: identical inputs give identical reports.
pub fn evaluate(
    model: &dyn PayoffModel,
    contracts: &[Contract],
    domain: &PriceDomain,
) -> PayoffReport {
    let series = compute_series(model, contracts, domain);
    let stats = summarize(&series);
    PayoffReport { label: SERIES_LABEL, series, stats }
}
