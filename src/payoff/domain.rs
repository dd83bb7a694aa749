use crate::errors::{EngineError, EngineResult};

/// Largest grid a single evaluation will sample.
pub const MAX_PRICE_POINTS: usize = 100_000;

/// Grid of underlying prices the payoff is sampled on.
///
/// Price `i` is `start + i * step`, computed directly rather than by repeated
/// addition so on-grid points such as 40.0 and 60.0 are exact.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PriceDomain {
    start: f64,
    step: f64,
    count: usize,
}

impl Default for PriceDomain {
    /// 0 to 100 inclusive in steps of 0.5.
    fn default() -> Self {
        Self { start: 0.0, step: 0.5, count: 201 }
    }
}

impl PriceDomain {
    /// Validate and build a domain: non-negative finite start, positive
    /// finite step, 1..=MAX_PRICE_POINTS points, strictly increasing once
    /// rounded to f64.
    pub fn new(start: f64, step: f64, count: usize) -> EngineResult<Self> {
        if !start.is_finite() || start < 0.0 {
            return Err(EngineError::InvalidDomain(format!(
                "start must be a finite non-negative number, got {start}"
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(EngineError::InvalidDomain(format!(
                "step must be a finite positive number, got {step}"
            )));
        }
        if count == 0 {
            return Err(EngineError::InvalidDomain("count must be at least 1".into()));
        }
        if count > MAX_PRICE_POINTS {
            return Err(EngineError::InvalidDomain(format!(
                "count must be at most {MAX_PRICE_POINTS}, got {count}"
            )));
        }
        let end = start + step * (count - 1) as f64;
        if !end.is_finite() {
            return Err(EngineError::InvalidDomain(format!(
                "domain end overflows: start={start} step={step} count={count}"
            )));
        }
        let domain = Self { start, step, count };
        // A step below the f64 spacing near `start + i*step` collapses neighbours.
        if let Some(i) = (1..count).find(|&i| domain.price_at(i) <= domain.price_at(i - 1)) {
            return Err(EngineError::InvalidDomain(format!(
                "step {step} too small to separate prices near {}",
                domain.price_at(i)
            )));
        }
        Ok(domain)
    }

    /// Same domain with any provided field replaced, re-validated.
    pub fn with_overrides(
        &self,
        start: Option<f64>,
        step: Option<f64>,
        count: Option<usize>,
    ) -> EngineResult<Self> {
        Self::new(
            start.unwrap_or(self.start),
            step.unwrap_or(self.step),
            count.unwrap_or(self.count),
        )
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.price_at(self.count - 1)
    }

    #[inline]
    pub fn price_at(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    /// Prices in ascending order.
    pub fn prices(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.count).map(move |i| self.price_at(i))
    }
}
