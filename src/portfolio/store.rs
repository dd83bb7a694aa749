use crate::portfolio::Contract;
use smallvec::SmallVec;

/// Hard cap on open positions. A fifth add is ignored, not rejected.
pub const MAX_CONTRACTS: usize = 4;

/// Ordered contracts, inline storage sized to the cap (no heap).
pub type Portfolio = SmallVec<[Contract; MAX_CONTRACTS]>;

/// Sole owner of the portfolio. Readers get `&[Contract]` snapshots.
#[derive(Debug, Clone, Default)]
pub struct ContractStore {
    contracts: Portfolio,
}

impl ContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contract unless the portfolio is full.
    ///
    /// A full portfolio is returned unchanged. This is not an error and
    /// deliberately produces no log output.
    pub fn add_contract(&mut self, contract: Contract) -> &[Contract] {
        if self.contracts.len() < MAX_CONTRACTS {
            self.contracts.push(contract);
        }
        &self.contracts
    }

    /// Remove the contract at `index`, keeping the order of the rest.
    pub fn remove_contract(&mut self, index: usize) -> Option<Contract> {
        if index < self.contracts.len() {
            Some(self.contracts.remove(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Owned copy for handing across the lock boundary.
    pub fn snapshot(&self) -> Portfolio {
        SmallVec::from_slice(self.contracts())
    }
}
