use crate::config::AppConfig;
use crate::payoff::domain::PriceDomain;
use crate::payoff::engine::{self, PayoffReport};
use crate::payoff::{IntrinsicPayoff, PayoffModel};
use crate::portfolio::{Contract, ContractStore, Portfolio};
use portable_atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;

// ── Messages OUT to dashboard clients ──

#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type")]
pub enum WsMessage {
    #[serde(rename = "portfolio_update")]
    PortfolioUpdate {
        contracts: Vec<Contract>,
        report: PayoffReport,
        timestamp: String,
    },
}

// ── Results of portfolio mutations ──

#[derive(Debug, Clone)]
pub struct AddOutcome {
    /// False when the portfolio was already full.
    pub added: bool,
    pub contracts: Portfolio,
}

#[derive(Debug, Clone)]
pub struct RemoveOutcome {
    pub removed: Contract,
    /// Portfolio as left by this removal.
    pub contracts: Portfolio,
}

// ── Performance Counters (lock-free) ──

pub struct PerfCounters {
    pub evaluations: AtomicU64,
    pub contracts_added: AtomicU64,
    pub contracts_removed: AtomicU64,
    pub inputs_rejected: AtomicU64,
    pub ws_messages_sent: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            evaluations: AtomicU64::new(0),
            contracts_added: AtomicU64::new(0),
            contracts_removed: AtomicU64::new(0),
            inputs_rejected: AtomicU64::new(0),
            ws_messages_sent: AtomicU64::new(0),
        }
    }
}

// ── Application shared state ──

pub struct AppState {
    pub config: AppConfig,

    // Single owner of the portfolio. Held only long enough to mutate or copy.
    store: Mutex<ContractStore>,

    model: Box<dyn PayoffModel>,

    // Mutations -> Dashboard: event stream (broadcast for WS clients)
    pub ws_tx: broadcast::Sender<WsMessage>,

    // Lock-free performance counters
    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let (ws_tx, _) = broadcast::channel(256);
        let model: Box<dyn PayoffModel> = Box::new(IntrinsicPayoff);
        tracing::debug!(model = model.name(), "payoff model selected");

        Arc::new(Self {
            config,
            store: Mutex::new(ContractStore::new()),
            model,
            ws_tx,
            counters: PerfCounters::new(),
        })
    }

    fn store(&self) -> MutexGuard<'_, ContractStore> {
        // The store has no multi-step mutation, so a poisoned guard is still consistent.
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn portfolio(&self) -> Portfolio {
        self.store().snapshot()
    }

    /// Copy the current portfolio and derive series + stats from that copy.
    pub fn evaluate(&self, domain: &PriceDomain) -> (Portfolio, PayoffReport) {
        let contracts = self.portfolio();
        let report = engine::evaluate(self.model.as_ref(), &contracts, domain);
        self.counters.evaluations.fetch_add(1, Ordering::Relaxed);
        (contracts, report)
    }

    /// Mutations publish while the store guard is held, so clients see
    /// updates in mutation order.
    pub fn add_contract(&self, contract: Contract) -> AddOutcome {
        let mut store = self.store();
        let before = store.len();
        let added = store.add_contract(contract).len() > before;
        let contracts = store.snapshot();

        if added {
            self.counters.contracts_added.fetch_add(1, Ordering::Relaxed);
            tracing::info!(
                contract_type = %contract.option_type(),
                strike = contract.strike(),
                premium = contract.premium(),
                count = contracts.len(),
                "contract added"
            );
            self.publish(&contracts);
        }

        AddOutcome { added, contracts }
    }

    pub fn remove_contract(&self, index: usize) -> Option<RemoveOutcome> {
        let mut store = self.store();
        let removed = store.remove_contract(index)?;
        let contracts = store.snapshot();

        self.counters.contracts_removed.fetch_add(1, Ordering::Relaxed);
        tracing::info!(index, contract = %removed, count = contracts.len(), "contract removed");
        self.publish(&contracts);

        Some(RemoveOutcome { removed, contracts })
    }

    /// Build the dashboard message for a portfolio snapshot on the configured domain.
    pub fn update_message(&self, contracts: &[Contract]) -> WsMessage {
        let report = engine::evaluate(self.model.as_ref(), contracts, &self.config.price_domain);
        self.counters.evaluations.fetch_add(1, Ordering::Relaxed);
        WsMessage::PortfolioUpdate {
            contracts: contracts.to_vec(),
            report,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn publish(&self, contracts: &[Contract]) {
        // No subscribers: skip the evaluation entirely.
        if self.ws_tx.receiver_count() == 0 {
            return;
        }
        let msg = self.update_message(contracts);
        self.broadcast(msg);
    }

    #[inline]
    pub fn broadcast(&self, msg: WsMessage) {
        self.counters.ws_messages_sent.fetch_add(1, Ordering::Relaxed);
        let _ = self.ws_tx.send(msg);
    }
}
