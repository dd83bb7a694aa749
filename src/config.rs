use crate::errors::{EngineError, EngineResult};
use crate::payoff::domain::PriceDomain;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub price_domain: PriceDomain,
    pub server_port: u16,
    pub dashboard_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            price_domain: PriceDomain::default(),
            server_port: 3001,
            dashboard_dir: PathBuf::from("dashboard/dist"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys take their defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> EngineResult<Self> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let start = var_or("PRICE_START", "0")
            .trim()
            .parse::<f64>()
            .map_err(|e| EngineError::Config(format!("PRICE_START: {e}")))?;

        let step = var_or("PRICE_STEP", "0.5")
            .trim()
            .parse::<f64>()
            .map_err(|e| EngineError::Config(format!("PRICE_STEP: {e}")))?;

        let count = var_or("PRICE_COUNT", "201")
            .trim()
            .parse::<usize>()
            .map_err(|e| EngineError::Config(format!("PRICE_COUNT: {e}")))?;

        let server_port = var_or("SERVER_PORT", "3001")
            .trim()
            .parse::<u16>()
            .map_err(|e| EngineError::Config(format!("SERVER_PORT: {e}")))?;

        let price_domain = PriceDomain::new(start, step, count)
            .map_err(|e| EngineError::Config(e.to_string()))?;

        Ok(Self {
            price_domain,
            server_port,
            dashboard_dir: PathBuf::from(var_or("DASHBOARD_DIR", "dashboard/dist")),
        })
    }
}
