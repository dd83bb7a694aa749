use crate::input::ContractInput;
use crate::portfolio::MAX_CONTRACTS;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use std::sync::Arc;

#[derive(serde::Deserialize, Default)]
pub struct PayoffQuery {
    pub start: Option<f64>,
    pub step: Option<f64>,
    pub count: Option<usize>,
}

/// GET /api/portfolio -- contracts in insertion order
pub async fn get_portfolio(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    let contracts = state.portfolio();
    Json(serde_json::json!({
        "contracts": contracts.as_slice(),
        "capacity": MAX_CONTRACTS,
        "full": contracts.len() >= MAX_CONTRACTS,
    }))
}

/// POST /api/contracts -- normalize form input, then add (no-op when full)
pub async fn add_contract(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ContractInput>,
) -> (StatusCode, Json<serde_json::Value>) {
    let contract = match input.normalize() {
        Ok(c) => c,
        Err(e) => {
            state.counters.inputs_rejected.fetch_add(1, portable_atomic::Ordering::Relaxed);
            tracing::warn!(error = %e, "contract input rejected");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            );
        }
    };

    let outcome = state.add_contract(contract);
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "added": outcome.added,
            "contracts": outcome.contracts.as_slice(),
        })),
    )
}

/// DELETE /api/contracts/{index}
pub async fn remove_contract(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.remove_contract(index) {
        Some(outcome) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "removed": outcome.removed,
                "contracts": outcome.contracts.as_slice(),
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("no contract at index {index}") })),
        ),
    }
}

/// GET /api/payoff -- series + summary, derived fresh from the current portfolio
pub async fn get_payoff(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PayoffQuery>,
) -> (StatusCode, Json<serde_json::Value>) {
    let domain = match state
        .config
        .price_domain
        .with_overrides(params.start, params.step, params.count)
    {
        Ok(d) => d,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        }
    };

    let (contracts, report) = state.evaluate(&domain);
    let mut body = serde_json::json!(report);
    body["contracts"] = serde_json::json!(contracts.as_slice());
    body["summary"] = serde_json::json!(report.stats.to_string());
    (StatusCode::OK, Json(body))
}

/// GET /api/counters -- performance counters (lock-free reads)
pub async fn get_counters(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "evaluations": state.counters.evaluations.load(Relaxed),
        "contracts_added": state.counters.contracts_added.load(Relaxed),
        "contracts_removed": state.counters.contracts_removed.load(Relaxed),
        "inputs_rejected": state.counters.inputs_rejected.load(Relaxed),
        "ws_messages_sent": state.counters.ws_messages_sent.load(Relaxed),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn input(json: &str) -> Json<ContractInput> {
        Json(serde_json::from_str(json).unwrap())
    }

    #[tokio::test]
    async fn test_add_then_payoff() {
        let state = AppState::new(AppConfig::default());
        let (status, _) = add_contract(
            State(state.clone()),
            input(r#"{"type":"call","strike":50,"premium":5}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        add_contract(
            State(state.clone()),
            input(r#"{"type":"put","strike":"50","premium":"5"}"#),
        )
        .await;

        let (status, Json(body)) =
            get_payoff(State(state.clone()), Query(PayoffQuery::default())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prices"].as_array().unwrap().len(), 201);
        assert_eq!(body["max_profit"], 40.0);
        assert_eq!(body["max_loss"], -10.0);
        assert_eq!(body["break_even"], serde_json::json!([40.0, 60.0]));
        assert_eq!(body["contracts"].as_array().unwrap().len(), 2);
        assert_eq!(
            body["summary"],
            "Max Profit: 40\nMax Loss: -10\nBreak-even Points: 40, 60"
        );
    }

    #[tokio::test]
    async fn test_fifth_add_returns_ok_unchanged() {
        let state = AppState::new(AppConfig::default());
        for _ in 0..4 {
            add_contract(State(state.clone()), input(r#"{"type":"call","strike":10,"premium":1}"#))
                .await;
        }
        let (status, Json(body)) = add_contract(
            State(state.clone()),
            input(r#"{"type":"put","strike":90,"premium":1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["added"], false);
        assert_eq!(body["contracts"].as_array().unwrap().len(), 4);

        let Json(portfolio) = get_portfolio(State(state)).await;
        assert_eq!(portfolio["full"], true);
    }

    #[tokio::test]
    async fn test_bad_input_is_400() {
        let state = AppState::new(AppConfig::default());
        let (status, Json(body)) = add_contract(
            State(state.clone()),
            input(r#"{"type":"call","strike":"fifty","premium":1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("strike"));
        assert!(state.portfolio().is_empty());

        let Json(counters) = get_counters(State(state)).await;
        assert_eq!(counters["inputs_rejected"], 1);
    }

    #[tokio::test]
    async fn test_payoff_domain_override() {
        let state = AppState::new(AppConfig::default());
        let query = PayoffQuery { start: Some(10.0), step: Some(1.0), count: Some(11) };
        let (status, Json(body)) = get_payoff(State(state.clone()), Query(query)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prices"].as_array().unwrap().len(), 11);
        assert_eq!(body["break_even"].as_array().unwrap().len(), 11);

        let bad = PayoffQuery { step: Some(0.0), ..Default::default() };
        let (status, _) = get_payoff(State(state.clone()), Query(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let huge = PayoffQuery { step: Some(1e-9), count: Some(1usize << 40), ..Default::default() };
        let (status, Json(body)) = get_payoff(State(state.clone()), Query(huge)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("at most"));

        let collapsed = PayoffQuery { start: Some(1.0e6), step: Some(1.0e-12), count: Some(3) };
        let (status, _) = get_payoff(State(state), Query(collapsed)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_remove_out_of_range() {
        let state = AppState::new(AppConfig::default());
        let (status, _) = remove_contract(State(state.clone()), Path(0)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        add_contract(State(state.clone()), input(r#"{"type":"put","strike":10,"premium":1}"#)).await;
        let (status, Json(body)) = remove_contract(State(state), Path(0)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"]["type"], "put");
        assert!(body["contracts"].as_array().unwrap().is_empty());
    }
}
