#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use linkdeck_store::ProfileStore;

pub mod auth;
mod config;
pub mod demo;
mod http;
mod sessions;

pub use config::{validate_startup_config_contract, ApiConfig, CONFIG_SCHEMA_VERSION};
pub use sessions::SessionManager;

pub const CRATE_NAME: &str = "linkdeck-server";

#[derive(Default)]
pub(crate) struct RequestMetrics {
    counts: Mutex<HashMap<(String, u16), u64>>,
    latency_ns: Mutex<HashMap<String, Vec<u64>>>,
}

impl RequestMetrics {
    pub(crate) async fn observe_request(&self, route: &str, status: StatusCode, latency: Duration) {
        let mut counts = self.counts.lock().await;
        *counts
            .entry((route.to_string(), status.as_u16()))
            .or_insert(0) += 1;
        drop(counts);
        let mut latency_map = self.latency_ns.lock().await;
        latency_map
            .entry(route.to_string())
            .or_insert_with(Vec::new)
            .push(latency.as_nanos() as u64);
    }

    pub(crate) async fn render_text(&self) -> String {
        let mut out = String::new();
        {
            let counts = self.counts.lock().await;
            let mut rows: Vec<(&(String, u16), &u64)> = counts.iter().collect();
            rows.sort();
            for ((route, status), count) in rows {
                out.push_str(&format!(
                    "linkdeck_requests_total{{route=\"{route}\",status=\"{status}\"}} {count}\n"
                ));
            }
        }
        let latency_map = self.latency_ns.lock().await;
        let mut routes: Vec<&String> = latency_map.keys().collect();
        routes.sort();
        for route in routes {
            let samples = &latency_map[route];
            let sum_ns: u64 = samples.iter().sum();
            out.push_str(&format!(
                "linkdeck_request_latency_seconds_sum{{route=\"{route}\"}} {}\n",
                sum_ns as f64 / 1e9
            ));
            out.push_str(&format!(
                "linkdeck_request_latency_seconds_count{{route=\"{route}\"}} {}\n",
                samples.len()
            ));
        }
        out
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub api: ApiConfig,
    pub sessions: Arc<SessionManager>,
    pub ready: Arc<AtomicBool>,
    pub(crate) metrics: Arc<RequestMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<dyn ProfileStore>, api: ApiConfig) -> Self {
        Self {
            store,
            sessions: Arc::new(SessionManager::new(api.session_ttl)),
            ready: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
            api,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/metrics", get(http::handlers::metrics_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .route(
            "/api/config/:username",
            get(http::handlers::get_config_handler).put(http::handlers::put_config_handler),
        )
        .route("/api/auth/register", post(http::handlers::register_handler))
        .route("/api/auth/login", post(http::handlers::login_handler))
        .route("/api/auth/logout", post(http::handlers::logout_handler))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
