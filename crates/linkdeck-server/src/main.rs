#![forbid(unsafe_code)]

use linkdeck_server::{
    build_router, demo::seed_demo_data, validate_startup_config_contract, ApiConfig, AppState,
};
use linkdeck_store::{LocalFsStore, MemoryStore, ProfileStore};
use std::env;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("LINKDECK_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("LINKDECK_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let api_cfg = ApiConfig {
        max_body_bytes: env_usize("LINKDECK_MAX_BODY_BYTES", 256 * 1024),
        request_timeout: env_duration_ms("LINKDECK_REQUEST_TIMEOUT_MS", 5000),
        session_ttl: Duration::from_secs(env_u64("LINKDECK_SESSION_TTL_SECS", 86_400)),
        public_cache_ttl: Duration::from_secs(env_u64("LINKDECK_PUBLIC_CACHE_TTL_SECS", 30)),
        require_auth_for_writes: env_bool("LINKDECK_REQUIRE_AUTH", true),
        password_iterations: env_u64("LINKDECK_PASSWORD_ITERATIONS", 10_000) as u32,
        demo_seed: env_bool("LINKDECK_DEMO_SEED", false),
    };
    validate_startup_config_contract(&api_cfg)?;

    let store: Arc<dyn ProfileStore> = if matches!(
        env::var("LINKDECK_STORE").as_deref(),
        Ok("memory")
    ) {
        Arc::new(MemoryStore::new())
    } else {
        let root = PathBuf::from(
            env::var("LINKDECK_STORE_ROOT")
                .unwrap_or_else(|_| "artifacts/profile-store".to_string()),
        );
        Arc::new(LocalFsStore::new(root))
    };

    if api_cfg.demo_seed {
        seed_demo_data(store.as_ref(), api_cfg.password_iterations)
            .await
            .map_err(|e| format!("demo seed failed: {e}"))?;
    }

    let state = AppState::with_config(store, api_cfg);
    state.ready.store(true, Ordering::Relaxed);
    let app = build_router(state.clone());

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("linkdeck-server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            let drain_ms = env_u64("LINKDECK_SHUTDOWN_DRAIN_MS", 5000);
            tokio::time::sleep(Duration::from_millis(drain_ms)).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
