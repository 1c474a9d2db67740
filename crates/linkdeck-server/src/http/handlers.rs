use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use std::future::Future;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::time::timeout;
use tracing::info;

use linkdeck_api::{
    map_error, parse_error, validation_error, ApiError, LoginRequest, RegisterRequest,
    SessionResponse,
};
use linkdeck_model::{import_config, Configuration, User, Username};
use linkdeck_store::{StoreError, StoreErrorCode, UserRecord};

use crate::auth::{
    hash_password, mint_salt, normalize_email, sha256_hex, user_id_for, verify_password,
};
use crate::{AppState, CONFIG_SCHEMA_VERSION, CRATE_NAME};

const ROUTE_HEALTHZ: &str = "/healthz";
const ROUTE_READYZ: &str = "/readyz";
const ROUTE_METRICS: &str = "/metrics";
const ROUTE_VERSION: &str = "/v1/version";
const ROUTE_CONFIG: &str = "/api/config/:username";
const ROUTE_REGISTER: &str = "/api/auth/register";
const ROUTE_LOGIN: &str = "/api/auth/login";
const ROUTE_LOGOUT: &str = "/api/auth/logout";

fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    make_request_id(state)
}

fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

fn error_response(err: ApiError, request_id: &str) -> Response {
    let status =
        StatusCode::from_u16(map_error(&err)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = Json(json!({"error": err.with_request_id(request_id)}));
    (status, body).into_response()
}

async fn finish(
    state: &AppState,
    route: &'static str,
    request_id: &str,
    started: Instant,
    response: Response,
) -> Response {
    state
        .metrics
        .observe_request(route, response.status(), started.elapsed())
        .await;
    with_request_id(response, request_id)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

fn if_none_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get("if-none-match")
        .and_then(|v| v.to_str().ok())
        .map(std::string::ToString::to_string)
}

fn put_cache_headers(headers: &mut HeaderMap, ttl: Duration, etag: &str) {
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs())) {
        headers.insert("cache-control", value);
    }
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert("etag", value);
    }
}

async fn store_call<T, F>(state: &AppState, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match timeout(state.api.request_timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::new(
            StoreErrorCode::Io,
            "store call timed out",
        )),
    }
}

fn store_api_error(err: &StoreError) -> ApiError {
    ApiError::store_unavailable(err.to_string())
}

fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos())
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let response = (StatusCode::OK, "ok").into_response();
    finish(&state, ROUTE_HEALTHZ, &request_id, started, response).await
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let response = if state.ready.load(Ordering::Relaxed) {
        (StatusCode::OK, "ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response()
    };
    finish(&state, ROUTE_READYZ, &request_id, started, response).await
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let payload = json!({
        "service": {
            "crate": CRATE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "config_schema_version": CONFIG_SCHEMA_VERSION,
        }
    });
    let mut response = Json(payload).into_response();
    if let Ok(value) = HeaderValue::from_str("public, max-age=30") {
        response.headers_mut().insert("cache-control", value);
    }
    finish(&state, ROUTE_VERSION, &request_id, started, response).await
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let text = state.metrics.render_text().await;
    let response = (StatusCode::OK, text).into_response();
    finish(&state, ROUTE_METRICS, &request_id, started, response).await
}

pub(crate) async fn get_config_handler(
    State(state): State<AppState>,
    Path(username_raw): Path<String>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = ROUTE_CONFIG, "request start");

    let username = match Username::parse(&username_raw) {
        Ok(u) => u,
        Err(e) => {
            let response = error_response(validation_error(&e), &request_id);
            return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
        }
    };
    let config = match store_call(&state, state.store.fetch_config(&username)).await {
        Ok(c) => c,
        Err(e) if e.is_not_found() => {
            let response =
                error_response(ApiError::config_not_found(username.as_str()), &request_id);
            return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
        }
        Err(e) => {
            let response = error_response(store_api_error(&e), &request_id);
            return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
        }
    };

    let etag = format!(
        "\"{}\"",
        sha256_hex(&serde_json::to_vec(&config).unwrap_or_default())
    );
    if if_none_match(&headers).as_deref() == Some(etag.as_str()) {
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(response.headers_mut(), state.api.public_cache_ttl, &etag);
        return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
    }
    let mut response = Json(config).into_response();
    put_cache_headers(response.headers_mut(), state.api.public_cache_ttl, &etag);
    finish(&state, ROUTE_CONFIG, &request_id, started, response).await
}

pub(crate) async fn put_config_handler(
    State(state): State<AppState>,
    Path(username_raw): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = ROUTE_CONFIG, "request start");

    let username = match Username::parse(&username_raw) {
        Ok(u) => u,
        Err(e) => {
            let response = error_response(validation_error(&e), &request_id);
            return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
        }
    };

    if state.api.require_auth_for_writes {
        let token = match bearer_token(&headers) {
            Some(t) => t,
            None => {
                let response = error_response(ApiError::unauthorized(), &request_id);
                return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
            }
        };
        match state.sessions.resolve(token).await {
            None => {
                let response = error_response(ApiError::unauthorized(), &request_id);
                return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
            }
            Some(owner) if owner != username => {
                let response =
                    error_response(ApiError::forbidden(username.as_str()), &request_id);
                return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
            }
            Some(_) => {}
        }
    }

    let config = match import_config(&body) {
        Ok(c) => c,
        Err(e) => {
            let response = error_response(parse_error(&e), &request_id);
            return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
        }
    };
    if let Err(e) = config.ensure_owner(&username) {
        let response = error_response(validation_error(&e), &request_id);
        return finish(&state, ROUTE_CONFIG, &request_id, started, response).await;
    }

    let response = match store_call(&state, state.store.put_config(&username, &config)).await {
        Ok(()) => {
            info!(
                request_id = %request_id,
                username = %username,
                links = config.links.len(),
                "configuration saved"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(store_api_error(&e), &request_id),
    };
    finish(&state, ROUTE_CONFIG, &request_id, started, response).await
}

pub(crate) async fn register_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = ROUTE_REGISTER, "request start");

    let request: RegisterRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            let response = error_response(ApiError::invalid_body(e.to_string()), &request_id);
            return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
        }
    };
    if request.name.trim().is_empty() {
        let response = error_response(
            ApiError::validation_failed("name must not be empty"),
            &request_id,
        );
        return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
    }
    if request.password.is_empty() {
        let response = error_response(
            ApiError::validation_failed("password must not be empty"),
            &request_id,
        );
        return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
    }
    let email = match normalize_email(&request.email) {
        Ok(e) => e,
        Err(msg) => {
            let response = error_response(ApiError::validation_failed(msg), &request_id);
            return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
        }
    };
    let username = match Username::parse(&request.username) {
        Ok(u) => u,
        Err(e) => {
            let response = error_response(validation_error(&e), &request_id);
            return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
        }
    };

    match store_call(&state, state.store.fetch_user(&username)).await {
        Ok(_) => {
            let response =
                error_response(ApiError::username_taken(username.as_str()), &request_id);
            return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
        }
        Err(e) if e.is_not_found() => {}
        Err(e) => {
            let response = error_response(store_api_error(&e), &request_id);
            return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
        }
    }
    match store_call(&state, state.store.fetch_user_by_email(&email)).await {
        Ok(_) => {
            let response = error_response(ApiError::email_taken(&email), &request_id);
            return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
        }
        Err(e) if e.is_not_found() => {}
        Err(e) => {
            let response = error_response(store_api_error(&e), &request_id);
            return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
        }
    }

    let nanos = unix_nanos();
    let counter = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    let salt = mint_salt(username.as_str(), nanos, counter);
    let record = UserRecord {
        user: User {
            id: user_id_for(username.as_str(), nanos),
            username: username.clone(),
            email,
            name: request.name.trim().to_string(),
            created_at: Utc::now(),
        },
        password_hash: hash_password(&salt, &request.password, state.api.password_iterations),
        password_salt: salt,
    };
    if let Err(e) = store_call(&state, state.store.put_user(&record)).await {
        let response = error_response(store_api_error(&e), &request_id);
        return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
    }
    let config = Configuration::default_for(username.clone(), record.user.name.clone());
    if let Err(e) = store_call(&state, state.store.put_config(&username, &config)).await {
        let response = error_response(store_api_error(&e), &request_id);
        return finish(&state, ROUTE_REGISTER, &request_id, started, response).await;
    }

    let token = state.sessions.issue(&username).await;
    info!(request_id = %request_id, username = %username, "account registered");
    let response = Json(SessionResponse {
        user: record.user,
        token,
        expires_in_secs: state.sessions.ttl().as_secs(),
    })
    .into_response();
    finish(&state, ROUTE_REGISTER, &request_id, started, response).await
}

pub(crate) async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = ROUTE_LOGIN, "request start");

    let request: LoginRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            let response = error_response(ApiError::invalid_body(e.to_string()), &request_id);
            return finish(&state, ROUTE_LOGIN, &request_id, started, response).await;
        }
    };
    let email = match normalize_email(&request.email) {
        Ok(e) => e,
        Err(msg) => {
            let response = error_response(ApiError::validation_failed(msg), &request_id);
            return finish(&state, ROUTE_LOGIN, &request_id, started, response).await;
        }
    };

    let record = match store_call(&state, state.store.fetch_user_by_email(&email)).await {
        Ok(r) => r,
        Err(e) if e.is_not_found() => {
            let response = error_response(ApiError::invalid_credentials(), &request_id);
            return finish(&state, ROUTE_LOGIN, &request_id, started, response).await;
        }
        Err(e) => {
            let response = error_response(store_api_error(&e), &request_id);
            return finish(&state, ROUTE_LOGIN, &request_id, started, response).await;
        }
    };
    if !verify_password(
        &record.password_salt,
        &request.password,
        state.api.password_iterations,
        &record.password_hash,
    ) {
        let response = error_response(ApiError::invalid_credentials(), &request_id);
        return finish(&state, ROUTE_LOGIN, &request_id, started, response).await;
    }

    let token = state.sessions.issue(&record.user.username).await;
    info!(request_id = %request_id, username = %record.user.username, "login succeeded");
    let response = Json(SessionResponse {
        user: record.user,
        token,
        expires_in_secs: state.sessions.ttl().as_secs(),
    })
    .into_response();
    finish(&state, ROUTE_LOGIN, &request_id, started, response).await
}

pub(crate) async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);

    let response = match bearer_token(&headers) {
        Some(token) if state.sessions.revoke(token).await => {
            Json(json!({"status": "ok"})).into_response()
        }
        _ => error_response(ApiError::unauthorized(), &request_id),
    };
    finish(&state, ROUTE_LOGOUT, &request_id, started, response).await
}
