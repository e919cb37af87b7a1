//! Route handlers for the simulated API

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::router::{Handler, RequestContext, Router};
use crate::auth::{Credentials, SignIn, SignInOutcome, UserProfile};
use crate::error::Result;
use crate::store::MemoryStore;
use crate::types::Record;

/// Strictly increasing id sequence for records created by login.
///
/// Wall-clock ids collide under rapid successive calls; a counter
/// cannot.
#[derive(Debug)]
pub struct IdSequence(AtomicU64);

impl IdSequence {
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state handed to handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub signin: Arc<dyn SignIn>,
    pub started_at: Instant,
    pub user_ids: Arc<IdSequence>,
}

impl AppState {
    pub fn new(store: Arc<MemoryStore>, signin: Arc<dyn SignIn>) -> Self {
        Self {
            store,
            signin,
            started_at: Instant::now(),
            user_ids: Arc::new(IdSequence::new()),
        }
    }
}

// Response types

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime: f64,
}

#[derive(Debug, Serialize)]
struct UsersResponse {
    users: Vec<Record>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    user: UserProfile,
}

#[derive(Debug, Serialize)]
struct LoginRejected {
    error: String,
}

/// Health probe: fixed payload, never touches the store
pub struct HealthHandler {
    started_at: Instant,
}

#[async_trait]
impl Handler for HealthHandler {
    async fn invoke(&self, _ctx: RequestContext) -> Result<Value> {
        let response = HealthResponse {
            status: "ok",
            uptime: self.started_at.elapsed().as_secs_f64(),
        };
        Ok(serde_json::to_value(response)?)
    }
}

/// Lists every stored record as `{"users": [...]}`
pub struct ListUsersHandler {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl Handler for ListUsersHandler {
    async fn invoke(&self, _ctx: RequestContext) -> Result<Value> {
        let users = self.store.query(None).await?;
        Ok(serde_json::to_value(UsersResponse { users })?)
    }
}

/// Login: delegates to the sign-in capability, then upserts the user
/// record on success.
pub struct LoginHandler {
    state: AppState,
}

#[async_trait]
impl Handler for LoginHandler {
    async fn invoke(&self, ctx: RequestContext) -> Result<Value> {
        let credentials: Credentials = serde_json::from_value(ctx.body)?;

        match self.state.signin.attempt_sign_in(&credentials).await {
            SignInOutcome::Granted { token, user } => {
                let name = Value::String(credentials.username.clone());
                let existing = self.state.store.query(Some(("name", &name))).await?;
                if existing.is_empty() {
                    let mut record = Record::new();
                    record.insert("id".to_string(), json!(self.state.user_ids.next()));
                    record.insert("name".to_string(), name);
                    record.insert("role".to_string(), json!("user"));
                    self.state.store.insert(record).await?;
                }
                Ok(serde_json::to_value(LoginResponse { token, user })?)
            }
            // Business-logic rejection, not a dispatch error
            SignInOutcome::Denied { message } => {
                Ok(serde_json::to_value(LoginRejected { error: message })?)
            }
        }
    }
}

/// Register the three routes against shared state
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new();
    router.get(
        "/health",
        HealthHandler {
            started_at: state.started_at,
        },
    );
    router.get(
        "/users",
        ListUsersHandler {
            store: state.store.clone(),
        },
    );
    router.post("/login", LoginHandler { state });
    router
}
