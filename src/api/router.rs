//! Route registry and dispatch

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::Result;

/// Request context handed to handlers
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request body; an empty JSON object when the caller passed none
    pub body: Value,
}

/// A registered route target
#[async_trait]
pub trait Handler: Send + Sync {
    async fn invoke(&self, ctx: RequestContext) -> Result<Value>;
}

/// Registry key: uppercased method plus exact path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    method: String,
    path: String,
}

impl RouteKey {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
        }
    }
}

/// Status/data envelope produced by every dispatch call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub status: u16,
    pub data: Value,
}

impl Envelope {
    fn ok(data: Value) -> Self {
        Self { status: 200, data }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            data: json!({ "error": "Not Found" }),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            status: 500,
            data: json!({ "error": message }),
        }
    }
}

/// Registry mapping route keys to handlers.
///
/// Lookup is exact: no pattern matching, no trailing-slash
/// normalization. Registering the same key twice silently keeps the
/// later handler.
#[derive(Default)]
pub struct Router {
    routes: HashMap<RouteKey, Box<dyn Handler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a method and exact path
    pub fn register(&mut self, method: &str, path: &str, handler: impl Handler + 'static) {
        self.routes
            .insert(RouteKey::new(method, path), Box::new(handler));
    }

    /// Register a GET route
    pub fn get(&mut self, path: &str, handler: impl Handler + 'static) {
        self.register("GET", path, handler);
    }

    /// Register a POST route
    pub fn post(&mut self, path: &str, handler: impl Handler + 'static) {
        self.register("POST", path, handler);
    }

    /// Resolve and invoke the handler for a request, normalizing the
    /// outcome into an envelope.
    ///
    /// Never fails the caller: an unregistered route yields a 404
    /// envelope without invoking any handler, and a handler error is
    /// caught here and yields a 500 envelope carrying the message.
    pub async fn dispatch(&self, method: &str, path: &str, body: Option<Value>) -> Envelope {
        let key = RouteKey::new(method, path);
        let handler = match self.routes.get(&key) {
            Some(handler) => handler,
            None => return Envelope::not_found(),
        };

        let ctx = RequestContext {
            body: body.unwrap_or_else(|| Value::Object(Map::new())),
        };

        match handler.invoke(ctx).await {
            Ok(data) => Envelope::ok(data),
            Err(err) => {
                tracing::debug!("handler for {} {} failed: {}", key.method, key.path, err);
                Envelope::failure(err.to_string())
            }
        }
    }
}
