//! Integration tests for the dispatch surface
//! Exercises the router, handlers, store, and sign-in stub together

use std::sync::Arc;

use serde_json::{json, Value};

use fauxbase::api::{build_router, AppState, Router};
use fauxbase::auth::StubSignIn;
use fauxbase::config::Config;
use fauxbase::store::MemoryStore;
use fauxbase::types::Record;

/// Router plus the store it dispatches against
struct Fixture {
    store: Arc<MemoryStore>,
    router: Router,
}

impl Fixture {
    fn new() -> Self {
        let mut config = Config::default();
        config.connect_delay_ms = 0;

        let store = Arc::new(MemoryStore::new(config));
        let state = AppState::new(store.clone(), Arc::new(StubSignIn::new()));
        let router = build_router(state);

        Self { store, router }
    }

    async fn connected() -> Self {
        let fixture = Self::new();
        fixture.store.connect().await;
        fixture
    }
}

fn record(value: Value) -> Record {
    value
        .as_object()
        .cloned()
        .expect("record literal must be a JSON object")
}

fn users_of(envelope_data: &Value) -> &Vec<Value> {
    envelope_data["users"]
        .as_array()
        .expect("users payload is an array")
}

#[tokio::test]
async fn unregistered_routes_yield_404() {
    let fixture = Fixture::connected().await;

    for (method, path) in [
        ("GET", "/nope"),
        ("POST", "/health"),
        ("PUT", "/users"),
        ("GET", "/users/"),
    ] {
        let envelope = fixture.router.dispatch(method, path, None).await;
        assert_eq!(envelope.status, 404, "{method} {path}");
        assert_eq!(envelope.data, json!({ "error": "Not Found" }));
    }
}

#[tokio::test]
async fn health_responds_even_while_disconnected() {
    let fixture = Fixture::new();

    let envelope = fixture.router.dispatch("GET", "/health", None).await;
    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.data["status"], json!("ok"));
    assert!(envelope.data["uptime"].as_f64().expect("uptime") >= 0.0);
}

#[tokio::test]
async fn users_route_surfaces_store_failure_as_500() {
    let fixture = Fixture::new();

    let envelope = fixture.router.dispatch("GET", "/users", None).await;
    assert_eq!(envelope.status, 500);
    assert_eq!(
        envelope.data,
        json!({ "error": "Not connected to database!" })
    );
}

#[tokio::test]
async fn users_route_lists_records_in_insertion_order() {
    let fixture = Fixture::connected().await;
    fixture
        .store
        .insert(record(json!({ "id": 1, "name": "alice", "role": "admin" })))
        .await
        .expect("insert");
    fixture
        .store
        .insert(record(json!({ "id": 2, "name": "bob", "role": "user" })))
        .await
        .expect("insert");

    let envelope = fixture.router.dispatch("GET", "/users", None).await;
    assert_eq!(envelope.status, 200);

    let users = users_of(&envelope.data);
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], json!("alice"));
    assert_eq!(users[1]["name"], json!("bob"));
}

#[tokio::test]
async fn valid_login_inserts_exactly_one_user_record() {
    let fixture = Fixture::connected().await;
    let body = json!({ "username": "carol", "password": "secret123" });

    let envelope = fixture
        .router
        .dispatch("POST", "/login", Some(body.clone()))
        .await;
    assert_eq!(envelope.status, 200);
    assert!(envelope.data["token"].is_string());
    assert_eq!(envelope.data["user"]["username"], json!("carol"));

    let users = fixture.store.query(None).await.expect("query");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], json!("carol"));
    assert_eq!(users[0]["role"], json!("user"));

    // A second login for the same username does not insert a duplicate
    let envelope = fixture.router.dispatch("POST", "/login", Some(body)).await;
    assert_eq!(envelope.status, 200);
    assert_eq!(fixture.store.query(None).await.expect("query").len(), 1);
}

#[tokio::test]
async fn invalid_login_is_a_200_rejection_without_insert() {
    let fixture = Fixture::connected().await;

    let envelope = fixture
        .router
        .dispatch(
            "POST",
            "/login",
            Some(json!({ "username": "bad!", "password": "123" })),
        )
        .await;
    assert_eq!(envelope.status, 200);
    assert!(envelope.data["error"].is_string());
    assert!(envelope.data.get("token").is_none());

    assert!(fixture.store.query(None).await.expect("query").is_empty());
}

#[tokio::test]
async fn login_while_disconnected_surfaces_as_500() {
    let fixture = Fixture::new();

    let envelope = fixture
        .router
        .dispatch(
            "POST",
            "/login",
            Some(json!({ "username": "alice", "password": "secret123" })),
        )
        .await;
    assert_eq!(envelope.status, 500);
    assert_eq!(
        envelope.data,
        json!({ "error": "Not connected to database!" })
    );
}

#[tokio::test]
async fn login_does_not_duplicate_a_seeded_user() {
    let fixture = Fixture::connected().await;
    fixture
        .store
        .insert(record(json!({ "id": 1, "name": "alice", "role": "admin" })))
        .await
        .expect("insert");

    let envelope = fixture
        .router
        .dispatch(
            "POST",
            "/login",
            Some(json!({ "username": "alice", "password": "secret123" })),
        )
        .await;
    assert_eq!(envelope.status, 200);
    assert!(envelope.data["token"].is_string());

    let envelope = fixture.router.dispatch("GET", "/users", None).await;
    let users = users_of(&envelope.data);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], json!("alice"));
    assert_eq!(users[0]["role"], json!("admin"));
}

#[tokio::test]
async fn distinct_logins_get_distinct_generated_ids() {
    let fixture = Fixture::connected().await;

    for username in ["carol", "dave"] {
        let envelope = fixture
            .router
            .dispatch(
                "POST",
                "/login",
                Some(json!({ "username": username, "password": "secret123" })),
            )
            .await;
        assert_eq!(envelope.status, 200);
    }

    let users = fixture.store.query(None).await.expect("query");
    assert_eq!(users.len(), 2);
    assert_ne!(users[0]["id"], users[1]["id"]);
}
