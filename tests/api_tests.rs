//! HTTP API tests against the full router

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use event_hub::config::MIN_PASSWORD_COST;
use event_hub::server::startup;
use event_hub::types::default_regions;
use event_hub::{create_router, AppState, Config, EventStore};

fn test_app() -> (Router, Arc<EventStore>, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(EventStore::open(dir.path().join("hub.jsonl")).unwrap());
    let state = AppState::new(store.clone()).with_password_cost(MIN_PASSWORD_COST);
    (create_router(Arc::new(state)), store, dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

fn event_body(name: &str, date: &str, category: &str, location: &str) -> Value {
    json!({
        "name": name,
        "date": date,
        "time": "08:00 - 13:00",
        "location": location,
        "type": category,
        "description": format!("{name} for everyone"),
        "host": "organizer"
    })
}

async fn seed(app: &Router) {
    for body in [
        event_body("Beach Cleanup", "2999-05-01", "Community", "Mactan, Central Visayas"),
        event_body("Jazz Night", "2999-05-02", "Music", "Iloilo, Western Visayas"),
        event_body("Old Concert", "2000-01-01", "Music", "Davao Region"),
    ] {
        let (status, _) = post(app, "/create_event", body).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

fn names(events: &Value) -> Vec<String> {
    let mut names: Vec<String> = events["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_search_all_returns_every_event() {
    let (app, store, _dir) = test_app();
    seed(&app).await;

    let (status, body) = get(&app, "/search_events?query=All").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"].as_array().unwrap().len(), store.event_count());

    let (_, display) = get(&app, "/display_events").await;
    assert_eq!(names(&display), names(&body));
}

#[tokio::test]
async fn test_search_annotates_status_and_slots() {
    let (app, _store, _dir) = test_app();
    seed(&app).await;

    let (_, body) = get(&app, "/search_events?query=concert").await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["status"], "Closed");
    assert_eq!(events[0]["type"], "Music");

    let (_, body) = get(&app, "/search_events?query=jazz").await;
    assert_eq!(body["events"][0]["status"], "Upcoming");
}

#[tokio::test]
async fn test_search_by_category() {
    let (app, _store, _dir) = test_app();
    seed(&app).await;

    let (status, body) = get(&app, "/search_events_by_category?category=music").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Jazz Night", "Old Concert"]);

    let (_, body) = get(&app, "/search_events_by_category?category=Sports").await;
    assert!(body["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_within_region() {
    let (app, _store, _dir) = test_app();
    seed(&app).await;

    let (_, body) = get(&app, "/search_events?query=All&region=Central%20Visayas").await;
    assert_eq!(names(&body), vec!["Beach Cleanup"]);

    let (_, body) = get(&app, "/search_events?region=Visayas").await;
    assert_eq!(names(&body), vec!["Beach Cleanup", "Jazz Night"]);

    let (_, body) = get(&app, "/search_events?query=jazz&region=Central%20Visayas").await;
    assert!(body["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_requires_query() {
    let (app, _store, _dir) = test_app();

    let (status, body) = get(&app, "/search_events").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_join_flow() {
    let (app, store, _dir) = test_app();
    seed(&app).await;

    let (status, body) = post(
        &app,
        "/join_event",
        json!({"username": "alice", "event_name": "Beach Cleanup"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Beach Cleanup"));

    let event = store.get_event("Beach Cleanup").unwrap();
    assert_eq!(event.participants.len(), 1);
    assert_eq!(event.participants[0].username, "alice");

    let (status, body) = get(&app, "/notifications?username=alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notifications"].as_array().unwrap().len(), 1);

    let (_, body) = get(&app, "/my_events?username=alice").await;
    assert_eq!(names(&body), vec!["Beach Cleanup"]);
}

#[tokio::test]
async fn test_second_join_conflicts() {
    let (app, store, _dir) = test_app();
    seed(&app).await;
    let join = json!({"username": "alice", "event_name": "Jazz Night"});

    let (status, _) = post(&app, "/join_event", join.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/join_event", join).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(store.get_event("Jazz Night").unwrap().participants.len(), 1);
}

#[tokio::test]
async fn test_join_full_event_conflicts() {
    let (app, _store, _dir) = test_app();
    let mut body = event_body("Workshop", "2999-01-01", "Education", "Cebu");
    body["guest_limit"] = json!(1);
    post(&app, "/create_event", body).await;

    let (status, _) = post(&app, "/join_event", json!({"username": "a", "event_name": "Workshop"})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(&app, "/join_event", json!({"username": "b", "event_name": "Workshop"})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = get(&app, "/search_events?query=workshop").await;
    assert_eq!(body["events"][0]["available_slots"], 0);
}

#[tokio::test]
async fn test_join_missing_event() {
    let (app, _store, _dir) = test_app();

    let (status, body) = post(
        &app,
        "/join_event",
        json!({"username": "alice", "event_name": "Nope"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_join_reports_store_failure() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    std::fs::create_dir(&data_dir).unwrap();

    let store = Arc::new(EventStore::open(data_dir.join("hub.jsonl")).unwrap());
    let app = create_router(Arc::new(AppState::new(store.clone())));
    seed(&app).await;

    // Replace the data directory with a file so the next write fails
    std::fs::remove_dir_all(&data_dir).unwrap();
    std::fs::write(&data_dir, "blocked").unwrap();

    let (status, body) = post(
        &app,
        "/join_event",
        json!({"username": "alice", "event_name": "Beach Cleanup"}),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
    assert!(store.get_event("Beach Cleanup").unwrap().participants.is_empty());
}

#[tokio::test]
async fn test_create_event_validation() {
    let (app, _store, _dir) = test_app();

    let body = event_body("Jazz Night", "2999-05-02", "music", "Iloilo");
    let (status, created) = post(&app, "/create_event", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["event"]["type"], "Music");

    let (status, _) = post(&app, "/create_event", body).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post(
        &app,
        "/create_event",
        event_body("Bad Date", "next friday", "Music", "Iloilo"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/create_event",
        event_body("Knitting", "2999-05-02", "Knitting", "Iloilo"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut hostless = event_body("Hostless", "2999-05-02", "Music", "Iloilo");
    hostless["host"] = json!("");
    let (status, _) = post(&app, "/create_event", hostless).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_import_events() {
    let (app, store, _dir) = test_app();
    seed(&app).await;

    let (status, body) = post(
        &app,
        "/import_events",
        json!({"events": [
            {"name": "Jazz Night", "date": "2999-06-01", "time": "20:00", "type": "Music"},
            {"name": "Food Fair", "date": "2999-07-01", "time": "11:00 - 20:00", "type": "Food"},
            {"name": "Broken", "date": "soon", "time": "11:00", "type": "Food"}
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"imported": 1, "updated": 1, "skipped": 1}));

    assert_eq!(store.get_event("Jazz Night").unwrap().date, "2999-06-01");
    assert_eq!(store.get_event("Food Fair").unwrap().host, "scraper");
}

#[tokio::test]
async fn test_notifications_for_known_and_unknown_users() {
    let (app, store, _dir) = test_app();

    let (status, _) = get(&app, "/notifications?username=ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    post(
        &app,
        "/register",
        json!({"username": "bob", "email": "bob@example.com", "password": "secret"}),
    )
    .await;
    assert!(store.user_exists("bob"));

    let (status, body) = get(&app, "/notifications?username=bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notifications"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_lifecycle() {
    let (app, _store, _dir) = test_app();

    let (status, body) = post(
        &app,
        "/register",
        json!({"username": "carol", "email": "carol@example.com", "password": "hunter2"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], "carol");
    assert!(body["user"].get("password_hash").is_none());

    let (status, _) = post(
        &app,
        "/register",
        json!({"username": "carol", "email": "other@example.com", "password": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post(&app, "/login", json!({"username": "carol", "password": "wrong"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = post(&app, "/login", json!({"username": "carol", "password": "hunter2"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "carol@example.com");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/update_user",
        Some(json!({"username": "carol", "address": "Cebu City"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["address"], "Cebu City");

    let (status, body) = get(&app, "/get_user?username=carol").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["address"], "Cebu City");

    let (status, _) = get(&app, "/get_user?username=nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_regions_after_startup() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        data_file: dir.path().join("hub.jsonl"),
        broadcast_capacity: 16,
        regions: default_regions(),
        password_cost: MIN_PASSWORD_COST,
    };
    let app = create_router(startup(&config).unwrap());

    let (status, body) = get(&app, "/regions").await;
    assert_eq!(status, StatusCode::OK);
    let regions: Vec<event_hub::Region> = serde_json::from_value(body["regions"].clone()).unwrap();
    assert_eq!(regions, default_regions());
}

#[tokio::test]
async fn test_import_cannot_overfill_event() {
    let (app, store, _dir) = test_app();
    let mut workshop = event_body("Workshop", "2999-01-01", "Education", "Cebu");
    workshop["guest_limit"] = json!(2);
    post(&app, "/create_event", workshop.clone()).await;
    for username in ["a", "b"] {
        let (status, _) = post(&app, "/join_event", json!({"username": username, "event_name": "Workshop"})).await;
        assert_eq!(status, StatusCode::OK);
    }

    workshop["guest_limit"] = json!(1);
    let (status, body) = post(&app, "/import_events", json!({"events": [workshop]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"imported": 0, "updated": 0, "skipped": 1}));

    let event = store.get_event("Workshop").unwrap();
    assert_eq!(event.guest_limit, Some(2));
    assert_eq!(event.participants.len(), 2);
}
