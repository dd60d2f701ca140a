//! Fake WHOIS served on an ephemeral port. It evaluates the Directus `filter`
//! and `sort` parameters the way the real API does for the operators the
//! server sends (`_and`, `_eq`, `_nnull`, relational paths).
#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::TcpListener as StdListener,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use server::{config::Config, create_router, state};
use tokio::net::TcpListener;
use tower::ServiceExt;

#[derive(Default)]
pub struct FakeWhois {
    pub persons: Vec<Value>,
    pub squads: Vec<Value>,
    pub fail_squads: bool,
    pub fail_persons: bool,
    pub malformed_persons: bool,
    pub person_delay: Duration,
    pub person_queries: Mutex<Vec<HashMap<String, String>>>,
}

impl FakeWhois {
    pub fn roster() -> Self {
        Self {
            // insertion order differs from birthdate order on purpose
            persons: vec![
                json!({
                    "id": 1,
                    "name": "Ada Lovelace",
                    "squads": [{ "squad_id": { "name": "1G" } }],
                    "birthdate": "2001-03-04",
                    "fav_emoji": "🦀",
                    "fav_country": "Nederland",
                    "fav_kitchen": "Italiaans",
                    "fav_color": "#ff6600",
                    "avatar": "https://example.com/ada.png",
                    "bio": "Eerste programmeur"
                }),
                json!({
                    "id": 2,
                    "name": "Bo Brand",
                    "squads": [{ "squad_id": { "name": "1G" } }],
                    "birthdate": "2003-07-09",
                    "fav_emoji": null,
                    "fav_country": null,
                    "fav_kitchen": null,
                    "fav_color": null,
                    "avatar": null
                }),
                json!({
                    "id": 3,
                    "name": "Cy Cross",
                    "squads": [{ "squad_id": { "name": "1H" } }],
                    "birthdate": "2000-01-01",
                    "fav_emoji": "🐙",
                    "fav_country": "België",
                    "fav_kitchen": "Thais",
                    "fav_color": "#00ff00",
                    "avatar": null
                }),
                json!({
                    "id": 4,
                    "name": "Di Dots",
                    "squads": [{ "squad_id": { "name": "1G" } }],
                    "birthdate": null,
                    "fav_emoji": "🌵",
                    "fav_country": "Spanje",
                    "fav_kitchen": "Mexicaans",
                    "fav_color": "#0000ff",
                    "avatar": null
                }),
                json!({
                    "id": 5,
                    "name": "Eve Early",
                    "squads": [
                        { "squad_id": { "name": "1H" } },
                        { "squad_id": { "name": "1G" } }
                    ],
                    "birthdate": "1999-12-31",
                    "fav_emoji": "🦉",
                    "fav_country": "Duitsland",
                    "fav_kitchen": "Japans",
                    "fav_color": "#123456",
                    "avatar": null
                }),
            ],
            squads: vec![
                json!({ "id": 1, "name": "1G", "cohort": "2425", "tribe": { "name": "FDND Jaar 1" } }),
                json!({ "id": 2, "name": "1H", "cohort": "2425", "tribe": { "name": "FDND Jaar 1" } }),
                json!({ "id": 3, "name": "2A", "cohort": "2425", "tribe": { "name": "FDND Jaar 2" } }),
                json!({ "id": 4, "name": "1Z", "cohort": "2324", "tribe": { "name": "FDND Jaar 1" } }),
            ],
            ..Default::default()
        }
    }

    pub async fn serve(self) -> (Arc<Self>, String) {
        let fake = Arc::new(self);

        let app = Router::new()
            .route("/items/person", get(persons))
            .route("/items/person/{id}", get(person))
            .route("/items/squad", get(squads))
            .with_state(fake.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (fake, format!("http://{address}"))
    }

    pub fn person_queries(&self) -> Vec<HashMap<String, String>> {
        self.person_queries.lock().unwrap().clone()
    }
}

pub fn matches(filter: &Value, value: &Value) -> bool {
    let Some(conditions) = filter.as_object() else {
        return false;
    };

    conditions.iter().all(|(key, condition)| match key.as_str() {
        "_and" => condition
            .as_array()
            .is_some_and(|all| all.iter().all(|filter| matches(filter, value))),
        "_eq" => value == condition,
        "_nnull" => !value.is_null(),
        field => match value.get(field).unwrap_or(&Value::Null) {
            Value::Array(items) => items.iter().any(|item| matches(condition, item)),
            nested => matches(condition, nested),
        },
    })
}

fn apply(params: &HashMap<String, String>, records: &[Value]) -> Vec<Value> {
    let filter: Option<Value> = params
        .get("filter")
        .map(|filter| serde_json::from_str(filter).unwrap());

    let mut data: Vec<Value> = records
        .iter()
        .filter(|record| filter.as_ref().is_none_or(|filter| matches(filter, record)))
        .cloned()
        .collect();

    if let Some(sort) = params.get("sort") {
        data.sort_by(|a, b| a[sort.as_str()].as_str().cmp(&b[sort.as_str()].as_str()));
    }

    data
}

async fn persons(
    State(fake): State<Arc<FakeWhois>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    fake.person_queries.lock().unwrap().push(params.clone());

    if !fake.person_delay.is_zero() {
        tokio::time::sleep(fake.person_delay).await;
    }

    if fake.fail_persons {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream exploded").into_response();
    }

    if fake.malformed_persons {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }

    Json(json!({ "data": apply(&params, &fake.persons) })).into_response()
}

async fn person(State(fake): State<Arc<FakeWhois>>, Path(id): Path<String>) -> Response {
    match fake
        .persons
        .iter()
        .find(|person| person["id"].to_string() == id)
    {
        Some(person) => Json(json!({ "data": person })).into_response(),
        None => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "errors": [{
                    "message": "You don't have permission to access this.",
                    "extensions": { "code": "FORBIDDEN" }
                }]
            })),
        )
            .into_response(),
    }
}

async fn squads(
    State(fake): State<Arc<FakeWhois>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if fake.fail_squads {
        return (StatusCode::INTERNAL_SERVER_ERROR, "squads unavailable").into_response();
    }

    Json(json!({ "data": apply(&params, &fake.squads) })).into_response()
}

pub fn config(whois_url: &str) -> Config {
    let whois_url = whois_url.to_string();

    Config::from_lookup(|key| match key {
        "WHOIS_URL" => Some(whois_url.clone()),
        "WHOIS_TIMEOUT_SECS" => Some("2".to_string()),
        _ => None,
    })
    .unwrap()
}

pub async fn app(fake: FakeWhois) -> (Router, Arc<FakeWhois>) {
    let (fake, whois_url) = fake.serve().await;
    let state = state::State::new(config(&whois_url)).await.unwrap();

    (create_router(state), fake)
}

/// Base url nothing is listening on.
pub fn closed_url() -> String {
    let port = StdListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    format!("http://127.0.0.1:{port}")
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Response) {
    let response = app.clone().oneshot(request).await.unwrap();

    (response.status(), response)
}

pub async fn get_page(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, response) = send(app, request).await;
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
