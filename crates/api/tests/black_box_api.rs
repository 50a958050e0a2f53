use reqwest::StatusCode;
use serde_json::{json, Value};

use taproom_api::config::AppConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod over the in-memory store, bound to an ephemeral port.
        let config = AppConfig::in_memory("127.0.0.1:0".parse().unwrap());
        let app = taproom_api::app::build_app(&config)
            .await
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind(config.bind_addr)
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn beer(name: &str, maximum: i32, quantity: i32) -> Value {
    json!({
        "name": name,
        "brand": "Heineken",
        "maximum": maximum,
        "quantity": quantity,
        "type": "LAGER",
    })
}

async fn create(client: &reqwest::Client, srv: &TestServer, payload: Value) -> Value {
    let res = client
        .post(srv.url("/api/beers"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn increment(
    client: &reqwest::Client,
    srv: &TestServer,
    id: &str,
    quantity: i32,
) -> reqwest::Response {
    client
        .patch(srv.url(&format!("/api/beers/{id}/increment")))
        .json(&json!({ "quantity": quantity }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_public_and_names_the_store() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn create_then_fetch_by_name_and_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/beers"))
        .json(&beer("Heineken", 100, 50))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string();
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(location, format!("/api/beers/{id}"));
    assert_eq!(created["quantity"], 50);
    assert_eq!(created["type"], "LAGER");

    let by_name: Value = client
        .get(srv.url("/api/beers/name/Heineken"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_name, created);

    let by_id: Value = client.get(srv.url(&location)).send().await.unwrap().json().await.unwrap();
    assert_eq!(by_id, created);
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    create(&client, &srv, beer("Heineken", 100, 50)).await;

    let res = client
        .post(srv.url("/api/beers"))
        .json(&beer("Heineken", 10, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let list: Vec<Value> = client
        .get(srv.url("/api/beers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn initial_quantity_above_maximum_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/beers"))
        .json(&beer("Brahma", 10, 11))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(srv.url("/api/beers/name/Brahma")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_type_is_a_validation_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut payload = beer("Guinness", 10, 1);
    payload["type"] = json!("PORTER");
    let res = client.post(srv.url("/api/beers")).json(&payload).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["fields"][0]["field"], "type");
}

#[tokio::test]
async fn list_starts_empty_and_keeps_creation_order() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let empty: Vec<Value> = client
        .get(srv.url("/api/beers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(empty.is_empty());

    for name in ["Heineken", "Brahma", "Skol"] {
        create(&client, &srv, beer(name, 100, 10)).await;
    }

    let list: Vec<Value> = client
        .get(srv.url("/api/beers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = list.iter().map(|b| b["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Heineken", "Brahma", "Skol"]);
}

#[tokio::test]
async fn increment_adds_stock_up_to_maximum() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let created = create(&client, &srv, beer("Heineken", 100, 50)).await;
    let id = created["id"].as_str().unwrap();

    let res = increment(&client, &srv, id, 10).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["quantity"], 60);

    let res = increment(&client, &srv, id, 40).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["quantity"], 100);
}

#[tokio::test]
async fn increment_past_maximum_leaves_stock_untouched() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let created = create(&client, &srv, beer("Heineken", 100, 50)).await;
    let id = created["id"].as_str().unwrap();

    let res = increment(&client, &srv, id, 1000).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "capacity_exceeded");
    assert_eq!(body["path"], format!("/api/beers/{id}/increment"));

    let after: Value = client
        .get(srv.url(&format!("/api/beers/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after["quantity"], 50);
}

#[tokio::test]
async fn non_positive_increment_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let created = create(&client, &srv, beer("Heineken", 100, 50)).await;
    let id = created["id"].as_str().unwrap();

    for amount in [0, -5] {
        let res = increment(&client, &srv, id, amount).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    let res = client
        .patch(srv.url(&format!("/api/beers/{id}/increment")))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["fields"][0]["field"], "quantity");
}

#[tokio::test]
async fn unknown_ids_and_names_are_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let missing = taproom_core::BeerId::new();

    let res = client
        .get(srv.url(&format!("/api/beers/{missing}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = increment(&client, &srv, &missing.to_string(), 5).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(srv.url(&format!("/api/beers/{missing}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(srv.url("/api/beers/name/Nope")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "not_found");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn delete_removes_the_beer() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let created = create(&client, &srv, beer("Heineken", 100, 50)).await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .delete(srv.url(&format!("/api/beers/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(srv.url(&format!("/api/beers/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(srv.url("/api/beers/name/Heineken")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The name is free again.
    create(&client, &srv, beer("Heineken", 100, 50)).await;
}
