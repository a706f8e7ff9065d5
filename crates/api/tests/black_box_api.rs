use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use bookdir_api::app::services::AppServices;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port, in-memory store.
        let app = bookdir_api::app::build_app(Arc::new(AppServices::in_memory()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_dune(client: &reqwest::Client, base_url: &str) -> serde_json::Value {
    let res = client
        .post(format!("{}/books", base_url))
        .json(&json!({ "title": "Dune", "author": "Herbert", "category": "scifi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_returns_the_clean_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = create_dune(&client, &srv.base_url).await;
    assert_eq!(body["message"], "created");
    assert_eq!(
        body["book"],
        json!({ "id": "Dune", "title": "Dune", "author": "Herbert", "category": "scifi" })
    );

    // No store bookkeeping fields may leak into responses.
    let book = body["book"].as_object().unwrap();
    assert_eq!(book.len(), 4);
    assert!(book.keys().all(|k| !k.starts_with('_')));
}

#[tokio::test]
async fn list_contains_created_books() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_dune(&client, &srv.base_url).await;

    let res = client
        .get(format!("{}/books", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let books: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Dune");
    assert!(books[0].as_object().unwrap().keys().all(|k| !k.starts_with('_')));
}

#[tokio::test]
async fn duplicate_title_is_a_conflict() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_dune(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/books", srv.base_url))
        .json(&json!({ "title": "Dune", "author": "Someone", "category": "fantasy" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");

    // The original record is untouched.
    let books: Vec<serde_json::Value> = client
        .get(format!("{}/books", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["author"], "Herbert");
}

#[tokio::test]
async fn empty_fields_are_rejected_before_any_store_call() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/books", srv.base_url))
        .json(&json!({ "title": "", "author": "Herbert", "category": "scifi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let books: Vec<serde_json::Value> = client
        .get(format!("{}/books", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn update_preserves_fields_the_payload_leaves_out() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_dune(&client, &srv.base_url).await;

    let res = client
        .put(format!("{}/books/Dune", srv.base_url))
        .json(&json!({ "category": "classics" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "updated");
    assert_eq!(
        body["book"],
        json!({ "id": "Dune", "title": "Dune", "author": "Herbert", "category": "classics" })
    );
}

#[tokio::test]
async fn update_with_an_empty_value_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_dune(&client, &srv.base_url).await;

    let res = client
        .put(format!("{}/books/Dune", srv.base_url))
        .json(&json!({ "author": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_unknown_title_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/books/Ubik", srv.base_url))
        .json(&json!({ "author": "Dick" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn delete_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_dune(&client, &srv.base_url).await;

    let res = client
        .delete(format!("{}/books/Dune", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "message": "deleted", "title": "Dune" }));

    let books: Vec<serde_json::Value> = client
        .get(format!("{}/books", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(books.is_empty());

    // A second delete has nothing to remove.
    let res = client
        .delete(format!("{}/books/Dune", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
