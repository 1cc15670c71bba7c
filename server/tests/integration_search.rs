use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use boolir_core::Corpus;
use boolir_server::{build_app, ServerConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

fn tiny_corpus() -> Corpus {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cat.txt"), "The cat sat on the mat").unwrap();
    fs::write(dir.path().join("dog.txt"), "The dog sat on the log").unwrap();
    Corpus::from_dir(dir.path()).unwrap()
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
    call(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn hit_ids(json: &Value) -> Vec<String> {
    json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["doc_id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn search_returns_matching_documents() {
    let app = build_app(tiny_corpus(), ServerConfig::default()).unwrap();

    let (status, body) = get(app.clone(), "/search?q=sat").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(hit_ids(&json), vec!["Document 1", "Document 2"]);
    assert_eq!(json["results"][0]["name"], "cat.txt");
    assert_eq!(json["results"][0]["preview"], "The cat sat on the mat");
    assert_eq!(json["operator"], "terms");

    let (_, body) = get(app.clone(), "/search?q=cat%20not%20dog").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(hit_ids(&json), vec!["Document 1"]);
    assert_eq!(json["operator"], "not");

    let (_, body) = get(app, "/search?q=cat%20and%20dog").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total_hits"], 0);
    assert_eq!(json["message"], "No documents found matching the query.");
}

#[tokio::test]
async fn search_reports_missing_corpus_and_query() {
    let empty = build_app(Corpus::new(), ServerConfig::default()).unwrap();
    let (status, _) = get(empty, "/search?q=cat").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let app = build_app(tiny_corpus(), ServerConfig::default()).unwrap();
    let (status, _) = get(app, "/search?q=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_replaces_corpus() {
    let config = ServerConfig { admin_token: Some("secret".into()), ..ServerConfig::default() };
    let app = build_app(tiny_corpus(), config).unwrap();
    let payload = r#"{"documents":[{"name":"fox.txt","text":"Quick brown fox"}]}"#;

    let denied = Request::post("/documents")
        .header("content-type", "application/json")
        .body(Body::from(payload))
        .unwrap();
    let (status, _) = call(app.clone(), denied).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::post("/documents")
        .header("content-type", "application/json")
        .header("X-ADMIN-TOKEN", "secret")
        .body(Body::from(payload))
        .unwrap();
    let (status, body) = call(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["num_docs"], 1);
    assert_eq!(json["num_terms"], 3);
    assert_eq!(json["documents"][0]["doc_id"], "Document 1");

    let (_, body) = get(app.clone(), "/search?q=fox%20or%20cat").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(hit_ids(&json), vec!["Document 1"]);
    assert_eq!(json["results"][0]["name"], "fox.txt");

    let (status, body) = get(app.clone(), "/doc/Document%201").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["text"], "Quick brown fox");

    let (status, _) = get(app, "/doc/Document%202").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
