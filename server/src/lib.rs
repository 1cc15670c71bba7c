use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use boolir_core::corpus::{MSG_EMPTY_CORPUS, MSG_EMPTY_QUERY, MSG_NO_MATCH, PREVIEW_CHARS};
use boolir_core::{preview, Corpus, InvertedIndex, Query as BoolQuery};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// When set, uploads must carry a matching `X-ADMIN-TOKEN` header.
    pub admin_token: Option<String>,
    /// Comma-separated allowed origins; any origin when unset.
    pub cors_allow_origin: Option<String>,
    pub preview_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { admin_token: None, cors_allow_origin: None, preview_chars: PREVIEW_CHARS }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            admin_token: std::env::var("ADMIN_TOKEN").ok(),
            cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN").ok(),
            ..Self::default()
        }
    }
}

/// One uploaded corpus and its index. Replaced wholesale on every upload.
#[derive(Default)]
pub struct Session {
    pub corpus: Corpus,
    pub index: InvertedIndex,
}

impl Session {
    pub fn new(corpus: Corpus) -> Self {
        let index = corpus.build_index();
        Self { corpus, index }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub admin_token: Option<String>,
    pub preview_chars: usize,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub operator: &'static str,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub name: String,
    pub preview: String,
}

#[derive(Deserialize)]
pub struct UploadDoc {
    pub name: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct UploadRequest {
    pub documents: Vec<UploadDoc>,
}

#[derive(Serialize)]
pub struct UploadedDoc {
    pub name: String,
    pub doc_id: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub num_docs: usize,
    pub num_terms: usize,
    pub documents: Vec<UploadedDoc>,
}

pub fn build_app(corpus: Corpus, config: ServerConfig) -> Result<Router> {
    let app_state = AppState {
        session: Arc::new(RwLock::new(Session::new(corpus))),
        admin_token: config.admin_token,
        preview_chars: config.preview_chars,
    };

    let cors = match config.cors_allow_origin {
        Some(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/documents", post(upload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let session = state.session.read();
    if session.corpus.is_empty() {
        return Err((StatusCode::CONFLICT, MSG_EMPTY_CORPUS.into()));
    }
    if params.q.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, MSG_EMPTY_QUERY.into()));
    }

    let parsed = BoolQuery::parse(&params.q);
    let matched = parsed.evaluate(&session.index);
    let results: Vec<SearchHit> = session
        .corpus
        .ordered(&matched)
        .into_iter()
        .map(|doc| SearchHit { doc_id: doc.id.clone(), name: doc.name.clone(), preview: preview(&doc.text, state.preview_chars) })
        .collect();
    let message = results.is_empty().then_some(MSG_NO_MATCH);
    tracing::debug!(query = %params.q, operator = parsed.operator(), hits = results.len(), "search");

    Ok(Json(SearchResponse {
        operator: parsed.operator(),
        took_s: start.elapsed().as_secs_f64(),
        total_hits: results.len(),
        query: params.q,
        results,
        message,
    }))
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<String>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let session = state.session.read();
    match session.corpus.get(&doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc.id,
            "name": doc.name,
            "text": doc.text,
        }))),
        None => Err((StatusCode::NOT_FOUND, "not found".into())),
    }
}

async fn upload_handler(State(state): State<AppState>, headers: HeaderMap, Json(req): Json<UploadRequest>) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let corpus = Corpus::from_uploads(req.documents.into_iter().map(|d| (d.name, d.text)));
    let session = Session::new(corpus);
    let response = UploadResponse {
        num_docs: session.corpus.len(),
        num_terms: session.index.num_terms(),
        documents: session
            .corpus
            .documents()
            .iter()
            .map(|d| UploadedDoc { name: d.name.clone(), doc_id: d.id.clone() })
            .collect(),
    };
    *state.session.write() = session;
    tracing::info!(num_docs = response.num_docs, num_terms = response.num_terms, "corpus replaced");
    Ok(Json(response))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Ok(()),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
