use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use axum::{
    Json,
    Router,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, delete},
};
use serde_json::{json, Value};

/// json-server lookalike serving `/contactos`.
#[derive(Clone, Default)]
pub(crate) struct Backend {
    contacts    : Arc<Mutex<Vec<Value>>>,
    next_id     : Arc<AtomicUsize>,
    bodies      : Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<Vec<String>>>>,
}

impl Backend {
    pub(crate) fn with_contacts(contacts: Vec<Value>) -> Self {
        let backend = Self::default();
        backend.next_id.store(contacts.len(), Ordering::SeqCst);
        *backend.contacts.lock().unwrap() = contacts;
        backend
    }

    pub(crate) fn contacts(&self) -> Vec<Value> {
        self.contacts.lock().unwrap().clone()
    }

    /// Request bodies received by POST, in order.
    pub(crate) fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    /// Every `Content-Type` value of each POST, in order.
    pub(crate) fn content_types(&self) -> Vec<Vec<String>> {
        self.content_types.lock().unwrap().clone()
    }

    pub(crate) async fn spawn(self) -> String {
        let app = Router::new()
            .route("/contactos", get(list).post(create))
            .route("/contactos/{id}", delete(remove))
            .with_state(self);
        serve(app).await
    }
}

async fn list(State(backend): State<Backend>) -> Json<Vec<Value>> {
    Json(backend.contacts())
}

async fn create(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>
) -> (StatusCode, Json<Value>) {
    let types = headers.get_all(header::CONTENT_TYPE).iter()
        .map(|v| v.to_str().unwrap_or_default().to_string())
        .collect();
    backend.content_types.lock().unwrap().push(types);
    backend.bodies.lock().unwrap().push(body.clone());

    let id = backend.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let mut record = body;
    record["id"] = json!(id.to_string());
    backend.contacts.lock().unwrap().push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn remove(State(backend): State<Backend>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    let mut contacts = backend.contacts.lock().unwrap();
    let before = contacts.len();
    contacts.retain(|c| c["id"] != json!(id));
    match contacts.len() < before {
        true => (StatusCode::OK, Json(json!({}))),
        false => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}

/// A backend answering every request with 500.
pub(crate) async fn spawn_broken() -> String {
    let fail = || async { StatusCode::INTERNAL_SERVER_ERROR };
    let app = Router::new()
        .route("/contactos", get(fail).post(fail))
        .route("/contactos/{id}", delete(fail));
    serve(app).await
}

/// A base url nothing is listening on.
pub(crate) async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/contactos", addr)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/contactos", addr)
}

pub(crate) fn record(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "phone": "300",
        "email": format!("{}@example.com", name.to_lowercase()),
        "tag": ""
    })
}
