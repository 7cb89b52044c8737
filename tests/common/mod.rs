//! In-process stand-in for the notes backend.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use notedesk::api::CreateNoteBody;
use notedesk::entity::{Note, NoteBucket};
use serde_json::{json, Value};

#[derive(Default)]
pub struct StubState {
    pub notes: Vec<(String, Note)>,
    pub requests: Vec<String>,
    pub fail: bool,
    pub last_auth: Option<String>,
    /// Held before answering a list request.
    pub list_delay: Option<Duration>,
    next_id: u32,
}

impl StubState {
    pub fn seed(&mut self, user_id: &str, note: Note) {
        self.notes.push((user_id.to_string(), note));
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().map(|(_, n)| n).find(|n| n.id == id)
    }
}

pub type Shared = Arc<Mutex<StubState>>;

pub struct StubBackend {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl StubBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    pub fn set_list_delay(&self, delay: Duration) {
        self.state.lock().unwrap().list_delay = Some(delay);
    }
}

pub fn note(id: &str, title: &str, bucket: NoteBucket) -> Note {
    let mut n = Note::new(title.to_string(), format!("{} body", title));
    n.id = id.to_string();
    n.note_type = Some(bucket);
    n
}

fn record(state: &Shared, line: String, headers: &HeaderMap) -> Option<Response> {
    let mut st = state.lock().unwrap();
    st.requests.push(line);
    st.last_auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if st.fail {
        return Some((StatusCode::INTERNAL_SERVER_ERROR, "backend down").into_response());
    }
    None
}

async fn list_notes(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let user = params.get("userId").cloned().unwrap_or_default();
    if let Some(resp) = record(&state, format!("GET /notes?userId={}", user), &headers) {
        return resp;
    }
    let delay = state.lock().unwrap().list_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let st = state.lock().unwrap();
    let data: Vec<&Note> = st
        .notes
        .iter()
        .filter(|(owner, _)| *owner == user)
        .map(|(_, n)| n)
        .collect();
    Json(json!({ "data": data })).into_response()
}

async fn create_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CreateNoteBody>,
) -> Response {
    if let Some(resp) = record(&state, "POST /notes".to_string(), &headers) {
        return resp;
    }
    let mut st = state.lock().unwrap();
    st.next_id += 1;

    let mut note = Note::new(body.title.clone(), body.content.clone());
    note.id = format!("srv{:04}", st.next_id);
    note.color = Some(body.bg_color.clone());
    note.banner = Some(body.banner.clone());
    note.is_html = body.is_html;
    note.note_type = Some(body.note_type);
    note.category = Some(body.category);
    note.entity_id = Some(body.entity_id.clone());
    note.entity_type = Some(body.entity_type.clone());

    st.notes.insert(0, (body.user_id.clone(), note.clone()));
    (StatusCode::CREATED, Json(json!({ "data": note }))).into_response()
}

async fn update_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(resp) = record(&state, format!("PUT /notes/{}", id), &headers) {
        return resp;
    }
    let bucket: NoteBucket = match serde_json::from_value(body["noteType"].clone()) {
        Ok(b) => b,
        Err(_) => return (StatusCode::BAD_REQUEST, "bad noteType").into_response(),
    };
    let mut st = state.lock().unwrap();
    match st.notes.iter_mut().find(|(_, n)| n.id == id) {
        Some((_, n)) => {
            n.note_type = Some(bucket);
            StatusCode::OK.into_response()
        }
        None => (StatusCode::NOT_FOUND, "note not found").into_response(),
    }
}

async fn delete_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Some(resp) = record(&state, format!("DELETE /notes/{}", id), &headers) {
        return resp;
    }
    let mut st = state.lock().unwrap();
    let before = st.notes.len();
    st.notes.retain(|(_, n)| n.id != id);
    if st.notes.len() == before {
        (StatusCode::NOT_FOUND, "note not found").into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/{id}", put(update_note).delete(delete_note))
        .with_state(state)
}

/// Serve on an ephemeral port from the current runtime.
pub async fn spawn() -> StubBackend {
    let state: Shared = Arc::new(Mutex::new(StubState::default()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    StubBackend { addr, state }
}

/// Serve from a dedicated thread, for tests that drive the binary.
pub fn spawn_in_thread() -> StubBackend {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let backend = spawn().await;
            tx.send((backend.addr, backend.state.clone())).unwrap();
            std::future::pending::<()>().await;
        });
    });
    let (addr, state) = rx.recv().unwrap();
    StubBackend { addr, state }
}
