// Shared fixtures: fake REST server and recording collaborators

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use paijob_core::port::{CredentialStore, Notifier};
use paijob_core::{Credentials, JobClientAdapter, LauncherScheduler, ServerEndpoint};
use paijob_infra_store::FileCredentialStore;
use paijob_sdk::{PaiRestClient, ReqwestFetch};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN: &str = "t0k3n";

/// A request as the server saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path_and_query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

#[derive(Default)]
struct FakeState {
    routes: Mutex<HashMap<String, Canned>>,
    requests: Mutex<Vec<Recorded>>,
}

/// In-process HTTP server answering canned responses by path
pub struct FakeServer {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeServer {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let router = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn respond_json(&self, path: &str, status: u16, body: serde_json::Value) {
        self.respond(path, status, "application/json", body.to_string());
    }

    pub fn respond(
        &self,
        path: &str,
        status: u16,
        content_type: &'static str,
        body: impl Into<String>,
    ) {
        self.state.routes.lock().unwrap().insert(
            path.to_string(),
            Canned {
                status: StatusCode::from_u16(status).unwrap(),
                content_type,
                body: body.into(),
            },
        );
    }

    pub fn error(&self, path: &str, status: u16, code: &str, message: &str) {
        self.respond_json(
            path,
            status,
            serde_json::json!({ "code": code, "message": message }),
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn handle(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.requests.lock().unwrap().push(Recorded {
        method,
        path_and_query: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        authorization: header_str(&headers, header::AUTHORIZATION),
        content_type: header_str(&headers, header::CONTENT_TYPE),
        body,
    });

    let canned = state
        .routes
        .lock()
        .unwrap()
        .get(uri.path())
        .cloned()
        .unwrap_or(Canned {
            status: StatusCode::NOT_FOUND,
            content_type: "text/plain",
            body: "no route".to_string(),
        });

    Response::builder()
        .status(canned.status)
        .header(header::CONTENT_TYPE, canned.content_type)
        .body(Body::from(canned.body))
        .unwrap()
}

/// Notifier that remembers every alert
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// Everything a test needs to drive and inspect one adapter
pub struct Harness {
    pub adapter: JobClientAdapter,
    pub store: Arc<FileCredentialStore>,
    pub notifier: Arc<RecordingNotifier>,
    _session_dir: tempfile::TempDir,
}

/// Adapter wired the way the CLI wires it, with a signed-in session on disk
pub fn harness(base_url: &str, scheduler: &str) -> Harness {
    let session_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCredentialStore::new(
        session_dir.path().join("session.json"),
    ));
    store.save(&Credentials::new("alice", TOKEN)).unwrap();
    let notifier = Arc::new(RecordingNotifier::default());

    let credentials = store.load().unwrap();
    let endpoint = ServerEndpoint::resolve(base_url, None).unwrap();
    let timeout = Duration::from_secs(5);
    let api = PaiRestClient::new(endpoint.clone(), credentials.clone(), timeout).unwrap();
    let http = ReqwestFetch::new(timeout).unwrap();

    let adapter = JobClientAdapter::new(
        Arc::new(api),
        Arc::new(http),
        store.clone(),
        notifier.clone(),
        endpoint,
        LauncherScheduler::from(scheduler),
        credentials,
    );

    Harness {
        adapter,
        store,
        notifier,
        _session_dir: session_dir,
    }
}
