//! In-process fake of the GitHub REST endpoints the clone pipeline talks to.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path as FsPath;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::GitHubConfig;

pub(crate) const TEST_PRIVATE_KEY: &str = include_str!("../../testdata/app-key.pem");
pub(crate) const TEST_PUBLIC_KEY: &str = include_str!("../../testdata/app-key.pub.pem");

/// Create a git repository at `path` with one commit containing README.md.
pub(crate) fn init_local_repo(path: &FsPath) {
    let repo = git2::Repository::init(path).unwrap();
    std::fs::write(path.join("README.md"), "# hello\n").unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(FsPath::new("README.md")).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = git2::Signature::now("Test", "test@example.com").unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "initial commit", &tree, &[])
        .unwrap();
}

#[derive(Debug, Clone)]
pub(crate) struct FakeRepo {
    owner: String,
    name: String,
    forbidden: bool,
}

impl FakeRepo {
    pub(crate) fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            forbidden: false,
        }
    }

    /// Answer with 403 instead of the repository.
    pub(crate) fn forbidden(mut self) -> Self {
        self.forbidden = true;
        self
    }
}

#[derive(Default)]
struct FakeState {
    installations: Vec<(u64, String)>,
    repos: Vec<FakeRepo>,
    requests: AtomicUsize,
    last_authorization: Mutex<Option<String>>,
}

impl FakeState {
    fn record(&self, headers: &HeaderMap) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if let Ok(mut last) = self.last_authorization.lock() {
            *last = auth;
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeGitHubBuilder {
    state: FakeState,
}

impl FakeGitHubBuilder {
    pub(crate) fn installation(mut self, id: u64, login: &str) -> Self {
        self.state.installations.push((id, login.to_string()));
        self
    }

    pub(crate) fn repo(mut self, repo: FakeRepo) -> Self {
        self.state.repos.push(repo);
        self
    }

    pub(crate) async fn spawn(self) -> FakeGitHub {
        let state = Arc::new(self.state);
        let app = Router::new()
            .route("/app/installations", get(list_installations))
            .route(
                "/app/installations/:id/access_tokens",
                post(create_installation_token),
            )
            .route("/repos/:owner/:repo", get(get_repo))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeGitHub { addr, state }
    }
}

pub(crate) struct FakeGitHub {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeGitHub {
    pub(crate) fn builder() -> FakeGitHubBuilder {
        FakeGitHubBuilder::default()
    }

    pub(crate) fn config(&self) -> GitHubConfig {
        GitHubConfig {
            api_url: format!("http://{}", self.addr),
            ..GitHubConfig::default()
        }
    }

    pub(crate) fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub(crate) fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not Found" })),
    )
        .into_response()
}

async fn list_installations(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    state.record(&headers);
    let installations: Vec<_> = state
        .installations
        .iter()
        .map(|(id, login)| {
            json!({
                "id": id,
                "account": { "login": login, "id": id * 10, "type": "Organization" },
                "repository_selection": "selected",
                "suspended_at": null,
            })
        })
        .collect();
    Json(json!(installations))
}

async fn create_installation_token(
    State(state): State<Arc<FakeState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    state.record(&headers);
    if !state.installations.iter().any(|(known, _)| *known == id) {
        return not_found();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "token": format!("ghs_installation_{}", id),
            "expires_at": "2030-01-01T00:00:00Z",
            "permissions": { "contents": "read" },
            "repository_selection": "selected",
        })),
    )
        .into_response()
}

async fn get_repo(
    State(state): State<Arc<FakeState>>,
    Path((owner, name)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    state.record(&headers);
    let Some(repo) = state
        .repos
        .iter()
        .find(|r| r.owner == owner && r.name == name)
    else {
        return not_found();
    };
    if repo.forbidden {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "Resource not accessible by integration" })),
        )
            .into_response();
    }
    Json(json!({
        "id": 1296269,
        "name": repo.name,
        "full_name": format!("{}/{}", repo.owner, repo.name),
        "clone_url": format!("https://github.com/{}/{}.git", repo.owner, repo.name),
        "default_branch": "main",
        "private": true,
    }))
    .into_response()
}
