//! In-memory DevLog backend for workbench tests

#![allow(dead_code)]

use async_trait::async_trait;
use devlog_api::{ApiClient, HttpRequest, HttpResponse, Method, Transport};
use devlog_app::{Confirm, Workbench};
use devlog_core::{ClientConfig, Error, MemoryStore, Result, SessionStore};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::oneshot;

pub const BASE_URL: &str = "http://localhost:8000";

/// Request as seen by the backend; `path` has the origin stripped
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub method: Method,
    /// Full request URL as sent
    pub url: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
struct Record {
    id: i64,
    title: String,
    description: Option<String>,
}

impl Record {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "description": self.description,
            "owner_id": 1,
        })
    }
}

#[derive(Default)]
struct Inner {
    users: Vec<(String, String, String)>,
    projects: Vec<Record>,
    next_id: i64,
    seen: Vec<Seen>,
    offline: bool,
    fail_lists: bool,
    held_lists: VecDeque<oneshot::Receiver<()>>,
}

/// Fake backend implementing the routes the client uses
#[derive(Default)]
pub struct FakeBackend {
    inner: RefCell<Inner>,
}

impl FakeBackend {
    pub fn new() -> Rc<Self> {
        let backend = Self::default();
        backend.inner.borrow_mut().next_id = 1;
        Rc::new(backend)
    }

    /// Register a user; `token` is what a successful login returns
    pub fn with_user(self: Rc<Self>, username: &str, password: &str, token: &str) -> Rc<Self> {
        self.inner
            .borrow_mut()
            .users
            .push((username.into(), password.into(), token.into()));
        self
    }

    pub fn seed(&self, title: &str, description: Option<&str>) -> i64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.projects.push(Record {
            id,
            title: title.into(),
            description: description.map(str::to_string),
        });
        id
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.inner.borrow().seen.clone()
    }

    pub fn seen_paths(&self) -> Vec<String> {
        self.seen()
            .into_iter()
            .map(|s| format!("{} {}", s.method, s.path))
            .collect()
    }

    pub fn clear_seen(&self) {
        self.inner.borrow_mut().seen.clear();
    }

    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().offline = offline;
    }

    pub fn set_fail_lists(&self, fail: bool) {
        self.inner.borrow_mut().fail_lists = fail;
    }

    /// Make the next list request wait until the returned sender fires
    pub fn hold_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.borrow_mut().held_lists.push_back(rx);
        tx
    }

    fn valid_token(&self, authorization: Option<&str>) -> bool {
        let Some(token) = authorization.and_then(|h| h.strip_prefix("Bearer ")) else {
            return false;
        };
        self.inner.borrow().users.iter().any(|(_, _, t)| t == token)
    }

    fn list(&self, query: Option<String>) -> HttpResponse {
        let inner = self.inner.borrow();
        if inner.fail_lists {
            return status(500, "Internal Server Error");
        }
        let needle = query.map(|q| q.to_lowercase());
        let items: Vec<Value> = inner
            .projects
            .iter()
            .rev()
            .filter(|p| match &needle {
                Some(q) => {
                    p.title.to_lowercase().contains(q)
                        || p.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(q))
                }
                None => true,
            })
            .map(Record::to_json)
            .collect();
        json_response(200, "OK", Value::Array(items))
    }

    fn route(&self, request: &HttpRequest, path: &str) -> HttpResponse {
        let (route, query) = match path.split_once('?') {
            Some((route, query)) => (route, Some(query)),
            None => (path, None),
        };

        if request.method == Method::Post && route == "/auth/token" {
            let form: Vec<(String, String)> =
                url::form_urlencoded::parse(request.body.as_deref().unwrap_or_default().as_bytes())
                    .into_owned()
                    .collect();
            let field = |name: &str| {
                form.iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default()
            };
            let (username, password) = (field("username"), field("password"));
            let token = self
                .inner
                .borrow()
                .users
                .iter()
                .find(|(u, p, _)| *u == username && *p == password)
                .map(|(_, _, t)| t.clone());
            return match token {
                Some(token) => json_response(
                    200,
                    "OK",
                    json!({"access_token": token, "token_type": "bearer"}),
                ),
                None => json_response(
                    401,
                    "Unauthorized",
                    json!({"detail": "Incorrect username or password"}),
                ),
            };
        }

        if !self.valid_token(request.header_value("Authorization")) {
            return json_response(401, "Unauthorized", json!({"detail": "Not authenticated"}));
        }

        match (request.method, route) {
            (Method::Get, "/projects") => {
                let q = query.and_then(|qs| {
                    url::form_urlencoded::parse(qs.as_bytes())
                        .find(|(k, _)| k == "q")
                        .map(|(_, v)| v.into_owned())
                });
                self.list(q)
            }
            (Method::Post, "/projects/") => {
                let body: Value =
                    serde_json::from_str(request.body.as_deref().unwrap_or("null")).unwrap_or(Value::Null);
                let Some(title) = body.get("title").and_then(Value::as_str) else {
                    return json_response(422, "Unprocessable Entity", json!({"detail": "title"}));
                };
                let description = body
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let id = self.seed(title, description.as_deref());
                let record = Record {
                    id,
                    title: title.into(),
                    description,
                };
                json_response(201, "Created", record.to_json())
            }
            (method, route) if route.starts_with("/projects/") => {
                let Ok(id) = route["/projects/".len()..].parse::<i64>() else {
                    return status(404, "Not Found");
                };
                let mut inner = self.inner.borrow_mut();
                let Some(index) = inner.projects.iter().position(|p| p.id == id) else {
                    return json_response(404, "Not Found", json!({"detail": "Project not found"}));
                };
                match method {
                    Method::Get => json_response(200, "OK", inner.projects[index].to_json()),
                    Method::Put => {
                        let body: Value = serde_json::from_str(request.body.as_deref().unwrap_or("null"))
                            .unwrap_or(Value::Null);
                        let (Some(title), Some(description)) = (
                            body.get("title").and_then(Value::as_str),
                            body.get("description").and_then(Value::as_str),
                        ) else {
                            return json_response(422, "Unprocessable Entity", json!({"detail": "shape"}));
                        };
                        let record = &mut inner.projects[index];
                        record.title = title.into();
                        record.description = Some(description.into());
                        json_response(200, "OK", record.to_json())
                    }
                    Method::Delete => {
                        inner.projects.remove(index);
                        status(204, "No Content")
                    }
                    Method::Post => status(405, "Method Not Allowed"),
                }
            }
            _ => status(404, "Not Found"),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = url::Url::parse(&request.url)
            .map_err(|e| Error::network(format!("builder error: {}", e)))?;
        let path = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        {
            let mut inner = self.inner.borrow_mut();
            inner.seen.push(Seen {
                method: request.method,
                url: request.url.clone(),
                path: path.clone(),
                authorization: request.header_value("Authorization").map(str::to_string),
                body: request.body.clone(),
            });
            if inner.offline {
                return Err(Error::network("error sending request: connection refused"));
            }
        }

        if request.method == Method::Get && path.starts_with("/projects") && !path.starts_with("/projects/") {
            let held = self.inner.borrow_mut().held_lists.pop_front();
            if let Some(rx) = held {
                let _ = rx.await;
            }
        }

        Ok(self.route(&request, &path))
    }
}

fn status(code: u16, text: &str) -> HttpResponse {
    HttpResponse {
        status: code,
        status_text: text.into(),
        content_type: None,
        body: String::new(),
    }
}

fn json_response(code: u16, text: &str, body: Value) -> HttpResponse {
    HttpResponse {
        status: code,
        status_text: text.into(),
        content_type: Some("application/json".into()),
        body: body.to_string(),
    }
}

/// Prompts shown to the user so far
pub type Prompts = Rc<RefCell<Vec<String>>>;

/// Confirmation capability answering `yes` to every prompt, plus a log of prompts
pub fn answer(yes: bool) -> (impl Confirm + 'static, Prompts) {
    let prompts: Prompts = Rc::default();
    let log = prompts.clone();
    let confirm = move |prompt: &str| {
        log.borrow_mut().push(prompt.to_string());
        yes
    };
    (confirm, prompts)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Workbench over `backend` with a fresh in-memory session slot
pub fn workbench(backend: &Rc<FakeBackend>, confirm: impl Confirm + 'static) -> (Workbench<Rc<FakeBackend>>, Arc<MemoryStore>) {
    init_tracing();
    let storage = Arc::new(MemoryStore::new());
    let session = SessionStore::load(ClientConfig::default(), storage.clone());
    (
        Workbench::new(ApiClient::new(backend.clone()), session, confirm),
        storage,
    )
}

/// Workbench whose session slot already holds `token`
pub fn signed_in_workbench(
    backend: &Rc<FakeBackend>,
    token: &str,
    confirm: impl Confirm + 'static,
) -> Workbench<Rc<FakeBackend>> {
    init_tracing();
    let storage = Arc::new(MemoryStore::with_entries([("devlog_token", token)]));
    let session = SessionStore::load(ClientConfig::default(), storage);
    Workbench::new(ApiClient::new(backend.clone()), session, confirm)
}
