//! API client for the DevLog backend

use devlog_core::{
    Credentials, Error, LoginResponse, Project, ProjectId, ProjectPayload, Result, Session,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::endpoints;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Per-call options
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub method: Method,
    pub body: Option<Value>,
}

impl CallOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn method(method: Method) -> Self {
        Self { method, body: None }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Parsed response body
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
}

impl ApiBody {
    /// Decode a JSON body into `T`; text bodies are an invalid response
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            ApiBody::Json(value) => serde_json::from_value(value)
                .map_err(|e| Error::invalid_response(e.to_string())),
            ApiBody::Text(text) => Err(Error::invalid_response(format!(
                "expected JSON, got text ({} bytes)",
                text.len()
            ))),
        }
    }
}

/// API client
///
/// Stateless apart from its transport: base URL and token are passed on
/// every call so a session change takes effect immediately.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one request against `base_url + path`.
    ///
    /// Attaches `Authorization: Bearer <token>` when `token` is non-empty,
    /// fails with [`Error::Http`] outside 2xx, and parses the body as JSON
    /// when the response declares a JSON content type.
    pub async fn call(
        &self,
        base_url: &str,
        token: &str,
        path: &str,
        options: CallOptions,
    ) -> Result<ApiBody> {
        let mut request = HttpRequest::new(options.method, format!("{}{}", base_url, path))
            .header("Content-Type", JSON_CONTENT_TYPE);
        if !token.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = options.body {
            request = request.body(serde_json::to_string(&body)?);
        }

        debug!("{} {}", options.method, path);
        let response = self.send_checked(request).await?;
        parse_body(response)
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, base_url: &str, credentials: &Credentials) -> Result<LoginResponse> {
        let form: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(credentials.form_fields())
            .finish();
        let request = HttpRequest::new(Method::Post, format!("{}{}", base_url, endpoints::TOKEN))
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(form);

        debug!("POST {} as {}", endpoints::TOKEN, credentials.username);
        let response = self.send_checked(request).await?;
        let value: Value = if response.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&response.body)?
        };
        ApiBody::Json(value).decode()
    }

    /// List projects, filtered by `query` when it is non-empty
    pub async fn list_projects(&self, session: &Session, query: &str) -> Result<Vec<Project>> {
        self.call_session(session, &endpoints::projects_list(query), CallOptions::get())
            .await?
            .decode()
    }

    pub async fn get_project(&self, session: &Session, id: ProjectId) -> Result<Project> {
        self.call_session(session, &endpoints::project(id), CallOptions::get())
            .await?
            .decode()
    }

    pub async fn create_project(&self, session: &Session, payload: &ProjectPayload) -> Result<Project> {
        let options = CallOptions::method(Method::Post).with_body(serde_json::to_value(payload)?);
        self.call_session(session, endpoints::PROJECTS_CREATE, options)
            .await?
            .decode()
    }

    /// Replace both fields of a project
    pub async fn update_project(
        &self,
        session: &Session,
        id: ProjectId,
        payload: &ProjectPayload,
    ) -> Result<Project> {
        let options = CallOptions::method(Method::Put).with_body(serde_json::to_value(payload)?);
        self.call_session(session, &endpoints::project(id), options)
            .await?
            .decode()
    }

    pub async fn delete_project(&self, session: &Session, id: ProjectId) -> Result<()> {
        self.call_session(session, &endpoints::project(id), CallOptions::method(Method::Delete))
            .await?;
        Ok(())
    }

    async fn call_session(&self, session: &Session, path: &str, options: CallOptions) -> Result<ApiBody> {
        self.call(&session.base_url, &session.token, path, options).await
    }

    async fn send_checked(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!("{} request failed: {} {}", method, response.status, response.status_text);
            return Err(Error::http(response.status, response.status_text));
        }
        Ok(response)
    }
}

fn parse_body(response: HttpResponse) -> Result<ApiBody> {
    let is_json = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("json"));
    if !is_json {
        return Ok(ApiBody::Text(response.body));
    }
    if response.body.trim().is_empty() {
        return Ok(ApiBody::Json(Value::Null));
    }
    Ok(ApiBody::Json(serde_json::from_str(&response.body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::RefCell;

    /// Answers every request with a canned response and records what it saw
    struct Canned {
        response: HttpResponse,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(status: u16, status_text: &str, content_type: Option<&str>, body: &str) -> Self {
            Self {
                response: HttpResponse {
                    status,
                    status_text: status_text.to_string(),
                    content_type: content_type.map(str::to_string),
                    body: body.to_string(),
                },
                seen: RefCell::new(Vec::new()),
            }
        }

        fn last(&self) -> HttpRequest {
            self.seen.borrow().last().cloned().expect("no request recorded")
        }
    }

    #[async_trait(?Send)]
    impl Transport for Canned {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.seen.borrow_mut().push(request);
            Ok(self.response.clone())
        }
    }

    struct Offline;

    #[async_trait(?Send)]
    impl Transport for Offline {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse> {
            Err(Error::network("error sending request: connection refused"))
        }
    }

    #[tokio::test]
    async fn test_call_defaults_to_get_with_bearer() {
        let client = ApiClient::new(Canned::new(200, "OK", Some("application/json"), "[]"));
        let body = client
            .call("http://localhost:8000", "t1", "/projects", CallOptions::default())
            .await
            .unwrap();
        assert_eq!(body, ApiBody::Json(serde_json::json!([])));

        let request = client.transport().last();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "http://localhost:8000/projects");
        assert_eq!(request.header_value("Authorization"), Some("Bearer t1"));
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_call_without_token_omits_authorization() {
        let client = ApiClient::new(Canned::new(200, "OK", Some("application/json"), "{}"));
        client
            .call("http://h", "", "/projects", CallOptions::get())
            .await
            .unwrap();
        assert_eq!(client.transport().last().header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_call_serializes_json_body() {
        let client = ApiClient::new(Canned::new(201, "Created", Some("application/json"), "{}"));
        client
            .call(
                "http://h",
                "t1",
                "/projects/",
                CallOptions::method(Method::Post).with_body(serde_json::json!({"title": "demo"})),
            )
            .await
            .unwrap();
        let request = client.transport().last();
        assert_eq!(request.header_value("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(r#"{"title":"demo"}"#));
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let client = ApiClient::new(Canned::new(
            500,
            "Internal Server Error",
            Some("application/json"),
            r#"{"detail":"boom"}"#,
        ));
        let err = client
            .call("http://h", "t1", "/projects", CallOptions::get())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "500 Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_text_content_type_returns_raw_text() {
        let client = ApiClient::new(Canned::new(200, "OK", Some("text/plain; charset=utf-8"), "pong"));
        let body = client
            .call("http://h", "", "/health", CallOptions::get())
            .await
            .unwrap();
        assert_eq!(body, ApiBody::Text("pong".into()));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_text() {
        let client = ApiClient::new(Canned::new(204, "No Content", None, ""));
        let body = client
            .call("http://h", "t1", "/projects/1", CallOptions::method(Method::Delete))
            .await
            .unwrap();
        assert_eq!(body, ApiBody::Text(String::new()));
    }

    #[tokio::test]
    async fn test_empty_json_body_is_null() {
        let client = ApiClient::new(Canned::new(200, "OK", Some("application/json"), ""));
        let body = client
            .call("http://h", "t1", "/projects/1", CallOptions::method(Method::Delete))
            .await
            .unwrap();
        assert_eq!(body, ApiBody::Json(Value::Null));
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let client = ApiClient::new(Offline);
        let err = client
            .call("http://h", "t1", "/projects", CallOptions::get())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn test_login_is_form_encoded_without_bearer() {
        let client = ApiClient::new(Canned::new(
            200,
            "OK",
            Some("application/json"),
            r#"{"access_token":"t1","token_type":"bearer"}"#,
        ));
        let response = client
            .login("http://h", &Credentials::new("alice", "s3cret&more"))
            .await
            .unwrap();
        assert_eq!(response.access_token, "t1");
        assert_eq!(response.token_type.as_deref(), Some("bearer"));

        let request = client.transport().last();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://h/auth/token");
        assert_eq!(
            request.header_value("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.header_value("Authorization"), None);
        assert_eq!(
            request.body.as_deref(),
            Some("username=alice&password=s3cret%26more")
        );
    }

    #[tokio::test]
    async fn test_list_rejects_non_array() {
        let client = ApiClient::new(Canned::new(200, "OK", Some("application/json"), r#"{"detail":"x"}"#));
        let err = client
            .list_projects(&Session::new("http://h", "t1"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_update_sends_both_fields() {
        let client = ApiClient::new(Canned::new(
            200,
            "OK",
            Some("application/json"),
            r#"{"id":5,"title":"same","description":"new"}"#,
        ));
        let project = client
            .update_project(
                &Session::new("http://h", "t1"),
                5,
                &ProjectPayload::new("same", "new"),
            )
            .await
            .unwrap();
        assert_eq!(project.description.as_deref(), Some("new"));

        let request = client.transport().last();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url, "http://h/projects/5");
        let sent: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, serde_json::json!({"title": "same", "description": "new"}));
    }
}
