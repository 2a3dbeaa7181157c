//! Browser bindings for the client seams
//!
//! `fetch` for the transport, `localStorage` for the session slot and
//! `window.confirm` for destructive actions.

use async_trait::async_trait;
use devlog_api::{HttpRequest, HttpResponse, Method, Transport};
use devlog_core::{Error, KeyValueStore, Result};
use gloo_net::http::{Request, RequestBuilder};

/// Transport backed by the browser `fetch` API
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| Error::network(format!("Failed to build request: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| Error::network(format!("Request failed: {}", e)))?;

        let status = response.status();
        let status_text = response.status_text();
        let content_type = response.headers().get("content-type");
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse {
            status,
            status_text,
            content_type,
            body,
        })
    }
}

/// Session slot in `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local_storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| Error::storage("no window"))?
            .local_storage()
            .map_err(|e| Error::storage(format!("localStorage: {:?}", e)))?
            .ok_or_else(|| Error::storage("localStorage unavailable"))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::local_storage()?
            .get_item(key)
            .map_err(|e| Error::storage(format!("read {}: {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| Error::storage(format!("write {}: {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        Self::local_storage()?
            .remove_item(key)
            .map_err(|e| Error::storage(format!("remove {}: {:?}", key, e)))
    }
}

/// Blocking `window.confirm`; anything but an explicit OK counts as no
pub fn browser_confirm(prompt: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(prompt).ok())
        .unwrap_or(false)
}
