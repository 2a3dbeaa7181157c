//! REST client for the DevLog backend
//!
//! [`ApiClient`] owns the request contract (auth header, status
//! handling, content-type driven parsing). The actual I/O goes through a
//! [`Transport`] so the same client runs on `reqwest` natively and on
//! `fetch` in the browser.

pub mod client;
pub mod endpoints;
pub mod transport;

#[cfg(feature = "reqwest-transport")]
pub mod reqwest_transport;

pub use client::{ApiBody, ApiClient, CallOptions};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};

#[cfg(feature = "reqwest-transport")]
pub use reqwest_transport::ReqwestTransport;
