//! Application context
//!
//! The workbench owns the authoritative state in `watch` channels; the
//! context mirrors both channels into Leptos signals so the view can react.

use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use devlog_api::ApiClient;
use devlog_app::{Workbench, WorkbenchState};
use devlog_core::{ClientConfig, Session, SessionStore};
use leptos::*;
use tokio::sync::watch;

use crate::api::{browser_confirm, BrowserStorage, GlooTransport};

pub type BrowserWorkbench = Workbench<GlooTransport>;

/// Shared by every component through `provide_context`
#[derive(Clone)]
pub struct AppContext {
    pub workbench: Rc<BrowserWorkbench>,
    pub state: RwSignal<WorkbenchState>,
    pub session: RwSignal<Session>,
}

impl AppContext {
    /// Restore the session from `localStorage` and wire up the browser seams
    pub fn new(config: ClientConfig) -> Self {
        let session = SessionStore::load(config, Arc::new(BrowserStorage));
        let workbench = Rc::new(Workbench::new(
            ApiClient::new(GlooTransport),
            session.clone(),
            browser_confirm,
        ));

        let state = create_rw_signal(workbench.state());
        let session_signal = create_rw_signal(session.get());
        mirror(workbench.subscribe(), state);
        mirror(session.subscribe(), session_signal);

        Self {
            workbench,
            state,
            session: session_signal,
        }
    }

    /// Run a workbench handler on the browser event loop
    pub fn spawn<F, Fut>(&self, handler: F)
    where
        F: FnOnce(Rc<BrowserWorkbench>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(handler(self.workbench.clone()));
    }

    pub fn workbench(&self) -> Rc<BrowserWorkbench> {
        self.workbench.clone()
    }
}

/// Copy every value published on `rx` into `signal`
fn mirror<T: Clone + 'static>(mut rx: watch::Receiver<T>, signal: RwSignal<T>) {
    spawn_local(async move {
        while rx.changed().await.is_ok() {
            let value = rx.borrow_and_update().clone();
            signal.set(value);
        }
    });
}
