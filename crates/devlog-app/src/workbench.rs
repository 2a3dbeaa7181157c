//! Workbench: state and handlers behind the DevLog UI
//!
//! Handlers take `&self` and may run concurrently on one event loop.
//! State lives in a `watch` channel and is only touched through short
//! `send_modify` closures, never across an await, so whichever response
//! lands last wins.

use devlog_api::{ApiClient, Transport};
use devlog_core::{Action, Project, ProjectId, SessionStore};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::confirm::{Confirm, DELETE_PROMPT};
use crate::forms::{EditDraft, LoginForm, ProjectForm};
use crate::list::ProjectList;

pub const CREATED: &str = "Project created.";
pub const UPDATED: &str = "Project updated.";
pub const DELETED: &str = "Project deleted.";

/// Everything the view renders besides the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbenchState {
    pub login: LoginForm,
    pub create: ProjectForm,
    /// Shared by both search inputs
    pub search: String,
    pub projects: ProjectList,
    /// At most one project is editable at a time
    pub editing: Option<EditDraft>,
    /// Last outcome message; empty when there is nothing to report
    pub status: String,
}

impl WorkbenchState {
    pub fn is_editing(&self, id: ProjectId) -> bool {
        self.editing.as_ref().is_some_and(|d| d.id == id)
    }
}

pub struct Workbench<T> {
    api: ApiClient<T>,
    session: SessionStore,
    state: watch::Sender<WorkbenchState>,
    confirm: Box<dyn Confirm>,
}

impl<T: Transport> Workbench<T> {
    pub fn new(api: ApiClient<T>, session: SessionStore, confirm: impl Confirm + 'static) -> Self {
        let (state, _) = watch::channel(WorkbenchState::default());
        Self {
            api,
            session,
            state,
            confirm: Box::new(confirm),
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Snapshot of the current state
    pub fn state(&self) -> WorkbenchState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<WorkbenchState> {
        self.state.subscribe()
    }

    // ---------------------------------------------------------------------
    // Field edits
    // ---------------------------------------------------------------------

    pub fn set_username(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| s.login.username = value);
    }

    pub fn set_password(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| s.login.password = value);
    }

    pub fn set_new_title(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| s.create.title = value);
    }

    pub fn set_new_description(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| s.create.description = value);
    }

    pub fn set_search(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| s.search = value);
    }

    pub fn set_edit_title(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| {
            if let Some(draft) = s.editing.as_mut() {
                draft.title = value;
            }
        });
    }

    pub fn set_edit_description(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| {
            if let Some(draft) = s.editing.as_mut() {
                draft.description = value;
            }
        });
    }

    pub fn set_base_url(&self, value: impl Into<String>) {
        self.session.set_base_url(value);
    }

    // ---------------------------------------------------------------------
    // Session
    // ---------------------------------------------------------------------

    /// Fetch the list for a session restored from storage
    pub async fn start(&self) {
        if self.session.is_authenticated() {
            self.load_projects("").await;
        }
    }

    /// Exchange the login form for a token, then fetch the list once.
    ///
    /// On failure the form is left as typed so the user can correct it.
    pub async fn login(&self) {
        let form = self.state.borrow().login.clone();
        if !form.can_submit() {
            debug!("Login skipped: username and password are required");
            return;
        }

        self.set_status("");
        let base_url = self.session.base_url();
        match self.api.login(&base_url, &form.credentials()).await {
            Ok(response) => {
                self.session.set_token(response.access_token);
                self.state.send_modify(|s| s.login.clear());
                self.load_projects("").await;
            }
            Err(e) => {
                warn!("Login as {} failed: {}", form.username, e);
                self.set_status(Action::Login.failed(&e));
            }
        }
    }

    /// Forget the token and everything fetched with it; no backend call
    pub fn logout(&self) {
        self.session.clear_token();
        self.state.send_modify(|s| {
            s.projects.clear();
            s.editing = None;
        });
    }

    // ---------------------------------------------------------------------
    // Listing
    // ---------------------------------------------------------------------

    /// Refetch using the current search term
    pub async fn refresh(&self) {
        let query = self.state.borrow().search.clone();
        self.load_projects(&query).await;
    }

    /// Search submission (button or Enter in either search input)
    pub async fn search(&self) {
        self.refresh().await;
    }

    /// Mark the list stale and refetch it; no-op while signed out
    pub async fn load_projects(&self, query: &str) {
        if !self.session.is_authenticated() {
            debug!("List fetch skipped: not signed in");
            return;
        }
        self.state.send_modify(|s| s.projects.invalidate());
        self.revalidate(query).await;
    }

    /// Refetch if the list is stale. Failures leave the list untouched and
    /// are reported on the status line.
    ///
    /// Results of a fetch made with a token that has since changed are
    /// dropped, whether the fetch succeeded or not.
    async fn revalidate(&self, query: &str) {
        if !self.state.borrow().projects.is_stale() {
            return;
        }
        let session = self.session.get();
        if !session.is_authenticated() {
            return;
        }

        let fetched = self.api.list_projects(&session, query).await;
        if self.session.token() != session.token {
            debug!("Dropping list fetch made with a superseded token");
            return;
        }
        match fetched {
            Ok(projects) => {
                debug!("Fetched {} projects", projects.len());
                self.state.send_modify(|s| s.projects.replace(projects));
            }
            Err(e) => {
                warn!("Project list fetch failed: {}", e);
                self.set_status(Action::Load.failed(&e));
            }
        }
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    pub async fn create(&self) {
        let form = self.state.borrow().create.clone();
        if !form.can_submit() {
            debug!("Create skipped: title is required");
            return;
        }

        let session = self.session.get();
        match self.api.create_project(&session, &form.payload()).await {
            Ok(project) => {
                info!("Created project {}", project.id);
                self.state.send_modify(|s| {
                    s.create.clear();
                    s.projects.invalidate();
                });
                self.finish_mutation(CREATED).await;
            }
            Err(e) => self.set_status(Action::Create.failed(&e)),
        }
    }

    /// Enter edit mode for `project`, replacing any other open draft
    pub fn start_edit(&self, project: &Project) {
        let draft = EditDraft::from(project);
        self.state.send_modify(|s| s.editing = Some(draft));
    }

    pub fn cancel_edit(&self) {
        self.state.send_modify(|s| s.editing = None);
    }

    /// Send the open draft as a full replacement
    pub async fn save_edit(&self) {
        let Some(draft) = self.state.borrow().editing.clone() else {
            debug!("Save skipped: no project in edit mode");
            return;
        };

        let session = self.session.get();
        match self.api.update_project(&session, draft.id, &draft.payload()).await {
            Ok(_) => {
                info!("Updated project {}", draft.id);
                self.state.send_modify(|s| {
                    if s.is_editing(draft.id) {
                        s.editing = None;
                    }
                    s.projects.invalidate();
                });
                self.finish_mutation(UPDATED).await;
            }
            Err(e) => self.set_status(Action::Update.failed(&e)),
        }
    }

    /// Delete after the user confirms; declining changes nothing
    pub async fn delete(&self, id: ProjectId) {
        if !self.confirm.confirm(DELETE_PROMPT) {
            debug!("Delete of project {} declined", id);
            return;
        }

        let session = self.session.get();
        match self.api.delete_project(&session, id).await {
            Ok(()) => {
                info!("Deleted project {}", id);
                self.state.send_modify(|s| {
                    if s.is_editing(id) {
                        s.editing = None;
                    }
                    s.projects.invalidate();
                });
                self.finish_mutation(DELETED).await;
            }
            Err(e) => self.set_status(Action::Delete.failed(&e)),
        }
    }

    /// Refetch after a successful mutation, then report the mutation.
    /// A failed refetch keeps the previous list.
    async fn finish_mutation(&self, message: &str) {
        let query = self.state.borrow().search.clone();
        self.revalidate(&query).await;
        self.set_status(message);
    }

    fn set_status(&self, status: impl Into<String>) {
        let status = status.into();
        self.state.send_modify(|s| s.status = status);
    }
}

impl<T> std::fmt::Debug for Workbench<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("session", &self.session)
            .field("state", &*self.state.borrow())
            .finish()
    }
}
