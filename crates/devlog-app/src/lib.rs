//! DevLog client workbench
//!
//! Everything the browser UI does, minus the DOM: the sign-in state
//! machine, project listing and search, create/update/delete with
//! refetch, the single edit draft, and the status line. State is
//! published over a `watch` channel so any view layer can render it.

pub mod confirm;
pub mod forms;
pub mod list;
pub mod workbench;

pub use confirm::{Confirm, DELETE_PROMPT};
pub use forms::{EditDraft, LoginForm, ProjectForm};
pub use list::ProjectList;
pub use workbench::{Workbench, WorkbenchState};
