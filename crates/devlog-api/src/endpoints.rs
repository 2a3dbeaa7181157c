//! DevLog backend endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | Login | POST | `/auth/token` |
//! | List | GET | `/projects`, `/projects?q=...` |
//! | Get | GET | `/projects/{id}` |
//! | Create | POST | `/projects/` |
//! | Update | PUT | `/projects/{id}` |
//! | Delete | DELETE | `/projects/{id}` |

use devlog_core::ProjectId;

/// Token endpoint (form-encoded credentials)
pub const TOKEN: &str = "/auth/token";

/// Collection endpoint used for listing
pub const PROJECTS: &str = "/projects";

/// Collection endpoint used for creation (trailing slash)
pub const PROJECTS_CREATE: &str = "/projects/";

/// List path, with `q` appended only for a non-empty query
pub fn projects_list(query: &str) -> String {
    if query.is_empty() {
        PROJECTS.to_string()
    } else {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{}?q={}", PROJECTS, encoded)
    }
}

/// Single-project path
pub fn project(id: ProjectId) -> String {
    format!("{}/{}", PROJECTS, id)
}
