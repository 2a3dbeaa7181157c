//! Form state holders

use devlog_core::{Credentials, Project, ProjectId, ProjectPayload};

/// Sign-in fields
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Both fields are required
    pub fn can_submit(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password_set", &!self.password.is_empty())
            .finish()
    }
}

/// New-project fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
}

impl ProjectForm {
    /// Title is required, description is optional
    pub fn can_submit(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn payload(&self) -> ProjectPayload {
        ProjectPayload::new(self.title.clone(), self.description.clone())
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

/// In-place edit of one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
}

impl EditDraft {
    pub fn payload(&self) -> ProjectPayload {
        ProjectPayload::new(self.title.clone(), self.description.clone())
    }
}

impl From<&Project> for EditDraft {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: project.description_or_empty().to_string(),
        }
    }
}
