//! Interactive confirmation capability

/// Prompt shown before a project is deleted
pub const DELETE_PROMPT: &str = "Delete this project?";

/// Synchronous yes/no question to the user
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
