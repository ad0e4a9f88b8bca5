//! Pending modal prompts awaiting a one-shot answer from the UI.

use crate::model::User;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// User form; `None` means a new record.
    EditUser { user: Option<User> },
    ConfirmDelete { user: User },
}

impl Prompt {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EditUser { .. } => "editUser",
            Self::ConfirmDelete { .. } => "confirmDelete",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt {0} is not pending")]
    NotFound(String),
}

#[derive(Debug, Default)]
pub struct PromptBook {
    pending: HashMap<String, Prompt>,
}

impl PromptBook {
    /// Registers a prompt and returns its id.
    ///
    /// The UI shows one dialog of each kind at a time, so a pending prompt of
    /// the same kind is dropped; answering it afterwards reports not found.
    pub fn open(&mut self, prompt: Prompt) -> String {
        let kind = prompt.kind();
        self.pending.retain(|_, p| p.kind() != kind);
        let id = Uuid::new_v4().to_string();
        self.pending.insert(id.clone(), prompt);
        id
    }

    pub fn get(&self, id: &str) -> Result<&Prompt, PromptError> {
        self.pending
            .get(id)
            .ok_or_else(|| PromptError::NotFound(id.to_string()))
    }

    /// Removes the prompt, so each one resolves at most once.
    pub fn resolve(&mut self, id: &str) -> Result<Prompt, PromptError> {
        self.pending
            .remove(id)
            .ok_or_else(|| PromptError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
