//! Two-step confirmation for destructive actions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Confirmation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("No confirmation is pending")]
    NothingPending,

    #[error("Pending confirmation is for {expected}, not {got}")]
    Mismatch { expected: String, got: String },
}

/// A destructive action awaiting the user's go-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeletePatient {
        patient_id: String,
        patient_name: String,
    },
}

impl Confirmation {
    /// Id of the record the action targets.
    pub fn target_id(&self) -> &str {
        match self {
            Confirmation::DeletePatient { patient_id, .. } => patient_id,
        }
    }

    pub fn prompt(&self) -> ConfirmationPrompt {
        match self {
            Confirmation::DeletePatient { patient_name, .. } => ConfirmationPrompt {
                title: "Delete patient".to_string(),
                message: format!(
                    "Are you sure you want to delete {}? This action cannot be undone.",
                    patient_name
                ),
            },
        }
    }

    /// Check that a confirm call targets this request.
    pub fn check(&self, id: &str) -> Result<(), ConfirmationError> {
        if self.target_id() == id {
            Ok(())
        } else {
            Err(ConfirmationError::Mismatch {
                expected: self.target_id().to_string(),
                got: id.to_string(),
            })
        }
    }
}

/// What the shell shows the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, uniffi::Record)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
}

/// Synchronous confirmation source, for shells with blocking dialogs.
pub trait ConfirmPrompt {
    /// Ask the user; `true` means go ahead.
    fn confirm(&mut self, prompt: &ConfirmationPrompt) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&ConfirmationPrompt) -> bool,
{
    fn confirm(&mut self, prompt: &ConfirmationPrompt) -> bool {
        self(prompt)
    }
}
