//! Session workspace models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::patient::SessionType;

/// Session workspace errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No active session")]
    NoActiveSession,

    #[error("Voice transcript is read-only while recording")]
    TranscriptLocked,

    #[error("Prescriptions can only be sent in remote sessions with an attached image")]
    PrescriptionUnavailable,
}

/// Draft field in the session workspace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, uniffi::Enum)]
#[serde(rename_all = "kebab-case")]
pub enum DraftField {
    PhysicalNotes,
    MentalNotes,
    Medicines,
    VoiceTranscript,
}

/// Unsaved clinical notes for the session in progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub physical_notes: String,
    pub mental_notes: String,
    pub medicines: String,
    pub voice_transcript: String,
    pub recording: bool,
    /// Count of processed voice notes
    pub voice_notes: u32,
    /// Name of the attached prescription image
    pub prescription_image: Option<String>,
    pub prescription_sent: bool,
}

impl SessionDraft {
    /// Overwrite one draft field.
    pub fn set_field(&mut self, field: DraftField, value: String) -> Result<(), SessionError> {
        match field {
            DraftField::PhysicalNotes => self.physical_notes = value,
            DraftField::MentalNotes => self.mental_notes = value,
            DraftField::Medicines => self.medicines = value,
            DraftField::VoiceTranscript => {
                if self.recording {
                    return Err(SessionError::TranscriptLocked);
                }
                self.voice_transcript = value;
            }
        }
        Ok(())
    }

    /// Append the marker line for a processed voice note.
    pub fn append_voice_note(&mut self) {
        self.voice_notes += 1;
        if !self.voice_transcript.is_empty() && !self.voice_transcript.ends_with('\n') {
            self.voice_transcript.push('\n');
        }
        self.voice_transcript
            .push_str(&format!("[Voice note {} recorded]", self.voice_notes));
    }

    /// Notes to keep in visit history: mental notes, else physical notes.
    pub fn summary(&self) -> String {
        if self.mental_notes.trim().is_empty() {
            self.physical_notes.trim().to_string()
        } else {
            self.mental_notes.trim().to_string()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.physical_notes.is_empty()
            && self.mental_notes.is_empty()
            && self.medicines.is_empty()
            && self.voice_transcript.is_empty()
            && self.prescription_image.is_none()
    }
}

/// A session in progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub patient_id: String,
    pub session_type: SessionType,
    pub draft: SessionDraft,
}

impl ActiveSession {
    pub fn new(patient_id: String, session_type: SessionType) -> Self {
        Self {
            patient_id,
            session_type,
            draft: SessionDraft::default(),
        }
    }

    /// Mark the attached prescription as sent.
    pub fn send_prescription(&mut self) -> Result<(), SessionError> {
        if self.session_type != SessionType::Remote || self.draft.prescription_image.is_none() {
            return Err(SessionError::PrescriptionUnavailable);
        }
        self.draft.prescription_sent = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_locked_while_recording() {
        let mut draft = SessionDraft {
            recording: true,
            ..Default::default()
        };
        assert_eq!(
            draft.set_field(DraftField::VoiceTranscript, "hello".into()),
            Err(SessionError::TranscriptLocked)
        );
        assert!(draft
            .set_field(DraftField::MentalNotes, "calm".into())
            .is_ok());
        assert_eq!(draft.mental_notes, "calm");
    }

    #[test]
    fn test_append_voice_note() {
        let mut draft = SessionDraft::default();
        draft.voice_transcript = "Patient reports better sleep".into();
        draft.append_voice_note();
        draft.append_voice_note();
        assert_eq!(
            draft.voice_transcript,
            "Patient reports better sleep\n[Voice note 1 recorded]\n[Voice note 2 recorded]"
        );
    }

    #[test]
    fn test_summary_prefers_mental_notes() {
        let mut draft = SessionDraft::default();
        draft.physical_notes = "BP normal".into();
        assert_eq!(draft.summary(), "BP normal");
        draft.mental_notes = "Anxiety improving".into();
        assert_eq!(draft.summary(), "Anxiety improving");
    }

    #[test]
    fn test_send_prescription_requires_remote_and_image() {
        let mut session = ActiveSession::new("p-1".into(), SessionType::InPerson);
        session.draft.prescription_image = Some("rx.jpg".into());
        assert_eq!(
            session.send_prescription(),
            Err(SessionError::PrescriptionUnavailable)
        );

        let mut remote = ActiveSession::new("p-1".into(), SessionType::Remote);
        assert!(remote.send_prescription().is_err());
        remote.draft.prescription_image = Some("rx.jpg".into());
        assert!(remote.send_prescription().is_ok());
        assert!(remote.draft.prescription_sent);
    }
}
