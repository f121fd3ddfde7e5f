//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{coerce_age, require, ValidationError, ValidationResult};

/// Patient gender as captured by the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    /// Parse a form value. A blank selection means the patient declined to say.
    pub fn parse(value: &str) -> ValidationResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "prefer-not-to-say" => Ok(Gender::PreferNotToSay),
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(ValidationError::InvalidGender(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer-not-to-say",
        }
    }
}

/// Where a session takes place.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SessionType {
    #[default]
    InPerson,
    Remote,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::InPerson => "in-person",
            SessionType::Remote => "remote",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::InPerson => "In-Person",
            SessionType::Remote => "Remote",
        }
    }
}

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique id, assigned once at creation
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub emergency_contact: String,
    pub medical_history: String,
    pub current_medications: String,
    pub allergies: String,
    pub notes: String,
    /// Date of the most recent completed session
    pub last_session: NaiveDate,
    /// Type of the most recent session
    pub session_type: SessionType,
    /// Completed sessions; only `record_session` increments this
    pub total_sessions: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl Patient {
    /// Create a new patient from validated form data.
    pub fn new(fields: PatientFields, today: NaiveDate, session_type: SessionType) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: fields.name,
            age: fields.age,
            gender: fields.gender,
            phone: fields.phone,
            email: fields.email,
            address: fields.address,
            emergency_contact: fields.emergency_contact,
            medical_history: fields.medical_history,
            current_medications: fields.current_medications,
            allergies: fields.allergies,
            notes: fields.notes,
            last_session: today,
            session_type,
            total_sessions: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace the editable fields. Identity and session tracking are untouched.
    pub fn apply_edit(&mut self, fields: PatientFields) {
        self.name = fields.name;
        self.age = fields.age;
        self.gender = fields.gender;
        self.phone = fields.phone;
        self.email = fields.email;
        self.address = fields.address;
        self.emergency_contact = fields.emergency_contact;
        self.medical_history = fields.medical_history;
        self.current_medications = fields.current_medications;
        self.allergies = fields.allergies;
        self.notes = fields.notes;
        self.touch();
    }

    /// Record a completed session.
    pub fn record_session(&mut self, session_type: SessionType, date: NaiveDate) {
        self.total_sessions = self.total_sessions.saturating_add(1);
        self.last_session = date;
        self.session_type = session_type;
        self.touch();
    }

    /// Case-insensitive substring match on the name.
    pub fn matches_name(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.trim().to_lowercase())
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Raw add/edit form input, as typed by the user.
///
/// `id` is present when editing an existing record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientForm {
    pub id: Option<String>,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub emergency_contact: String,
    pub medical_history: String,
    pub current_medications: String,
    pub allergies: String,
    pub notes: String,
}

impl PatientForm {
    /// Prefill the edit form from an existing record.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            id: Some(patient.id.clone()),
            name: patient.name.clone(),
            age: patient.age.to_string(),
            gender: patient.gender.as_str().to_string(),
            phone: patient.phone.clone(),
            email: patient.email.clone(),
            address: patient.address.clone(),
            emergency_contact: patient.emergency_contact.clone(),
            medical_history: patient.medical_history.clone(),
            current_medications: patient.current_medications.clone(),
            allergies: patient.allergies.clone(),
            notes: patient.notes.clone(),
        }
    }

    /// Validate and coerce the form into editable patient fields.
    pub fn validate(&self) -> ValidationResult<PatientFields> {
        let name = require(&self.name, "name")?.to_string();
        let age = coerce_age(&self.age)?;
        let gender = Gender::parse(&self.gender)?;

        Ok(PatientFields {
            name,
            age,
            gender,
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            emergency_contact: self.emergency_contact.trim().to_string(),
            medical_history: self.medical_history.clone(),
            current_medications: self.current_medications.clone(),
            allergies: self.allergies.clone(),
            notes: self.notes.clone(),
        })
    }
}

/// Validated, editable patient fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientFields {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub emergency_contact: String,
    pub medical_history: String,
    pub current_medications: String,
    pub allergies: String,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn ann_form() -> PatientForm {
        PatientForm {
            name: "Ann".into(),
            age: "40".into(),
            gender: "female".into(),
            phone: "555-1111".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_patient() {
        let fields = ann_form().validate().unwrap();
        let patient = Patient::new(fields, today(), SessionType::InPerson);

        assert_eq!(patient.name, "Ann");
        assert_eq!(patient.age, 40);
        assert_eq!(patient.gender, Gender::Female);
        assert_eq!(patient.total_sessions, 0);
        assert_eq!(patient.last_session, today());
        assert_eq!(patient.id.len(), 36); // UUID format
    }

    #[test]
    fn test_validate_requires_name() {
        let form = PatientForm {
            name: "  ".into(),
            ..ann_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::Required("name")));
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("Male"), Ok(Gender::Male));
        assert_eq!(Gender::parse(""), Ok(Gender::PreferNotToSay));
        assert!(Gender::parse("robot").is_err());
    }

    #[test]
    fn test_apply_edit_keeps_tracking() {
        let mut patient = Patient::new(ann_form().validate().unwrap(), today(), SessionType::Remote);
        patient.total_sessions = 7;
        let id = patient.id.clone();

        let edit = PatientForm {
            name: "Ann Lee".into(),
            age: "41".into(),
            ..ann_form()
        };
        patient.apply_edit(edit.validate().unwrap());

        assert_eq!(patient.id, id);
        assert_eq!(patient.name, "Ann Lee");
        assert_eq!(patient.age, 41);
        assert_eq!(patient.total_sessions, 7);
        assert_eq!(patient.session_type, SessionType::Remote);
    }

    #[test]
    fn test_form_roundtrip_from_patient() {
        let patient = Patient::new(ann_form().validate().unwrap(), today(), SessionType::InPerson);
        let form = PatientForm::from_patient(&patient);
        assert_eq!(form.id.as_deref(), Some(patient.id.as_str()));
        assert_eq!(form.validate().unwrap().age, 40);
    }

    #[test]
    fn test_matches_name() {
        let patient = Patient::new(ann_form().validate().unwrap(), today(), SessionType::InPerson);
        assert!(patient.matches_name("an"));
        assert!(!patient.matches_name("bob"));
    }
}
