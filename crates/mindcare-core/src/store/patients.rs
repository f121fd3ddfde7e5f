//! Patient collection.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::{StoreError, StoreResult};
use crate::models::{Patient, PatientForm, SessionType};

/// Ordered patient collection.
///
/// Order is insertion order; updates replace in place and never reorder.
#[derive(Debug, Clone, Default)]
pub struct PatientStore {
    patients: Vec<Patient>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or update a patient from form input.
    ///
    /// With an id the matching record's editable fields are replaced and its
    /// session tracking is preserved. Without one a new record is appended.
    /// Returns the id of the saved record.
    pub fn add_or_update(
        &mut self,
        form: &PatientForm,
        today: NaiveDate,
        default_session_type: SessionType,
    ) -> StoreResult<String> {
        let fields = form.validate()?;

        match form.id.as_deref() {
            Some(id) => {
                let patient = self
                    .get_mut(id)
                    .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
                patient.apply_edit(fields);
                info!(patient_id = %id, "Updated patient");
                Ok(id.to_string())
            }
            None => {
                let mut patient = Patient::new(fields, today, default_session_type);
                // ids stay unique even across a UUID collision
                while self.contains(&patient.id) {
                    patient.id = uuid::Uuid::new_v4().to_string();
                }
                let id = patient.id.clone();
                info!(patient_id = %id, "Added patient");
                self.patients.push(patient);
                Ok(id)
            }
        }
    }

    /// Append a pre-built record.
    pub fn insert(&mut self, patient: Patient) -> StoreResult<()> {
        if self.contains(&patient.id) {
            return Err(StoreError::DuplicateId(patient.id));
        }
        debug!(patient_id = %patient.id, "Inserted patient");
        self.patients.push(patient);
        Ok(())
    }

    /// Remove a patient, returning the removed record.
    pub fn remove(&mut self, id: &str) -> StoreResult<Patient> {
        let index = self
            .patients
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.patients.remove(index);
        info!(patient_id = %id, "Removed patient");
        Ok(removed)
    }

    /// Record a completed session on the patient.
    pub fn record_session(
        &mut self,
        id: &str,
        session_type: SessionType,
        date: NaiveDate,
    ) -> StoreResult<&Patient> {
        let patient = self
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patient.record_session(session_type, date);
        info!(
            patient_id = %id,
            total_sessions = patient.total_sessions,
            "Recorded session"
        );
        Ok(patient)
    }

    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Patient> {
        self.patients.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All patients in insertion order.
    pub fn list(&self) -> &[Patient] {
        &self.patients
    }

    /// Patients whose name contains `term`, case-insensitively.
    pub fn search(&self, term: &str) -> Vec<&Patient> {
        self.patients.iter().filter(|p| p.matches_name(term)).collect()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}
