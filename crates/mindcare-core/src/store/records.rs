//! Prescriptions and visit history, keyed by patient id.

use std::collections::HashMap;

use tracing::{debug, info};

use super::{StoreError, StoreResult};
use crate::models::{DeliveryStatus, Prescription, Visit};

#[derive(Debug, Clone, Default)]
struct PatientRecords {
    prescriptions: Vec<Prescription>,
    visits: Vec<Visit>,
}

/// Clinical records for every patient.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    by_patient: HashMap<String, PatientRecords>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prescription for a patient. Returns the prescription id.
    pub fn add_prescription(&mut self, patient_id: &str, prescription: Prescription) -> String {
        let id = prescription.id.clone();
        info!(patient_id, prescription_id = %id, "Added prescription");
        self.by_patient
            .entry(patient_id.to_string())
            .or_default()
            .prescriptions
            .push(prescription);
        id
    }

    pub fn prescriptions(&self, patient_id: &str) -> &[Prescription] {
        self.by_patient
            .get(patient_id)
            .map(|r| r.prescriptions.as_slice())
            .unwrap_or(&[])
    }

    fn prescription_mut(
        &mut self,
        patient_id: &str,
        prescription_id: &str,
    ) -> StoreResult<&mut Prescription> {
        self.by_patient
            .get_mut(patient_id)
            .and_then(|r| r.prescriptions.iter_mut().find(|p| p.id == prescription_id))
            .ok_or_else(|| StoreError::NotFound(prescription_id.to_string()))
    }

    /// Replace a prescription's delivery status.
    pub fn set_delivery_status(
        &mut self,
        patient_id: &str,
        prescription_id: &str,
        status: DeliveryStatus,
    ) -> StoreResult<()> {
        self.prescription_mut(patient_id, prescription_id)?.delivery_status = status;
        debug!(prescription_id, ?status, "Delivery status changed");
        Ok(())
    }

    /// Attach an image to a prescription.
    pub fn attach_image(
        &mut self,
        patient_id: &str,
        prescription_id: &str,
        image: String,
    ) -> StoreResult<()> {
        self.prescription_mut(patient_id, prescription_id)?.image = Some(image);
        debug!(prescription_id, "Attached prescription image");
        Ok(())
    }

    pub fn has_prescription(&self, patient_id: &str, prescription_id: &str) -> bool {
        self.prescriptions(patient_id)
            .iter()
            .any(|p| p.id == prescription_id)
    }

    /// Append a visit to a patient's history.
    pub fn add_visit(&mut self, patient_id: &str, visit: Visit) {
        self.by_patient
            .entry(patient_id.to_string())
            .or_default()
            .visits
            .push(visit);
    }

    /// Visit history, most recent first.
    pub fn visits(&self, patient_id: &str) -> Vec<&Visit> {
        let mut visits: Vec<&Visit> = self
            .by_patient
            .get(patient_id)
            .map(|r| r.visits.iter().collect())
            .unwrap_or_default();
        visits.sort_by(|a, b| b.date.cmp(&a.date));
        visits
    }

    /// Drop everything recorded for a patient.
    pub fn remove_patient(&mut self, patient_id: &str) {
        if self.by_patient.remove(patient_id).is_some() {
            debug!(patient_id, "Dropped clinical records");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionType, VisitStatus};
    use chrono::NaiveDate;

    fn sertraline() -> Prescription {
        Prescription::new("Sertraline".into(), "50mg".into(), "Once daily".into())
    }

    #[test]
    fn test_prescription_lifecycle() {
        let mut store = RecordStore::new();
        let id = store.add_prescription("p-1", sertraline());

        store
            .set_delivery_status("p-1", &id, DeliveryStatus::InTransit)
            .unwrap();
        store.attach_image("p-1", &id, "/rx.jpg".into()).unwrap();

        let rx = &store.prescriptions("p-1")[0];
        assert_eq!(rx.delivery_status, DeliveryStatus::InTransit);
        assert_eq!(rx.image.as_deref(), Some("/rx.jpg"));
        assert!(store.prescriptions("p-2").is_empty());
    }

    #[test]
    fn test_unknown_prescription() {
        let mut store = RecordStore::new();
        store.add_prescription("p-1", sertraline());
        assert!(matches!(
            store.set_delivery_status("p-2", "x", DeliveryStatus::Delivered),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_visits_most_recent_first() {
        let mut store = RecordStore::new();
        let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        store.add_visit("p-1", Visit::completed(jan(8), SessionType::InPerson, "Intake".into()));
        store.add_visit("p-1", Visit::completed(jan(15), SessionType::Remote, "Follow-up".into()));

        let visits = store.visits("p-1");
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].notes, "Follow-up");
        assert_eq!(visits[1].status, VisitStatus::Completed);
    }

    #[test]
    fn test_remove_patient() {
        let mut store = RecordStore::new();
        store.add_prescription("p-1", sertraline());
        store.remove_patient("p-1");
        assert!(store.prescriptions("p-1").is_empty());
        assert!(store.visits("p-1").is_empty());
    }
}
