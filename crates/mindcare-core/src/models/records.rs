//! Per-patient clinical records: prescriptions and visit history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patient::SessionType;

/// Image path set when a medicine photo upload completes.
pub const PLACEHOLDER_MEDICINE_IMAGE: &str = "/placeholder-medicine.jpg";

/// Medicine delivery status. Changes are unconstrained.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryStatus {
    Delivered,
    InTransit,
    #[default]
    NotShipped,
}

/// A prescribed medicine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub image: Option<String>,
    pub delivery_status: DeliveryStatus,
}

impl Prescription {
    pub fn new(name: String, dosage: String, frequency: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            dosage,
            frequency,
            image: None,
            delivery_status: DeliveryStatus::NotShipped,
        }
    }
}

/// Outcome of a past visit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, uniffi::Enum)]
#[serde(rename_all = "kebab-case")]
pub enum VisitStatus {
    Completed,
    Missed,
}

/// One entry in a patient's visit history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visit {
    pub id: String,
    pub date: NaiveDate,
    pub session_type: SessionType,
    pub notes: String,
    pub status: VisitStatus,
}

impl Visit {
    /// A completed visit.
    pub fn completed(date: NaiveDate, session_type: SessionType, notes: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            session_type,
            notes,
            status: VisitStatus::Completed,
        }
    }
}
