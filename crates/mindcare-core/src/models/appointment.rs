//! Appointment models.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::patient::SessionType;
use super::validation::{parse_date, parse_time, require, ValidationResult};

/// Bookable time slots, every 30 minutes from 09:00 to 17:30.
pub fn time_slots() -> Vec<NaiveTime> {
    (0..18)
        .filter_map(|i| NaiveTime::from_hms_opt(9 + i / 2, (i % 2) * 30, 0))
        .collect()
}

/// Format a time the way the scheduling screens show it (`"02:30 PM"`).
pub fn format_slot(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Appointment status. Any status may move to any other.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum,
)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Attended,
    Missed,
    Rescheduled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Attended => "attended",
            AppointmentStatus::Missed => "missed",
            AppointmentStatus::Rescheduled => "rescheduled",
        }
    }
}

/// A scheduled appointment.
///
/// `patient_name` is denormalised; nothing keeps it in sync with the patient
/// store after scheduling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    /// Patient id at scheduling time, if known
    pub patient_id: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub session_type: SessionType,
    pub status: AppointmentStatus,
    pub notes: String,
}

impl Appointment {
    /// Create a scheduled appointment with an explicit id.
    pub fn new(
        id: impl Into<String>,
        patient_name: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        session_type: SessionType,
    ) -> Self {
        Self {
            id: id.into(),
            patient_name: patient_name.into(),
            patient_id: None,
            date,
            time,
            session_type,
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
        }
    }

    /// Display form of the appointment time.
    pub fn time_label(&self) -> String {
        format_slot(self.time)
    }
}

/// Raw new-appointment form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentForm {
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub session_type: SessionType,
    pub notes: String,
}

/// Validated appointment form.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentFields {
    pub patient_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub session_type: SessionType,
    pub notes: String,
}

impl AppointmentForm {
    /// Check required fields and parse date and time.
    pub fn validate(&self) -> ValidationResult<AppointmentFields> {
        let patient_id = require(&self.patient_id, "patient")?.to_string();
        let date = parse_date(require(&self.date, "date")?)?;
        let time = parse_time(require(&self.time, "time")?)?;

        Ok(AppointmentFields {
            patient_id,
            date,
            time,
            session_type: self.session_type,
            notes: self.notes.trim().to_string(),
        })
    }
}
