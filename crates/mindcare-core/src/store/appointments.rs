//! Appointment book.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{next_timestamp_id, StoreError, StoreResult};
use crate::models::{Appointment, AppointmentFields, AppointmentStatus};

/// Appointment counts per status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub scheduled: u32,
    pub attended: u32,
    pub missed: u32,
    pub rescheduled: u32,
}

/// Appointment collection in scheduling order.
#[derive(Debug, Clone, Default)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
    last_id: i64,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a validated appointment for `patient_name`. Returns the new id.
    pub fn schedule(&mut self, fields: AppointmentFields, patient_name: String) -> String {
        let mut id = next_timestamp_id(&mut self.last_id);
        while self.get(&id).is_some() {
            id = next_timestamp_id(&mut self.last_id);
        }

        let mut appointment = Appointment::new(
            id.clone(),
            patient_name,
            fields.date,
            fields.time,
            fields.session_type,
        );
        appointment.patient_id = Some(fields.patient_id);
        appointment.notes = fields.notes;

        info!(appointment_id = %id, date = %appointment.date, "Scheduled appointment");
        self.appointments.push(appointment);
        id
    }

    /// Append a pre-built appointment.
    pub fn insert(&mut self, appointment: Appointment) -> StoreResult<()> {
        if self.get(&appointment.id).is_some() {
            return Err(StoreError::DuplicateId(appointment.id));
        }
        debug!(appointment_id = %appointment.id, "Inserted appointment");
        self.appointments.push(appointment);
        Ok(())
    }

    /// Replace the status of one appointment. No transition rules apply.
    pub fn set_status(&mut self, id: &str, status: AppointmentStatus) -> StoreResult<()> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let previous = appointment.status;
        appointment.status = status;
        info!(
            appointment_id = %id,
            from = previous.as_str(),
            to = status.as_str(),
            "Appointment status changed"
        );
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn list(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Appointments whose patient name contains `term`, case-insensitively.
    pub fn search(&self, term: &str) -> Vec<&Appointment> {
        let term = term.trim().to_lowercase();
        self.appointments
            .iter()
            .filter(|a| a.patient_name.to_lowercase().contains(&term))
            .collect()
    }

    /// Appointments on `date`, ordered by time.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Appointment> {
        let mut found: Vec<&Appointment> =
            self.appointments.iter().filter(|a| a.date == date).collect();
        found.sort_by_key(|a| a.time);
        found
    }

    /// The Sunday-to-Saturday week containing `date`.
    ///
    /// Clamped to the representable date range, so the first and last weeks
    /// of that range may be short.
    pub fn week_of(date: NaiveDate) -> Vec<NaiveDate> {
        let offset = Duration::days(i64::from(date.weekday().num_days_from_sunday()));
        let start = date.checked_sub_signed(offset).unwrap_or(NaiveDate::MIN);
        (0..7)
            .filter_map(|i| start.checked_add_signed(Duration::days(i)))
            .collect()
    }

    /// Appointments in the week containing `date`, ordered by date then time.
    pub fn in_week(&self, date: NaiveDate) -> Vec<&Appointment> {
        let week = Self::week_of(date);
        let (Some(&first), Some(&last)) = (week.first(), week.last()) else {
            return Vec::new();
        };
        let mut found: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.date >= first && a.date <= last)
            .collect();
        found.sort_by_key(|a| (a.date, a.time));
        found
    }

    /// Appointments in the given month, ordered by date then time.
    pub fn in_month(&self, year: i32, month: u32) -> Vec<&Appointment> {
        let mut found: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.date.year() == year && a.date.month() == month)
            .collect();
        found.sort_by_key(|a| (a.date, a.time));
        found
    }

    pub fn count_by_status(&self) -> StatusCounts {
        self.appointments
            .iter()
            .fold(StatusCounts::default(), |mut counts, a| {
                match a.status {
                    AppointmentStatus::Scheduled => counts.scheduled += 1,
                    AppointmentStatus::Attended => counts.attended += 1,
                    AppointmentStatus::Missed => counts.missed += 1,
                    AppointmentStatus::Rescheduled => counts.rescheduled += 1,
                }
                counts
            })
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}
