//! Dashboard figures and the practice report, derived from the live stores.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::SessionType;
use crate::store::{AppointmentStore, Ledger, PatientStore, StatusCounts};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: u32,
    pub todays_appointments: u32,
    /// 0 or 1
    pub active_sessions: u32,
    /// Income dated in the current month
    pub monthly_revenue: Decimal,
}

impl DashboardStats {
    pub fn compute(
        patients: &PatientStore,
        appointments: &AppointmentStore,
        ledger: &Ledger,
        active_sessions: u32,
        today: NaiveDate,
    ) -> Self {
        let this_month = (today.year(), today.month());
        let monthly_revenue = ledger
            .monthly_income()
            .into_iter()
            .find(|(month, _)| *month == this_month)
            .map(|(_, revenue)| revenue)
            .unwrap_or_default();

        Self {
            total_patients: count(patients.len()),
            todays_appointments: count(appointments.on_date(today).len()),
            active_sessions,
            monthly_revenue,
        }
    }
}

/// Income for one calendar month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub revenue: Decimal,
}

/// Patients per preferred session type.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionTypeSplit {
    pub in_person: u32,
    pub remote: u32,
}

/// Practice-wide report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeReport {
    pub total_revenue: Decimal,
    /// Sum of every patient's completed sessions
    pub completed_sessions: u32,
    /// Revenue per completed session, to the cent. `None` with no sessions.
    pub average_session_value: Option<Decimal>,
    /// Oldest month first
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub appointment_status: StatusCounts,
    /// attended / (attended + missed). `None` before any outcome is recorded.
    pub attendance_rate: Option<f64>,
    pub session_types: SessionTypeSplit,
}

impl PracticeReport {
    pub fn compute(
        patients: &PatientStore,
        appointments: &AppointmentStore,
        ledger: &Ledger,
    ) -> Self {
        let total_revenue = ledger.total_income();
        let completed_sessions: u32 = patients.list().iter().map(|p| p.total_sessions).sum();

        let average_session_value = (completed_sessions > 0)
            .then(|| (total_revenue / Decimal::from(completed_sessions)).round_dp(2));

        let monthly_revenue = ledger
            .monthly_income()
            .into_iter()
            .map(|((year, month), revenue)| MonthlyRevenue {
                year,
                month,
                revenue,
            })
            .collect();

        let appointment_status = appointments.count_by_status();
        let outcomes = appointment_status.attended + appointment_status.missed;
        let attendance_rate =
            (outcomes > 0).then(|| f64::from(appointment_status.attended) / f64::from(outcomes));

        let mut session_types = SessionTypeSplit::default();
        for patient in patients.list() {
            match patient.session_type {
                SessionType::InPerson => session_types.in_person += 1,
                SessionType::Remote => session_types.remote += 1,
            }
        }

        Self {
            total_revenue,
            completed_sessions,
            average_session_value,
            monthly_revenue,
            appointment_status,
            attendance_rate,
            session_types,
        }
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
