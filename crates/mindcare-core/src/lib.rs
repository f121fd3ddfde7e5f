//! MindCare Core Library
//!
//! View-state coordination for a mental-health clinic's administration app:
//! patient records, appointments, the income/expense ledger, the session
//! workspace and practice reports. Rendering lives in the host shell.
//!
//! # Architecture
//!
//! ```text
//!   Shell (screens, dialogs, timers)
//!        │  Action / FFI call                 ▲  View + records
//!        ▼                                    │
//!   ┌────────────────────────── App ─────────────────────────┐
//!   │  ViewRouter ── screen · selected patient · session      │
//!   │      │                                                  │
//!   │      └─ leave screen ──► TaskQueue (cancel owned tasks) │
//!   │                                                         │
//!   │  PatientStore   AppointmentStore   Ledger   RecordStore │
//!   └──────────────────────────┬──────────────────────────────┘
//!                              │
//!                ┌─────────────┴─────────────┐
//!                ▼                           ▼
//!             Reports                  Ledger Export
//!        (dashboard, practice)          (JSON, CSV)
//! ```
//!
//! # Core Principle
//!
//! **One owner per fact.** Stores own entities, the router owns navigation,
//! and every screen change goes through the app so deferred work started on a
//! screen never lands after the user has left it.
//!
//! # Modules
//!
//! - [`app`]: application state, actions and the delete confirmation flow
//! - [`router`]: screens, menu and view resolution
//! - [`store`]: in-memory entity stores
//! - [`models`]: domain types and form validation
//! - [`tasks`]: cancellable deferred work
//! - [`reports`]: dashboard and practice report
//! - [`export`]: ledger export
//! - [`config`], [`logging`]: runtime configuration and tracing setup

pub mod app;
pub mod config;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod router;
pub mod store;
pub mod tasks;

// Re-export commonly used types
pub use app::{Action, App, AppError, ConfirmPrompt, ConfirmationPrompt, Effect};
pub use config::ClinicConfig;
pub use models::{
    Appointment, AppointmentStatus, DeliveryStatus, DraftField, Gender, Patient, SessionType,
    Transaction, TransactionKind,
};
pub use router::{Screen, View, ViewRouter};
pub use store::KindFilter;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use models::{AppointmentForm, PatientForm, Prescription, TransactionForm, Visit};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MindCareError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Confirmation error: {0}")]
    ConfirmationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<AppError> for MindCareError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Validation(v) => MindCareError::ValidationError(v.to_string()),
            AppError::NotFound(id) => MindCareError::NotFound(id),
            AppError::DuplicateId(id) => MindCareError::InvalidInput(format!("Duplicate id: {}", id)),
            AppError::Session(s) => MindCareError::SessionError(s.to_string()),
            AppError::Confirmation(c) => MindCareError::ConfirmationError(c.to_string()),
        }
    }
}

impl From<models::ValidationError> for MindCareError {
    fn from(e: models::ValidationError) -> Self {
        MindCareError::ValidationError(e.to_string())
    }
}

impl From<config::ConfigError> for MindCareError {
    fn from(e: config::ConfigError) -> Self {
        MindCareError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for MindCareError {
    fn from(e: serde_json::Error) -> Self {
        MindCareError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MindCareError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MindCareError::InternalError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a clinic with the default configuration.
#[uniffi::export]
pub fn open_clinic() -> Arc<MindCareCore> {
    Arc::new(MindCareCore::new(App::default()))
}

/// Open a clinic with a JSON configuration. Missing keys use defaults.
#[uniffi::export]
pub fn open_clinic_with_config(config_json: String) -> Result<Arc<MindCareCore>, MindCareError> {
    let config = ClinicConfig::from_json(&config_json)?;
    Ok(Arc::new(MindCareCore::new(App::new(config))))
}

/// The 30-minute booking slots, formatted for display.
#[uniffi::export]
pub fn appointment_time_slots() -> Vec<String> {
    models::time_slots()
        .into_iter()
        .map(models::format_slot)
        .collect()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe application wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MindCareCore {
    app: Arc<Mutex<App>>,
}

impl MindCareCore {
    pub fn new(app: App) -> Self {
        Self {
            app: Arc::new(Mutex::new(app)),
        }
    }
}

#[uniffi::export]
impl MindCareCore {
    /// Install the tracing subscriber with the configured filter.
    pub fn init_logging(&self) -> Result<bool, MindCareError> {
        let app = self.app.lock()?;
        Ok(logging::init(&app.config().log_filter))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// What the shell should render now.
    pub fn current_view(&self) -> Result<FfiCurrentView, MindCareError> {
        let app = self.app.lock()?;
        Ok(FfiCurrentView::from_app(&app))
    }

    pub fn navigate(&self, screen: Screen) -> Result<FfiCurrentView, MindCareError> {
        let mut app = self.app.lock()?;
        app.navigate_to(screen);
        Ok(FfiCurrentView::from_app(&app))
    }

    /// Navigate by screen id. Unknown ids show the patient list.
    pub fn navigate_by_id(&self, id: String) -> Result<FfiCurrentView, MindCareError> {
        let mut app = self.app.lock()?;
        app.navigate_to_id(&id);
        Ok(FfiCurrentView::from_app(&app))
    }

    /// Pick a sidebar menu entry by screen id.
    pub fn select_menu_item(&self, id: String) -> Result<FfiCurrentView, MindCareError> {
        let mut app = self.app.lock()?;
        app.dispatch(Action::MenuSelect { id })?;
        Ok(FfiCurrentView::from_app(&app))
    }

    pub fn toggle_sidebar(&self) -> Result<bool, MindCareError> {
        let mut app = self.app.lock()?;
        app.toggle_sidebar();
        Ok(app.router().sidebar_open())
    }

    pub fn close_sidebar(&self) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        app.close_sidebar();
        Ok(())
    }

    /// Clear selection and session, then show the patient list.
    pub fn return_to_patients(&self) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        app.return_to_patients();
        Ok(())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app.patients().list().iter().map(FfiPatient::from).collect())
    }

    /// Case-insensitive name search.
    pub fn search_patients(&self, term: String) -> Result<Vec<FfiPatient>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app
            .patients()
            .search(&term)
            .into_iter()
            .map(FfiPatient::from)
            .collect())
    }

    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app.patients().get(&id).map(FfiPatient::from))
    }

    pub fn view_patient(&self, id: String) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        app.view_patient(&id);
        Ok(())
    }

    /// Open the edit screen and return its prefilled form.
    pub fn edit_patient(&self, id: String) -> Result<Option<FfiPatientForm>, MindCareError> {
        let mut app = self.app.lock()?;
        app.edit_patient(&id);
        Ok(app.edit_form().map(FfiPatientForm::from))
    }

    pub fn add_patient(&self) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        app.navigate_to(Screen::AddPatient);
        Ok(())
    }

    /// Save the add/edit form. Returns the patient id.
    pub fn save_patient(&self, form: FfiPatientForm) -> Result<String, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.save_patient(&form.into())?)
    }

    /// Ask before deleting; answer with `confirm_delete` or `cancel_confirmation`.
    pub fn request_delete(&self, id: String) -> Result<ConfirmationPrompt, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.request_delete(&id)?)
    }

    pub fn confirm_delete(&self, id: String) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.confirm_delete(&id)?)
    }

    pub fn cancel_confirmation(&self) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        app.cancel_confirmation();
        Ok(())
    }

    // =========================================================================
    // Prescriptions & History
    // =========================================================================

    pub fn add_prescription(
        &self,
        patient_id: String,
        name: String,
        dosage: String,
        frequency: String,
    ) -> Result<String, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.add_prescription(&patient_id, name, dosage, frequency)?)
    }

    pub fn list_prescriptions(
        &self,
        patient_id: String,
    ) -> Result<Vec<FfiPrescription>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app
            .records()
            .prescriptions(&patient_id)
            .iter()
            .map(FfiPrescription::from)
            .collect())
    }

    pub fn set_delivery_status(
        &self,
        patient_id: String,
        prescription_id: String,
        status: DeliveryStatus,
    ) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.set_delivery_status(&patient_id, &prescription_id, status)?)
    }

    /// Start a simulated medicine photo upload. Returns the task id.
    pub fn upload_medicine_image(
        &self,
        patient_id: String,
        prescription_id: String,
        now_ms: u64,
    ) -> Result<u64, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app
            .upload_medicine_image(&patient_id, &prescription_id, now_ms)?
            .id())
    }

    pub fn is_uploading(&self, key: String) -> Result<bool, MindCareError> {
        let app = self.app.lock()?;
        Ok(app.is_uploading(&key))
    }

    /// Visit history, most recent first.
    pub fn visit_history(&self, patient_id: String) -> Result<Vec<FfiVisit>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app
            .records()
            .visits(&patient_id)
            .into_iter()
            .map(FfiVisit::from)
            .collect())
    }

    // =========================================================================
    // Session Workspace
    // =========================================================================

    pub fn start_session(&self, patient_id: String) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        app.start_session(&patient_id);
        Ok(())
    }

    /// Returns `false` when no patient is selected.
    pub fn confirm_session(&self, session_type: SessionType) -> Result<bool, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.confirm_session(session_type))
    }

    pub fn current_draft(&self) -> Result<Option<FfiSessionDraft>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app.router().active_session().map(FfiSessionDraft::from))
    }

    pub fn edit_draft(&self, field: DraftField, value: String) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.edit_draft(field, value)?)
    }

    /// Returns whether recording is now on.
    pub fn toggle_recording(&self, now_ms: u64) -> Result<bool, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.toggle_recording(now_ms)?)
    }

    pub fn upload_prescription(&self, file_name: String, now_ms: u64) -> Result<u64, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.upload_prescription(file_name, now_ms)?.id())
    }

    pub fn send_prescription(&self) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.send_prescription()?)
    }

    /// Returns the patient's new session total.
    pub fn complete_session(&self) -> Result<u32, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.complete_session()?)
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    pub fn list_appointments(&self) -> Result<Vec<FfiAppointment>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app
            .appointments()
            .list()
            .iter()
            .map(FfiAppointment::from)
            .collect())
    }

    /// Appointments on a `YYYY-MM-DD` date, by time.
    pub fn appointments_on(&self, date: String) -> Result<Vec<FfiAppointment>, MindCareError> {
        let date = models::parse_date(&date)?;
        let app = self.app.lock()?;
        Ok(app
            .appointments()
            .on_date(date)
            .into_iter()
            .map(FfiAppointment::from)
            .collect())
    }

    pub fn new_appointment(&self) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        app.navigate_to(Screen::NewAppointment);
        Ok(())
    }

    /// Returns the appointment id.
    pub fn schedule_appointment(&self, form: FfiAppointmentForm) -> Result<String, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.schedule_appointment(&form.into())?)
    }

    pub fn set_appointment_status(
        &self,
        id: String,
        status: AppointmentStatus,
    ) -> Result<(), MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.set_appointment_status(&id, status)?)
    }

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    pub fn transaction_form(&self) -> Result<FfiTransactionForm, MindCareError> {
        let app = self.app.lock()?;
        Ok(app.transaction_form().clone().into())
    }

    /// Configured category suggestions for the entry form.
    pub fn transaction_categories(&self) -> Result<Vec<String>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app.transaction_categories().to_vec())
    }

    /// Store an edit of the entry form; returns it after amount filtering.
    pub fn edit_transaction_form(
        &self,
        form: FfiTransactionForm,
    ) -> Result<FfiTransactionForm, MindCareError> {
        let mut app = self.app.lock()?;
        app.edit_transaction_form(form.into());
        Ok(app.transaction_form().clone().into())
    }

    /// Submit the stored entry form. Returns the transaction id.
    pub fn submit_transaction(&self) -> Result<String, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(app.submit_transaction()?)
    }

    pub fn list_transactions(
        &self,
        filter: KindFilter,
    ) -> Result<Vec<FfiTransaction>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app
            .ledger()
            .filtered(filter, None)
            .into_iter()
            .map(FfiTransaction::from)
            .collect())
    }

    pub fn ledger_totals(&self) -> Result<FfiLedgerTotals, MindCareError> {
        let app = self.app.lock()?;
        Ok(app.ledger().totals().into())
    }

    // =========================================================================
    // Deferred Work
    // =========================================================================

    /// Apply deferred completions due at `now_ms`. Returns how many applied.
    pub fn tick(&self, now_ms: u64) -> Result<u32, MindCareError> {
        let mut app = self.app.lock()?;
        Ok(u32::try_from(app.tick(now_ms)).unwrap_or(u32::MAX))
    }

    /// When the shell should next call `tick`.
    pub fn next_due_ms(&self) -> Result<Option<u64>, MindCareError> {
        let app = self.app.lock()?;
        Ok(app.tasks().next_due_ms())
    }

    // =========================================================================
    // Reports & Export
    // =========================================================================

    pub fn dashboard(&self) -> Result<FfiDashboardStats, MindCareError> {
        let app = self.app.lock()?;
        Ok(app.dashboard().into())
    }

    /// Practice report as JSON.
    pub fn practice_report_json(&self) -> Result<String, MindCareError> {
        let app = self.app.lock()?;
        Ok(serde_json::to_string_pretty(&app.report())?)
    }

    /// Export the ledger as JSON.
    pub fn export_ledger_json(&self) -> Result<String, MindCareError> {
        let app = self.app.lock()?;
        Ok(export::LedgerExport::from_ledger(app.ledger()).to_json()?)
    }

    /// Export the ledger as CSV.
    pub fn export_ledger_csv(&self) -> Result<String, MindCareError> {
        let app = self.app.lock()?;
        Ok(export::LedgerExport::from_ledger(app.ledger()).to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe snapshot of navigation state.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCurrentView {
    /// Screen requested by navigation
    pub active: Screen,
    /// Screen actually rendered, after fallback
    pub rendered: Screen,
    pub title: String,
    pub selected_patient_id: Option<String>,
    pub session_patient_id: Option<String>,
    pub sidebar_open: bool,
}

impl FfiCurrentView {
    fn from_app(app: &App) -> Self {
        let router = app.router();
        let rendered = app.view().screen();
        Self {
            active: router.active(),
            rendered,
            title: rendered.title(),
            selected_patient_id: router.selected_patient().map(str::to_string),
            session_patient_id: router.active_session().map(|s| s.patient_id.clone()),
            sidebar_open: router.sidebar_open(),
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
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
    pub last_session: String,
    pub session_type: SessionType,
    pub total_sessions: u32,
}

impl From<&Patient> for FfiPatient {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            age: patient.age,
            gender: patient.gender,
            phone: patient.phone.clone(),
            email: patient.email.clone(),
            address: patient.address.clone(),
            emergency_contact: patient.emergency_contact.clone(),
            medical_history: patient.medical_history.clone(),
            current_medications: patient.current_medications.clone(),
            allergies: patient.allergies.clone(),
            notes: patient.notes.clone(),
            last_session: patient.last_session.format("%Y-%m-%d").to_string(),
            session_type: patient.session_type,
            total_sessions: patient.total_sessions,
        }
    }
}

/// FFI-safe add/edit form; every field as typed.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiPatientForm {
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

impl From<PatientForm> for FfiPatientForm {
    fn from(form: PatientForm) -> Self {
        Self {
            id: form.id,
            name: form.name,
            age: form.age,
            gender: form.gender,
            phone: form.phone,
            email: form.email,
            address: form.address,
            emergency_contact: form.emergency_contact,
            medical_history: form.medical_history,
            current_medications: form.current_medications,
            allergies: form.allergies,
            notes: form.notes,
        }
    }
}

impl From<FfiPatientForm> for PatientForm {
    fn from(form: FfiPatientForm) -> Self {
        PatientForm {
            id: form.id,
            name: form.name,
            age: form.age,
            gender: form.gender,
            phone: form.phone,
            email: form.email,
            address: form.address,
            emergency_contact: form.emergency_contact,
            medical_history: form.medical_history,
            current_medications: form.current_medications,
            allergies: form.allergies,
            notes: form.notes,
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub patient_name: String,
    pub patient_id: Option<String>,
    pub date: String,
    pub time: String,
    pub session_type: SessionType,
    pub status: AppointmentStatus,
    pub notes: String,
}

impl From<&Appointment> for FfiAppointment {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.clone(),
            patient_name: appointment.patient_name.clone(),
            patient_id: appointment.patient_id.clone(),
            date: appointment.date.format("%Y-%m-%d").to_string(),
            time: appointment.time_label(),
            session_type: appointment.session_type,
            status: appointment.status,
            notes: appointment.notes.clone(),
        }
    }
}

/// FFI-safe new-appointment form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentForm {
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub session_type: SessionType,
    pub notes: String,
}

impl From<FfiAppointmentForm> for AppointmentForm {
    fn from(form: FfiAppointmentForm) -> Self {
        AppointmentForm {
            patient_id: form.patient_id,
            date: form.date,
            time: form.time,
            session_type: form.session_type,
            notes: form.notes,
        }
    }
}

/// FFI-safe transaction. Amounts are decimal strings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTransaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: String,
}

impl From<&Transaction> for FfiTransaction {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            kind: t.kind,
            amount: t.amount.to_string(),
            description: t.description.clone(),
            category: t.category.clone(),
            date: t.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// FFI-safe ledger entry form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTransactionForm {
    pub kind: TransactionKind,
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: String,
}

impl From<TransactionForm> for FfiTransactionForm {
    fn from(form: TransactionForm) -> Self {
        Self {
            kind: form.kind,
            amount: form.amount,
            description: form.description,
            category: form.category,
            date: form.date,
        }
    }
}

impl From<FfiTransactionForm> for TransactionForm {
    fn from(form: FfiTransactionForm) -> Self {
        TransactionForm {
            kind: form.kind,
            amount: form.amount,
            description: form.description,
            category: form.category,
            date: form.date,
        }
    }
}

/// FFI-safe ledger totals.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLedgerTotals {
    pub total_income: String,
    pub total_expenses: String,
    pub net_profit: String,
}

impl From<store::LedgerTotals> for FfiLedgerTotals {
    fn from(totals: store::LedgerTotals) -> Self {
        Self {
            total_income: totals.total_income.to_string(),
            total_expenses: totals.total_expenses.to_string(),
            net_profit: totals.net_profit.to_string(),
        }
    }
}

/// FFI-safe prescription.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescription {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub image: Option<String>,
    pub delivery_status: DeliveryStatus,
}

impl From<&Prescription> for FfiPrescription {
    fn from(p: &Prescription) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            dosage: p.dosage.clone(),
            frequency: p.frequency.clone(),
            image: p.image.clone(),
            delivery_status: p.delivery_status,
        }
    }
}

/// FFI-safe visit history entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisit {
    pub id: String,
    pub date: String,
    pub session_type: SessionType,
    pub notes: String,
    pub status: models::VisitStatus,
}

impl From<&Visit> for FfiVisit {
    fn from(v: &Visit) -> Self {
        Self {
            id: v.id.clone(),
            date: v.date.format("%Y-%m-%d").to_string(),
            session_type: v.session_type,
            notes: v.notes.clone(),
            status: v.status,
        }
    }
}

/// FFI-safe session workspace draft.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSessionDraft {
    pub patient_id: String,
    pub session_type: SessionType,
    pub physical_notes: String,
    pub mental_notes: String,
    pub medicines: String,
    pub voice_transcript: String,
    pub recording: bool,
    pub prescription_image: Option<String>,
    pub prescription_sent: bool,
}

impl From<&models::ActiveSession> for FfiSessionDraft {
    fn from(session: &models::ActiveSession) -> Self {
        let draft = &session.draft;
        Self {
            patient_id: session.patient_id.clone(),
            session_type: session.session_type,
            physical_notes: draft.physical_notes.clone(),
            mental_notes: draft.mental_notes.clone(),
            medicines: draft.medicines.clone(),
            voice_transcript: draft.voice_transcript.clone(),
            recording: draft.recording,
            prescription_image: draft.prescription_image.clone(),
            prescription_sent: draft.prescription_sent,
        }
    }
}

/// FFI-safe dashboard figures.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardStats {
    pub total_patients: u32,
    pub todays_appointments: u32,
    pub active_sessions: u32,
    pub monthly_revenue: String,
}

impl From<reports::DashboardStats> for FfiDashboardStats {
    fn from(stats: reports::DashboardStats) -> Self {
        Self {
            total_patients: stats.total_patients,
            todays_appointments: stats.todays_appointments,
            active_sessions: stats.active_sessions,
            monthly_revenue: stats.monthly_revenue.to_string(),
        }
    }
}
