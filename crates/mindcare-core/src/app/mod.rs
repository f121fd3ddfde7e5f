//! Application state and its reducer.
//!
//! [`App`] owns every store, the view router and the deferred task queue.
//! Screens never mutate state directly: they send an [`Action`] to
//! [`App::dispatch`], or call the matching method, and re-render from the
//! resulting state.
//!
//! Every screen change passes through one transition point, which cancels
//! deferred tasks owned by the screen being left.

mod action;
mod confirm;

pub use action::*;
pub use confirm::*;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ClinicConfig;
use crate::models::{
    ActiveSession, AppointmentForm, DeliveryStatus, DraftField, PatientForm, Prescription,
    SessionError, SessionType, TransactionForm, ValidationError, Visit,
    PLACEHOLDER_MEDICINE_IMAGE,
};
use crate::reports::{DashboardStats, PracticeReport};
use crate::router::{NavItem, Screen, View, ViewRouter};
use crate::store::{AppointmentStore, Ledger, PatientStore, RecordStore, StoreError};
use crate::tasks::{Completion, TaskHandle, TaskQueue};

/// Errors surfaced to the shell. Each one leaves state unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Confirmation(#[from] ConfirmationError),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(v) => AppError::Validation(v),
            StoreError::NotFound(id) => AppError::NotFound(id),
            StoreError::DuplicateId(id) => AppError::DuplicateId(id),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// The whole application state.
#[derive(Debug)]
pub struct App {
    config: ClinicConfig,
    router: ViewRouter,
    patients: PatientStore,
    appointments: AppointmentStore,
    ledger: Ledger,
    records: RecordStore,
    tasks: TaskQueue,
    transaction_form: TransactionForm,
    pending_confirmation: Option<Confirmation>,
    fixed_today: Option<NaiveDate>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(ClinicConfig::default())
    }
}

impl App {
    pub fn new(config: ClinicConfig) -> Self {
        let today = chrono::Local::now().date_naive();
        let transaction_form = TransactionForm::new(&config.default_category, today);
        Self {
            router: ViewRouter::new(config.initial_screen),
            patients: PatientStore::new(),
            appointments: AppointmentStore::new(),
            ledger: Ledger::new(),
            records: RecordStore::new(),
            tasks: TaskQueue::new(),
            transaction_form,
            pending_confirmation: None,
            fixed_today: None,
            config,
        }
    }

    /// Pin "today" to a fixed date instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self.transaction_form = TransactionForm::new(&self.config.default_category, today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    /// Category suggestions offered by the transaction entry form.
    pub fn transaction_categories(&self) -> &[String] {
        &self.config.transaction_categories
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn patients(&self) -> &PatientStore {
        &self.patients
    }

    pub fn appointments(&self) -> &AppointmentStore {
        &self.appointments
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    pub fn transaction_form(&self) -> &TransactionForm {
        &self.transaction_form
    }

    pub fn pending_confirmation(&self) -> Option<&Confirmation> {
        self.pending_confirmation.as_ref()
    }

    /// The screen to render, after fallback.
    pub fn view(&self) -> View<'_> {
        self.router.resolve(&self.patients)
    }

    /// Prefilled form for the edit screen, if it has a patient to edit.
    pub fn edit_form(&self) -> Option<PatientForm> {
        match self.view() {
            View::EditPatient(patient) => Some(PatientForm::from_patient(patient)),
            _ => None,
        }
    }

    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::compute(
            &self.patients,
            &self.appointments,
            &self.ledger,
            u32::from(self.router.active_session().is_some()),
            self.today(),
        )
    }

    pub fn report(&self) -> PracticeReport {
        PracticeReport::compute(&self.patients, &self.appointments, &self.ledger)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Single exit point for screen changes.
    fn left_screen(&mut self, left: Option<Screen>) {
        if let Some(left) = left {
            self.tasks.cancel_owned_by(left);
        }
    }

    pub fn navigate_to(&mut self, screen: Screen) {
        let left = self.router.navigate_to(screen);
        self.left_screen(left);
    }

    /// Navigate by screen id; unknown ids land on the patient list.
    pub fn navigate_to_id(&mut self, id: &str) {
        self.navigate_to(Screen::from_id(id));
    }

    pub fn select_menu_item(&mut self, item: &NavItem) {
        let left = self.router.select_menu_item(item);
        self.left_screen(left);
    }

    pub fn toggle_sidebar(&mut self) {
        self.router.toggle_sidebar();
    }

    pub fn close_sidebar(&mut self) {
        self.router.close_sidebar();
    }

    pub fn select_patient_and_navigate(&mut self, patient_id: &str, screen: Screen) {
        let left = self
            .router
            .select_patient_and_navigate(patient_id.to_string(), screen);
        self.left_screen(left);
    }

    pub fn view_patient(&mut self, patient_id: &str) {
        self.select_patient_and_navigate(patient_id, Screen::PatientDetail);
    }

    pub fn edit_patient(&mut self, patient_id: &str) {
        self.select_patient_and_navigate(patient_id, Screen::EditPatient);
    }

    pub fn start_session(&mut self, patient_id: &str) {
        let left = self.router.start_session(patient_id.to_string());
        self.left_screen(left);
    }

    /// Start the session for the selected patient. Returns whether it started.
    ///
    /// A selection that no longer names a stored patient counts as no
    /// selection. Starting over an existing session cancels its pending work.
    pub fn confirm_session(&mut self, session_type: SessionType) -> bool {
        if let Some(patient_id) = self.router.selected_patient() {
            if !self.patients.contains(patient_id) {
                warn!(%patient_id, "Confirm session ignored: patient not found");
                return false;
            }
        }

        let replacing = self.router.active_session().is_some();
        let (started, left) = self.router.confirm_session(session_type);
        if started && replacing {
            self.tasks.cancel_owned_by(Screen::Session);
        }
        self.left_screen(left);
        started
    }

    /// Universal back handler.
    pub fn return_to_patients(&mut self) {
        let left = self.router.return_to_patients();
        self.left_screen(left);
    }

    // =========================================================================
    // Patients
    // =========================================================================

    /// Save the add/edit form and return to the patient list.
    pub fn save_patient(&mut self, form: &PatientForm) -> AppResult<String> {
        let today = self.today();
        let id = self
            .patients
            .add_or_update(form, today, self.config.default_session_type)?;
        self.navigate_to(Screen::Patients);
        Ok(id)
    }

    /// First step of deleting a patient: record the request and return the
    /// prompt to show.
    pub fn request_delete(&mut self, patient_id: &str) -> AppResult<ConfirmationPrompt> {
        let patient = self
            .patients
            .get(patient_id)
            .ok_or_else(|| AppError::NotFound(patient_id.to_string()))?;

        let confirmation = Confirmation::DeletePatient {
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
        };
        let prompt = confirmation.prompt();
        debug!(patient_id, "Delete requested");
        self.pending_confirmation = Some(confirmation);
        Ok(prompt)
    }

    /// Second step: perform the delete the user confirmed.
    pub fn confirm_delete(&mut self, patient_id: &str) -> AppResult<()> {
        let pending = self
            .pending_confirmation
            .as_ref()
            .ok_or(ConfirmationError::NothingPending)?;
        pending.check(patient_id)?;
        self.pending_confirmation = None;

        self.patients.remove(patient_id)?;
        self.records.remove_patient(patient_id);
        if let Some(left) = self.router.forget_patient(patient_id) {
            self.left_screen(left);
        }
        Ok(())
    }

    /// Drop a pending confirmation without acting on it.
    pub fn cancel_confirmation(&mut self) {
        if let Some(pending) = self.pending_confirmation.take() {
            debug!(target_id = pending.target_id(), "Confirmation cancelled");
        }
    }

    /// Delete with a synchronous prompt. Returns whether the patient was
    /// deleted.
    pub fn delete_patient_with<P: ConfirmPrompt>(
        &mut self,
        patient_id: &str,
        prompt: &mut P,
    ) -> AppResult<bool> {
        let question = self.request_delete(patient_id)?;
        if prompt.confirm(&question) {
            self.confirm_delete(patient_id)?;
            Ok(true)
        } else {
            self.cancel_confirmation();
            Ok(false)
        }
    }

    pub fn add_prescription(
        &mut self,
        patient_id: &str,
        name: String,
        dosage: String,
        frequency: String,
    ) -> AppResult<String> {
        if !self.patients.contains(patient_id) {
            return Err(AppError::NotFound(patient_id.to_string()));
        }
        let name = crate::models::require(&name, "name")?.to_string();
        Ok(self
            .records
            .add_prescription(patient_id, Prescription::new(name, dosage, frequency)))
    }

    pub fn set_delivery_status(
        &mut self,
        patient_id: &str,
        prescription_id: &str,
        status: DeliveryStatus,
    ) -> AppResult<()> {
        Ok(self
            .records
            .set_delivery_status(patient_id, prescription_id, status)?)
    }

    /// Start a simulated medicine photo upload, owned by the current screen.
    pub fn upload_medicine_image(
        &mut self,
        patient_id: &str,
        prescription_id: &str,
        now_ms: u64,
    ) -> AppResult<TaskHandle> {
        if !self.records.has_prescription(patient_id, prescription_id) {
            return Err(AppError::NotFound(prescription_id.to_string()));
        }
        Ok(self.tasks.schedule(
            self.router.active(),
            prescription_id,
            now_ms,
            self.config.upload_delay_ms,
            Completion::MedicineImageUploaded {
                patient_id: patient_id.to_string(),
                prescription_id: prescription_id.to_string(),
            },
        ))
    }

    /// Whether an upload for `key` is still in flight.
    pub fn is_uploading(&self, key: &str) -> bool {
        self.tasks.is_pending(key)
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    /// Validate and schedule an appointment, then show the appointment list.
    pub fn schedule_appointment(&mut self, form: &AppointmentForm) -> AppResult<String> {
        let fields = form.validate()?;
        let patient_name = self
            .patients
            .get(&fields.patient_id)
            .map(|p| p.name.clone())
            .ok_or_else(|| ValidationError::UnknownPatient(fields.patient_id.clone()))?;

        let id = self.appointments.schedule(fields, patient_name);
        self.navigate_to(Screen::Appointments);
        Ok(id)
    }

    pub fn set_appointment_status(
        &mut self,
        appointment_id: &str,
        status: crate::models::AppointmentStatus,
    ) -> AppResult<()> {
        Ok(self.appointments.set_status(appointment_id, status)?)
    }

    /// Insert a pre-built appointment (imports, fixtures).
    pub fn insert_appointment(&mut self, appointment: crate::models::Appointment) -> AppResult<()> {
        Ok(self.appointments.insert(appointment)?)
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Store an edit of the entry form. The amount is filtered to digits and
    /// a decimal point as it is typed.
    pub fn edit_transaction_form(&mut self, mut form: TransactionForm) {
        form.amount = crate::models::filter_amount_input(&form.amount);
        self.transaction_form = form;
    }

    /// Submit the stored entry form.
    pub fn submit_transaction(&mut self) -> AppResult<String> {
        let form = self.transaction_form.clone();
        self.add_transaction(&form)
    }

    /// Add a transaction and reset the entry form. On a validation failure
    /// neither the ledger nor the form changes.
    pub fn add_transaction(&mut self, form: &TransactionForm) -> AppResult<String> {
        let today = self.today();
        let id = self.ledger.add(form, today)?;
        self.transaction_form = TransactionForm::new(&self.config.default_category, today);
        Ok(id)
    }

    // =========================================================================
    // Session workspace
    // =========================================================================

    fn session_mut(&mut self) -> AppResult<&mut ActiveSession> {
        if self.router.active() != Screen::Session {
            return Err(SessionError::NoActiveSession.into());
        }
        self.router
            .active_session_mut()
            .ok_or_else(|| SessionError::NoActiveSession.into())
    }

    pub fn edit_draft(&mut self, field: DraftField, value: String) -> AppResult<()> {
        Ok(self.session_mut()?.draft.set_field(field, value)?)
    }

    /// Start or stop recording. Stopping schedules voice-note processing.
    /// Returns whether recording is now on.
    pub fn toggle_recording(&mut self, now_ms: u64) -> AppResult<bool> {
        let delay = self.config.recording_delay_ms;
        let draft = &mut self.session_mut()?.draft;
        draft.recording = !draft.recording;
        let recording = draft.recording;

        if !recording {
            self.tasks.schedule(
                Screen::Session,
                "voice-note",
                now_ms,
                delay,
                Completion::VoiceNoteProcessed,
            );
        }
        debug!(recording, "Recording toggled");
        Ok(recording)
    }

    /// Start a simulated prescription image upload.
    pub fn upload_prescription(&mut self, file_name: String, now_ms: u64) -> AppResult<TaskHandle> {
        self.session_mut()?;
        let file_name = crate::models::require(&file_name, "file")?.to_string();
        Ok(self.tasks.schedule(
            Screen::Session,
            "prescription",
            now_ms,
            self.config.upload_delay_ms,
            Completion::PrescriptionUploaded { file_name },
        ))
    }

    pub fn send_prescription(&mut self) -> AppResult<()> {
        self.session_mut()?.send_prescription()?;
        info!("Prescription sent");
        Ok(())
    }

    /// Finish the session: count it on the patient, log the visit and return
    /// to the patient list. Returns the patient's new session total.
    pub fn complete_session(&mut self) -> AppResult<u32> {
        let session = self.session_mut()?.clone();
        let today = self.today();

        let total = self
            .patients
            .record_session(&session.patient_id, session.session_type, today)?
            .total_sessions;
        self.records.add_visit(
            &session.patient_id,
            Visit::completed(today, session.session_type, session.draft.summary()),
        );
        self.return_to_patients();
        Ok(total)
    }

    // =========================================================================
    // Deferred work
    // =========================================================================

    /// Apply completions due at `now_ms`. Returns how many were applied.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let mut applied = 0;
        for completion in self.tasks.poll(now_ms) {
            match self.apply(completion) {
                Ok(()) => applied += 1,
                Err(e) => warn!(error = %e, "Dropped task completion"),
            }
        }
        applied
    }

    fn apply(&mut self, completion: Completion) -> AppResult<()> {
        match completion {
            Completion::MedicineImageUploaded {
                patient_id,
                prescription_id,
            } => self.records.attach_image(
                &patient_id,
                &prescription_id,
                PLACEHOLDER_MEDICINE_IMAGE.to_string(),
            )?,
            Completion::PrescriptionUploaded { file_name } => {
                self.session_mut()?.draft.prescription_image = Some(file_name);
            }
            Completion::VoiceNoteProcessed => {
                self.session_mut()?.draft.append_voice_note();
            }
        }
        Ok(())
    }
}
