//! Message-style entry point: one [`Action`] in, one [`Effect`] out.

use serde::{Deserialize, Serialize};

use super::{App, AppResult, ConfirmationPrompt};
use crate::models::{
    AppointmentForm, AppointmentStatus, DeliveryStatus, DraftField, PatientForm, SessionType,
    TransactionForm,
};
use crate::router::{menu_item, Screen};

/// Everything a screen can ask the application to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    Navigate { screen: Screen },
    NavigateById { id: String },
    MenuSelect { id: String },
    ToggleSidebar,
    CloseSidebar,

    ViewPatient { patient_id: String },
    EditPatient { patient_id: String },
    AddPatient,
    SavePatient { form: PatientForm },
    RequestDelete { patient_id: String },
    ConfirmDelete { patient_id: String },
    CancelConfirmation,
    AddPrescription {
        patient_id: String,
        name: String,
        dosage: String,
        frequency: String,
    },
    SetDeliveryStatus {
        patient_id: String,
        prescription_id: String,
        status: DeliveryStatus,
    },
    UploadMedicineImage {
        patient_id: String,
        prescription_id: String,
        now_ms: u64,
    },

    StartSession { patient_id: String },
    ConfirmSession { session_type: SessionType },
    BackToPatients,

    NewAppointment,
    ScheduleAppointment { form: AppointmentForm },
    CancelNewAppointment,
    SetAppointmentStatus {
        appointment_id: String,
        status: AppointmentStatus,
    },

    EditTransactionForm { form: TransactionForm },
    SubmitTransaction,

    EditDraft { field: DraftField, value: String },
    ToggleRecording { now_ms: u64 },
    UploadPrescription { file_name: String, now_ms: u64 },
    SendPrescription,
    CompleteSession,

    Tick { now_ms: u64 },
}

/// What the shell should do after an action, beyond re-rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Ask the user, then send `ConfirmDelete` or `CancelConfirmation`
    Confirm(ConfirmationPrompt),
    PatientSaved { id: String },
    PrescriptionAdded { id: String },
    AppointmentScheduled { id: String },
    TransactionAdded { id: String },
    SessionStarted(bool),
    Recording(bool),
    SessionCompleted { patient_id: String, total_sessions: u32 },
    /// Deferred completions applied by a tick
    Applied(usize),
}

impl App {
    /// Apply one action.
    pub fn dispatch(&mut self, action: Action) -> AppResult<Effect> {
        let effect = match action {
            Action::Navigate { screen } => {
                self.navigate_to(screen);
                Effect::None
            }
            Action::NavigateById { id } => {
                self.navigate_to_id(&id);
                Effect::None
            }
            Action::MenuSelect { id } => {
                match menu_item(&id) {
                    Some(item) => self.select_menu_item(item),
                    None => {
                        self.close_sidebar();
                        self.navigate_to_id(&id);
                    }
                }
                Effect::None
            }
            Action::ToggleSidebar => {
                self.toggle_sidebar();
                Effect::None
            }
            Action::CloseSidebar => {
                self.close_sidebar();
                Effect::None
            }

            Action::ViewPatient { patient_id } => {
                self.view_patient(&patient_id);
                Effect::None
            }
            Action::EditPatient { patient_id } => {
                self.edit_patient(&patient_id);
                Effect::None
            }
            Action::AddPatient => {
                self.navigate_to(Screen::AddPatient);
                Effect::None
            }
            Action::SavePatient { form } => Effect::PatientSaved {
                id: self.save_patient(&form)?,
            },
            Action::RequestDelete { patient_id } => {
                Effect::Confirm(self.request_delete(&patient_id)?)
            }
            Action::ConfirmDelete { patient_id } => {
                self.confirm_delete(&patient_id)?;
                Effect::None
            }
            Action::CancelConfirmation => {
                self.cancel_confirmation();
                Effect::None
            }
            Action::AddPrescription {
                patient_id,
                name,
                dosage,
                frequency,
            } => Effect::PrescriptionAdded {
                id: self.add_prescription(&patient_id, name, dosage, frequency)?,
            },
            Action::SetDeliveryStatus {
                patient_id,
                prescription_id,
                status,
            } => {
                self.set_delivery_status(&patient_id, &prescription_id, status)?;
                Effect::None
            }
            Action::UploadMedicineImage {
                patient_id,
                prescription_id,
                now_ms,
            } => {
                self.upload_medicine_image(&patient_id, &prescription_id, now_ms)?;
                Effect::None
            }

            Action::StartSession { patient_id } => {
                self.start_session(&patient_id);
                Effect::None
            }
            Action::ConfirmSession { session_type } => {
                Effect::SessionStarted(self.confirm_session(session_type))
            }
            Action::BackToPatients => {
                self.return_to_patients();
                Effect::None
            }

            Action::NewAppointment => {
                self.navigate_to(Screen::NewAppointment);
                Effect::None
            }
            Action::ScheduleAppointment { form } => Effect::AppointmentScheduled {
                id: self.schedule_appointment(&form)?,
            },
            Action::CancelNewAppointment => {
                self.navigate_to(Screen::Appointments);
                Effect::None
            }
            Action::SetAppointmentStatus {
                appointment_id,
                status,
            } => {
                self.set_appointment_status(&appointment_id, status)?;
                Effect::None
            }

            Action::EditTransactionForm { form } => {
                self.edit_transaction_form(form);
                Effect::None
            }
            Action::SubmitTransaction => Effect::TransactionAdded {
                id: self.submit_transaction()?,
            },

            Action::EditDraft { field, value } => {
                self.edit_draft(field, value)?;
                Effect::None
            }
            Action::ToggleRecording { now_ms } => Effect::Recording(self.toggle_recording(now_ms)?),
            Action::UploadPrescription { file_name, now_ms } => {
                self.upload_prescription(file_name, now_ms)?;
                Effect::None
            }
            Action::SendPrescription => {
                self.send_prescription()?;
                Effect::None
            }
            Action::CompleteSession => {
                let patient_id = self
                    .router()
                    .active_session()
                    .map(|s| s.patient_id.clone())
                    .unwrap_or_default();
                let total_sessions = self.complete_session()?;
                Effect::SessionCompleted {
                    patient_id,
                    total_sessions,
                }
            }

            Action::Tick { now_ms } => Effect::Applied(self.tick(now_ms)),
        };
        Ok(effect)
    }
}
