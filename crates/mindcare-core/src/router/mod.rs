//! View routing for the application shell.
//!
//! The router owns which [`Screen`] is active, which patient is selected and
//! the session in progress. [`ViewRouter::resolve`] turns that state into the
//! single [`View`] the shell renders, falling back to the patient list when a
//! screen's entity is missing.

mod nav;

pub use nav::*;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{ActiveSession, Patient, SessionType};
use crate::store::PatientStore;

/// Every top-level screen.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    Dashboard,
    Patients,
    PatientDetail,
    AddPatient,
    EditPatient,
    NewAppointment,
    StartSession,
    Session,
    Appointments,
    Expenses,
    Reports,
}

impl Screen {
    pub const ALL: [Screen; 11] = [
        Screen::Dashboard,
        Screen::Patients,
        Screen::PatientDetail,
        Screen::AddPatient,
        Screen::EditPatient,
        Screen::NewAppointment,
        Screen::StartSession,
        Screen::Session,
        Screen::Appointments,
        Screen::Expenses,
        Screen::Reports,
    ];

    /// Stable screen id.
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::Patients => "patients",
            Screen::PatientDetail => "patient-detail",
            Screen::AddPatient => "add-patient",
            Screen::EditPatient => "edit-patient",
            Screen::NewAppointment => "new-appointment",
            Screen::StartSession => "start-session",
            Screen::Session => "session",
            Screen::Appointments => "appointments",
            Screen::Expenses => "expenses",
            Screen::Reports => "reports",
        }
    }

    /// Look up a screen by id.
    ///
    /// Unknown ids resolve to [`Screen::Patients`]; the patient list is the
    /// shell's default screen.
    pub fn from_id(id: &str) -> Screen {
        Screen::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .unwrap_or(Screen::Patients)
    }

    /// Page title, e.g. `"Patient Detail"`.
    pub fn title(&self) -> String {
        self.id()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What the shell should render right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Dashboard,
    PatientList,
    PatientDetail(&'a Patient),
    AddPatient,
    EditPatient(&'a Patient),
    NewAppointment,
    StartSession(&'a Patient),
    Session {
        patient: &'a Patient,
        session: &'a ActiveSession,
    },
    Appointments,
    Expenses,
    Reports,
}

impl View<'_> {
    /// The screen actually rendered, after any fallback.
    pub fn screen(&self) -> Screen {
        match self {
            View::Dashboard => Screen::Dashboard,
            View::PatientList => Screen::Patients,
            View::PatientDetail(_) => Screen::PatientDetail,
            View::AddPatient => Screen::AddPatient,
            View::EditPatient(_) => Screen::EditPatient,
            View::NewAppointment => Screen::NewAppointment,
            View::StartSession(_) => Screen::StartSession,
            View::Session { .. } => Screen::Session,
            View::Appointments => Screen::Appointments,
            View::Expenses => Screen::Expenses,
            View::Reports => Screen::Reports,
        }
    }
}

/// Shell navigation state.
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    active: Screen,
    selected_patient: Option<String>,
    active_session: Option<ActiveSession>,
    sidebar_open: bool,
}

impl ViewRouter {
    pub fn new(initial: Screen) -> Self {
        Self {
            active: initial,
            ..Default::default()
        }
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn selected_patient(&self) -> Option<&str> {
        self.selected_patient.as_deref()
    }

    pub fn active_session(&self) -> Option<&ActiveSession> {
        self.active_session.as_ref()
    }

    pub fn active_session_mut(&mut self) -> Option<&mut ActiveSession> {
        self.active_session.as_mut()
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Switch screens. Returns the screen left, if the active screen changed.
    ///
    /// Leaving the session workspace discards its draft; the session itself
    /// stays active until the shell returns to the patient list.
    pub fn navigate_to(&mut self, screen: Screen) -> Option<Screen> {
        if screen == self.active {
            return None;
        }

        let left = self.active;
        if left == Screen::Session {
            if let Some(session) = self.active_session.as_mut() {
                if !session.draft.is_empty() {
                    debug!(patient_id = %session.patient_id, "Discarding session draft");
                }
                session.draft = Default::default();
            }
        }

        debug!(from = left.id(), to = screen.id(), "Navigate");
        self.active = screen;
        Some(left)
    }

    /// Select a patient, then switch screens.
    pub fn select_patient_and_navigate(
        &mut self,
        patient_id: String,
        screen: Screen,
    ) -> Option<Screen> {
        self.selected_patient = Some(patient_id);
        self.navigate_to(screen)
    }

    /// Select a patient and open the session confirmation screen.
    pub fn start_session(&mut self, patient_id: String) -> Option<Screen> {
        self.select_patient_and_navigate(patient_id, Screen::StartSession)
    }

    /// Begin the session for the selected patient and open the workspace.
    ///
    /// Ignored when no patient is selected; returns whether a session started
    /// along with the screen left. An existing session is replaced, and the
    /// caller owns cancelling its pending work.
    pub fn confirm_session(&mut self, session_type: SessionType) -> (bool, Option<Screen>) {
        let Some(patient_id) = self.selected_patient.clone() else {
            warn!("Confirm session ignored: no patient selected");
            return (false, None);
        };

        debug!(%patient_id, session_type = session_type.as_str(), "Session started");
        self.active_session = Some(ActiveSession::new(patient_id, session_type));
        (true, self.navigate_to(Screen::Session))
    }

    /// Clear selection and session, then show the patient list.
    pub fn return_to_patients(&mut self) -> Option<Screen> {
        self.active_session = None;
        self.selected_patient = None;
        self.navigate_to(Screen::Patients)
    }

    /// Forget the selection if it refers to `patient_id`.
    ///
    /// Returns the screen left when the selection was cleared and the shell
    /// went back to the patient list.
    pub fn forget_patient(&mut self, patient_id: &str) -> Option<Option<Screen>> {
        let selected = self.selected_patient.as_deref() == Some(patient_id);
        let in_session = self
            .active_session
            .as_ref()
            .is_some_and(|s| s.patient_id == patient_id);

        if selected || in_session {
            Some(self.return_to_patients())
        } else {
            None
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Pick a menu entry: navigate and close the sidebar.
    pub fn select_menu_item(&mut self, item: &NavItem) -> Option<Screen> {
        self.close_sidebar();
        self.navigate_to(item.screen)
    }

    /// Resolve the active screen against the patient store.
    ///
    /// Screens that need a selected patient or an active session fall back
    /// to [`View::PatientList`] when it is absent or no longer stored.
    pub fn resolve<'a>(&'a self, patients: &'a PatientStore) -> View<'a> {
        let selected = move || {
            self.selected_patient
                .as_deref()
                .and_then(|id| patients.get(id))
        };

        match self.active {
            Screen::Dashboard => View::Dashboard,
            Screen::Patients => View::PatientList,
            Screen::PatientDetail => selected().map_or(View::PatientList, View::PatientDetail),
            Screen::AddPatient => View::AddPatient,
            Screen::EditPatient => selected().map_or(View::PatientList, View::EditPatient),
            Screen::NewAppointment => View::NewAppointment,
            Screen::StartSession => selected().map_or(View::PatientList, View::StartSession),
            Screen::Session => self
                .active_session
                .as_ref()
                .and_then(|session| {
                    patients
                        .get(&session.patient_id)
                        .map(|patient| View::Session { patient, session })
                })
                .unwrap_or(View::PatientList),
            Screen::Appointments => View::Appointments,
            Screen::Expenses => View::Expenses,
            Screen::Reports => View::Reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientForm;
    use chrono::NaiveDate;

    fn store_with_patient() -> (PatientStore, String) {
        let mut store = PatientStore::new();
        let id = store
            .add_or_update(
                &PatientForm {
                    name: "Sarah Johnson".into(),
                    age: "28".into(),
                    ..Default::default()
                },
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                SessionType::Remote,
            )
            .unwrap();
        (store, id)
    }

    #[test]
    fn test_screen_ids_roundtrip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_id(screen.id()), screen);
        }
    }

    #[test]
    fn test_unknown_id_falls_back_to_patients() {
        assert_eq!(Screen::from_id("billing"), Screen::Patients);
        assert_eq!(Screen::from_id(""), Screen::Patients);
    }

    #[test]
    fn test_title() {
        assert_eq!(Screen::PatientDetail.title(), "Patient Detail");
        assert_eq!(Screen::Dashboard.title(), "Dashboard");
    }

    #[test]
    fn test_detail_without_selection_falls_back() {
        let (store, _) = store_with_patient();
        for screen in [
            Screen::PatientDetail,
            Screen::EditPatient,
            Screen::StartSession,
            Screen::Session,
        ] {
            let mut router = ViewRouter::new(Screen::Dashboard);
            router.navigate_to(screen);
            assert_eq!(router.active(), screen);
            assert_eq!(router.resolve(&store), View::PatientList);
        }
    }

    #[test]
    fn test_select_and_view() {
        let (store, id) = store_with_patient();
        let mut router = ViewRouter::new(Screen::Patients);
        router.select_patient_and_navigate(id.clone(), Screen::PatientDetail);

        match router.resolve(&store) {
            View::PatientDetail(patient) => assert_eq!(patient.id, id),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_session_flow() {
        let (store, id) = store_with_patient();
        let mut router = ViewRouter::new(Screen::Patients);

        router.start_session(id.clone());
        assert_eq!(router.resolve(&store).screen(), Screen::StartSession);

        let (started, left) = router.confirm_session(SessionType::Remote);
        assert!(started);
        assert_eq!(left, Some(Screen::StartSession));
        match router.resolve(&store) {
            View::Session { patient, session } => {
                assert_eq!(patient.id, id);
                assert_eq!(session.session_type, SessionType::Remote);
            }
            other => panic!("unexpected view: {:?}", other),
        }

        router.return_to_patients();
        assert!(router.selected_patient().is_none());
        assert!(router.active_session().is_none());
        assert_eq!(router.active(), Screen::Patients);
    }

    #[test]
    fn test_confirm_without_selection_is_noop() {
        let mut router = ViewRouter::new(Screen::StartSession);
        let (started, left) = router.confirm_session(SessionType::InPerson);
        assert!(!started);
        assert!(left.is_none());
        assert!(router.active_session().is_none());
        assert_eq!(router.active(), Screen::StartSession);
    }

    #[test]
    fn test_leaving_session_discards_draft() {
        let (_, id) = store_with_patient();
        let mut router = ViewRouter::new(Screen::Patients);
        router.start_session(id);
        router.confirm_session(SessionType::InPerson);
        router
            .active_session_mut()
            .unwrap()
            .draft
            .mental_notes = "Discussed sleep".into();

        router.navigate_to(Screen::Expenses);
        router.navigate_to(Screen::Session);
        let session = router.active_session().unwrap();
        assert!(session.draft.mental_notes.is_empty());
    }

    #[test]
    fn test_navigate_same_screen() {
        let mut router = ViewRouter::new(Screen::Reports);
        assert_eq!(router.navigate_to(Screen::Reports), None);
        assert_eq!(router.navigate_to(Screen::Expenses), Some(Screen::Reports));
    }

    #[test]
    fn test_forget_patient() {
        let mut router = ViewRouter::new(Screen::Patients);
        router.select_patient_and_navigate("a".into(), Screen::PatientDetail);

        assert!(router.forget_patient("b").is_none());
        assert_eq!(router.selected_patient(), Some("a"));

        assert_eq!(router.forget_patient("a"), Some(Some(Screen::PatientDetail)));
        assert!(router.selected_patient().is_none());
        assert_eq!(router.active(), Screen::Patients);
    }
}
