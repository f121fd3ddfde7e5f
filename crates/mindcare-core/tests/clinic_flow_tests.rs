//! End-to-end clinic flows driven through `App::dispatch`.

use chrono::{NaiveDate, NaiveTime};
use mindcare_core::models::{Appointment, PatientForm, TransactionForm};
use mindcare_core::{
    Action, App, AppointmentStatus, DraftField, Effect, Gender, Screen, SessionType,
    TransactionKind, View,
};
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

fn setup_app() -> App {
    App::default().with_today(today())
}

fn save(app: &mut App, form: PatientForm) -> String {
    match app.dispatch(Action::SavePatient { form }).unwrap() {
        Effect::PatientSaved { id } => id,
        other => panic!("unexpected effect: {:?}", other),
    }
}

fn ann() -> PatientForm {
    PatientForm {
        name: "Ann".to_string(),
        age: "40".to_string(),
        gender: "female".to_string(),
        phone: "555-1111".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_add_patient_scenario() {
    let mut app = setup_app();
    let id = save(&mut app, ann());

    let patient = app.patients().get(&id).unwrap();
    assert!(!patient.id.is_empty());
    assert_eq!(patient.name, "Ann");
    assert_eq!(patient.age, 40);
    assert_eq!(patient.gender, Gender::Female);
    assert_eq!(patient.phone, "555-1111");
    assert_eq!(patient.total_sessions, 0);
    assert_eq!(app.view(), View::PatientList);
}

#[test]
fn test_edit_keeps_session_tracking() {
    let mut app = setup_app();
    let id = save(&mut app, ann());

    app.dispatch(Action::StartSession {
        patient_id: id.clone(),
    })
    .unwrap();
    app.dispatch(Action::ConfirmSession {
        session_type: SessionType::Remote,
    })
    .unwrap();
    app.dispatch(Action::CompleteSession).unwrap();

    app.dispatch(Action::EditPatient {
        patient_id: id.clone(),
    })
    .unwrap();
    let mut form = app.edit_form().unwrap();
    form.phone = "555-2222".to_string();
    save(&mut app, form);

    let patient = app.patients().get(&id).unwrap();
    assert_eq!(patient.phone, "555-2222");
    assert_eq!(patient.total_sessions, 1);
    assert_eq!(patient.session_type, SessionType::Remote);
    assert_eq!(app.patients().len(), 1);
}

#[test]
fn test_mark_appointment_missed() {
    let mut app = setup_app();
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    for (id, name) in [("1", "Sarah Johnson"), ("2", "Michael Chen")] {
        app.insert_appointment(Appointment::new(
            id,
            name,
            date,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            SessionType::InPerson,
        ))
        .unwrap();
    }

    app.dispatch(Action::SetAppointmentStatus {
        appointment_id: "1".to_string(),
        status: AppointmentStatus::Missed,
    })
    .unwrap();

    assert_eq!(
        app.appointments().get("1").unwrap().status,
        AppointmentStatus::Missed
    );
    assert_eq!(
        app.appointments().get("2").unwrap().status,
        AppointmentStatus::Scheduled
    );
}

#[test]
fn test_add_expense_scenario() {
    let mut app = setup_app();
    let before = app.ledger().total_expenses();

    app.dispatch(Action::EditTransactionForm {
        form: TransactionForm {
            kind: TransactionKind::Expense,
            amount: "75.50".to_string(),
            description: "Printer".to_string(),
            category: "Equipment".to_string(),
            date: "2024-02-01".to_string(),
        },
    })
    .unwrap();
    let effect = app.dispatch(Action::SubmitTransaction).unwrap();
    assert!(matches!(effect, Effect::TransactionAdded { .. }));

    let head = &app.ledger().list()[0];
    assert_eq!(head.kind, TransactionKind::Expense);
    assert_eq!(head.amount, Decimal::new(7550, 2));
    assert_eq!(head.description, "Printer");
    assert_eq!(head.category, "Equipment");
    assert_eq!(head.date, today());
    assert_eq!(
        app.ledger().total_expenses() - before,
        Decimal::new(7550, 2)
    );
}

#[test]
fn test_missing_description_leaves_ledger_unchanged() {
    let mut app = setup_app();
    app.dispatch(Action::EditTransactionForm {
        form: TransactionForm {
            amount: "20".to_string(),
            ..TransactionForm::new("Other", today())
        },
    })
    .unwrap();

    assert!(app.dispatch(Action::SubmitTransaction).is_err());
    assert!(app.ledger().is_empty());
}

#[test]
fn test_delete_selected_patient_returns_to_list() {
    let mut app = setup_app();
    let id = save(&mut app, ann());
    app.dispatch(Action::ViewPatient {
        patient_id: id.clone(),
    })
    .unwrap();
    assert_eq!(app.view().screen(), Screen::PatientDetail);

    let effect = app
        .dispatch(Action::RequestDelete {
            patient_id: id.clone(),
        })
        .unwrap();
    assert!(matches!(effect, Effect::Confirm(_)));
    app.dispatch(Action::ConfirmDelete { patient_id: id }).unwrap();

    assert!(app.router().selected_patient().is_none());
    assert_eq!(app.view(), View::PatientList);
}

#[test]
fn test_cancelled_delete_keeps_patient() {
    let mut app = setup_app();
    let id = save(&mut app, ann());

    app.dispatch(Action::RequestDelete {
        patient_id: id.clone(),
    })
    .unwrap();
    app.dispatch(Action::CancelConfirmation).unwrap();

    assert!(app.dispatch(Action::ConfirmDelete { patient_id: id }).is_err());
    assert_eq!(app.patients().len(), 1);
}

#[test]
fn test_detail_screens_without_selection_fall_back() {
    let mut app = setup_app();
    for screen in [
        Screen::PatientDetail,
        Screen::EditPatient,
        Screen::StartSession,
        Screen::Session,
    ] {
        app.dispatch(Action::Navigate { screen }).unwrap();
        assert_eq!(app.view(), View::PatientList);
    }
}

#[test]
fn test_session_workspace_flow() {
    let mut app = setup_app();
    let id = save(&mut app, ann());

    app.dispatch(Action::StartSession {
        patient_id: id.clone(),
    })
    .unwrap();
    app.dispatch(Action::ConfirmSession {
        session_type: SessionType::Remote,
    })
    .unwrap();

    app.dispatch(Action::EditDraft {
        field: DraftField::MentalNotes,
        value: "Sleep improving".to_string(),
    })
    .unwrap();
    app.dispatch(Action::ToggleRecording { now_ms: 0 }).unwrap();
    app.dispatch(Action::ToggleRecording { now_ms: 500 }).unwrap();
    app.dispatch(Action::UploadPrescription {
        file_name: "rx.png".to_string(),
        now_ms: 500,
    })
    .unwrap();

    assert_eq!(
        app.dispatch(Action::Tick { now_ms: 2500 }).unwrap(),
        Effect::Applied(2)
    );
    app.dispatch(Action::SendPrescription).unwrap();

    let draft = &app.router().active_session().unwrap().draft;
    assert_eq!(draft.voice_transcript, "[Voice note 1 recorded]");
    assert!(draft.prescription_sent);

    let effect = app.dispatch(Action::CompleteSession).unwrap();
    assert_eq!(
        effect,
        Effect::SessionCompleted {
            patient_id: id.clone(),
            total_sessions: 1
        }
    );
    assert_eq!(app.records().visits(&id)[0].notes, "Sleep improving");
    assert!(app.router().active_session().is_none());
}

#[test]
fn test_leaving_screen_drops_pending_upload() {
    let mut app = setup_app();
    let id = save(&mut app, ann());
    let rx = match app
        .dispatch(Action::AddPrescription {
            patient_id: id.clone(),
            name: "Sertraline".to_string(),
            dosage: "50mg".to_string(),
            frequency: "Once daily".to_string(),
        })
        .unwrap()
    {
        Effect::PrescriptionAdded { id } => id,
        other => panic!("unexpected effect: {:?}", other),
    };

    app.dispatch(Action::ViewPatient {
        patient_id: id.clone(),
    })
    .unwrap();
    app.dispatch(Action::UploadMedicineImage {
        patient_id: id.clone(),
        prescription_id: rx.clone(),
        now_ms: 0,
    })
    .unwrap();
    assert!(app.is_uploading(&rx));

    app.dispatch(Action::MenuSelect {
        id: "reports".to_string(),
    })
    .unwrap();
    assert_eq!(
        app.dispatch(Action::Tick { now_ms: 10_000 }).unwrap(),
        Effect::Applied(0)
    );
    assert!(app.records().prescriptions(&id)[0].image.is_none());
}

#[test]
fn test_reports_follow_live_data() {
    let mut app = setup_app();
    let id = save(&mut app, ann());
    app.add_transaction(&TransactionForm {
        amount: "120".to_string(),
        description: "Session - Ann".to_string(),
        ..TransactionForm::new("Session Fee", today())
    })
    .unwrap();

    app.start_session(&id);
    app.confirm_session(SessionType::InPerson);
    assert_eq!(app.dashboard().active_sessions, 1);
    app.complete_session().unwrap();

    let dashboard = app.dashboard();
    assert_eq!(dashboard.total_patients, 1);
    assert_eq!(dashboard.active_sessions, 0);
    assert_eq!(dashboard.monthly_revenue, Decimal::new(120, 0));

    let report = app.report();
    assert_eq!(report.completed_sessions, 1);
    assert_eq!(report.average_session_value, Some(Decimal::new(12000, 2)));
}
