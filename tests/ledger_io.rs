#![forbid(unsafe_code)]
use agenda::{
    engine::{Agenda, BookingRequest},
    hours::{DaySchedule, WeekSchedule},
    io,
    model::{AppointmentStatus, BusinessId},
    notification::{prepare_notice, TextNotice},
    storage::{JsonStorage, Storage},
    timegrid::TimeOfDay,
};
use chrono::{NaiveDate, Weekday};
use std::fs;
use tempfile::tempdir;

fn seeded_agenda() -> (Agenda, BusinessId) {
    let mut agenda = Agenda::new();
    let business = BusinessId::new("salon");

    let mut week = WeekSchedule::closed();
    *week.day_mut(Weekday::Mon) = DaySchedule::default_open();
    agenda.set_business_hours(business.clone(), week).unwrap();

    let service = agenda
        .add_service(business.clone(), "coupe", 30, 25.0)
        .unwrap();
    agenda
        .request_appointment(BookingRequest {
            business: business.clone(),
            service,
            client_name: "Alice".into(),
            client_email: "alice@example.com".into(),
            client_phone: "0600000000".into(),
            date: NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
            start: TimeOfDay::parse("10:00").unwrap(),
            observations: "première visite".into(),
        })
        .unwrap();
    (agenda, business)
}

#[test]
fn ledger_json_roundtrip_is_lossless() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    let (agenda, business) = seeded_agenda();

    let storage = JsonStorage::open(&path).unwrap();
    storage.save(agenda.ledger()).unwrap();
    let loaded = storage.load().unwrap();

    assert_eq!(loaded.services.len(), 1);
    assert_eq!(loaded.hours.len(), 1);
    assert_eq!(loaded.appointments.len(), 1);
    let appt = &loaded.appointments[0];
    assert_eq!(appt.business, business);
    assert_eq!(appt.status, AppointmentStatus::Pending);
    assert_eq!(appt.start, TimeOfDay::parse("10:00").unwrap());
    assert_eq!(appt.end, TimeOfDay::parse("10:30").unwrap());
}

#[test]
fn missing_ledger_file_loads_as_empty() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
    let ledger = storage.load_or_default().unwrap();
    assert!(ledger.appointments.is_empty());
    assert!(storage.load().is_err());
}

#[test]
fn services_csv_import_validates_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("services.csv");
    fs::write(
        &path,
        "name,duration_minutes,price\ncoupe,30,25.0\ncouleur,120,60\n",
    )
    .unwrap();

    let business = BusinessId::new("salon");
    let services = io::import_services_csv(&path, &business).unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0].name, "coupe");
    assert_eq!(services[1].duration_minutes, 120);

    // Durée nulle refusée.
    fs::write(&path, "name,duration_minutes,price\nexpress,0,5\n").unwrap();
    assert!(io::import_services_csv(&path, &business).is_err());
}

#[test]
fn appointments_csv_export_contains_one_row_per_appointment() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("appointments.csv");
    let (agenda, business) = seeded_agenda();

    io::export_appointments_csv(&path, agenda.ledger(), &business).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,date,start,end,status,client_name,service")
    );
    let row = lines.next().unwrap();
    assert!(row.contains("2025-10-06"));
    assert!(row.contains("10:00"));
    assert!(row.contains("pending"));
    assert!(row.contains("coupe"));
}

#[test]
fn notice_follows_appointment_status() {
    let (mut agenda, business) = seeded_agenda();
    let id = agenda.ledger().appointments[0].id.clone();

    let renderer = TextNotice;
    let notice = prepare_notice(agenda.ledger(), id.as_str(), &renderer).unwrap();
    assert_eq!(notice.client_email, "alice@example.com");
    assert!(notice.content.contains("awaiting confirmation"));

    agenda
        .reject_appointment(&business, &id, "salon closed that day")
        .unwrap();
    let notice = prepare_notice(agenda.ledger(), id.as_str(), &renderer).unwrap();
    assert!(notice.content.contains("could not be accepted"));
    assert!(notice.content.contains("salon closed that day"));
}

#[test]
fn notice_for_unknown_appointment_fails() {
    let (agenda, _) = seeded_agenda();
    assert!(prepare_notice(agenda.ledger(), "nope", &TextNotice).is_err());
}
