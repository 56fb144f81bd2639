use super::{conflicts, Agenda, BookingError};
use crate::model::{BusinessId, ServiceId};
use crate::timegrid::TimeOfDay;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Pas d'énumération des créneaux candidats.
const STEP_MINUTES: u16 = 15;

/// Énumère les heures de début réservables pour `service` à la date donnée,
/// en ordre croissant. Lecture seule et déterministe à entrées égales.
///
/// Les rendez-vous non rejetés comptent tous comme occupés, y compris les
/// reports (`rescheduled`) sur leur créneau d'origine. Pour la date du jour,
/// les candidats déjà passés par rapport à `now` sont filtrés ; les dates
/// futures ne le sont jamais.
pub(super) fn available_slots(
    agenda: &Agenda,
    business: &BusinessId,
    date: NaiveDate,
    service: &ServiceId,
    now: NaiveDateTime,
) -> Result<Vec<TimeOfDay>, BookingError> {
    let ledger = agenda.ledger();

    let service = ledger
        .find_service(business, service)
        .ok_or_else(|| BookingError::UnknownService(service.as_str().to_string()))?;
    let hours = ledger
        .find_hours(business)
        .ok_or(BookingError::HoursNotConfigured)?;

    let day = hours.week.day(date.weekday());
    let duration = service.duration_minutes;

    // Créneaux occupés du jour : tout sauf `rejected`, sur la plage stockée.
    let booked: Vec<(TimeOfDay, TimeOfDay)> = ledger
        .appointments
        .iter()
        .filter(|a| {
            &a.business == business
                && a.date == date
                && a.status != crate::model::AppointmentStatus::Rejected
        })
        .map(|a| (a.start, a.end))
        .collect();

    let is_today = date == now.date();

    let mut out = Vec::new();
    for interval in day.open_intervals() {
        let mut candidate = interval.start;
        loop {
            let end = match candidate.plus_minutes(duration) {
                Some(end) if end <= interval.end => end,
                _ => break,
            };

            if is_today && date.and_time(candidate.to_naive()) < now {
                match candidate.plus_minutes(u32::from(STEP_MINUTES)) {
                    Some(next) => {
                        candidate = next;
                        continue;
                    }
                    None => break,
                }
            }

            let taken = booked
                .iter()
                .any(|&(b_start, b_end)| conflicts::overlaps(candidate, end, b_start, b_end));
            if !taken {
                out.push(candidate);
            }

            match candidate.plus_minutes(u32::from(STEP_MINUTES)) {
                Some(next) => candidate = next,
                None => break,
            }
        }
    }

    // Ordre croissant garanti même si les plages du registre ne sont pas triées.
    out.sort_unstable();
    Ok(out)
}
