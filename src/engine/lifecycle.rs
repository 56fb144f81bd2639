use super::{conflicts, Agenda, BookingError, ListFilter, Page};
use crate::model::{
    Appointment, AppointmentId, AppointmentStatus, BusinessId, ServiceId,
};
use crate::timegrid::TimeOfDay;
use chrono::{Datelike, NaiveDate};

/// Demande de réservation telle que soumise par un client.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub business: BusinessId,
    pub service: ServiceId,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub observations: String,
}

/// Transition demandée par l'entreprise sur un rendez-vous `pending`.
#[derive(Debug, Clone)]
pub(super) enum Transition {
    Confirm,
    Reject { reason: String },
    Reschedule { date: NaiveDate, start: TimeOfDay },
}

/// Valide puis enregistre une demande de rendez-vous (statut `pending`).
///
/// Le créneau `[start, start + durée_service)` doit tenir dans une plage
/// d'ouverture du jour et ne chevaucher aucun rendez-vous bloquant.
pub(super) fn request_appointment(
    agenda: &mut Agenda,
    req: BookingRequest,
) -> Result<AppointmentId, BookingError> {
    let ledger = agenda.ledger();

    let service = ledger
        .find_service(&req.business, &req.service)
        .ok_or_else(|| BookingError::UnknownService(req.service.as_str().to_string()))?;
    let duration = service.duration_minutes;

    let end = req
        .start
        .plus_minutes(duration)
        .ok_or(BookingError::OutOfHours)?;

    let hours = ledger
        .find_hours(&req.business)
        .ok_or(BookingError::HoursNotConfigured)?;
    let day = hours.week.day(req.date.weekday());

    if !conflicts::fits_business_hours(day, req.start, end) {
        return Err(BookingError::OutOfHours);
    }
    if conflicts::has_time_conflict(ledger, &req.business, req.date, req.start, end, None) {
        return Err(BookingError::SlotTaken);
    }

    let appointment = Appointment {
        id: AppointmentId::random(),
        business: req.business,
        service: req.service,
        client_name: req.client_name,
        client_email: req.client_email,
        client_phone: req.client_phone,
        date: req.date,
        start: req.start,
        end,
        status: AppointmentStatus::Pending,
        observations: req.observations,
        rejection_reason: None,
        suggested_date: None,
        suggested_start: None,
        suggested_end: None,
    };
    let id = appointment.id.clone();

    #[cfg(feature = "logging")]
    tracing::info!(appointment = id.as_str(), date = %appointment.date, start = %appointment.start, "appointment requested");

    agenda.ledger_mut().appointments.push(appointment);
    Ok(id)
}

/// Point unique de contrôle des transitions : seule une demande `pending`
/// peut être confirmée, refusée ou reportée.
pub(super) fn apply_transition(
    agenda: &mut Agenda,
    business: &BusinessId,
    id: &AppointmentId,
    transition: Transition,
) -> Result<AppointmentId, BookingError> {
    let current = agenda
        .ledger()
        .find_appointment(business, id)
        .ok_or_else(|| BookingError::UnknownAppointment(id.as_str().to_string()))?
        .status;
    if current != AppointmentStatus::Pending {
        return Err(BookingError::NotPending(current));
    }

    // Un report est revalidé avant toute mutation : en cas d'échec le
    // rendez-vous reste `pending`, sans champs de suggestion.
    let suggestion = match &transition {
        Transition::Reschedule { date, start } => {
            Some(validate_suggestion(agenda, business, id, *date, *start)?)
        }
        _ => None,
    };

    let appt = agenda
        .ledger_mut()
        .find_appointment_mut(business, id)
        .ok_or_else(|| BookingError::UnknownAppointment(id.as_str().to_string()))?;

    match transition {
        // Pas de revalidation : le créneau a été validé à la création et la
        // politique est « dernière confirmation gagne ».
        Transition::Confirm => {
            appt.status = AppointmentStatus::Confirmed;
        }
        Transition::Reject { reason } => {
            appt.status = AppointmentStatus::Rejected;
            appt.rejection_reason = Some(reason);
        }
        Transition::Reschedule { date, start } => {
            let suggested_end = suggestion.unwrap_or(appt.end);
            appt.status = AppointmentStatus::Rescheduled;
            appt.suggested_date = Some(date);
            appt.suggested_start = Some(start);
            appt.suggested_end = Some(suggested_end);
        }
    }

    #[cfg(feature = "logging")]
    tracing::info!(appointment = appt.id.as_str(), status = appt.status.as_str(), "appointment transition");

    Ok(appt.id.clone())
}

/// Valide la plage suggérée d'un report : durée du rendez-vous d'origine,
/// horaires d'ouverture, absence de conflit (en s'excluant soi-même).
fn validate_suggestion(
    agenda: &Agenda,
    business: &BusinessId,
    id: &AppointmentId,
    date: NaiveDate,
    start: TimeOfDay,
) -> Result<TimeOfDay, BookingError> {
    let ledger = agenda.ledger();
    let appt = ledger
        .find_appointment(business, id)
        .ok_or_else(|| BookingError::UnknownAppointment(id.as_str().to_string()))?;

    let end = start
        .plus_minutes(appt.duration_minutes())
        .ok_or(BookingError::OutOfHours)?;

    let hours = ledger
        .find_hours(business)
        .ok_or(BookingError::HoursNotConfigured)?;
    if !conflicts::fits_business_hours(hours.week.day(date.weekday()), start, end) {
        return Err(BookingError::OutOfHours);
    }
    if conflicts::has_time_conflict(ledger, business, date, start, end, Some(id)) {
        return Err(BookingError::SlotTaken);
    }
    Ok(end)
}

/// Liste paginée des rendez-vous d'une entreprise, triée par (date, début).
pub(super) fn list_appointments<'a>(
    agenda: &'a Agenda,
    business: &BusinessId,
    filter: &ListFilter,
    page: usize,
    limit: usize,
) -> Page<&'a Appointment> {
    let mut matching: Vec<&Appointment> = agenda
        .ledger()
        .appointments
        .iter()
        .filter(|a| &a.business == business)
        .filter(|a| filter.status.map_or(true, |s| a.status == s))
        .filter(|a| filter.date.map_or(true, |d| a.date == d))
        .collect();
    matching.sort_by_key(|a| (a.date, a.start));

    let total = matching.len();
    let page = page.max(1);
    let items = if limit == 0 {
        Vec::new()
    } else {
        matching
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect()
    };

    Page {
        items,
        total,
        page,
        limit,
    }
}
