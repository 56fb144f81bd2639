use crate::hours::DaySchedule;
use crate::model::{AppointmentId, BusinessId, Ledger};
use crate::timegrid::TimeOfDay;
use chrono::NaiveDate;

/// Chevauchement de deux plages demi-ouvertes `[a_start, a_end)` et
/// `[b_start, b_end)`. Des plages adjacentes ne se chevauchent pas.
pub(super) fn overlaps(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Vrai si `[start, end)` tient entièrement dans UNE plage d'ouverture du
/// jour. Une plage candidate à cheval sur deux plages contiguës est refusée.
pub(super) fn fits_business_hours(day: &DaySchedule, start: TimeOfDay, end: TimeOfDay) -> bool {
    day.open_intervals()
        .iter()
        .any(|interval| interval.contains(start, end))
}

/// Vrai si un autre rendez-vous bloquant (pending ou confirmed) de la même
/// entreprise, à la même date, chevauche `[start, end)`.
///
/// `exclude` permet à une proposition de report d'ignorer le rendez-vous
/// qu'elle déplace. Le prédicat est symétrique : échanger la plage candidate
/// et la plage existante ne change pas le résultat.
pub(super) fn has_time_conflict(
    ledger: &Ledger,
    business: &BusinessId,
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
    exclude: Option<&AppointmentId>,
) -> bool {
    ledger.appointments.iter().any(|appt| {
        &appt.business == business
            && appt.date == date
            && appt.status.blocks_slot()
            && exclude != Some(&appt.id)
            && overlaps(appt.start, appt.end, start, end)
    })
}
