mod availability;
mod conflicts;
mod lifecycle;
mod types;

pub use lifecycle::BookingRequest;
pub use types::{BookingError, ListFilter, Page};

use crate::hours::WeekSchedule;
use crate::model::{
    Appointment, AppointmentId, BusinessHours, BusinessId, Ledger, Service, ServiceId,
};
use crate::timegrid::TimeOfDay;
use chrono::{NaiveDate, NaiveDateTime};

/// Agenda : encapsule le registre des entreprises et applique les règles de
/// réservation. Chaque opération valide puis écrit sous un même emprunt
/// exclusif ; il n'y a pas de fenêtre entre contrôle et écriture en
/// processus. Entre processus, la persistance JSON reste dernier-écrivain-
/// gagnant.
#[derive(Debug, Default)]
pub struct Agenda {
    ledger: Ledger,
}

impl Agenda {
    pub fn new() -> Self {
        Self {
            ledger: Ledger::default(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Ajoute un service au catalogue d'une entreprise.
    pub fn add_service(
        &mut self,
        business: BusinessId,
        name: &str,
        duration_minutes: u32,
        price: f64,
    ) -> Result<ServiceId, BookingError> {
        let service = Service::new(business, name, duration_minutes, price)
            .map_err(BookingError::InvalidInput)?;
        let id = service.id.clone();
        self.ledger.services.push(service);
        Ok(id)
    }

    /// Remplace les horaires hebdomadaires d'une entreprise après validation.
    pub fn set_business_hours(
        &mut self,
        business: BusinessId,
        mut week: WeekSchedule,
    ) -> Result<(), BookingError> {
        week.validate()
            .map_err(|err| BookingError::InvalidInput(err.to_string()))?;
        week.normalize();
        match self.ledger.hours.iter_mut().find(|h| h.business == business) {
            Some(existing) => existing.week = week,
            None => self.ledger.hours.push(BusinessHours { business, week }),
        }
        Ok(())
    }

    /// Horaires d'une entreprise ; `HoursNotConfigured` si jamais renseignés
    /// (distinct d'une semaine entièrement fermée).
    pub fn business_hours(&self, business: &BusinessId) -> Result<&WeekSchedule, BookingError> {
        self.ledger
            .find_hours(business)
            .map(|h| &h.week)
            .ok_or(BookingError::HoursNotConfigured)
    }

    /// Enregistre une demande de rendez-vous (statut `pending`) après
    /// validation des horaires et des conflits.
    pub fn request_appointment(
        &mut self,
        req: BookingRequest,
    ) -> Result<AppointmentId, BookingError> {
        lifecycle::request_appointment(self, req)
    }

    /// `pending → confirmed`, sans revalidation du créneau.
    pub fn confirm_appointment(
        &mut self,
        business: &BusinessId,
        id: &AppointmentId,
    ) -> Result<&Appointment, BookingError> {
        let id = lifecycle::apply_transition(self, business, id, lifecycle::Transition::Confirm)?;
        self.expect_appointment(business, &id)
    }

    /// `pending → rejected` ; le créneau est libéré immédiatement.
    pub fn reject_appointment(
        &mut self,
        business: &BusinessId,
        id: &AppointmentId,
        reason: &str,
    ) -> Result<&Appointment, BookingError> {
        let id = lifecycle::apply_transition(
            self,
            business,
            id,
            lifecycle::Transition::Reject {
                reason: reason.to_string(),
            },
        )?;
        self.expect_appointment(business, &id)
    }

    /// `pending → rescheduled` : propose une nouvelle date/heure, revalidée
    /// contre les horaires et les conflits avant toute mutation.
    pub fn reschedule_appointment(
        &mut self,
        business: &BusinessId,
        id: &AppointmentId,
        suggested_date: NaiveDate,
        suggested_start: TimeOfDay,
    ) -> Result<&Appointment, BookingError> {
        let id = lifecycle::apply_transition(
            self,
            business,
            id,
            lifecycle::Transition::Reschedule {
                date: suggested_date,
                start: suggested_start,
            },
        )?;
        self.expect_appointment(business, &id)
    }

    /// Liste paginée des rendez-vous, filtrable par statut et par date.
    pub fn list_appointments<'a>(
        &'a self,
        business: &BusinessId,
        filter: &ListFilter,
        page: usize,
        limit: usize,
    ) -> Page<&'a Appointment> {
        lifecycle::list_appointments(self, business, filter, page, limit)
    }

    /// Heures de début réservables pour un service à une date donnée.
    pub fn available_slots(
        &self,
        business: &BusinessId,
        date: NaiveDate,
        service: &ServiceId,
        now: NaiveDateTime,
    ) -> Result<Vec<TimeOfDay>, BookingError> {
        availability::available_slots(self, business, date, service, now)
    }

    fn expect_appointment(
        &self,
        business: &BusinessId,
        id: &AppointmentId,
    ) -> Result<&Appointment, BookingError> {
        self.ledger
            .find_appointment(business, id)
            .ok_or_else(|| BookingError::UnknownAppointment(id.as_str().to_string()))
    }
}
