use crate::model::AppointmentStatus;
use chrono::NaiveDate;
use thiserror::Error;

/// Erreurs typées du moteur de réservation.
///
/// `OutOfHours` et `SlotTaken` restent distincts : l'appelant s'en sert pour
/// proposer des alternatives via `available_slots`.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("unknown service: {0}")]
    UnknownService(String),
    #[error("unknown appointment: {0}")]
    UnknownAppointment(String),
    #[error("business hours not configured")]
    HoursNotConfigured,
    #[error("requested range falls outside business hours")]
    OutOfHours,
    #[error("requested range overlaps an existing appointment")]
    SlotTaken,
    #[error("appointment is {}, only pending appointments can transition", .0.as_str())]
    NotPending(AppointmentStatus),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Filtre optionnel pour le listing des rendez-vous d'une entreprise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
}

/// Page de résultats (pages numérotées à partir de 1).
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit)
        }
    }
}
