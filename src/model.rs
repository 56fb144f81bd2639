use crate::hours::WeekSchedule;
use crate::timegrid::TimeOfDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Business
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessId(String);

impl BusinessId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Appointment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentId(String);

impl AppointmentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Prestation proposée par une entreprise (durée fixe, prix indicatif).
///
/// La durée est copiée dans chaque rendez-vous au moment de la réservation ;
/// la modifier ensuite ne déplace jamais l'historique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub business: BusinessId,
    pub name: String,
    pub duration_minutes: u32,
    pub price: f64,
}

impl Service {
    /// Crée un service en validant `duration_minutes > 0` et `price >= 0`.
    pub fn new<N: Into<String>>(
        business: BusinessId,
        name: N,
        duration_minutes: u32,
        price: f64,
    ) -> Result<Self, String> {
        if duration_minutes == 0 {
            return Err("service duration must be positive".to_string());
        }
        if price.is_nan() || price < 0.0 {
            return Err("service price must be zero or positive".to_string());
        }
        Ok(Self {
            id: ServiceId::random(),
            business,
            name: name.into(),
            duration_minutes,
            price,
        })
    }
}

/// Horaires hebdomadaires d'une entreprise (un enregistrement par entreprise,
/// remplacé à la mise à jour, jamais supprimé).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub business: BusinessId,
    pub week: WeekSchedule,
}

/// Statut de cycle de vie d'un rendez-vous.
///
/// `Pending` et `Confirmed` occupent leur créneau de manière exclusive.
/// `Rescheduled` est une proposition en attente de re-réservation côté
/// client : le détecteur de conflits l'ignore, mais le scan de disponibilité
/// compte encore son créneau d'origine comme pris (la requête des créneaux
/// réservés n'exclut que `Rejected`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Rejected,
    Rescheduled,
}

impl AppointmentStatus {
    /// Vrai tant que le rendez-vous occupe `[start, end)` exclusivement.
    pub fn blocks_slot(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Rescheduled => "rescheduled",
        }
    }
}

/// Demande de rendez-vous et son issue, conservée pour l'historique.
///
/// `end` est dérivé de la durée du service au moment de la création puis
/// stocké ; il n'est jamais recalculé depuis un service éventuellement édité.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub business: BusinessId,
    pub service: ServiceId,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub observations: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_start: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_end: Option<TimeOfDay>,
}

impl Appointment {
    /// Durée réservée en minutes, telle que figée à la création.
    pub fn duration_minutes(&self) -> u32 {
        self.end.since(self.start)
    }
}

/// Jeu de données complet : services, horaires et rendez-vous de toutes les
/// entreprises connues de ce registre.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Ledger {
    pub services: Vec<Service>,
    pub hours: Vec<BusinessHours>,
    pub appointments: Vec<Appointment>,
}

impl Ledger {
    /// Recherche d'un service restreinte à son propriétaire : un service
    /// d'une autre entreprise est traité comme absent.
    pub fn find_service<'a>(
        &'a self,
        business: &BusinessId,
        service: &ServiceId,
    ) -> Option<&'a Service> {
        self.services
            .iter()
            .find(|s| &s.id == service && &s.business == business)
    }

    pub fn find_hours<'a>(&'a self, business: &BusinessId) -> Option<&'a BusinessHours> {
        self.hours.iter().find(|h| &h.business == business)
    }

    pub fn find_appointment<'a>(
        &'a self,
        business: &BusinessId,
        id: &AppointmentId,
    ) -> Option<&'a Appointment> {
        self.appointments
            .iter()
            .find(|a| &a.id == id && &a.business == business)
    }

    pub fn find_appointment_mut(
        &mut self,
        business: &BusinessId,
        id: &AppointmentId,
    ) -> Option<&mut Appointment> {
        self.appointments
            .iter_mut()
            .find(|a| &a.id == id && &a.business == business)
    }
}
