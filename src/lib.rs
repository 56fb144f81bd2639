#![forbid(unsafe_code)]
//! Agenda — bibliothèque de réservation de rendez-vous locale (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Horaires hebdomadaires par entreprise, plages demi-ouvertes `[start, end)`.
//! - Créneaux disponibles au pas de 15 minutes, détection de conflits.
//! - Cycle de vie pending → confirmed/rejected/rescheduled.
//! - Heure locale de l'entreprise partout ; aucune conversion de fuseau.

pub mod engine;
pub mod hours;
pub mod io;
pub mod model;
pub mod notification;
pub mod storage;
pub mod timegrid;

pub use engine::{Agenda, BookingError, BookingRequest, ListFilter, Page};
pub use hours::{DaySchedule, HoursStore, Interval, SchedulePreset, WeekSchedule};
pub use model::{
    Appointment, AppointmentId, AppointmentStatus, BusinessHours, BusinessId, Ledger, Service,
    ServiceId,
};
pub use notification::{prepare_notice, Notice, NoticeRenderer, TextNotice};
pub use storage::{JsonStorage, Storage};
pub use timegrid::{minutes_to_time, time_to_minutes, TimeOfDay};
