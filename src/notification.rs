use crate::model::{Appointment, AppointmentStatus, Ledger, Service};
use anyhow::{bail, Context, Result};

/// Message prêt à l'envoi pour le client d'un rendez-vous.
#[derive(Debug, Clone)]
pub struct Notice {
    pub appointment_id: String,
    pub client_email: String,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, SMS, etc.).
pub trait NoticeRenderer {
    fn render(&self, appointment: &Appointment, service: &Service) -> String;
}

/// Gabarit texte simple destiné à un futur mail/SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn render(&self, appointment: &Appointment, service: &Service) -> String {
        let header = format!(
            "Hello {name},\n\nYour booking for \"{service}\" on {date} at {start} ",
            name = appointment.client_name,
            service = service.name,
            date = appointment.date,
            start = appointment.start,
        );
        match appointment.status {
            AppointmentStatus::Pending => {
                format!("{header}is awaiting confirmation by the business.\n")
            }
            AppointmentStatus::Confirmed => format!("{header}is confirmed. See you there!\n"),
            AppointmentStatus::Rejected => {
                let reason = appointment
                    .rejection_reason
                    .as_deref()
                    .unwrap_or("no reason given");
                format!("{header}could not be accepted ({reason}).\n")
            }
            AppointmentStatus::Rescheduled => {
                let date = appointment
                    .suggested_date
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                let start = appointment
                    .suggested_start
                    .map(|t| t.to_string())
                    .unwrap_or_default();
                format!(
                    "{header}cannot be kept as requested. The business suggests {date} at {start} instead; please confirm or pick another slot.\n"
                )
            }
        }
    }
}

/// Prépare le message correspondant à l'état courant d'un rendez-vous.
pub fn prepare_notice(
    ledger: &Ledger,
    appointment_id: &str,
    renderer: &dyn NoticeRenderer,
) -> Result<Notice> {
    let appointment = ledger
        .appointments
        .iter()
        .find(|a| a.id.as_str() == appointment_id)
        .with_context(|| format!("unknown appointment: {appointment_id}"))?;

    let Some(service) = ledger.services.iter().find(|s| s.id == appointment.service) else {
        bail!("appointment references a missing service");
    };

    let content = renderer.render(appointment, service);
    Ok(Notice {
        appointment_id: appointment.id.as_str().to_string(),
        client_email: appointment.client_email.clone(),
        content,
    })
}
