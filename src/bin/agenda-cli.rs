#![forbid(unsafe_code)]
use agenda::{
    engine::{Agenda, BookingRequest, ListFilter},
    hours::HoursStore,
    io,
    model::{AppointmentId, AppointmentStatus, BusinessId, ServiceId},
    notification::{prepare_notice, TextNotice},
    storage::{JsonStorage, Storage},
    timegrid::TimeOfDay,
    WeekSchedule,
};
use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de réservation de rendez-vous (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du registre
    #[arg(long, global = true, default_value = "ledger.json")]
    ledger: String,

    /// Identifiant de l'entreprise concernée
    #[arg(long, global = true, default_value = "default")]
    business: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un service au catalogue
    AddService {
        #[arg(long)]
        name: String,
        #[arg(long)]
        duration_minutes: u32,
        #[arg(long, default_value_t = 0.0)]
        price: f64,
    },

    /// Importer des services depuis un CSV
    ImportServices {
        #[arg(long)]
        csv: String,
    },

    /// Définir les horaires hebdomadaires (JSON ou gabarit enregistré)
    SetHours {
        /// Fichier JSON contenant un WeekSchedule
        #[arg(long, conflicts_with = "preset")]
        file: Option<String>,
        /// Nom d'un gabarit du répertoire --presets
        #[arg(long)]
        preset: Option<String>,
        #[arg(long, default_value = "presets")]
        presets: String,
    },

    /// Afficher les horaires hebdomadaires
    Hours,

    /// Demander un rendez-vous (créé `pending`)
    Book {
        #[arg(long)]
        service: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// AAAA-MM-JJ
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
        #[arg(long, default_value = "")]
        observations: String,
    },

    /// Lister les créneaux disponibles pour un service à une date
    Slots {
        #[arg(long)]
        service: String,
        /// AAAA-MM-JJ
        #[arg(long)]
        date: String,
    },

    /// Lister les rendez-vous, avec filtres et pagination
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Confirmer un rendez-vous `pending`
    Confirm {
        #[arg(long)]
        id: String,
    },

    /// Refuser un rendez-vous `pending`
    Reject {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Proposer une nouvelle date/heure pour un rendez-vous `pending`
    Reschedule {
        #[arg(long)]
        id: String,
        /// AAAA-MM-JJ
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
    },

    /// Exporter le registre (JSON) et/ou les rendez-vous (CSV)
    Export {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Générer le message client correspondant à l'état d'un rendez-vous
    Notify {
        #[arg(long)]
        id: String,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| anyhow!("invalid date (YYYY-MM-DD): {s}"))
}

fn parse_time(s: &str) -> Result<TimeOfDay> {
    TimeOfDay::parse(s).ok_or_else(|| anyhow!("invalid time (HH:MM): {s}"))
}

fn parse_status(s: &str) -> Result<AppointmentStatus> {
    match s {
        "pending" => Ok(AppointmentStatus::Pending),
        "confirmed" => Ok(AppointmentStatus::Confirmed),
        "rejected" => Ok(AppointmentStatus::Rejected),
        "rescheduled" => Ok(AppointmentStatus::Rescheduled),
        _ => Err(anyhow!("unknown status: {s}")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.ledger)?;
    let mut agenda = Agenda::new();
    *agenda.ledger_mut() = storage.load_or_default()?;
    let business = BusinessId::new(&cli.business);

    let code = match cli.cmd {
        Commands::AddService {
            name,
            duration_minutes,
            price,
        } => {
            let id = agenda.add_service(business, &name, duration_minutes, price)?;
            storage.save(agenda.ledger())?;
            println!("service {} added", id.as_str());
            0
        }
        Commands::ImportServices { csv } => {
            let services = io::import_services_csv(csv, &business)?;
            let count = services.len();
            agenda.ledger_mut().services.extend(services);
            storage.save(agenda.ledger())?;
            println!("{count} service(s) imported");
            0
        }
        Commands::SetHours {
            file,
            preset,
            presets,
        } => {
            let week: WeekSchedule = match (file, preset) {
                (Some(path), _) => {
                    let data = std::fs::read(&path)?;
                    serde_json::from_slice(&data)?
                }
                (None, Some(name)) => HoursStore::new(&presets).load(&name)?.week,
                (None, None) => anyhow::bail!("provide --file or --preset"),
            };
            agenda.set_business_hours(business, week)?;
            storage.save(agenda.ledger())?;
            0
        }
        Commands::Hours => {
            let week = agenda.business_hours(&business)?;
            for (idx, day) in week.days().iter().enumerate() {
                let name = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"][idx];
                if !day.is_open {
                    println!("{name}: closed");
                    continue;
                }
                let ranges: Vec<String> = day
                    .intervals
                    .iter()
                    .map(|i| format!("{}–{}", i.start, i.end))
                    .collect();
                println!("{name}: {}", ranges.join(", "));
            }
            0
        }
        Commands::Book {
            service,
            name,
            email,
            phone,
            date,
            time,
            observations,
        } => {
            let id = agenda.request_appointment(BookingRequest {
                business,
                service: ServiceId::new(service),
                client_name: name,
                client_email: email,
                client_phone: phone,
                date: parse_date(&date)?,
                start: parse_time(&time)?,
                observations,
            })?;
            storage.save(agenda.ledger())?;
            println!("appointment {} requested (pending)", id.as_str());
            0
        }
        Commands::Slots { service, date } => {
            let slots = agenda.available_slots(
                &business,
                parse_date(&date)?,
                &ServiceId::new(service),
                Local::now().naive_local(),
            )?;
            if slots.is_empty() {
                eprintln!("no available slots");
                // Code 2 = aucune capacité ce jour-là
                2
            } else {
                for slot in slots {
                    println!("{slot}");
                }
                0
            }
        }
        Commands::List {
            status,
            date,
            page,
            limit,
        } => {
            let filter = ListFilter {
                status: status.as_deref().map(parse_status).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            let result = agenda.list_appointments(&business, &filter, page, limit);
            for a in &result.items {
                println!(
                    "{} | {} {} → {} | {} | {}",
                    a.id.as_str(),
                    a.date,
                    a.start,
                    a.end,
                    a.status.as_str(),
                    a.client_name
                );
            }
            println!(
                "total: {} (page {}/{})",
                result.total,
                result.page,
                result.total_pages().max(1)
            );
            0
        }
        Commands::Confirm { id } => {
            agenda.confirm_appointment(&business, &AppointmentId::new(id))?;
            storage.save(agenda.ledger())?;
            println!("appointment confirmed");
            0
        }
        Commands::Reject { id, reason } => {
            agenda.reject_appointment(&business, &AppointmentId::new(id), &reason)?;
            storage.save(agenda.ledger())?;
            println!("appointment rejected");
            0
        }
        Commands::Reschedule { id, date, time } => {
            agenda.reschedule_appointment(
                &business,
                &AppointmentId::new(id),
                parse_date(&date)?,
                parse_time(&time)?,
            )?;
            storage.save(agenda.ledger())?;
            println!("new date/time suggested");
            0
        }
        Commands::Export { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_ledger_json(path, agenda.ledger())?;
            }
            if let Some(path) = out_csv {
                io::export_appointments_csv(path, agenda.ledger(), &business)?;
            }
            0
        }
        Commands::Notify { id, out } => {
            let renderer = TextNotice;
            let notice = prepare_notice(agenda.ledger(), &id, &renderer)?;
            std::fs::write(&out, notice.content)?;
            println!(
                "Notice generated for {} ({})",
                notice.client_email, notice.appointment_id
            );
            0
        }
    };

    std::process::exit(code);
}
