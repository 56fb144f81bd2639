use crate::model::{BusinessId, Ledger, Service};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de services depuis CSV: header `name,duration_minutes,price`.
pub fn import_services_csv<P: AsRef<Path>>(
    path: P,
    business: &BusinessId,
) -> anyhow::Result<Vec<Service>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let duration = rec.get(1).context("missing duration_minutes")?.trim();
        let price = rec.get(2).context("missing price")?.trim();
        if name.is_empty() {
            bail!("invalid service row (empty name)");
        }
        let duration: u32 = duration
            .parse()
            .with_context(|| format!("invalid duration_minutes for service {name}"))?;
        let price: f64 = price
            .parse()
            .with_context(|| format!("invalid price for service {name}"))?;
        let service = Service::new(business.clone(), name, duration, price)
            .map_err(anyhow::Error::msg)?;
        out.push(service);
    }
    Ok(out)
}

/// Export JSON du registre (jolie mise en forme)
pub fn export_ledger_json<P: AsRef<Path>>(path: P, ledger: &Ledger) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(ledger)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des rendez-vous d'une entreprise:
/// header `id,date,start,end,status,client_name,service`
pub fn export_appointments_csv<P: AsRef<Path>>(
    path: P,
    ledger: &Ledger,
    business: &BusinessId,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "date", "start", "end", "status", "client_name", "service"])?;
    for a in ledger.appointments.iter().filter(|a| &a.business == business) {
        let service_name = ledger
            .services
            .iter()
            .find(|s| s.id == a.service)
            .map(|s| s.name.as_str())
            .unwrap_or("");
        let date = a.date.to_string();
        let start = a.start.to_string();
        let end = a.end.to_string();
        w.write_record([
            a.id.as_str(),
            date.as_str(),
            start.as_str(),
            end.as_str(),
            a.status.as_str(),
            a.client_name.as_str(),
            service_name,
        ])?;
    }
    w.flush()?;
    Ok(())
}
