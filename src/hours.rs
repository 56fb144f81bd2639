use crate::timegrid::TimeOfDay;
use anyhow::{bail, Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Plage d'ouverture `[start, end)` pendant laquelle l'entreprise accepte des
/// réservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Interval {
    /// Crée une plage en validant `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, String> {
        if start >= end {
            return Err("interval end must be strictly after start".to_string());
        }
        Ok(Self { start, end })
    }

    /// Vrai si `[start, end)` candidat tient entièrement dans cette plage.
    pub fn contains(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        start >= self.start && end <= self.end
    }
}

/// Journée d'ouverture : drapeau + plages ordonnées.
///
/// Un jour fermé et un jour ouvert sans plage donnent tous deux zéro
/// disponibilité ; le second n'est pas une erreur, juste aucune capacité.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DaySchedule {
    #[serde(default)]
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intervals: Vec<Interval>,
}

impl DaySchedule {
    pub fn closed() -> Self {
        Self::default()
    }

    /// Journée ouverte avec la plage par défaut de l'onboarding (09:00–18:00).
    pub fn default_open() -> Self {
        Self {
            is_open: true,
            intervals: vec![Interval {
                start: TimeOfDay::from_minutes(9 * 60),
                end: TimeOfDay::from_minutes(18 * 60),
            }],
        }
    }

    /// Plages effectives : vide si le jour est fermé.
    pub fn open_intervals(&self) -> &[Interval] {
        if self.is_open {
            &self.intervals
        } else {
            &[]
        }
    }
}

/// Semaine complète, exactement 7 entrées indexées 0=dimanche..6=samedi.
///
/// La taille fixe supprime toute ambiguïté de clé manquante : chaque jour a
/// toujours un état explicite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule([DaySchedule; 7]);

impl Default for WeekSchedule {
    fn default() -> Self {
        Self::closed()
    }
}

impl WeekSchedule {
    /// Semaine entièrement fermée (état initial à l'onboarding).
    pub fn closed() -> Self {
        Self(std::array::from_fn(|_| DaySchedule::closed()))
    }

    pub fn new(days: [DaySchedule; 7]) -> Self {
        Self(days)
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.0[weekday.num_days_from_sunday() as usize]
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DaySchedule {
        &mut self.0[weekday.num_days_from_sunday() as usize]
    }

    pub fn days(&self) -> &[DaySchedule; 7] {
        &self.0
    }

    /// Valide chaque plage (`start < end`) sans exiger l'absence de
    /// chevauchement entre plages d'un même jour.
    pub fn validate(&self) -> Result<()> {
        for (idx, day) in self.0.iter().enumerate() {
            for interval in &day.intervals {
                if interval.start >= interval.end {
                    bail!(
                        "day {idx}: interval {} >= {} (end must be after start)",
                        interval.start,
                        interval.end
                    );
                }
            }
        }
        Ok(())
    }

    /// Trie les plages de chaque jour par heure de début.
    pub fn normalize(&mut self) {
        for day in &mut self.0 {
            day.intervals.sort_by_key(|i| i.start);
        }
    }
}

/// Gabarit d'horaires nommé, persisté sur disque (un fichier JSON par nom).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePreset {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub week: WeekSchedule,
}

impl SchedulePreset {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("preset name cannot be empty");
        }
        self.week.validate()
    }
}

/// Gestion simple des gabarits d'horaires persistés sur disque.
#[derive(Debug, Clone)]
pub struct HoursStore {
    base_dir: PathBuf,
}

impl HoursStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating preset directory {}", self.base_dir.display()))
    }

    pub fn save(&self, preset: &SchedulePreset) -> Result<PathBuf> {
        preset.validate()?;
        self.ensure_dir()?;
        let path = self.base_dir.join(format!("{}.json", preset.name));
        let json = serde_json::to_string_pretty(preset)?;
        fs::write(&path, json).with_context(|| format!("writing preset {}", path.display()))?;
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<SchedulePreset> {
        let path = self.base_dir.join(format!("{name}.json"));
        let data = fs::read(&path).with_context(|| format!("reading preset {}", path.display()))?;
        let preset: SchedulePreset = serde_json::from_slice(&data)
            .with_context(|| format!("parsing preset {}", path.display()))?;
        preset.validate()?;
        Ok(preset)
    }

    pub fn list(&self) -> Result<Vec<SchedulePreset>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read(&path)?;
            match serde_json::from_slice::<SchedulePreset>(&data) {
                Ok(preset) => out.push(preset),
                Err(err) => {
                    eprintln!("Warning: could not parse preset {}: {err}", path.display());
                }
            }
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}
