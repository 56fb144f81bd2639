use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Minutes d'une journée ; les offsets horloge valides sont `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Convertit une chaîne `"HH:MM"` en minutes depuis minuit.
///
/// Toute entrée qui ne suit pas le motif deux-chiffres-deux-points-deux-
/// chiffres vaut 0 (minuit). Pour distinguer une entrée mal formée, passer
/// par [`TimeOfDay::parse`].
pub fn time_to_minutes(s: &str) -> u16 {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return 0;
    }
    let digits = |a: u8, b: u8| -> Option<u16> {
        if a.is_ascii_digit() && b.is_ascii_digit() {
            Some(u16::from(a - b'0') * 10 + u16::from(b - b'0'))
        } else {
            None
        }
    };
    match (digits(bytes[0], bytes[1]), digits(bytes[3], bytes[4])) {
        (Some(h), Some(m)) => h * 60 + m,
        _ => 0,
    }
}

/// Convertit des minutes depuis minuit en chaîne `"HH:MM"` (zéro-paddée).
pub fn minutes_to_time(total: u16) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Heure de la journée stockée en minutes depuis minuit.
///
/// Toutes les heures (ouverture, rendez-vous) sont en heure locale de
/// l'entreprise ; aucune conversion de fuseau dans la crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    /// Parse strict de `"HH:MM"` avec heures < 24 et minutes < 60.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }
        let num = |a: u8, b: u8| -> Option<u16> {
            if a.is_ascii_digit() && b.is_ascii_digit() {
                Some(u16::from(a - b'0') * 10 + u16::from(b - b'0'))
            } else {
                None
            }
        };
        let hours = num(bytes[0], bytes[1])?;
        let minutes = num(bytes[3], bytes[4])?;
        if hours >= 24 || minutes >= 60 {
            return None;
        }
        Some(Self(hours * 60 + minutes))
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Décale d'une durée de service. `None` au-delà de la fin de journée.
    pub fn plus_minutes(self, duration: u32) -> Option<Self> {
        let total = u32::from(self.0) + duration;
        if total >= u32::from(MINUTES_PER_DAY) {
            return None;
        }
        Some(Self(total as u16))
    }

    /// Minutes écoulées depuis `earlier` ; sature à 0 si inversé.
    pub fn since(self, earlier: TimeOfDay) -> u32 {
        u32::from(self.0.saturating_sub(earlier.0))
    }

    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.0) / 60, u32::from(self.0) % 60, 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", minutes_to_time(self.0))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&minutes_to_time(self.0))
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {raw}")))
    }
}
