// src/config.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::catalog::Film;
use crate::domain::core::TheaterId;
use crate::domain::pricing::{DiscountSchedule, TimeDiscounts};
use crate::domain::seats::MAX_LABELED_SEATS;
use crate::domain::showtime::Showtime;
use crate::money::{Amount, AmountValue, Currency};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Missing required config key: {0}")]
    MissingField(&'static str),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaInfo {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TheaterLayout {
    pub max_seats: usize,
    pub names: Vec<TheaterId>,
}

/// Validated startup configuration. Loading fails fast: an unreadable file,
/// malformed JSON, or a value that breaks an invariant below is fatal.
#[derive(Debug, Clone)]
pub struct Config {
    pub cinema: CinemaInfo,
    pub currency: Currency,
    pub theaters: TheaterLayout,
    pub schedule: DiscountSchedule,
    pub films: Vec<Film>,
}

// Raw mirror of the JSON document. Discount keys stay optional here so the
// strict/lenient policy can be applied in one place.
#[derive(Debug, Deserialize)]
struct RawConfig {
    cinema: CinemaInfo,
    currency: Currency,
    theaters: RawTheaters,
    ticket: Option<RawTicket>,
    films: Vec<RawFilm>,
}

#[derive(Debug, Deserialize)]
struct RawTheaters {
    max_seats: usize,
    names: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTicket {
    holiday_discount: Option<u32>,
    member_discount: Option<u32>,
    admin_fee: Option<AmountValue>,
    time_discounts: Option<RawTimeDiscounts>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTimeDiscounts {
    morning: Option<u32>,
    afternoon: Option<u32>,
    evening: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawFilm {
    title: String,
    genre: String,
    duration_minutes: u32,
    synopsis: String,
    theater: String,
    base_price: AmountValue,
    showtimes: Vec<String>,
}

/// Whether missing discount/fee keys are a startup error or default to
/// zero. The reference configuration format left this ambiguous, so both
/// behaviors are offered and the caller picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingKeyPolicy {
    Reject,
    DefaultToZero,
}

impl Config {
    /// Strict load: every ticket/discount key must be present.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load(path, MissingKeyPolicy::Reject)
    }

    /// Lenient load: missing discount and fee keys default to zero.
    pub fn from_file_lenient<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load(path, MissingKeyPolicy::DefaultToZero)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::build(serde_json::from_str(json)?, MissingKeyPolicy::Reject)
    }

    pub fn from_json_lenient(json: &str) -> Result<Self, ConfigError> {
        Self::build(serde_json::from_str(json)?, MissingKeyPolicy::DefaultToZero)
    }

    fn load<P: AsRef<Path>>(path: P, policy: MissingKeyPolicy) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::build(serde_json::from_str(&text)?, policy)
    }

    fn build(raw: RawConfig, policy: MissingKeyPolicy) -> Result<Self, ConfigError> {
        let currency = raw.currency;
        let schedule = build_schedule(raw.ticket, currency, policy)?;

        if raw.theaters.names.is_empty() {
            return Err(ConfigError::Invalid("theater list is empty".to_string()));
        }
        if raw.theaters.max_seats < 1 || raw.theaters.max_seats > MAX_LABELED_SEATS {
            return Err(ConfigError::Invalid(format!(
                "max_seats must be between 1 and {}, got {}",
                MAX_LABELED_SEATS, raw.theaters.max_seats
            )));
        }

        let theater_names: HashSet<&str> =
            raw.theaters.names.iter().map(String::as_str).collect();

        let mut seen_titles = HashSet::new();
        let mut films = Vec::with_capacity(raw.films.len());
        for film in raw.films {
            if !seen_titles.insert(film.title.to_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate film title '{}'",
                    film.title
                )));
            }
            if !theater_names.contains(film.theater.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "film '{}' references unknown theater '{}'",
                    film.title, film.theater
                )));
            }
            if film.base_price < 0 {
                return Err(ConfigError::Invalid(format!(
                    "film '{}' has a negative base price",
                    film.title
                )));
            }

            let mut showtimes = Vec::with_capacity(film.showtimes.len());
            for raw_showtime in &film.showtimes {
                let showtime = Showtime::from_str(raw_showtime).map_err(|_| {
                    ConfigError::Invalid(format!(
                        "film '{}' has an invalid showtime '{}'",
                        film.title, raw_showtime
                    ))
                })?;
                showtimes.push(showtime);
            }

            films.push(Film {
                title: film.title,
                genre: film.genre,
                duration_minutes: film.duration_minutes,
                synopsis: film.synopsis,
                theater: film.theater,
                base_price: Amount::new(currency, film.base_price),
                showtimes,
            });
        }

        Ok(Config {
            cinema: raw.cinema,
            currency,
            theaters: TheaterLayout {
                max_seats: raw.theaters.max_seats,
                names: raw.theaters.names,
            },
            schedule,
            films,
        })
    }
}

fn build_schedule(
    ticket: Option<RawTicket>,
    currency: Currency,
    policy: MissingKeyPolicy,
) -> Result<DiscountSchedule, ConfigError> {
    let ticket = match (ticket, policy) {
        (Some(ticket), _) => ticket,
        (None, MissingKeyPolicy::DefaultToZero) => RawTicket::default(),
        (None, MissingKeyPolicy::Reject) => return Err(ConfigError::MissingField("ticket")),
    };
    let time = match (ticket.time_discounts, policy) {
        (Some(time), _) => time,
        (None, MissingKeyPolicy::DefaultToZero) => RawTimeDiscounts::default(),
        (None, MissingKeyPolicy::Reject) => {
            return Err(ConfigError::MissingField("ticket.time_discounts"))
        }
    };

    let require_pct = |value: Option<u32>, key: &'static str| match (value, policy) {
        (Some(pct), _) if pct > 100 => Err(ConfigError::Invalid(format!(
            "{} must be a percentage in 0..=100, got {}",
            key, pct
        ))),
        (Some(pct), _) => Ok(pct),
        (None, MissingKeyPolicy::DefaultToZero) => Ok(0),
        (None, MissingKeyPolicy::Reject) => Err(ConfigError::MissingField(key)),
    };

    let admin_fee = match (ticket.admin_fee, policy) {
        (Some(fee), _) if fee < 0 => {
            return Err(ConfigError::Invalid(format!(
                "ticket.admin_fee must be non-negative, got {}",
                fee
            )))
        }
        (Some(fee), _) => fee,
        (None, MissingKeyPolicy::DefaultToZero) => 0,
        (None, MissingKeyPolicy::Reject) => {
            return Err(ConfigError::MissingField("ticket.admin_fee"))
        }
    };

    Ok(DiscountSchedule {
        time_discounts: TimeDiscounts {
            morning: require_pct(time.morning, "ticket.time_discounts.morning")?,
            afternoon: require_pct(time.afternoon, "ticket.time_discounts.afternoon")?,
            evening: require_pct(time.evening, "ticket.time_discounts.evening")?,
        },
        holiday_discount_pct: require_pct(ticket.holiday_discount, "ticket.holiday_discount")?,
        member_discount_pct: require_pct(ticket.member_discount, "ticket.member_discount")?,
        admin_fee: Amount::new(currency, admin_fee),
    })
}
