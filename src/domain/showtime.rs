// src/domain/showtime.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::core::Errors;

/// Wall-clock showtime in 24h "HH:MM" form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Showtime {
    hour: u8,
    minute: u8,
}

impl Showtime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, Errors> {
        if hour > 23 || minute > 59 {
            return Err(Errors::InvalidShowtime(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Showtime { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Discount band by the hour of the showing.
    pub fn band(&self) -> DiscountBand {
        if self.hour < 12 {
            DiscountBand::Morning
        } else if self.hour < 18 {
            DiscountBand::Afternoon
        } else {
            DiscountBand::Evening
        }
    }
}

impl fmt::Display for Showtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for Showtime {
    type Err = Errors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Errors::InvalidShowtime(s.to_string());

        let (hour_str, minute_str) = s.split_once(':').ok_or_else(invalid)?;
        let hour = hour_str.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute_str.parse::<u8>().map_err(|_| invalid())?;

        Showtime::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for Showtime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer {
        serializer.serialize_str(&self.to_string())
    }
}
impl<'de> Deserialize<'de> for Showtime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Showtime::from_str(&text).map_err(serde::de::Error::custom)
    }
}

/// Time-of-day pricing band. Morning is before noon, afternoon runs until
/// 18:00, evening is everything after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountBand {
    Morning,
    Afternoon,
    Evening,
}

impl fmt::Display for DiscountBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountBand::Morning => write!(f, "morning"),
            DiscountBand::Afternoon => write!(f, "afternoon"),
            DiscountBand::Evening => write!(f, "evening"),
        }
    }
}

impl FromStr for DiscountBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(DiscountBand::Morning),
            "afternoon" => Ok(DiscountBand::Afternoon),
            "evening" => Ok(DiscountBand::Evening),
            _ => Err(format!("Unknown discount band: {}", s)),
        }
    }
}
