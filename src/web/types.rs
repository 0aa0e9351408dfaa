use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::booking::BookingService;
use crate::domain::catalog::Film;
use crate::domain::core::TheaterId;

pub type AppState = Arc<BookingService>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct FilmsQuery {
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub showtime: String,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default)]
    pub is_member: bool,
    pub ticket_count: Option<u32>,
}

/// Listing row: the browsing view of a film, without price or schedule.
#[derive(Debug, Serialize)]
pub struct FilmSummary {
    pub title: String,
    pub genre: String,
    pub duration_minutes: u32,
    pub synopsis: String,
    pub theater: TheaterId,
}

impl From<&Film> for FilmSummary {
    fn from(film: &Film) -> Self {
        FilmSummary {
            title: film.title.clone(),
            genre: film.genre.clone(),
            duration_minutes: film.duration_minutes,
            synopsis: film.synopsis.clone(),
            theater: film.theater.clone(),
        }
    }
}
