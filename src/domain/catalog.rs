// src/domain/catalog.rs
use serde::Serialize;

use crate::money::Amount;
use super::core::TheaterId;
use super::showtime::Showtime;

/// One film in the programme. Built once from configuration, never mutated.
/// Films are identified by title, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Film {
    pub title: String,
    pub genre: String,
    pub duration_minutes: u32,
    pub synopsis: String,
    pub theater: TheaterId,
    pub base_price: Amount,
    pub showtimes: Vec<Showtime>,
}

impl Film {
    pub fn has_showtime(&self, showtime: Showtime) -> bool {
        self.showtimes.contains(&showtime)
    }
}

/// Read-only film table in configuration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    films: Vec<Film>,
}

impl Catalog {
    pub fn new(films: Vec<Film>) -> Self {
        Catalog { films }
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn find(&self, title: &str) -> Option<&Film> {
        let wanted = title.to_lowercase();
        self.films.iter().find(|f| f.title.to_lowercase() == wanted)
    }

    /// Films whose genre contains the pattern, case-insensitively.
    pub fn by_genre(&self, pattern: &str) -> Vec<&Film> {
        let wanted = pattern.to_lowercase();
        self.films
            .iter()
            .filter(|f| f.genre.to_lowercase().contains(&wanted))
            .collect()
    }
}
