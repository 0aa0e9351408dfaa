// src/domain/validation.rs
use std::collections::HashSet;
use std::sync::Arc;

use super::catalog::Catalog;
use super::core::{Errors, TheaterId};
use super::showtime::Showtime;

/// Pure predicates over the catalog and theater layout. Film titles are
/// matched case-insensitively throughout.
#[derive(Debug, Clone)]
pub struct Validator {
    catalog: Arc<Catalog>,
    theaters: HashSet<TheaterId>,
    max_seats: u32,
}

impl Validator {
    pub fn new<I, T>(catalog: Arc<Catalog>, theater_names: I, max_seats: u32) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TheaterId>,
    {
        Validator {
            catalog,
            theaters: theater_names.into_iter().map(Into::into).collect(),
            max_seats,
        }
    }

    pub fn film_exists(&self, title: &str) -> bool {
        self.catalog.find(title).is_some()
    }

    pub fn showtimes_for(&self, title: &str) -> Option<&[Showtime]> {
        self.catalog.find(title).map(|f| f.showtimes.as_slice())
    }

    pub fn showtime_valid(&self, title: &str, showtime: Showtime) -> bool {
        self.catalog
            .find(title)
            .map(|f| f.has_showtime(showtime))
            .unwrap_or(false)
    }

    pub fn theater_for(&self, title: &str) -> Option<&TheaterId> {
        self.catalog.find(title).map(|f| &f.theater)
    }

    pub fn theater_valid(&self, theater: &str) -> bool {
        self.theaters.contains(theater)
    }

    /// Full booking-request check. The checks run in a fixed order and the
    /// first failure wins, so callers get deterministic error messages:
    /// film, then showtime, then theater, then ticket count. Success
    /// resolves to the film's theater.
    pub fn validate_booking(
        &self,
        title: &str,
        showtime: Showtime,
        ticket_count: u32,
    ) -> Result<TheaterId, Errors> {
        let film = self
            .catalog
            .find(title)
            .ok_or_else(|| Errors::FilmNotFound(title.to_string()))?;

        if !film.has_showtime(showtime) {
            return Err(Errors::ShowtimeNotAvailable {
                film: film.title.clone(),
                showtime: showtime.to_string(),
            });
        }

        if !self.theater_valid(&film.theater) {
            return Err(Errors::TheaterNotFound(film.theater.clone()));
        }

        if ticket_count < 1 || ticket_count > self.max_seats {
            return Err(Errors::InvalidTicketCount {
                requested: ticket_count,
                max: self.max_seats,
            });
        }

        Ok(film.theater.clone())
    }
}
