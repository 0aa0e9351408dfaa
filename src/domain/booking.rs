// src/domain/booking.rs
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::money::Amount;
use crate::persistence::ReservationStore;
use super::catalog::{Catalog, Film};
use super::core::{Errors, TheaterId};
use super::pricing::{PriceBreakdown, PriceEngine};
use super::seats::SeatBoard;
use super::showtime::Showtime;
use super::validation::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatPreference {
    /// Ask for a contiguous run of seats, falling back to first-available.
    Consecutive,
    /// First-available seats.
    Any,
}

impl Default for SeatPreference {
    fn default() -> Self {
        SeatPreference::Consecutive
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub film_title: String,
    pub showtime: Showtime,
    pub ticket_count: u32,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub seat_preference: SeatPreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Confirmed => write!(f, "confirmed"),
            ReservationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of a successful booking. Held in the reservation store for
/// lookup and cancellation; seat occupancy itself lives on the seat board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub film: String,
    pub theater: TheaterId,
    pub showtime: Showtime,
    pub seats: Vec<String>,
    pub ticket_count: u32,
    pub total_price: Amount,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Seat availability snapshot for one theater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatOverview {
    pub theater: TheaterId,
    pub available_count: usize,
    pub seats: Vec<String>,
}

/// The one front-end entry point: validation, seat allocation, pricing and
/// the reservation store behind a single `book` call, plus the read
/// operations the browsing endpoints need.
///
/// Owns the seat board exclusively; the catalog is shared read-only.
pub struct BookingService {
    catalog: Arc<Catalog>,
    seats: SeatBoard,
    pricing: PriceEngine,
    validator: Validator,
    store: Box<dyn ReservationStore>,
    next_reservation: AtomicU64,
}

impl BookingService {
    pub fn new(
        catalog: Arc<Catalog>,
        seats: SeatBoard,
        pricing: PriceEngine,
        validator: Validator,
        store: Box<dyn ReservationStore>,
    ) -> Self {
        BookingService {
            catalog,
            seats,
            pricing,
            validator,
            store,
            next_reservation: AtomicU64::new(1),
        }
    }

    pub fn from_config(config: &Config, store: Box<dyn ReservationStore>) -> Self {
        let catalog = Arc::new(Catalog::new(config.films.clone()));
        let seats = SeatBoard::new(config.theaters.max_seats, config.theaters.names.clone());
        let pricing = PriceEngine::from_catalog(config.schedule.clone(), &catalog);
        let validator = Validator::new(
            catalog.clone(),
            config.theaters.names.clone(),
            config.theaters.max_seats as u32,
        );
        Self::new(catalog, seats, pricing, validator, store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn seat_board(&self) -> &SeatBoard {
        &self.seats
    }

    // ----- browsing -----

    pub fn films(&self, genre: Option<&str>) -> Vec<Film> {
        match genre {
            Some(pattern) => self
                .catalog
                .by_genre(pattern)
                .into_iter()
                .cloned()
                .collect(),
            None => self.catalog.films().to_vec(),
        }
    }

    pub fn film_detail(&self, title: &str) -> Result<Film, Errors> {
        self.catalog
            .find(title)
            .cloned()
            .ok_or_else(|| Errors::FilmNotFound(title.to_string()))
    }

    pub fn seats_in_theater(&self, theater: &str) -> Result<SeatOverview, Errors> {
        let seats = self.seats.available_labels(theater)?;
        Ok(SeatOverview {
            theater: theater.to_string(),
            available_count: seats.len(),
            seats,
        })
    }

    pub fn seats_for_film(&self, title: &str) -> Result<SeatOverview, Errors> {
        let film = self.film_detail(title)?;
        self.seats_in_theater(&film.theater)
    }

    /// Price tickets without touching the seat board. Unlike the raw
    /// engine, this validates film and showtime against the catalog first.
    pub fn quote(
        &self,
        title: &str,
        showtime: Showtime,
        is_holiday: bool,
        is_member: bool,
        ticket_count: u32,
    ) -> Result<PriceBreakdown, Errors> {
        let film = self.film_detail(title)?;
        if !film.has_showtime(showtime) {
            return Err(Errors::ShowtimeNotAvailable {
                film: film.title,
                showtime: showtime.to_string(),
            });
        }
        self.pricing
            .quote(&film.title, showtime, is_holiday, is_member, ticket_count)
    }

    pub fn reservation(&self, reservation_id: &str) -> Result<Reservation, Errors> {
        self.store
            .lookup(reservation_id)?
            .ok_or_else(|| Errors::ReservationNotFound(reservation_id.to_string()))
    }

    // ----- booking -----

    /// Book tickets end to end: validate, allocate seats, price, persist.
    ///
    /// No seats are touched unless validation and the availability check
    /// pass. If pricing or the store fails after seats were allocated, the
    /// allocation is released again before the error is returned, so a
    /// failed booking never leaves seats held.
    pub fn book(&self, request: &BookingRequest) -> Result<Reservation, Errors> {
        let theater = self.validator.validate_booking(
            &request.film_title,
            request.showtime,
            request.ticket_count,
        )?;

        let requested = request.ticket_count as usize;
        let available = self.seats.available_count(&theater)?;
        if available < requested {
            return Err(Errors::InsufficientSeats { available, requested });
        }

        let prefer_consecutive = request.seat_preference == SeatPreference::Consecutive;
        let allocation = self.seats.allocate(&theater, requested, prefer_consecutive)?;

        let breakdown = match self.pricing.quote(
            &request.film_title,
            request.showtime,
            request.is_holiday,
            request.is_member,
            request.ticket_count,
        ) {
            Ok(breakdown) => breakdown,
            Err(err) => {
                self.release_after_failure(&theater, &allocation.labels);
                return Err(err);
            }
        };

        // Canonical title casing comes from the catalog, not the request.
        let film_title = self
            .catalog
            .find(&request.film_title)
            .map(|f| f.title.clone())
            .unwrap_or_else(|| request.film_title.clone());

        let reservation = Reservation {
            reservation_id: self.next_reservation_id(),
            film: film_title,
            theater,
            showtime: request.showtime,
            seats: allocation.labels,
            ticket_count: request.ticket_count,
            total_price: breakdown.total_price,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        };

        if let Err(err) = self.store.save(&reservation) {
            self.release_after_failure(&reservation.theater, &reservation.seats);
            return Err(err);
        }

        info!(
            "reservation {} confirmed: {} x{} in {} ({})",
            reservation.reservation_id,
            reservation.film,
            reservation.ticket_count,
            reservation.theater,
            reservation.seats.join(", ")
        );

        Ok(reservation)
    }

    /// Cancel a stored reservation and free its seats.
    pub fn cancel(&self, reservation_id: &str) -> Result<Reservation, Errors> {
        let mut reservation = self.reservation(reservation_id)?;

        if reservation.status == ReservationStatus::Cancelled {
            return Err(Errors::ReservationAlreadyCancelled(reservation_id.to_string()));
        }

        self.seats.release(&reservation.theater, &reservation.seats)?;
        reservation.status = ReservationStatus::Cancelled;
        self.store.save(&reservation)?;

        info!("reservation {} cancelled", reservation.reservation_id);
        Ok(reservation)
    }

    /// Monotonic process-wide counter; ids never collide within a run.
    fn next_reservation_id(&self) -> String {
        let n = self.next_reservation.fetch_add(1, Ordering::Relaxed);
        format!("RES-{:04}", n)
    }

    fn release_after_failure(&self, theater: &str, labels: &[String]) {
        if let Err(err) = self.seats.release(theater, labels) {
            warn!(
                "failed to release seats {} in {} after booking failure: {}",
                labels.join(", "),
                theater,
                err
            );
        }
    }
}
