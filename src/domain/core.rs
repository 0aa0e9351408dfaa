// src/domain/core.rs
use thiserror::Error;

use crate::money::MoneyError;

pub type TheaterId = String;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Errors {
    #[error("Film '{0}' not found")]
    FilmNotFound(String),

    #[error("Theater '{0}' not found")]
    TheaterNotFound(TheaterId),

    #[error("Showtime '{showtime}' is not available for film '{film}'")]
    ShowtimeNotAvailable { film: String, showtime: String },

    #[error("Invalid showtime: {0}")]
    InvalidShowtime(String),

    #[error("Invalid seat label: '{0}'")]
    InvalidSeatLabel(String),

    #[error("Invalid seat index: {0}")]
    InvalidSeatIndex(usize),

    #[error("Ticket count must be between 1 and {max}, got {requested}")]
    InvalidTicketCount { requested: u32, max: u32 },

    #[error("Not enough seats. Only {available} available, requested {requested}")]
    InsufficientSeats { available: usize, requested: usize },

    #[error("Seat allocation failed")]
    AllocationFailed,

    #[error("Reservation '{0}' not found")]
    ReservationNotFound(String),

    #[error("Reservation '{0}' is already cancelled")]
    ReservationAlreadyCancelled(String),

    #[error("Reservation store failure: {0}")]
    StoreFailure(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
