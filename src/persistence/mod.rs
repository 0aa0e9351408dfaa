// src/persistence/mod.rs
pub mod json_file;
pub mod memory;

use crate::domain::booking::Reservation;
use crate::domain::core::Errors;

pub use self::json_file::JsonFileStore;
pub use self::memory::MemoryStore;

/// Where confirmed reservations go after booking. `save` overwrites any
/// previous record with the same id (cancellation re-saves with the new
/// status).
pub trait ReservationStore: Send + Sync {
    fn save(&self, reservation: &Reservation) -> Result<(), Errors>;
    fn lookup(&self, reservation_id: &str) -> Result<Option<Reservation>, Errors>;
}
