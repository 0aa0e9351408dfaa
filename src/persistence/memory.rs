// src/persistence/memory.rs
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::booking::Reservation;
use crate::domain::core::Errors;
use super::ReservationStore;

/// Process-lifetime store. Restarting the service forgets all reservations,
/// matching the in-memory seat board it sits next to.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reservations: Mutex<HashMap<String, Reservation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReservationStore for MemoryStore {
    fn save(&self, reservation: &Reservation) -> Result<(), Errors> {
        let mut reservations = self
            .reservations
            .lock()
            .map_err(|_| Errors::StoreFailure("reservation store lock poisoned".to_string()))?;
        reservations.insert(reservation.reservation_id.clone(), reservation.clone());
        Ok(())
    }

    fn lookup(&self, reservation_id: &str) -> Result<Option<Reservation>, Errors> {
        let reservations = self
            .reservations
            .lock()
            .map_err(|_| Errors::StoreFailure("reservation store lock poisoned".to_string()))?;
        Ok(reservations.get(reservation_id).cloned())
    }
}
