// src/persistence/json_file.rs
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde_json::{from_str, to_string};

use crate::domain::booking::Reservation;
use crate::domain::core::Errors;
use super::ReservationStore;

/// Append-only reservation log, one JSON record per line. Later records for
/// an id supersede earlier ones, so a cancellation is just another line.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileStore { path: path.as_ref().to_path_buf() }
    }

    fn read_all(&self) -> Result<Vec<Reservation>, Errors> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| Errors::StoreFailure(format!("failed to open reservation log: {}", e)))?;
        let reader = BufReader::new(file);

        let mut reservations = Vec::new();
        for line in reader.lines() {
            let line = line
                .map_err(|e| Errors::StoreFailure(format!("failed to read reservation log: {}", e)))?;
            if line.trim().is_empty() {
                continue;
            }
            let reservation: Reservation = from_str(&line)
                .map_err(|e| Errors::StoreFailure(format!("failed to parse reservation: {}", e)))?;
            reservations.push(reservation);
        }

        Ok(reservations)
    }
}

impl ReservationStore for JsonFileStore {
    fn save(&self, reservation: &Reservation) -> Result<(), Errors> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| Errors::StoreFailure(format!("failed to open reservation log: {}", e)))?;

        let json = to_string(reservation)
            .map_err(|e| Errors::StoreFailure(format!("failed to serialize reservation: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| Errors::StoreFailure(format!("failed to write reservation log: {}", e)))?;

        Ok(())
    }

    fn lookup(&self, reservation_id: &str) -> Result<Option<Reservation>, Errors> {
        // Last record wins.
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|r| r.reservation_id == reservation_id)
            .last())
    }
}
