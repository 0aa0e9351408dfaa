// src/domain/seats.rs
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

use super::core::{Errors, TheaterId};

/// Seats are laid out ten to a row: index 12 is row B, column 3, "B3".
pub const SEATS_PER_ROW: usize = 10;

/// Largest board the A..Z row letters can label.
pub const MAX_LABELED_SEATS: usize = 26 * SEATS_PER_ROW;

fn format_label(index: usize) -> String {
    let row = (b'A' + (index / SEATS_PER_ROW) as u8) as char;
    let column = index % SEATS_PER_ROW + 1;
    format!("{}{}", row, column)
}

/// Inverse of the label formula. Rejects anything that does not round-trip:
/// short labels, non-alphabetic rows, columns outside 1..=10.
pub fn seat_index(label: &str) -> Result<usize, Errors> {
    let invalid = || Errors::InvalidSeatLabel(label.to_string());

    if label.len() < 2 {
        return Err(invalid());
    }

    let mut chars = label.chars();
    let row_char = chars.next().ok_or_else(invalid)?;
    if !row_char.is_ascii_alphabetic() {
        return Err(invalid());
    }
    let row = (row_char.to_ascii_uppercase() as u8 - b'A') as usize;

    let column = label[1..].parse::<usize>().map_err(|_| invalid())?;
    if column < 1 || column > SEATS_PER_ROW {
        return Err(invalid());
    }

    Ok(row * SEATS_PER_ROW + column - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationKind {
    /// A single contiguous run of seats.
    Consecutive,
    /// First-available seats, not necessarily adjacent.
    Scattered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub labels: Vec<String>,
    pub kind: AllocationKind,
}

/// Per-theater seat occupancy. Each theater row vector sits behind its own
/// mutex so the check-then-mark sequence in `allocate` is atomic per
/// theater; two concurrent bookings can never select the same seat.
#[derive(Debug)]
pub struct SeatBoard {
    max_seats: usize,
    theaters: HashMap<TheaterId, Mutex<Vec<bool>>>,
}

impl SeatBoard {
    /// `true` in a row vector means the seat is free.
    pub fn new<I, T>(max_seats: usize, theater_names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TheaterId>,
    {
        let theaters = theater_names
            .into_iter()
            .map(|name| (name.into(), Mutex::new(vec![true; max_seats])))
            .collect();
        SeatBoard { max_seats, theaters }
    }

    pub fn max_seats(&self) -> usize {
        self.max_seats
    }

    pub fn contains(&self, theater: &str) -> bool {
        self.theaters.contains_key(theater)
    }

    pub fn theater_names(&self) -> Vec<&str> {
        self.theaters.keys().map(String::as_str).collect()
    }

    fn lock_row(&self, theater: &str) -> Result<std::sync::MutexGuard<'_, Vec<bool>>, Errors> {
        self.theaters
            .get(theater)
            .ok_or_else(|| Errors::TheaterNotFound(theater.to_string()))?
            .lock()
            .map_err(|_| Errors::AllocationFailed)
    }

    /// Indices of all free seats, in index order.
    pub fn available_indices(&self, theater: &str) -> Result<Vec<usize>, Errors> {
        let seats = self.lock_row(theater)?;
        Ok(seats
            .iter()
            .enumerate()
            .filter(|(_, free)| **free)
            .map(|(i, _)| i)
            .collect())
    }

    pub fn available_count(&self, theater: &str) -> Result<usize, Errors> {
        let seats = self.lock_row(theater)?;
        Ok(seats.iter().filter(|free| **free).count())
    }

    /// Free-seat labels, in index order.
    pub fn available_labels(&self, theater: &str) -> Result<Vec<String>, Errors> {
        Ok(self
            .available_indices(theater)?
            .into_iter()
            .map(format_label)
            .collect())
    }

    pub fn label_for(&self, index: usize) -> Result<String, Errors> {
        if index >= self.max_seats {
            return Err(Errors::InvalidSeatIndex(index));
        }
        Ok(format_label(index))
    }

    /// Claim `count` seats in one theater.
    ///
    /// With `prefer_consecutive`, the leftmost run of free seats long enough
    /// for the request wins; if no such run exists the allocation falls back
    /// to the first `count` free seats. Without it, first-available order is
    /// used directly. The selected seats are marked occupied before the lock
    /// is dropped.
    pub fn allocate(
        &self,
        theater: &str,
        count: usize,
        prefer_consecutive: bool,
    ) -> Result<Allocation, Errors> {
        let mut seats = self.lock_row(theater)?;

        let available = seats.iter().filter(|free| **free).count();
        if available < count {
            return Err(Errors::InsufficientSeats { available, requested: count });
        }

        let run_start = if prefer_consecutive {
            find_consecutive(&seats, count)
        } else {
            None
        };

        let (indices, kind) = match run_start {
            Some(start) => {
                ((start..start + count).collect::<Vec<_>>(), AllocationKind::Consecutive)
            }
            None => {
                let scattered: Vec<usize> = seats
                    .iter()
                    .enumerate()
                    .filter(|(_, free)| **free)
                    .map(|(i, _)| i)
                    .take(count)
                    .collect();
                (scattered, AllocationKind::Scattered)
            }
        };

        if indices.len() < count {
            return Err(Errors::AllocationFailed);
        }

        for &index in &indices {
            seats[index] = false;
        }

        Ok(Allocation {
            labels: indices.into_iter().map(format_label).collect(),
            kind,
        })
    }

    /// Free previously allocated seats by label.
    ///
    /// Labels are processed in order and valid ones are freed even when a
    /// later label turns out malformed; the first bad label is reported
    /// after the pass.
    pub fn release(&self, theater: &str, labels: &[String]) -> Result<(), Errors> {
        let mut seats = self.lock_row(theater)?;

        let mut bad_label = None;
        for label in labels {
            match seat_index(label) {
                Ok(index) if index < seats.len() => seats[index] = true,
                _ => {
                    if bad_label.is_none() {
                        bad_label = Some(label.clone());
                    }
                }
            }
        }

        match bad_label {
            Some(label) => Err(Errors::InvalidSeatLabel(label)),
            None => Ok(()),
        }
    }
}

/// Start of the leftmost run of at least `count` free seats, if any.
fn find_consecutive(seats: &[bool], count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }

    let mut run = 0;
    let mut start = 0;
    for (i, free) in seats.iter().enumerate() {
        if *free {
            if run == 0 {
                start = i;
            }
            run += 1;
            if run == count {
                return Some(start);
            }
        } else {
            run = 0;
        }
    }
    None
}
