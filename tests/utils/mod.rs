use std::sync::Arc;

use cinema_site::config::Config;
use cinema_site::domain::{
    booking::{BookingRequest, BookingService, SeatPreference},
    catalog::{Catalog, Film},
    pricing::{DiscountSchedule, PriceEngine, TimeDiscounts},
    seats::SeatBoard,
    showtime::Showtime,
    validation::Validator,
};
use cinema_site::money::{Amount, Currency};
use cinema_site::persistence::MemoryStore;
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

pub const MAX_SEATS: usize = 30;

// Sample data for tests
pub fn idr(value: i64) -> Amount {
    Amount::new(Currency::IDR, value)
}

pub fn showtime(s: &str) -> Showtime {
    s.parse().expect("valid sample showtime")
}

pub fn theater_names() -> Vec<String> {
    vec!["Alpha".to_string(), "Beta".to_string()]
}

pub fn sample_film_1() -> Film {
    Film {
        title: "Deep Horizon".to_string(),
        genre: "Action, Sci-Fi".to_string(),
        duration_minutes: 124,
        synopsis: "A salvage crew finds more than wreckage in the trench.".to_string(),
        theater: "Alpha".to_string(),
        base_price: idr(100),
        showtimes: vec![showtime("09:30"), showtime("13:00"), showtime("19:00")],
    }
}

pub fn sample_film_2() -> Film {
    Film {
        title: "Paper Lanterns".to_string(),
        genre: "Drama, Romance".to_string(),
        duration_minutes: 96,
        synopsis: "Two strangers keep meeting at the night market.".to_string(),
        theater: "Beta".to_string(),
        base_price: idr(80),
        showtimes: vec![showtime("11:00"), showtime("18:00")],
    }
}

pub fn sample_films() -> Vec<Film> {
    vec![sample_film_1(), sample_film_2()]
}

pub fn sample_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::new(sample_films()))
}

pub fn sample_schedule() -> DiscountSchedule {
    DiscountSchedule {
        time_discounts: TimeDiscounts { morning: 10, afternoon: 5, evening: 0 },
        holiday_discount_pct: 10,
        member_discount_pct: 5,
        admin_fee: idr(5),
    }
}

pub fn sample_seat_board() -> SeatBoard {
    SeatBoard::new(MAX_SEATS, theater_names())
}

pub fn sample_engine() -> PriceEngine {
    PriceEngine::from_catalog(sample_schedule(), &sample_catalog())
}

pub fn sample_validator() -> Validator {
    Validator::new(sample_catalog(), theater_names(), MAX_SEATS as u32)
}

pub fn sample_service() -> BookingService {
    let catalog = sample_catalog();
    BookingService::new(
        catalog.clone(),
        sample_seat_board(),
        PriceEngine::from_catalog(sample_schedule(), &catalog),
        Validator::new(catalog.clone(), theater_names(), MAX_SEATS as u32),
        Box::new(MemoryStore::new()),
    )
}

/// A service whose price engine knows no films: validation passes but every
/// quote fails, which exercises the compensating seat release.
pub fn sample_service_with_empty_price_table() -> BookingService {
    let catalog = sample_catalog();
    BookingService::new(
        catalog.clone(),
        sample_seat_board(),
        PriceEngine::new(sample_schedule(), Vec::new()),
        Validator::new(catalog.clone(), theater_names(), MAX_SEATS as u32),
        Box::new(MemoryStore::new()),
    )
}

pub fn sample_request(ticket_count: u32) -> BookingRequest {
    BookingRequest {
        film_title: "Deep Horizon".to_string(),
        showtime: showtime("09:30"),
        ticket_count,
        is_holiday: false,
        is_member: false,
        seat_preference: SeatPreference::Consecutive,
    }
}

pub fn sample_config_json() -> String {
    r#"{
        "cinema": { "name": "Sample Cinema" },
        "currency": "IDR",
        "theaters": { "max_seats": 30, "names": ["Alpha", "Beta"] },
        "ticket": {
            "holiday_discount": 10,
            "member_discount": 5,
            "admin_fee": 5,
            "time_discounts": { "morning": 10, "afternoon": 5, "evening": 0 }
        },
        "films": [
            {
                "title": "Deep Horizon",
                "genre": "Action, Sci-Fi",
                "duration_minutes": 124,
                "synopsis": "A salvage crew finds more than wreckage in the trench.",
                "theater": "Alpha",
                "base_price": 100,
                "showtimes": ["09:30", "13:00", "19:00"]
            },
            {
                "title": "Paper Lanterns",
                "genre": "Drama, Romance",
                "duration_minutes": 96,
                "synopsis": "Two strangers keep meeting at the night market.",
                "theater": "Beta",
                "base_price": 80,
                "showtimes": ["11:00", "18:00"]
            }
        ]
    }"#
    .to_string()
}

pub fn sample_config() -> Config {
    Config::from_json(&sample_config_json()).expect("sample config is valid")
}
