mod utils;

use cinema_site::domain::booking::{ReservationStatus, SeatPreference};
use cinema_site::domain::core::Errors;
use utils::{idr, sample_request, sample_service, sample_service_with_empty_price_table, showtime, MAX_SEATS};

#[test]
fn test_successful_booking() {
    let service = sample_service();
    let reservation = service.book(&sample_request(2)).unwrap();

    assert_eq!(reservation.reservation_id, "RES-0001");
    assert_eq!(reservation.film, "Deep Horizon");
    assert_eq!(reservation.theater, "Alpha");
    assert_eq!(reservation.showtime, showtime("09:30"));
    assert_eq!(reservation.seats, vec!["A1", "A2"]);
    assert_eq!(reservation.ticket_count, 2);
    // base 100, morning 10% off, admin fee 5: (100 - 10 + 5) * 2
    assert_eq!(reservation.total_price, idr(190));
    assert_eq!(reservation.status, ReservationStatus::Confirmed);

    // Seats are gone from the board and the reservation is stored
    assert_eq!(
        service.seats_in_theater("Alpha").unwrap().available_count,
        MAX_SEATS - 2
    );
    assert_eq!(service.reservation("RES-0001").unwrap(), reservation);
}

#[test]
fn test_reservation_ids_are_sequential() {
    let service = sample_service();
    assert_eq!(service.book(&sample_request(1)).unwrap().reservation_id, "RES-0001");
    assert_eq!(service.book(&sample_request(1)).unwrap().reservation_id, "RES-0002");
    assert_eq!(service.book(&sample_request(1)).unwrap().reservation_id, "RES-0003");
}

#[test]
fn test_booking_canonicalizes_title_casing() {
    let service = sample_service();
    let mut request = sample_request(1);
    request.film_title = "deep horizon".to_string();

    let reservation = service.book(&request).unwrap();
    assert_eq!(reservation.film, "Deep Horizon");
}

#[test]
fn test_unknown_film_leaves_board_untouched() {
    let service = sample_service();
    let mut request = sample_request(2);
    request.film_title = "No Such Film".to_string();

    let result = service.book(&request);
    assert_eq!(result.unwrap_err(), Errors::FilmNotFound("No Such Film".to_string()));

    assert_eq!(
        service.seats_in_theater("Alpha").unwrap().available_count,
        MAX_SEATS
    );
    assert_eq!(
        service.seats_in_theater("Beta").unwrap().available_count,
        MAX_SEATS
    );
}

#[test]
fn test_invalid_showtime_fails_before_seats() {
    let service = sample_service();
    let mut request = sample_request(2);
    request.showtime = showtime("23:00");

    assert!(matches!(
        service.book(&request),
        Err(Errors::ShowtimeNotAvailable { .. })
    ));
    assert_eq!(
        service.seats_in_theater("Alpha").unwrap().available_count,
        MAX_SEATS
    );
}

#[test]
fn test_overbooking_fails_without_partial_allocation() {
    let service = sample_service();

    // Fill the theater to three seats short
    service.book(&sample_request(MAX_SEATS as u32 - 3)).unwrap();

    let result = service.book(&sample_request(5));
    assert_eq!(
        result.unwrap_err(),
        Errors::InsufficientSeats { available: 3, requested: 5 }
    );
    assert_eq!(service.seats_in_theater("Alpha").unwrap().available_count, 3);
}

#[test]
fn test_seat_preference_any_takes_first_available() {
    let service = sample_service();
    let mut request = sample_request(2);
    request.seat_preference = SeatPreference::Any;

    let reservation = service.book(&request).unwrap();
    assert_eq!(reservation.seats, vec!["A1", "A2"]);
}

#[test]
fn test_pricing_failure_rolls_back_allocated_seats() {
    // Validation sees the film but the price table does not, so the quote
    // fails after seats were already allocated
    let service = sample_service_with_empty_price_table();

    let result = service.book(&sample_request(4));
    assert_eq!(result.unwrap_err(), Errors::FilmNotFound("Deep Horizon".to_string()));

    // The compensating release freed every allocated seat
    assert_eq!(
        service.seats_in_theater("Alpha").unwrap().available_count,
        MAX_SEATS
    );
}

#[test]
fn test_cancel_frees_seats_and_marks_reservation() {
    let service = sample_service();
    let reservation = service.book(&sample_request(3)).unwrap();
    assert_eq!(
        service.seats_in_theater("Alpha").unwrap().available_count,
        MAX_SEATS - 3
    );

    let cancelled = service.cancel(&reservation.reservation_id).unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(
        service.seats_in_theater("Alpha").unwrap().available_count,
        MAX_SEATS
    );

    // The stored record now carries the cancelled status
    let stored = service.reservation(&reservation.reservation_id).unwrap();
    assert_eq!(stored.status, ReservationStatus::Cancelled);
}

#[test]
fn test_cancel_twice_fails() {
    let service = sample_service();
    let reservation = service.book(&sample_request(1)).unwrap();

    service.cancel(&reservation.reservation_id).unwrap();
    assert_eq!(
        service.cancel(&reservation.reservation_id),
        Err(Errors::ReservationAlreadyCancelled(reservation.reservation_id.clone()))
    );
}

#[test]
fn test_cancel_unknown_reservation() {
    let service = sample_service();
    assert_eq!(
        service.cancel("RES-9999"),
        Err(Errors::ReservationNotFound("RES-9999".to_string()))
    );
}

#[test]
fn test_browsing_operations() {
    let service = sample_service();

    assert_eq!(service.films(None).len(), 2);

    let action = service.films(Some("action"));
    assert_eq!(action.len(), 1);
    assert_eq!(action[0].title, "Deep Horizon");

    let drama = service.films(Some("DRAMA"));
    assert_eq!(drama.len(), 1);
    assert_eq!(drama[0].title, "Paper Lanterns");

    assert!(service.films(Some("horror")).is_empty());

    let detail = service.film_detail("paper lanterns").unwrap();
    assert_eq!(detail.theater, "Beta");
    assert_eq!(detail.base_price, idr(80));

    let by_film = service.seats_for_film("Paper Lanterns").unwrap();
    assert_eq!(by_film.theater, "Beta");
    assert_eq!(by_film.available_count, MAX_SEATS);
    assert_eq!(by_film.seats.len(), MAX_SEATS);
}

#[test]
fn test_quote_validates_film_and_showtime() {
    let service = sample_service();

    assert!(matches!(
        service.quote("No Such Film", showtime("09:30"), false, false, 1),
        Err(Errors::FilmNotFound(_))
    ));
    assert!(matches!(
        service.quote("Deep Horizon", showtime("23:00"), false, false, 1),
        Err(Errors::ShowtimeNotAvailable { .. })
    ));

    let breakdown = service
        .quote("Deep Horizon", showtime("09:30"), false, false, 2)
        .unwrap();
    assert_eq!(breakdown.total_price, idr(190));
}
