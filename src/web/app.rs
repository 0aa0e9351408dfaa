use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, Result};
use log::info;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::booking::{BookingRequest, BookingService};
use crate::domain::core::Errors;
use crate::domain::showtime::Showtime;
use crate::persistence::ReservationStore;
use super::types::{ApiError, AppState, FilmSummary, FilmsQuery, PriceQuery, ServiceInfo};

// Initialize application state
pub fn init_app_state(config: Config, store: Box<dyn ReservationStore>) -> AppState {
    Arc::new(BookingService::from_config(&config, store))
}

// Map the error taxonomy onto HTTP statuses; the reason string passes
// through verbatim.
fn error_response(err: Errors) -> HttpResponse {
    let body = ApiError { message: err.to_string() };
    match err {
        Errors::FilmNotFound(_)
        | Errors::TheaterNotFound(_)
        | Errors::ReservationNotFound(_) => HttpResponse::NotFound().json(body),

        Errors::ShowtimeNotAvailable { .. }
        | Errors::InvalidShowtime(_)
        | Errors::InvalidSeatLabel(_)
        | Errors::InvalidSeatIndex(_)
        | Errors::InvalidTicketCount { .. } => HttpResponse::BadRequest().json(body),

        Errors::InsufficientSeats { .. }
        | Errors::ReservationAlreadyCancelled(_) => HttpResponse::Conflict().json(body),

        Errors::AllocationFailed
        | Errors::StoreFailure(_)
        | Errors::Money(_) => HttpResponse::InternalServerError().json(body),
    }
}

async fn index() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    }))
}

// List films, optionally filtered by genre substring
async fn get_films(
    query: web::Query<FilmsQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let films = data.films(query.genre.as_deref());
    let summaries: Vec<FilmSummary> = films.iter().map(FilmSummary::from).collect();
    Ok(HttpResponse::Ok().json(summaries))
}

// Full film detail including theater, base price and schedule
async fn get_film(path: web::Path<String>, data: web::Data<AppState>) -> Result<HttpResponse> {
    let title = path.into_inner();
    match data.film_detail(&title) {
        Ok(film) => Ok(HttpResponse::Ok().json(film)),
        Err(err) => Ok(error_response(err)),
    }
}

async fn get_film_showtimes(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let title = path.into_inner();
    match data.film_detail(&title) {
        Ok(film) => Ok(HttpResponse::Ok().json(film.showtimes)),
        Err(err) => Ok(error_response(err)),
    }
}

async fn get_film_price(
    path: web::Path<String>,
    query: web::Query<PriceQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let title = path.into_inner();

    let showtime = match Showtime::from_str(&query.showtime) {
        Ok(showtime) => showtime,
        Err(err) => return Ok(error_response(err)),
    };
    let ticket_count = query.ticket_count.unwrap_or(1);

    match data.quote(&title, showtime, query.is_holiday, query.is_member, ticket_count) {
        Ok(breakdown) => Ok(HttpResponse::Ok().json(breakdown)),
        Err(err) => Ok(error_response(err)),
    }
}

async fn get_film_seats(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let title = path.into_inner();
    match data.seats_for_film(&title) {
        Ok(overview) => Ok(HttpResponse::Ok().json(overview)),
        Err(err) => Ok(error_response(err)),
    }
}

async fn get_theater_seats(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let theater = path.into_inner();
    match data.seats_in_theater(&theater) {
        Ok(overview) => Ok(HttpResponse::Ok().json(overview)),
        Err(err) => Ok(error_response(err)),
    }
}

// Book tickets; responds with the confirmed reservation
async fn create_reservation(
    request: web::Json<BookingRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    match data.book(&request) {
        Ok(reservation) => Ok(HttpResponse::Ok().json(reservation)),
        Err(err) => Ok(error_response(err)),
    }
}

async fn get_reservation(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let reservation_id = path.into_inner();
    match data.reservation(&reservation_id) {
        Ok(reservation) => Ok(HttpResponse::Ok().json(reservation)),
        Err(err) => Ok(error_response(err)),
    }
}

async fn cancel_reservation(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let reservation_id = path.into_inner();
    match data.cancel(&reservation_id) {
        Ok(reservation) => Ok(HttpResponse::Ok().json(reservation)),
        Err(err) => Ok(error_response(err)),
    }
}

// Configure routes
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/", web::get().to(index))
            .route("/films", web::get().to(get_films))
            .route("/films/{title}", web::get().to(get_film))
            .route("/films/{title}/showtimes", web::get().to(get_film_showtimes))
            .route("/films/{title}/price", web::get().to(get_film_price))
            .route("/films/{title}/seats", web::get().to(get_film_seats))
            .route("/seats/{theater}", web::get().to(get_theater_seats))
            .route("/reservations", web::post().to(create_reservation))
            .route("/reservations/{id}", web::get().to(get_reservation))
            .route("/reservations/{id}/cancel", web::post().to(cancel_reservation)),
    );
}

// Main application
pub async fn run_app(app_state: AppState, port: u16) -> std::io::Result<()> {
    info!("Starting server on port {}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Logger::default())
            .configure(configure_app)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
