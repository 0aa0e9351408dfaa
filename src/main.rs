use cinema_site::config::Config;
use cinema_site::persistence::{JsonFileStore, MemoryStore, ReservationStore};
use cinema_site::web::app::{init_app_state, run_app};
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.json".to_string());
    let lenient = std::env::var("CONFIG_LENIENT").map(|v| v == "1").unwrap_or(false);

    let loaded = if lenient {
        Config::from_file_lenient(&config_path)
    } else {
        Config::from_file(&config_path)
    };
    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config '{}': {}", config_path, err);
            std::process::exit(1);
        }
    };

    let store: Box<dyn ReservationStore> = match std::env::var("RESERVATION_LOG") {
        Ok(path) => Box::new(JsonFileStore::new(path)),
        Err(_) => Box::new(MemoryStore::new()),
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(
        "Loaded {} films across {} theaters for {}",
        config.films.len(),
        config.theaters.names.len(),
        config.cinema.name
    );

    let app_state = init_app_state(config, store);
    run_app(app_state, port).await
}
