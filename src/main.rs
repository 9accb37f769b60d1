use actix_web::{web, App, HttpServer};
use log::{error, info};

use chess_vs_random::config::{Config, LOG_VAR};
use chess_vs_random::routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().filter_or(LOG_VAR, "info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    info!("Starting chess server at http://{}", config.bind_addr);
    info!(
        "Opponent replies after {:?} ({})",
        config.reply_delay,
        match config.reply_seed {
            Some(seed) => format!("seed {}", seed),
            None => "unseeded".to_string(),
        }
    );

    let bind_addr = config.bind_addr.clone();
    let shared = web::Data::new(config);

    HttpServer::new(move || {
        let config = shared.clone();
        App::new()
            .app_data(config.clone())
            .configure(|cfg| configure_routes(cfg, &config))
    })
    .bind(bind_addr)?
    .run()
    .await
}
