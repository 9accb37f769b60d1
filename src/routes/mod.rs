use actix_files as fs;
use actix_web::web;

use crate::config::Config;

/// HTTP handler for the index page
pub async fn index(config: web::Data<Config>) -> actix_web::Result<fs::NamedFile> {
    Ok(fs::NamedFile::open_async(config.static_dir.join("index.html")).await?)
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(web::resource("/ws").route(web::get().to(crate::websocket::ws_index)))
        .service(web::resource("/").route(web::get().to(index)))
        .service(fs::Files::new("/static", config.static_dir.clone()));
}
