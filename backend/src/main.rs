use actix_web::{web, HttpServer};
use env_logger::Env;
use log::{error, info};
use sportsdesk::config::AppConfig;
use sportsdesk::state::AppState;
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let url = config.url();
    let bind = (config.host.clone(), config.port);
    let open_browser = config.open_browser;

    let state = match AppState::from_config(config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    info!(
        "Record store at {}, {} student(s)",
        state.store.path().display(),
        state.store.count().unwrap_or_default()
    );

    if open_browser {
        let browser_url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&browser_url);
        });
    }

    info!("Server running at {}", url);

    HttpServer::new(move || sportsdesk::app(state.clone()))
        .bind(bind)?
        .run()
        .await
}
