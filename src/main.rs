mod config;
mod error;
mod model;
mod web;

use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use config::Config;
use model::GeminiModel;
use web::{cors, routes};

// App state structure
pub struct AppState {
    pub model: GeminiModel,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Šebet chat relay");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    let app_state = Data::new(AppState {
        model: GeminiModel::new(&config),
    });

    info!("Listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(cors::headers())
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
