use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use taskbook::config::Config;
use taskbook::routes;
use taskbook::store::PgStore;
use taskbook::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let store = PgStore::new(pool);
    match store.migrate().await {
        Ok(()) => log::info!("database schema ready"),
        // The tables usually already exist; the server still starts.
        Err(e) => log::error!("schema setup failed: {}", e),
    }

    let state = web::Data::new(AppState::new(Arc::new(store), config.max_login_time_ms));

    log::info!("Server listening on {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
