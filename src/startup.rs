use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;

use crate::configuration::TokenSettings;
use crate::logger::LoggerMiddleware;
use crate::middleware::AuthGuard;
use crate::routes::{health_check, login, protected, refresh};
use crate::user_store::SharedUserStore;

pub fn run(
    listener: TcpListener,
    store: SharedUserStore,
    token_config: TokenSettings,
) -> Result<Server, std::io::Error> {
    // Data::from keeps the trait object so handlers depend on the lookup
    // capability, not a concrete store.
    let store = web::Data::from(store);
    let token_config_data = web::Data::new(token_config.clone());

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(LoggerMiddleware)

            // Shared state (read-only: the store and the token settings)
            .app_data(store.clone())
            .app_data(token_config_data.clone())

            // Public routes (no authentication required)
            .route("/health_check", web::get().to(health_check))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))

            // Protected routes (require a valid bearer access token)
            .service(
                web::scope("/protected")
                    .wrap(AuthGuard::new(token_config.clone()))
                    .route("", web::get().to(protected)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
