mod context;
mod core;
mod database;
mod error;
mod handlers;
mod impls;
mod response;

use actix_web::web::{delete, get, post, put, resource, scope, Data};
use actix_web::HttpServer;
use sqlx::postgres::PgPoolOptions;

use crate::database::sqlx::PgStoreManager;
use crate::impls::tokener::jwt::JWT;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    env_logger::init();
    let database_url = dotenv::var("DATABASE_URL").expect("environment variable DATABASE_URL not been set");
    let secret = dotenv::var("JWT_SECRET").expect("environment variable JWT_SECRET not been set");
    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_owned());
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("failed to connect to database");
    log::info!("listening on {}", bind_addr);
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(Data::new(PgStoreManager::new(pool.clone())))
            .app_data(Data::new(JWT::new(secret.as_bytes().to_owned())))
            .service(
                scope("auth")
                    .service(resource("signup").route(post().to(handlers::signup)))
                    .service(resource("login").route(post().to(handlers::login)))
                    .service(resource("me").route(get().to(handlers::me))),
            )
            .service(
                scope("forms")
                    .service(resource("").route(get().to(handlers::form::list)).route(post().to(handlers::form::create)))
                    .service(
                        scope("{form_id}")
                            .service(
                                resource("")
                                    .route(get().to(handlers::form::detail))
                                    .route(put().to(handlers::form::update))
                                    .route(delete().to(handlers::form::delete_form)),
                            )
                            .service(
                                scope("responses")
                                    .service(resource("").route(get().to(handlers::response::list)))
                                    .service(resource("export").route(get().to(handlers::response::export))),
                            ),
                    ),
            )
            .service(scope("responses").service(resource("").route(post().to(handlers::response::submit))))
    })
    .bind(bind_addr)?
    .run()
    .await
}
