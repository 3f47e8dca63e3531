use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use quizdeck_server::{
    app_state::AppState,
    auth::{AuthMiddleware, RouteGuard},
    config::Config,
    handlers,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");
    let jwt_service = state.jwt_service.clone();
    let frontend_origin = state.config.frontend_origin.clone();

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::from(jwt_service.clone()))
            .wrap(RouteGuard)
            .wrap(cors)
            .wrap(Logger::default())
            .service(handlers::page_handler::landing)
            .service(handlers::page_handler::admin_dashboard)
            .service(handlers::health_handler::health)
            .service(handlers::auth_handler::google_callback)
            .service(handlers::auth_handler::logout)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(handlers::quiz_handler::configure),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
