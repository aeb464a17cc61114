use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use edulink::{
    config::Settings,
    database::connection::{create_pool, run_migrations},
    routes,
    services::registration::PgRegistrationWorkflow,
};
use tracing::{Level, info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    let level = settings.log.level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();
    if !settings.log.level.eq_ignore_ascii_case(&level.to_string()) {
        warn!("Unknown log level {:?}, using {}", settings.log.level, level);
    }

    let pool = create_pool(&settings.database)
        .await
        .context("Failed to connect to database")?;

    if settings.database.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let workflow = web::Data::new(PgRegistrationWorkflow::postgres(
        pool,
        settings.registration.success_redirect.clone(),
    ));

    let allowed_origin = settings.server.allowed_origin.clone();
    let (host, port) = settings.bind_address();
    info!("Starting EduLink on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(workflow.clone())
            .service(web::scope("/api").configure(routes::api::scoped_config))
    })
    .bind((host, port))
    .context("Failed to bind server address")?
    .run()
    .await
    .context("Server error")
}
