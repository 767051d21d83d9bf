use actix_web::{web, App, HttpServer};
use blog::config::Settings;
use blog::infra::state::build_state;
use blog::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use blog::routes;
use blog::state::security_config::SecurityConfig;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e.detail());
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(settings.debug);

    if settings.uses_default_secret() {
        warn!("SECRET_KEY is the built-in default; set SECRET_KEY before deploying");
    }

    let security_config = match SecurityConfig::from_settings(&settings) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e.detail(), "invalid security configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(settings.database_url.clone())
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e.detail(), "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %settings.host, port = settings.port, "starting blog backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
