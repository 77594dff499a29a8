use std::fs;

use actix_web::{App, HttpServer, middleware::Logger, web};
use file_picker::{AppState, config::AppConfig, cors, routes::register};
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env().expect("failed to load config");

    fs::create_dir_all(&config.log_dir).expect("failed to create log directory");
    let file_appender = rolling::never(&config.log_dir, "file-picker.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let _guard = guard;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("failed to init logging filter");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    fs::create_dir_all(&config.files_directory)?;

    info!(
        host = %config.host,
        port = config.port,
        files_directory = %config.files_directory.display(),
        any_origin = config.allows_any_origin(),
        "starting file picker"
    );

    let bind_addr = format!("{}:{}", config.host, config.port);
    let origins = config.cors_origins.clone();
    let shared_state = web::Data::new(AppState {
        files_root: config.files_directory.clone(),
    });

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&origins))
            .app_data(shared_state.clone())
            .configure(register)
    })
    .bind(bind_addr)?
    .run()
    .await
}
