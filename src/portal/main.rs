mod cli;
mod startup;
mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = cli::get_settings_from_args().expect("Error on getting settings.");

    let _guard = telemetry::init_subscriber(settings.debug, settings.application.max_log_files)
        .expect("Error on initializing logs.");

    let application = startup::Application::build(settings).await?;

    tracing::event!(target: "backend", tracing::Level::INFO, "Listening on http://127.0.0.1:{}/", application.port());

    application.run_until_stopped().await?;

    drop(_guard);
    Ok(())
}
