use symposium::{config::Config, model::app::AppState, router, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let mail_client = startup::build_mailer(&config).unwrap();
    let session = startup::connect_to_session(&config).await.unwrap();
    let db = startup::connect_to_database(&config).await.unwrap();

    let state = AppState {
        db,
        mailer: mail_client,
        base_url: config.public_base_url.clone(),
        upload_dir: config.upload_dir.clone(),
    };

    let app = router::routes().with_state(state).layer(session);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap();

    tracing::info!("Starting server on port {}", config.port);

    axum::serve(listener, app).await.unwrap();
}
