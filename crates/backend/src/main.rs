use backend::shared::app_state::AppState;
use backend::shared::{config, data::db};
use backend::system;
use backend::usecases::u101_predict_disease::SymptomChecker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::{ServeDir, ServeFile};

    system::tracing::initialize()?;

    let config = config::load_config()?;

    // Initialize database and the auth tables
    let db_path = config::resolve_path(&config.database.path);
    db::initialize_database(Some(&db_path.to_string_lossy()))
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;
    system::initialization::apply_auth_migration().await?;

    let auth = system::auth::jwt::resolve_keys(config.auth.jwt_secret.as_deref()).await?;

    // Loading problems are logged; /predict then answers "not configured"
    let checker = SymptomChecker::load(
        &config::resolve_path(&config.data.training_csv),
        &config::resolve_path(&config.data.medications_csv),
    );

    let state = AppState::new(checker, auth);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let dist_dir = config::resolve_path(&config.frontend.dist_dir);
    let static_files =
        ServeDir::new(&dist_dir).not_found_service(ServeFile::new(dist_dir.join("index.html")));

    let app = backend::routes::configure_routes(state)
        .fallback_service(static_files)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let ip: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.host '{}': {e}", config.server.host))?;
    let addr = SocketAddr::new(ip, config.server.port);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
