#![allow(
    clippy::type_complexity,
    clippy::too_many_arguments,
    clippy::derivable_impls
)]

pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use shared::state::AppState;
use system::auth::jwt::TokenIssuer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;

    // Без ключа подписи сервер не стартует
    let tokens = TokenIssuer::from_config(&config.jwt).map_err(|e| {
        tracing::error!("{:#}", e);
        e
    })?;

    let db_path = shared::config::get_database_path(&config)?;
    tracing::info!("Database: {}", db_path.display());
    let db = shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e:#}"))?;

    let state = AppState::new(db, tokens);

    // Системные роли и администратор по умолчанию
    system::initialization::ensure_default_roles(state.identity.as_ref()).await?;
    system::initialization::ensure_admin_user_exists(state.identity.as_ref(), &config.bootstrap)
        .await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = routes::configure_routes(state)
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors);

    let addr = config.server.bind_addr();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: {} is already in use. Please ensure no other process is using this port.",
                    addr
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
