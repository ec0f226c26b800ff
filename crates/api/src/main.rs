use std::net::SocketAddr;
use std::sync::Arc;

use entidto_core::StoredRow;
use entidto_db::{DbConfig, MemoryStore, ModelStore, PgStore};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use entidto_api::config::ServerConfig;
use entidto_api::routes;
use entidto_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "entidto_api=debug,entidto_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let people: Arc<dyn ModelStore> = match DbConfig::from_env() {
        Some(db_config) => {
            let pool = entidto_db::create_pool(&db_config)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");
            Arc::new(PgStore::new(pool, "people", "Person").expect("Invalid table name"))
        }
        None => {
            tracing::info!("DATABASE_URL not set, serving people from memory");
            Arc::new(MemoryStore::with_rows("Person", sample_people()))
        }
    };

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST"),
        config.port,
    );

    let state = AppState {
        people,
        config: Arc::new(config),
    };
    let app = routes::app(state).layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}

fn sample_people() -> Vec<StoredRow> {
    vec![
        StoredRow::new("Person")
            .with_column("id", 1)
            .with_column("username", "ada")
            .with_column("email", "ada@example.com")
            .with_column("years", 36),
        StoredRow::new("Person")
            .with_column("id", 2)
            .with_column("username", "grace")
            .with_column("email", "grace@example.com")
            .with_column("years", 45),
    ]
}
