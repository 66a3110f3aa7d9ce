use axum::{Router, http::header, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use userbase::{
    InMemoryStorage, PostgresStorage, UsersService, api::openapi::ApiDoc, api_routes,
    config::{Backend, CONFIG},
    infrastructure::storage::Storage,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn build_app<S: Storage + 'static>(storage: S) -> Router {
    let service = Arc::new(UsersService::new(storage));

    Router::new()
        .route("/", get(|| async { "OK" }))
        .merge(api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http()) // Request tracing
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&CONFIG.log_level))
        .init();
    info!("starting userbase with {:?}", *CONFIG);

    let app = match CONFIG.backend()? {
        Backend::Postgres => {
            info!("using PostgreSQL storage");
            let storage = PostgresStorage::connect(&CONFIG.database_url, CONFIG.database_max_connections).await?;
            build_app(storage)
        }
        Backend::InMemory => {
            info!("using in-memory storage");
            build_app(InMemoryStorage::new())
        }
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
