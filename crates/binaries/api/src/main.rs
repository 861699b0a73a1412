mod api_state;
pub mod routes;

use crate::api_state::ApiState;
use app_state::settings;
use axum::routing::get_service;
use color_eyre::Result;
use common_services::ai::AiClient;
use common_services::database::get_db_pool;
use common_services::media::MediaStore;
use common_types::Taxonomy;
use http::{HeaderValue, header};
use routes::create_router;
use tower_http::compression::CompressionLayer;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Tracing & Error Handling Setup ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    color_eyre::install()?;

    // --- Server Startup ---
    info!("🚀 Initializing server...");
    let pool = get_db_pool().await?;
    let taxonomy = Taxonomy::default();
    let ai = AiClient::from_settings(&settings().ai, taxonomy.clone())?;
    let media = MediaStore::from_settings(&settings().media);
    let state = ApiState {
        pool,
        ai,
        media,
        taxonomy,
    };
    let api_settings = &settings().api;

    // --- CORS Configuration ---
    let allowed_origins: Vec<HeaderValue> = api_settings
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ]);

    // Static serving for item images and thumbnails.
    let serve_dir = ServeDir::new(&settings().media.media_folder);

    // Media files are immutable once written; cache them hard.
    let cache_layer = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    // --- Create Router & Start Server ---
    let app = create_router(state)
        .layer(cors)
        .layer(CompressionLayer::new())
        .nest_service("/media", get_service(serve_dir).layer(cache_layer));
    let listen_address = format!("{}:{}", api_settings.host, api_settings.port);
    let listener = tokio::net::TcpListener::bind(&listen_address).await?;

    info!("📚 Docs available at http://{listen_address}/docs");
    info!("✅ Server listening on http://{listen_address}");

    axum::serve(listener, app).await?;
    Ok(())
}
