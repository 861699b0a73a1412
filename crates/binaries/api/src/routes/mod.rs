pub mod auth;
pub mod clothing;
pub mod dashboard;
pub mod root;
pub mod taxonomy;

use crate::api_state::ApiState;
use crate::routes::auth::handlers::{get_me, login, register};
use crate::routes::auth::middleware::ApiUser;
use crate::routes::clothing::handlers::{
    delete_clothing_handler, get_clothing_handler, get_clothing_owner_handler,
    list_clothing_handler, search_clothing_handler, update_clothing_handler,
    upload_clothing_handler,
};
use crate::routes::dashboard::{get_closet_stats_handler, get_stylist_message_handler};
use crate::routes::root::root;
use crate::routes::taxonomy::get_taxonomy_handler;
use app_state::settings;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_extractor_with_state;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{LatencyUnit, trace::TraceLayer};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

// --- API Documentation ---
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        // Auth handlers
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::get_me,
        // Clothing handlers
        clothing::handlers::upload_clothing_handler,
        clothing::handlers::search_clothing_handler,
        clothing::handlers::list_clothing_handler,
        clothing::handlers::get_clothing_handler,
        clothing::handlers::update_clothing_handler,
        clothing::handlers::delete_clothing_handler,
        clothing::handlers::get_clothing_owner_handler,
        // Dashboard handlers
        dashboard::get_closet_stats_handler,
        dashboard::get_stylist_message_handler,
        // Taxonomy
        taxonomy::get_taxonomy_handler,
    ),
    components(
        schemas(
            root::PingResponse,
            // Auth schemas
            common_services::database::app_user::User,
            common_services::api::auth::interfaces::CreateUser,
            common_services::api::auth::interfaces::LoginUser,
            common_services::api::auth::interfaces::LoginResponse,
            // Clothing schemas
            common_services::api::search::interfaces::SearchParams,
            common_services::api::wardrobe::interfaces::ClothingItemResponse,
            common_services::api::wardrobe::interfaces::UpdateClothingItemRequest,
            common_services::api::wardrobe::interfaces::OwnerResponse,
            // Dashboard schemas
            common_services::api::dashboard::interfaces::FieldCount,
            common_services::api::dashboard::interfaces::ClosetStats,
            common_services::api::dashboard::interfaces::StylistResponse,
            // Taxonomy
            common_types::Taxonomy,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Armoire", description = "Armoire's personal wardrobe API"),
        (name = "Clothing", description = "Upload, search and manage clothing items"),
        (name = "Dashboard", description = "Closet statistics and the AI stylist")
    )
)]
struct ApiDoc;

/// A modifier to add bearer token security to the `OpenAPI` specification.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

// --- Router Construction ---
pub fn create_router(state: ApiState) -> Router {
    let openapi = ApiDoc::openapi();

    Router::new()
        .merge(Scalar::with_url("/docs", openapi))
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().on_response(
                tower_http::trace::DefaultOnResponse::new()
                    .level(tracing::Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
        )
}

fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/", get(root))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/taxonomy", get(get_taxonomy_handler))
}

fn protected_routes(state: ApiState) -> Router<ApiState> {
    Router::new()
        .route("/auth/me", get(get_me))
        .route(
            "/clothing/upload",
            post(upload_clothing_handler)
                .layer(DefaultBodyLimit::max(settings().media.max_upload_bytes)),
        )
        .route("/clothing/search", post(search_clothing_handler))
        .route("/clothing", get(list_clothing_handler))
        .route(
            "/clothing/{item_id}",
            get(get_clothing_handler)
                .put(update_clothing_handler)
                .delete(delete_clothing_handler),
        )
        .route("/clothing/{item_id}/owner", get(get_clothing_owner_handler))
        .route("/dashboard/stats", get(get_closet_stats_handler))
        .route("/dashboard/stylist", get(get_stylist_message_handler))
        .route_layer(from_extractor_with_state::<ApiUser, ApiState>(state))
}
