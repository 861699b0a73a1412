use crate::api_state::ApiState;
use axum::Json;
use axum::extract::State;
use common_types::Taxonomy;

/// The full tagging vocabulary, for frontend pickers.
#[utoipa::path(
    get,
    path = "/taxonomy",
    responses(
        (status = 200, description = "All tagging vocabularies", body = Taxonomy),
    )
)]
pub async fn get_taxonomy_handler(State(api_state): State<ApiState>) -> Json<Taxonomy> {
    Json(api_state.taxonomy.clone())
}
