use axum::extract::FromRef;
use common_services::ai::AiClient;
use common_services::media::MediaStore;
use common_types::Taxonomy;
use sqlx::PgPool;

// The #[derive(Clone)] is crucial for Axum to share the state with all handlers.
#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub ai: AiClient,
    pub media: MediaStore,
    pub taxonomy: Taxonomy,
}

// These impls allow Axum to extract individual parts of the state. Useful for
// middleware and extractors that only need one of them.
impl FromRef<ApiState> for PgPool {
    fn from_ref(state: &ApiState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiState> for AiClient {
    fn from_ref(state: &ApiState) -> Self {
        state.ai.clone()
    }
}

impl FromRef<ApiState> for MediaStore {
    fn from_ref(state: &ApiState) -> Self {
        state.media.clone()
    }
}
