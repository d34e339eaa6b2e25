//! Pet-store REST API.
//!
//! A small HTTP surface over the in-memory [`PetStore`]:
//!
//! - `GET /pets` - list all pets
//! - `POST /pets` - create a pet
//! - `GET /pets/{petId}` - get a pet by id
//!
//! Unmatched paths answer 404, disallowed methods 405, and unhandled faults
//! 500, all with a JSON `{"error": ...}` body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::store::{Pet, PetDraft, SharedPetStore};

/// HTTP server state.
#[derive(Clone)]
pub struct RestState {
    store: SharedPetStore,
}

/// Build the pet-store router.
pub fn router(store: SharedPetStore) -> Router {
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/{petId}", get(get_pet))
        .fallback(resource_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(RestState { store })
}

/// Serve the pet store on the given port until the process exits.
pub async fn start_server(port: u16, store: SharedPetStore) -> Result<()> {
    let app = router(store);
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting pet-store API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::HttpServer(e.to_string()))?;

    Ok(())
}

/// Error wrapper that renders the pet-store JSON error contract.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Unexpected faults are logged, not leaked.
            error!("Unhandled fault: {}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// `GET /pets` - list all pets in insertion order.
async fn list_pets(State(state): State<RestState>) -> Json<Vec<Pet>> {
    let store = state.store.read().await;
    Json(store.list())
}

/// `POST /pets` - validate and append a new pet, answering 201.
async fn create_pet(
    State(state): State<RestState>,
    Json(draft): Json<PetDraft>,
) -> std::result::Result<(StatusCode, Json<Pet>), ApiError> {
    let mut store = state.store.write().await;
    let pet = store.create(draft)?;
    Ok((StatusCode::CREATED, Json(pet)))
}

/// `GET /pets/{petId}` - fetch one pet.
async fn get_pet(
    State(state): State<RestState>,
    Path(pet_id): Path<String>,
) -> std::result::Result<Json<Pet>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get(&pet_id)?))
}

/// Fallback for unmatched paths.
async fn resource_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Resource not found" })),
    )
}

/// Fallback for matched paths with a disallowed method.
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PetStore;

    #[tokio::test]
    async fn test_router_builds_with_empty_store() {
        let _app = router(PetStore::new().into_shared());
    }

    #[test]
    fn test_api_error_statuses() {
        let err = ApiError(Error::validation("bad"));
        assert_eq!(err.0.http_status(), 400);

        let err = ApiError(Error::not_found("missing"));
        assert_eq!(err.0.http_status(), 404);
    }
}
