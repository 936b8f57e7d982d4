pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::db::ReadingStore;
use handlers::ApiDoc;

pub fn router(store: ReadingStore) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route(
            "/sensors",
            post(handlers::create_reading).get(handlers::list_readings),
        )
        .route("/sensors/by_name/{name}", get(handlers::get_readings_by_name))
        .route(
            "/sensors/{id}",
            get(handlers::get_reading)
                .put(handlers::replace_reading)
                .patch(handlers::patch_reading)
                .delete(handlers::delete_reading),
        )
        .with_state(store)
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
}
