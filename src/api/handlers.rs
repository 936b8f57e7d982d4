use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use utoipa::OpenApi;

use super::{
    dto::{CreateReadingRequest, PatchReadingRequest, ReadingDto, ReplaceReadingRequest},
    errors::AppError,
};
use crate::db::ReadingStore;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Store a new reading. The id is assigned by the database; an omitted
/// `timestamp` defaults to the insertion time.
#[utoipa::path(
    post,
    path = "/sensors",
    request_body = CreateReadingRequest,
    responses(
        (status = 201, description = "Reading stored", body = ReadingDto),
        (status = 422, description = "Malformed payload"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn create_reading(
    State(store): State<ReadingStore>,
    Json(payload): Json<CreateReadingRequest>,
) -> Result<(StatusCode, Json<ReadingDto>), AppError> {
    let reading = store.insert(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(reading.into())))
}

/// Fetch every stored reading, oldest first.
#[utoipa::path(
    get,
    path = "/sensors",
    responses(
        (status = 200, description = "All readings", body = Vec<ReadingDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn list_readings(
    State(store): State<ReadingStore>,
) -> Result<Json<Vec<ReadingDto>>, AppError> {
    let readings = store.list_all().await?;
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

/// Fetch a single reading by id.
#[utoipa::path(
    get,
    path = "/sensors/{id}",
    params(("id" = i64, Path, description = "Reading id")),
    responses(
        (status = 200, description = "The reading", body = ReadingDto),
        (status = 404, description = "No reading with this id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn get_reading(
    State(store): State<ReadingStore>,
    Path(id): Path<i64>,
) -> Result<Json<ReadingDto>, AppError> {
    let reading = store.get(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(reading.into()))
}

/// Fetch all readings produced by one sensor name.
///
/// An empty result is reported as 404: with no sensor registry, a name
/// whose readings were all deleted is indistinguishable from a name that
/// never existed.
#[utoipa::path(
    get,
    path = "/sensors/by_name/{name}",
    params(("name" = String, Path, description = "Sensor name")),
    responses(
        (status = 200, description = "Readings for this sensor", body = Vec<ReadingDto>),
        (status = 404, description = "No readings with this name"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn get_readings_by_name(
    State(store): State<ReadingStore>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ReadingDto>>, AppError> {
    let readings = store.list_by_name(&name).await?;
    if readings.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

/// Replace a reading wholesale. Every mutable field is overwritten; a
/// payload without `timestamp` stamps the current time rather than
/// keeping the stored one.
#[utoipa::path(
    put,
    path = "/sensors/{id}",
    params(("id" = i64, Path, description = "Reading id")),
    request_body = ReplaceReadingRequest,
    responses(
        (status = 200, description = "The updated reading", body = ReadingDto),
        (status = 404, description = "No reading with this id"),
        (status = 422, description = "Malformed payload"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn replace_reading(
    State(store): State<ReadingStore>,
    Path(id): Path<i64>,
    Json(payload): Json<ReplaceReadingRequest>,
) -> Result<Json<ReadingDto>, AppError> {
    let timestamp = payload.timestamp.unwrap_or_else(Utc::now);
    let reading = store
        .replace(id, payload.name, payload.value, timestamp)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(reading.into()))
}

/// Update only the fields present in the payload.
#[utoipa::path(
    patch,
    path = "/sensors/{id}",
    params(("id" = i64, Path, description = "Reading id")),
    request_body = PatchReadingRequest,
    responses(
        (status = 200, description = "The updated reading", body = ReadingDto),
        (status = 404, description = "No reading with this id"),
        (status = 422, description = "Malformed payload"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn patch_reading(
    State(store): State<ReadingStore>,
    Path(id): Path<i64>,
    Json(payload): Json<PatchReadingRequest>,
) -> Result<Json<ReadingDto>, AppError> {
    let reading = store
        .patch(id, payload.into())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(reading.into()))
}

/// Delete a reading permanently.
#[utoipa::path(
    delete,
    path = "/sensors/{id}",
    params(("id" = i64, Path, description = "Reading id")),
    responses(
        (status = 204, description = "Reading deleted"),
        (status = 404, description = "No reading with this id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn delete_reading(
    State(store): State<ReadingStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if store.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        create_reading,
        list_readings,
        get_reading,
        get_readings_by_name,
        replace_reading,
        patch_reading,
        delete_reading,
        health,
    ),
    components(schemas(
        ReadingDto,
        CreateReadingRequest,
        ReplaceReadingRequest,
        PatchReadingRequest,
    )),
    tags(
        (name = "sensors", description = "Sensor reading endpoints"),
        (name = "system",  description = "System endpoints"),
    ),
    info(
        title = "Sensor Telemetry API",
        version = "0.1.0",
        description = "CRUD API over timestamped sensor readings"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
