use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use autolot_core::draft::{assemble, Gallery, SlotAssignments};
use autolot_core::models::{Car, CarFields, PhotoRole};
use autolot_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Draft payload submitted by the admin UI: listing fields, one image per
/// filled slot, and the ordered gallery.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCarRequest {
    pub fields: CarFields,
    /// Slot images, keyed by photo role
    #[schema(value_type = Object)]
    pub slots: HashMap<PhotoRole, String>,
    /// Gallery image URLs in display order
    #[serde(default)]
    pub gallery: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Create car handler
///
/// Validates that every required photo slot is filled, assembles the slot
/// and gallery images into a single image list, and creates the listing
/// atomically. A draft with empty required slots is rejected with the
/// missing slot labels.
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    tag = "cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car listing created", body = Car),
        (status = 400, description = "Missing required photo slots or invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "create_car", title = %request.fields.title))]
pub async fn create_car(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<Car>), HttpAppError> {
    let mut slots = SlotAssignments::new();
    for (role, url) in request.slots {
        slots.assign(role, url);
    }

    let mut gallery = Gallery::new();
    for url in request.gallery {
        gallery.append(url);
    }

    let insert = assemble(request.fields, &slots, &gallery, &PhotoRole::ALL)?;
    let car = state.db.car_repository.create_car(insert).await?;

    Ok((StatusCode::CREATED, Json(car)))
}

/// List cars, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    tag = "cars",
    params(
        ("limit" = Option<i64>, Query, description = "Page size (default 50)"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Car listings", body = Vec<Car>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_cars"))]
pub async fn list_cars(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Car>>, HttpAppError> {
    let cars = state
        .db
        .car_repository
        .list_cars(query.limit.clamp(1, 200), query.offset.max(0))
        .await?;
    Ok(Json(cars))
}

/// Get a single car listing.
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    tag = "cars",
    params(("id" = Uuid, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car listing", body = Car),
        (status = 404, description = "Car not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_car", car_id = %id))]
pub async fn get_car(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Car>, HttpAppError> {
    let car = state
        .db
        .car_repository
        .get_car(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Car {} not found", id)))?;
    Ok(Json(car))
}

/// Delete a car listing.
///
/// The row is removed first; stored images are then deleted best-effort,
/// so a storage hiccup never leaves a half-deleted listing behind.
#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    tag = "cars",
    params(("id" = Uuid, Path, description = "Car id")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 404, description = "Car not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_car", car_id = %id))]
pub async fn delete_car(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let car = state.db.car_repository.delete_car(id).await?;

    for image in &car.images {
        if let Err(e) = state.media.gateway.delete_image(&image.url).await {
            tracing::warn!(
                car_id = %id,
                url = %image.url,
                error = %e,
                "Failed to delete stored image during car deletion"
            );
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
