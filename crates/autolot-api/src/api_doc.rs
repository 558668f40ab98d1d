//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use autolot_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AutoLot API",
        version = "0.1.0",
        description = "Photo management and listing API for a car dealership. Staff upload photos into fixed slots plus an ordered gallery, then submit the draft as a single atomic car listing. All endpoints are versioned under /api/v1/."
    ),
    paths(
        // Images
        handlers::images::upload_image,
        handlers::images::delete_image,
        // Cars
        handlers::cars::create_car,
        handlers::cars::list_cars,
        handlers::cars::get_car,
        handlers::cars::delete_car,
    ),
    components(schemas(
        models::Car,
        models::CarImage,
        models::CarFields,
        models::PhotoRole,
        handlers::images::UploadImageResponse,
        handlers::images::DeleteImageRequest,
        handlers::cars::CreateCarRequest,
        error::ErrorResponse,
    )),
    tags(
        (name = "images", description = "Image upload and deletion"),
        (name = "cars", description = "Car listing management")
    )
)]
pub struct ApiDoc;
