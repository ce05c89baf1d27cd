use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::location;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateLocationRequest {
    pub address: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateLocationRequest {
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationResponse {
    pub id: i32,
    pub address: String,
}

impl From<location::Model> for LocationResponse {
    fn from(model: location::Model) -> Self {
        Self {
            id: model.id,
            address: model.address,
        }
    }
}

/// Create a new location
#[utoipa::path(
    post,
    path = "/api/v1/locations",
    tag = "restaurants",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created successfully", body = ApiResponse<LocationResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_location(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LocationResponse>>), (StatusCode, Json<ErrorResponse>)> {
    if request.address.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Address must not be empty".to_string(),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

    let new_location = location::ActiveModel {
        address: Set(request.address),
        ..Default::default()
    };

    match new_location.insert(&state.db).await {
        Ok(location_model) => {
            info!("Location created with ID: {}", location_model.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: LocationResponse::from(location_model),
                    message: "Location created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create location: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating location".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all locations
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    tag = "restaurants",
    responses(
        (status = 200, description = "Locations retrieved successfully", body = ApiResponse<Vec<LocationResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_locations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LocationResponse>>>, StatusCode> {
    match location::Entity::find().all(&state.db).await {
        Ok(locations) => Ok(Json(ApiResponse {
            data: locations.into_iter().map(LocationResponse::from).collect(),
            message: "Locations retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Failed to retrieve locations: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific location by ID
#[utoipa::path(
    get,
    path = "/api/v1/locations/{location_id}",
    tag = "restaurants",
    params(
        ("location_id" = i32, Path, description = "Location ID"),
    ),
    responses(
        (status = 200, description = "Location retrieved successfully", body = ApiResponse<LocationResponse>),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_location(
    Path(location_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LocationResponse>>, StatusCode> {
    match location::Entity::find_by_id(location_id).one(&state.db).await {
        Ok(Some(location_model)) => Ok(Json(ApiResponse {
            data: LocationResponse::from(location_model),
            message: "Location retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => {
            warn!("Location with ID {} not found", location_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve location {}: {}", location_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a location
#[utoipa::path(
    put,
    path = "/api/v1/locations/{location_id}",
    tag = "restaurants",
    params(
        ("location_id" = i32, Path, description = "Location ID"),
    ),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated successfully", body = ApiResponse<LocationResponse>),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_location(
    Path(location_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<ApiResponse<LocationResponse>>, StatusCode> {
    let existing = match location::Entity::find_by_id(location_id).one(&state.db).await {
        Ok(Some(location_model)) => location_model,
        Ok(None) => {
            warn!("Location with ID {} not found for update", location_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup location {}: {}", location_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut location_active: location::ActiveModel = existing.into();
    if let Some(address) = request.address {
        location_active.address = Set(address);
    }

    match location_active.update(&state.db).await {
        Ok(updated) => {
            info!("Location {} updated successfully", location_id);
            Ok(Json(ApiResponse {
                data: LocationResponse::from(updated),
                message: "Location updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update location {}: {}", location_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a location
#[utoipa::path(
    delete,
    path = "/api/v1/locations/{location_id}",
    tag = "restaurants",
    params(
        ("location_id" = i32, Path, description = "Location ID"),
    ),
    responses(
        (status = 200, description = "Location deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_location(
    Path(location_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match location::Entity::delete_by_id(location_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Location {} deleted successfully", location_id);
            Ok(Json(ApiResponse {
                data: format!("Location {} deleted", location_id),
                message: "Location deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("Location with ID {} not found for deletion", location_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to delete location {}: {}", location_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
