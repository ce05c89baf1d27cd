use crate::handlers::menu_items::MenuItemResponse;
use crate::handlers::tables::TableResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::{location, menu_item, restaurant, table};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub location_id: Option<i32>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub location_id: Option<i32>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantResponse {
    pub id: i32,
    pub name: String,
    pub location_id: Option<i32>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl From<restaurant::Model> for RestaurantResponse {
    fn from(model: restaurant::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            location_id: model.location_id,
            address: model.address,
            phone_number: model.phone_number,
        }
    }
}

async fn check_location_exists(
    state: &AppState,
    location_id: i32,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    match location::Entity::find_by_id(location_id).one(&state.db).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => {
            warn!("Location with ID {} does not exist", location_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Location with ID {} does not exist", location_id),
                    code: "INVALID_LOCATION_ID".to_string(),
                    success: false,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to verify location {}: {}", location_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while verifying location".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Create a new restaurant
#[utoipa::path(
    post,
    path = "/api/v1/restaurants",
    tag = "restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created successfully", body = ApiResponse<RestaurantResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Referenced location not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(request): Json<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RestaurantResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    debug!("Creating restaurant with name: {}", request.name);

    if request.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Restaurant name must not be empty".to_string(),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

    if let Some(location_id) = request.location_id {
        check_location_exists(&state, location_id).await?;
    }

    let new_restaurant = restaurant::ActiveModel {
        name: Set(request.name),
        location_id: Set(request.location_id),
        address: Set(request.address),
        phone_number: Set(request.phone_number),
        ..Default::default()
    };

    match new_restaurant.insert(&state.db).await {
        Ok(restaurant_model) => {
            info!(
                "Restaurant created with ID: {}, name: {}",
                restaurant_model.id, restaurant_model.name
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: RestaurantResponse::from(restaurant_model),
                    message: "Restaurant created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create restaurant: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating restaurant".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all restaurants
#[utoipa::path(
    get,
    path = "/api/v1/restaurants",
    tag = "restaurants",
    responses(
        (status = 200, description = "Restaurants retrieved successfully", body = ApiResponse<Vec<RestaurantResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_restaurants(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RestaurantResponse>>>, StatusCode> {
    match restaurant::Entity::find().all(&state.db).await {
        Ok(restaurants) => Ok(Json(ApiResponse {
            data: restaurants
                .into_iter()
                .map(RestaurantResponse::from)
                .collect(),
            message: "Restaurants retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Failed to retrieve restaurants: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific restaurant by ID
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{restaurant_id}",
    tag = "restaurants",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 200, description = "Restaurant retrieved successfully", body = ApiResponse<RestaurantResponse>),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_restaurant(
    Path(restaurant_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RestaurantResponse>>, StatusCode> {
    match restaurant::Entity::find_by_id(restaurant_id).one(&state.db).await {
        Ok(Some(restaurant_model)) => Ok(Json(ApiResponse {
            data: RestaurantResponse::from(restaurant_model),
            message: "Restaurant retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => {
            warn!("Restaurant with ID {} not found", restaurant_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve restaurant {}: {}", restaurant_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a restaurant
#[utoipa::path(
    put,
    path = "/api/v1/restaurants/{restaurant_id}",
    tag = "restaurants",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID"),
    ),
    request_body = UpdateRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant updated successfully", body = ApiResponse<RestaurantResponse>),
        (status = 404, description = "Restaurant or location not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_restaurant(
    Path(restaurant_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateRestaurantRequest>,
) -> Result<Json<ApiResponse<RestaurantResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let existing = match restaurant::Entity::find_by_id(restaurant_id).one(&state.db).await {
        Ok(Some(restaurant_model)) => restaurant_model,
        Ok(None) => {
            warn!("Restaurant with ID {} not found for update", restaurant_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Restaurant with ID {} does not exist", restaurant_id),
                    code: "INVALID_RESTAURANT_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup restaurant {}: {}", restaurant_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while looking up restaurant".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    if let Some(location_id) = request.location_id {
        check_location_exists(&state, location_id).await?;
    }

    let mut restaurant_active: restaurant::ActiveModel = existing.into();
    if let Some(name) = request.name {
        restaurant_active.name = Set(name);
    }
    if let Some(location_id) = request.location_id {
        restaurant_active.location_id = Set(Some(location_id));
    }
    if let Some(address) = request.address {
        restaurant_active.address = Set(Some(address));
    }
    if let Some(phone_number) = request.phone_number {
        restaurant_active.phone_number = Set(Some(phone_number));
    }

    match restaurant_active.update(&state.db).await {
        Ok(updated) => {
            info!("Restaurant {} updated successfully", restaurant_id);
            Ok(Json(ApiResponse {
                data: RestaurantResponse::from(updated),
                message: "Restaurant updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update restaurant {}: {}", restaurant_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating restaurant".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete a restaurant
///
/// Cascades to tables, menu items, inventory items and sales records.
#[utoipa::path(
    delete,
    path = "/api/v1/restaurants/{restaurant_id}",
    tag = "restaurants",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 200, description = "Restaurant deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_restaurant(
    Path(restaurant_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match restaurant::Entity::delete_by_id(restaurant_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Restaurant {} deleted successfully", restaurant_id);
            Ok(Json(ApiResponse {
                data: format!("Restaurant {} deleted", restaurant_id),
                message: "Restaurant deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("Restaurant with ID {} not found for deletion", restaurant_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to delete restaurant {}: {}", restaurant_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all tables of a restaurant
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{restaurant_id}/tables",
    tag = "restaurants",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 200, description = "Tables retrieved successfully", body = ApiResponse<Vec<TableResponse>>),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_restaurant_tables(
    Path(restaurant_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TableResponse>>>, StatusCode> {
    match restaurant::Entity::find_by_id(restaurant_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Restaurant with ID {} not found", restaurant_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to verify restaurant {}: {}", restaurant_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match table::Entity::find()
        .filter(table::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(table::Column::TableNumber)
        .all(&state.db)
        .await
    {
        Ok(tables) => Ok(Json(ApiResponse {
            data: tables.into_iter().map(TableResponse::from).collect(),
            message: "Tables retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!(
                "Failed to retrieve tables for restaurant {}: {}",
                restaurant_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all menu items of a restaurant
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{restaurant_id}/menu-items",
    tag = "restaurants",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 200, description = "Menu items retrieved successfully", body = ApiResponse<Vec<MenuItemResponse>>),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_restaurant_menu_items(
    Path(restaurant_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuItemResponse>>>, StatusCode> {
    match restaurant::Entity::find_by_id(restaurant_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Restaurant with ID {} not found", restaurant_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to verify restaurant {}: {}", restaurant_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match menu_item::Entity::find()
        .filter(menu_item::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(menu_item::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(items) => Ok(Json(ApiResponse {
            data: items.into_iter().map(MenuItemResponse::from).collect(),
            message: "Menu items retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!(
                "Failed to retrieve menu items for restaurant {}: {}",
                restaurant_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
