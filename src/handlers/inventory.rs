use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use model::entities::{inventory_item, restaurant};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateInventoryItemRequest {
    /// Stock item name, unique within the restaurant
    pub name: String,
    /// Quantity on hand, must not be negative
    pub quantity: Decimal,
    /// Unit of measure, e.g. "kg" or "pcs"
    pub unit: String,
    pub low_stock_threshold: Option<Decimal>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateInventoryItemRequest {
    pub name: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub low_stock_threshold: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryItemResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub low_stock_threshold: Decimal,
    /// Quantity at or below the threshold
    pub is_low_stock: bool,
    pub last_updated: DateTime<Utc>,
}

impl From<inventory_item::Model> for InventoryItemResponse {
    fn from(model: inventory_item::Model) -> Self {
        let is_low_stock = model.is_low_stock();
        Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            name: model.name,
            quantity: model.quantity,
            unit: model.unit,
            low_stock_threshold: model.low_stock_threshold,
            is_low_stock,
            last_updated: model.last_updated,
        }
    }
}

/// Create an inventory item for a restaurant
#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{restaurant_id}/inventory",
    tag = "inventory",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID"),
    ),
    request_body = CreateInventoryItemRequest,
    responses(
        (status = 201, description = "Inventory item created successfully", body = ApiResponse<InventoryItemResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 409, description = "Item name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_inventory_item(
    Path(restaurant_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateInventoryItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InventoryItemResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    debug!(
        "Creating inventory item '{}' for restaurant {}",
        request.name, restaurant_id
    );

    if request.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Item name must not be empty".to_string(),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }
    if request.quantity < Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Quantity must not be negative".to_string(),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

    match restaurant::Entity::find_by_id(restaurant_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Restaurant with ID {} does not exist", restaurant_id);
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
            error!("Failed to verify restaurant {}: {}", restaurant_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while verifying restaurant".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    }

    let new_item = inventory_item::ActiveModel {
        restaurant_id: Set(restaurant_id),
        name: Set(request.name.clone()),
        quantity: Set(request.quantity),
        unit: Set(request.unit),
        low_stock_threshold: Set(request.low_stock_threshold.unwrap_or(Decimal::ZERO)),
        last_updated: Set(Utc::now()),
        ..Default::default()
    };

    match new_item.insert(&state.db).await {
        Ok(item_model) => {
            info!(
                "Inventory item created with ID: {}, name: {}",
                item_model.id, item_model.name
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: InventoryItemResponse::from(item_model),
                    message: "Inventory item created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!(
                "Failed to create inventory item '{}': {}",
                request.name, db_error
            );
            let (status, error_response) = if is_constraint_violation(&db_error) {
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: format!(
                            "Inventory item '{}' already exists in restaurant {}",
                            request.name, restaurant_id
                        ),
                        code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                        success: false,
                    },
                )
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error while creating inventory item".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    },
                )
            };
            Err((status, Json(error_response)))
        }
    }
}

/// Get all inventory items of a restaurant
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{restaurant_id}/inventory",
    tag = "inventory",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 200, description = "Inventory retrieved successfully", body = ApiResponse<Vec<InventoryItemResponse>>),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_inventory_items(
    Path(restaurant_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InventoryItemResponse>>>, StatusCode> {
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

    match inventory_item::Entity::find()
        .filter(inventory_item::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(inventory_item::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(items) => Ok(Json(ApiResponse {
            data: items.into_iter().map(InventoryItemResponse::from).collect(),
            message: "Inventory retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!(
                "Failed to retrieve inventory for restaurant {}: {}",
                restaurant_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update an inventory item
///
/// Every write refreshes the last-updated time.
#[utoipa::path(
    put,
    path = "/api/v1/inventory-items/{inventory_item_id}",
    tag = "inventory",
    params(
        ("inventory_item_id" = i32, Path, description = "Inventory item ID"),
    ),
    request_body = UpdateInventoryItemRequest,
    responses(
        (status = 200, description = "Inventory item updated successfully", body = ApiResponse<InventoryItemResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Inventory item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_inventory_item(
    Path(inventory_item_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateInventoryItemRequest>,
) -> Result<Json<ApiResponse<InventoryItemResponse>>, (StatusCode, Json<ErrorResponse>)> {
    if request.quantity.is_some_and(|quantity| quantity < Decimal::ZERO) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Quantity must not be negative".to_string(),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

    let existing = match inventory_item::Entity::find_by_id(inventory_item_id)
        .one(&state.db)
        .await
    {
        Ok(Some(item_model)) => item_model,
        Ok(None) => {
            warn!(
                "Inventory item with ID {} not found for update",
                inventory_item_id
            );
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!(
                        "Inventory item with ID {} does not exist",
                        inventory_item_id
                    ),
                    code: "INVALID_INVENTORY_ITEM_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup inventory item {}: {}",
                inventory_item_id, db_error
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while looking up inventory item".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let mut item_active: inventory_item::ActiveModel = existing.into();
    if let Some(name) = request.name {
        item_active.name = Set(name);
    }
    if let Some(quantity) = request.quantity {
        item_active.quantity = Set(quantity);
    }
    if let Some(unit) = request.unit {
        item_active.unit = Set(unit);
    }
    if let Some(low_stock_threshold) = request.low_stock_threshold {
        item_active.low_stock_threshold = Set(low_stock_threshold);
    }
    item_active.last_updated = Set(Utc::now());

    match item_active.update(&state.db).await {
        Ok(updated) => {
            info!("Inventory item {} updated successfully", inventory_item_id);
            Ok(Json(ApiResponse {
                data: InventoryItemResponse::from(updated),
                message: "Inventory item updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!(
                "Failed to update inventory item {}: {}",
                inventory_item_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating inventory item".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete an inventory item
#[utoipa::path(
    delete,
    path = "/api/v1/inventory-items/{inventory_item_id}",
    tag = "inventory",
    params(
        ("inventory_item_id" = i32, Path, description = "Inventory item ID"),
    ),
    responses(
        (status = 200, description = "Inventory item deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Inventory item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_inventory_item(
    Path(inventory_item_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match inventory_item::Entity::delete_by_id(inventory_item_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Inventory item {} deleted successfully", inventory_item_id);
            Ok(Json(ApiResponse {
                data: format!("Inventory item {} deleted", inventory_item_id),
                message: "Inventory item deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!(
                "Inventory item with ID {} not found for deletion",
                inventory_item_id
            );
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to delete inventory item {}: {}",
                inventory_item_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
