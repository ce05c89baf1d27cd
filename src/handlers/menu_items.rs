use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::menu_item::{self, Category};
use model::entities::{menu_variant, restaurant};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateMenuItemRequest {
    pub restaurant_id: i32,
    /// Item name, unique within the restaurant
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    /// Base price, must not be negative
    pub base_price: Decimal,
    pub is_active: Option<bool>,
    /// Preparation time in minutes; drives kitchen ticket due times
    pub prep_minutes: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub base_price: Option<Decimal>,
    pub is_active: Option<bool>,
    pub prep_minutes: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub base_price: Decimal,
    pub is_active: bool,
    pub prep_minutes: i32,
}

impl From<menu_item::Model> for MenuItemResponse {
    fn from(model: menu_item::Model) -> Self {
        Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            name: model.name,
            description: model.description,
            category: model.category,
            base_price: model.base_price,
            is_active: model.is_active,
            prep_minutes: model.prep_minutes,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateMenuVariantRequest {
    pub name: String,
    /// Signed price adjustment relative to the item's base price
    pub price_modifier: Option<Decimal>,
    pub stock: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateMenuVariantRequest {
    pub name: Option<String>,
    pub price_modifier: Option<Decimal>,
    pub stock: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuVariantResponse {
    pub id: i32,
    pub menu_item_id: i32,
    pub name: String,
    pub price_modifier: Decimal,
    pub stock: i32,
}

impl From<menu_variant::Model> for MenuVariantResponse {
    fn from(model: menu_variant::Model) -> Self {
        Self {
            id: model.id,
            menu_item_id: model.menu_item_id,
            name: model.name,
            price_modifier: model.price_modifier,
            stock: model.stock,
        }
    }
}

fn validation_error(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            code: "VALIDATION_ERROR".to_string(),
            success: false,
        }),
    )
}

fn database_error(context: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Internal server error while {}", context),
            code: "DATABASE_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Create a new menu item
#[utoipa::path(
    post,
    path = "/api/v1/menu-items",
    tag = "menu",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 201, description = "Menu item created successfully", body = ApiResponse<MenuItemResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 409, description = "Menu item name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_menu_item(
    State(state): State<AppState>,
    Json(request): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItemResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Creating menu item '{}' for restaurant {}",
        request.name, request.restaurant_id
    );

    if request.name.trim().is_empty() {
        return Err(validation_error("Menu item name must not be empty".to_string()));
    }
    if request.base_price < Decimal::ZERO {
        return Err(validation_error("Base price must not be negative".to_string()));
    }
    if request.prep_minutes.is_some_and(|minutes| minutes < 0) {
        return Err(validation_error("Prep minutes must not be negative".to_string()));
    }

    match restaurant::Entity::find_by_id(request.restaurant_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Restaurant with ID {} does not exist", request.restaurant_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!(
                        "Restaurant with ID {} does not exist",
                        request.restaurant_id
                    ),
                    code: "INVALID_RESTAURANT_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to verify restaurant {}: {}",
                request.restaurant_id, db_error
            );
            return Err(database_error("verifying restaurant"));
        }
    }

    let new_item = menu_item::ActiveModel {
        restaurant_id: Set(request.restaurant_id),
        name: Set(request.name.clone()),
        description: Set(request.description),
        category: Set(request.category),
        base_price: Set(request.base_price),
        is_active: Set(request.is_active.unwrap_or(true)),
        prep_minutes: Set(request.prep_minutes.unwrap_or(15)),
        ..Default::default()
    };

    match new_item.insert(&state.db).await {
        Ok(item_model) => {
            info!(
                "Menu item created with ID: {}, name: {}",
                item_model.id, item_model.name
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: MenuItemResponse::from(item_model),
                    message: "Menu item created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create menu item '{}': {}", request.name, db_error);
            if is_constraint_violation(&db_error) {
                Err((
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: format!(
                            "Menu item '{}' already exists in restaurant {}",
                            request.name, request.restaurant_id
                        ),
                        code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                        success: false,
                    }),
                ))
            } else {
                Err(database_error("creating menu item"))
            }
        }
    }
}

/// Get all menu items
#[utoipa::path(
    get,
    path = "/api/v1/menu-items",
    tag = "menu",
    responses(
        (status = 200, description = "Menu items retrieved successfully", body = ApiResponse<Vec<MenuItemResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_menu_items(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuItemResponse>>>, StatusCode> {
    match menu_item::Entity::find()
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
            error!("Failed to retrieve menu items: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific menu item by ID
#[utoipa::path(
    get,
    path = "/api/v1/menu-items/{menu_item_id}",
    tag = "menu",
    params(
        ("menu_item_id" = i32, Path, description = "Menu item ID"),
    ),
    responses(
        (status = 200, description = "Menu item retrieved successfully", body = ApiResponse<MenuItemResponse>),
        (status = 404, description = "Menu item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_menu_item(
    Path(menu_item_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MenuItemResponse>>, StatusCode> {
    match menu_item::Entity::find_by_id(menu_item_id).one(&state.db).await {
        Ok(Some(item_model)) => Ok(Json(ApiResponse {
            data: MenuItemResponse::from(item_model),
            message: "Menu item retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => {
            warn!("Menu item with ID {} not found", menu_item_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve menu item {}: {}", menu_item_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a menu item
#[utoipa::path(
    put,
    path = "/api/v1/menu-items/{menu_item_id}",
    tag = "menu",
    params(
        ("menu_item_id" = i32, Path, description = "Menu item ID"),
    ),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated successfully", body = ApiResponse<MenuItemResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Menu item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_menu_item(
    Path(menu_item_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateMenuItemRequest>,
) -> Result<Json<ApiResponse<MenuItemResponse>>, (StatusCode, Json<ErrorResponse>)> {
    if request.base_price.is_some_and(|price| price < Decimal::ZERO) {
        return Err(validation_error("Base price must not be negative".to_string()));
    }
    if request.prep_minutes.is_some_and(|minutes| minutes < 0) {
        return Err(validation_error("Prep minutes must not be negative".to_string()));
    }

    let existing = match menu_item::Entity::find_by_id(menu_item_id).one(&state.db).await {
        Ok(Some(item_model)) => item_model,
        Ok(None) => {
            warn!("Menu item with ID {} not found for update", menu_item_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Menu item with ID {} does not exist", menu_item_id),
                    code: "INVALID_MENU_ITEM_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup menu item {}: {}", menu_item_id, db_error);
            return Err(database_error("looking up menu item"));
        }
    };

    let mut item_active: menu_item::ActiveModel = existing.into();
    if let Some(name) = request.name {
        item_active.name = Set(name);
    }
    if let Some(description) = request.description {
        item_active.description = Set(Some(description));
    }
    if let Some(category) = request.category {
        item_active.category = Set(category);
    }
    if let Some(base_price) = request.base_price {
        item_active.base_price = Set(base_price);
    }
    if let Some(is_active) = request.is_active {
        item_active.is_active = Set(is_active);
    }
    if let Some(prep_minutes) = request.prep_minutes {
        item_active.prep_minutes = Set(prep_minutes);
    }

    match item_active.update(&state.db).await {
        Ok(updated) => {
            info!("Menu item {} updated successfully", menu_item_id);
            Ok(Json(ApiResponse {
                data: MenuItemResponse::from(updated),
                message: "Menu item updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update menu item {}: {}", menu_item_id, db_error);
            Err(database_error("updating menu item"))
        }
    }
}

/// Delete a menu item
///
/// Blocked while order items still reference the item.
#[utoipa::path(
    delete,
    path = "/api/v1/menu-items/{menu_item_id}",
    tag = "menu",
    params(
        ("menu_item_id" = i32, Path, description = "Menu item ID"),
    ),
    responses(
        (status = 200, description = "Menu item deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Menu item not found", body = ErrorResponse),
        (status = 409, description = "Menu item still referenced by order items", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_menu_item(
    Path(menu_item_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    match menu_item::Entity::delete_by_id(menu_item_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Menu item {} deleted successfully", menu_item_id);
            Ok(Json(ApiResponse {
                data: format!("Menu item {} deleted", menu_item_id),
                message: "Menu item deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("Menu item with ID {} not found for deletion", menu_item_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Menu item with ID {} does not exist", menu_item_id),
                    code: "INVALID_MENU_ITEM_ID".to_string(),
                    success: false,
                }),
            ))
        }
        Err(db_error) => {
            if is_constraint_violation(&db_error) {
                warn!("Menu item {} still referenced by order items", menu_item_id);
                Err((
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: format!(
                            "Menu item {} is still referenced by order items",
                            menu_item_id
                        ),
                        code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                        success: false,
                    }),
                ))
            } else {
                error!("Failed to delete menu item {}: {}", menu_item_id, db_error);
                Err(database_error("deleting menu item"))
            }
        }
    }
}

/// Create a variant for a menu item
#[utoipa::path(
    post,
    path = "/api/v1/menu-items/{menu_item_id}/variants",
    tag = "menu",
    params(
        ("menu_item_id" = i32, Path, description = "Menu item ID"),
    ),
    request_body = CreateMenuVariantRequest,
    responses(
        (status = 201, description = "Variant created successfully", body = ApiResponse<MenuVariantResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Menu item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_menu_variant(
    Path(menu_item_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateMenuVariantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MenuVariantResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    if request.name.trim().is_empty() {
        return Err(validation_error("Variant name must not be empty".to_string()));
    }
    if request.stock.is_some_and(|stock| stock < 0) {
        return Err(validation_error("Variant stock must not be negative".to_string()));
    }

    match menu_item::Entity::find_by_id(menu_item_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Menu item with ID {} does not exist", menu_item_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Menu item with ID {} does not exist", menu_item_id),
                    code: "INVALID_MENU_ITEM_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to verify menu item {}: {}", menu_item_id, db_error);
            return Err(database_error("verifying menu item"));
        }
    }

    let new_variant = menu_variant::ActiveModel {
        menu_item_id: Set(menu_item_id),
        name: Set(request.name),
        price_modifier: Set(request.price_modifier.unwrap_or(Decimal::ZERO)),
        stock: Set(request.stock.unwrap_or(0)),
        ..Default::default()
    };

    match new_variant.insert(&state.db).await {
        Ok(variant_model) => {
            info!(
                "Variant created with ID: {} for menu item {}",
                variant_model.id, menu_item_id
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: MenuVariantResponse::from(variant_model),
                    message: "Variant created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!(
                "Failed to create variant for menu item {}: {}",
                menu_item_id, db_error
            );
            Err(database_error("creating variant"))
        }
    }
}

/// Get all variants of a menu item
#[utoipa::path(
    get,
    path = "/api/v1/menu-items/{menu_item_id}/variants",
    tag = "menu",
    params(
        ("menu_item_id" = i32, Path, description = "Menu item ID"),
    ),
    responses(
        (status = 200, description = "Variants retrieved successfully", body = ApiResponse<Vec<MenuVariantResponse>>),
        (status = 404, description = "Menu item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_menu_variants(
    Path(menu_item_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuVariantResponse>>>, StatusCode> {
    match menu_item::Entity::find_by_id(menu_item_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Menu item with ID {} not found", menu_item_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to verify menu item {}: {}", menu_item_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match menu_variant::Entity::find()
        .filter(menu_variant::Column::MenuItemId.eq(menu_item_id))
        .all(&state.db)
        .await
    {
        Ok(variants) => Ok(Json(ApiResponse {
            data: variants.into_iter().map(MenuVariantResponse::from).collect(),
            message: "Variants retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!(
                "Failed to retrieve variants for menu item {}: {}",
                menu_item_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a menu variant
#[utoipa::path(
    put,
    path = "/api/v1/menu-variants/{variant_id}",
    tag = "menu",
    params(
        ("variant_id" = i32, Path, description = "Variant ID"),
    ),
    request_body = UpdateMenuVariantRequest,
    responses(
        (status = 200, description = "Variant updated successfully", body = ApiResponse<MenuVariantResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Variant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_menu_variant(
    Path(variant_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateMenuVariantRequest>,
) -> Result<Json<ApiResponse<MenuVariantResponse>>, (StatusCode, Json<ErrorResponse>)> {
    if request.stock.is_some_and(|stock| stock < 0) {
        return Err(validation_error("Variant stock must not be negative".to_string()));
    }

    let existing = match menu_variant::Entity::find_by_id(variant_id).one(&state.db).await {
        Ok(Some(variant_model)) => variant_model,
        Ok(None) => {
            warn!("Variant with ID {} not found for update", variant_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Variant with ID {} does not exist", variant_id),
                    code: "INVALID_VARIANT_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup variant {}: {}", variant_id, db_error);
            return Err(database_error("looking up variant"));
        }
    };

    let mut variant_active: menu_variant::ActiveModel = existing.into();
    if let Some(name) = request.name {
        variant_active.name = Set(name);
    }
    if let Some(price_modifier) = request.price_modifier {
        variant_active.price_modifier = Set(price_modifier);
    }
    if let Some(stock) = request.stock {
        variant_active.stock = Set(stock);
    }

    match variant_active.update(&state.db).await {
        Ok(updated) => {
            info!("Variant {} updated successfully", variant_id);
            Ok(Json(ApiResponse {
                data: MenuVariantResponse::from(updated),
                message: "Variant updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update variant {}: {}", variant_id, db_error);
            Err(database_error("updating variant"))
        }
    }
}

/// Delete a menu variant
#[utoipa::path(
    delete,
    path = "/api/v1/menu-variants/{variant_id}",
    tag = "menu",
    params(
        ("variant_id" = i32, Path, description = "Variant ID"),
    ),
    responses(
        (status = 200, description = "Variant deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Variant not found", body = ErrorResponse),
        (status = 409, description = "Variant still referenced by order items", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_menu_variant(
    Path(variant_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    match menu_variant::Entity::delete_by_id(variant_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Variant {} deleted successfully", variant_id);
            Ok(Json(ApiResponse {
                data: format!("Variant {} deleted", variant_id),
                message: "Variant deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("Variant with ID {} not found for deletion", variant_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Variant with ID {} does not exist", variant_id),
                    code: "INVALID_VARIANT_ID".to_string(),
                    success: false,
                }),
            ))
        }
        Err(db_error) => {
            if is_constraint_violation(&db_error) {
                warn!("Variant {} still referenced by order items", variant_id);
                Err((
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: format!(
                            "Variant {} is still referenced by order items",
                            variant_id
                        ),
                        code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                        success: false,
                    }),
                ))
            } else {
                error!("Failed to delete variant {}: {}", variant_id, db_error);
                Err(database_error("deleting variant"))
            }
        }
    }
}
