use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{DateTime, Utc};
use model::entities::order::{self, OrderStatus};
use model::entities::order_item::{self, unit_price, OrderItemStatus};
use model::entities::{menu_item, menu_variant, table};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// One line of an order at creation time
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderItemRequest {
    pub menu_item_id: i32,
    pub variant_id: Option<i32>,
    /// Quantity, at least 1
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderRequest {
    pub table_id: i32,
    pub status: Option<OrderStatus>,
    /// Optional inline lines; created atomically with the order
    pub items: Option<Vec<CreateOrderItemRequest>>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateOrderItemRequest {
    /// Absent leaves the variant untouched; an explicit null clears it
    #[serde(default, deserialize_with = "double_option")]
    pub variant_id: Option<Option<i32>>,
    pub quantity: Option<i32>,
    pub notes: Option<String>,
    pub status: Option<OrderItemStatus>,
}

/// Deserializer that keeps the absent/null distinction: a missing field
/// stays `None` through `#[serde(default)]`, while an explicit `null`
/// becomes `Some(None)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub table_id: i32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<order::Model> for OrderResponse {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            table_id: model.table_id,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// One order line with its resolved menu names and prices
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub menu_item_name: String,
    pub variant_id: Option<i32>,
    pub variant_name: Option<String>,
    pub quantity: i32,
    /// Base price plus the variant modifier
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub notes: Option<String>,
    pub status: OrderItemStatus,
    pub created_at: DateTime<Utc>,
}

/// An order with all of its lines and the running total
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailResponse {
    pub id: i32,
    pub table_id: i32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
    /// Sum of line totals, cancelled lines excluded
    pub total: Decimal,
}

/// Query parameters for listing orders
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct OrderListParams {
    /// Page number, 1-based
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size
    #[validate(range(min = 1, max = 1000))]
    pub per_page: Option<u64>,
    /// Filter by order status
    pub status: Option<OrderStatus>,
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

fn invalid_reference(entity: &str, code: &str, id: i32) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("{} with ID {} does not exist", entity, id),
            code: code.to_string(),
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

/// Check the menu item and optional variant of one line, returning the
/// variant's owning item mismatch as a validation error.
async fn check_line_references<C: ConnectionTrait>(
    conn: &C,
    line: &CreateOrderItemRequest,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    match menu_item::Entity::find_by_id(line.menu_item_id).one(conn).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Menu item with ID {} does not exist", line.menu_item_id);
            return Err(invalid_reference(
                "Menu item",
                "INVALID_MENU_ITEM_ID",
                line.menu_item_id,
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to verify menu item {}: {}",
                line.menu_item_id, db_error
            );
            return Err(database_error("verifying menu item"));
        }
    }

    if let Some(variant_id) = line.variant_id {
        match menu_variant::Entity::find_by_id(variant_id).one(conn).await {
            Ok(Some(variant)) if variant.menu_item_id == line.menu_item_id => {}
            Ok(Some(_)) => {
                warn!(
                    "Variant {} does not belong to menu item {}",
                    variant_id, line.menu_item_id
                );
                return Err(validation_error(format!(
                    "Variant {} does not belong to menu item {}",
                    variant_id, line.menu_item_id
                )));
            }
            Ok(None) => {
                warn!("Variant with ID {} does not exist", variant_id);
                return Err(invalid_reference("Variant", "INVALID_VARIANT_ID", variant_id));
            }
            Err(db_error) => {
                error!("Failed to verify variant {}: {}", variant_id, db_error);
                return Err(database_error("verifying variant"));
            }
        }
    }

    Ok(())
}

/// Create a new order, optionally with inline order items
///
/// The order and its lines are written in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Referenced table, menu item or variant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Creating order for table {}", request.table_id);

    if let Some(items) = &request.items {
        if let Some(line) = items.iter().find(|line| line.quantity < 1) {
            warn!(
                "Rejected order with non-positive quantity for menu item {}",
                line.menu_item_id
            );
            return Err(validation_error("Quantity must be at least 1".to_string()));
        }
    }

    match table::Entity::find_by_id(request.table_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Table with ID {} does not exist", request.table_id);
            return Err(invalid_reference("Table", "INVALID_TABLE_ID", request.table_id));
        }
        Err(db_error) => {
            error!("Failed to verify table {}: {}", request.table_id, db_error);
            return Err(database_error("verifying table"));
        }
    }

    let txn = match state.db.begin().await {
        Ok(txn) => txn,
        Err(db_error) => {
            error!("Failed to start transaction: {}", db_error);
            return Err(database_error("creating order"));
        }
    };

    let now = Utc::now();
    let new_order = order::ActiveModel {
        table_id: Set(request.table_id),
        status: Set(request.status.unwrap_or(OrderStatus::Open)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let order_model = match new_order.insert(&txn).await {
        Ok(order_model) => order_model,
        Err(db_error) => {
            error!("Failed to insert order: {}", db_error);
            return Err(database_error("creating order"));
        }
    };

    if let Some(items) = request.items {
        for line in items {
            check_line_references(&txn, &line).await?;

            let new_item = order_item::ActiveModel {
                order_id: Set(order_model.id),
                menu_item_id: Set(line.menu_item_id),
                variant_id: Set(line.variant_id),
                quantity: Set(line.quantity),
                notes: Set(line.notes),
                status: Set(OrderItemStatus::Pending),
                created_at: Set(now),
                ..Default::default()
            };
            if let Err(db_error) = new_item.insert(&txn).await {
                error!(
                    "Failed to insert order item for order {}: {}",
                    order_model.id, db_error
                );
                return Err(database_error("creating order items"));
            }
        }
    }

    if let Err(db_error) = txn.commit().await {
        error!("Failed to commit order transaction: {}", db_error);
        return Err(database_error("creating order"));
    }

    info!(
        "Order created with ID: {} for table {}",
        order_model.id, order_model.table_id
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: OrderResponse::from(order_model),
            message: "Order created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get orders, paginated and optionally filtered by status
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "orders",
    params(OrderListParams),
    responses(
        (status = 200, description = "Orders retrieved successfully", body = ApiResponse<Vec<OrderResponse>>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_orders(
    State(state): State<AppState>,
    Valid(Query(params)): Valid<Query<OrderListParams>>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, StatusCode> {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(50);
    debug!("Listing orders page {} ({} per page)", page, per_page);

    let mut query = order::Entity::find().order_by_desc(order::Column::CreatedAt);
    if let Some(status) = params.status {
        query = query.filter(order::Column::Status.eq(status));
    }

    match query.paginate(&state.db, per_page).fetch_page(page - 1).await {
        Ok(orders) => Ok(Json(ApiResponse {
            data: orders.into_iter().map(OrderResponse::from).collect(),
            message: "Orders retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Failed to retrieve orders: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get an order with its lines, resolved menu names and total
#[utoipa::path(
    get,
    path = "/api/v1/orders/{order_id}",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    responses(
        (status = 200, description = "Order retrieved successfully", body = ApiResponse<OrderDetailResponse>),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_order(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OrderDetailResponse>>, StatusCode> {
    let order_model = match order::Entity::find_by_id(order_id).one(&state.db).await {
        Ok(Some(order_model)) => order_model,
        Ok(None) => {
            warn!("Order with ID {} not found", order_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to retrieve order {}: {}", order_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let rows = match order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .find_also_related(menu_item::Entity)
        .order_by_asc(order_item::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(rows) => rows,
        Err(db_error) => {
            error!(
                "Failed to retrieve items for order {}: {}",
                order_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Variants are resolved in one batch query instead of per line.
    let variant_ids: Vec<i32> = rows
        .iter()
        .filter_map(|(item, _)| item.variant_id)
        .collect();
    let variants = if variant_ids.is_empty() {
        Vec::new()
    } else {
        match menu_variant::Entity::find()
            .filter(menu_variant::Column::Id.is_in(variant_ids))
            .all(&state.db)
            .await
        {
            Ok(variants) => variants,
            Err(db_error) => {
                error!(
                    "Failed to retrieve variants for order {}: {}",
                    order_id, db_error
                );
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    };

    let mut items = Vec::with_capacity(rows.len());
    let mut total = Decimal::ZERO;
    for (item, menu) in rows {
        let menu = match menu {
            Some(menu) => menu,
            None => {
                error!("Order item {} has no menu item row", item.id);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };
        let variant = item
            .variant_id
            .and_then(|id| variants.iter().find(|variant| variant.id == id));
        let price = unit_price(menu.base_price, variant.map(|variant| variant.price_modifier));
        let line_total = price * Decimal::from(item.quantity);
        if item.status != OrderItemStatus::Cancelled {
            total += line_total;
        }
        items.push(OrderItemResponse {
            id: item.id,
            order_id: item.order_id,
            menu_item_id: item.menu_item_id,
            menu_item_name: menu.name,
            variant_id: item.variant_id,
            variant_name: variant.map(|variant| variant.name.clone()),
            quantity: item.quantity,
            unit_price: price,
            line_total,
            notes: item.notes,
            status: item.status,
            created_at: item.created_at,
        });
    }

    Ok(Json(ApiResponse {
        data: OrderDetailResponse {
            id: order_model.id,
            table_id: order_model.table_id,
            status: order_model.status,
            created_at: order_model.created_at,
            updated_at: order_model.updated_at,
            items,
            total,
        },
        message: "Order retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update an order's status
#[utoipa::path(
    put,
    path = "/api/v1/orders/{order_id}",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated successfully", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_order(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, StatusCode> {
    let existing = match order::Entity::find_by_id(order_id).one(&state.db).await {
        Ok(Some(order_model)) => order_model,
        Ok(None) => {
            warn!("Order with ID {} not found for update", order_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup order {}: {}", order_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut order_active: order::ActiveModel = existing.into();
    if let Some(status) = request.status {
        order_active.status = Set(status);
    }
    order_active.updated_at = Set(Utc::now());

    match order_active.update(&state.db).await {
        Ok(updated) => {
            info!("Order {} updated to status {:?}", order_id, updated.status);
            Ok(Json(ApiResponse {
                data: OrderResponse::from(updated),
                message: "Order updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update order {}: {}", order_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete an order
///
/// Cascades to its order items, their kitchen tickets and its payments.
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{order_id}",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    responses(
        (status = 200, description = "Order deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_order(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match order::Entity::delete_by_id(order_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Order {} deleted successfully", order_id);
            Ok(Json(ApiResponse {
                data: format!("Order {} deleted", order_id),
                message: "Order deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("Order with ID {} not found for deletion", order_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to delete order {}: {}", order_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Add a line to an existing order
#[utoipa::path(
    post,
    path = "/api/v1/orders/{order_id}/items",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    request_body = CreateOrderItemRequest,
    responses(
        (status = 201, description = "Order item created successfully", body = ApiResponse<OrderItemResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Order, menu item or variant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_order_item(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateOrderItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderItemResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    if request.quantity < 1 {
        return Err(validation_error("Quantity must be at least 1".to_string()));
    }

    match order::Entity::find_by_id(order_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Order with ID {} does not exist", order_id);
            return Err(invalid_reference("Order", "INVALID_ORDER_ID", order_id));
        }
        Err(db_error) => {
            error!("Failed to verify order {}: {}", order_id, db_error);
            return Err(database_error("verifying order"));
        }
    }

    check_line_references(&state.db, &request).await?;

    let menu = match menu_item::Entity::find_by_id(request.menu_item_id).one(&state.db).await {
        Ok(Some(menu)) => menu,
        Ok(None) => {
            return Err(invalid_reference(
                "Menu item",
                "INVALID_MENU_ITEM_ID",
                request.menu_item_id,
            ))
        }
        Err(db_error) => {
            error!(
                "Failed to load menu item {}: {}",
                request.menu_item_id, db_error
            );
            return Err(database_error("loading menu item"));
        }
    };
    let variant = match request.variant_id {
        Some(variant_id) => {
            match menu_variant::Entity::find_by_id(variant_id).one(&state.db).await {
                Ok(variant) => variant,
                Err(db_error) => {
                    error!("Failed to load variant {}: {}", variant_id, db_error);
                    return Err(database_error("loading variant"));
                }
            }
        }
        None => None,
    };

    let new_item = order_item::ActiveModel {
        order_id: Set(order_id),
        menu_item_id: Set(request.menu_item_id),
        variant_id: Set(request.variant_id),
        quantity: Set(request.quantity),
        notes: Set(request.notes),
        status: Set(OrderItemStatus::Pending),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    match new_item.insert(&state.db).await {
        Ok(item_model) => {
            info!(
                "Order item created with ID: {} for order {}",
                item_model.id, order_id
            );
            let price = unit_price(
                menu.base_price,
                variant.as_ref().map(|variant| variant.price_modifier),
            );
            let line_total = price * Decimal::from(item_model.quantity);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: OrderItemResponse {
                        id: item_model.id,
                        order_id: item_model.order_id,
                        menu_item_id: item_model.menu_item_id,
                        menu_item_name: menu.name,
                        variant_id: item_model.variant_id,
                        variant_name: variant.map(|variant| variant.name),
                        quantity: item_model.quantity,
                        unit_price: price,
                        line_total,
                        notes: item_model.notes,
                        status: item_model.status,
                        created_at: item_model.created_at,
                    },
                    message: "Order item created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!(
                "Failed to create order item for order {}: {}",
                order_id, db_error
            );
            Err(database_error("creating order item"))
        }
    }
}

/// Update an order line
#[utoipa::path(
    put,
    path = "/api/v1/order-items/{order_item_id}",
    tag = "orders",
    params(
        ("order_item_id" = i32, Path, description = "Order item ID"),
    ),
    request_body = UpdateOrderItemRequest,
    responses(
        (status = 200, description = "Order item updated successfully", body = ApiResponse<OrderItemResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Order item or variant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_order_item(
    Path(order_item_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateOrderItemRequest>,
) -> Result<Json<ApiResponse<OrderItemResponse>>, (StatusCode, Json<ErrorResponse>)> {
    if request.quantity.is_some_and(|quantity| quantity < 1) {
        return Err(validation_error("Quantity must be at least 1".to_string()));
    }

    let existing = match order_item::Entity::find_by_id(order_item_id).one(&state.db).await {
        Ok(Some(item_model)) => item_model,
        Ok(None) => {
            warn!("Order item with ID {} not found for update", order_item_id);
            return Err(invalid_reference(
                "Order item",
                "INVALID_ORDER_ITEM_ID",
                order_item_id,
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup order item {}: {}", order_item_id, db_error);
            return Err(database_error("looking up order item"));
        }
    };

    if let Some(Some(variant_id)) = request.variant_id {
        match menu_variant::Entity::find_by_id(variant_id).one(&state.db).await {
            Ok(Some(variant)) if variant.menu_item_id == existing.menu_item_id => {}
            Ok(Some(_)) => {
                return Err(validation_error(format!(
                    "Variant {} does not belong to menu item {}",
                    variant_id, existing.menu_item_id
                )))
            }
            Ok(None) => {
                return Err(invalid_reference("Variant", "INVALID_VARIANT_ID", variant_id))
            }
            Err(db_error) => {
                error!("Failed to verify variant {}: {}", variant_id, db_error);
                return Err(database_error("verifying variant"));
            }
        }
    }

    let menu_item_id = existing.menu_item_id;
    let mut item_active: order_item::ActiveModel = existing.into();
    if let Some(variant_id) = request.variant_id {
        item_active.variant_id = Set(variant_id);
    }
    if let Some(quantity) = request.quantity {
        item_active.quantity = Set(quantity);
    }
    if let Some(notes) = request.notes {
        item_active.notes = Set(Some(notes));
    }
    if let Some(status) = request.status {
        item_active.status = Set(status);
    }

    let updated = match item_active.update(&state.db).await {
        Ok(updated) => updated,
        Err(db_error) => {
            error!("Failed to update order item {}: {}", order_item_id, db_error);
            return Err(database_error("updating order item"));
        }
    };

    let menu = match menu_item::Entity::find_by_id(menu_item_id).one(&state.db).await {
        Ok(Some(menu)) => menu,
        Ok(None) => {
            error!("Order item {} has no menu item row", order_item_id);
            return Err(database_error("loading menu item"));
        }
        Err(db_error) => {
            error!("Failed to load menu item {}: {}", menu_item_id, db_error);
            return Err(database_error("loading menu item"));
        }
    };
    let variant = match updated.variant_id {
        Some(variant_id) => {
            match menu_variant::Entity::find_by_id(variant_id).one(&state.db).await {
                Ok(variant) => variant,
                Err(db_error) => {
                    error!("Failed to load variant {}: {}", variant_id, db_error);
                    return Err(database_error("loading variant"));
                }
            }
        }
        None => None,
    };

    info!("Order item {} updated successfully", order_item_id);
    let price = unit_price(
        menu.base_price,
        variant.as_ref().map(|variant| variant.price_modifier),
    );
    let line_total = price * Decimal::from(updated.quantity);
    Ok(Json(ApiResponse {
        data: OrderItemResponse {
            id: updated.id,
            order_id: updated.order_id,
            menu_item_id: updated.menu_item_id,
            menu_item_name: menu.name,
            variant_id: updated.variant_id,
            variant_name: variant.map(|variant| variant.name),
            quantity: updated.quantity,
            unit_price: price,
            line_total,
            notes: updated.notes,
            status: updated.status,
            created_at: updated.created_at,
        },
        message: "Order item updated successfully".to_string(),
        success: true,
    }))
}

/// Delete an order line
///
/// Cascades to the line's kitchen ticket.
#[utoipa::path(
    delete,
    path = "/api/v1/order-items/{order_item_id}",
    tag = "orders",
    params(
        ("order_item_id" = i32, Path, description = "Order item ID"),
    ),
    responses(
        (status = 200, description = "Order item deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Order item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_order_item(
    Path(order_item_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match order_item::Entity::delete_by_id(order_item_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Order item {} deleted successfully", order_item_id);
            Ok(Json(ApiResponse {
                data: format!("Order item {} deleted", order_item_id),
                message: "Order item deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("Order item with ID {} not found for deletion", order_item_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to delete order item {}: {}", order_item_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
