use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Duration, Utc};
use model::entities::kitchen_ticket::{self, TicketStatus};
use model::entities::{menu_item, order_item};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateKitchenTicketRequest {
    /// Preparation station; defaults to "Kitchen"
    pub station: Option<String>,
    /// Lower numbers are picked first; defaults to 0
    pub priority: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateKitchenTicketRequest {
    pub station: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KitchenTicketResponse {
    pub id: i32,
    pub order_item_id: i32,
    pub station: String,
    pub status: TicketStatus,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    /// Created-at plus the menu item's prep time
    pub due_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<kitchen_ticket::Model> for KitchenTicketResponse {
    fn from(model: kitchen_ticket::Model) -> Self {
        Self {
            id: model.id,
            order_item_id: model.order_item_id,
            station: model.station,
            status: model.status,
            priority: model.priority,
            created_at: model.created_at,
            due_at: model.due_at,
            completed_at: model.completed_at,
        }
    }
}

/// Query parameters for the kitchen display list
#[derive(Debug, Deserialize, IntoParams)]
pub struct KitchenTicketParams {
    /// Filter by station name
    pub station: Option<String>,
    /// Filter by ticket status
    pub status: Option<TicketStatus>,
}

/// Open a kitchen ticket for an order item
///
/// The due time is derived from the menu item's prep minutes. Each order
/// item carries at most one ticket.
#[utoipa::path(
    post,
    path = "/api/v1/order-items/{order_item_id}/ticket",
    tag = "kitchen",
    params(
        ("order_item_id" = i32, Path, description = "Order item ID"),
    ),
    request_body = CreateKitchenTicketRequest,
    responses(
        (status = 201, description = "Ticket created successfully", body = ApiResponse<KitchenTicketResponse>),
        (status = 404, description = "Order item not found", body = ErrorResponse),
        (status = 409, description = "Order item already has a ticket", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_kitchen_ticket(
    Path(order_item_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateKitchenTicketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<KitchenTicketResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    debug!("Opening kitchen ticket for order item {}", order_item_id);

    let item = match order_item::Entity::find_by_id(order_item_id).one(&state.db).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            warn!("Order item with ID {} does not exist", order_item_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Order item with ID {} does not exist", order_item_id),
                    code: "INVALID_ORDER_ITEM_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to verify order item {}: {}", order_item_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while verifying order item".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let menu = match menu_item::Entity::find_by_id(item.menu_item_id).one(&state.db).await {
        Ok(Some(menu)) => menu,
        Ok(None) => {
            error!("Order item {} has no menu item row", order_item_id);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while loading menu item".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to load menu item {}: {}",
                item.menu_item_id, db_error
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while loading menu item".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let now = Utc::now();
    let new_ticket = kitchen_ticket::ActiveModel {
        order_item_id: Set(order_item_id),
        station: Set(request.station.unwrap_or_else(|| "Kitchen".to_string())),
        status: Set(TicketStatus::Pending),
        priority: Set(request.priority.unwrap_or(0)),
        created_at: Set(now),
        due_at: Set(now + Duration::minutes(i64::from(menu.prep_minutes))),
        completed_at: Set(None),
        ..Default::default()
    };

    // The unique index on order_item_id backs this up under races.
    match new_ticket.insert(&state.db).await {
        Ok(ticket_model) => {
            info!(
                "Kitchen ticket created with ID: {} for order item {}, due at {}",
                ticket_model.id, order_item_id, ticket_model.due_at
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: KitchenTicketResponse::from(ticket_model),
                    message: "Ticket created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!(
                "Failed to create ticket for order item {}: {}",
                order_item_id, db_error
            );
            let (status, error_response) = if is_constraint_violation(&db_error) {
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: format!(
                            "Order item {} already has a kitchen ticket",
                            order_item_id
                        ),
                        code: "TICKET_ALREADY_EXISTS".to_string(),
                        success: false,
                    },
                )
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error while creating ticket".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    },
                )
            };
            Err((status, Json(error_response)))
        }
    }
}

/// Get kitchen tickets for the display, most urgent first
#[utoipa::path(
    get,
    path = "/api/v1/kitchen-tickets",
    tag = "kitchen",
    params(KitchenTicketParams),
    responses(
        (status = 200, description = "Tickets retrieved successfully", body = ApiResponse<Vec<KitchenTicketResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_kitchen_tickets(
    State(state): State<AppState>,
    Query(params): Query<KitchenTicketParams>,
) -> Result<Json<ApiResponse<Vec<KitchenTicketResponse>>>, StatusCode> {
    let mut query = kitchen_ticket::Entity::find()
        .order_by_asc(kitchen_ticket::Column::Priority)
        .order_by_asc(kitchen_ticket::Column::CreatedAt);
    if let Some(station) = &params.station {
        query = query.filter(kitchen_ticket::Column::Station.eq(station.clone()));
    }
    if let Some(status) = params.status {
        query = query.filter(kitchen_ticket::Column::Status.eq(status));
    }

    match query.all(&state.db).await {
        Ok(tickets) => Ok(Json(ApiResponse {
            data: tickets
                .into_iter()
                .map(KitchenTicketResponse::from)
                .collect(),
            message: "Tickets retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Failed to retrieve kitchen tickets: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a kitchen ticket
///
/// Completion stamps the completed-at time once.
#[utoipa::path(
    put,
    path = "/api/v1/kitchen-tickets/{ticket_id}",
    tag = "kitchen",
    params(
        ("ticket_id" = i32, Path, description = "Ticket ID"),
    ),
    request_body = UpdateKitchenTicketRequest,
    responses(
        (status = 200, description = "Ticket updated successfully", body = ApiResponse<KitchenTicketResponse>),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_kitchen_ticket(
    Path(ticket_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateKitchenTicketRequest>,
) -> Result<Json<ApiResponse<KitchenTicketResponse>>, StatusCode> {
    let existing = match kitchen_ticket::Entity::find_by_id(ticket_id).one(&state.db).await {
        Ok(Some(ticket_model)) => ticket_model,
        Ok(None) => {
            warn!("Ticket with ID {} not found for update", ticket_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup ticket {}: {}", ticket_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let already_completed = existing.completed_at.is_some();
    let mut ticket_active: kitchen_ticket::ActiveModel = existing.into();
    if let Some(station) = request.station {
        ticket_active.station = Set(station);
    }
    if let Some(priority) = request.priority {
        ticket_active.priority = Set(priority);
    }
    if let Some(status) = request.status {
        ticket_active.status = Set(status);
        if status == TicketStatus::Completed && !already_completed {
            ticket_active.completed_at = Set(Some(Utc::now()));
        }
    }

    match ticket_active.update(&state.db).await {
        Ok(updated) => {
            info!("Ticket {} updated to status {:?}", ticket_id, updated.status);
            Ok(Json(ApiResponse {
                data: KitchenTicketResponse::from(updated),
                message: "Ticket updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update ticket {}: {}", ticket_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a kitchen ticket
#[utoipa::path(
    delete,
    path = "/api/v1/kitchen-tickets/{ticket_id}",
    tag = "kitchen",
    params(
        ("ticket_id" = i32, Path, description = "Ticket ID"),
    ),
    responses(
        (status = 200, description = "Ticket deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_kitchen_ticket(
    Path(ticket_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match kitchen_ticket::Entity::delete_by_id(ticket_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Ticket {} deleted successfully", ticket_id);
            Ok(Json(ApiResponse {
                data: format!("Ticket {} deleted", ticket_id),
                message: "Ticket deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("Ticket with ID {} not found for deletion", ticket_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to delete ticket {}: {}", ticket_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
