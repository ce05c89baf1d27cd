use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::table::{self, TableStatus};
use model::entities::restaurant;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTableRequest {
    pub restaurant_id: i32,
    /// Table number, unique within the restaurant
    pub table_number: i32,
    /// Seating capacity, at least 1
    pub capacity: i32,
    pub status: Option<TableStatus>,
    /// Floor plan coordinates, free-form JSON
    pub coordinates: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateTableRequest {
    pub table_number: Option<i32>,
    pub capacity: Option<i32>,
    pub status: Option<TableStatus>,
    pub coordinates: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TableResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub table_number: i32,
    pub capacity: i32,
    pub status: TableStatus,
    pub coordinates: Option<serde_json::Value>,
}

impl From<table::Model> for TableResponse {
    fn from(model: table::Model) -> Self {
        Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            table_number: model.table_number,
            capacity: model.capacity,
            status: model.status,
            coordinates: model.coordinates,
        }
    }
}

/// Create a new table
#[utoipa::path(
    post,
    path = "/api/v1/tables",
    tag = "tables",
    request_body = CreateTableRequest,
    responses(
        (status = 201, description = "Table created successfully", body = ApiResponse<TableResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 409, description = "Table number already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_table(
    State(state): State<AppState>,
    Json(request): Json<CreateTableRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TableResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Creating table {} for restaurant {}",
        request.table_number, request.restaurant_id
    );

    if request.capacity < 1 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Table capacity must be at least 1".to_string(),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

    match restaurant::Entity::find_by_id(request.restaurant_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!(
                "Restaurant with ID {} does not exist",
                request.restaurant_id
            );
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

    let new_table = table::ActiveModel {
        restaurant_id: Set(request.restaurant_id),
        table_number: Set(request.table_number),
        capacity: Set(request.capacity),
        status: Set(request.status.unwrap_or(TableStatus::Free)),
        coordinates: Set(request.coordinates),
        ..Default::default()
    };

    match new_table.insert(&state.db).await {
        Ok(table_model) => {
            info!(
                "Table created with ID: {}, number: {}",
                table_model.id, table_model.table_number
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: TableResponse::from(table_model),
                    message: "Table created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create table: {}", db_error);
            let (status, error_response) = if is_constraint_violation(&db_error) {
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: format!(
                            "Table number {} already exists in restaurant {}",
                            request.table_number, request.restaurant_id
                        ),
                        code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                        success: false,
                    },
                )
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error while creating table".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    },
                )
            };
            Err((status, Json(error_response)))
        }
    }
}

/// Get all tables
#[utoipa::path(
    get,
    path = "/api/v1/tables",
    tag = "tables",
    responses(
        (status = 200, description = "Tables retrieved successfully", body = ApiResponse<Vec<TableResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_tables(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TableResponse>>>, StatusCode> {
    match table::Entity::find().all(&state.db).await {
        Ok(tables) => Ok(Json(ApiResponse {
            data: tables.into_iter().map(TableResponse::from).collect(),
            message: "Tables retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Failed to retrieve tables: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific table by ID
#[utoipa::path(
    get,
    path = "/api/v1/tables/{table_id}",
    tag = "tables",
    params(
        ("table_id" = i32, Path, description = "Table ID"),
    ),
    responses(
        (status = 200, description = "Table retrieved successfully", body = ApiResponse<TableResponse>),
        (status = 404, description = "Table not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_table(
    Path(table_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TableResponse>>, StatusCode> {
    match table::Entity::find_by_id(table_id).one(&state.db).await {
        Ok(Some(table_model)) => Ok(Json(ApiResponse {
            data: TableResponse::from(table_model),
            message: "Table retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => {
            warn!("Table with ID {} not found", table_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve table {}: {}", table_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a table
#[utoipa::path(
    put,
    path = "/api/v1/tables/{table_id}",
    tag = "tables",
    params(
        ("table_id" = i32, Path, description = "Table ID"),
    ),
    request_body = UpdateTableRequest,
    responses(
        (status = 200, description = "Table updated successfully", body = ApiResponse<TableResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Table not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_table(
    Path(table_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateTableRequest>,
) -> Result<Json<ApiResponse<TableResponse>>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(capacity) = request.capacity {
        if capacity < 1 {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Table capacity must be at least 1".to_string(),
                    code: "VALIDATION_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    }

    let existing = match table::Entity::find_by_id(table_id).one(&state.db).await {
        Ok(Some(table_model)) => table_model,
        Ok(None) => {
            warn!("Table with ID {} not found for update", table_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Table with ID {} does not exist", table_id),
                    code: "INVALID_TABLE_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup table {}: {}", table_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while looking up table".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let mut table_active: table::ActiveModel = existing.into();
    if let Some(table_number) = request.table_number {
        table_active.table_number = Set(table_number);
    }
    if let Some(capacity) = request.capacity {
        table_active.capacity = Set(capacity);
    }
    if let Some(status) = request.status {
        table_active.status = Set(status);
    }
    if let Some(coordinates) = request.coordinates {
        table_active.coordinates = Set(Some(coordinates));
    }

    match table_active.update(&state.db).await {
        Ok(updated) => {
            info!("Table {} updated successfully", table_id);
            Ok(Json(ApiResponse {
                data: TableResponse::from(updated),
                message: "Table updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update table {}: {}", table_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating table".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete a table
///
/// Blocked while orders still reference the table.
#[utoipa::path(
    delete,
    path = "/api/v1/tables/{table_id}",
    tag = "tables",
    params(
        ("table_id" = i32, Path, description = "Table ID"),
    ),
    responses(
        (status = 200, description = "Table deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Table not found", body = ErrorResponse),
        (status = 409, description = "Table still referenced by orders", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_table(
    Path(table_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    match table::Entity::delete_by_id(table_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Table {} deleted successfully", table_id);
            Ok(Json(ApiResponse {
                data: format!("Table {} deleted", table_id),
                message: "Table deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("Table with ID {} not found for deletion", table_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Table with ID {} does not exist", table_id),
                    code: "INVALID_TABLE_ID".to_string(),
                    success: false,
                }),
            ))
        }
        Err(db_error) => {
            if is_constraint_violation(&db_error) {
                warn!("Table {} still referenced by orders", table_id);
                Err((
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: format!("Table {} is still referenced by orders", table_id),
                        code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                        success: false,
                    }),
                ))
            } else {
                error!("Failed to delete table {}: {}", table_id, db_error);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error while deleting table".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    }),
                ))
            }
        }
    }
}
