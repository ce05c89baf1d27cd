use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::screen_display;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateScreenDisplayRequest {
    pub name: String,
    /// Free-form display content
    pub content: Option<serde_json::Value>,
    /// Display configuration (layout, rotation, ...)
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateScreenDisplayRequest {
    pub name: Option<String>,
    pub content: Option<serde_json::Value>,
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScreenDisplayResponse {
    pub id: i32,
    pub name: String,
    pub content: serde_json::Value,
    pub config: serde_json::Value,
}

impl From<screen_display::Model> for ScreenDisplayResponse {
    fn from(model: screen_display::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            content: model.content,
            config: model.config,
        }
    }
}

/// Create a new screen display
#[utoipa::path(
    post,
    path = "/api/v1/screen-displays",
    tag = "displays",
    request_body = CreateScreenDisplayRequest,
    responses(
        (status = 201, description = "Display created successfully", body = ApiResponse<ScreenDisplayResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_screen_display(
    State(state): State<AppState>,
    Json(request): Json<CreateScreenDisplayRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScreenDisplayResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    if request.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Display name must not be empty".to_string(),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

    let new_display = screen_display::ActiveModel {
        name: Set(request.name),
        content: Set(request.content.unwrap_or_else(|| serde_json::json!({}))),
        config: Set(request.config.unwrap_or_else(|| serde_json::json!({}))),
        ..Default::default()
    };

    match new_display.insert(&state.db).await {
        Ok(display_model) => {
            info!(
                "Screen display created with ID: {}, name: {}",
                display_model.id, display_model.name
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: ScreenDisplayResponse::from(display_model),
                    message: "Display created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create screen display: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating display".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all screen displays
#[utoipa::path(
    get,
    path = "/api/v1/screen-displays",
    tag = "displays",
    responses(
        (status = 200, description = "Displays retrieved successfully", body = ApiResponse<Vec<ScreenDisplayResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_screen_displays(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ScreenDisplayResponse>>>, StatusCode> {
    match screen_display::Entity::find().all(&state.db).await {
        Ok(displays) => Ok(Json(ApiResponse {
            data: displays
                .into_iter()
                .map(ScreenDisplayResponse::from)
                .collect(),
            message: "Displays retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Failed to retrieve screen displays: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific screen display by ID
#[utoipa::path(
    get,
    path = "/api/v1/screen-displays/{display_id}",
    tag = "displays",
    params(
        ("display_id" = i32, Path, description = "Display ID"),
    ),
    responses(
        (status = 200, description = "Display retrieved successfully", body = ApiResponse<ScreenDisplayResponse>),
        (status = 404, description = "Display not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_screen_display(
    Path(display_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ScreenDisplayResponse>>, StatusCode> {
    match screen_display::Entity::find_by_id(display_id).one(&state.db).await {
        Ok(Some(display_model)) => Ok(Json(ApiResponse {
            data: ScreenDisplayResponse::from(display_model),
            message: "Display retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => {
            warn!("Screen display with ID {} not found", display_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve screen display {}: {}", display_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a screen display
#[utoipa::path(
    put,
    path = "/api/v1/screen-displays/{display_id}",
    tag = "displays",
    params(
        ("display_id" = i32, Path, description = "Display ID"),
    ),
    request_body = UpdateScreenDisplayRequest,
    responses(
        (status = 200, description = "Display updated successfully", body = ApiResponse<ScreenDisplayResponse>),
        (status = 404, description = "Display not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_screen_display(
    Path(display_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateScreenDisplayRequest>,
) -> Result<Json<ApiResponse<ScreenDisplayResponse>>, StatusCode> {
    let existing = match screen_display::Entity::find_by_id(display_id).one(&state.db).await {
        Ok(Some(display_model)) => display_model,
        Ok(None) => {
            warn!("Screen display with ID {} not found for update", display_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup screen display {}: {}", display_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut display_active: screen_display::ActiveModel = existing.into();
    if let Some(name) = request.name {
        display_active.name = Set(name);
    }
    if let Some(content) = request.content {
        display_active.content = Set(content);
    }
    if let Some(config) = request.config {
        display_active.config = Set(config);
    }

    match display_active.update(&state.db).await {
        Ok(updated) => {
            info!("Screen display {} updated successfully", display_id);
            Ok(Json(ApiResponse {
                data: ScreenDisplayResponse::from(updated),
                message: "Display updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update screen display {}: {}", display_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a screen display
#[utoipa::path(
    delete,
    path = "/api/v1/screen-displays/{display_id}",
    tag = "displays",
    params(
        ("display_id" = i32, Path, description = "Display ID"),
    ),
    responses(
        (status = 200, description = "Display deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Display not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_screen_display(
    Path(display_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match screen_display::Entity::delete_by_id(display_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Screen display {} deleted successfully", display_id);
            Ok(Json(ApiResponse {
                data: format!("Display {} deleted", display_id),
                message: "Display deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("Screen display with ID {} not found for deletion", display_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to delete screen display {}: {}", display_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
