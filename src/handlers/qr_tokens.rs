use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use model::entities::{order, qr_token, table};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request body for minting a QR token
///
/// The token value itself is always generated server-side.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateQrTokenRequest {
    pub table_id: Option<i32>,
    pub order_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QrTokenResponse {
    pub id: i32,
    pub token: Uuid,
    pub table_id: Option<i32>,
    pub order_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<qr_token::Model> for QrTokenResponse {
    fn from(model: qr_token::Model) -> Self {
        Self {
            id: model.id,
            token: model.token,
            table_id: model.table_id,
            order_id: model.order_id,
            created_at: model.created_at,
        }
    }
}

/// Mint a new QR token
#[utoipa::path(
    post,
    path = "/api/v1/qr-tokens",
    tag = "tables",
    request_body = CreateQrTokenRequest,
    responses(
        (status = 201, description = "QR token created successfully", body = ApiResponse<QrTokenResponse>),
        (status = 404, description = "Referenced table or order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_qr_token(
    State(state): State<AppState>,
    Json(request): Json<CreateQrTokenRequest>,
) -> Result<(StatusCode, Json<ApiResponse<QrTokenResponse>>), (StatusCode, Json<ErrorResponse>)> {
    if let Some(table_id) = request.table_id {
        match table::Entity::find_by_id(table_id).one(&state.db).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!("Table with ID {} does not exist", table_id);
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
                error!("Failed to verify table {}: {}", table_id, db_error);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error while verifying table".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    }),
                ));
            }
        }
    }

    if let Some(order_id) = request.order_id {
        match order::Entity::find_by_id(order_id).one(&state.db).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!("Order with ID {} does not exist", order_id);
                return Err((
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: format!("Order with ID {} does not exist", order_id),
                        code: "INVALID_ORDER_ID".to_string(),
                        success: false,
                    }),
                ));
            }
            Err(db_error) => {
                error!("Failed to verify order {}: {}", order_id, db_error);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error while verifying order".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    }),
                ));
            }
        }
    }

    let token = Uuid::new_v4();
    let new_token = qr_token::ActiveModel {
        token: Set(token),
        table_id: Set(request.table_id),
        order_id: Set(request.order_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    match new_token.insert(&state.db).await {
        Ok(token_model) => {
            info!("QR token {} minted with ID {}", token, token_model.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: QrTokenResponse::from(token_model),
                    message: "QR token created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create QR token: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating QR token".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all QR tokens
#[utoipa::path(
    get,
    path = "/api/v1/qr-tokens",
    tag = "tables",
    responses(
        (status = 200, description = "QR tokens retrieved successfully", body = ApiResponse<Vec<QrTokenResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_qr_tokens(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<QrTokenResponse>>>, StatusCode> {
    match qr_token::Entity::find().all(&state.db).await {
        Ok(tokens) => Ok(Json(ApiResponse {
            data: tokens.into_iter().map(QrTokenResponse::from).collect(),
            message: "QR tokens retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!("Failed to retrieve QR tokens: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Look up a QR token by its value
#[utoipa::path(
    get,
    path = "/api/v1/qr-tokens/{token}",
    tag = "tables",
    params(
        ("token" = Uuid, Path, description = "Token value"),
    ),
    responses(
        (status = 200, description = "QR token retrieved successfully", body = ApiResponse<QrTokenResponse>),
        (status = 404, description = "QR token not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_qr_token(
    Path(token): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<QrTokenResponse>>, StatusCode> {
    match qr_token::Entity::find()
        .filter(qr_token::Column::Token.eq(token))
        .one(&state.db)
        .await
    {
        Ok(Some(token_model)) => {
            debug!("Found QR token {}", token);
            Ok(Json(ApiResponse {
                data: QrTokenResponse::from(token_model),
                message: "QR token retrieved successfully".to_string(),
                success: true,
            }))
        }
        Ok(None) => {
            warn!("QR token {} not found", token);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve QR token {}: {}", token, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Revoke a QR token by its value
#[utoipa::path(
    delete,
    path = "/api/v1/qr-tokens/{token}",
    tag = "tables",
    params(
        ("token" = Uuid, Path, description = "Token value"),
    ),
    responses(
        (status = 200, description = "QR token revoked successfully", body = ApiResponse<String>),
        (status = 404, description = "QR token not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_qr_token(
    Path(token): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match qr_token::Entity::delete_many()
        .filter(qr_token::Column::Token.eq(token))
        .exec(&state.db)
        .await
    {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("QR token {} revoked", token);
            Ok(Json(ApiResponse {
                data: format!("QR token {} revoked", token),
                message: "QR token revoked successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!("QR token {} not found for revocation", token);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to revoke QR token {}: {}", token, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
