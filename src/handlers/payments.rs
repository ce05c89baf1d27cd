use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use model::entities::order;
use model::entities::payment::{self, PaymentMethod, PaymentStatus};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePaymentRequest {
    /// Amount, must be positive
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: Option<PaymentStatus>,
    /// External payment gateway reference
    pub gateway_ref: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdatePaymentRequest {
    pub status: Option<PaymentStatus>,
    pub gateway_ref: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i32,
    pub order_id: i32,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub gateway_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Set when the payment reaches Completed
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<payment::Model> for PaymentResponse {
    fn from(model: payment::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            amount: model.amount,
            method: model.method,
            status: model.status,
            gateway_ref: model.gateway_ref,
            created_at: model.created_at,
            paid_at: model.paid_at,
        }
    }
}

/// Record a payment against an order
#[utoipa::path(
    post,
    path = "/api/v1/orders/{order_id}/payments",
    tag = "payments",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment created successfully", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_payment(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Recording payment of {} for order {} via {:?}",
        request.amount, order_id, request.method
    );

    if request.amount <= Decimal::ZERO {
        warn!("Rejected non-positive payment amount for order {}", order_id);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Payment amount must be positive".to_string(),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

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

    let status = request.status.unwrap_or(PaymentStatus::Pending);
    let now = Utc::now();
    let new_payment = payment::ActiveModel {
        order_id: Set(order_id),
        amount: Set(request.amount),
        method: Set(request.method),
        status: Set(status),
        gateway_ref: Set(request.gateway_ref),
        created_at: Set(now),
        paid_at: Set((status == PaymentStatus::Completed).then_some(now)),
        ..Default::default()
    };

    match new_payment.insert(&state.db).await {
        Ok(payment_model) => {
            info!(
                "Payment created with ID: {} for order {}, status {:?}",
                payment_model.id, order_id, payment_model.status
            );
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: PaymentResponse::from(payment_model),
                    message: "Payment created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create payment for order {}: {}", order_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating payment".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all payments of an order
#[utoipa::path(
    get,
    path = "/api/v1/orders/{order_id}/payments",
    tag = "payments",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    responses(
        (status = 200, description = "Payments retrieved successfully", body = ApiResponse<Vec<PaymentResponse>>),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_order_payments(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PaymentResponse>>>, StatusCode> {
    match order::Entity::find_by_id(order_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Order with ID {} not found", order_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to verify order {}: {}", order_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match payment::Entity::find()
        .filter(payment::Column::OrderId.eq(order_id))
        .order_by_asc(payment::Column::CreatedAt)
        .all(&state.db)
        .await
    {
        Ok(payments) => Ok(Json(ApiResponse {
            data: payments.into_iter().map(PaymentResponse::from).collect(),
            message: "Payments retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!(
                "Failed to retrieve payments for order {}: {}",
                order_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific payment by ID
#[utoipa::path(
    get,
    path = "/api/v1/payments/{payment_id}",
    tag = "payments",
    params(
        ("payment_id" = i32, Path, description = "Payment ID"),
    ),
    responses(
        (status = 200, description = "Payment retrieved successfully", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_payment(
    Path(payment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PaymentResponse>>, StatusCode> {
    match payment::Entity::find_by_id(payment_id).one(&state.db).await {
        Ok(Some(payment_model)) => Ok(Json(ApiResponse {
            data: PaymentResponse::from(payment_model),
            message: "Payment retrieved successfully".to_string(),
            success: true,
        })),
        Ok(None) => {
            warn!("Payment with ID {} not found", payment_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve payment {}: {}", payment_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a payment's status or gateway reference
///
/// The paid-at time is stamped once when the payment reaches Completed.
#[utoipa::path(
    put,
    path = "/api/v1/payments/{payment_id}",
    tag = "payments",
    params(
        ("payment_id" = i32, Path, description = "Payment ID"),
    ),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment updated successfully", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_payment(
    Path(payment_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<ApiResponse<PaymentResponse>>, StatusCode> {
    let existing = match payment::Entity::find_by_id(payment_id).one(&state.db).await {
        Ok(Some(payment_model)) => payment_model,
        Ok(None) => {
            warn!("Payment with ID {} not found for update", payment_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup payment {}: {}", payment_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let already_paid = existing.paid_at.is_some();
    let mut payment_active: payment::ActiveModel = existing.into();
    if let Some(status) = request.status {
        payment_active.status = Set(status);
        if status == PaymentStatus::Completed && !already_paid {
            payment_active.paid_at = Set(Some(Utc::now()));
        }
    }
    if let Some(gateway_ref) = request.gateway_ref {
        payment_active.gateway_ref = Set(Some(gateway_ref));
    }

    match payment_active.update(&state.db).await {
        Ok(updated) => {
            info!(
                "Payment {} updated to status {:?}",
                payment_id, updated.status
            );
            Ok(Json(ApiResponse {
                data: PaymentResponse::from(updated),
                message: "Payment updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to update payment {}: {}", payment_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
