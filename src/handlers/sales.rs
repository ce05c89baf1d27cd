use crate::handlers::is_constraint_violation;
use crate::schemas::{
    ApiResponse, AppState, CachedData, ErrorResponse, MonthlySales, SalesSummaryResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use model::entities::sales_record::{self, month_label};
use model::entities::restaurant;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for recording a day's sales
///
/// The month label is always derived from the date; clients cannot set it.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSalesRecordRequest {
    pub date: NaiveDate,
    /// Total sales amount for the day, must not be negative
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateSalesRecordRequest {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesRecordResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub date: NaiveDate,
    /// Derived month label, e.g. "July 2026"
    pub month: String,
    pub amount: Decimal,
}

impl From<sales_record::Model> for SalesRecordResponse {
    fn from(model: sales_record::Model) -> Self {
        Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            date: model.date,
            month: model.month,
            amount: model.amount,
        }
    }
}

/// Query parameters for the sales summary
#[derive(Debug, Deserialize, IntoParams)]
pub struct SalesSummaryParams {
    /// Restrict the summary to one restaurant
    pub restaurant_id: Option<i32>,
    /// Restrict the summary to one month label, e.g. "July 2026"
    pub month: Option<String>,
}

fn validation_error(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
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

/// Record a day's sales for a restaurant
#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{restaurant_id}/sales",
    tag = "sales",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID"),
    ),
    request_body = CreateSalesRecordRequest,
    responses(
        (status = 201, description = "Sales record created successfully", body = ApiResponse<SalesRecordResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 409, description = "Record for that day already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_sales_record(
    Path(restaurant_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateSalesRecordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SalesRecordResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    debug!(
        "Recording sales of {} on {} for restaurant {}",
        request.amount, request.date, restaurant_id
    );

    if request.amount < Decimal::ZERO {
        return Err(validation_error("Sales amount must not be negative"));
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
            return Err(database_error("verifying restaurant"));
        }
    }

    let new_record = sales_record::ActiveModel {
        restaurant_id: Set(restaurant_id),
        date: Set(request.date),
        month: Set(month_label(request.date)),
        amount: Set(request.amount),
        ..Default::default()
    };

    match new_record.insert(&state.db).await {
        Ok(record_model) => {
            info!(
                "Sales record created with ID: {} for restaurant {} on {}",
                record_model.id, restaurant_id, record_model.date
            );
            state.cache.invalidate_all();
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: SalesRecordResponse::from(record_model),
                    message: "Sales record created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!(
                "Failed to create sales record for restaurant {}: {}",
                restaurant_id, db_error
            );
            let (status, error_response) = if is_constraint_violation(&db_error) {
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: format!(
                            "Restaurant {} already has a sales record for {}",
                            restaurant_id, request.date
                        ),
                        code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                        success: false,
                    },
                )
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error while creating sales record".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    },
                )
            };
            Err((status, Json(error_response)))
        }
    }
}

/// Get all sales records of a restaurant, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{restaurant_id}/sales",
    tag = "sales",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 200, description = "Sales records retrieved successfully", body = ApiResponse<Vec<SalesRecordResponse>>),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_sales_records(
    Path(restaurant_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SalesRecordResponse>>>, StatusCode> {
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

    match sales_record::Entity::find()
        .filter(sales_record::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(sales_record::Column::Date)
        .all(&state.db)
        .await
    {
        Ok(records) => Ok(Json(ApiResponse {
            data: records.into_iter().map(SalesRecordResponse::from).collect(),
            message: "Sales records retrieved successfully".to_string(),
            success: true,
        })),
        Err(db_error) => {
            error!(
                "Failed to retrieve sales records for restaurant {}: {}",
                restaurant_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a sales record
///
/// A date change rederives the month label.
#[utoipa::path(
    put,
    path = "/api/v1/sales/{sales_record_id}",
    tag = "sales",
    params(
        ("sales_record_id" = i32, Path, description = "Sales record ID"),
    ),
    request_body = UpdateSalesRecordRequest,
    responses(
        (status = 200, description = "Sales record updated successfully", body = ApiResponse<SalesRecordResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Sales record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_sales_record(
    Path(sales_record_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateSalesRecordRequest>,
) -> Result<Json<ApiResponse<SalesRecordResponse>>, (StatusCode, Json<ErrorResponse>)> {
    if request.amount.is_some_and(|amount| amount < Decimal::ZERO) {
        return Err(validation_error("Sales amount must not be negative"));
    }

    let existing = match sales_record::Entity::find_by_id(sales_record_id).one(&state.db).await {
        Ok(Some(record_model)) => record_model,
        Ok(None) => {
            warn!(
                "Sales record with ID {} not found for update",
                sales_record_id
            );
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Sales record with ID {} does not exist", sales_record_id),
                    code: "INVALID_SALES_RECORD_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup sales record {}: {}",
                sales_record_id, db_error
            );
            return Err(database_error("looking up sales record"));
        }
    };

    let mut record_active: sales_record::ActiveModel = existing.into();
    if let Some(date) = request.date {
        record_active.date = Set(date);
        record_active.month = Set(month_label(date));
    }
    if let Some(amount) = request.amount {
        record_active.amount = Set(amount);
    }

    match record_active.update(&state.db).await {
        Ok(updated) => {
            info!("Sales record {} updated successfully", sales_record_id);
            state.cache.invalidate_all();
            Ok(Json(ApiResponse {
                data: SalesRecordResponse::from(updated),
                message: "Sales record updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!(
                "Failed to update sales record {}: {}",
                sales_record_id, db_error
            );
            Err(database_error("updating sales record"))
        }
    }
}

/// Delete a sales record
#[utoipa::path(
    delete,
    path = "/api/v1/sales/{sales_record_id}",
    tag = "sales",
    params(
        ("sales_record_id" = i32, Path, description = "Sales record ID"),
    ),
    responses(
        (status = 200, description = "Sales record deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Sales record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_sales_record(
    Path(sales_record_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match sales_record::Entity::delete_by_id(sales_record_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Sales record {} deleted successfully", sales_record_id);
            state.cache.invalidate_all();
            Ok(Json(ApiResponse {
                data: format!("Sales record {} deleted", sales_record_id),
                message: "Sales record deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(_) => {
            warn!(
                "Sales record with ID {} not found for deletion",
                sales_record_id
            );
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to delete sales record {}: {}",
                sales_record_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get per-month sales totals
///
/// The summary is cached; any sales write drops the cache.
#[utoipa::path(
    get,
    path = "/api/v1/sales/summary",
    tag = "sales",
    params(SalesSummaryParams),
    responses(
        (status = 200, description = "Summary retrieved successfully", body = ApiResponse<SalesSummaryResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_sales_summary(
    State(state): State<AppState>,
    Query(params): Query<SalesSummaryParams>,
) -> Result<Json<ApiResponse<SalesSummaryResponse>>, StatusCode> {
    let cache_key = format!(
        "sales_summary:{}:{}",
        params
            .restaurant_id
            .map_or_else(|| "all".to_string(), |id| id.to_string()),
        params.month.as_deref().unwrap_or("all")
    );

    if let Some(CachedData::SalesSummary(summary)) = state.cache.get(&cache_key).await {
        debug!("Sales summary served from cache for key {}", cache_key);
        return Ok(Json(ApiResponse {
            data: summary,
            message: "Summary retrieved successfully".to_string(),
            success: true,
        }));
    }

    let mut query = sales_record::Entity::find().order_by_asc(sales_record::Column::Date);
    if let Some(restaurant_id) = params.restaurant_id {
        query = query.filter(sales_record::Column::RestaurantId.eq(restaurant_id));
    }
    if let Some(month) = &params.month {
        query = query.filter(sales_record::Column::Month.eq(month.clone()));
    }

    let records = match query.all(&state.db).await {
        Ok(records) => records,
        Err(db_error) => {
            error!("Failed to retrieve sales records for summary: {}", db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Records arrive date-ordered, so months come out chronologically.
    let mut months: Vec<MonthlySales> = Vec::new();
    for record in records {
        match months.iter_mut().find(|entry| entry.month == record.month) {
            Some(entry) => {
                entry.total += record.amount;
                entry.record_count += 1;
            }
            None => months.push(MonthlySales {
                month: record.month,
                total: record.amount,
                record_count: 1,
            }),
        }
    }

    let summary = SalesSummaryResponse {
        restaurant_id: params.restaurant_id,
        months,
    };
    state
        .cache
        .insert(cache_key, CachedData::SalesSummary(summary.clone()))
        .await;

    Ok(Json(ApiResponse {
        data: summary,
        message: "Summary retrieved successfully".to_string(),
        success: true,
    }))
}
