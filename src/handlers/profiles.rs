use crate::handlers::accounts::AccountResponse;
use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveTime};
use model::entities::profile::{self, AttendanceStatus};
use model::entities::{account, prelude::*};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a staff profile
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateProfileRequest {
    pub display_name: String,
    pub email: Option<String>,
    /// Denormalized role; defaults to the account's role
    pub role: Option<account::Role>,
    pub shift_start: Option<NaiveTime>,
    pub shift_end: Option<NaiveTime>,
    pub attendance_date: Option<NaiveDate>,
    pub attendance_status: Option<AttendanceStatus>,
}

/// Request body for updating a staff profile
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<account::Role>,
    pub shift_start: Option<NaiveTime>,
    pub shift_end: Option<NaiveTime>,
    pub attendance_date: Option<NaiveDate>,
    pub attendance_status: Option<AttendanceStatus>,
}

/// Staff profile response with the owning account embedded
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: i32,
    pub account_id: i32,
    pub display_name: String,
    pub email: Option<String>,
    pub role: account::Role,
    pub shift_start: Option<NaiveTime>,
    pub shift_end: Option<NaiveTime>,
    pub attendance_date: Option<NaiveDate>,
    pub attendance_status: AttendanceStatus,
    /// Full representation of the owning account
    pub account: AccountResponse,
}

fn profile_response(profile: profile::Model, account: account::Model) -> ProfileResponse {
    ProfileResponse {
        id: profile.id,
        account_id: profile.account_id,
        display_name: profile.display_name,
        email: profile.email,
        role: profile.role,
        shift_start: profile.shift_start,
        shift_end: profile.shift_end,
        attendance_date: profile.attendance_date,
        attendance_status: profile.attendance_status,
        account: AccountResponse::from(account),
    }
}

/// Create the profile for an account
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{account_id}/profile",
    tag = "profiles",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created successfully", body = ApiResponse<ProfileResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 409, description = "Profile already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_profile(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_profile function for account_id: {}", account_id);

    if request.display_name.trim().is_empty() {
        warn!("Rejected profile creation with empty display name");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Display name must not be empty".to_string(),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

    // Referential check on the owning account
    let account_model = match Account::find_by_id(account_id).one(&state.db).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            warn!("Account with ID {} not found for profile creation", account_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Account with ID {} does not exist", account_id),
                    code: "INVALID_ACCOUNT_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to verify account {}: {}", account_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while verifying account".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let role = request.role.unwrap_or(account_model.role);
    let new_profile = profile::ActiveModel {
        account_id: Set(account_id),
        display_name: Set(request.display_name.clone()),
        email: Set(request.email.clone()),
        role: Set(role),
        shift_start: Set(request.shift_start),
        shift_end: Set(request.shift_end),
        attendance_date: Set(request.attendance_date),
        attendance_status: Set(request.attendance_status.unwrap_or(AttendanceStatus::Present)),
        ..Default::default()
    };

    match new_profile.insert(&state.db).await {
        Ok(profile_model) => {
            info!(
                "Profile created with ID {} for account {}",
                profile_model.id, account_id
            );
            let response = ApiResponse {
                data: profile_response(profile_model, account_model),
                message: "Profile created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create profile for account {}: {}",
                account_id, db_error
            );
            let (status, error_response) = if is_constraint_violation(&db_error) {
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: format!("Account {} already has a profile", account_id),
                        code: "PROFILE_ALREADY_EXISTS".to_string(),
                        success: false,
                    },
                )
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error while creating profile".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    },
                )
            };
            Err((status, Json(error_response)))
        }
    }
}

/// Get all profiles with their accounts
#[utoipa::path(
    get,
    path = "/api/v1/profiles",
    tag = "profiles",
    responses(
        (status = 200, description = "Profiles retrieved successfully", body = ApiResponse<Vec<ProfileResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_profiles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProfileResponse>>>, StatusCode> {
    trace!("Entering get_profiles function");

    match Profile::find().find_also_related(Account).all(&state.db).await {
        Ok(rows) => {
            let mut responses = Vec::with_capacity(rows.len());
            for (profile_model, account_model) in rows {
                // The account is guaranteed by the FK; a missing join row
                // indicates a broken database.
                match account_model {
                    Some(account_model) => {
                        responses.push(profile_response(profile_model, account_model))
                    }
                    None => {
                        error!(
                            "Profile {} has no owning account row",
                            profile_model.id
                        );
                        return Err(StatusCode::INTERNAL_SERVER_ERROR);
                    }
                }
            }
            info!("Successfully retrieved {} profiles", responses.len());
            Ok(Json(ApiResponse {
                data: responses,
                message: "Profiles retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to retrieve profiles: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get the profile for an account
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}/profile",
    tag = "profiles",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<ProfileResponse>),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_profile(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProfileResponse>>, StatusCode> {
    trace!("Entering get_profile function for account_id: {}", account_id);

    match Profile::find()
        .filter(profile::Column::AccountId.eq(account_id))
        .find_also_related(Account)
        .one(&state.db)
        .await
    {
        Ok(Some((profile_model, Some(account_model)))) => {
            debug!("Found profile {} for account {}", profile_model.id, account_id);
            Ok(Json(ApiResponse {
                data: profile_response(profile_model, account_model),
                message: "Profile retrieved successfully".to_string(),
                success: true,
            }))
        }
        Ok(Some((profile_model, None))) => {
            error!("Profile {} has no owning account row", profile_model.id);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Ok(None) => {
            warn!("No profile found for account {}", account_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve profile for account {}: {}",
                account_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update the profile for an account
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{account_id}/profile",
    tag = "profiles",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<ProfileResponse>),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_profile(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, StatusCode> {
    trace!("Entering update_profile function for account_id: {}", account_id);

    let (existing_profile, account_model) = match Profile::find()
        .filter(profile::Column::AccountId.eq(account_id))
        .find_also_related(Account)
        .one(&state.db)
        .await
    {
        Ok(Some((profile_model, Some(account_model)))) => (profile_model, account_model),
        Ok(Some((profile_model, None))) => {
            error!("Profile {} has no owning account row", profile_model.id);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(None) => {
            warn!("No profile found for account {} during update", account_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup profile for account {}: {}",
                account_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut profile_active: profile::ActiveModel = existing_profile.into();
    if let Some(display_name) = request.display_name {
        profile_active.display_name = Set(display_name);
    }
    if let Some(email) = request.email {
        profile_active.email = Set(Some(email));
    }
    if let Some(role) = request.role {
        profile_active.role = Set(role);
    }
    if let Some(shift_start) = request.shift_start {
        profile_active.shift_start = Set(Some(shift_start));
    }
    if let Some(shift_end) = request.shift_end {
        profile_active.shift_end = Set(Some(shift_end));
    }
    if let Some(attendance_date) = request.attendance_date {
        profile_active.attendance_date = Set(Some(attendance_date));
    }
    if let Some(attendance_status) = request.attendance_status {
        profile_active.attendance_status = Set(attendance_status);
    }

    match profile_active.update(&state.db).await {
        Ok(updated_profile) => {
            info!("Profile for account {} updated successfully", account_id);
            Ok(Json(ApiResponse {
                data: profile_response(updated_profile, account_model),
                message: "Profile updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!(
                "Failed to update profile for account {}: {}",
                account_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
