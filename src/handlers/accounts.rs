use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::access;
use model::entities::account::{self, Role};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new staff account
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Username (must be unique)
    pub username: String,
    /// Email (must be unique, used for login)
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Staff role (default: Staff)
    pub role: Option<Role>,
    /// Superuser accounts get unconditional back-office access
    pub is_superuser: Option<bool>,
    /// Whether the account can log in (default: true)
    pub is_active: Option<bool>,
}

/// Request body for updating a staff account
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
}

/// Staff account response model
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: String,
    pub role: Role,
    pub is_elevated: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    /// Whether this account would be admitted to an admin panel session
    pub admin_access: bool,
}

impl From<account::Model> for AccountResponse {
    fn from(model: account::Model) -> Self {
        let full_name = model.full_name();
        let admin_access =
            access::can_access_admin(model.is_active, model.is_elevated, model.is_superuser);
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            full_name,
            role: model.role,
            is_elevated: model.is_elevated,
            is_superuser: model.is_superuser,
            is_active: model.is_active,
            admin_access,
        }
    }
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

/// Create a new staff account
///
/// The elevated-access flag is never taken from the request: it is derived
/// from the role, except for superusers who get it set once here.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_account function");
    debug!(
        "Creating account with username: {}, role: {:?}",
        request.username, request.role
    );

    if request.username.trim().is_empty() {
        warn!("Rejected account creation with empty username");
        return Err(validation_error("Username must not be empty"));
    }
    if request.email.trim().is_empty() {
        warn!("Rejected account creation with empty email");
        return Err(validation_error("Email must not be empty"));
    }

    let role = request.role.unwrap_or(Role::Staff);
    let is_superuser = request.is_superuser.unwrap_or(false);
    // Superusers start elevated; everyone else gets the flag from the role.
    let is_elevated = if is_superuser {
        true
    } else {
        access::derive_elevated_access(role, false, false)
    };

    let new_account = account::ActiveModel {
        username: Set(request.username.clone()),
        email: Set(request.email.clone()),
        first_name: Set(request.first_name.clone()),
        last_name: Set(request.last_name.clone()),
        role: Set(role),
        is_elevated: Set(is_elevated),
        is_superuser: Set(is_superuser),
        is_active: Set(request.is_active.unwrap_or(true)),
        ..Default::default()
    };

    trace!("Attempting to insert new account into database");
    match new_account.insert(&state.db).await {
        Ok(account_model) => {
            info!(
                "Account created successfully with ID: {}, username: {}, elevated: {}",
                account_model.id, account_model.username, account_model.is_elevated
            );
            let response = ApiResponse {
                data: AccountResponse::from(account_model),
                message: "Account created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create account '{}': {}",
                request.username, db_error
            );

            let (status, error_response) = if is_constraint_violation(&db_error) {
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: format!(
                            "Username '{}' or email '{}' already exists",
                            request.username, request.email
                        ),
                        code: "ACCOUNT_ALREADY_EXISTS".to_string(),
                        success: false,
                    },
                )
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error while creating account".to_string(),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    },
                )
            };

            Err((status, Json(error_response)))
        }
    }
}

/// Get all staff accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "Accounts retrieved successfully", body = ApiResponse<Vec<AccountResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_accounts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, StatusCode> {
    trace!("Entering get_accounts function");
    debug!("Fetching all accounts from database");

    match account::Entity::find().all(&state.db).await {
        Ok(accounts) => {
            let account_count = accounts.len();
            debug!("Retrieved {} accounts from database", account_count);

            let account_responses: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();

            info!("Successfully retrieved {} accounts", account_count);
            let response = ApiResponse {
                data: account_responses,
                message: "Accounts retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve accounts from database: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific staff account by ID
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account retrieved successfully", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, StatusCode> {
    trace!("Entering get_account function for account_id: {}", account_id);

    match account::Entity::find_by_id(account_id).one(&state.db).await {
        Ok(Some(account_model)) => {
            info!(
                "Successfully retrieved account with ID: {}, username: {}",
                account_model.id, account_model.username
            );
            let response = ApiResponse {
                data: AccountResponse::from(account_model),
                message: "Account retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Account with ID {} not found", account_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve account with ID {}: {}",
                account_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a staff account
///
/// Recomputes the elevated-access flag at this write boundary. Superusers
/// keep their flag untouched regardless of role changes; a freshly promoted
/// superuser is granted it here.
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, StatusCode> {
    trace!("Entering update_account function for account_id: {}", account_id);

    // First, find the existing account
    let existing_account = match account::Entity::find_by_id(account_id).one(&state.db).await {
        Ok(Some(account)) => {
            debug!("Found existing account: {}", account.username);
            account
        }
        Ok(None) => {
            warn!("Account with ID {} not found for update", account_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup account with ID {} for update: {}",
                account_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let role = request.role.unwrap_or(existing_account.role);
    let is_superuser = request.is_superuser.unwrap_or(existing_account.is_superuser);

    // Promotion to superuser grants the flag; derivation then leaves it alone
    // on every later save.
    let current_flag = if is_superuser && !existing_account.is_superuser {
        true
    } else {
        existing_account.is_elevated
    };
    let is_elevated = access::derive_elevated_access(role, is_superuser, current_flag);
    debug!(
        "Derived elevated access for account {}: role {:?}, superuser {}, elevated {}",
        account_id, role, is_superuser, is_elevated
    );

    // Create active model for update
    let mut account_active: account::ActiveModel = existing_account.into();
    if let Some(email) = request.email {
        account_active.email = Set(email);
    }
    if let Some(first_name) = request.first_name {
        account_active.first_name = Set(Some(first_name));
    }
    if let Some(last_name) = request.last_name {
        account_active.last_name = Set(Some(last_name));
    }
    if let Some(is_active) = request.is_active {
        account_active.is_active = Set(is_active);
    }
    account_active.role = Set(role);
    account_active.is_superuser = Set(is_superuser);
    account_active.is_elevated = Set(is_elevated);

    trace!("Attempting to update account in database");
    match account_active.update(&state.db).await {
        Ok(updated_account) => {
            info!(
                "Account with ID {} updated successfully, role: {:?}, elevated: {}",
                account_id, updated_account.role, updated_account.is_elevated
            );
            let response = ApiResponse {
                data: AccountResponse::from(updated_account),
                message: "Account updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update account with ID {}: {}",
                account_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a staff account
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_account function for account_id: {}", account_id);

    match account::Entity::delete_by_id(account_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Account with ID {} deleted successfully", account_id);
                let response = ApiResponse {
                    data: format!("Account {} deleted", account_id),
                    message: "Account deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Account with ID {} not found for deletion (no rows affected)",
                    account_id
                );
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete account with ID {}: {}",
                account_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
