//! User handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{
    MSG_USER_ACTIVATED, MSG_USER_CREATED, MSG_USER_DEACTIVATED, MSG_USER_DELETED, MSG_USER_UPDATED,
};
use crate::domain::{ActivateForm, UserForm, UserResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// One entry of the account-type selection list
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryOption {
    /// Stable key stored as `account_type`
    #[schema(example = "student")]
    pub alias: String,
    /// Display label
    #[schema(example = "Student")]
    pub title: String,
}

impl From<(String, String)> for CategoryOption {
    fn from((alias, title): (String, String)) -> Self {
        Self { alias, title }
    }
}

/// Data backing the create form
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateFormResponse {
    pub categories: Vec<CategoryOption>,
}

/// Data backing the edit form
#[derive(Debug, Serialize, ToSchema)]
pub struct EditFormResponse {
    pub user: UserResponse,
    pub categories: Vec<CategoryOption>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/new", get(create_form))
        .route("/:id", get(show_user).put(update_user).delete(delete_user))
        .route("/:id/edit", get(edit_form))
        .route("/:id/activate", post(activate_user))
}

/// List users, fifteen records per page
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)")
    ),
    responses(
        (status = 200, description = "One page of users"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    let page = state.user_service.list_users(params.page).await?;
    Ok(Json(page.map(UserResponse::from)))
}

/// Category options for the create form
#[utoipa::path(
    get,
    path = "/users/new",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account-type options", body = CreateFormResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_form(State(state): State<AppState>) -> AppResult<Json<CreateFormResponse>> {
    let categories = state.user_service.category_options().await?;
    Ok(Json(CreateFormResponse {
        categories: categories.into_iter().map(CategoryOption::from).collect(),
    }))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UserForm,
    responses(
        (status = 201, description = "User created, set-password mail queued", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(form): Json<UserForm>,
) -> AppResult<Created<UserResponse>> {
    let user = state.user_service.create_user(form).await?;
    Ok(Created(ApiResponse::with_message(
        UserResponse::from(user),
        MSG_USER_CREATED,
    )))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn show_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// User record plus category options for the edit form
#[utoipa::path(
    get,
    path = "/users/{id}/edit",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User and account-type options", body = EditFormResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EditFormResponse>> {
    let user = state.user_service.get_user(id).await?;
    let categories = state.user_service.category_options().await?;
    Ok(Json(EditFormResponse {
        user: UserResponse::from(user),
        categories: categories.into_iter().map(CategoryOption::from).collect(),
    }))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UserForm,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation or business-rule error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<UserForm>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .user_service
        .update_user(current_user.id, id, form)
        .await?;
    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        MSG_USER_UPDATED,
    )))
}

/// Activate or deactivate a user
#[utoipa::path(
    post,
    path = "/users/{id}/activate",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = ActivateForm,
    responses(
        (status = 200, description = "Activation state changed", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Cannot change your own activation state"),
        (status = 404, description = "User not found")
    )
)]
pub async fn activate_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<ActivateForm>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .user_service
        .set_activated(current_user.id, id, form.activated)
        .await?;

    let message = if form.activated {
        MSG_USER_ACTIVATED
    } else {
        MSG_USER_DEACTIVATED
    };

    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        message,
    )))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted, unsubscription queued"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Cannot delete your own account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.user_service.delete_user(current_user.id, id).await?;
    Ok(Json(ApiResponse::message(MSG_USER_DELETED)))
}
