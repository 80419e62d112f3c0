use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        settings::{RoleDto, RolesDto},
    },
    server::{
        error::AppError,
        middleware::auth::{authorize, ApiCaller},
        model::caller::Capability,
        service::settings::SettingsService,
        state::AppState,
    },
};

/// Tag for grouping role endpoints in OpenAPI documentation
pub static ROLE_TAG: &str = "role";

/// List the role names allowed to run operator commands.
///
/// An empty list means everyone may run them.
///
/// # Access Control
/// - `Operator` - Any allowed role
#[utoipa::path(
    get,
    path = "/roles",
    tag = ROLE_TAG,
    responses(
        (status = 200, description = "Allowed roles", body = RolesDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_roles(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;

    let settings = SettingsService::new(&state).get().await;

    Ok(Json(settings.into_roles_dto()))
}

/// Allow a role name. Adding a role that is already allowed changes nothing.
///
/// # Access Control
/// - `Admin` - Admin clients only
///
/// # Returns
/// - `200 OK` - Allowed roles after the change
/// - `400 Bad Request` - Empty role name
#[utoipa::path(
    post,
    path = "/roles/add",
    tag = ROLE_TAG,
    request_body = RoleDto,
    responses(
        (status = 200, description = "Allowed roles after the change", body = RolesDto),
        (status = 400, description = "Invalid role name", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the admin capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn add_role(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    payload: Result<Json<RoleDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Admin]).await?;
    let Json(payload) = payload?;

    let (settings, _) = SettingsService::new(&state).add_role(&payload.role).await?;

    Ok(Json(settings.into_roles_dto()))
}

/// Remove a role name from the allowed roles.
///
/// # Access Control
/// - `Admin` - Admin clients only
#[utoipa::path(
    post,
    path = "/roles/remove",
    tag = ROLE_TAG,
    request_body = RoleDto,
    responses(
        (status = 200, description = "Allowed roles after the change", body = RolesDto),
        (status = 400, description = "Invalid role name", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the admin capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn remove_role(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    payload: Result<Json<RoleDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Admin]).await?;
    let Json(payload) = payload?;

    let (settings, _) = SettingsService::new(&state)
        .remove_role(&payload.role)
        .await?;

    Ok(Json(settings.into_roles_dto()))
}

/// Clear the allowed roles, opening operator commands to everyone.
///
/// # Access Control
/// - `Admin` - Admin clients only
#[utoipa::path(
    post,
    path = "/roles/clear",
    tag = ROLE_TAG,
    responses(
        (status = 200, description = "Allowed roles after the change", body = RolesDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the admin capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn clear_roles(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Admin]).await?;

    let settings = SettingsService::new(&state).clear_roles().await?;

    Ok(Json(settings.into_roles_dto()))
}
