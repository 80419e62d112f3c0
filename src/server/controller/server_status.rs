use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        server_status::{ServerStatusDto, ShutdownDto, StartServerDto},
    },
    server::{
        error::AppError,
        middleware::auth::{authorize, ApiCaller},
        model::{caller::Capability, server_status::StartServerParams},
        service::server_status::ServerStatusService,
        state::AppState,
    },
};

/// Tag for grouping server status endpoints in OpenAPI documentation
pub static SERVER_STATUS_TAG: &str = "server";

/// Get the current server status.
///
/// # Access Control
/// - `Operator` - Any allowed role
///
/// # Returns
/// - `200 OK` - Current status, idle or running
/// - `401 Unauthorized` - Missing or unknown bearer token
/// - `403 Forbidden` - Caller holds no allowed role
#[utoipa::path(
    get,
    path = "/status",
    tag = SERVER_STATUS_TAG,
    responses(
        (status = 200, description = "Current server status", body = ServerStatusDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_status(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;

    let status = ServerStatusService::new(&state).status().await;

    Ok(Json(status.into_dto()))
}

/// Announce a server startup.
///
/// Records the running session and posts the startup announcement to the SSU channel.
/// The API client's name is recorded as the starting user.
///
/// # Access Control
/// - `Operator` - Any allowed role
///
/// # Arguments
/// - `state` - Application state
/// - `caller` - API client resolved from the bearer token
/// - `payload` - Server name, host, ping target and optional description
///
/// # Returns
/// - `201 Created` - Session started
/// - `400 Bad Request` - Empty server name or malformed body
/// - `409 Conflict` - A session is already running
/// - `503 Service Unavailable` - SSU channel not configured
#[utoipa::path(
    post,
    path = "/ssu",
    tag = SERVER_STATUS_TAG,
    request_body = StartServerDto,
    responses(
        (status = 201, description = "Server startup announced", body = ServerStatusDto),
        (status = 400, description = "Invalid request body", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto),
        (status = 409, description = "A server session is already running", body = ErrorDto),
        (status = 503, description = "SSU channel not configured", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn start_server(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    payload: Result<Json<StartServerDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;
    let Json(payload) = payload?;

    let params = StartServerParams::from_dto(payload, caller.name);
    let status = ServerStatusService::new(&state).start(params).await?;

    Ok((StatusCode::CREATED, Json(status.into_dto())))
}

/// Announce the shutdown of the running session.
///
/// # Access Control
/// - `Operator` - Any allowed role
///
/// # Returns
/// - `200 OK` - The session that was shut down
/// - `409 Conflict` - No session is running
/// - `503 Service Unavailable` - SSD channel not configured
#[utoipa::path(
    post,
    path = "/ssd",
    tag = SERVER_STATUS_TAG,
    responses(
        (status = 200, description = "Server shutdown announced", body = ShutdownDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto),
        (status = 409, description = "No server session is running", body = ErrorDto),
        (status = 503, description = "SSD channel not configured", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn shutdown_server(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;

    let ended = ServerStatusService::new(&state).shutdown(&caller.name).await?;

    Ok(Json(ended.into_dto()))
}
