use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::{
        api::ErrorDto,
        poll::{CreatePollDto, PollDto, RefreshPollDto},
    },
    server::{
        error::{input::InputError, AppError},
        middleware::auth::{authorize, ApiCaller},
        model::{
            caller::Capability,
            poll::{CreatePollParams, PollId},
        },
        service::poll::PollService,
        state::AppState,
    },
};

/// Tag for grouping poll endpoints in OpenAPI documentation
pub static POLL_TAG: &str = "poll";

/// Create a startup poll.
///
/// Parses the duration expression, creates the poll and posts the poll message with
/// vote reactions to the SSUP channel.
///
/// # Access Control
/// - `Operator` - Any allowed role
///
/// # Arguments
/// - `state` - Application state
/// - `caller` - API client resolved from the bearer token
/// - `payload` - Server name, duration expression, ping target and description
///
/// # Returns
/// - `201 Created` - The created poll
/// - `400 Bad Request` - Invalid duration (`POLL_001`) or malformed body
/// - `409 Conflict` - Active poll limit reached
/// - `503 Service Unavailable` - SSUP channel not configured
#[utoipa::path(
    post,
    path = "/ssup",
    tag = POLL_TAG,
    request_body = CreatePollDto,
    responses(
        (status = 201, description = "Poll created", body = PollDto),
        (status = 400, description = "Invalid duration or request body", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto),
        (status = 409, description = "Too many active polls", body = ErrorDto),
        (status = 503, description = "SSUP channel not configured", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_poll(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    payload: Result<Json<CreatePollDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;
    let Json(payload) = payload?;

    let params = CreatePollParams::from_dto(payload, caller.name);
    let poll = PollService::new(&state).create(params).await?;

    Ok((StatusCode::CREATED, Json(poll.into_dto(Utc::now()))))
}

/// List active polls, soonest target time first.
///
/// # Access Control
/// - `Operator` - Any allowed role
#[utoipa::path(
    get,
    path = "/polls",
    tag = POLL_TAG,
    responses(
        (status = 200, description = "Active polls", body = Vec<PollDto>),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn list_polls(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;

    let now = Utc::now();
    let polls: Vec<PollDto> = PollService::new(&state)
        .list_active()
        .await
        .into_iter()
        .map(|poll| poll.into_dto(now))
        .collect();

    Ok(Json(polls))
}

/// Get a poll by id, including recently closed polls.
///
/// # Access Control
/// - `Operator` - Any allowed role
///
/// # Returns
/// - `200 OK` - The poll
/// - `400 Bad Request` - Id is not a number
/// - `404 Not Found` - No poll with this id
#[utoipa::path(
    get,
    path = "/polls/{id}",
    tag = POLL_TAG,
    params(
        ("id" = u64, Path, description = "Poll id")
    ),
    responses(
        (status = 200, description = "The poll", body = PollDto),
        (status = 400, description = "Invalid poll id", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_poll(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;

    let poll = PollService::new(&state).get(parse_poll_id(&id)?).await?;

    Ok(Json(poll.into_dto(Utc::now())))
}

/// Recompute a poll immediately and re-render its message.
///
/// An overdue poll is closed as expired when auto-cancel is on; otherwise it stays
/// active and is reported as overdue.
///
/// # Access Control
/// - `Operator` - Any allowed role
///
/// # Returns
/// - `200 OK` - Remaining time, overdue flag and emitted events
/// - `404 Not Found` - No poll with this id
/// - `409 Conflict` - The poll is already closed
#[utoipa::path(
    post,
    path = "/polls/{id}/refresh",
    tag = POLL_TAG,
    params(
        ("id" = u64, Path, description = "Poll id")
    ),
    responses(
        (status = 200, description = "Poll refreshed", body = RefreshPollDto),
        (status = 400, description = "Invalid poll id", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto),
        (status = 409, description = "Poll already closed", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn refresh_poll(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;

    let outcome = PollService::new(&state).refresh(parse_poll_id(&id)?).await?;

    Ok(Json(outcome.into_dto(Utc::now())))
}

/// Cancel an active poll.
///
/// # Access Control
/// - `Operator` - Any allowed role
///
/// # Returns
/// - `200 OK` - The cancelled poll
/// - `404 Not Found` - No poll with this id
/// - `409 Conflict` - The poll is already closed
#[utoipa::path(
    post,
    path = "/polls/{id}/cancel",
    tag = POLL_TAG,
    params(
        ("id" = u64, Path, description = "Poll id")
    ),
    responses(
        (status = 200, description = "Poll cancelled", body = PollDto),
        (status = 400, description = "Invalid poll id", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto),
        (status = 409, description = "Poll already closed", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn cancel_poll(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;

    let poll = PollService::new(&state)
        .cancel(parse_poll_id(&id)?, &caller.name)
        .await?;

    Ok(Json(poll.into_dto(Utc::now())))
}

/// Close an overdue poll that auto-cancel left open.
///
/// # Access Control
/// - `Operator` - Any allowed role
///
/// # Returns
/// - `200 OK` - The completed poll
/// - `404 Not Found` - No poll with this id
/// - `409 Conflict` - The poll is closed already or its target time is still ahead
#[utoipa::path(
    post,
    path = "/polls/{id}/complete",
    tag = POLL_TAG,
    params(
        ("id" = u64, Path, description = "Poll id")
    ),
    responses(
        (status = 200, description = "Poll completed", body = PollDto),
        (status = 400, description = "Invalid poll id", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the operator capability", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto),
        (status = 409, description = "Poll closed or not due yet", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn complete_poll(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Operator]).await?;

    let poll = PollService::new(&state)
        .complete(parse_poll_id(&id)?, &caller.name)
        .await?;

    Ok(Json(poll.into_dto(Utc::now())))
}

fn parse_poll_id(value: &str) -> Result<PollId, AppError> {
    value
        .trim()
        .parse::<u64>()
        .map(PollId)
        .map_err(|_| InputError::InvalidPollReference(value.to_string()).into())
}
