use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        settings::{
            AdminUserDto, AutoUpdateDto, SettingsDto, UpdateChannelsDto, UpdatePollConfigDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{authorize, ApiCaller},
        model::{caller::Capability, poll::UpdatePollConfigParams, settings::AnnouncementChannel},
        service::settings::SettingsService,
        state::AppState,
        util::parse::{parse_channel_id, parse_user_id},
    },
};

/// Tag for grouping settings endpoints in OpenAPI documentation
pub static SETTINGS_TAG: &str = "config";

/// Get the current settings. API client tokens are omitted.
///
/// # Access Control
/// - `Admin` - Admin clients only
#[utoipa::path(
    get,
    path = "/config",
    tag = SETTINGS_TAG,
    responses(
        (status = 200, description = "Current settings", body = SettingsDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the admin capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_settings(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Admin]).await?;

    let settings = SettingsService::new(&state).get().await;

    Ok(Json(settings.into_dto()))
}

/// Set one or more announcement channels.
///
/// Every given channel is validated before any is changed.
///
/// # Access Control
/// - `Admin` - Admin clients only
///
/// # Returns
/// - `200 OK` - Settings after the change
/// - `400 Bad Request` - A value is not a channel id or mention, or no channel was given
#[utoipa::path(
    post,
    path = "/config/channels",
    tag = SETTINGS_TAG,
    request_body = UpdateChannelsDto,
    responses(
        (status = 200, description = "Settings after the change", body = SettingsDto),
        (status = 400, description = "Invalid channel", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the admin capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_channels(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    payload: Result<Json<UpdateChannelsDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Admin]).await?;
    let Json(payload) = payload?;

    let mut channels = Vec::new();
    for (kind, value) in [
        (AnnouncementChannel::Ssu, payload.ssu_channel),
        (AnnouncementChannel::Ssd, payload.ssd_channel),
        (AnnouncementChannel::Ssup, payload.ssup_channel),
    ] {
        if let Some(value) = value {
            channels.push((kind, parse_channel_id(&value)?));
        }
    }

    let settings = SettingsService::new(&state).set_channels(&channels).await?;

    Ok(Json(settings.into_dto()))
}

/// Change the countdown configuration.
///
/// A changed update interval reschedules the countdown job.
///
/// # Access Control
/// - `Admin` - Admin clients only
///
/// # Returns
/// - `200 OK` - Settings after the change
/// - `400 Bad Request` - A value is out of range (`CONFIG_001`)
#[utoipa::path(
    post,
    path = "/config/poll",
    tag = SETTINGS_TAG,
    request_body = UpdatePollConfigDto,
    responses(
        (status = 200, description = "Settings after the change", body = SettingsDto),
        (status = 400, description = "Value out of range", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the admin capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_poll_config(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    payload: Result<Json<UpdatePollConfigDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Admin]).await?;
    let Json(payload) = payload?;

    let settings = SettingsService::new(&state)
        .update_poll_config(UpdatePollConfigParams::from_dto(payload))
        .await?;

    Ok(Json(settings.into_dto()))
}

/// Turn re-rendering of poll messages on every countdown cycle on or off.
///
/// # Access Control
/// - `Admin` - Admin clients only
#[utoipa::path(
    post,
    path = "/config/auto-update",
    tag = SETTINGS_TAG,
    request_body = AutoUpdateDto,
    responses(
        (status = 200, description = "Settings after the change", body = SettingsDto),
        (status = 400, description = "Invalid request body", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the admin capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn set_auto_update(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    payload: Result<Json<AutoUpdateDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Admin]).await?;
    let Json(payload) = payload?;

    let settings = SettingsService::new(&state)
        .set_auto_update(payload.enabled)
        .await?;

    Ok(Json(settings.into_dto()))
}

/// Grant a Discord user admin rights over the bot.
///
/// # Access Control
/// - `Admin` - Admin clients only
///
/// # Returns
/// - `200 OK` - Settings after the change
/// - `400 Bad Request` - Not a user id or mention
#[utoipa::path(
    post,
    path = "/config/admins/add",
    tag = SETTINGS_TAG,
    request_body = AdminUserDto,
    responses(
        (status = 200, description = "Settings after the change", body = SettingsDto),
        (status = 400, description = "Invalid user", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the admin capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn add_admin(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    payload: Result<Json<AdminUserDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Admin]).await?;
    let Json(payload) = payload?;

    let user_id = parse_user_id(&payload.user)?;
    let settings = SettingsService::new(&state).add_admin(user_id).await?;

    Ok(Json(settings.into_dto()))
}

/// Revoke a Discord user's admin rights over the bot.
///
/// # Access Control
/// - `Admin` - Admin clients only
#[utoipa::path(
    post,
    path = "/config/admins/remove",
    tag = SETTINGS_TAG,
    request_body = AdminUserDto,
    responses(
        (status = 200, description = "Settings after the change", body = SettingsDto),
        (status = 400, description = "Invalid user", body = ErrorDto),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorDto),
        (status = 403, description = "Caller lacks the admin capability", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn remove_admin(
    State(state): State<AppState>,
    ApiCaller(caller): ApiCaller,
    payload: Result<Json<AdminUserDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state, &caller, &[Capability::Admin]).await?;
    let Json(payload) = payload?;

    let user_id = parse_user_id(&payload.user)?;
    let settings = SettingsService::new(&state).remove_admin(user_id).await?;

    Ok(Json(settings.into_dto()))
}
