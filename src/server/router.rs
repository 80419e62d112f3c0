use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{ErrorBodyDto, ErrorDto, HealthDto},
        poll::{CreatePollDto, PollDto, RefreshPollDto},
        server_status::{ServerStatusDto, ShutdownDto, StartServerDto},
        settings::{
            AdminUserDto, ApiClientDto, AutoUpdateDto, PollConfigDto, RoleDto, RolesDto,
            SettingsDto, UpdateChannelsDto, UpdatePollConfigDto,
        },
    },
    server::{
        controller::{
            health::{self, HEALTH_TAG},
            poll::{self, POLL_TAG},
            role::{self, ROLE_TAG},
            server_status::{self, SERVER_STATUS_TAG},
            settings::{self, SETTINGS_TAG},
        },
        state::AppState,
    },
};

/// Path the Swagger UI is served under.
pub const DOCS_PATH: &str = "/api/docs";

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api/docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SSU Announcer API",
        description = "Server startup announcements and startup polls"
    ),
    paths(
        health::health,
        server_status::get_status,
        server_status::start_server,
        server_status::shutdown_server,
        poll::create_poll,
        poll::list_polls,
        poll::get_poll,
        poll::refresh_poll,
        poll::cancel_poll,
        poll::complete_poll,
        role::get_roles,
        role::add_role,
        role::remove_role,
        role::clear_roles,
        settings::get_settings,
        settings::update_channels,
        settings::update_poll_config,
        settings::set_auto_update,
        settings::add_admin,
        settings::remove_admin,
    ),
    components(schemas(
        ErrorDto,
        ErrorBodyDto,
        HealthDto,
        ServerStatusDto,
        StartServerDto,
        ShutdownDto,
        PollDto,
        CreatePollDto,
        RefreshPollDto,
        SettingsDto,
        PollConfigDto,
        ApiClientDto,
        RolesDto,
        RoleDto,
        UpdateChannelsDto,
        UpdatePollConfigDto,
        AutoUpdateDto,
        AdminUserDto,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = HEALTH_TAG, description = "Liveness"),
        (name = SERVER_STATUS_TAG, description = "Server startup and shutdown"),
        (name = POLL_TAG, description = "Startup polls"),
        (name = ROLE_TAG, description = "Roles allowed to run operator commands"),
        (name = SETTINGS_TAG, description = "Bot settings")
    )
)]
pub struct ApiDoc;

/// Registers the bearer token scheme referenced by the secured routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Builds the REST router with every endpoint, the API docs and the HTTP layers.
///
/// # Returns
/// - `Router<AppState>` - Router awaiting the application state
pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health))
        .route("/status", get(server_status::get_status))
        .route("/ssu", post(server_status::start_server))
        .route("/ssd", post(server_status::shutdown_server))
        .route("/ssup", post(poll::create_poll))
        .route("/polls", get(poll::list_polls))
        .route("/polls/{id}", get(poll::get_poll))
        .route("/polls/{id}/refresh", post(poll::refresh_poll))
        .route("/polls/{id}/cancel", post(poll::cancel_poll))
        .route("/polls/{id}/complete", post(poll::complete_poll))
        .route("/roles", get(role::get_roles))
        .route("/roles/add", post(role::add_role))
        .route("/roles/remove", post(role::remove_role))
        .route("/roles/clear", post(role::clear_roles))
        .route("/config", get(settings::get_settings))
        .route("/config/channels", post(settings::update_channels))
        .route("/config/poll", post(settings::update_poll_config))
        .route("/config/auto-update", post(settings::set_auto_update))
        .route("/config/admins/add", post(settings::add_admin))
        .route("/config/admins/remove", post(settings::remove_admin))
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
