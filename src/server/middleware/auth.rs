use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::{
        caller::{Caller, Capability},
        settings::Settings,
    },
    state::AppState,
};

/// Authorization gate checking a caller against the current settings.
///
/// Every command and endpoint names the capabilities it needs and asks the guard
/// before calling into a service. The guard itself holds no state beyond a borrow of
/// the settings.
pub struct AuthGuard<'a> {
    settings: &'a Settings,
}

impl<'a> AuthGuard<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Checks that the caller holds every listed capability.
    ///
    /// `Operator` is granted by any allowed role (everyone when the list is empty),
    /// `Admin` by a listed admin user id. Administrators hold both.
    ///
    /// # Arguments
    /// - `caller` - Identity of whoever issued the command or request
    /// - `capabilities` - Capabilities the operation requires
    ///
    /// # Returns
    /// - `Ok(())` - Access granted
    /// - `Err(AppError::AuthErr(AccessDenied))` - A capability is missing
    pub fn require(&self, caller: &Caller, capabilities: &[Capability]) -> Result<(), AppError> {
        if caller.administrator {
            return Ok(());
        }

        let is_admin_user = caller
            .user_id
            .is_some_and(|id| self.settings.is_admin_user(id));

        for capability in capabilities {
            let granted = match capability {
                Capability::Operator => {
                    is_admin_user || self.settings.allows_roles(&caller.roles)
                }
                Capability::Admin => is_admin_user,
            };

            if !granted {
                let required_roles = match capability {
                    Capability::Operator => self.settings.allowed_roles.clone(),
                    Capability::Admin => Vec::new(),
                };

                tracing::debug!("{} denied {} capability", caller.name, capability);

                return Err(AuthError::AccessDenied {
                    caller: caller.name.clone(),
                    capability: *capability,
                    required_roles,
                }
                .into());
            }
        }

        Ok(())
    }

    /// Resolves the `Authorization` header of a REST request to an API client.
    ///
    /// # Arguments
    /// - `header` - Raw header value, if present
    ///
    /// # Returns
    /// - `Ok(Caller)` - The client matching the bearer token
    /// - `Err(AppError::AuthErr(MissingCredentials))` - No bearer token supplied
    /// - `Err(AppError::AuthErr(UnknownToken))` - Token not configured
    pub fn authenticate(&self, header: Option<&str>) -> Result<Caller, AppError> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        let client = self
            .settings
            .find_api_client(token)
            .ok_or(AuthError::UnknownToken)?;

        Ok(Caller {
            user_id: None,
            name: client.name.clone(),
            roles: client.roles.clone(),
            administrator: client.admin,
        })
    }
}

/// Checks capabilities against the live settings.
///
/// The settings lock is released before returning, so the caller may go on to change
/// settings.
pub async fn authorize(
    state: &AppState,
    caller: &Caller,
    capabilities: &[Capability],
) -> Result<(), AppError> {
    let settings = state.settings.read().await;
    AuthGuard::new(&settings).require(caller, capabilities)
}

/// Extractor resolving the bearer token of a REST request to its `Caller`.
///
/// Rejects the request with 401 before the handler runs when the token is missing or
/// unknown. Capabilities are checked by the handler.
pub struct ApiCaller(pub Caller);

impl FromRequestParts<AppState> for ApiCaller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let settings = state.settings.read().await;
        let caller = AuthGuard::new(&settings).authenticate(header)?;

        Ok(ApiCaller(caller))
    }
}
