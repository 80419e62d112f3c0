use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::AuthGuard,
    model::{
        caller::{Caller, Capability},
        settings::Settings,
    },
};
use test_utils::fixture;


fn configured_settings() -> Settings {
    serde_json::from_value(fixture::settings::configured()).unwrap()
}

fn discord_caller(user_id: u64, roles: &[&str]) -> Caller {
    Caller {
        user_id: Some(user_id),
        name: format!("user-{user_id}"),
        roles: roles.iter().map(|role| role.to_string()).collect(),
        administrator: false,
    }
}
