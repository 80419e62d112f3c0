use crate::server::{
    data::{
        settings::SettingsRepository,
        state::{StateRepository, StateSnapshot},
    },
    error::data::DataError,
    model::{poll::PollState, settings::Settings},
};
use test_utils::{builder::TestBuilder, fixture};
