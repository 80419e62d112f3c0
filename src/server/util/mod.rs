//! Small parsing and formatting helpers shared by the bot and the REST layer.

pub mod duration;
pub mod parse;
pub mod time;
