use crate::server::error::input::InputError;

/// Parses a user argument given as a raw id or a `<@id>` mention.
///
/// # Arguments
/// - `value` - `123456`, `<@123456>` or `<@!123456>`
///
/// # Returns
/// - `Ok(u64)` - The user id
/// - `Err(InputError::InvalidArguments)` - Not a user id or mention
pub fn parse_user_id(value: &str) -> Result<u64, InputError> {
    let id = match parse_user_mention(value) {
        UserMention::Id(id) => Some(id),
        UserMention::Name(name) => name.parse::<u64>().ok(),
    };

    id.filter(|id| *id > 0).ok_or_else(|| {
        InputError::InvalidArguments(format!("'{}' is not a user id or mention", value.trim()))
    })
}

/// Extracts every `[bracketed]` argument from a command body, in order.
///
/// Text outside brackets is ignored and empty brackets are skipped, so
/// `[Testing Server] [@john] [@everyone]` yields three arguments. Arguments are
/// trimmed of surrounding whitespace.
///
/// # Arguments
/// - `content` - Command text following the command name
///
/// # Returns
/// - `Vec<String>` - The bracket contents, possibly empty
pub fn parse_bracketed_arguments(content: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut rest = content;

    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(']') else {
            break;
        };

        let arg = after_open[..close].trim();
        if !arg.is_empty() {
            args.push(arg.to_string());
        }
        rest = &after_open[close + 1..];
    }

    args
}

/// A user reference given as a command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMention {
    /// A Discord mention such as `<@123>` or `<@!123>`.
    Id(u64),
    /// Plain text, with any leading `@` removed.
    Name(String),
}

/// Parses a user mention argument.
///
/// # Arguments
/// - `value` - `<@id>`, `<@!id>`, `@name` or `name`
///
/// # Returns
/// - `UserMention::Id` - For a well formed Discord mention
/// - `UserMention::Name` - For anything else
pub fn parse_user_mention(value: &str) -> UserMention {
    let value = value.trim();

    if let Some(inner) = value.strip_prefix("<@").and_then(|v| v.strip_suffix('>')) {
        let digits = inner.trim_start_matches('!');
        if let Ok(id) = digits.parse::<u64>() {
            return UserMention::Id(id);
        }
    }

    UserMention::Name(value.trim_start_matches('@').to_string())
}

/// Normalises a role ping argument into text that can be posted above an embed.
///
/// `everyone`/`here` (with or without `@`) map to the special mentions, an existing
/// `<@&id>` role mention is kept, and a role name is resolved through `lookup_role`
/// into a role mention. Names that cannot be resolved are shown as `@name`.
///
/// # Arguments
/// - `value` - Raw argument from the command
/// - `lookup_role` - Resolves a role name to its id, typically from the guild cache
///
/// # Returns
/// - `String` - Text suitable for the message content
pub fn normalize_role_ping<F>(value: &str, lookup_role: F) -> String
where
    F: Fn(&str) -> Option<u64>,
{
    let value = value.trim();
    let lowered = value.to_lowercase();

    if lowered == "@everyone" || lowered == "everyone" {
        return "@everyone".to_string();
    }
    if lowered == "@here" || lowered == "here" {
        return "@here".to_string();
    }
    if value.starts_with("<@&") && value.ends_with('>') {
        return value.to_string();
    }

    let name = value.trim_start_matches('@');
    match lookup_role(name) {
        Some(role_id) => format!("<@&{}>", role_id),
        None => format!("@{}", name),
    }
}

/// Parses a channel argument given as a raw id or a `<#id>` mention.
///
/// # Arguments
/// - `value` - `123456` or `<#123456>`
///
/// # Returns
/// - `Ok(u64)` - The channel id
/// - `Err(InputError::InvalidChannel)` - Not a channel id or mention
pub fn parse_channel_id(value: &str) -> Result<u64, InputError> {
    let trimmed = value
        .trim()
        .trim_start_matches('<')
        .trim_start_matches('#')
        .trim_end_matches('>');

    match trimmed.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(InputError::InvalidChannel(value.to_string())),
    }
}

/// Parses a role argument for the allowed-role list.
///
/// Role mentions are resolved through `lookup_name`; plain names lose any leading `@`.
///
/// # Arguments
/// - `value` - `<@&id>`, `@Name` or `Name`
/// - `lookup_name` - Resolves a role id to its name, typically from the guild cache
///
/// # Returns
/// - `Ok(String)` - The role name
/// - `Err(InputError::InvalidRole)` - Empty input or a mention of an unknown role
pub fn parse_role_name<F>(value: &str, lookup_name: F) -> Result<String, InputError>
where
    F: Fn(u64) -> Option<String>,
{
    let value = value.trim();

    if let Some(inner) = value.strip_prefix("<@&").and_then(|v| v.strip_suffix('>')) {
        let role_id = inner
            .parse::<u64>()
            .map_err(|_| InputError::InvalidRole(value.to_string()))?;
        return lookup_name(role_id).ok_or_else(|| InputError::InvalidRole(value.to_string()));
    }

    let name = value.trim_start_matches('@').trim();
    if name.is_empty() {
        return Err(InputError::InvalidRole(value.to_string()));
    }

    Ok(name.to_string())
}

/// Parses an on/off style flag argument.
///
/// # Arguments
/// - `value` - `on`, `off`, `true`, `false`, `yes`, `no`, `1` or `0`
///
/// # Returns
/// - `Ok(bool)` - The flag value
/// - `Err(InputError::InvalidArguments)` - Any other text
pub fn parse_flag(value: &str) -> Result<bool, InputError> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" | "enable" | "enabled" => Ok(true),
        "off" | "false" | "no" | "0" | "disable" | "disabled" => Ok(false),
        _ => Err(InputError::InvalidArguments(format!(
            "expected on or off, got '{}'",
            value
        ))),
    }
}
