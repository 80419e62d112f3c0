//! Compact duration expressions such as `45min`, `1d12h30min` or `1y3mo2w6d25min`.
//!
//! An expression is a run of `<integer><unit>` tokens with no separators. Units are
//! matched case-insensitively and use fixed magnitudes (a month is 30 days, a year is
//! 365 days); they are not calendar aware. Tokens may repeat and appear in any order,
//! every token is summed into the total.

use crate::server::error::input::InputError;

/// Units accepted in a duration expression with their length in seconds.
const UNITS: [(&str, u64); 6] = [
    ("min", 60),
    ("mo", 2_592_000),
    ("h", 3_600),
    ("d", 86_400),
    ("w", 604_800),
    ("y", 31_536_000),
];

/// Unit spellings listed in error details.
pub const ACCEPTED_UNITS: [&str; 6] = ["min", "h", "d", "w", "mo", "y"];

/// Parses a compact duration expression into a number of seconds.
///
/// The whole input must be consumed; a malformed trailing token is an error rather
/// than being silently dropped.
///
/// # Arguments
/// - `input` - Expression such as `1d12h30min`
///
/// # Returns
/// - `Ok(u64)` - Total duration in seconds
/// - `Err(InputError::InvalidDuration)` - Empty input, a token without an integer,
///   an unknown unit, trailing characters, or a total that overflows
pub fn parse_duration_seconds(input: &str) -> Result<u64, InputError> {
    let expr = input.trim().to_ascii_lowercase();
    if expr.is_empty() {
        return Err(invalid(input, "duration is empty"));
    }

    let mut total: u64 = 0;
    let mut rest = expr.as_str();

    while !rest.is_empty() {
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            return Err(invalid(
                input,
                &format!("expected a number before '{}'", rest),
            ));
        }

        let (number, tail) = rest.split_at(digits);
        let amount: u64 = number
            .parse()
            .map_err(|_| invalid(input, &format!("'{}' is too large", number)))?;

        let Some((unit, magnitude)) = UNITS
            .iter()
            .find(|(unit, _)| tail.starts_with(unit))
            .copied()
        else {
            return Err(invalid(
                input,
                &format!("unknown unit after '{}'", number),
            ));
        };

        total = amount
            .checked_mul(magnitude)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(|| invalid(input, "duration is too large"))?;

        rest = &tail[unit.len()..];
    }

    Ok(total)
}

/// Parses a duration expression into a `chrono::Duration`.
///
/// # Arguments
/// - `input` - Expression such as `30min`
///
/// # Returns
/// - `Ok(chrono::Duration)` - Parsed duration
/// - `Err(InputError::InvalidDuration)` - See [`parse_duration_seconds`]
pub fn parse_duration(input: &str) -> Result<chrono::Duration, InputError> {
    let seconds = parse_duration_seconds(input)?;
    let seconds =
        i64::try_from(seconds).map_err(|_| invalid(input, "duration is too large"))?;

    chrono::Duration::try_seconds(seconds).ok_or_else(|| invalid(input, "duration is too large"))
}

fn invalid(input: &str, reason: &str) -> InputError {
    InputError::InvalidDuration {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
