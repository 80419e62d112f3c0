use chrono::{DateTime, Utc};

/// Formats the time left until `target` for display in a poll embed.
///
/// Whole minutes are shown below an hour, hours and minutes below a day, and days
/// and hours beyond that. A zero component is omitted (`2h`, `3d`).
///
/// # Arguments
/// - `target` - The moment being counted down to
/// - `now` - Current time
///
/// # Returns
/// - `"Now"` once the target has been reached, otherwise text like `1d 4h`
pub fn format_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if target <= now {
        return "Now".to_string();
    }

    let total_minutes = (target - now).num_minutes();

    if total_minutes < 60 {
        format!("{}min", total_minutes)
    } else if total_minutes < 1_440 {
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;
        if minutes > 0 {
            format!("{}h {}min", hours, minutes)
        } else {
            format!("{}h", hours)
        }
    } else {
        let days = total_minutes / 1_440;
        let hours = (total_minutes % 1_440) / 60;
        if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        }
    }
}
