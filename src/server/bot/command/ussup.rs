use chrono::Utc;

use crate::server::{
    bot::command::{CommandContext, Reply},
    error::{input::InputError, AppError},
    middleware::auth::authorize,
    model::caller::Capability,
    service::poll::PollService,
    util::{parse::parse_bracketed_arguments, time::format_remaining},
};

/// What `USSUP` does with the poll it addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollAction {
    Refresh,
    Complete,
    Cancel,
}

/// Parses `<poll id | message id> [complete | cancel]`, bracketed or not.
pub fn parse_args(args: &str) -> Result<(u64, PollAction), InputError> {
    let mut tokens = parse_bracketed_arguments(args);
    if tokens.is_empty() {
        tokens = args.split_whitespace().map(str::to_string).collect();
    }

    let Some(reference) = tokens.first() else {
        return Err(InputError::InvalidArguments(
            "a poll id or message id is required".to_string(),
        ));
    };
    let reference = reference
        .parse::<u64>()
        .map_err(|_| InputError::InvalidPollReference(reference.clone()))?;

    let action = match tokens.get(1).map(|t| t.to_lowercase()).as_deref() {
        None => PollAction::Refresh,
        Some("complete") => PollAction::Complete,
        Some("cancel") => PollAction::Cancel,
        Some(other) => {
            return Err(InputError::InvalidArguments(format!(
                "unknown poll action '{}', expected complete or cancel",
                other
            )))
        }
    };

    Ok((reference, action))
}

/// `USSUP <poll id | message id> [complete | cancel]`
///
/// Without an action the poll is recomputed and its message re-rendered right away.
pub async fn run(ctx: &CommandContext<'_>, args: &str) -> Result<Reply, AppError> {
    authorize(ctx.state, &ctx.caller, &[Capability::Operator]).await?;

    let (reference, action) = parse_args(args)?;
    let service = PollService::new(ctx.state);
    let poll = service.find_by_reference(reference).await?;

    let reply = match action {
        PollAction::Refresh => {
            let outcome = service.refresh(poll.id).await?;
            if outcome.poll.is_active() && outcome.overdue {
                format!(
                    "⏰ Poll #{} is past its start time. Close it with `{}USSUP [{}] [complete]`",
                    poll.id, ctx.prefix, poll.id
                )
            } else if outcome.poll.is_active() {
                format!(
                    "✅ Poll #{} updated! Time until start: **{}**",
                    poll.id,
                    format_remaining(outcome.poll.target_time, Utc::now())
                )
            } else {
                format!("📊 Poll #{} has closed. Check for results in the channel.", poll.id)
            }
        }
        PollAction::Complete => {
            service.complete(poll.id, &ctx.caller.name).await?;
            format!("✅ Poll #{} completed", poll.id)
        }
        PollAction::Cancel => {
            service.cancel(poll.id, &ctx.caller.name).await?;
            format!("🚫 Poll #{} cancelled", poll.id)
        }
    };

    Ok(Reply::Text(reply))
}
