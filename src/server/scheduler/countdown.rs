use chrono::Utc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::server::{error::AppError, service::poll::PollService, state::AppState};

/// Starts the poll countdown scheduler.
///
/// Runs one cycle immediately so polls that ran out while the bot was offline are
/// closed right away, then repeats every `update_interval_seconds`. A background task
/// watches the interval published by the settings service and swaps the job when it
/// changes.
///
/// # Arguments
/// - `state` - Application state shared with the commands and the router
///
/// # Returns
/// - `Ok(JobScheduler)` - The running scheduler, kept for shutdown
/// - `Err(AppError::SchedulerErr)` - The scheduler or its job could not be created
pub async fn start_scheduler(state: AppState) -> Result<JobScheduler, AppError> {
    PollService::new(&state).run_cycle(Utc::now()).await;

    let scheduler = JobScheduler::new().await?;

    let mut interval_rx = state.poll_interval.subscribe();
    let interval = *interval_rx.borrow_and_update();
    let job_id = scheduler.add(countdown_job(state.clone(), interval)?).await?;

    scheduler.start().await?;

    tracing::info!("Poll countdown scheduler started, running every {}s", interval);

    tokio::spawn(watch_interval(
        scheduler.clone(),
        state,
        interval_rx,
        job_id,
        interval,
    ));

    Ok(scheduler)
}

/// Builds the repeated job running one countdown cycle.
fn countdown_job(state: AppState, interval_seconds: u64) -> Result<Job, AppError> {
    let job = Job::new_repeated_async(
        Duration::from_secs(interval_seconds.max(1)),
        move |_uuid, _lock| {
            let state = state.clone();

            Box::pin(async move {
                PollService::new(&state).run_cycle(Utc::now()).await;
            })
        },
    )?;

    Ok(job)
}

/// Replaces the countdown job whenever the published interval changes.
///
/// The new job is added before the old one is removed so there is no window without
/// a countdown. Ends when the settings side of the channel is dropped.
async fn watch_interval(
    scheduler: JobScheduler,
    state: AppState,
    mut interval_rx: watch::Receiver<u64>,
    mut job_id: Uuid,
    mut interval: u64,
) {
    while interval_rx.changed().await.is_ok() {
        let requested = *interval_rx.borrow_and_update();
        if requested == interval {
            continue;
        }

        match reschedule(&scheduler, &state, job_id, requested).await {
            Ok(new_id) => {
                tracing::info!(
                    "Poll countdown rescheduled from every {}s to every {}s",
                    interval,
                    requested
                );
                job_id = new_id;
                interval = requested;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to reschedule poll countdown to {}s, keeping {}s: {}",
                    requested,
                    interval,
                    e
                );
            }
        }
    }

    tracing::debug!("Poll interval watcher stopped");
}

async fn reschedule(
    scheduler: &JobScheduler,
    state: &AppState,
    old_id: Uuid,
    interval_seconds: u64,
) -> Result<Uuid, AppError> {
    let new_id = scheduler
        .add(countdown_job(state.clone(), interval_seconds)?)
        .await?;
    scheduler.remove(&old_id).await?;

    Ok(new_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::startup::load_app_state;
    use test_utils::builder::TestBuilder;

    #[tokio::test]
    async fn reschedule_replaces_the_countdown_job() -> Result<(), AppError> {
        let test = TestBuilder::new().build().await.unwrap();
        let (state, _rx) = load_app_state(test.data_dir()).await?;
        let mut scheduler = JobScheduler::new().await?;
        let old_id = scheduler.add(countdown_job(state.clone(), 60)?).await?;

        let before = Utc::now();
        let new_id = reschedule(&scheduler, &state, old_id, 600).await?;

        assert_ne!(new_id, old_id);
        assert_eq!(scheduler.next_tick_for_job(old_id).await?, None);
        let next_tick = scheduler
            .next_tick_for_job(new_id)
            .await?
            .expect("replacement job is scheduled");
        assert!(next_tick >= before + chrono::Duration::seconds(599));

        Ok(())
    }
}
