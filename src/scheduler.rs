use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    announce::{announce_weekly, ChannelSender},
    config::Config,
    error::AppError,
};

/// Every Monday at 00:00, seconds field first.
pub const WEEKLY_SCHEDULE: &str = "0 0 0 * * MON";

/// Starts the weekly announcement job in the configured UTC offset.
pub async fn start_scheduler(
    config: Arc<Config>,
    sender: Arc<dyn ChannelSender>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    scheduler.add(weekly_job(config, sender)?).await?;
    scheduler.start().await?;

    tracing::info!("Weekly announcement scheduler started");

    Ok(scheduler)
}

fn weekly_job(config: Arc<Config>, sender: Arc<dyn ChannelSender>) -> Result<Job, AppError> {
    let offset = config.utc_offset;

    let job = Job::new_async_tz(WEEKLY_SCHEDULE, offset, move |_uuid, _lock| {
        let config = config.clone();
        let sender = sender.clone();

        Box::pin(async move {
            if let Err(e) = announce_weekly(sender.as_ref(), &config, Utc::now()).await {
                tracing::error!("Error posting weekly announcement: {}", e);
            }
        })
    })?;

    Ok(job)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike, Weekday};

    use super::*;
    use crate::{announce::tests::RecordingSender, config::tests::test_config};

    #[tokio::test]
    async fn weekly_job_registers() {
        let sender = Arc::new(RecordingSender::default());
        let mut scheduler = start_scheduler(Arc::new(test_config()), sender.clone())
            .await
            .unwrap();

        scheduler.shutdown().await.unwrap();
        assert!(sender.messages().is_empty());
    }

    #[tokio::test]
    async fn next_run_is_monday_midnight_local() {
        let config = Arc::new(test_config());
        let offset = config.utc_offset;
        let mut scheduler = JobScheduler::new().await.unwrap();
        let id = scheduler
            .add(weekly_job(config, Arc::new(RecordingSender::default())).unwrap())
            .await
            .unwrap();
        scheduler.start().await.unwrap();

        let next = scheduler
            .next_tick_for_job(id)
            .await
            .unwrap()
            .unwrap()
            .with_timezone(&offset);

        assert_eq!(offset.local_minus_utc(), 9 * 3600);
        assert_eq!(next.weekday(), Weekday::Mon);
        assert_eq!((next.hour(), next.minute(), next.second()), (0, 0, 0));
        assert!(next > Utc::now());

        scheduler.shutdown().await.unwrap();
    }
}
